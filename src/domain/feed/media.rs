//! Best-available media selection for one post.
//!
//! Image posts, thumbnail-only posts and video posts use structurally
//! different markup; the fallback order below decides which wins when a post
//! matches more than one shape.

use scraper::{ElementRef, Selector};
use url::Url;

use super::model::{FeedUrls, MediaReference, MEDIA_FALLBACK_URL};
use super::schema::SELECTORS;

/// Resolve the post's media to a full-image/thumbnail pair, both passed
/// through the deployment's image-proxy templates.
///
/// Ordered fallback, first match wins:
/// 1. inline image anchor,
/// 2. thumbnail anchor wrapping a vector description,
/// 3. inline video element,
/// 4. the fallback placeholder.
///
/// Always returns a populated reference.
pub fn resolve_media(post: ElementRef<'_>, urls: &FeedUrls) -> MediaReference {
    let s = &*SELECTORS;

    let image = media_url(post, &s.media_image, "href", &urls.base)
        .or_else(|| media_url(post, &s.media_svg_thumbnail, "src", &urls.base))
        .or_else(|| media_url(post, &s.media_video, "src", &urls.base))
        .unwrap_or_else(|| MEDIA_FALLBACK_URL.to_string());

    MediaReference {
        full_image_url: format!("{}{}", urls.image_proxy, image),
        thumbnail_url: format!("{}{}", urls.thumbnail_proxy, image),
    }
}

/// First element matching `selector`, with `attr` resolved against the base
/// and its query string stripped. An element that matches but lacks the
/// attribute falls through to the next shape in the chain.
fn media_url(
    post: ElementRef<'_>,
    selector: &Selector,
    attr: &str,
    base: &Url,
) -> Option<String> {
    let raw = post.select(selector).next()?.value().attr(attr)?;
    let mut resolved = base.join(raw).ok()?;
    resolved.set_query(None);
    Some(resolved.to_string())
}
