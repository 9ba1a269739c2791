//! Feed-level metadata extraction from the page's sidebar block.

use chrono::Utc;
use scraper::{ElementRef, Selector};

use super::error::FeedError;
use super::model::{Channel, FeedUrls, ParsedPage, RFC822_FORMAT};
use super::schema::SELECTORS;

/// Extract the channel metadata for the listing page.
///
/// There is no feed without this data: a missing sidebar block or a missing
/// required child is fatal for the whole request.
pub fn build_channel(page: &ParsedPage, urls: &FeedUrls) -> Result<Channel, FeedError> {
    let s = &*SELECTORS;

    let meta = page
        .html
        .select(&s.sub_meta)
        .next()
        .ok_or_else(|| FeedError::missing("community meta block"))?;

    // Machine name comes as `r/<community>` and doubles as the path of both
    // the canonical link and our own self link.
    let name = required_text(meta, &s.sub_name, "community name")?;
    let title = required_text(meta, &s.sub_title, "community title")?;
    let description = required_text(meta, &s.sub_description, "community description")?;

    let logo_src = meta
        .select(&s.sub_logo)
        .next()
        .and_then(|img| img.value().attr("src"))
        .ok_or_else(|| FeedError::missing("community logo"))?;
    let mut logo = page
        .base_url
        .join(logo_src)
        .map_err(|_| FeedError::missing("resolvable community logo URL"))?;
    logo.set_query(None);

    let link = page
        .base_url
        .join(&name)
        .map_err(|_| FeedError::missing("resolvable community link"))?;

    Ok(Channel {
        title,
        description,
        link: link.to_string(),
        icon_url: format!("{}{}", urls.image_proxy, logo),
        pub_date: Utc::now().format(RFC822_FORMAT).to_string(),
        atom_self_link: format!("{}/{}", urls.public_base, name),
        entries: Vec::new(),
    })
}

fn required_text(
    scope: ElementRef<'_>,
    selector: &Selector,
    what: &str,
) -> Result<String, FeedError> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| FeedError::missing(what))
}
