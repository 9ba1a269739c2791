//! Selector table for the upstream listing page.
//!
//! Every structural path the extractors rely on lives here, so a layout
//! change upstream is a data change in this table, not a logic change in the
//! builders. The paths are pinned to the markup the libreddit-style
//! front-end serves today.

use once_cell::sync::Lazy;
use scraper::Selector;

pub struct PageSelectors {
    /// Sidebar block carrying the community metadata.
    pub sub_meta: Selector,
    /// Machine name of the community, e.g. `r/ksi`.
    pub sub_name: Selector,
    /// Human display title.
    pub sub_title: Selector,
    /// Community logo image.
    pub sub_logo: Selector,
    /// Human description paragraph.
    pub sub_description: Selector,
    /// One node per post, under the listing container.
    pub posts: Selector,
    /// Anchors inside a post's title header. External-link posts carry two.
    pub title_anchor: Selector,
    /// Post-level inline image anchor.
    pub media_image: Selector,
    /// Thumbnail anchor wrapping an inline vector description with an image.
    pub media_svg_thumbnail: Selector,
    /// Post-level inline video element.
    pub media_video: Selector,
    /// Author profile anchor in the post header.
    pub author: Selector,
    /// Timestamp element; its `title` attribute holds the formatted date.
    pub created: Selector,
    /// Optional flair on the title header.
    pub flair: Selector,
}

pub static SELECTORS: Lazy<PageSelectors> = Lazy::new(|| PageSelectors {
    sub_meta: sel("div#subreddit div#sub_meta"),
    sub_name: sel("p#sub_name"),
    sub_title: sel("h1#sub_title"),
    sub_logo: sel("img"),
    sub_description: sel("p#sub_description"),
    posts: sel("div#posts div.post"),
    title_anchor: sel("h2.post_title > a"),
    media_image: sel("a.post_media_image.short"),
    media_svg_thumbnail: sel("a.post_thumbnail svg desc img"),
    media_video: sel("video.post_media_video.short"),
    author: sel("p.post_header a.post_author"),
    created: sel("p.post_header span.created"),
    flair: sel("h2.post_title > small"),
});

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("selector table entry must be valid CSS")
}
