use scraper::Html;
use url::Url;

/// Placeholder returned when a post exposes no usable media at all.
pub const MEDIA_FALLBACK_URL: &str = "https://http.cat/404";

/// RFC-822 date format used by RSS 2.0 (`Mon, 02 Jan 2006 15:04:05 +0000`).
pub const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// A fetched listing page, decoded and parsed into a navigable tree.
///
/// The tree is owned by a single feed-generation call and dropped with it.
/// `base_url` is the configured upstream root, used for resolving every
/// relative link on the page.
pub struct ParsedPage {
    pub html: Html,
    pub base_url: Url,
}

impl ParsedPage {
    /// Decode `bytes` with the fixed legacy single-byte encoding and parse
    /// them leniently (unclosed tags and unknown attributes are tolerated).
    ///
    /// The front-end mislabels its UTF-8 output, so the declared page
    /// encoding is deliberately ignored.
    pub fn parse(bytes: &[u8], base_url: Url) -> Self {
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
        Self {
            html: Html::parse_document(&text),
            base_url,
        }
    }
}

/// Resolved URL set for one deployment: the upstream root, the two
/// image-proxy templates derived from the cache root, and our own public
/// base URL (for the feed's self link).
///
/// The proxy templates take the target image URL appended verbatim as the
/// trailing query parameter.
#[derive(Debug, Clone)]
pub struct FeedUrls {
    pub base: Url,
    pub image_proxy: String,
    pub thumbnail_proxy: String,
    pub public_base: String,
}

impl FeedUrls {
    pub fn new(
        reddit_url: &str,
        image_cache_url: &str,
        public_url: &str,
    ) -> Result<Self, url::ParseError> {
        let base = Url::parse(reddit_url)?;
        let cache = Url::parse(image_cache_url)?;
        let image_proxy = cache
            .join(&format!("/?default={MEDIA_FALLBACK_URL}&url="))?
            .to_string();
        let thumbnail_proxy = cache
            .join(&format!(
                "/?default={MEDIA_FALLBACK_URL}&w=500&h=500&output=png&url="
            ))?
            .to_string();

        Ok(Self {
            base,
            image_proxy,
            thumbnail_proxy,
            public_base: public_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Best-available media for one post, both fields absolute and already
/// passed through the image-proxy templates. Never empty: posts without
/// media get the proxied [`MEDIA_FALLBACK_URL`] in both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    pub full_image_url: String,
    pub thumbnail_url: String,
}

/// Feed-level metadata extracted from the page's sidebar block, plus the
/// ordered entries appended to it. One per feed-generation call.
#[derive(Debug, Clone)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub link: String,
    pub icon_url: String,
    pub pub_date: String,
    pub atom_self_link: String,
    pub entries: Vec<Entry>,
}

/// One feed item derived from one upstream post.
///
/// Everything except `category` is required before the entry is emitted;
/// `pub_date` is the preformatted date string the upstream page carries in
/// its timestamp element, and `author` is kept as the relative profile path
/// the page links to.
#[derive(Debug, Clone)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub description_html: String,
    pub guid: String,
    pub author: String,
    pub pub_date: String,
    pub category: Option<String>,
}
