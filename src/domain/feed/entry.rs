//! Per-post extraction: one feed entry per post node, in document order.

use std::io::Cursor;

use anyhow::Context;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::error::FeedError;
use super::media::resolve_media;
use super::model::{Entry, FeedUrls, MediaReference, ParsedPage};
use super::schema::SELECTORS;

/// Build the full ordered entry sequence for the listing page.
///
/// A post missing any required field (title anchor, guid, author, timestamp)
/// is a schema violation and fails the whole request; a partial feed is
/// never returned. The flair is the one optional field: a post without one,
/// or with an empty one, simply carries no category.
pub fn build_entries(page: &ParsedPage, urls: &FeedUrls) -> Result<Vec<Entry>, FeedError> {
    let s = &*SELECTORS;
    let mut entries = Vec::new();

    for post in page.html.select(&s.posts) {
        // External-link posts put the outbound URL in the first title anchor
        // and the post's own page in a second one; the second wins.
        let anchors: Vec<_> = post.select(&s.title_anchor).collect();
        let anchor = anchors
            .get(1)
            .or_else(|| anchors.first())
            .copied()
            .ok_or_else(|| FeedError::missing("post title anchor"))?;

        let title = anchor.text().collect::<String>().trim().to_string();
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| FeedError::missing("post title link"))?;
        let link = page
            .base_url
            .join(href)
            .map_err(|_| FeedError::missing("resolvable post link"))?;

        let media = resolve_media(post, urls);
        let description_html = render_description(&media, &title)?;

        let guid = post
            .value()
            .attr("id")
            .ok_or_else(|| FeedError::missing("post id"))?
            .to_string();

        // The author path is kept relative, exactly as the page links it.
        let author = post
            .select(&s.author)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| FeedError::missing("post author"))?
            .to_string();

        let pub_date = post
            .select(&s.created)
            .next()
            .and_then(|el| el.value().attr("title"))
            .ok_or_else(|| FeedError::missing("post timestamp"))?
            .to_string();

        let category = post
            .select(&s.flair)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|flair| !flair.is_empty());

        entries.push(Entry {
            title,
            link: link.to_string(),
            description_html,
            guid,
            author,
            pub_date,
            category,
        });
    }

    Ok(entries)
}

/// Render the entry body: a container div holding an anchor to the full
/// image, wrapping the proxied thumbnail. The string is embedded verbatim
/// (CDATA) as the item description.
fn render_description(media: &MediaReference, title: &str) -> Result<String, FeedError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut div = BytesStart::new("div");
    div.push_attribute(("class", "col-md-9"));
    writer
        .write_event(Event::Start(div))
        .context("write description container")?;

    let mut anchor = BytesStart::new("a");
    anchor.push_attribute(("class", "bigImage"));
    anchor.push_attribute(("href", media.full_image_url.as_str()));
    writer
        .write_event(Event::Start(anchor))
        .context("write description anchor")?;

    let mut img = BytesStart::new("img");
    img.push_attribute(("src", media.thumbnail_url.as_str()));
    img.push_attribute(("alt", title));
    img.push_attribute(("title", title));
    img.push_attribute(("referrerpolicy", "no-referrer"));
    writer
        .write_event(Event::Empty(img))
        .context("write description image")?;

    writer
        .write_event(Event::End(BytesEnd::new("a")))
        .context("close description anchor")?;
    writer
        .write_event(Event::End(BytesEnd::new("div")))
        .context("close description container")?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes).context("description fragment is not valid UTF-8")?)
}
