//! RSS 2.0 rendering of a built channel.

use std::io::{Cursor, Write};

use anyhow::Context;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::error::FeedError;
use super::model::Channel;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const GENERATOR_NAME: &str = "RedFeed";
const GENERATOR_URI: &str = "https://github.com/redfeed/redfeed-backend";

/// Render the channel as a pretty-printed, standalone RSS 2.0 document with
/// the Atom namespace declared on the root.
///
/// The output is complete or absent: a writer failure here is an internal
/// invariant violation, never a partial document.
pub fn serialize_feed(channel: &Channel) -> Result<String, FeedError> {
    Ok(render(channel)?)
}

fn render(channel: &Channel) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), Some("yes"))))
        .context("write XML declaration")?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    writer
        .write_event(Event::Start(rss))
        .context("open rss element")?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .context("open channel element")?;

    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "description", &channel.description)?;
    text_element(&mut writer, "link", &channel.link)?;
    text_element(&mut writer, "icon", &channel.icon_url)?;

    let mut generator = BytesStart::new("generator");
    generator.push_attribute(("uri", GENERATOR_URI));
    generator.push_attribute(("version", env!("CARGO_PKG_VERSION")));
    writer
        .write_event(Event::Start(generator))
        .context("open generator element")?;
    writer
        .write_event(Event::Text(BytesText::new(GENERATOR_NAME)))
        .context("write generator name")?;
    writer
        .write_event(Event::End(BytesEnd::new("generator")))
        .context("close generator element")?;

    text_element(&mut writer, "pubDate", &channel.pub_date)?;

    let mut atom_link = BytesStart::new("atom:link");
    atom_link.push_attribute(("href", channel.atom_self_link.as_str()));
    atom_link.push_attribute(("rel", "self"));
    atom_link.push_attribute(("type", "application/rss+xml"));
    writer
        .write_event(Event::Empty(atom_link))
        .context("write atom self link")?;

    for entry in &channel.entries {
        writer
            .write_event(Event::Start(BytesStart::new("item")))
            .context("open item element")?;

        text_element(&mut writer, "title", &entry.title)?;
        text_element(&mut writer, "link", &entry.link)?;

        writer
            .write_event(Event::Start(BytesStart::new("description")))
            .context("open item description")?;
        writer
            .write_event(Event::CData(BytesCData::new(entry.description_html.as_str())))
            .context("write item description")?;
        writer
            .write_event(Event::End(BytesEnd::new("description")))
            .context("close item description")?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        writer
            .write_event(Event::Start(guid))
            .context("open item guid")?;
        writer
            .write_event(Event::Text(BytesText::new(&entry.guid)))
            .context("write item guid")?;
        writer
            .write_event(Event::End(BytesEnd::new("guid")))
            .context("close item guid")?;

        text_element(&mut writer, "author", &entry.author)?;
        text_element(&mut writer, "pubDate", &entry.pub_date)?;
        if let Some(category) = &entry.category {
            text_element(&mut writer, "category", category)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("item")))
            .context("close item element")?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .context("close channel element")?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .context("close rss element")?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("serialized feed is not valid UTF-8")
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> anyhow::Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .with_context(|| format!("open {name} element"))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .with_context(|| format!("write {name} text"))?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .with_context(|| format!("close {name} element"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::model::Entry;
    use pretty_assertions::assert_eq;
    use quick_xml::Reader;

    fn channel(entries: Vec<Entry>) -> Channel {
        Channel {
            title: "KSI".to_string(),
            description: "The home of everything KSI.".to_string(),
            link: "https://example.com/r/ksi".to_string(),
            icon_url: "https://images.example.org/?default=https://http.cat/404&url=https://example.com/icon.png".to_string(),
            pub_date: "Wed, 06 Aug 2025 09:15:05 +0000".to_string(),
            atom_self_link: "https://feeds.example.net/r/ksi".to_string(),
            entries,
        }
    }

    fn entry(guid: &str) -> Entry {
        Entry {
            title: "A cat".to_string(),
            link: "https://example.com/r/ksi/comments/abc123/a_cat/".to_string(),
            description_html: r#"<div class="col-md-9"><a class="bigImage" href="https://img"><img src="https://thumb" alt="A cat" title="A cat" referrerpolicy="no-referrer"/></a></div>"#.to_string(),
            guid: guid.to_string(),
            author: "/user/someone".to_string(),
            pub_date: "Mar 01 2024, 12:00:00 UTC".to_string(),
            category: Some("Fan Art".to_string()),
        }
    }

    /// Re-parse the output, counting structural elements and pulling the
    /// description CDATA back out.
    fn reparse(xml: &str) -> (usize, usize, usize, usize, Vec<String>) {
        let mut reader = Reader::from_str(xml);
        let (mut rss, mut channels, mut items, mut atom_links) = (0, 0, 0, 0);
        let mut descriptions = Vec::new();
        loop {
            match reader.read_event().expect("output must be well-formed XML") {
                Event::Start(e) => match e.name().as_ref() {
                    b"rss" => rss += 1,
                    b"channel" => channels += 1,
                    b"item" => items += 1,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"atom:link" => atom_links += 1,
                Event::CData(text) => {
                    descriptions.push(String::from_utf8(text.into_inner().to_vec()).unwrap())
                }
                Event::Eof => break,
                _ => {}
            }
        }
        (rss, channels, items, atom_links, descriptions)
    }

    #[test]
    fn it_should_emit_a_declaration_prefixed_standalone_document() {
        let xml = serialize_feed(&channel(vec![])).unwrap();
        assert!(
            xml.starts_with(r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>"#),
            "{xml}"
        );
    }

    #[test]
    fn it_should_stay_well_formed_with_zero_entries() {
        let xml = serialize_feed(&channel(vec![])).unwrap();
        let (rss, channels, items, atom_links, _) = reparse(&xml);

        assert_eq!((rss, channels, items, atom_links), (1, 1, 0, 1));
    }

    #[test]
    fn it_should_emit_one_item_per_entry_in_order() {
        let xml = serialize_feed(&channel(vec![entry("t3_a"), entry("t3_b")])).unwrap();
        let (rss, channels, items, atom_links, _) = reparse(&xml);

        assert_eq!((rss, channels, items, atom_links), (1, 1, 2, 1));
        assert!(xml.find("t3_a").unwrap() < xml.find("t3_b").unwrap());
    }

    #[test]
    fn it_should_carry_the_description_fragment_verbatim() {
        let item = entry("t3_a");
        let xml = serialize_feed(&channel(vec![item.clone()])).unwrap();
        let (_, _, _, _, descriptions) = reparse(&xml);

        assert_eq!(descriptions, vec![item.description_html]);
    }

    #[test]
    fn it_should_mark_guids_as_non_permalinks() {
        let xml = serialize_feed(&channel(vec![entry("t3_a")])).unwrap();
        assert!(xml.contains(r#"<guid isPermaLink="false">t3_a</guid>"#), "{xml}");
    }

    #[test]
    fn it_should_identify_the_generator() {
        let xml = serialize_feed(&channel(vec![])).unwrap();
        assert!(
            xml.contains(&format!(
                r#"<generator uri="{GENERATOR_URI}" version="{}">{GENERATOR_NAME}</generator>"#,
                env!("CARGO_PKG_VERSION")
            )),
            "{xml}"
        );
    }

    #[test]
    fn it_should_skip_the_category_element_when_absent() {
        let mut uncategorized = entry("t3_a");
        uncategorized.category = None;
        let xml = serialize_feed(&channel(vec![uncategorized])).unwrap();

        assert!(!xml.contains("<category>"));
    }

    #[test]
    fn it_should_escape_markup_in_text_fields() {
        let mut spiky = channel(vec![]);
        spiky.title = "KSI & <friends>".to_string();
        let xml = serialize_feed(&spiky).unwrap();

        assert!(xml.contains("KSI &amp; &lt;friends&gt;"), "{xml}");
        // And it still parses back.
        reparse(&xml);
    }

    #[test]
    fn it_should_be_deterministic_for_a_fixed_channel() {
        let fixed = channel(vec![entry("t3_a")]);
        assert_eq!(serialize_feed(&fixed).unwrap(), serialize_feed(&fixed).unwrap());
    }
}
