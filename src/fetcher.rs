use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::FetchError;

const USER_AGENT: &str = "gator";

/// Named references that HTML also accepts without a trailing `;`.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig",
    "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy",
    "curren", "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14",
    "frac34", "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt",
    "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf",
    "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg",
    "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

/// Characters substituted for numeric references in the C1 range (`&#128;` to `&#159;`),
/// which publishers use to mean windows-1252.
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// A parsed RSS document with entities decoded in its title and description text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssFeed {
    pub channel_title: String,
    pub channel_link: String,
    pub channel_description: String,
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Downloads `url` and returns its normalized feed. Nothing is returned on partial failure.
    pub async fn fetch(&self, url: &str) -> Result<RssFeed, FetchError> {
        info!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!("Read {} bytes from {}", bytes.len(), url);

        let feed = parse_feed(&bytes).inspect_err(|e| warn!("Unparseable feed at {}: {}", url, e))?;

        info!("Parsed {} items from '{}'", feed.items.len(), feed.channel_title);
        Ok(feed)
    }
}

/// Which direct child of `<channel>` or `<item>` the reader is inside.
#[derive(Clone, Copy)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

impl Field {
    fn of_channel(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" => Some(Field::Description),
            _ => None,
        }
    }

    fn of_item(name: &[u8]) -> Option<Self> {
        match name {
            b"pubDate" => Some(Field::PubDate),
            other => Self::of_channel(other),
        }
    }
}

#[derive(Default)]
struct FeedBuilder {
    feed: RssFeed,
    item: Option<RssItem>,
    done: bool,
}

impl FeedBuilder {
    fn set(&mut self, field: Field, value: String) {
        match (self.item.as_mut(), field) {
            (Some(item), Field::Title) => item.title = value,
            (Some(item), Field::Link) => item.link = value,
            (Some(item), Field::Description) => item.description = value,
            (Some(item), Field::PubDate) => item.pub_date = value,
            (None, Field::Title) => self.feed.channel_title = value,
            (None, Field::Link) => self.feed.channel_link = value,
            (None, Field::Description) => self.feed.channel_description = value,
            (None, Field::PubDate) => {}
        }
    }

    fn finish(mut self) -> RssFeed {
        self.feed.channel_title = decode_html_entities(&self.feed.channel_title).into_owned();
        self.feed.channel_description =
            decode_html_entities(&self.feed.channel_description).into_owned();
        for item in &mut self.feed.items {
            item.title = decode_html_entities(&item.title).into_owned();
            item.description = decode_html_entities(&item.description).into_owned();
        }
        self.feed
    }
}

fn parse_error(e: impl std::fmt::Display) -> FetchError {
    FetchError::Parse(format!("XML parse error: {}", e))
}

/// Parse an RSS 2.0 document from raw XML bytes.
///
/// Only the first `<channel>` under the root element is read, and within it only
/// the direct `title`/`link`/`description` children and the `<item>` elements.
/// Anything else is skipped. Title and description text is entity-decoded on the
/// way out; links and dates are returned as written.
pub fn parse_feed(xml: &[u8]) -> Result<RssFeed, FetchError> {
    std::str::from_utf8(xml).map_err(parse_error)?;
    let mut reader = Reader::from_reader(xml);

    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut builder: Option<FeedBuilder> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                path.push(name);
                let depth = path.len();
                let name = &path[depth - 1];

                if builder.is_none() {
                    if depth == 2 && name == b"channel" {
                        builder = Some(FeedBuilder::default());
                    }
                } else if let Some(b) = builder.as_mut().filter(|b| !b.done) {
                    match depth {
                        3 if name == b"item" => b.item = Some(RssItem::default()),
                        3 => {
                            field = Field::of_channel(name);
                            text.clear();
                        }
                        4 if b.item.is_some() => {
                            field = Field::of_item(name);
                            text.clear();
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(_)) => {
                let depth = path.len();
                let name = path.pop().unwrap_or_default();

                if let Some(b) = builder.as_mut().filter(|b| !b.done) {
                    match depth {
                        2 => b.done = true,
                        3 if name == b"item" => {
                            if let Some(item) = b.item.take() {
                                b.feed.items.push(item);
                            }
                        }
                        3 if b.item.is_none() => {
                            if let Some(f) = field.take() {
                                b.set(f, text.trim().to_string());
                            }
                        }
                        4 if b.item.is_some() => {
                            if let Some(f) = field.take() {
                                b.set(f, text.trim().to_string());
                            }
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                // `<description/>` and friends: the field is present but empty.
                let depth = path.len() + 1;
                if builder.is_none() {
                    if depth == 2 && e.name().as_ref() == b"channel" {
                        builder = Some(FeedBuilder {
                            done: true,
                            ..FeedBuilder::default()
                        });
                    }
                } else if let Some(b) = builder.as_mut().filter(|b| !b.done) {
                    let name = e.name();
                    let empty = match depth {
                        3 if b.item.is_none() && name.as_ref() != b"item" => {
                            Field::of_channel(name.as_ref())
                        }
                        3 if name.as_ref() == b"item" => {
                            b.feed.items.push(RssItem::default());
                            None
                        }
                        4 if b.item.is_some() => Field::of_item(name.as_ref()),
                        _ => None,
                    };
                    if let Some(f) = empty {
                        b.set(f, String::new());
                    }
                }
            }
            // Text is validated even where it is discarded.
            Ok(Event::Text(e)) => {
                let chunk = e.unescape_with(resolve_html5_entity).map_err(parse_error)?;
                if field.is_some() {
                    text.push_str(&chunk);
                }
            }
            Ok(Event::CData(e)) => {
                let chunk = std::str::from_utf8(&e).map_err(parse_error)?;
                if field.is_some() {
                    text.push_str(chunk);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(e)),
            _ => {}
        }
        buf.clear();
    }

    if !path.is_empty() {
        return Err(FetchError::Parse(
            "unexpected end of document".to_string(),
        ));
    }

    builder
        .map(FeedBuilder::finish)
        .ok_or_else(|| FetchError::Parse("missing <channel> element".to_string()))
}

/// Decode HTML entities and character references in `text`.
///
/// Follows the HTML rules for text content: named references, decimal and hex
/// character references, legacy names written without `;`, and the windows-1252
/// reading of `&#128;` through `&#159;`. Unrecognised names and stray ampersands
/// are kept as written, so decoding text without entities is a no-op.
pub fn decode_html_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match decode_reference(tail, &mut out) {
            Some(consumed) => rest = &tail[consumed..],
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Decodes the reference at the start of `tail` (which begins with `&`) into `out`
/// and returns the number of bytes it spans.
fn decode_reference(tail: &str, out: &mut String) -> Option<usize> {
    let bytes = tail.as_bytes();
    if bytes.get(1) == Some(&b'#') {
        return decode_numeric_reference(tail, out);
    }

    let name_len = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &tail[1..=name_len];

    if bytes.get(name_len + 1) == Some(&b';') {
        if let Some(value) = resolve_html5_entity(name) {
            out.push_str(value);
            return Some(name_len + 2);
        }
    } else if LEGACY_ENTITIES.contains(&name) {
        if let Some(value) = resolve_html5_entity(name) {
            out.push_str(value);
            return Some(name_len + 1);
        }
    }

    // `&copy2024` or `&ampx;`: the longest legacy name the run starts with.
    let (value, len) = (2..name_len).rev().find_map(|len| {
        let prefix = &name[..len];
        LEGACY_ENTITIES
            .contains(&prefix)
            .then(|| resolve_html5_entity(prefix))
            .flatten()
            .map(|value| (value, len))
    })?;
    out.push_str(value);
    Some(len + 1)
}

fn decode_numeric_reference(tail: &str, out: &mut String) -> Option<usize> {
    let bytes = tail.as_bytes();
    let mut end = 2;
    let radix = match bytes.get(end) {
        Some(b'x' | b'X') => {
            end += 1;
            16
        }
        _ => 10,
    };

    let digits_start = end;
    let mut value: u32 = 0;
    while let Some(digit) = bytes.get(end).and_then(|&b| (b as char).to_digit(radix)) {
        value = value.saturating_mul(radix).saturating_add(digit);
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if bytes.get(end) == Some(&b';') {
        end += 1;
    }

    let decoded = match value {
        0x80..=0x9F => WINDOWS_1252[(value - 0x80) as usize],
        _ => char::from_u32(value)
            .filter(|&c| c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    };
    out.push(decoded);
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
            <channel>
                <title>Lane&apos;s Blog</title>
                <link>https://www.wagslane.dev/</link>
                <description>Recent content on Lane&amp;#39;s Blog</description>
                <atom:link href="https://www.wagslane.dev/index.xml" rel="self" type="application/rss+xml"/>
                <item>
                    <title>Go &amp;amp; Rust</title>
                    <link>https://www.wagslane.dev/posts/go-rust/</link>
                    <pubDate>Mon, 09 Dec 2024 12:00:00 +0000</pubDate>
                    <guid>https://www.wagslane.dev/posts/go-rust/</guid>
                    <description><![CDATA[Why I &lt;3 both]]></description>
                </item>
                <item>
                    <title>Leave Scrum to Rugby</title>
                    <link>https://www.wagslane.dev/posts/leave-scrum/</link>
                    <pubDate>Sun, 08 Dec 2024 10:00:00 +0000</pubDate>
                    <description>Stand-ups &amp;amp; sprints</description>
                </item>
            </channel>
        </rss>
    "#;

    mod decode_html_entities_tests {
        use super::*;

        #[test]
        fn test_decode_named_entities() {
            assert_eq!(decode_html_entities("Go &amp; Rust"), "Go & Rust");
            assert_eq!(decode_html_entities("&lt;b&gt;"), "<b>");
            assert_eq!(decode_html_entities("&quot;hi&quot;"), "\"hi\"");
        }

        #[test]
        fn test_decode_numeric_references() {
            assert_eq!(decode_html_entities("Lane&#39;s"), "Lane's");
            assert_eq!(decode_html_entities("Lane&#x27;s"), "Lane's");
        }

        #[test]
        fn test_decode_html_only_entities() {
            assert_eq!(decode_html_entities("a&nbsp;b"), "a\u{a0}b");
            assert_eq!(decode_html_entities("&copy; 2024"), "\u{a9} 2024");
            assert_eq!(decode_html_entities("wait&hellip;"), "wait\u{2026}");
        }

        #[test]
        fn test_text_without_entities_is_borrowed() {
            let text = "Plain title";
            assert!(matches!(decode_html_entities(text), Cow::Borrowed(_)));
        }

        #[test]
        fn test_decoding_is_idempotent_without_entities() {
            let text = "Nothing to see here: 5 > 3, 2 < 4";
            let once = decode_html_entities(text);
            let twice = decode_html_entities(&once);
            assert_eq!(once, text);
            assert_eq!(twice, text);
        }

        #[test]
        fn test_stray_ampersand_kept() {
            assert_eq!(decode_html_entities("Tom & Jerry"), "Tom & Jerry");
            assert_eq!(decode_html_entities("trailing &"), "trailing &");
        }

        #[test]
        fn test_unknown_entity_kept() {
            assert_eq!(decode_html_entities("&bogus; ok"), "&bogus; ok");
        }

        #[test]
        fn test_ampersand_before_real_entity() {
            assert_eq!(decode_html_entities("R&D &amp; more"), "R&D & more");
            assert_eq!(decode_html_entities("&&amp;"), "&&");
        }

        #[test]
        fn test_overlong_reference_kept() {
            let text = format!("&{};", "x".repeat(60));
            assert_eq!(decode_html_entities(&text), text);
        }

        #[test]
        fn test_decodes_only_one_level() {
            assert_eq!(decode_html_entities("&amp;amp;"), "&amp;");
        }

        #[test]
        fn test_references_without_semicolon() {
            assert_eq!(decode_html_entities("Lane&#39s"), "Lane's");
            assert_eq!(decode_html_entities("&#x27"), "'");
            assert_eq!(decode_html_entities("AT&amp"), "AT&");
            assert_eq!(decode_html_entities("&copy 2024"), "\u{a9} 2024");
        }

        #[test]
        fn test_legacy_name_prefix() {
            assert_eq!(decode_html_entities("&ampx;"), "&x;");
            assert_eq!(decode_html_entities("&copy2024"), "\u{a9}2024");
            // hellip has no semicolon-less form.
            assert_eq!(decode_html_entities("wait&hellip"), "wait&hellip");
        }

        #[test]
        fn test_windows_1252_numeric_references() {
            assert_eq!(decode_html_entities("&#150;"), "\u{2013}");
            assert_eq!(decode_html_entities("&#x80;"), "\u{20ac}");
            assert_eq!(decode_html_entities("&#146;"), "\u{2019}");
            assert_eq!(decode_html_entities("&#129;"), "\u{81}");
        }

        #[test]
        fn test_invalid_code_points_replaced() {
            assert_eq!(decode_html_entities("&#0;"), "\u{fffd}");
            assert_eq!(decode_html_entities("&#xD800;"), "\u{fffd}");
            assert_eq!(decode_html_entities("&#1114112;"), "\u{fffd}");
            assert_eq!(decode_html_entities("&#99999999999999999999;"), "\u{fffd}");
        }

        #[test]
        fn test_numeric_reference_without_digits_kept() {
            assert_eq!(decode_html_entities("&#;"), "&#;");
            assert_eq!(decode_html_entities("&#xZZ"), "&#xZZ");
            assert_eq!(decode_html_entities("&#"), "&#");
        }
    }

    mod parse_feed_tests {
        use super::*;

        #[test]
        fn test_parse_channel_metadata() {
            let feed = parse_feed(SAMPLE_FEED.as_bytes()).unwrap();

            assert_eq!(feed.channel_title, "Lane's Blog");
            assert_eq!(feed.channel_link, "https://www.wagslane.dev/");
            assert_eq!(feed.channel_description, "Recent content on Lane's Blog");
        }

        #[test]
        fn test_atom_link_does_not_replace_link() {
            let feed = parse_feed(SAMPLE_FEED.as_bytes()).unwrap();
            assert_eq!(feed.channel_link, "https://www.wagslane.dev/");
        }

        #[test]
        fn test_parse_items_in_order() {
            let feed = parse_feed(SAMPLE_FEED.as_bytes()).unwrap();

            assert_eq!(feed.items.len(), 2);
            assert_eq!(feed.items[0].title, "Go & Rust");
            assert_eq!(feed.items[0].link, "https://www.wagslane.dev/posts/go-rust/");
            assert_eq!(feed.items[0].pub_date, "Mon, 09 Dec 2024 12:00:00 +0000");
            assert_eq!(feed.items[1].title, "Leave Scrum to Rugby");
        }

        #[test]
        fn test_cdata_description_decoded() {
            let feed = parse_feed(SAMPLE_FEED.as_bytes()).unwrap();
            assert_eq!(feed.items[0].description, "Why I <3 both");
            assert_eq!(feed.items[1].description, "Stand-ups & sprints");
        }

        #[test]
        fn test_entity_in_item_title() {
            let xml = r#"<rss><channel><title>t</title>
                <item><title><![CDATA[Go &amp; Rust]]></title></item>
            </channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.items[0].title, "Go & Rust");
        }

        #[test]
        fn test_link_and_pub_date_not_decoded() {
            let xml = r#"<rss><channel><title>t</title>
                <item>
                    <link><![CDATA[https://example.com/?a=1&amp;b=2]]></link>
                    <pubDate><![CDATA[Mon &amp; Tue]]></pubDate>
                </item>
            </channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.items[0].link, "https://example.com/?a=1&amp;b=2");
            assert_eq!(feed.items[0].pub_date, "Mon &amp; Tue");
        }

        #[test]
        fn test_nested_elements_do_not_override_channel_fields() {
            let xml = r#"<rss><channel>
                <title>Outer</title>
                <image><title>Logo</title><link>https://example.com/logo.png</link></image>
                <link>https://example.com</link>
            </channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.channel_title, "Outer");
            assert_eq!(feed.channel_link, "https://example.com");
        }

        #[test]
        fn test_item_fields_do_not_leak_into_channel() {
            let xml = r#"<rss><channel>
                <item><title>Item</title><description>Body</description></item>
            </channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.channel_title, "");
            assert_eq!(feed.channel_description, "");
            assert_eq!(feed.items[0].title, "Item");
        }

        #[test]
        fn test_unknown_elements_ignored() {
            let xml = r#"<rss><channel>
                <title>Feed</title>
                <generator>Hugo</generator>
                <item>
                    <title>Post</title>
                    <dc:creator>lane</dc:creator>
                    <enclosure url="https://example.com/a.mp3" length="1" type="audio/mpeg"/>
                </item>
            </channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.channel_title, "Feed");
            assert_eq!(feed.items.len(), 1);
            assert_eq!(feed.items[0].title, "Post");
        }

        #[test]
        fn test_items_after_other_elements() {
            let xml = r#"<rss><channel>
                <item><title>One</title></item>
                <language>en-us</language>
                <item><title>Two</title></item>
            </channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles, vec!["One", "Two"]);
        }

        #[test]
        fn test_empty_channel() {
            let feed = parse_feed(b"<rss><channel></channel></rss>").unwrap();
            assert_eq!(feed, RssFeed::default());
        }

        #[test]
        fn test_self_closing_channel() {
            let feed = parse_feed(b"<rss><channel/></rss>").unwrap();
            assert_eq!(feed, RssFeed::default());

            let xml = r#"<rss><channel/><channel><title>Second</title></channel></rss>"#;
            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.channel_title, "");
        }

        #[test]
        fn test_self_closing_fields_and_items() {
            let xml = r#"<rss><channel><title>t</title><description/><item/></channel></rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.channel_description, "");
            assert_eq!(feed.items, vec![RssItem::default()]);
        }

        #[test]
        fn test_only_first_channel_used() {
            let xml = r#"<rss>
                <channel><title>First</title></channel>
                <channel><title>Second</title><item><title>x</title></item></channel>
            </rss>"#;

            let feed = parse_feed(xml.as_bytes()).unwrap();
            assert_eq!(feed.channel_title, "First");
            assert!(feed.items.is_empty());
        }

        #[test]
        fn test_missing_channel() {
            let xml = r#"<rss version="2.0"><title>No channel</title></rss>"#;
            let result = parse_feed(xml.as_bytes());
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_empty_document() {
            let result = parse_feed(b"");
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_mismatched_tags() {
            let xml = r#"<rss><channel><title>Broken</link></channel></rss>"#;
            let result = parse_feed(xml.as_bytes());
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_truncated_document() {
            let xml = r#"<rss><channel><title>Cut off</title><item><title>x"#;
            let result = parse_feed(xml.as_bytes());
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_invalid_utf8() {
            let mut xml = b"<rss><channel><title>".to_vec();
            xml.extend_from_slice(&[0xFF, 0xFE]);
            xml.extend_from_slice(b"</title></channel></rss>");

            let result = parse_feed(&xml);
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_invalid_utf8_in_ignored_element() {
            let mut xml = b"<rss><channel><generator>".to_vec();
            xml.extend_from_slice(&[0xFF, 0xFE]);
            xml.extend_from_slice(b"</generator><title>ok</title></channel></rss>");

            let result = parse_feed(&xml);
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_invalid_utf8_in_ignored_cdata() {
            let mut xml = b"<rss><channel><generator><![CDATA[".to_vec();
            xml.extend_from_slice(&[0xC3, 0x28]);
            xml.extend_from_slice(b"]]></generator></channel></rss>");

            let result = parse_feed(&xml);
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_bare_ampersand_in_ignored_element() {
            let xml = r#"<rss><channel><generator>Tom & Jerry</generator><title>ok</title></channel></rss>"#;
            let result = parse_feed(xml.as_bytes());
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }

        #[test]
        fn test_html_document_rejected() {
            let html = "<html><body><h1>Not a feed</h1></body></html>";
            let result = parse_feed(html.as_bytes());
            assert!(matches!(result, Err(FetchError::Parse(_))));
        }
    }
}
