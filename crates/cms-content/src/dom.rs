//! Best-effort HTML tree parsing and serialization.
//!
//! Page bodies are parsed with a lenient XML reader into a small mutable
//! tree. Mismatched and unmatched end tags are tolerated; named HTML
//! entities are converted to Unicode up front so the reader never chokes on
//! them. Serialization walks the tree back out, re-escaping text and
//! attribute values.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::decode_named_entities;

/// Error raised when content cannot be parsed even leniently.
///
/// Callers treat this as "leave the content alone", never as a failure.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DomError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
}

/// One element in the parsed tree.
///
/// `text` is the content before the first child, `tail` the content between
/// this element's end tag and the next sibling. Attribute order is preserved
/// so re-serialization is stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) text: String,
    pub(crate) tail: String,
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Attribute value by ASCII-case-insensitive name.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Replace an attribute value in place, keeping its position and the
    /// original key spelling.
    pub(crate) fn set_attr(&mut self, name: &str, value: String) {
        if let Some((_, slot)) = self
            .attrs
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            *slot = value;
        } else {
            self.attrs.push((name.to_owned(), value));
        }
    }

    /// Whether this element has the given tag, ASCII-case-insensitively.
    pub(crate) fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// HTML void elements: never containers, even when written without the
/// self-closing slash (`<br>`, `<img ...>`).
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// Parse an HTML fragment into a wrapper node.
///
/// The returned node is an anonymous root whose children are the top-level
/// elements of the fragment.
pub(crate) fn parse(html: &str) -> Result<Node, DomError> {
    let html = decode_named_entities(html);
    let mut reader = Reader::from_str(&html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    parse_children(&mut reader, "")
}

/// Parse events until the end tag of `parent_tag` (or end of input).
///
/// Mismatched end tags are skipped, which keeps badly nested markup from
/// aborting the whole parse.
fn parse_children<R: BufRead>(reader: &mut Reader<R>, parent_tag: &str) -> Result<Node, DomError> {
    let mut buf = Vec::new();
    let mut node = Node::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child_tag = decode_bytes(e.name().as_ref());
                let child_attrs = decode_attrs(&e);
                // Void elements cannot contain anything; treating them as
                // containers would swallow every following sibling.
                if is_void_tag(&child_tag) {
                    node.children.push(Node {
                        tag: child_tag,
                        attrs: child_attrs,
                        ..Node::default()
                    });
                } else {
                    let mut child = parse_children(reader, &child_tag)?;
                    child.tag = child_tag;
                    child.attrs = child_attrs;
                    node.children.push(child);
                }
            }
            Event::Empty(e) => {
                node.children.push(Node {
                    tag: decode_bytes(e.name().as_ref()),
                    attrs: decode_attrs(&e),
                    ..Node::default()
                });
            }
            Event::Text(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut node, &text);
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut node, &decode_entity(&entity));
            }
            Event::CData(e) => {
                append_text(&mut node, &String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                if decode_bytes(e.name().as_ref()) == parent_tag {
                    return Ok(node);
                }
                // Stray end tag, skip it
            }
            Event::Eof => return Ok(node),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Serialize a wrapper node's children back to an HTML string.
pub(crate) fn serialize(root: &Node) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&escape_text(&root.text));
    for child in &root.children {
        serialize_node(child, &mut out);
    }
    out
}

fn serialize_node(node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    for (key, value) in &node.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if node.children.is_empty() && node.text.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');
        out.push_str(&escape_text(&node.text));
        for child in &node.children {
            serialize_node(child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    out.push_str(&escape_text(&node.tail));
}

fn decode_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_attrs(e: &BytesStart<'_>) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    for attr in e.attributes().with_checks(false).flatten() {
        let key = decode_bytes(attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.push((key, value));
    }
    attrs
}

/// Append text to the node's own text or to the last child's tail.
fn append_text(node: &mut Node, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode an entity reference to its character value.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

fn escape_text(text: &str) -> String {
    escape(text, false)
}

fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_simple() {
        let root = parse("<p>Hello</p>").unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "p");
        assert_eq!(root.children[0].text, "Hello");
    }

    #[test]
    fn test_parse_nested_with_tail() {
        let root = parse("<p><strong>Bold</strong> text</p>").unwrap();
        let p = &root.children[0];
        assert_eq!(p.children[0].tag, "strong");
        assert_eq!(p.children[0].text, "Bold");
        assert_eq!(p.children[0].tail, " text");
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let root = parse(r#"<a class="ext" href="/about" id="x">go</a>"#).unwrap();
        let a = &root.children[0];
        let keys: Vec<&str> = a.attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["class", "href", "id"]);
        assert_eq!(a.attr("HREF"), Some("/about"));
    }

    #[test]
    fn test_parse_self_closing() {
        let root = parse("<p>Before<br />After</p>").unwrap();
        let p = &root.children[0];
        assert_eq!(p.children[0].tag, "br");
        assert_eq!(p.children[0].tail, "After");
    }

    #[test]
    fn test_unslashed_void_element_stays_a_leaf() {
        let root = parse(r#"<p>a<br>b</p><img src="/x.png"><p>c</p>"#).unwrap();
        assert_eq!(root.children.len(), 3);

        let p = &root.children[0];
        assert_eq!(p.text, "a");
        assert_eq!(p.children[0].tag, "br");
        assert!(p.children[0].children.is_empty());
        assert_eq!(p.children[0].tail, "b");

        assert_eq!(root.children[1].tag, "img");
        assert_eq!(root.children[2].text, "c");
    }

    #[test]
    fn test_unslashed_void_element_round_trip() {
        let root = parse(r#"<p>a<br>b</p><img src="/x.png"><p>c</p>"#).unwrap();
        assert_eq!(
            serialize(&root),
            r#"<p>a<br />b</p><img src="/x.png" /><p>c</p>"#
        );
    }

    #[test]
    fn test_parse_mismatched_end_tag_tolerated() {
        let root = parse("<p><b>x</i></b></p>").unwrap();
        assert_eq!(root.children[0].children[0].tag, "b");
    }

    #[test]
    fn test_parse_stray_end_tag_tolerated() {
        let root = parse("</div><p>ok</p>").unwrap();
        assert_eq!(root.children[0].tag, "p");
    }

    #[test]
    fn test_parse_named_entities() {
        let root = parse("<p>a&nbsp;b&mdash;c</p>").unwrap();
        assert_eq!(root.children[0].text, "a\u{00a0}b\u{2014}c");
    }

    #[test]
    fn test_parse_top_level_text() {
        let root = parse("just text").unwrap();
        assert_eq!(root.text, "just text");
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_serialize_round_trip() {
        let html = r#"<p>Before<a href="/x">link</a> after</p>"#;
        let root = parse(html).unwrap();
        assert_eq!(serialize(&root), html);
    }

    #[test]
    fn test_serialize_escapes_text() {
        let root = parse("<p>a &amp; b</p>").unwrap();
        assert_eq!(root.children[0].text, "a & b");
        assert_eq!(serialize(&root), "<p>a &amp; b</p>");
    }

    #[test]
    fn test_serialize_self_closing() {
        let root = parse(r#"<img src="/pic.png" />"#).unwrap();
        assert_eq!(serialize(&root), r#"<img src="/pic.png" />"#);
    }

    #[test]
    fn test_set_attr_replaces_case_insensitively() {
        let mut node = Node {
            tag: "a".to_owned(),
            attrs: vec![("HREF".to_owned(), "/old".to_owned())],
            ..Node::default()
        };
        node.set_attr("href", "/new".to_owned());
        assert_eq!(node.attrs, vec![("HREF".to_owned(), "/new".to_owned())]);
    }

    #[test]
    fn test_numeric_entity() {
        let root = parse("<p>&#169;&#x2014;</p>").unwrap();
        assert_eq!(root.children[0].text, "\u{00a9}\u{2014}");
    }
}
