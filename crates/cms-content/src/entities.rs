//! Named HTML entity to Unicode conversion.
//!
//! The XML reader only knows the five predefined entities, so named HTML
//! entities are replaced with their Unicode characters before parsing.
//! The predefined XML entities (amp, lt, gt, quot, apos) pass through.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// Replace named HTML entities with Unicode characters.
///
/// Unknown entities and the predefined XML set are left untouched.
pub(crate) fn decode_named_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            entity_to_unicode(&caps[1]).map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "deg" => "\u{00b0}",
        "sect" => "\u{00a7}",
        "middot" => "\u{00b7}",
        "times" => "\u{00d7}",
        "plusmn" => "\u{00b1}",
        _ => return None,
    })
}
