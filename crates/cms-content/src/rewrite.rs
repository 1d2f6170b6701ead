//! Anchor canonicalization and first-image extraction.

use tracing::debug;

use crate::dom::{self, Node};

/// Maps a cleaned alias/path fragment to its canonical URL.
///
/// Implementations must be stable under re-cleaning: stripping the format
/// suffix and surrounding slashes from a returned URL and resolving again
/// must produce the same URL. That property makes
/// [`ContentRewriter::rewrite_links`] idempotent.
pub trait LinkResolver: Send + Sync {
    /// Canonical URL for a cleaned alias or path fragment.
    fn canonical(&self, cleaned: &str) -> String;
}

/// HTML content post-processor.
///
/// `suffix` is the URL format suffix convention (for example `.html`) that
/// is stripped from stored hrefs before resolution.
#[derive(Debug, Clone)]
pub struct ContentRewriter {
    suffix: String,
}

impl ContentRewriter {
    /// Create a rewriter for the given URL suffix convention.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Canonicalize every anchor `href` in `content`.
    ///
    /// Each href has the format suffix removed and surrounding slashes
    /// trimmed, then is replaced with the resolver's canonical URL for the
    /// cleaned value. Anchors without an `href` are left alone. Content that
    /// cannot be parsed is returned unchanged; the operation never fails
    /// and is idempotent.
    #[must_use]
    pub fn rewrite_links(&self, content: &str, resolver: &dyn LinkResolver) -> String {
        if content.is_empty() {
            return String::new();
        }

        let mut root = match dom::parse(content) {
            Ok(root) => root,
            Err(err) => {
                debug!(error = %err, "content not parseable, leaving links unchanged");
                return content.to_owned();
            }
        };

        self.rewrite_node(&mut root, resolver);
        dom::serialize(&root)
    }

    fn rewrite_node(&self, node: &mut Node, resolver: &dyn LinkResolver) {
        let cleaned = if node.is_tag("a") {
            node.attr("href").map(|href| self.clean(href))
        } else {
            None
        };
        if let Some(cleaned) = cleaned {
            node.set_attr("href", resolver.canonical(&cleaned));
        }
        for child in &mut node.children {
            self.rewrite_node(child, resolver);
        }
    }

    /// First `img` URL in document order, made absolute against
    /// `current_host` when the `src` carries no URI scheme.
    ///
    /// Returns an empty string when there is no image or the content cannot
    /// be parsed.
    #[must_use]
    pub fn extract_first_image(&self, content: &str, current_host: &str) -> String {
        if content.is_empty() {
            return String::new();
        }

        let root = match dom::parse(content) {
            Ok(root) => root,
            Err(err) => {
                debug!(error = %err, "content not parseable, no preview image");
                return String::new();
            }
        };

        let Some(src) = first_image_src(&root) else {
            return String::new();
        };

        if has_scheme(src) {
            src.to_owned()
        } else {
            format!("{current_host}{src}")
        }
    }

    /// Strip the format suffix and surrounding slashes from an href.
    fn clean(&self, href: &str) -> String {
        let stripped = if self.suffix.is_empty() {
            href.to_owned()
        } else {
            href.replace(&self.suffix, "")
        };
        stripped.trim_matches('/').to_owned()
    }
}

/// Depth-first search for the first `img` element's `src`.
fn first_image_src(node: &Node) -> Option<&str> {
    if node.is_tag("img") {
        return node.attr("src");
    }
    node.children.iter().find_map(first_image_src)
}

/// Whether a URL starts with a URI scheme (`scheme:`).
fn has_scheme(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return false;
    };
    let scheme = &url[..colon];
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Resolver that routes cleaned aliases to `/{alias}.html`.
    struct SuffixResolver;

    impl LinkResolver for SuffixResolver {
        fn canonical(&self, cleaned: &str) -> String {
            if cleaned.is_empty() || cleaned == "index" {
                "/".to_owned()
            } else {
                format!("/{cleaned}.html")
            }
        }
    }

    fn rewriter() -> ContentRewriter {
        ContentRewriter::new(".html")
    }

    #[test]
    fn test_rewrite_bare_alias() {
        let out = rewriter().rewrite_links(r#"<p><a href="about">About</a></p>"#, &SuffixResolver);
        assert_eq!(out, r#"<p><a href="/about.html">About</a></p>"#);
    }

    #[test]
    fn test_rewrite_strips_suffix_and_slashes() {
        let out =
            rewriter().rewrite_links(r#"<a href="/about.html/">About</a>"#, &SuffixResolver);
        assert_eq!(out, r#"<a href="/about.html">About</a>"#);
    }

    #[test]
    fn test_rewrite_index_to_root() {
        let out = rewriter().rewrite_links(r#"<a href="/index.html">Home</a>"#, &SuffixResolver);
        assert_eq!(out, r#"<a href="/">Home</a>"#);
    }

    #[test]
    fn test_rewrite_keeps_other_attributes() {
        let out = rewriter().rewrite_links(
            r#"<a class="nav" href="team" id="t">Team</a>"#,
            &SuffixResolver,
        );
        assert_eq!(out, r#"<a class="nav" href="/team.html" id="t">Team</a>"#);
    }

    #[test]
    fn test_rewrite_skips_anchor_without_href() {
        let out = rewriter().rewrite_links(r#"<a name="top">Top</a>"#, &SuffixResolver);
        assert_eq!(out, r#"<a name="top">Top</a>"#);
    }

    #[test]
    fn test_rewrite_empty_content() {
        assert_eq!(rewriter().rewrite_links("", &SuffixResolver), "");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let inputs = [
            r#"<p><a href="about">About</a> and <a href="/team.html/">Team</a></p>"#,
            r#"<div><a href="index">Home</a><img src="/x.png"></div>"#,
            "<p>no links at all</p>",
            "<p>broken <b>markup</p>",
            r#"<p>a<br>b</p><img src="/x.png"><p>c</p>"#,
        ];
        let rw = rewriter();
        for input in inputs {
            let once = rw.rewrite_links(input, &SuffixResolver);
            let twice = rw.rewrite_links(&once, &SuffixResolver);
            assert_eq!(twice, once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_rewrite_keeps_structure_around_void_elements() {
        let out = rewriter().rewrite_links(
            r#"<p>line one<br>line two</p><img src="/a.png"><p><a href="about">About</a></p>"#,
            &SuffixResolver,
        );
        assert_eq!(
            out,
            r#"<p>line one<br />line two</p><img src="/a.png" /><p><a href="/about.html">About</a></p>"#
        );
    }

    #[test]
    fn test_rewrite_nested_anchor() {
        let out = rewriter().rewrite_links(
            r#"<ul><li><a href="services/web.html">Web</a></li></ul>"#,
            &SuffixResolver,
        );
        assert_eq!(out, r#"<ul><li><a href="/services/web.html">Web</a></li></ul>"#);
    }

    #[test]
    fn test_first_image_absent() {
        assert_eq!(
            rewriter().extract_first_image("<p>text only</p>", "https://example.com"),
            ""
        );
    }

    #[test]
    fn test_first_image_relative_gets_host() {
        assert_eq!(
            rewriter().extract_first_image(r#"<p><img src="/pic.png"></p>"#, "https://example.com"),
            "https://example.com/pic.png"
        );
    }

    #[test]
    fn test_first_image_absolute_unchanged() {
        assert_eq!(
            rewriter().extract_first_image(
                r#"<img src="https://cdn.x/pic.png">"#,
                "https://example.com"
            ),
            "https://cdn.x/pic.png"
        );
    }

    #[test]
    fn test_first_image_takes_first_in_document_order() {
        let html = r#"<div><p><img src="/one.png"></p><img src="/two.png"></div>"#;
        assert_eq!(
            rewriter().extract_first_image(html, "https://h"),
            "https://h/one.png"
        );
    }

    #[test]
    fn test_first_image_empty_content() {
        assert_eq!(rewriter().extract_first_image("", "https://h"), "");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://x/p.png"));
        assert!(has_scheme("data:image/png;base64,xx"));
        assert!(!has_scheme("/pic.png"));
        assert!(!has_scheme("pic.png"));
    }
}
