//! Inline markdown normalization.
//!
//! Rules run in a fixed order: links, bold, italic, inline code. There is no
//! nesting support; each rule is a single non-overlapping substitution pass.

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

const CODE_STYLE: &str = "background:#f4f4f5;color:#c7254e;padding:1px 4px;border-radius:3px;font-family:Menlo,Consolas,monospace;font-size:0.92em";

/// Plain text: `[text](url)` becomes `text`, emphasis and code markers are dropped.
pub fn strip_markdown(text: &str) -> String {
    let s = LINK_RE.replace_all(text, "$1");
    let s = BOLD_RE.replace_all(&s, "$1");
    let s = ITALIC_RE.replace_all(&s, "$1");
    CODE_RE.replace_all(&s, "$1").into_owned()
}

/// Minimal HTML: links reduced to their text, emphasis and code wrapped in tags.
///
/// The input is not escaped; callers pass trusted or pre-escaped text.
pub fn markdown_to_html(text: &str) -> String {
    let s = LINK_RE.replace_all(text, "$1");
    let s = BOLD_RE.replace_all(&s, "<strong>$1</strong>");
    let s = ITALIC_RE.replace_all(&s, "<em>$1</em>");
    CODE_RE
        .replace_all(&s, format!(r#"<code style="{CODE_STYLE}">$1</code>"#).as_str())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_links() {
        assert_eq!(
            strip_markdown("[Rust 1.80](https://blog.rust-lang.org) — Rust Blog"),
            "Rust 1.80 — Rust Blog"
        );
    }

    #[test]
    fn strips_emphasis_and_code() {
        assert_eq!(strip_markdown("**粗体** 与 *斜体* 和 `code`"), "粗体 与 斜体 和 code");
    }

    #[test]
    fn strip_leaves_unpaired_marker() {
        assert_eq!(strip_markdown("5 * 3"), "5 * 3");
    }

    #[test]
    fn html_wraps_emphasis() {
        assert_eq!(
            markdown_to_html("**a** and *b*"),
            "<strong>a</strong> and <em>b</em>"
        );
    }

    #[test]
    fn html_wraps_code_with_style() {
        let out = markdown_to_html("run `cargo` now");
        assert!(out.starts_with("run <code style=\""));
        assert!(out.ends_with(">cargo</code> now"));
    }

    #[test]
    fn html_drops_link_target() {
        assert_eq!(markdown_to_html("[x](http://y)"), "x");
    }
}
