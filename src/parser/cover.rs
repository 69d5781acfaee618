use std::sync::LazyLock;

use regex::Regex;

use super::lines::{classify, Line};
use crate::inline::strip_markdown;
use crate::model::CoverData;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());
static TAG_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{0,2}([^*()·\s][^*()·]*?)\*{0,2}\(([0-9]+)\)").unwrap());

const TOP_LIMIT: usize = 3;
const KEYWORD_LIMIT: usize = 5;
const TAG_SEPARATOR: &str = " · ";

/// Pull the cover card fields straight from the raw text.
///
/// Runs independently of `parse_digest` and does not honor fences.
pub fn parse_cover_data(markdown: &str) -> CoverData {
    let date = DATE_RE
        .find(markdown)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let top3 = markdown
        .lines()
        .filter_map(|l| match classify(l.trim()) {
            Line::Medal { title, .. } => Some(strip_markdown(title)),
            _ => None,
        })
        .take(TOP_LIMIT)
        .collect();

    let top_keywords = markdown
        .lines()
        .map(str::trim)
        .find(|l| l.contains('(') && l.contains(TAG_SEPARATOR))
        .map(tag_words)
        .unwrap_or_default();

    CoverData {
        date,
        top3,
        top_keywords,
    }
}

fn tag_words(line: &str) -> Vec<String> {
    TAG_TOKEN_RE
        .captures_iter(line)
        .map(|c| c[1].trim().to_string())
        .take(KEYWORD_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_date_wins() {
        let c = parse_cover_data("# 日报 — 2026-02-10\n*生成于 2026-02-11*\n");
        assert_eq!(c.date, "2026-02-10");
    }

    #[test]
    fn top3_capped_and_ordered() {
        let md = "🥈 **B**\n🥇 **A**\n🥉 **C**\n🥇 **D**\n";
        assert_eq!(parse_cover_data(md).top3, ["B", "A", "C"]);
    }

    #[test]
    fn keywords_tolerate_bold_and_cap_at_five() {
        let md = "**AI**(6) · LLM(4) · 安全(3) · Rust(2) · 工具(2) · 开源(1)\n";
        assert_eq!(
            parse_cover_data(md).top_keywords,
            ["AI", "LLM", "安全", "Rust", "工具"]
        );
    }

    #[test]
    fn only_first_separator_line_is_read() {
        let md = "[a](https://u) — b · c\n**AI**(3) · x(2)\n";
        assert!(parse_cover_data(md).top_keywords.is_empty());

        let md = "**Agent**(3) · 推理(2)\n**AI**(3) · x(2)\n";
        assert_eq!(parse_cover_data(md).top_keywords, ["Agent", "推理"]);
    }

    #[test]
    fn date_digits_are_ascii() {
        let c = parse_cover_data("版本 ٢٠٢٦-٠٢-١٠\n# 日报 2026-02-10\n");
        assert_eq!(c.date, "2026-02-10");
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_cover_data(""), CoverData::default());
    }

    #[test]
    fn fixture_cover() {
        let md = std::fs::read_to_string("tests/fixtures/digest.md").unwrap();
        let c = parse_cover_data(&md);
        assert_eq!(c.date, "2026-02-10");
        assert_eq!(c.top3.len(), 3);
        // The first top article's meta line carries `(` and ` · ` and comes
        // before the tag cloud, so no keywords are taken.
        assert!(c.top_keywords.is_empty());
    }
}
