//! Full article renderer.
//!
//! Every style is an inline attribute: the publishing editor this output is
//! pasted into drops `<style>` blocks.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::palette::{category_color, has_badge_emoji, medal_color};
use super::RenderOptions;
use crate::html::escape;
use crate::model::{CategoryArticle, CategorySection, Digest, StatsRow, TopArticle};

static BOLD_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*\(([0-9]+)\)$").unwrap());
static PLAIN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^*()]+)\(([0-9]+)\)$").unwrap());

const FONT_STACK: &str = "-apple-system,BlinkMacSystemFont,'PingFang SC','Hiragino Sans GB','Microsoft YaHei',sans-serif";
const SEGMENT_SEPARATOR: &str = " · ";
const KEYWORD_SEPARATORS: [char; 2] = [',', '，'];

const SECTION_TITLE_STYLE: &str = "margin:28px 0 12px;font-size:18px;font-weight:700;color:#2d3436";
const CARD_STYLE: &str = "margin:0 0 16px;padding:14px 16px;background:#ffffff;border-radius:8px;box-shadow:0 1px 4px rgba(0,0,0,0.08)";
const CARD_TITLE_STYLE: &str = "margin:0 0 6px;font-size:16px;font-weight:700;line-height:1.5;color:#2d3436";
const META_STYLE: &str = "margin:0 0 8px;font-size:12px;line-height:1.6;color:#8395a7";
const SUMMARY_STYLE: &str = "margin:0 0 8px;font-size:14px;line-height:1.75;color:#485460";
const REASON_STYLE: &str = "margin:0 0 8px;padding:8px 10px;font-size:13px;line-height:1.6;color:#7f5a00;background:#fff8e1;border-radius:6px";
const CHIP_STYLE: &str = "display:inline-block;margin:0 6px 6px 0;padding:2px 8px;font-size:12px;color:#576574;background:#f1f2f6;border-radius:10px";

/// Render a parsed digest as a standalone inline-styled HTML document.
pub fn render_article(digest: &Digest, opts: &RenderOptions) -> String {
    let mut body = String::new();

    render_heading(&mut body, digest);
    if !digest.highlights.is_empty() {
        render_highlights(&mut body, &digest.highlights);
    }
    if !digest.top_articles.is_empty() {
        body.push_str(&format!(r#"<h2 style="{SECTION_TITLE_STYLE}">🏆 今日必读</h2>"#));
        for article in &digest.top_articles {
            render_top_article(&mut body, article);
        }
    }
    if let Some(stats) = &digest.stats {
        render_stats(&mut body, stats);
    }
    if opts.show_tag_cloud && !digest.tag_cloud.is_empty() {
        render_tag_cloud(&mut body, &digest.tag_cloud);
    }
    for category in &digest.categories {
        render_category(&mut body, category);
    }
    render_call_to_action(&mut body, &opts.call_to_action);
    render_footer(&mut body, &digest.footer, opts.footer_filter.as_deref());

    debug!(bytes = body.len(), "rendered article body");

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body style="margin:0;padding:0;background:#f5f6fa">
<section style="max-width:680px;margin:0 auto;padding:16px;font-family:{FONT_STACK};color:#2d3436">
{body}
</section>
</body>
</html>
"#,
        title = escape(&digest.title),
    )
}

fn render_heading(out: &mut String, digest: &Digest) {
    if !digest.title.is_empty() {
        out.push_str(&format!(
            r#"<h1 style="margin:8px 0 6px;font-size:22px;font-weight:800;line-height:1.4;color:#2d3436">{}</h1>"#,
            escape(&digest.title)
        ));
    }
    if !digest.subtitle.is_empty() {
        out.push_str(&format!(
            r#"<p style="margin:0 0 16px;font-size:13px;color:#8395a7">{}</p>"#,
            escape(&digest.subtitle)
        ));
    }
}

fn render_highlights(out: &mut String, highlights: &str) {
    out.push_str(&format!(
        r#"<section style="margin:12px 0 20px;padding:14px 16px;background:#eef5ff;border-left:4px solid #0984e3;border-radius:6px"><p style="margin:0 0 6px;font-size:15px;font-weight:700;color:#0984e3">📝 今日看点</p><p style="margin:0;font-size:14px;line-height:1.75;color:#2d3436">{}</p></section>"#,
        escape(highlights)
    ));
}

fn render_top_article(out: &mut String, article: &TopArticle) {
    out.push_str(&format!(
        r#"<section style="{CARD_STYLE};border-left:4px solid {color}">"#,
        color = medal_color(article.medal)
    ));
    out.push_str(&format!(
        r#"<p style="{CARD_TITLE_STYLE}">{} {}</p>"#,
        article.medal.emoji(),
        escape(&article.title_zh)
    ));
    render_meta(out, &article.meta);
    render_summary(out, &article.summary);
    if !article.reason.is_empty() {
        out.push_str(&format!(
            r#"<p style="{REASON_STYLE}">💡 {}</p>"#,
            escape(&article.reason)
        ));
    }
    render_keywords(out, &article.keywords);
    out.push_str("</section>");
}

fn render_meta(out: &mut String, meta: &str) {
    if meta.is_empty() {
        return;
    }
    let segments: Vec<String> = meta
        .split(SEGMENT_SEPARATOR)
        .map(|segment| {
            if has_badge_emoji(segment) {
                format!(
                    r#"<span style="display:inline-block;padding:0 6px;border-radius:4px;color:#ffffff;background:{}">{}</span>"#,
                    category_color(segment),
                    escape(segment.trim())
                )
            } else {
                escape(segment).into_owned()
            }
        })
        .collect();
    out.push_str(&format!(
        r#"<p style="{META_STYLE}">{}</p>"#,
        segments.join(SEGMENT_SEPARATOR)
    ));
}

fn render_summary(out: &mut String, summary: &str) {
    if !summary.is_empty() {
        out.push_str(&format!(r#"<p style="{SUMMARY_STYLE}">{}</p>"#, escape(summary)));
    }
}

fn render_keywords(out: &mut String, keywords: &str) {
    let chips: String = split_keywords(keywords)
        .into_iter()
        .map(|k| format!(r#"<span style="{CHIP_STYLE}">#{}</span>"#, escape(k)))
        .collect();
    if !chips.is_empty() {
        out.push_str(&format!(r#"<p style="margin:4px 0 0">{chips}</p>"#));
    }
}

/// Split on ASCII and fullwidth commas, trimming and dropping empties.
pub fn split_keywords(keywords: &str) -> Vec<&str> {
    keywords
        .split(KEYWORD_SEPARATORS)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

fn render_stats(out: &mut String, stats: &StatsRow) {
    let cells = [
        ("扫描源", &stats.sources),
        ("抓取文章", &stats.articles),
        ("时间范围", &stats.time_range),
        ("精选", &stats.selected),
    ];
    out.push_str(&format!(r#"<h2 style="{SECTION_TITLE_STYLE}">📊 数据概览</h2>"#));
    out.push_str(r#"<table style="width:100%;border-collapse:collapse;margin:0 0 16px;background:#ffffff;border-radius:8px"><tr>"#);
    for (label, value) in cells {
        out.push_str(&format!(
            r#"<td style="width:25%;padding:12px 4px;text-align:center"><p style="margin:0;font-size:16px;font-weight:700;color:#0984e3">{}</p><p style="margin:4px 0 0;font-size:12px;color:#8395a7">{label}</p></td>"#,
            escape(value)
        ));
    }
    out.push_str("</tr></table>");
}

fn render_tag_cloud(out: &mut String, tag_cloud: &str) {
    let tags: String = tag_cloud
        .split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .filter_map(render_tag)
        .collect();
    if tags.is_empty() {
        return;
    }
    out.push_str(&format!(
        r#"<p style="margin:0 0 6px;font-size:15px;font-weight:700;color:#2d3436">🏷️ 话题标签</p><p style="margin:0 0 16px;line-height:2">{tags}</p>"#
    ));
}

/// `**word**(n)` renders emphasized, `word(n)` plain, anything else is dropped.
fn render_tag(token: &str) -> Option<String> {
    if let Some(caps) = BOLD_TAG_RE.captures(token) {
        return Some(format!(
            r#"<span style="display:inline-block;margin:0 6px 6px 0;padding:2px 10px;font-size:14px;font-weight:700;color:#ffffff;background:#6c5ce7;border-radius:12px">{} <small>{}</small></span>"#,
            escape(&caps[1]),
            &caps[2]
        ));
    }
    let caps = PLAIN_TAG_RE.captures(token)?;
    Some(format!(
        r#"<span style="display:inline-block;margin:0 6px 6px 0;padding:2px 10px;font-size:13px;color:#576574;background:#f1f2f6;border-radius:12px">{} <small>{}</small></span>"#,
        escape(caps[1].trim()),
        &caps[2]
    ))
}

fn render_category(out: &mut String, category: &CategorySection) {
    let color = category_color(&category.label);
    out.push_str(&format!(
        r#"<h2 style="margin:28px 0 12px;padding:6px 12px;font-size:17px;font-weight:700;color:#ffffff;background:{color};border-radius:6px">{} {}</h2>"#,
        escape(&category.emoji),
        escape(&category.label)
    ));
    for article in &category.articles {
        render_category_article(out, article);
    }
}

fn render_category_article(out: &mut String, article: &CategoryArticle) {
    out.push_str(&format!(r#"<section style="{CARD_STYLE}">"#));
    out.push_str(&format!(
        r#"<p style="{CARD_TITLE_STYLE}">{}. {}</p>"#,
        escape(&article.index),
        escape(&article.title_zh)
    ));
    render_meta(out, &article.meta);
    render_summary(out, &article.summary);
    render_keywords(out, &article.keywords);
    out.push_str("</section>");
}

fn render_call_to_action(out: &mut String, text: &str) {
    out.push_str(&format!(
        r#"<section style="margin:28px 0 16px;padding:16px;text-align:center;background:linear-gradient(135deg,#6c5ce7,#0984e3);border-radius:8px"><p style="margin:0;font-size:15px;font-weight:700;color:#ffffff">{}</p></section>"#,
        escape(text)
    ));
}

fn render_footer(out: &mut String, footer: &str, filter: Option<&str>) {
    for line in footer.lines() {
        if filter.is_some_and(|f| line.contains(f)) {
            continue;
        }
        out.push_str(&format!(
            r#"<p style="margin:4px 0;font-size:12px;line-height:1.6;color:#a4b0be;text-align:center">{}</p>"#,
            escape(line)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Medal;
    use crate::parser::parse_digest;

    fn sample() -> Digest {
        let md = std::fs::read_to_string("tests/fixtures/digest.md").unwrap();
        parse_digest(&md)
    }

    #[test]
    fn rendering_is_deterministic() {
        let digest = sample();
        let opts = RenderOptions::default();
        assert_eq!(render_article(&digest, &opts), render_article(&digest, &opts));
    }

    #[test]
    fn no_style_block() {
        let html = render_article(&sample(), &RenderOptions::default());
        assert!(!html.contains("<style"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn title_is_escaped() {
        let digest = Digest {
            title: "<script>alert(1)</script>".into(),
            ..Default::default()
        };
        let html = render_article(&digest, &RenderOptions::default());
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn keywords_split_on_both_commas() {
        assert_eq!(split_keywords("AI, 安全，工具"), ["AI", "安全", "工具"]);
        assert!(split_keywords(" , ").is_empty());
    }

    #[test]
    fn medal_border_color() {
        let digest = Digest {
            top_articles: vec![TopArticle::new(Medal::Silver, "银牌".into())],
            ..Default::default()
        };
        let html = render_article(&digest, &RenderOptions::default());
        assert!(html.contains("border-left:4px solid #a4b0be"));
    }

    #[test]
    fn meta_badge_uses_category_color() {
        let mut out = String::new();
        render_meta(&mut out, "Post — Blog · 🔒 安全");
        assert!(out.contains("background:#d63031\">🔒 安全</span>"));
        assert!(out.contains("Post — Blog · "));
    }

    #[test]
    fn tag_tokens_by_shape() {
        assert!(render_tag("**AI**(6)").unwrap().contains("font-weight:700"));
        assert!(render_tag("LLM(3)").unwrap().contains("LLM <small>3</small>"));
        assert!(render_tag("无计数").is_none());
        assert!(render_tag("AI(٦)").is_none());
    }

    #[test]
    fn tag_cloud_can_be_hidden() {
        let digest = sample();
        let opts = RenderOptions {
            show_tag_cloud: false,
            ..Default::default()
        };
        assert!(!render_article(&digest, &opts).contains("话题标签"));
        assert!(render_article(&digest, &RenderOptions::default()).contains("话题标签"));
    }

    #[test]
    fn footer_filter_drops_lines() {
        let mut out = String::new();
        render_footer(&mut out, "保留这行\n欢迎关注微信公众号", Some("微信公众号"));
        assert!(out.contains("保留这行"));
        assert!(!out.contains("公众号"));

        let mut all = String::new();
        render_footer(&mut all, "保留这行\n欢迎关注微信公众号", None);
        assert_eq!(all.matches("<p ").count(), 2);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let html = render_article(&Digest::default(), &RenderOptions::default());
        assert!(!html.contains("今日必读"));
        assert!(!html.contains("数据概览"));
        assert!(html.contains("点个「在看」"));
    }

    #[test]
    fn fixture_renders_every_category() {
        let digest = sample();
        let html = render_article(&digest, &RenderOptions::default());
        for category in &digest.categories {
            assert!(html.contains(&*escape(&category.label)));
        }
        assert!(html.contains("89/92"));
    }
}
