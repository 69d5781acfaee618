use chrono::{Datelike, NaiveDate};

use super::RenderOptions;
use crate::html::escape;
use crate::model::CoverData;

pub const COVER_WIDTH: u32 = 900;
pub const COVER_HEIGHT: u32 = 383;
const TITLE_MAX_CHARS: usize = 30;

/// Per-rank (font size px, opacity) for the top-3 lines.
const RANK_STYLES: [(u32, f32); 3] = [(26, 1.0), (22, 0.85), (20, 0.7)];
const RANK_MARKERS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Render the fixed-size promotional card.
pub fn render_cover(data: &CoverData, opts: &RenderOptions) -> String {
    let titles: String = data
        .top3
        .iter()
        .zip(RANK_STYLES.iter().zip(RANK_MARKERS))
        .map(|(title, ((size, opacity), marker))| {
            format!(
                r#"<div style="margin:0 0 10px;font-size:{size}px;font-weight:700;line-height:1.3;opacity:{opacity};white-space:nowrap;overflow:hidden">{marker} {}</div>"#,
                escape(&truncate(title, TITLE_MAX_CHARS))
            )
        })
        .collect();

    let chips: String = data
        .top_keywords
        .iter()
        .map(|k| {
            format!(
                r#"<span style="display:inline-block;margin-right:10px;padding:4px 14px;font-size:16px;color:#ffffff;background:rgba(255,255,255,0.18);border:1px solid rgba(255,255,255,0.35);border-radius:16px">#{}</span>"#,
                escape(k)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<title>{brand}</title>
</head>
<body style="margin:0;padding:0">
<div style="position:relative;width:{COVER_WIDTH}px;height:{COVER_HEIGHT}px;overflow:hidden;box-sizing:border-box;padding:32px 44px;font-family:-apple-system,BlinkMacSystemFont,'PingFang SC','Microsoft YaHei',sans-serif;color:#ffffff;background:linear-gradient(135deg,#1e1b4b 0%,#4338ca 55%,#0ea5e9 100%)">
<div style="position:absolute;top:-90px;right:-60px;width:280px;height:280px;border-radius:50%;background:rgba(255,255,255,0.08)"></div>
<div style="position:absolute;bottom:-120px;left:520px;width:240px;height:240px;border-radius:50%;background:rgba(255,255,255,0.06)"></div>
<div style="position:relative;display:flex;justify-content:space-between;align-items:center;margin-bottom:14px">
<span style="font-size:18px;font-weight:600;letter-spacing:1px;opacity:0.9">📰 {brand}</span>
<span style="font-size:16px;opacity:0.85">{date}</span>
</div>
<div style="position:relative;margin-bottom:18px;font-size:34px;font-weight:800;letter-spacing:2px">今日必读 Top 3</div>
<div style="position:relative">{titles}</div>
<div style="position:relative;margin-top:14px">{chips}</div>
<span style="position:absolute;left:44px;bottom:18px;font-size:13px;opacity:0.7">每日精选 · Daily Digest</span>
<span style="position:absolute;right:44px;bottom:18px;font-size:13px;opacity:0.7">AI 摘要 · 人工复核</span>
</div>
</body>
</html>
"#,
        brand = escape(&opts.brand),
        date = escape(&format_date(&data.date)),
    )
}

/// `2026-02-10` → `2026年2月10日`; anything unparsable is returned unchanged.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!("{}年{}月{}日", d.year(), d.month(), d.day()),
        Err(_) => date.to_string(),
    }
}

/// Cut to `max` chars (not graphemes) and mark the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
