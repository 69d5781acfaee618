use crate::model::Medal;

pub const OTHER_COLOR: &str = "#636e72";

/// Meta segments containing one of these get a category badge.
pub const BADGE_EMOJI: &[&str] = &["🤖", "🔒", "⚙️", "⚙", "🛠", "💡", "📝"];

/// Checked in order; the first label contained in the text wins.
const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("AI", "#6c5ce7"),
    ("安全", "#d63031"),
    ("工程", "#0984e3"),
    ("工具", "#00b894"),
    ("开源", "#00b894"),
    ("观点", "#e17055"),
    ("杂谈", "#e17055"),
];

pub fn medal_color(medal: Medal) -> &'static str {
    match medal {
        Medal::Gold => "#f5a623",
        Medal::Silver => "#a4b0be",
        Medal::Bronze => "#cd7f32",
    }
}

pub fn category_color(text: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(label, _)| text.contains(label))
        .map(|(_, color)| *color)
        .unwrap_or(OTHER_COLOR)
}

pub fn has_badge_emoji(segment: &str) -> bool {
    BADGE_EMOJI.iter().any(|e| segment.contains(e))
}
