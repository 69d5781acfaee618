use serde::Serialize;

/// Parsed daily digest, ready for the article renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Digest {
    pub title: String,
    pub subtitle: String,
    pub highlights: String,
    pub top_articles: Vec<TopArticle>,
    pub stats: Option<StatsRow>,
    pub categories: Vec<CategorySection>,
    pub footer: String,
    pub tag_cloud: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn emoji(self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
        }
    }

    pub fn from_emoji(s: &str) -> Option<Medal> {
        Medal::ALL.into_iter().find(|m| m.emoji() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopArticle {
    pub medal: Medal,
    pub title_zh: String,
    pub meta: String,
    pub summary: String,
    pub reason: String,
    /// Comma separated, split only at render time.
    pub keywords: String,
}

impl TopArticle {
    pub fn new(medal: Medal, title_zh: String) -> Self {
        TopArticle {
            medal,
            title_zh,
            meta: String::new(),
            summary: String::new(),
            reason: String::new(),
            keywords: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsRow {
    pub sources: String,
    pub articles: String,
    pub time_range: String,
    pub selected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySection {
    pub emoji: String,
    pub label: String,
    pub articles: Vec<CategoryArticle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryArticle {
    pub index: String,
    pub title_zh: String,
    pub meta: String,
    pub summary: String,
    pub keywords: String,
}

/// Reduced view of a digest used by the cover card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverData {
    pub date: String,
    pub top3: Vec<String>,
    pub top_keywords: Vec<String>,
}

/// Append `text` to `buf`, separated by `sep` when `buf` already holds something.
pub(crate) fn push_joined(buf: &mut String, sep: &str, text: &str) {
    if !buf.is_empty() {
        buf.push_str(sep);
    }
    buf.push_str(text);
}
