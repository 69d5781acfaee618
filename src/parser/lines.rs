use std::sync::LazyLock;

use regex::Regex;

use crate::model::Medal;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static ARTICLE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^###\s+([0-9]+)\.\s*(.*)$").unwrap());
static MEDAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(🥇|🥈|🥉)\s*\*\*(.+?)\*\*").unwrap());
static META_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[[^\]]+\]\([^)]+\)\s*—").unwrap());
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$").unwrap());
static TABLE_DELIMITER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|[\s|:-]*-[\s|:-]*$").unwrap());

pub const FENCE: &str = "```";
const MERMAID_FENCE: &str = "```mermaid";
const DETAILS_OPEN: &str = "<details";
pub const DETAILS_CLOSE: &str = "</details>";
const REASON_PREFIX: char = '💡';
const KEYWORDS_PREFIX: char = '🏷';

/// One trimmed input line, classified without regard to parser state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line<'a> {
    Empty,
    MermaidFence,
    CodeFence,
    /// `closed` is set when `</details>` sits on the same line.
    DetailsOpen { closed: bool },
    Rule,
    Heading { level: u8, text: &'a str },
    /// `### 3. title`; the title may be empty.
    ArticleHeading { index: &'a str, title: &'a str },
    Medal { medal: Medal, title: &'a str },
    Meta(&'a str),
    Quote(&'a str),
    Reason(&'a str),
    Keywords(&'a str),
    TableDelimiter,
    TableRow(&'a str),
    Text(&'a str),
}

type Rule = fn(&str) -> Option<Line<'_>>;

/// Ordered pattern table. The first rule that matches wins.
const RULES: &[Rule] = &[
    fence,
    details,
    rule,
    article_heading,
    heading,
    medal,
    meta,
    quote,
    reason,
    keywords,
    table,
];

pub fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Empty;
    }
    RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or(Line::Text(line))
}

fn fence(line: &str) -> Option<Line<'_>> {
    if line.starts_with(MERMAID_FENCE) {
        Some(Line::MermaidFence)
    } else if line.starts_with(FENCE) {
        Some(Line::CodeFence)
    } else {
        None
    }
}

fn details(line: &str) -> Option<Line<'_>> {
    line.starts_with(DETAILS_OPEN).then(|| Line::DetailsOpen {
        closed: line.contains(DETAILS_CLOSE),
    })
}

fn rule(line: &str) -> Option<Line<'_>> {
    RULE_RE.is_match(line).then_some(Line::Rule)
}

fn article_heading(line: &str) -> Option<Line<'_>> {
    let caps = ARTICLE_HEADING_RE.captures(line)?;
    Some(Line::ArticleHeading {
        index: caps.get(1)?.as_str(),
        title: caps.get(2)?.as_str().trim(),
    })
}

fn heading(line: &str) -> Option<Line<'_>> {
    let caps = HEADING_RE.captures(line)?;
    Some(Line::Heading {
        level: caps[1].len() as u8,
        text: caps.get(2)?.as_str().trim(),
    })
}

fn medal(line: &str) -> Option<Line<'_>> {
    let caps = MEDAL_RE.captures(line)?;
    Some(Line::Medal {
        medal: Medal::from_emoji(&caps[1])?,
        title: caps.get(2)?.as_str().trim(),
    })
}

fn meta(line: &str) -> Option<Line<'_>> {
    META_RE.is_match(line).then_some(Line::Meta(line))
}

fn quote(line: &str) -> Option<Line<'_>> {
    line.strip_prefix('>').map(|rest| Line::Quote(rest.trim()))
}

fn reason(line: &str) -> Option<Line<'_>> {
    line.strip_prefix(REASON_PREFIX).map(|rest| Line::Reason(rest.trim()))
}

fn keywords(line: &str) -> Option<Line<'_>> {
    let rest = line.strip_prefix(KEYWORDS_PREFIX)?;
    let rest = rest.strip_prefix('\u{FE0F}').unwrap_or(rest);
    Some(Line::Keywords(rest.trim()))
}

fn table(line: &str) -> Option<Line<'_>> {
    if !line.starts_with('|') {
        return None;
    }
    if line.starts_with("|:") || TABLE_DELIMITER_RE.is_match(line) {
        Some(Line::TableDelimiter)
    } else {
        Some(Line::TableRow(line))
    }
}

/// Split a pipe table row into its non-empty trimmed cells.
pub fn table_cells(row: &str) -> Vec<&str> {
    row.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}
