use std::mem;

use tracing::debug;

use super::lines::{classify, table_cells, Line, DETAILS_CLOSE, FENCE};
use crate::inline::strip_markdown;
use crate::model::{push_joined, CategoryArticle, CategorySection, Digest, StatsRow, TopArticle};

pub const SUBTITLE_PREFIX: &str = "来自";
pub const HIGHLIGHTS_MARKER: &str = "今日看点";
pub const TOP_MARKER: &str = "今日必读";
pub const STATS_MARKER: &str = "数据概览";
pub const TAG_CLOUD_MARKER: &str = "话题标签";
const REASON_LABELS: [&str; 2] = ["**为什么值得读**:", "**为什么值得读**："];

/// Lines from the end of the document that may hold footer text.
pub const FOOTER_WINDOW: usize = 9;

/// Index of the counted table row that carries the numbers (header is 1).
const STATS_DATA_ROW: usize = 2;

/// Fenced or collapsed regions whose content is never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    None,
    Mermaid,
    Code,
    Details,
}

impl Skip {
    /// Whether `line` ends the active skip region.
    fn closes(self, line: &str) -> bool {
        match self {
            Skip::None => true,
            Skip::Mermaid | Skip::Code => line == FENCE,
            Skip::Details => line.contains(DETAILS_CLOSE),
        }
    }
}

/// Current section, carrying whatever record is being accumulated in it.
#[derive(Debug)]
enum State {
    None,
    Highlights,
    Top(Option<TopArticle>),
    Stats { rows: usize },
    TagCloud { rows: usize },
    Category {
        section: CategorySection,
        pending: Option<CategoryArticle>,
    },
}

struct DigestBuilder {
    digest: Digest,
    state: State,
    skip: Skip,
    footer_from: usize,
}

/// Parse a daily digest. Never fails: unrecognized lines are dropped.
pub fn parse_digest(markdown: &str) -> Digest {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut builder = DigestBuilder {
        digest: Digest::default(),
        state: State::None,
        skip: Skip::None,
        footer_from: lines.len().saturating_sub(FOOTER_WINDOW),
    };

    for (i, raw) in lines.iter().enumerate() {
        builder.feed(i, raw.trim());
    }

    let digest = builder.finish();
    debug!(
        top = digest.top_articles.len(),
        categories = digest.categories.len(),
        stats = digest.stats.is_some(),
        "parsed digest"
    );
    digest
}

impl DigestBuilder {
    fn feed(&mut self, idx: usize, text: &str) {
        if self.skip != Skip::None {
            if self.skip.closes(text) {
                self.skip = Skip::None;
            }
            return;
        }

        let line = classify(text);
        match line {
            Line::MermaidFence => {
                self.skip = Skip::Mermaid;
                return;
            }
            Line::CodeFence => {
                self.skip = Skip::Code;
                return;
            }
            Line::DetailsOpen { closed } => {
                if !closed {
                    self.skip = Skip::Details;
                }
                return;
            }
            Line::Heading { level: 1, text } => {
                self.digest.title = text.to_string();
                return;
            }
            Line::Quote(q) if matches!(self.state, State::None) && q.starts_with(SUBTITLE_PREFIX) => {
                self.digest.subtitle = strip_markdown(q);
                return;
            }
            Line::Heading { level: 2, text } => {
                self.enter_section(text);
                return;
            }
            Line::Rule => return,
            Line::Heading { level: 3, text } if matches!(self.state, State::Stats { .. }) => {
                if text.contains(TAG_CLOUD_MARKER) {
                    if let State::Stats { rows } = self.state {
                        self.state = State::TagCloud { rows };
                    }
                }
                return;
            }
            _ => {}
        }

        self.dispatch(line, text);

        if idx >= self.footer_from && is_emphasis_wrapped(text) {
            push_joined(&mut self.digest.footer, "\n", &strip_markdown(text));
        }
    }

    fn dispatch(&mut self, line: Line<'_>, text: &str) {
        match &mut self.state {
            State::None => {}
            State::Highlights => {
                if is_content(line) {
                    push_joined(&mut self.digest.highlights, " ", &strip_markdown(text));
                }
            }
            State::Top(current) => match line {
                Line::Medal { medal, title } => {
                    let prev = current.replace(TopArticle::new(medal, strip_markdown(title)));
                    commit_top(&mut self.digest, prev);
                }
                Line::Meta(m) => {
                    if let Some(article) = current {
                        article.meta = strip_markdown(m);
                    }
                }
                Line::Quote(q) => {
                    if let Some(article) = current {
                        push_joined(&mut article.summary, " ", &strip_markdown(q));
                    }
                }
                Line::Reason(r) => {
                    if let Some(article) = current {
                        article.reason = strip_markdown(strip_reason_label(r));
                    }
                }
                Line::Keywords(k) => {
                    if let Some(article) = current {
                        article.keywords = strip_markdown(k);
                    }
                }
                _ => {}
            },
            State::Stats { rows } => {
                if let Line::TableRow(row) = line {
                    *rows += 1;
                    if *rows == STATS_DATA_ROW {
                        let cells = table_cells(row);
                        if let [sources, articles, time_range, selected, ..] = cells[..] {
                            self.digest.stats = Some(StatsRow {
                                sources: strip_markdown(sources),
                                articles: strip_markdown(articles),
                                time_range: strip_markdown(time_range),
                                selected: strip_markdown(selected),
                            });
                        }
                    }
                }
            }
            State::TagCloud { rows } => {
                if is_content(line) {
                    let rows = *rows;
                    self.digest.tag_cloud = text.to_string();
                    self.state = State::Stats { rows };
                }
            }
            State::Category { section, pending } => match line {
                Line::ArticleHeading { index, title } => {
                    let next = CategoryArticle {
                        index: index.to_string(),
                        title_zh: strip_markdown(title),
                        ..Default::default()
                    };
                    if let Some(prev) = pending.replace(next) {
                        commit_category_article(section, prev);
                    }
                }
                Line::Meta(m) => {
                    if let Some(article) = pending {
                        article.meta = strip_markdown(m);
                    }
                }
                Line::Quote(q) => {
                    if let Some(article) = pending {
                        push_joined(&mut article.summary, " ", &strip_markdown(q));
                    }
                }
                Line::Keywords(k) => {
                    if let Some(article) = pending {
                        article.keywords = strip_markdown(k);
                    }
                }
                _ => {}
            },
        }
    }

    fn enter_section(&mut self, text: &str) {
        self.flush();
        self.state = if text.contains(HIGHLIGHTS_MARKER) {
            State::Highlights
        } else if text.contains(TOP_MARKER) {
            State::Top(None)
        } else if text.contains(STATS_MARKER) {
            State::Stats { rows: 0 }
        } else {
            let (emoji, label) = split_category_heading(text);
            State::Category {
                section: CategorySection {
                    emoji: emoji.to_string(),
                    label: label.to_string(),
                    articles: Vec::new(),
                },
                pending: None,
            }
        };
    }

    /// Commit whatever the current section is accumulating and leave it.
    fn flush(&mut self) {
        match mem::replace(&mut self.state, State::None) {
            State::Top(current) => commit_top(&mut self.digest, current),
            State::Category { mut section, pending } => {
                if let Some(article) = pending {
                    commit_category_article(&mut section, article);
                }
                if !section.articles.is_empty() {
                    self.digest.categories.push(section);
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Digest {
        self.flush();
        self.digest
    }
}

fn commit_top(digest: &mut Digest, article: Option<TopArticle>) {
    if let Some(article) = article.filter(|a| !a.title_zh.is_empty()) {
        digest.top_articles.push(article);
    }
}

fn commit_category_article(section: &mut CategorySection, article: CategoryArticle) {
    if !article.title_zh.is_empty() {
        section.articles.push(article);
    }
}

/// Non-empty and not a heading.
fn is_content(line: Line<'_>) -> bool {
    !matches!(
        line,
        Line::Empty | Line::Heading { .. } | Line::ArticleHeading { .. }
    )
}

fn strip_reason_label(reason: &str) -> &str {
    REASON_LABELS
        .iter()
        .find_map(|label| reason.strip_prefix(label))
        .map(str::trim)
        .unwrap_or(reason)
}

/// `## 🤖 AI / ML` → (`🤖`, `AI / ML`). Headings without a leading symbol
/// token keep the whole text as the label.
fn split_category_heading(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((head, rest)) if head.chars().next().is_some_and(|c| !c.is_alphanumeric()) => {
            (head, rest.trim())
        }
        _ => ("", text),
    }
}

fn is_emphasis_wrapped(text: &str) -> bool {
    text.len() > 1 && text.starts_with('*') && text.ends_with('*')
}
