//! Turn a markdown daily digest into an inline-styled article and a cover card.

pub mod cli;
pub mod config;
pub mod convert;
pub mod html;
pub mod inline;
pub mod model;
pub mod parser;
pub mod render;
pub mod snapshot;

pub use convert::{convert_article, convert_cover, default_output, snapshot_cover};
pub use model::{CategoryArticle, CategorySection, CoverData, Digest, Medal, StatsRow, TopArticle};
pub use parser::{parse_cover_data, parse_digest};
pub use render::{render_article, render_cover, RenderOptions};
