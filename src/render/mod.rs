pub mod article;
pub mod cover;
pub mod palette;

pub use article::render_article;
pub use cover::render_cover;

pub const DEFAULT_BRAND: &str = "AI 博客每日精选";
pub const DEFAULT_CALL_TO_ACTION: &str = "觉得有用？点个「在看」，转发给需要的朋友 👇";
pub const DEFAULT_FOOTER_FILTER: &str = "微信公众号";

/// Template knobs shared by both renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub brand: String,
    pub call_to_action: String,
    /// Footer lines containing this text are left out of the article.
    pub footer_filter: Option<String>,
    pub show_tag_cloud: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            brand: DEFAULT_BRAND.to_string(),
            call_to_action: DEFAULT_CALL_TO_ACTION.to_string(),
            footer_filter: Some(DEFAULT_FOOTER_FILTER.to_string()),
            show_tag_cloud: true,
        }
    }
}
