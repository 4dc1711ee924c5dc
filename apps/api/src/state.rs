use std::sync::Arc;

use crate::config::Config;
use crate::keywords::KeywordSource;
use crate::layout::LayoutConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable keyword source. Default: LlmKeywordSource over OpenAI.
    pub keyword_source: Arc<dyn KeywordSource>,
    pub config: Config,
    /// Layout config — font metrics and page geometry for the flow engine.
    /// Defaults to Helvetica at 11pt on US letter with 0.75" margins.
    pub layout: LayoutConfig,
}
