use std::sync::Arc;

use crate::analysis::analyzer::AnalysisClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Wraps the provider client behind `Arc<dyn ChatCompletion>`.
    pub analyzer: AnalysisClient,
}
