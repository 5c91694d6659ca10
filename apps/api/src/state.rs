use std::sync::Arc;

use crate::config::Config;
use crate::rules::store::RuleStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Active rule catalogue. Handlers take a snapshot per request.
    pub rules: Arc<RuleStore>,
}
