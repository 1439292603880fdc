use std::sync::Arc;

use enrolliq_core::AskService;

pub mod config;
pub mod handlers;
pub mod helpers;
pub mod models;

/// Shared application state: the pipeline plus nothing else. All of it is
/// immutable after startup.
pub struct AppState {
    pub service: Arc<AskService>,
}
