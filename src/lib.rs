pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::api::{HttpApi, JobBoardApi};
use crate::services::app::App;
use crate::services::session_service::SessionStore;

/// Wires the application against the configured backend. `init_config` must
/// have run first.
pub fn build_app() -> error::Result<App> {
    let api: Arc<dyn JobBoardApi> = Arc::new(HttpApi::from_config()?);
    let store = SessionStore::from_config()?;
    Ok(App::new(api, store))
}
