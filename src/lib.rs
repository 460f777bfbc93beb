pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod nav;
pub mod notify;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::Session;
use crate::storage::{FileStorage, SharedStorage};

/// Wires the API client and the session over the configured storage file.
pub fn create_app(config: Config) -> cli::App {
    let storage: SharedStorage = Arc::new(FileStorage::new(config.storage_path.clone()));
    let api = ApiClient::with_timeout(config.api_base_url.clone(), storage.clone(), config.http_timeout);
    let session = Session::new(storage);

    cli::App::new(config, api, session)
}
