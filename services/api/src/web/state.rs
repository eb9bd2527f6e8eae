//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::{JsonConfigStore, JsonStudentStore, JsonUserStore};
use crate::config::Config;
use std::sync::Arc;
use techpro_core::ports::{ConfigStore, Mailer, StudentStore, UserStore};

/// The shared application state, created once at startup and passed to all
/// handlers.
#[derive(Clone)]
pub struct AppState {
    pub configs: Arc<dyn ConfigStore>,
    pub students: Arc<dyn StudentStore>,
    pub users: Arc<dyn UserStore>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the file-backed stores against the configured data directory.
    pub fn new(config: Arc<Config>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            configs: Arc::new(JsonConfigStore::new(config.data_dir.clone())),
            students: Arc::new(JsonStudentStore::new(config.data_dir.clone())),
            users: Arc::new(JsonUserStore::new(config.data_dir.clone())),
            mailer,
            config,
        }
    }
}
