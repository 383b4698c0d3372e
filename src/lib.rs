//! port-sync
//!
//! One-shot synchronization of identity-provider users and teams into the
//! Port.io software catalog:
//! - client-credentials token exchange, cached for the process lifetime
//! - filtered resource listing (`users` with a fixed field projection, `teams`)
//! - per-entity upsert under the `user` and `team` blueprints, with
//!   identifier sanitization to Port's allowed character set

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use infrastructure::http_client::HttpClient;
use infrastructure::port::PortClient;
use infrastructure::sync::SyncService;

/// Build the sync service wired to the real HTTP transport.
pub fn create_sync_service(config: &AppConfig) -> SyncService<HttpClient> {
    let client = PortClient::new(HttpClient::new(), config.api.base_url.as_str(), &config.auth);
    SyncService::new(client)
}
