//! Sync command - runs the pipeline once and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Run a single sync pass.
///
/// Individual call failures are logged and counted but never turn into a
/// non-zero exit; the run completes regardless of how many upserts failed.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    info!("Starting sync against {}", config.api.base_url);

    let service = crate::create_sync_service(&config);
    let report = service.run().await;

    if report.total_failed() > 0 {
        info!("Completed with {} failed upserts", report.total_failed());
    }

    Ok(())
}
