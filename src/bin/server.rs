//! Content server for the agency website
//!
//! Usage: `wayfarer-server [config.yaml]`. The config path may also come from
//! `WAYFARER_CONFIG`; without one the defaults apply. `WAYFARER_*` variables
//! override individual settings.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wayfarer::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wayfarer=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WAYFARER_CONFIG").ok());

    let config = match config_path {
        Some(path) => WayfarerConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => WayfarerConfig::default(),
    }
    .with_env_overrides();
    config.validate().context("invalid configuration")?;

    tracing::info!(
        data_dir = %config.storage.data_dir.display(),
        upload_dir = %config.storage.upload_dir.display(),
        "starting content server"
    );

    let data_dir = config.storage.data_dir.clone();
    ServerBuilder::new(config)
        .with_site(StorageBackend::JsonFiles(data_dir))
        .await?
        .serve()
        .await
}
