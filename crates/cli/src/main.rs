//! bucket-sync: ad-hoc sync runs between S3 buckets and local directories.
//!
//! Copies a prefix from one bucket to another, uploads a local tree, or
//! downloads a prefix. Copy and upload consult a JSON transfer-state file so
//! repeated runs only touch what changed.

#![warn(clippy::all)]

mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bucket_sync_storage::{
    CopyOrchestrator, DownloadOrchestrator, StorageError, TransferState, TransferStatistics,
    UploadOrchestrator,
};
use bucket_sync_storage_s3::S3StorageClient;

use config::{Config, Operation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before parsing so .env values feed the env-backed arguments.
    let dotenv = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) => log::debug!("No .env file loaded: {}", e),
    }

    let config: Config = Config::from_cli(cli)?;
    log::debug!("Configuration: {:?}", config);

    let client: S3StorageClient = S3StorageClient::new(config.settings.clone()).await?;

    match run(&client, config).await {
        Ok(stats) => {
            for failure in &stats.errors {
                log::warn!("Failed {}: {}", failure.key, failure.error);
            }
            log::info!("Done: {}", stats);
        }
        // The batch could not start (for example the listing failed). Nothing
        // was transferred, which is not treated as a process failure.
        Err(e) => log::error!("Sync aborted: {}", e),
    }

    Ok(())
}

async fn run(client: &S3StorageClient, config: Config) -> Result<TransferStatistics, StorageError> {
    log::info!("Starting {}", config.operation.name());

    match config.operation {
        Operation::Copy(request) => {
            let state: TransferState = TransferState::open(config.state_file).await;
            let mut copier = CopyOrchestrator::new(client, state);
            copier.copy_prefix(&request).await
        }
        Operation::Upload(request) => {
            let state: TransferState = TransferState::open(config.state_file).await;
            let mut uploader = UploadOrchestrator::new(client, state);
            uploader.upload_directory(&request).await
        }
        Operation::Download(request) => {
            DownloadOrchestrator::new(client)
                .download_prefix(&request)
                .await
        }
    }
}
