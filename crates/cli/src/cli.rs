use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bucket-sync",
    version,
    about = "Copy, upload and download S3 objects with a local transfer-state cache"
)]
pub struct Cli {
    #[command(flatten)]
    pub s3: S3Args,

    /// JSON file recording completed transfers
    #[arg(long, env = "SYNC_STATE_FILE", default_value = "localCache.json")]
    pub state_file: PathBuf,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings shared by every subcommand.
#[derive(Args, Debug)]
pub struct S3Args {
    /// AWS region
    #[arg(long, env = "S3_LOCATION")]
    pub region: String,

    /// Access key id; the default credential chain is used when unset
    #[arg(long, env = "S3_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Secret access key, required together with --access-key-id
    #[arg(long, env = "S3_SECRET", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[arg(long, env = "S3_ENDPOINT")]
    pub endpoint_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy every object under a prefix from one bucket to another
    Copy(CopyArgs),
    /// Upload a local directory tree, skipping unchanged files
    Upload(UploadArgs),
    /// Download every object under a prefix into a local directory
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Key prefix to copy, e.g. "images"
    #[arg(long)]
    pub prefix: String,

    /// Bucket to copy from
    #[arg(long, env = "S3_BUCKET_DEV")]
    pub source_bucket: String,

    /// Bucket to copy into
    #[arg(long, env = "S3_BUCKET_PROD")]
    pub target_bucket: String,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Directory to upload
    #[arg(long)]
    pub local_dir: PathBuf,

    /// Key prefix prepended to every uploaded key
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Forget recorded fingerprints under the destination first
    #[arg(long)]
    pub invalidate: bool,

    /// Follow symlinks inside the local directory
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Destination bucket
    #[arg(long, env = "S3_BUCKET_DEV")]
    pub bucket: String,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Key prefix to download
    #[arg(long)]
    pub prefix: String,

    /// Directory the prefix is mirrored into
    #[arg(long)]
    pub local_dir: PathBuf,

    /// Bucket to download from
    #[arg(long, env = "S3_BUCKET_DEV")]
    pub bucket: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
