use std::path::PathBuf;

use bucket_sync_storage::{
    AwsCredentials, CopyRequest, DownloadRequest, StorageSettings, UploadRequest,
};

use crate::cli::{Cli, Command, S3Args};

/// What a single run does.
#[derive(Debug, Clone)]
pub enum Operation {
    Copy(CopyRequest),
    Upload(UploadRequest),
    Download(DownloadRequest),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Copy(_) => "copy",
            Operation::Upload(_) => "upload",
            Operation::Download(_) => "download",
        }
    }
}

/// Validated run configuration.
///
/// Credentials are redacted by `AwsCredentials`' `Debug` impl.
#[derive(Debug)]
pub struct Config {
    pub settings: StorageSettings,
    pub state_file: PathBuf,
    pub operation: Operation,
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let settings: StorageSettings = storage_settings(cli.s3)?;

        let operation: Operation = match cli.command {
            Command::Copy(args) => {
                require("source bucket", &args.source_bucket)?;
                require("target bucket", &args.target_bucket)?;
                Operation::Copy(CopyRequest {
                    source_bucket: args.source_bucket,
                    target_bucket: args.target_bucket,
                    prefix: args.prefix,
                })
            }
            Command::Upload(args) => {
                require("bucket", &args.bucket)?;
                Operation::Upload(UploadRequest {
                    local_root: args.local_dir,
                    bucket: args.bucket,
                    key_prefix: args.prefix,
                    invalidate: args.invalidate,
                    follow_symlinks: args.follow_symlinks,
                })
            }
            Command::Download(args) => {
                require("bucket", &args.bucket)?;
                Operation::Download(DownloadRequest {
                    bucket: args.bucket,
                    prefix: args.prefix,
                    local_root: args.local_dir,
                })
            }
        };

        Ok(Self {
            settings,
            state_file: cli.state_file,
            operation,
        })
    }
}

fn storage_settings(args: S3Args) -> anyhow::Result<StorageSettings> {
    require("region", &args.region)?;

    let credentials: Option<AwsCredentials> = match (args.access_key_id, args.secret_access_key)
    {
        (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
            access_key_id,
            secret_access_key,
            session_token: None,
        }),
        (None, None) => None,
        _ => anyhow::bail!(
            "--access-key-id (S3_ID) and --secret-access-key (S3_SECRET) must be set together"
        ),
    };

    Ok(StorageSettings {
        region: args.region,
        credentials,
        endpoint_url: args.endpoint_url.filter(|url| !url.trim().is_empty()),
    })
}

fn require(what: &str, value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{} must not be empty", what);
    }
    Ok(())
}
