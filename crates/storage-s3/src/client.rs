//! AWS SDK S3 client implementation.

use std::path::Path;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use bucket_sync_storage::{ObjectInfo, StorageClient, StorageError, StorageSettings};

use crate::error::S3Error;

/// Provider name attached to static credentials.
const CREDENTIALS_PROVIDER: &str = "bucket-sync";

/// StorageClient implementation using AWS SDK for Rust.
///
/// Requests are issued one at a time; retries and timeouts are whatever the
/// SDK defaults to.
pub struct S3StorageClient {
    /// The underlying S3 client.
    s3_client: S3Client,
}

impl S3StorageClient {
    /// Create a new S3 storage client.
    ///
    /// Static credentials from `settings` take precedence; otherwise the
    /// default AWS credential chain is used.
    ///
    /// # Arguments
    /// * `settings` - Storage settings including region and optional credentials
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the region is empty.
    pub async fn new(settings: StorageSettings) -> Result<Self, StorageError> {
        if settings.region.trim().is_empty() {
            return Err(S3Error::ConfigError("region must not be empty".to_string()).into());
        }

        let config_loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(settings.region.clone()));

        let config_loader = if let Some(ref creds) = settings.credentials {
            let credentials = Credentials::new(
                &creds.access_key_id,
                &creds.secret_access_key,
                creds.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER,
            );
            config_loader.credentials_provider(credentials)
        } else {
            config_loader
        };

        let config_loader = match settings.endpoint_url {
            Some(ref url) => config_loader.endpoint_url(url),
            None => config_loader,
        };

        let sdk_config = config_loader.load().await;

        // S3-compatible services behind a custom endpoint rarely support
        // virtual-hosted buckets.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.endpoint_url.is_some())
            .build();

        Ok(Self {
            s3_client: S3Client::from_conf(s3_config),
        })
    }
}

/// Map a service error to a storage error, keeping access-denied distinct.
fn service_error<E>(err: E, bucket: &str, key: &str) -> StorageError
where
    E: ProvideErrorMetadata + std::fmt::Display,
{
    match err.code() {
        Some("AccessDenied") | Some("Forbidden") => StorageError::AccessDenied {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: err.message().unwrap_or_default().to_string(),
        },
        _ => S3Error::SdkError {
            message: err.to_string(),
        }
        .into(),
    }
}

/// Copy source header value: URL-encoded `{bucket}/{key}`.
fn copy_source(bucket: &str, key: &str) -> String {
    urlencoding::encode(&format!("{}/{}", bucket, key)).into_owned()
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError> {
        let mut objects: Vec<ObjectInfo> = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .s3_client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix);

            if let Some(ref token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|err| service_error(err.into_service_error(), bucket, prefix))?;

            if let Some(ref contents) = response.contents {
                for obj in contents {
                    objects.push(ObjectInfo::new(
                        obj.key().unwrap_or_default(),
                        obj.size().map(|s| s as u64).unwrap_or(0),
                    ));
                }
            }

            if response.is_truncated() == Some(true) {
                continuation_token = response.next_continuation_token.clone();
                if continuation_token.is_none() {
                    break;
                }
            } else {
                break;
            }
        }

        log::debug!("Listed {} objects in s3://{}/{}", objects.len(), bucket, prefix);
        Ok(objects)
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<u64>, StorageError> {
        let request = self.s3_client.head_object().bucket(bucket).key(key);

        match request.send().await {
            Ok(output) => Ok(Some(output.content_length().map(|l| l as u64).unwrap_or(0))),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(None)
                } else {
                    Err(service_error(service_err, bucket, key))
                }
            }
        }
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        target_bucket: &str,
        target_key: &str,
    ) -> Result<(), StorageError> {
        self.s3_client
            .copy_object()
            .copy_source(copy_source(source_bucket, source_key))
            .bucket(target_bucket)
            .key(target_key)
            .send()
            .await
            .map_err(|err| service_error(err.into_service_error(), target_bucket, target_key))?;

        Ok(())
    }

    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<u64, StorageError> {
        let request = self.s3_client.get_object().bucket(bucket).key(key);

        let response = request.send().await.map_err(|err| {
            let service_err = err.into_service_error();
            if service_err.is_no_such_key() {
                StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            } else {
                service_error(service_err, bucket, key)
            }
        })?;

        // Create parent directories if needed
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent.display().to_string(), &e))?;
        }

        let mut file = File::create(file_path)
            .await
            .map_err(|e| StorageError::io(file_path.display().to_string(), &e))?;

        let mut written: u64 = 0;
        let mut body = response.body;
        while let Some(chunk) = body.try_next().await.map_err(|e| StorageError::NetworkError {
            message: e.to_string(),
        })? {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::io(file_path.display().to_string(), &e))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| StorageError::io(file_path.display().to_string(), &e))?;

        Ok(written)
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let body = ByteStream::from(data.to_vec());

        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|err| service_error(err.into_service_error(), bucket, key))?;

        Ok(())
    }
}
