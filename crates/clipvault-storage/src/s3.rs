use crate::traits::{validate_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::{
    Attribute, AttributeValue, Attributes, ClientOptions, ObjectStore, PutMultipartOptions,
    PutOptions, PutPayload, WriteMultipart,
};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;

/// Files up to this size are sent with a single PUT. Larger files are
/// streamed from disk as a multipart upload in parts of this size.
const MULTIPART_PART_SIZE: usize = 5 * 1024 * 1024;
const MAX_CONCURRENT_PARTS: usize = 4;
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// S3 storage implementation
///
/// Objects are written through `object_store`, so any S3-compatible provider
/// works. Public URLs go through the CDN distribution when one is configured.
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    cdn_domain: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `cdn_domain` - Optional CDN distribution domain serving the bucket
    /// * `timeout` - Per-request timeout of the underlying HTTP client
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        cdn_domain: Option<String>,
        timeout: Duration,
    ) -> StorageResult<Self> {
        // Credentials come from the standard AWS_* environment variables
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone())
            .with_client_options(ClientOptions::new().with_timeout(timeout));

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(
            Arc::new(store),
            bucket,
            region,
            endpoint_url,
            cdn_domain,
        ))
    }

    /// Wrap an already-built object store, e.g. `object_store::memory::InMemory`.
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        cdn_domain: Option<String>,
    ) -> Self {
        S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
            cdn_domain,
        }
    }

    /// Generate public URL for S3 object
    ///
    /// CDN first, then path-style `{endpoint}/{bucket}/{key}` for custom
    /// endpoints, then the standard `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref cdn) = self.cdn_domain {
            let host = cdn
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            format!("https://{}/{}", host, key)
        } else if let Some(ref endpoint) = self.endpoint_url {
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    fn upload_error(
        &self,
        err: impl std::fmt::Display,
        storage_key: &str,
        size: u64,
        start: Instant,
    ) -> StorageError {
        tracing::error!(
            error = %err,
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload failed"
        );
        StorageError::UploadFailed(err.to_string())
    }

    async fn put_bytes(
        &self,
        location: &ObjectPath,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), object_store::Error> {
        let opts = PutOptions {
            attributes: content_type_attributes(content_type),
            ..Default::default()
        };
        self.store
            .put_opts(location, PutPayload::from(bytes), opts)
            .await?;
        Ok(())
    }

    async fn put_multipart(
        &self,
        location: &ObjectPath,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<()> {
        let mut file = tokio::fs::File::open(source).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", source.display(), e))
        })?;

        let opts = PutMultipartOptions {
            attributes: content_type_attributes(content_type),
            ..Default::default()
        };
        let upload = self
            .store
            .put_multipart_opts(location, opts)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let mut writer = WriteMultipart::new_with_chunk_size(upload, MULTIPART_PART_SIZE);

        match stream_parts(&mut file, &mut writer).await {
            Ok(()) => {
                writer
                    .finish()
                    .await
                    .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
                Ok(())
            }
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(
                        error = %abort_err,
                        key = %location,
                        "Failed to abort multipart upload"
                    );
                }
                Err(e)
            }
        }
    }
}

fn content_type_attributes(content_type: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );
    attributes
}

/// Feed the file into the multipart writer, holding at most
/// `MAX_CONCURRENT_PARTS` parts in flight.
async fn stream_parts(
    file: &mut tokio::fs::File,
    writer: &mut WriteMultipart,
) -> StorageResult<()> {
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Failed to read staged file: {}", e)))?;
        if n == 0 {
            return Ok(());
        }
        writer
            .wait_for_capacity(MAX_CONCURRENT_PARTS)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        writer.write(&buf[..n]);
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_file(
        &self,
        storage_key: &str,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;

        let size = tokio::fs::metadata(source)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!("Failed to read {}: {}", source.display(), e))
            })?
            .len();
        let location = ObjectPath::from(storage_key);
        let start = Instant::now();

        if size <= MULTIPART_PART_SIZE as u64 {
            let data = tokio::fs::read(source).await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to read {}: {}", source.display(), e))
            })?;
            self.put_bytes(&location, Bytes::from(data), content_type)
                .await
                .map_err(|e| self.upload_error(e, storage_key, size, start))?;
        } else {
            self.put_multipart(&location, source, content_type)
                .await
                .map_err(|e| self.upload_error(e, storage_key, size, start))?;
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            multipart = size > MULTIPART_PART_SIZE as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }
}
