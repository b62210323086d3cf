//! Configuration module
//!
//! [`Config`] is built once at process start from the environment (a `.env`
//! file is honoured) and then shared by reference with every component. Nothing
//! reads the environment after startup.

use std::env;
use std::path::PathBuf;

use crate::storage_types::PlacementBackend;

// Common constants
const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const MAX_THUMBNAIL_SIZE_MB: u64 = 10;
const MAX_VIDEO_SIZE_MB: u64 = 1024;
const PROBE_TIMEOUT_SECS: u64 = 30;
const OBJECT_STORE_TIMEOUT_SECS: u64 = 300;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub http_concurrency_limit: usize,
    // Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    // Record store; the in-memory repository is used when unset
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    // Local assets served under /assets
    pub assets_root: PathBuf,
    pub assets_base_url: String,
    // Scratch directory for staged uploads
    pub scratch_root: PathBuf,
    // Placement per upload flow
    pub thumbnail_placement: PlacementBackend,
    pub video_placement: PlacementBackend,
    pub max_thumbnail_size_bytes: u64,
    pub max_video_size_bytes: u64,
    // Media probe
    pub ffprobe_path: String,
    pub probe_timeout_secs: u64,
    // Object store
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub s3_cf_distribution: Option<String>,
    pub object_store_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let thumbnail_placement = env::var("THUMBNAIL_PLACEMENT")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<PlacementBackend>()?;

        let video_placement = env::var("VIDEO_PLACEMENT")
            .unwrap_or_else(|_| "s3".to_string())
            .parse::<PlacementBackend>()?;

        let config = Config {
            server_port,
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            assets_root: env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assets")),
            assets_base_url: env::var("ASSETS_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}/assets", server_port)),
            scratch_root: env::var("SCRATCH_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("clipvault-staging")),
            thumbnail_placement,
            video_placement,
            max_thumbnail_size_bytes: env::var("MAX_THUMBNAIL_SIZE_MB")
                .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE_MB.to_string())
                .parse::<u64>()
                .unwrap_or(MAX_THUMBNAIL_SIZE_MB)
                * 1024
                * 1024,
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_MB")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
                .parse::<u64>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                * 1024
                * 1024,
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            probe_timeout_secs: env::var("PROBE_TIMEOUT_SECS")
                .unwrap_or_else(|_| PROBE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(PROBE_TIMEOUT_SECS),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            s3_cf_distribution: env::var("S3_CF_DISTRO").ok().filter(|s| !s.trim().is_empty()),
            object_store_timeout_secs: env::var("OBJECT_STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| OBJECT_STORE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(OBJECT_STORE_TIMEOUT_SECS),
        };

        Ok(config)
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Whether any upload flow places bytes on the object store.
    pub fn uses_object_store(&self) -> bool {
        self.thumbnail_placement == PlacementBackend::S3
            || self.video_placement == PlacementBackend::S3
    }

    /// Fail fast on combinations the upload flows cannot honour.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET cannot be empty"));
        }

        if !matches!(
            self.thumbnail_placement,
            PlacementBackend::Local | PlacementBackend::Inline
        ) {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_PLACEMENT must be 'local' or 'inline', got '{}'",
                self.thumbnail_placement
            ));
        }

        if !matches!(
            self.video_placement,
            PlacementBackend::Local | PlacementBackend::S3
        ) {
            return Err(anyhow::anyhow!(
                "VIDEO_PLACEMENT must be 'local' or 's3', got '{}'",
                self.video_placement
            ));
        }

        if self.max_thumbnail_size_bytes == 0 || self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        if self.uses_object_store() {
            if self.s3_bucket.is_none() {
                return Err(anyhow::anyhow!("S3_BUCKET is required for s3 placement"));
            }
            if self.s3_region.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION is required for s3 placement"
                ));
            }
        }

        if self.is_production() && self.database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be set in production; the in-memory store is for development only"
            ));
        }

        Ok(())
    }
}

/// Split a comma separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            cors_origins: vec!["*".to_string()],
            jwt_secret: "secret".to_string(),
            database_url: None,
            db_max_connections: MAX_CONNECTIONS,
            assets_root: PathBuf::from("./assets"),
            assets_base_url: "http://localhost:8091/assets".to_string(),
            scratch_root: env::temp_dir(),
            thumbnail_placement: PlacementBackend::Local,
            video_placement: PlacementBackend::Local,
            max_thumbnail_size_bytes: MAX_THUMBNAIL_SIZE_MB * 1024 * 1024,
            max_video_size_bytes: MAX_VIDEO_SIZE_MB * 1024 * 1024,
            ffprobe_path: "ffprobe".to_string(),
            probe_timeout_secs: PROBE_TIMEOUT_SECS,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            s3_cf_distribution: None,
            object_store_timeout_secs: OBJECT_STORE_TIMEOUT_SECS,
        }
    }

    #[test]
    fn local_placements_validate() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn s3_placement_requires_bucket_and_region() {
        let mut config = base();
        config.video_placement = PlacementBackend::S3;
        assert!(config.validate().is_err());

        config.s3_bucket = Some("media".to_string());
        assert!(config.validate().is_err());

        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_placements_outside_each_flow() {
        let mut config = base();
        config.thumbnail_placement = PlacementBackend::S3;
        assert!(config.validate().is_err());

        let mut config = base();
        config.video_placement = PlacementBackend::Inline;
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_requires_a_database() {
        let mut config = base();
        config.environment = "production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.database_url = Some("postgres://localhost/clipvault".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn origin_lists_are_trimmed() {
        assert_eq!(
            parse_origins(" https://a.test, ,https://b.test "),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn wildcard_or_empty_origins_allow_any() {
        let mut config = base();
        assert!(config.allows_any_origin());

        config.cors_origins = vec![];
        assert!(config.allows_any_origin());

        config.cors_origins = vec!["https://app.clipvault.test".to_string()];
        assert!(!config.allows_any_origin());
    }
}
