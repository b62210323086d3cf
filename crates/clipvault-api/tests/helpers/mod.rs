//! Test helpers: build AppState and router for integration tests.
//!
//! Records live in the in-memory repository, the object store is
//! `object_store`'s `InMemory`, and ffprobe is a shell script that prints a
//! canned answer, so no external service is needed.

pub mod auth;
pub mod fixtures;
pub mod repository;

use axum_test::TestServer;
use clipvault_api::constants;
use clipvault_api::setup::routes;
use clipvault_api::setup::services::initialize_services;
use clipvault_api::setup::storage::StorageHandles;
use clipvault_core::{Config, PlacementBackend, Video};
use clipvault_db::{InMemoryVideoRepository, VideoRepository};
use clipvault_storage::{LocalStorage, S3Storage, Storage};
use object_store::memory::InMemory;
use repository::FailingUpdatesRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const ASSETS_BASE_URL: &str = "http://localhost:8091/assets";
pub const CDN_DOMAIN: &str = "cdn.clipvault.test";
pub const MAX_THUMBNAIL_BYTES: u64 = 4 * 1024;
pub const MAX_VIDEO_BYTES: u64 = 16 * 1024;

pub const LANDSCAPE_PROBE: &str = r#"echo '{"streams":[{"width":1920,"height":1080}]}'"#;
pub const PORTRAIT_PROBE: &str = r#"echo '{"streams":[{"width":1080,"height":1920}]}'"#;
pub const NO_STREAM_PROBE: &str = r#"echo '{"streams":[]}'"#;

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on every backend it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub videos: Arc<InMemoryVideoRepository>,
    pub object_store: Arc<InMemory>,
    pub assets_root: PathBuf,
    pub scratch_root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a record owned by `owner` directly into the repository.
    pub async fn seed_video(&self, owner: Uuid) -> Video {
        self.videos
            .create_video(&Video::new(owner, "Boots", "A cat in boots"))
            .await
            .expect("Failed to seed video")
    }

    pub async fn video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("Failed to read video")
            .expect("Video disappeared")
    }

    /// Number of files left behind in the scratch directory.
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(&self.scratch_root)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Knobs for [`setup_test_app_with_options`].
pub struct TestAppOptions {
    pub thumbnail_placement: PlacementBackend,
    pub probe: &'static str,
    pub environment: &'static str,
    pub max_video_bytes: u64,
    /// Every `update_video` fails with a persistence error.
    pub failing_updates: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            thumbnail_placement: PlacementBackend::Local,
            probe: LANDSCAPE_PROBE,
            environment: "test",
            max_video_bytes: MAX_VIDEO_BYTES,
            failing_updates: false,
        }
    }
}

/// Local thumbnails, object-store videos, landscape probe.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_options(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(thumbnail_placement: PlacementBackend, probe: &'static str) -> TestApp {
    setup_test_app_with_options(TestAppOptions {
        thumbnail_placement,
        probe,
        ..TestAppOptions::default()
    })
    .await
}

pub async fn setup_test_app_with_options(options: TestAppOptions) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let assets_root = temp_dir.path().join("assets");
    let scratch_root = temp_dir.path().join("scratch");
    let ffprobe = write_fake_ffprobe(temp_dir.path(), options.probe);

    let mut config = create_test_config(
        &assets_root,
        &scratch_root,
        &ffprobe,
        options.thumbnail_placement,
    );
    config.environment = options.environment.to_string();
    config.max_video_size_bytes = options.max_video_bytes;

    let local: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(assets_root.clone(), ASSETS_BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );
    let object_store = Arc::new(InMemory::new());
    let object: Arc<dyn Storage> = Arc::new(S3Storage::with_store(
        object_store.clone(),
        "clipvault-test".to_string(),
        "us-east-1".to_string(),
        None,
        Some(CDN_DOMAIN.to_string()),
    ));

    let videos = Arc::new(InMemoryVideoRepository::new());
    let repository: Arc<dyn VideoRepository> = if options.failing_updates {
        Arc::new(FailingUpdatesRepository::new(videos.clone()))
    } else {
        videos.clone()
    };

    let state = initialize_services(
        &config,
        repository,
        StorageHandles {
            local,
            object: Some(object),
        },
    )
    .await
    .expect("Failed to initialize services");

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        object_store,
        assets_root,
        scratch_root,
        _temp_dir: temp_dir,
    }
}

fn create_test_config(
    assets_root: &Path,
    scratch_root: &Path,
    ffprobe: &Path,
    thumbnail_placement: PlacementBackend,
) -> Config {
    Config {
        server_port: 8091,
        environment: "test".to_string(),
        http_concurrency_limit: 64,
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        database_url: None,
        db_max_connections: 5,
        assets_root: assets_root.to_path_buf(),
        assets_base_url: ASSETS_BASE_URL.to_string(),
        scratch_root: scratch_root.to_path_buf(),
        thumbnail_placement,
        video_placement: PlacementBackend::S3,
        max_thumbnail_size_bytes: MAX_THUMBNAIL_BYTES,
        max_video_size_bytes: MAX_VIDEO_BYTES,
        ffprobe_path: ffprobe.to_string_lossy().into_owned(),
        probe_timeout_secs: 5,
        s3_bucket: Some("clipvault-test".to_string()),
        s3_region: Some("us-east-1".to_string()),
        s3_endpoint: None,
        s3_cf_distribution: Some(CDN_DOMAIN.to_string()),
        object_store_timeout_secs: 30,
    }
}

/// Shell script standing in for ffprobe; prints whatever `body` echoes.
fn write_fake_ffprobe(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffprobe");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write ffprobe");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod ffprobe");
    path
}
