#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use gutty_core::testing::{SeedRecord, TestCatalog, sample_records};
use gutty_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, SearchConfig,
        ServerConfig, UploadsConfig,
    },
};

pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    0x49, 0x48, 0x44, 0x52,
];

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    catalog: TestCatalog,
}

impl TestApp {
    pub fn catalog(&self) -> &TestCatalog {
        &self.catalog
    }
}

pub fn test_config(catalog: &TestCatalog) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: Some(4),
            run_migrations: true,
        },
        uploads: UploadsConfig {
            root: catalog.dir().join("uploads"),
            max_bytes: 16 * 1024 * 1024,
        },
        search: SearchConfig {
            default_per_page: 20,
            max_per_page: 100,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".into()],
        },
        dev_mode: false,
        metadata: ConfigMetadata::default(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(&sample_records(), |_| {}).await
}

pub async fn spawn_app_with(
    records: &[SeedRecord],
    configure: impl FnOnce(&mut Config),
) -> TestApp {
    let catalog = TestCatalog::with_records(records)
        .await
        .expect("seed catalog");

    let mut config = test_config(&catalog);
    configure(&mut config);

    let state = AppState::new(Arc::new(config), catalog.database.clone());
    let server = TestServer::new(create_app(state.clone())).unwrap();

    TestApp {
        server,
        state,
        catalog,
    }
}
