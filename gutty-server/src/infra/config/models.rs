use std::path::PathBuf;

use gutty_core::{database::PoolSettings, query::SearchLimits};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
    pub search: SearchConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// `host:port`, resolved by the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.uploads.root)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn pool_settings(&self) -> PoolSettings {
        let defaults = PoolSettings::default();
        PoolSettings {
            max_connections: self
                .max_connections
                .unwrap_or(defaults.max_connections),
            create_if_missing: self.run_migrations,
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.trim_start().starts_with("sqlite:")
    }
}

#[derive(Debug, Clone)]
pub struct UploadsConfig {
    pub root: PathBuf,
    /// Largest accepted request body for uploads
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl SearchConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            default_per_page: self.default_per_page.min(self.max_per_page),
            max_per_page: self.max_per_page,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
