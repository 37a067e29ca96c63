use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use thiserror::Error;

use super::{
    models::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, SearchConfig,
        ServerConfig, UploadsConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("gutty.toml"),
        PathBuf::from("config/gutty.toml"),
    ]
});

pub const DEFAULT_PORT: u16 = 8085;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://golf_balls.db";
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Default, Clone)]
struct ConfigLoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// `.env`, then the TOML file, then the process environment.
    /// Environment wins over file, file wins over defaults.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;

        let env_config = EnvConfig::gather();
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = self.compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    /// Load the explicit env file, or `.env` from the working directory.
    /// A missing file is not an error.
    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };

        match loaded {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // Explicit and env-provided paths must exist; defaults are probed.
        let path = match (&self.options.config_path, &env_config.config_path) {
            (Some(explicit), _) | (None, Some(explicit)) => {
                if !explicit.exists() {
                    return Err(ConfigLoadError::MissingConfig {
                        path: explicit.clone(),
                    });
                }
                explicit.clone()
            }
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    pub(crate) fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if file_config.is_none() {
            warnings.push_with_hint(
                "No gutty.toml detected; using environment variables and defaults",
                "Pass --config or set GUTTY_CONFIG_PATH to use a configuration file",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            uploads: file_uploads,
            search: file_search,
            cors: file_cors,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let database = DatabaseConfig {
            url: env
                .database_url
                .filter(|value| !value.trim().is_empty())
                .or(file_database.url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: env
                .database_max_connections
                .or(file_database.max_connections),
            run_migrations: env
                .run_migrations
                .or(file_database.run_migrations)
                .unwrap_or(true),
        };

        let uploads = UploadsConfig {
            root: env
                .upload_dir
                .or(file_uploads.root)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            max_bytes: env
                .upload_max_bytes
                .or(file_uploads.max_bytes)
                .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
        };

        let search = SearchConfig {
            default_per_page: env
                .search_default_per_page
                .or(file_search.default_per_page)
                .unwrap_or(20),
            max_per_page: env
                .search_max_per_page
                .or(file_search.max_per_page)
                .unwrap_or(100),
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file_cors.allowed_origins)
                .unwrap_or_else(default_cors_origins),
        };

        let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);

        let config = Config {
            server,
            database,
            uploads,
            search,
            cors,
            dev_mode,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok((config, warnings))
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8085".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::sources::{
        FileDatabaseConfig, FileSearchConfig, FileServerConfig,
    };

    fn compose(
        file: Option<FileConfig>,
        env: EnvConfig,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        ConfigLoader::new().compose_config(file, env, None, false)
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let (config, warnings) = compose(None, EnvConfig::default()).unwrap();

        assert_eq!(config.server.port, 8085);
        assert_eq!(config.database.url, "sqlite://golf_balls.db");
        assert!(config.database.run_migrations);
        assert_eq!(config.uploads.root, PathBuf::from("./uploads"));
        assert_eq!(config.uploads.max_bytes, 16 * 1024 * 1024);
        assert_eq!(config.search.limits().default_per_page, 20);
        assert_eq!(config.search.limits().max_per_page, 100);
        assert!(!config.dev_mode);
        assert!(!warnings.is_empty(), "missing file should warn");
    }

    #[test]
    fn env_overrides_file_which_overrides_defaults() {
        let file = FileConfig {
            server: FileServerConfig {
                host: Some("127.0.0.1".into()),
                port: Some(9000),
            },
            database: FileDatabaseConfig {
                url: Some("sqlite://file.db".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = EnvConfig {
            server_port: Some(9100),
            ..Default::default()
        };

        let (config, _) = compose(Some(file), env).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.url, "sqlite://file.db");
    }

    #[test]
    fn blank_database_url_in_env_is_ignored() {
        let env = EnvConfig {
            database_url: Some("   ".into()),
            ..Default::default()
        };
        let (config, _) = compose(None, env).unwrap();
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn non_sqlite_database_is_rejected() {
        let env = EnvConfig {
            database_url: Some("postgres://localhost/gutty".into()),
            ..Default::default()
        };
        assert!(matches!(
            compose(None, env),
            Err(ConfigLoadError::GuardRail(
                ConfigGuardRailError::UnsupportedDatabase { .. }
            ))
        ));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let env = EnvConfig {
            search_max_per_page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            compose(None, env),
            Err(ConfigLoadError::GuardRail(ConfigGuardRailError::ZeroMaxPerPage))
        ));

        let env = EnvConfig {
            upload_max_bytes: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            compose(None, env),
            Err(ConfigLoadError::GuardRail(ConfigGuardRailError::ZeroUploadLimit))
        ));
    }

    #[test]
    fn oversized_default_page_warns_and_is_clamped() {
        let file = FileConfig {
            search: FileSearchConfig {
                default_per_page: Some(50),
                max_per_page: Some(10),
            },
            ..Default::default()
        };
        let (config, warnings) = compose(Some(file), EnvConfig::default()).unwrap();

        assert!(
            warnings
                .items
                .iter()
                .any(|w| w.message.contains("default_per_page"))
        );
        assert_eq!(config.search.limits().default_per_page, 10);
    }

    #[test]
    fn wildcard_cors_requires_dev_mode() {
        let env = EnvConfig {
            cors_allowed_origins: Some(vec!["*".into()]),
            ..Default::default()
        };
        assert!(compose(None, env.clone()).is_err());

        let dev = EnvConfig {
            dev_mode: Some(true),
            ..env
        };
        assert!(compose(None, dev).is_ok());
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let loader = ConfigLoader::new().with_config_path("/nonexistent/gutty.toml");
        let err = loader.load_file_config(&EnvConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn missing_env_file_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new().with_env_file(dir.path().join("absent.env"));
        assert!(!loader.load_env_file().unwrap());
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.env");
        std::fs::write(&path, "GUTTY_BROKEN='unterminated\n").unwrap();

        let loader = ConfigLoader::new().with_env_file(&path);
        assert!(loader.load_env_file().is_err());
    }

    #[test]
    fn config_file_is_read_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gutty.toml");
        std::fs::write(&path, "[server]\nport = 9200\n").unwrap();

        let loader = ConfigLoader::new().with_config_path(&path);
        let (file, resolved) = loader.load_file_config(&EnvConfig::default()).unwrap();
        assert_eq!(file.unwrap().server.port, Some(9200));
        assert_eq!(resolved, Some(path));
    }
}
