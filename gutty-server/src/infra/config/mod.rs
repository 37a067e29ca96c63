pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    Config, ConfigMetadata, CorsConfig, DatabaseConfig, SearchConfig,
    ServerConfig, UploadsConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
