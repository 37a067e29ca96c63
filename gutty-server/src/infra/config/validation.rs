use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("database URL must be a sqlite URL, got `{url}`")]
    UnsupportedDatabase { url: String },
    #[error("search.max_per_page must be at least 1")]
    ZeroMaxPerPage,
    #[error("uploads.max_bytes must be at least 1")]
    ZeroUploadLimit,
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if !config.database.is_sqlite() {
        return Err(ConfigGuardRailError::UnsupportedDatabase {
            url: config.database.url.clone(),
        });
    }

    if config.search.max_per_page == 0 {
        return Err(ConfigGuardRailError::ZeroMaxPerPage);
    }

    if config.uploads.max_bytes == 0 {
        return Err(ConfigGuardRailError::ZeroUploadLimit);
    }

    if !config.dev_mode && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::DangerousCorsWildcard);
    }

    if config.search.default_per_page > config.search.max_per_page {
        warnings.push_with_hint(
            format!(
                "search.default_per_page ({}) exceeds search.max_per_page ({}); using {}",
                config.search.default_per_page,
                config.search.max_per_page,
                config.search.max_per_page
            ),
            "Lower SEARCH_DEFAULT_PER_PAGE or raise SEARCH_MAX_PER_PAGE",
        );
    }

    if !config.database.run_migrations {
        warnings.push(
            "RUN_MIGRATIONS is false; the catalog file must already contain the golf_balls table",
        );
    }

    Ok(warnings)
}
