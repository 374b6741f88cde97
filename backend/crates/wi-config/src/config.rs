use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME,
    DatabaseConfig, LoggingConfig, PaginationConfig, PerformanceConfig, ServerConfig,
    ValidationConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
    pub validation: ValidationConfig,
    pub performance: PerformanceConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for WI_CONFIG_DIR env var, else use ./.wi/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply WI_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: WI_CONFIG_DIR env var > ./.wi/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.pagination.validate()?;
        self.validation.validate()?;
        self.performance.validate()?;

        if let Some(file) = &self.logging.file
            && (file.is_empty() || Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be a relative file name without '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path of the log file, when logging to a file.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            None => Ok(None),
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: max_body_bytes={}", self.server.max_body_bytes);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  logging: {} -> {} (colored: {})",
            *self.logging.level,
            self.logging.file.as_deref().unwrap_or("stderr"),
            self.logging.colored
        );
        info!(
            "  pagination: default_limit={}",
            self.pagination.default_limit
        );
        info!(
            "  validation: max_title_length={}",
            self.validation.max_title_length
        );
        info!(
            "  performance: list p95 budget={}ms over {} samples",
            self.performance.list_p95_budget_ms, self.performance.latency_samples
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_parse(
            "WI_SERVER_MAX_BODY_BYTES",
            &mut self.server.max_body_bytes,
        );

        // Database
        Self::apply_env_string("WI_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "WI_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Logging
        Self::apply_env_parse("WI_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("WI_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("WI_LOG_FILE", &mut self.logging.file);
        Self::apply_env_bool("WI_LOG_COLORED", &mut self.logging.colored);

        // Pagination
        Self::apply_env_parse(
            "WI_PAGINATION_DEFAULT_LIMIT",
            &mut self.pagination.default_limit,
        );

        // Validation
        Self::apply_env_parse(
            "WI_VALIDATION_MAX_TITLE_LENGTH",
            &mut self.validation.max_title_length,
        );

        // Performance
        Self::apply_env_parse(
            "WI_PERF_LIST_P95_BUDGET_MS",
            &mut self.performance.list_p95_budget_ms,
        );
        Self::apply_env_parse(
            "WI_PERF_LATENCY_SAMPLES",
            &mut self.performance.latency_samples,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
