use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_BODY_BYTES, MAX_MAX_BODY_BYTES, MIN_MAX_BODY_BYTES,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Largest JSON-RPC message body accepted on stdin
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_MAX_BODY_BYTES..=MAX_MAX_BODY_BYTES).contains(&self.max_body_bytes) {
            return Err(ConfigError::server(format!(
                "server.max_body_bytes must be {}-{}, got {}",
                MIN_MAX_BODY_BYTES, MAX_MAX_BODY_BYTES, self.max_body_bytes
            )));
        }

        Ok(())
    }
}
