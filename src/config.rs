//! Configuration management for transform nodes

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Buffered node configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Cap on accumulated content in bytes
    #[serde(default = "default_max_buffer_size")]
    pub max_buffer_size: usize,

    /// Zero consumed and released buffer regions so transformed content does
    /// not linger in memory the node no longer accounts for
    #[serde(default = "default_true")]
    pub zero_on_consume: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: default_max_buffer_size(),
            zero_on_consume: default_true(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config: Self = envy::prefixed("SIGFLOW_")
            .from_env()
            .map_err(|e| Error::Config(format!("Failed to parse environment variables: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_buffer_size == 0 {
            return Err(Error::Config("max_buffer_size must be > 0".to_string()));
        }
        Ok(())
    }
}

fn default_max_buffer_size() -> usize {
    crate::DEFAULT_MAX_BUFFER_SIZE
}

fn default_true() -> bool {
    true
}
