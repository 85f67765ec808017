use super::traits::ConfigSection;
use crate::error::{EcorouteError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("db.json"),
        }
    }
}

impl ConfigSection for ServerConfig {
    fn section_name() -> &'static str {
        "server"
    }

    fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(EcorouteError::Configuration(
                "Database path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
