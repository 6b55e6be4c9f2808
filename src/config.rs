use std::{fs, path::Path};

use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// editor session config
    pub editor: EditorConfig,
    /// backend endpoints config
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// client id sent with every saved workflow
    pub client_id: String,
    /// max number of undo snapshots, defaults to 50
    pub history_capacity: usize,
    /// capacity of the panel command queue, defaults to 64
    pub command_queue_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// base url of the catalog endpoints (`getNodeDetails`, `getAllConditions`)
    pub base_url: String,
    /// base url of the workflow endpoints (`all-workflows`, `json/<name>`)
    pub workflow_api_url: String,
    /// url the exported workflow document is posted to
    pub save_url: String,
    /// request timeout in milliseconds
    pub timeout_ms: u64,
    /// how long fetched catalogs stay cached, in seconds
    pub catalog_cache_ttl_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            client_id: "client61".to_string(),
            history_capacity: 50,
            command_queue_capacity: 64,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            workflow_api_url: "http://localhost:8080/workflow-api".to_string(),
            save_url: "http://localhost:8081/workflows/generateBPMN".to_string(),
            timeout_ms: 30_000,
            catalog_cache_ttl_secs: 60,
        }
    }
}

impl Config {
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}
