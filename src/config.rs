use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_rpc_endpoint")]
    pub rpc_endpoint: String,

    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    #[serde(default = "default_status_poll_secs")]
    pub status_poll_secs: u64,

    #[serde(default = "default_snapshot_poll_secs")]
    pub snapshot_poll_secs: u64,
}

fn default_rpc_endpoint() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_contract_address() -> String {
    "0x0000000000000000000000000000000000000000".to_string()
}

fn default_token_symbol() -> String {
    "FLR".to_string()
}

fn default_status_poll_secs() -> u64 {
    2
}

fn default_snapshot_poll_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rpc_endpoint: default_rpc_endpoint(),
            contract_address: default_contract_address(),
            token_symbol: default_token_symbol(),
            status_poll_secs: default_status_poll_secs(),
            snapshot_poll_secs: default_snapshot_poll_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&contents)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".groupwallet")
            .join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rpc_endpoint, "http://127.0.0.1:8545");
        assert_eq!(config.status_poll_secs, 2);
        assert_eq!(config.snapshot_poll_secs, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"rpc_endpoint": "http://10.0.0.1:8545"}"#).unwrap();
        assert_eq!(config.rpc_endpoint, "http://10.0.0.1:8545");
        assert_eq!(config.token_symbol, "FLR");
    }
}
