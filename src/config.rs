use anyhow::Result;
use config as config_loader;
use dotenvy::dotenv;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Global config structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub etherscan: EtherscanConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub hashes: HashesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Etherscan REST API config
#[derive(Debug, Deserialize, Clone)]
pub struct EtherscanConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "EtherscanConfig::default_endpoint_url")]
    pub endpoint_url: String,
    /// Per-request timeout; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl EtherscanConfig {
    fn default_endpoint_url() -> String {
        "https://api.etherscan.io/api".to_string()
    }

    /// The API key is sent with every request, so a run without one is refused.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => anyhow::bail!(
                "Etherscan API key is not configured (set etherscan.api_key or FETCHER__ETHERSCAN__API_KEY)"
            ),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint_url: Self::default_endpoint_url(),
            timeout_secs: None,
        }
    }
}

/// Ethereum JSON-RPC node config
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RpcConfig {
    #[serde(default)]
    pub url: Option<String>,
    /// Per-call timeout; calls wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RpcConfig {
    pub fn require_url(&self) -> Result<&str> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => anyhow::bail!("RPC url is not configured (set rpc.url or FETCHER__RPC__URL)"),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Block reward pipeline config
#[derive(Debug, Deserialize, Clone)]
pub struct RewardsConfig {
    #[serde(default = "RewardsConfig::default_batch_size")]
    pub batch_size: usize,
}

impl RewardsConfig {
    fn default_batch_size() -> usize {
        5
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            batch_size: Self::default_batch_size(),
        }
    }
}

/// Last block hashes pipeline config
#[derive(Debug, Deserialize, Clone)]
pub struct HashesConfig {
    #[serde(default = "HashesConfig::default_begin_block")]
    pub begin_block: u64,
    #[serde(default = "HashesConfig::default_number")]
    pub number: u64,
    #[serde(default = "HashesConfig::default_output_dir")]
    pub output_dir: PathBuf,
}

impl HashesConfig {
    fn default_begin_block() -> u64 {
        7840001
    }
    fn default_number() -> u64 {
        256
    }
    fn default_output_dir() -> PathBuf {
        PathBuf::from("../res")
    }

    /// `<output_dir>/lastHashes<begin_block>`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("lastHashes{}", self.begin_block))
    }
}

impl Default for HashesConfig {
    fn default() -> Self {
        Self {
            begin_block: Self::default_begin_block(),
            number: Self::default_number(),
            output_dir: Self::default_output_dir(),
        }
    }
}

/// Logging config
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    #[serde(default)]
    pub to_file: bool,
    #[serde(default = "LoggingConfig::default_file_path")]
    pub file_path: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
    fn default_file_path() -> String {
        "./logs/fetcher.log".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            to_file: false,
            file_path: Self::default_file_path(),
        }
    }
}

impl AppConfig {
    /// Load config from an optional YAML file overlaid with `FETCHER__*` env vars.
    ///
    /// A missing file is not an error: every setting has a default or can be
    /// supplied through the environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenv().ok(); // Load the .env file

        let builder = config_loader::Config::builder()
            .add_source(
                config_loader::File::from(path.as_ref().to_path_buf()).required(false),
            )
            .add_source(config_loader::Environment::with_prefix("FETCHER").separator("__"))
            .build()?;

        Ok(builder.try_deserialize::<AppConfig>()?)
    }
}
