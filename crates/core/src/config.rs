use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub position_managers: Vec<PositionManagerConfig>,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_explorer_chain")]
    pub default_chain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default = "default_batched_method")]
    pub batched_method: String,
    #[serde(default = "default_swap_methods")]
    pub swap_methods: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionManagerConfig {
    pub address: String,
    pub project_id: String,
    #[serde(default)]
    pub chain: Option<String>,
    /// Token credited for `unwrapWETH9` minimums.
    pub wrapped_native: String,
    /// Pair used for add-liquidity amounts when the call does not name its tokens.
    #[serde(default)]
    pub default_pair: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub add: Option<Vec<String>>,
    #[serde(default)]
    pub remove: Option<Vec<String>>,
    #[serde(default)]
    pub fee_only: Option<Vec<String>>,
    #[serde(default)]
    pub unwrap: Option<String>,
    #[serde(default)]
    pub sweep: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub metrics_enabled: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("RADAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_chain: default_explorer_chain(),
        }
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            batched_method: default_batched_method(),
            swap_methods: default_swap_methods(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            log_level: default_log_level(),
        }
    }
}

fn default_explorer_chain() -> String {
    "hyper".to_string()
}

fn default_batched_method() -> String {
    "multicall".to_string()
}

fn default_swap_methods() -> Vec<String> {
    vec!["exactInputSingle".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}
