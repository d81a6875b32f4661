//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/neptune-mcp/config.toml` (XDG) or platform config dir
//! 2. Environment variables: `NEPTUNE_*` and `NEPTUNE_MCP_AWS_*`
//!
//! # Intended Usage
//!
//! **Global config** (`~/.config/neptune-mcp/config.toml`):
//! ```toml
//! [neptune]
//! endpoint = "neptune-db://my-cluster.cluster-abc.us-east-1.neptune.amazonaws.com"
//! port = 8182
//! use_https = true
//!
//! [aws]
//! profile = "graph-admin"
//! region = "us-east-1"
//! ```
//!
//! **Environment** (what most MCP client configs set):
//! ```text
//! NEPTUNE_ENDPOINT=neptune-graph://g-abc123
//! NEPTUNE_PORT=8182
//! NEPTUNE_USE_HTTPS=true
//! ```

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer};

/// Default Neptune HTTP port.
pub const DEFAULT_PORT: u16 = 8182;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub neptune: NeptuneConfig,
    #[serde(default)]
    pub aws: AwsConfig,
}

/// Neptune connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NeptuneConfig {
    /// Endpoint in the form `neptune-db://<host>` or `neptune-graph://<graph-id>`.
    ///
    /// Optional at load time; required on first use of the graph.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Port for Neptune Database endpoints (ignored for Neptune Analytics).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether to connect to Neptune Database over HTTPS.
    #[serde(default = "default_use_https", deserialize_with = "deserialize_flag")]
    pub use_https: bool,
}

impl Default for NeptuneConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            port: DEFAULT_PORT,
            use_https: true,
        }
    }
}

/// AWS SDK overrides. Anything unset falls back to the default provider chain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AwsConfig {
    /// Named profile from the shared AWS config/credentials files.
    #[serde(default)]
    pub profile: Option<String>,
    /// Region override (e.g. `us-east-1`).
    #[serde(default)]
    pub region: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_use_https() -> bool {
    true
}

/// Lenient boolean: `true`/`1`/`t` (any case) are true, everything else is false.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i == 1,
        Flag::Text(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "t"),
    })
}

impl Config {
    /// Load config with layered resolution (user → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered figment used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Environment variables (highest priority)
            .merge(Self::env_providers())
    }

    /// Environment providers: `NEPTUNE_*` into `[neptune]`, `NEPTUNE_MCP_AWS_*` into `[aws]`.
    fn env_providers() -> Figment {
        Figment::new()
            .merge(
                Env::prefixed("NEPTUNE_")
                    .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("mcp_"))
                    .map(|key| format!("neptune.{}", key.as_str()).into()),
            )
            .merge(
                Env::prefixed("NEPTUNE_MCP_AWS_")
                    .map(|key| format!("aws.{}", key.as_str()).into()),
            )
    }

    /// Returns the configured endpoint or the error reported when it's missing.
    pub fn endpoint(&self) -> Result<&str, crate::error::AppError> {
        self.neptune.endpoint.as_deref().ok_or_else(|| {
            crate::error::AppError::NotConfigured(
                "NEPTUNE_ENDPOINT environment variable is not set".to_string(),
            )
        })
    }

    /// User config path: ~/.config/neptune-mcp/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("neptune-mcp").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("neptune-mcp").join("config.toml"))
            .unwrap_or_default()
    }
}
