//! Configuration schema definitions

use parley_providers::AzureSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persona preamble seeded as the system message of every session
pub const DEFAULT_PERSONA: &str = "You are Clippy, the iconic Microsoft Office assistant! \
     You're helpful, friendly, and enthusiastic. \
     You love to assist users with their questions and always try to be encouraging. \
     Keep your responses concise and helpful.";

/// Root configuration for parley
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Completion provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Chat/session settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Resource endpoint URL. Required at session-creation time.
    #[serde(default)]
    pub endpoint: String,
    /// API credential. Required at session-creation time.
    #[serde(default)]
    pub api_key: String,
    /// Deployment (model) name
    #[serde(default = "default_deployment")]
    pub deployment: String,
    /// Azure API version
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Bound on a single remote completion call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_deployment() -> String {
    "gpt-4o".to_string()
}

fn default_api_version() -> String {
    "2024-02-15-preview".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: default_deployment(),
            api_version: default_api_version(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Connection settings for the Azure completion client
    pub fn azure_settings(&self) -> AzureSettings {
        AzureSettings {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            deployment: self.deployment.clone(),
            api_version: self.api_version.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Chat/session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System persona seeded into every session
    #[serde(default = "default_persona")]
    pub persona: String,
    /// Optional cap on concurrently live sessions; unbounded when absent
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            max_sessions: None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional directory of static web assets served at `/`
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}
