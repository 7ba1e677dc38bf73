use std::collections::HashMap;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use youtube_client::SubscriptionMatch;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime settings, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub youtube_api_key: String,
    pub youtube_base_url: Option<String>,
    pub gemini_api_key: String,
    pub gemini_base_url: Option<String>,
    pub gemini_model: Option<String>,
    pub auth_tokens: Vec<String>,
    /// Instagram bridge; the `/api/instagram` routes are only served when set
    pub instagram_bridge_url: Option<String>,
    pub instagram_bridge_token: Option<String>,
    pub summary_store_dir: Option<PathBuf>,
    pub summary_comment_limit: usize,
    pub subscription_match: SubscriptionMatch,
    pub http_timeout: Duration,
    pub tls: Option<TlsPaths>,
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from an explicit variable map; blank values count as unset
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let auth_tokens: Vec<String> = require("AUTH_TOKENS")?
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if auth_tokens.is_empty() {
            return Err(ConfigError::Missing("AUTH_TOKENS"));
        }

        let tls = match (get("TLS_CERT_PATH"), get("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "TLS_CERT_PATH",
                    reason: "TLS_CERT_PATH and TLS_KEY_PATH must be set together".to_string(),
                });
            }
        };

        Ok(Self {
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), "0.0.0.0:8000".parse().ok())?,
            youtube_api_key: require("YOUTUBE_API_KEY")?,
            youtube_base_url: get("YOUTUBE_API_BASE_URL"),
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_base_url: get("GEMINI_API_BASE_URL"),
            gemini_model: get("GEMINI_MODEL"),
            auth_tokens,
            instagram_bridge_url: get("INSTAGRAM_BRIDGE_URL"),
            instagram_bridge_token: get("INSTAGRAM_BRIDGE_TOKEN"),
            summary_store_dir: get("SUMMARY_STORE_DIR").map(PathBuf::from),
            summary_comment_limit: parse_or::<NonZeroUsize>(
                "SUMMARY_COMMENT_LIMIT",
                get("SUMMARY_COMMENT_LIMIT"),
                NonZeroUsize::new(comment_service::DEFAULT_SUMMARY_COMMENT_LIMIT),
            )?
            .get(),
            subscription_match: parse_or(
                "SUBSCRIPTION_MATCH",
                get("SUBSCRIPTION_MATCH"),
                Some(SubscriptionMatch::default()),
            )?,
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                Some(30),
            )?),
            tls,
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => default.ok_or(ConfigError::Missing(name)),
    }
}
