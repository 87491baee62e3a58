use reqwest::Url;
use std::env;
use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_PATH: &str = "/kenopi/chat";
pub const DEFAULT_ADVANCED_CHAT_PATH: &str = "/kenopi/chat/advanced";

/// Defaults shipped with the binary, for targets without a `.env` file.
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Where chat requests go. Read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
    pub backend_url: String,
    pub chat_path: String,
    pub advanced_chat_path: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            advanced_chat_path: DEFAULT_ADVANCED_CHAT_PATH.to_string(),
        }
    }
}

impl ChatConfig {
    /// Process environment first, then the bundled `config.env`.
    pub fn from_env() -> Self {
        let bundled = parse_env_file(BUNDLED_CONFIG);
        Self::from_lookup(|key| {
            env::var(key).ok().or_else(|| {
                bundled
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| value.clone())
            })
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, fallback: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            backend_url: read("NOPI_BACKEND_URL", DEFAULT_BACKEND_URL),
            chat_path: read("NOPI_CHAT_PATH", DEFAULT_CHAT_PATH),
            advanced_chat_path: read("NOPI_ADVANCED_CHAT_PATH", DEFAULT_ADVANCED_CHAT_PATH),
        }
    }

    /// Full URL for a chat request; the advanced path serves annotated replies.
    pub fn endpoint(&self, show_details: bool) -> Result<Url, ConfigError> {
        let path = if show_details {
            &self.advanced_chat_path
        } else {
            &self.chat_path
        };
        let raw = format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|err| ConfigError::InvalidUrl {
            reason: err.to_string(),
            url: raw,
        })
    }
}

/// Parses `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_file(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
