use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_VISION_MODEL: &str = "llava:7b";
pub const DEFAULT_TEXT_MODEL: &str = "mistral";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_host: String,
    pub vision_model: String,
    pub text_model: String,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let ollama_host = get("OLLAMA_HOST", DEFAULT_OLLAMA_HOST)
            .trim_end_matches('/')
            .to_string();

        let bind_addr = get("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR is not a valid socket address: {}", bind_addr))?;

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a byte count: {}", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            ollama_host,
            vision_model: get("VISION_MODEL", DEFAULT_VISION_MODEL),
            text_model: get("TEXT_MODEL", DEFAULT_TEXT_MODEL),
            bind_addr,
            max_upload_bytes,
        })
    }
}
