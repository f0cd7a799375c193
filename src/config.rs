//! Configuration management for Transcript Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
/// 20MB
const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory for temporary upload files
    pub dir: PathBuf,
    /// Request body limit for uploads
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            upload: UploadConfig {
                dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .or_else(|| lookup("SERVER_PORT"))
            .and_then(|raw| parse_or_warn("PORT", &raw))
            .unwrap_or(DEFAULT_PORT);

        let max_body_bytes = lookup("MAX_UPLOAD_BYTES")
            .and_then(|raw| parse_or_warn("MAX_UPLOAD_BYTES", &raw))
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            upload: UploadConfig {
                dir: lookup("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
                max_body_bytes,
            },
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
            None
        }
    }
}
