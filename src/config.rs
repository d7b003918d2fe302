//! Exporter configuration.
//!
//! The Nagios API key lives in a small TOML file so it never shows up in
//! `ps` output:
//!
//! ```toml
//! APIKey = "0123456789abcdef"
//! ```
//!
//! `NAGIOS_EXPORTER_APIKEY` in the environment overrides the file.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use thiserror::Error;

/// Environment prefix for overrides, e.g. `NAGIOS_EXPORTER_APIKEY`.
pub const ENV_PREFIX: &str = "NAGIOS_EXPORTER";

/// Keys accepted for the API key. The environment source lowercases its
/// keys, so the lowercase spellings come first and win over the file.
const API_KEY_KEYS: &[&str] = &["apikey", "api_key", "APIKey", "APIKEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config file {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("No API key found in {} (expected an `APIKey` entry)", .0.display())]
    MissingApiKey(PathBuf),

    #[error("Invalid listen address {addr}: {reason}")]
    InvalidListenAddress { addr: String, reason: String },
}

/// Read the Nagios API key from `path`, honouring environment overrides.
pub fn load_api_key(path: &Path) -> Result<String, ConfigError> {
    load_api_key_with(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_api_key_with(path: &Path, env: Environment) -> Result<String, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(true))
        .add_source(env)
        .build()
        .map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;

    API_KEY_KEYS
        .iter()
        .find_map(|key| {
            config
                .get_string(key)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
        .ok_or_else(|| ConfigError::MissingApiKey(path.to_path_buf()))
}

/// Normalise a listen address. A bare `:port` binds every interface; a
/// host name such as `localhost:9111` is kept and resolved at bind time.
pub fn listen_address(addr: &str) -> Result<String, ConfigError> {
    let addr = addr.trim();
    let full = match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    };

    let invalid = |reason: &str| ConfigError::InvalidListenAddress {
        addr: addr.to_string(),
        reason: reason.to_string(),
    };
    let (host, port) = full.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    port.parse::<u16>()
        .map_err(|e| invalid(&format!("invalid port {port:?}: {e}")))?;
    Ok(full)
}

/// Ensure the telemetry path is absolute.
pub fn metrics_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
