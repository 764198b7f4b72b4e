//! Runtime settings, read with the `config` crate.
//!
//! Sources are layered in this order, later ones winning:
//! * built-in defaults;
//! * `dataident.toml` in the working directory (optional), or an explicit file;
//! * environment variables prefixed `DATAIDENT`, with `__` separating nested
//!   keys (e.g. `DATAIDENT__CODEC__MAX_STRING_KEY_LEN=4096`).

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "dataident";
pub const ENV_PREFIX: &str = "DATAIDENT";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodecSettings {
    /// Longest string key, in bytes, a reader accepts before calling the stream malformed.
    pub max_string_key_len: usize,
}
impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            max_string_key_len: 1 << 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// A `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub codec: CodecSettings,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: String::from("info"),
            codec: CodecSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` when given (the file must exist), otherwise from
    /// the optional default file, then applies environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
