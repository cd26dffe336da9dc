//! # Chaincode Configuration
//!
//! Runtime knobs for the demo chaincode and its local host, read from
//! environment variables.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `CC_MAX_RANGE_SPAN` | 100000 | `max_range_span` |
//! | `CC_MAX_LINE_BYTES` | 65536 | `max_line_bytes` |
//! | `CC_LOG_LEVEL` / `RUST_LOG` | info | `log_level` |
//! | `CC_JSON_LOGS` | false | `json_logs` |
//! | `CC_DATA_DIR` | unset (in-memory) | `data_dir` |

use crate::errors::ConfigError;
use cc_shim::host::HostConfig;
use std::env;
use std::path::PathBuf;

/// Demo chaincode configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Most keys a single `init` or `increase` may touch.
    pub max_range_span: u64,
    /// Longest accepted host request line in bytes.
    pub max_line_bytes: usize,
    /// Log filter directive.
    pub log_level: String,
    /// Emit logs as JSON.
    pub json_logs: bool,
    /// Ledger directory; in-memory ledger when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            max_range_span: 100_000,
            max_line_bytes: HostConfig::default().max_line_bytes,
            log_level: "info".to_string(),
            json_logs: false,
            data_dir: None,
        }
    }
}

impl DemoConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names. Unparsable numbers fall
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            max_range_span: lookup("CC_MAX_RANGE_SPAN")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_range_span),

            max_line_bytes: lookup("CC_MAX_LINE_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_line_bytes),

            log_level: lookup("CC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("CC_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.json_logs),

            data_dir: lookup("CC_DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Reject settings that would make every transaction fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_range_span == 0 {
            return Err(ConfigError::ZeroRangeSpan);
        }
        if self.max_line_bytes == 0 {
            return Err(ConfigError::ZeroLineLimit);
        }
        Ok(())
    }

    /// Host loop settings.
    #[must_use]
    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            max_line_bytes: self.max_line_bytes,
        }
    }
}
