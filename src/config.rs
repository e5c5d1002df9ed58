//! Runtime configuration loaded from environment variables.

/// Default size limit for input files.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 200;

/// Default `tracing` filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Files larger than this are rejected before parsing.
    pub max_file_size_mb: u64,
    /// `tracing-subscriber` env filter directive.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_file_size_mb: var("IFC_MAX_FILE_SIZE_MB")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB),
            log_filter: var("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        }
    }

    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}
