use std::env;

use recordgen_core::schema::{PrimaryThroughput, ThroughputUnits};

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Read units used when `primary` has no table config (default: 5)
    pub default_read_units: u64,
    /// Write units used when `primary` has no table config (default: 2)
    pub default_write_units: u64,
    /// Report a missing `primary` table config instead of defaulting (default: false)
    pub require_primary_throughput: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RECORDGEN_DEFAULT_READ_UNITS` - Default primary read units (default: 5)
    /// - `RECORDGEN_DEFAULT_WRITE_UNITS` - Default primary write units (default: 2)
    /// - `RECORDGEN_REQUIRE_PRIMARY_THROUGHPUT` - `true` to require `primary` (default: false)
    pub fn from_env() -> Self {
        Self {
            default_read_units: env::var("RECORDGEN_DEFAULT_READ_UNITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            default_write_units: env::var("RECORDGEN_DEFAULT_WRITE_UNITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            require_primary_throughput: env::var("RECORDGEN_REQUIRE_PRIMARY_THROUGHPUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Policy for a missing `primary` table config.
    pub fn primary_throughput(&self) -> PrimaryThroughput {
        if self.require_primary_throughput {
            PrimaryThroughput::Required
        } else {
            PrimaryThroughput::Default(ThroughputUnits::new(
                self.default_read_units,
                self.default_write_units,
            ))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
