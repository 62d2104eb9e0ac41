//! Calculator configuration
//!
//! Every field has a serde default, so a partial JSON file only
//! overrides what it names.

use homora_core::MAX_DECIMALS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Issue price/decimals lookups for all tokens concurrently.
    /// Accumulation order is the same either way.
    #[serde(default = "default_concurrent_lookups")]
    pub concurrent_lookups: bool,

    /// Largest token precision accepted from the metadata source
    #[serde(default = "default_max_decimals")]
    pub max_decimals: u32,

    /// Round the final APY to this many decimal places (None = exact)
    #[serde(default)]
    pub apy_scale: Option<u32>,
}

fn default_concurrent_lookups() -> bool {
    true
}

fn default_max_decimals() -> u32 {
    MAX_DECIMALS
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            concurrent_lookups: default_concurrent_lookups(),
            max_decimals: default_max_decimals(),
            apy_scale: None,
        }
    }
}

impl CalculatorConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Sequential lookups, one token at a time
    pub fn sequential() -> Self {
        Self {
            concurrent_lookups: false,
            ..Self::default()
        }
    }

    pub fn with_apy_scale(mut self, scale: u32) -> Self {
        self.apy_scale = Some(scale);
        self
    }

    fn validate(&self) -> Result<(), std::io::Error> {
        if self.max_decimals > MAX_DECIMALS {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "max_decimals {} exceeds supported precision {}",
                    self.max_decimals, MAX_DECIMALS
                ),
            ));
        }
        Ok(())
    }
}
