//! Comparison configuration
//!
//! Read from JSON (all fields optional) and overridable from environment
//! variables: ANNUAL_PREMIUM, MIN_ANNUAL_PREMIUM, CUSTOM_YEARS, CUSTOMER_AGE.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::path::Path;

use crate::comparison::{DEFAULT_STANDARD_PREMIUM, MIN_ANNUAL_PREMIUM};
use crate::error::Result;

/// Settings for building a company comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Customer's annual premium; tables are rescaled to it (default: 10000)
    #[serde(default = "default_annual_premium")]
    pub annual_premium: f64,

    /// Smallest accepted annual premium (default: 2000)
    #[serde(default = "default_min_annual_premium")]
    pub min_annual_premium: f64,

    /// Free-text list of policy years, e.g. "1, 5，10 20"
    #[serde(default)]
    pub custom_years: Option<String>,

    /// Customer's current age, used for the attained-age column
    #[serde(default)]
    pub customer_age: Option<u32>,
}

fn default_annual_premium() -> f64 { DEFAULT_STANDARD_PREMIUM }
fn default_min_annual_premium() -> f64 { MIN_ANNUAL_PREMIUM }

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            annual_premium: default_annual_premium(),
            min_annual_premium: default_min_annual_premium(),
            custom_years: None,
            customer_age: None,
        }
    }
}

impl ComparisonConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Defaults overridden by any environment variables that are set
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides; unparsable values are ignored
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ANNUAL_PREMIUM").and_then(|s| s.parse().ok()) {
            self.annual_premium = v;
        }
        if let Some(v) = lookup("MIN_ANNUAL_PREMIUM").and_then(|s| s.parse().ok()) {
            self.min_annual_premium = v;
        }
        if let Some(v) = lookup("CUSTOM_YEARS") {
            self.custom_years = Some(v);
        }
        if let Some(v) = lookup("CUSTOMER_AGE").and_then(|s| s.parse().ok()) {
            self.customer_age = Some(v);
        }
        self
    }
}
