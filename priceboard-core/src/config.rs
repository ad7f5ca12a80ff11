//! Ticker map configuration — ordered company → symbol pairs.
//!
//! Stored as a TOML array-of-tables so insertion order survives a
//! load/save roundtrip. Row order of the price table follows this order.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Ticker map load/save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read ticker map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse ticker map TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize ticker map: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("duplicate company label '{0}'")]
    DuplicateLabel(String),
}

/// One configured company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub label: String,
    pub symbol: String,
}

/// The ordered set of companies to track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMap {
    pub companies: Vec<TickerEntry>,
}

impl TickerMap {
    /// Load a ticker map from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a ticker map from a TOML string. Duplicate labels are rejected.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let map: Self = toml::from_str(content)?;
        let mut seen = std::collections::HashSet::new();
        for entry in &map.companies {
            if !seen.insert(entry.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(entry.label.clone()));
            }
        }
        Ok(map)
    }

    /// Serialize the ticker map to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Company labels in configured order.
    pub fn labels(&self) -> Vec<&str> {
        self.companies.iter().map(|e| e.label.as_str()).collect()
    }

    /// Exchange symbol for a company label.
    pub fn symbol_for(&self, label: &str) -> Option<&str> {
        self.companies
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerEntry> {
        self.companies.iter()
    }

    /// Stable identity hash over (label, symbol) pairs, for cache keying.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for entry in &self.companies {
            hasher.update(entry.label.as_bytes());
            hasher.update(b"\0");
            hasher.update(entry.symbol.as_bytes());
            hasher.update(b"\0");
        }
        hasher.finalize().to_hex().to_string()
    }

    /// The default large-cap US map: twelve companies.
    pub fn default_us() -> Self {
        let pairs = [
            ("google", "GOOGL"),
            ("amazon", "AMZN"),
            ("meta", "META"),
            ("apple", "AAPL"),
            ("microsoft", "MSFT"),
            ("netflix", "NFLX"),
            ("baidu", "BIDU"),
            ("alibaba", "BABA"),
            ("tencent", "TCEHY"),
            ("berkshire", "BRK-B"),
            ("tesla", "TSLA"),
            ("nvidia", "NVDA"),
        ];
        Self {
            companies: pairs
                .into_iter()
                .map(|(label, symbol)| TickerEntry {
                    label: label.to_string(),
                    symbol: symbol.to_string(),
                })
                .collect(),
        }
    }
}
