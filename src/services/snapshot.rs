//! Snapshot loading service
//!
//! Reads an already-fetched profile document. Transactions are decoded one
//! by one so a single malformed entry never sinks the whole snapshot.

use crate::types::{Group, Record, Result, XpchartError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Profile data as delivered by the data-access layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub login: String,
    pub transactions: Vec<Record>,
    pub groups: Vec<Group>,
    /// Transactions dropped because they failed to decode
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    login: String,
    #[serde(default)]
    transactions: Vec<serde_json::Value>,
    #[serde(default)]
    groups: Vec<Group>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawSnapshot =
            serde_json::from_str(content).map_err(|e| XpchartError::Parse(e.to_string()))?;

        let total = raw.transactions.len();
        let transactions: Vec<Record> = raw
            .transactions
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Record>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping invalid record");
                    None
                }
            })
            .collect();
        let skipped = total - transactions.len();
        if skipped > 0 {
            tracing::warn!(skipped, total, "some records could not be decoded");
        }

        Ok(Self {
            login: raw.login,
            transactions,
            groups: raw.groups,
            skipped,
        })
    }
}
