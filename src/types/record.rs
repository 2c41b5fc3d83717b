//! Inbound record types delivered by the data-access layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single event from the profile's transaction log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Discriminator, e.g. "xp", "up", "down", "level", "skill_go"
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    /// Slash-separated object path, e.g. "/school/piscine-go/quest-01"
    #[serde(default)]
    pub path: Option<String>,
}

impl Record {
    /// UTC calendar day of the event
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Skill name for "skill_*" records
    pub fn skill_name(&self) -> Option<&str> {
        self.kind.strip_prefix(SKILL_PREFIX)
    }
}

/// Type prefix shared by all skill records
pub const SKILL_PREFIX: &str = "skill_";

/// A collaboration group and its member logins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Group {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub members: Vec<String>,
}
