//! Aggregator service for turning records into chart series

use crate::services::normalizer::label_from_path;
use crate::types::{Group, Record, Series, SKILL_PREFIX};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

/// How a group of amounts collapses into one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    Sum,
    /// Best value; repeated submissions do not inflate the result
    Max,
    /// Number of records in the group
    Count,
}

/// Which record types an aggregation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindMatch {
    Exact(&'static str),
    Prefix(&'static str),
}

/// Validity rule applied to `amount`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRule {
    Finite,
    NonNegative,
    Positive,
}

/// Type and validity predicate; records failing it are silently excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFilter {
    pub kind: KindMatch,
    pub amount: AmountRule,
}

impl RecordFilter {
    pub const XP: Self = Self {
        kind: KindMatch::Exact("xp"),
        amount: AmountRule::Positive,
    };

    pub const SKILLS: Self = Self {
        kind: KindMatch::Prefix(SKILL_PREFIX),
        amount: AmountRule::NonNegative,
    };

    pub fn exact(kind: &'static str, amount: AmountRule) -> Self {
        Self {
            kind: KindMatch::Exact(kind),
            amount,
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        let kind_ok = match self.kind {
            KindMatch::Exact(kind) => record.kind == kind,
            KindMatch::Prefix(prefix) => record.kind.starts_with(prefix),
        };
        kind_ok && self.amount_ok(record.amount)
    }

    fn amount_ok(&self, amount: f64) -> bool {
        if !amount.is_finite() {
            return false;
        }
        match self.amount {
            AmountRule::Finite => true,
            AmountRule::NonNegative => amount >= 0.0,
            AmountRule::Positive => amount > 0.0,
        }
    }
}

/// Aggregator for computing chart series
pub struct Aggregator;

impl Aggregator {
    /// Filter, group by `key` and reduce.
    ///
    /// The returned series is in first-encounter order of each key.
    pub fn aggregate<K>(records: &[Record], filter: RecordFilter, key: K, reduce: Reduce) -> Series
    where
        K: Fn(&Record) -> String,
    {
        let accepted: Vec<&Record> = records.iter().filter(|r| filter.accepts(r)).collect();
        let excluded = records.len() - accepted.len();
        if excluded > 0 {
            tracing::debug!(excluded, ?filter, "records excluded from aggregation");
        }
        Self::reduce_pairs(accepted.into_iter().map(|r| (key(r), r.amount)), reduce)
    }

    /// Reduce `(key, amount)` pairs into a series keyed in encounter order
    pub fn reduce_pairs<I>(pairs: I, reduce: Reduce) -> Series
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, f64)> = Vec::new();

        for (key, amount) in pairs {
            match index.get(&key) {
                Some(&i) => {
                    let value = &mut groups[i].1;
                    *value = match reduce {
                        Reduce::Sum => *value + amount,
                        Reduce::Max => value.max(amount),
                        Reduce::Count => *value + 1.0,
                    };
                }
                None => {
                    let initial = match reduce {
                        Reduce::Sum | Reduce::Max => amount,
                        Reduce::Count => 1.0,
                    };
                    index.insert(key.clone(), groups.len());
                    groups.push((key, initial));
                }
            }
        }

        groups.into_iter().collect()
    }

    /// XP summed per project label
    pub fn xp_by_project(records: &[Record]) -> Series {
        Self::aggregate(
            records,
            RecordFilter::XP,
            |r| label_from_path(r.path.as_deref()),
            Reduce::Sum,
        )
    }

    /// Best score per skill
    pub fn best_skills(records: &[Record]) -> Series {
        Self::aggregate(
            records,
            RecordFilter::SKILLS,
            |r| label_from_path(r.skill_name()),
            Reduce::Max,
        )
    }

    /// How often each other login shares a group with `login`.
    ///
    /// Counts once per shared group, so repeated co-membership accumulates.
    pub fn collaborators(groups: &[Group], login: &str) -> Series {
        let pairs = groups.iter().flat_map(|group| {
            let mut seen: HashSet<&str> = HashSet::new();
            group
                .members
                .iter()
                .map(|m| m.trim())
                .filter(move |m| !m.is_empty() && *m != login && seen.insert(*m))
                .map(|m| (m.to_string(), 1.0))
                .collect::<Vec<_>>()
        });
        Self::reduce_pairs(pairs, Reduce::Count)
    }

    /// Records per UTC day (sorted by date ascending)
    pub fn daily_activity(records: &[Record]) -> Vec<(NaiveDate, u64)> {
        let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for record in records {
            let count = days.entry(record.day()).or_insert(0);
            *count = count.saturating_add(1);
        }
        days.into_iter().collect()
    }

    /// Sum of amounts accepted by `filter`
    pub fn total(records: &[Record], filter: RecordFilter) -> f64 {
        records
            .iter()
            .filter(|r| filter.accepts(r))
            .map(|r| r.amount)
            .sum()
    }
}
