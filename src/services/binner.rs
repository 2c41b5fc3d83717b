//! Date-range binning for the activity heatmap

use crate::types::DayBucket;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Trailing window used by the activity view
pub const DEFAULT_WINDOW_DAYS: u32 = 180;

/// Longest window accepted from config or the command line (about ten years)
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Heatmap intensity level relative to the busiest day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapLevel {
    /// No activity
    None,
    /// Up to 25% of the max
    Low,
    /// Up to 50%
    Medium,
    /// Up to 75%
    High,
    /// Above 75%
    Max,
}

impl HeatmapLevel {
    fn from_ratio(ratio: f64) -> Self {
        if ratio <= 0.0 {
            Self::None
        } else if ratio <= 0.25 {
            Self::Low
        } else if ratio <= 0.5 {
            Self::Medium
        } else if ratio <= 0.75 {
            Self::High
        } else {
            Self::Max
        }
    }
}

/// Dense, ascending day-by-day counts over a trailing window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBuckets {
    buckets: Vec<DayBucket>,
    max_count: u64,
}

impl DayBuckets {
    pub fn buckets(&self) -> &[DayBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Sum of all counts in the window
    pub fn total(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.count))
    }

    /// Days with at least one event
    pub fn active_days(&self) -> usize {
        self.buckets.iter().filter(|b| b.count > 0).count()
    }

    /// `count / max_count`, or 0 when the window has no activity
    pub fn intensity(&self, count: u64) -> f64 {
        if self.max_count == 0 {
            return 0.0;
        }
        (count as f64 / self.max_count as f64).min(1.0)
    }

    pub fn level(&self, count: u64) -> HeatmapLevel {
        HeatmapLevel::from_ratio(self.intensity(count))
    }

    /// Arrange the window into Monday-first week columns.
    ///
    /// Each column holds 7 cells; days before the window start or after its
    /// end are `None`.
    pub fn weeks(&self) -> Vec<[Option<DayBucket>; 7]> {
        let Some(first) = self.buckets.first() else {
            return Vec::new();
        };

        let lead = first.date.weekday().num_days_from_monday() as usize;
        let mut columns: Vec<[Option<DayBucket>; 7]> = Vec::new();

        for (i, bucket) in self.buckets.iter().enumerate() {
            let slot = lead + i;
            let (week, day) = (slot / 7, slot % 7);
            if week == columns.len() {
                columns.push([None; 7]);
            }
            columns[week][day] = Some(*bucket);
        }

        columns
    }
}

/// Build `window_days + 1` buckets ending at `anchor`.
///
/// Observations on the same day are summed; observations outside the window
/// are ignored. The last bucket is always `anchor`; near the start of the
/// calendar the window is cut short instead.
pub fn bin_by_day(observations: &[(NaiveDate, u64)], window_days: u32, anchor: NaiveDate) -> DayBuckets {
    let start = anchor
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);

    let mut counts: HashMap<NaiveDate, u64> = HashMap::with_capacity(observations.len());
    for &(date, count) in observations {
        if date < start || date > anchor {
            continue;
        }
        let slot = counts.entry(date).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    let buckets: Vec<DayBucket> = start
        .iter_days()
        .take(days_inclusive(start, anchor))
        .map(|date| DayBucket {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect();

    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0);

    DayBuckets { buckets, max_count }
}

fn days_inclusive(start: NaiveDate, end: NaiveDate) -> usize {
    usize::try_from((end - start).num_days()).map_or(0, |days| days + 1)
}
