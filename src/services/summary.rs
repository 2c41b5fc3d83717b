//! Scalar profile statistics shown next to the charts

use crate::services::aggregator::{Aggregator, AmountRule, RecordFilter};
use crate::types::Record;
use serde::Serialize;

/// XP total treated as 100% piscine progress unless configured otherwise
pub const PISCINE_XP_TARGET: f64 = 1_000_000.0;

/// Path fragment identifying piscine records
const PISCINE_MARKER: &str = "piscine";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub total_xp: f64,
    pub level: f64,
    pub audits_done: f64,
    pub audits_received: f64,
    /// `None` when nothing has been received yet
    pub audit_ratio: Option<f64>,
    /// Percentage in `[0, 100]`
    pub piscine_progress: f64,
}

impl ProfileSummary {
    pub fn from_records(records: &[Record], piscine_xp_target: f64) -> Self {
        let total_xp = Aggregator::total(records, RecordFilter::XP);
        let level = records
            .iter()
            .filter(|r| RecordFilter::exact("level", AmountRule::NonNegative).accepts(r))
            .map(|r| r.amount)
            .fold(0.0_f64, f64::max);
        let audits_done = Aggregator::total(records, RecordFilter::exact("up", AmountRule::Positive));
        let audits_received =
            Aggregator::total(records, RecordFilter::exact("down", AmountRule::Positive));

        let audit_ratio = (audits_received > 0.0).then(|| audits_done / audits_received);

        let piscine_xp: f64 = records
            .iter()
            .filter(|r| RecordFilter::XP.accepts(r))
            .filter(|r| r.path.as_deref().is_some_and(|p| p.contains(PISCINE_MARKER)))
            .map(|r| r.amount)
            .sum();

        Self {
            total_xp,
            level,
            audits_done,
            audits_received,
            audit_ratio,
            piscine_progress: piscine_progress(piscine_xp, piscine_xp_target),
        }
    }
}

/// Percentage of `target` reached, clamped to `[0, 100]`
pub fn piscine_progress(xp: f64, target: f64) -> f64 {
    if !(target.is_finite() && target > 0.0) || !xp.is_finite() {
        return 0.0;
    }
    (xp / target * 100.0).clamp(0.0, 100.0)
}

/// Format an XP amount in size-style units, base 1000 ("1.23 MB")
pub fn format_xp(amount: f64) -> String {
    let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
    if amount < 1_000.0 {
        format!("{} B", amount.round())
    } else if amount < 1_000_000.0 {
        format!("{:.2} kB", amount / 1_000.0)
    } else {
        format!("{:.2} MB", amount / 1_000_000.0)
    }
}
