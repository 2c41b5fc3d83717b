//! Dashboard pipeline: aggregate once, lay out per viewport

use crate::config::ChartConfig;
use crate::services::aggregator::Aggregator;
use crate::services::binner::{bin_by_day, DayBuckets};
use crate::services::layout::{layout, ChartLayout};
use crate::services::snapshot::Snapshot;
use crate::services::summary::ProfileSummary;
use crate::types::{LayoutError, Series, Viewport};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Which chart a series feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Xp,
    Skills,
    Collaborators,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Xp => "XP by project",
            Self::Skills => "Best skills",
            Self::Collaborators => "Frequent collaborators",
        }
    }

    fn top_n(&self, config: &ChartConfig) -> usize {
        match self {
            Self::Xp => config.xp_top_n,
            Self::Skills => config.skills_top_n,
            Self::Collaborators => config.collaborators_top_n,
        }
    }
}

/// Aggregated series for one profile, reusable across resizes
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub login: String,
    pub summary: ProfileSummary,
    pub xp: Series,
    pub skills: Series,
    pub collaborators: Series,
    pub activity: DayBuckets,
}

impl DashboardData {
    pub fn from_snapshot(snapshot: &Snapshot, config: &ChartConfig, today: NaiveDate) -> Self {
        let records = &snapshot.transactions;
        let activity = bin_by_day(
            &Aggregator::daily_activity(records),
            config.activity_window_days,
            today,
        );

        Self {
            login: snapshot.login.clone(),
            summary: ProfileSummary::from_records(records, config.piscine_xp_target),
            xp: Aggregator::xp_by_project(records),
            skills: Aggregator::best_skills(records),
            collaborators: Aggregator::collaborators(&snapshot.groups, &snapshot.login),
            activity,
        }
    }

    pub fn series(&self, kind: ChartKind) -> &Series {
        match kind {
            ChartKind::Xp => &self.xp,
            ChartKind::Skills => &self.skills,
            ChartKind::Collaborators => &self.collaborators,
        }
    }

    /// Lay out every chart for `viewport`; no re-aggregation
    pub fn layout(&self, viewport: Viewport, config: &ChartConfig) -> DashboardView<'_> {
        let charts = [ChartKind::Xp, ChartKind::Skills, ChartKind::Collaborators]
            .into_iter()
            .map(|kind| {
                let outcome = layout(
                    self.series(kind),
                    viewport,
                    config.margins,
                    config.layout_options(kind.top_n(config)),
                );
                if let Err(e) = &outcome {
                    tracing::debug!(chart = ?kind, error = %e, "chart not drawable");
                }
                ChartView { kind, outcome }
            })
            .collect();

        DashboardView {
            login: &self.login,
            viewport,
            summary: &self.summary,
            charts,
            activity: &self.activity,
        }
    }
}

/// One chart's layout result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub kind: ChartKind,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<ChartLayout, LayoutError>,
}

impl ChartView {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

fn serialize_outcome<S: Serializer>(
    outcome: &Result<ChartLayout, LayoutError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(tag = "status", rename_all = "snake_case")]
    enum Outcome<'a> {
        Ok {
            layout: &'a ChartLayout,
        },
        Unavailable {
            error: &'a LayoutError,
            message: &'static str,
        },
    }

    match outcome {
        Ok(layout) => Outcome::Ok { layout }.serialize(serializer),
        Err(error) => Outcome::Unavailable {
            error,
            message: error.message(),
        }
        .serialize(serializer),
    }
}

/// Everything a renderer needs for one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView<'a> {
    pub login: &'a str,
    pub viewport: Viewport,
    pub summary: &'a ProfileSummary,
    pub charts: Vec<ChartView>,
    pub activity: &'a DayBuckets,
}
