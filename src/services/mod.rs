//! Services for aggregation, scaling, layout and binning

pub mod aggregator;
pub mod binner;
pub mod dashboard;
pub mod layout;
pub mod normalizer;
pub mod scale;
pub mod snapshot;
pub mod summary;

pub use aggregator::{Aggregator, Reduce, RecordFilter};
pub use binner::{bin_by_day, DayBuckets, HeatmapLevel};
pub use dashboard::{ChartKind, ChartView, DashboardData, DashboardView};
pub use layout::{layout, ChartLayout, LayoutOptions};
pub use normalizer::{label_from_path, truncate_label};
pub use scale::{build_scale, Scale};
pub use snapshot::Snapshot;
pub use summary::ProfileSummary;
