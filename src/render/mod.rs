//! Renderers turning a laid-out dashboard into output text
//!
//! The pipeline only produces geometry; each renderer decides how to paint
//! it. Swap implementations without touching aggregation or layout.

mod heatmap;
mod json;
mod terminal;

pub use heatmap::HeatmapWidget;
pub use json::JsonRenderer;
pub use terminal::{terminal_config, BarChartWidget, TerminalRenderer};

use crate::services::DashboardView;
use crate::types::Result;

/// Paints a dashboard view onto some surface and returns it as text
pub trait Renderer {
    fn render(&self, view: &DashboardView<'_>) -> Result<String>;
}
