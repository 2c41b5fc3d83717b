use super::Renderer;
use crate::services::DashboardView;
use crate::types::{Result, XpchartError};

/// Emits the full view (geometry, ticks, buckets, messages) as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    fn render(&self, view: &DashboardView<'_>) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(view)
        } else {
            serde_json::to_string(view)
        };
        output.map_err(|e| XpchartError::Render(e.to_string()))
    }
}
