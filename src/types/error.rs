use thiserror::Error;

/// xpchart error types
#[derive(Error, Debug)]
pub enum XpchartError {
    /// Failed to parse a JSON document
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Renderer failed to produce output
    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias for xpchart
pub type Result<T> = std::result::Result<T, XpchartError>;

/// Conditions under which a chart cannot be laid out.
///
/// None of these are faults: each one maps to a substitute message the
/// caller renders in place of the chart.
#[derive(Error, Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutError {
    /// Series had no entries
    #[error("no data")]
    EmptyInput,

    /// Margins leave no room for a plot area
    #[error("chart too small: plot area {width}x{height}")]
    ChartTooSmall { width: f64, height: f64 },

    /// Every kept value is zero
    #[error("all values are zero")]
    AllZero,
}

impl LayoutError {
    /// User-facing text shown instead of the chart
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "No data available",
            Self::ChartTooSmall { .. } => "Window too small to display chart",
            Self::AllZero => "All values are zero",
        }
    }
}
