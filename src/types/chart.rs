//! Series and geometry types passed between the pipeline and renderers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One labelled value in a series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Ordered (label, value) pairs with unique labels
///
/// Order is first-encounter order as produced by the aggregator; the layout
/// engine does the sorting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(SeriesPoint {
            label: label.into(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesPoint> {
        self.points.iter()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.value)
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (label, value) in iter {
            series.push(label, value);
        }
        series
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Available drawing area, in surface units (pixels, cells, ...)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot area for axes and labels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 30.0,
            bottom: 120.0,
            left: 70.0,
        }
    }
}

/// Paint-ready bar rectangle in viewport coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarGeometry {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

impl BarGeometry {
    /// Horizontal center of the bar
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Axis label under a bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelAnchor {
    /// Possibly truncated text to draw
    pub text: String,
    /// Untruncated label, for tooltips
    pub full_text: String,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees around (x, y); 0 means horizontal
    pub rotation: f64,
}

/// One scale tick; `position` is relative to the top of the plot area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Tick {
    /// Rounded for display
    pub value: f64,
    pub position: f64,
}

/// Horizontal grid line at a tick, in viewport coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridLine {
    pub value: f64,
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
}

/// One calendar day's event count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: u64,
}
