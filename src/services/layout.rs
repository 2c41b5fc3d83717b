//! Bar chart layout engine
//!
//! Turns a series into paint-ready geometry for a given viewport. All
//! output coordinates are in viewport space, with the plot area offset by
//! the margins.

use crate::services::normalizer::truncate_label;
use crate::services::scale::{build_scale, Scale};
use crate::types::{BarGeometry, GridLine, LabelAnchor, LayoutError, Margins, Series, SeriesPoint, Viewport};
use serde::Serialize;

/// Fraction of each slot left empty around the bar
pub const BAR_PADDING: f64 = 0.3;

/// Labels longer than this are cut with an ellipsis
pub const LABEL_MAX_CHARS: usize = 15;

/// Rotation applied to labels that do not fit their slot
pub const LABEL_ROTATION_DEG: f64 = -45.0;

/// Gap between the plot bottom and the label anchor
pub const LABEL_OFFSET: f64 = 10.0;

/// Estimated advance of one label character, in viewport units
pub const LABEL_CHAR_WIDTH: f64 = 7.0;

pub const DEFAULT_TICK_COUNT: usize = 5;

/// Presentation policy for one chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutOptions {
    pub top_n: usize,
    pub padding: f64,
    pub tick_count: usize,
    pub label_max_chars: usize,
    pub label_rotation: f64,
    pub label_offset: f64,
    pub label_char_width: f64,
}

impl LayoutOptions {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            ..Self::default()
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            padding: BAR_PADDING,
            tick_count: DEFAULT_TICK_COUNT,
            label_max_chars: LABEL_MAX_CHARS,
            label_rotation: LABEL_ROTATION_DEG,
            label_offset: LABEL_OFFSET,
            label_char_width: LABEL_CHAR_WIDTH,
        }
    }
}

/// Plot area inside the margins, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Complete geometry for one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub plot: PlotArea,
    pub bars: Vec<BarGeometry>,
    pub labels: Vec<LabelAnchor>,
    pub grid_lines: Vec<GridLine>,
    pub scale: Scale,
}

/// Compute the plot area, or `ChartTooSmall` when margins consume it
pub fn plot_area(viewport: Viewport, margins: Margins) -> Result<PlotArea, LayoutError> {
    let width = viewport.width - margins.left - margins.right;
    let height = viewport.height - margins.top - margins.bottom;
    // NaN dimensions fail the comparison and count as too small
    if !(width > 0.0 && height > 0.0) {
        return Err(LayoutError::ChartTooSmall { width, height });
    }
    Ok(PlotArea {
        x: margins.left,
        y: margins.top,
        width,
        height,
    })
}

/// Keep the `top_n` highest entries, descending; ties keep encounter order
pub fn top_entries(series: &Series, top_n: usize) -> Vec<&SeriesPoint> {
    let mut entries: Vec<&SeriesPoint> = series.iter().collect();
    // Stable sort preserves encounter order among equal values
    entries.sort_by(|a, b| sanitize(b.value).total_cmp(&sanitize(a.value)));
    entries.truncate(top_n);
    entries
}

/// NaN, negatives and -0.0 sort and draw as zero
fn sanitize(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Lay out a bar chart.
///
/// Checks run in order: viewport size, empty series, all-zero values.
pub fn layout(
    series: &Series,
    viewport: Viewport,
    margins: Margins,
    options: LayoutOptions,
) -> Result<ChartLayout, LayoutError> {
    let plot = plot_area(viewport, margins)?;

    let entries = top_entries(series, options.top_n);
    if entries.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    let max_value = entries
        .iter()
        .map(|p| sanitize(p.value))
        .fold(0.0_f64, f64::max);
    if max_value <= 0.0 {
        return Err(LayoutError::AllZero);
    }

    let scale = build_scale(max_value, options.tick_count, plot.height);

    let slot_width = plot.width / entries.len() as f64;
    let padding = options.padding.clamp(0.0, 1.0);
    let bar_width = slot_width * (1.0 - padding);
    let rotate = entries
        .iter()
        .map(|p| truncate_label(&p.label, options.label_max_chars).chars().count())
        .max()
        .is_some_and(|chars| chars as f64 * options.label_char_width > slot_width);

    let mut bars = Vec::with_capacity(entries.len());
    let mut labels = Vec::with_capacity(entries.len());

    for (i, point) in entries.iter().enumerate() {
        let value = sanitize(point.value);
        let top = scale.to_position(value);
        let height = (plot.height - top).max(0.0);
        let slot_x = plot.x + i as f64 * slot_width;
        let bar = BarGeometry {
            label: point.label.clone(),
            x: slot_x + (slot_width - bar_width) / 2.0,
            y: plot.y + plot.height - height,
            width: bar_width.max(0.0),
            height,
            value: point.value,
        };

        labels.push(LabelAnchor {
            text: truncate_label(&point.label, options.label_max_chars),
            full_text: point.label.clone(),
            x: bar.center_x(),
            y: plot.bottom() + options.label_offset,
            rotation: if rotate { options.label_rotation } else { 0.0 },
        });
        bars.push(bar);
    }

    let grid_lines = scale
        .ticks()
        .iter()
        .map(|tick| GridLine {
            value: tick.value,
            y: plot.y + tick.position,
            x1: plot.x,
            x2: plot.right(),
        })
        .collect();

    tracing::debug!(bars = bars.len(), rotate, max_value, "chart laid out");

    Ok(ChartLayout {
        plot,
        bars,
        labels,
        grid_lines,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(&str, f64)]) -> Series {
        pairs.iter().map(|&(l, v)| (l, v)).collect()
    }

    fn big_viewport() -> Viewport {
        Viewport::new(800.0, 400.0)
    }

    // ========== error conditions ==========

    #[test]
    fn test_margins_exceed_viewport() {
        let margins = Margins {
            left: 70.0,
            right: 30.0,
            top: 40.0,
            bottom: 120.0,
        };
        let result = layout(
            &series(&[("A", 1.0)]),
            Viewport::new(10.0, 10.0),
            margins,
            LayoutOptions::new(10),
        );
        assert!(matches!(result, Err(LayoutError::ChartTooSmall { .. })));
    }

    #[test]
    fn test_zero_height_plot_is_too_small() {
        let result = layout(
            &series(&[("A", 1.0)]),
            Viewport::new(800.0, 160.0),
            Margins::default(),
            LayoutOptions::default(),
        );
        assert!(matches!(result, Err(LayoutError::ChartTooSmall { .. })));
    }

    #[test]
    fn test_too_small_checked_before_empty() {
        let result = layout(
            &Series::new(),
            Viewport::new(10.0, 10.0),
            Margins::default(),
            LayoutOptions::default(),
        );
        assert!(matches!(result, Err(LayoutError::ChartTooSmall { .. })));
    }

    #[test]
    fn test_empty_series() {
        let result = layout(&Series::new(), big_viewport(), Margins::default(), LayoutOptions::default());
        assert_eq!(result.unwrap_err(), LayoutError::EmptyInput);
    }

    #[test]
    fn test_top_n_zero_is_empty() {
        let result = layout(&series(&[("A", 1.0)]), big_viewport(), Margins::default(), LayoutOptions::new(0));
        assert_eq!(result.unwrap_err(), LayoutError::EmptyInput);
    }

    #[test]
    fn test_all_zero_distinct_from_too_small() {
        let result = layout(
            &series(&[("A", 0.0), ("B", 0.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        );
        assert_eq!(result.unwrap_err(), LayoutError::AllZero);
    }

    // ========== ordering and truncation ==========

    #[test]
    fn test_top_n_with_tie_keeps_encounter_order() {
        let result = layout(
            &series(&[("A", 100.0), ("B", 50.0), ("C", 50.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::new(2),
        )
        .unwrap();

        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[0].label, "A");
        assert_eq!(result.bars[1].label, "B");
    }

    #[test]
    fn test_signed_zero_ties_keep_encounter_order() {
        let result = layout(
            &series(&[("A", -0.0), ("B", 0.0), ("X", 5.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        )
        .unwrap();

        let labels: Vec<&str> = result.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["X", "A", "B"]);
    }

    #[test]
    fn test_sorted_descending() {
        let result = layout(
            &series(&[("low", 1.0), ("high", 9.0), ("mid", 5.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        )
        .unwrap();
        let labels: Vec<&str> = result.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["high", "mid", "low"]);
    }

    // ========== geometry ==========

    #[test]
    fn test_bar_geometry() {
        // Plot area: 700 x 240 at (70, 40)
        let result = layout(
            &series(&[("A", 100.0), ("B", 50.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        )
        .unwrap();

        assert_eq!(result.plot.width, 700.0);
        assert_eq!(result.plot.height, 240.0);

        let a = &result.bars[0];
        // Slot 350, bar 245, inset 52.5
        assert!((a.width - 245.0).abs() < 1e-9);
        assert!((a.x - 122.5).abs() < 1e-9);
        assert!((a.height - 240.0).abs() < 1e-9);
        assert!((a.y - 40.0).abs() < 1e-9);

        let b = &result.bars[1];
        assert!((b.x - 472.5).abs() < 1e-9);
        assert!((b.height - 120.0).abs() < 1e-9);
        assert!((b.y - 160.0).abs() < 1e-9);
        assert_eq!(b.value, 50.0);
    }

    #[test]
    fn test_negative_and_nan_clamped() {
        let result = layout(
            &series(&[("A", 10.0), ("neg", -5.0), ("nan", f64::NAN)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        )
        .unwrap();
        for bar in &result.bars {
            assert!(bar.height >= 0.0);
            assert!(bar.width >= 0.0);
        }
        assert_eq!(result.bars[0].label, "A");
    }

    #[test]
    fn test_grid_lines_follow_ticks() {
        let result = layout(
            &series(&[("A", 100.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        )
        .unwrap();

        assert_eq!(result.grid_lines.len(), DEFAULT_TICK_COUNT + 1);
        let first = result.grid_lines[0];
        let last = result.grid_lines[DEFAULT_TICK_COUNT];
        assert_eq!(first.value, 0.0);
        assert!((first.y - 280.0).abs() < 1e-9);
        assert_eq!(last.value, 100.0);
        assert!((last.y - 40.0).abs() < 1e-9);
        assert_eq!(first.x1, 70.0);
        assert_eq!(first.x2, 770.0);
    }

    // ========== labels ==========

    #[test]
    fn test_labels_horizontal_when_they_fit() {
        let result = layout(
            &series(&[("Go", 1.0), ("Js", 2.0)]),
            big_viewport(),
            Margins::default(),
            LayoutOptions::default(),
        )
        .unwrap();
        for (label, bar) in result.labels.iter().zip(&result.bars) {
            assert_eq!(label.rotation, 0.0);
            assert!((label.x - bar.center_x()).abs() < 1e-9);
            assert!((label.y - 290.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_labels_rotated_and_truncated_when_constrained() {
        let pairs: Vec<(String, f64)> = (0..10)
            .map(|i| (format!("Project Number {}", i), 10.0 + i as f64))
            .collect();
        let series: Series = pairs.into_iter().collect();

        let result = layout(&series, Viewport::new(400.0, 400.0), Margins::default(), LayoutOptions::default()).unwrap();

        assert_eq!(result.labels.len(), 10);
        for label in &result.labels {
            assert_eq!(label.rotation, LABEL_ROTATION_DEG);
            assert_eq!(label.text, "Project Number…");
            assert!(label.full_text.starts_with("Project Number "));
        }
    }

    // ========== determinism ==========

    #[test]
    fn test_layout_is_idempotent() {
        let s = series(&[("A", 3.0), ("B", 7.0), ("C", 7.0), ("D", 1.0)]);
        let first = layout(&s, big_viewport(), Margins::default(), LayoutOptions::new(3)).unwrap();
        let second = layout(&s, big_viewport(), Margins::default(), LayoutOptions::new(3)).unwrap();
        assert_eq!(first, second);
    }
}
