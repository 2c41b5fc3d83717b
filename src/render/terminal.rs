//! Terminal renderer: paints geometry into a ratatui buffer and prints it

use super::heatmap::{HeatmapWidget, HEATMAP_HEIGHT};
use super::Renderer;
use crate::config::ChartConfig;
use crate::services::binner::DayBuckets;
use crate::services::layout::ChartLayout;
use crate::services::normalizer::{format_number, truncate_label};
use crate::services::summary::format_xp;
use crate::services::{ChartView, DashboardView};
use crate::types::{Margins, Result, XpchartError};
use crossterm::style::{Color as TermColor, ContentStyle, StyledContent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Margins in cells: tick labels on the left, bar labels underneath
const TERMINAL_MARGINS: Margins = Margins {
    top: 1.0,
    right: 1.0,
    bottom: 1.0,
    left: 10.0,
};

const BAR: &str = "█";
const BAR_STUB: &str = "▁";
const SUMMARY_ROWS: u16 = 3;

/// Adapt a config to cell units
pub fn terminal_config(base: &ChartConfig) -> ChartConfig {
    ChartConfig {
        margins: TERMINAL_MARGINS,
        label_offset: 0.0,
        label_char_width: 1.0,
        ..base.clone()
    }
}

/// Snap a viewport coordinate to a cell index
fn to_cell(v: f64) -> u16 {
    if v.is_finite() {
        v.round().clamp(0.0, u16::MAX as f64) as u16
    } else {
        0
    }
}

/// Offset a viewport coordinate from `origin`
fn at(origin: u16, v: f64) -> u16 {
    origin.saturating_add(to_cell(v))
}

/// Write `text` if its start lies inside `area`; clipped at the right edge
fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if x >= area.right() || y >= area.bottom() || x < area.x || y < area.y {
        return;
    }
    let max = (area.right() - x) as usize;
    buf.set_stringn(x, y, text, max, style);
}

/// One bar chart, or its substitute message
pub struct BarChartWidget<'a> {
    chart: &'a ChartView,
}

impl<'a> BarChartWidget<'a> {
    pub fn new(chart: &'a ChartView) -> Self {
        Self { chart }
    }

    fn render_layout(layout: &ChartLayout, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(Color::DarkGray);
        let bar_style = Style::default().fg(Color::Cyan);

        let plot_x = at(area.x, layout.plot.x);
        let plot_top = at(area.y, layout.plot.y);
        let plot_bottom = at(area.y, layout.plot.bottom()).max(plot_top.saturating_add(1));

        // Y axis
        if plot_x > area.x {
            for y in plot_top..plot_bottom {
                put(buf, area, plot_x - 1, y, "│", muted);
            }
        }

        // Tick labels, clamped into the plot rows
        for line in &layout.grid_lines {
            let y = at(area.y, line.y)
                .min(plot_bottom.saturating_sub(1))
                .max(plot_top);
            let text = format_number(line.value.max(0.0) as u64);
            let end = plot_x.saturating_sub(2);
            let start = end.saturating_sub(text.chars().count() as u16).max(area.x);
            put(buf, area, start, y, &text, muted);
            if plot_x > area.x {
                put(buf, area, plot_x - 1, y, "┤", muted);
            }
        }

        for bar in &layout.bars {
            let x0 = at(area.x, bar.x);
            let x1 = at(area.x, bar.x + bar.width).max(x0.saturating_add(1));
            let y0 = at(area.y, bar.y);
            let y1 = at(area.y, bar.y + bar.height);

            if y1 == y0 && bar.height > 0.0 && y1 > area.y {
                for x in x0..x1 {
                    put(buf, area, x, y1 - 1, BAR_STUB, bar_style);
                }
                continue;
            }
            for y in y0..y1 {
                for x in x0..x1 {
                    put(buf, area, x, y, BAR, bar_style);
                }
            }
        }

        let slot = if layout.bars.is_empty() {
            0
        } else {
            (layout.plot.width / layout.bars.len() as f64).floor() as usize
        };
        for label in &layout.labels {
            let text = truncate_label(&label.text, slot.saturating_sub(1).max(1));
            let half = text.chars().count() as f64 / 2.0;
            let x = at(area.x, label.x - half);
            let y = at(area.y, label.y);
            put(buf, area, x, y, &text, Style::default());
        }
    }

    fn render_message(message: &str, area: Rect, buf: &mut Buffer) {
        let len = message.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        let y = area.y + area.height / 2;
        put(buf, area, x, y, message, Style::default().fg(Color::DarkGray));
    }
}

impl Widget for BarChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.chart.outcome {
            Ok(layout) => Self::render_layout(layout, area, buf),
            Err(e) => Self::render_message(e.message(), area, buf),
        }
    }
}

/// Renders the whole dashboard as terminal text
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    /// Emit ANSI colors
    pub color: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render_summary(view: &DashboardView<'_>, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let summary = view.summary;
        let login = if view.login.is_empty() { "profile" } else { view.login };

        put(buf, area, area.x, area.y, login, bold);
        let line = format!(
            "XP {}   Level {}   Piscine {:.1}%",
            format_xp(summary.total_xp),
            summary.level,
            summary.piscine_progress
        );
        put(buf, area, area.x, area.y + 1, &line, Style::default());

        let audits = match summary.audit_ratio {
            Some(ratio) => format!(
                "Audit ratio {:.1} (done {} / received {})",
                ratio,
                format_xp(summary.audits_done),
                format_xp(summary.audits_received)
            ),
            None => "Audit ratio n/a".to_string(),
        };
        put(buf, area, area.x, area.y + 2, &audits, Style::default());
    }

    /// Render only the activity heatmap, `width` cells wide
    pub fn render_activity(&self, buckets: &DayBuckets, width: u16) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, HEATMAP_HEIGHT + 1));
        let full = buf.area;
        let summary = format!(
            "Activity: {} events on {} of {} days",
            buckets.total(),
            buckets.active_days(),
            buckets.len()
        );
        put(&mut buf, full, 0, 0, &summary, Style::default().add_modifier(Modifier::BOLD));
        HeatmapWidget::new(buckets).render(Rect::new(0, 1, width, HEATMAP_HEIGHT), &mut buf);
        self.buffer_to_string(&buf)
    }

    fn buffer_to_string(&self, buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            let mut line = String::new();
            for x in area.left()..area.right() {
                let Some(cell) = buf.cell((x, y)) else {
                    continue;
                };
                let symbol = cell.symbol();
                match to_term_color(cell.fg) {
                    Some(color) if self.color && symbol != " " => {
                        let style = ContentStyle {
                            foreground_color: Some(color),
                            ..ContentStyle::default()
                        };
                        line.push_str(&StyledContent::new(style, symbol).to_string());
                    }
                    _ => line.push_str(symbol),
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn to_term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Indexed(n) => Some(TermColor::AnsiValue(n)),
        Color::DarkGray => Some(TermColor::DarkGrey),
        Color::Cyan => Some(TermColor::Cyan),
        _ => None,
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, view: &DashboardView<'_>) -> Result<String> {
        let width = to_cell(view.viewport.width);
        let chart_height = to_cell(view.viewport.height);
        if width == 0 || chart_height == 0 {
            return Err(XpchartError::Render(format!(
                "viewport {}x{} has no cells",
                view.viewport.width, view.viewport.height
            )));
        }

        // summary, blank, then (title + chart + blank) per chart, then title + heatmap
        let charts = view.charts.len() as u16;
        let height = (chart_height.saturating_add(2))
            .saturating_mul(charts)
            .saturating_add(SUMMARY_ROWS + 2 + HEATMAP_HEIGHT);
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        let full = buf.area;
        let title_style = Style::default().add_modifier(Modifier::BOLD);

        Self::render_summary(view, Rect::new(0, 0, width, SUMMARY_ROWS), &mut buf);

        let mut y = SUMMARY_ROWS + 1;
        for chart in &view.charts {
            put(&mut buf, full, 0, y, chart.title(), title_style);
            let area = Rect::new(0, y.saturating_add(1), width, chart_height);
            BarChartWidget::new(chart).render(area, &mut buf);
            y = y.saturating_add(chart_height.saturating_add(2));
        }

        put(&mut buf, full, 0, y, "Activity", title_style);
        HeatmapWidget::new(view.activity).render(
            Rect::new(0, y.saturating_add(1), width, HEATMAP_HEIGHT),
            &mut buf,
        );

        Ok(self.buffer_to_string(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{DashboardData, Snapshot};
    use crate::types::{LayoutError, Record, Viewport};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn make_record(kind: &str, amount: f64, path: &str) -> Record {
        Record {
            kind: kind.to_string(),
            amount,
            created_at: Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap(),
            path: Some(path.to_string()),
        }
    }

    fn render_text(snapshot: &Snapshot, viewport: Viewport) -> String {
        let config = terminal_config(&ChartConfig::default());
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let data = DashboardData::from_snapshot(snapshot, &config, today);
        let view = data.layout(viewport, &config);
        TerminalRenderer::new(false).render(&view).unwrap()
    }

    #[test]
    fn test_terminal_config_uses_cell_margins() {
        let config = terminal_config(&ChartConfig::default());
        assert_eq!(config.margins, TERMINAL_MARGINS);
        assert_eq!(config.xp_top_n, 10);
    }

    #[test]
    fn test_render_contains_titles_and_labels() {
        let snapshot = Snapshot {
            login: "me".into(),
            transactions: vec![
                make_record("xp", 4000.0, "/school/graphql"),
                make_record("xp", 1000.0, "/school/ascii-art"),
            ],
            ..Snapshot::default()
        };

        let text = render_text(&snapshot, Viewport::new(80.0, 12.0));

        assert!(text.starts_with("me\n"));
        assert!(text.contains("XP 5.00 kB"));
        assert!(text.contains("XP by project"));
        assert!(text.contains("Graphql"));
        assert!(text.contains("Ascii Art"));
        assert!(text.contains(BAR));
        assert!(text.contains("4,000"));
        assert!(text.contains("Activity"));
    }

    #[test]
    fn test_render_messages_for_missing_data() {
        let text = render_text(&Snapshot::default(), Viewport::new(80.0, 12.0));
        assert!(text.contains(LayoutError::EmptyInput.message()));
        assert!(text.contains("Audit ratio n/a"));
    }

    #[test]
    fn test_render_too_small_message() {
        let snapshot = Snapshot {
            transactions: vec![make_record("xp", 10.0, "/a")],
            ..Snapshot::default()
        };
        let text = render_text(&snapshot, Viewport::new(40.0, 2.0));
        let too_small = LayoutError::ChartTooSmall {
            width: 0.0,
            height: 0.0,
        };
        assert!(text.contains(too_small.message()));
    }

    #[test]
    fn test_zero_viewport_is_render_error() {
        let config = ChartConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let data = DashboardData::from_snapshot(&Snapshot::default(), &config, today);
        let view = data.layout(Viewport::new(0.0, 0.0), &config);
        assert!(TerminalRenderer::default().render(&view).is_err());
    }

    #[test]
    fn test_render_activity_only() {
        let anchor = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let buckets = crate::services::bin_by_day(&[(anchor, 3)], 30, anchor);

        let text = TerminalRenderer::new(false).render_activity(&buckets, 80);

        assert!(text.starts_with("Activity: 3 events on 1 of 31 days"));
        assert!(text.contains("Mon"));
    }

    #[test]
    fn test_color_output_has_escape_codes() {
        let snapshot = Snapshot {
            transactions: vec![make_record("xp", 10.0, "/a")],
            ..Snapshot::default()
        };
        let config = terminal_config(&ChartConfig::default());
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let data = DashboardData::from_snapshot(&snapshot, &config, today);
        let view = data.layout(Viewport::new(60.0, 10.0), &config);

        let text = TerminalRenderer::new(true).render(&view).unwrap();

        assert!(text.contains("\u{1b}["));
    }
}
