//! Weekday-by-week activity heatmap widget

use crate::services::binner::{DayBuckets, HeatmapLevel};
use crate::types::DayBucket;
use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Rows used by the grid, month labels and legend
pub const HEATMAP_HEIGHT: u16 = 9;

const LABEL_WIDTH: u16 = 4; // "Mon "
const CELL_WIDTH: u16 = 2; // symbol + gap
const CELL: &str = "■";

/// Rows to display in the heatmap (all 7 days: Mon-Sun)
const DISPLAY_ROWS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// GitHub-style green gradient using ANSI 256
pub fn level_color(level: HeatmapLevel) -> Color {
    match level {
        HeatmapLevel::None => Color::Indexed(236),
        HeatmapLevel::Low => Color::Indexed(22),
        HeatmapLevel::Medium => Color::Indexed(28),
        HeatmapLevel::High => Color::Indexed(34),
        HeatmapLevel::Max => Color::Indexed(40),
    }
}

/// Heatmap over a binned activity window
pub struct HeatmapWidget<'a> {
    buckets: &'a DayBuckets,
}

impl<'a> HeatmapWidget<'a> {
    pub fn new(buckets: &'a DayBuckets) -> Self {
        Self { buckets }
    }

    /// Week columns that fit in `width`, most recent weeks kept
    fn visible_weeks(&self, width: u16) -> Vec<[Option<DayBucket>; 7]> {
        let max_weeks = (width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize;
        let mut weeks = self.buckets.weeks();
        let skip = weeks.len().saturating_sub(max_weeks);
        weeks.drain(..skip);
        weeks
    }

    fn render_month_labels(&self, weeks: &[[Option<DayBucket>; 7]], area: Rect, buf: &mut Buffer, y: u16) {
        let mut last_month: Option<u32> = None;
        let mut next_free_x = 0;

        for (col, week) in weeks.iter().enumerate() {
            let Some(first) = week.iter().flatten().next() else {
                continue;
            };
            let month = first.date.month();
            if last_month == Some(month) {
                continue;
            }
            last_month = Some(month);

            let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
            // Skip labels that would overlap the previous one
            if x < next_free_x || x + 3 > area.right() {
                continue;
            }
            buf.set_string(x, y, MONTH_NAMES[month as usize], Style::default().fg(Color::DarkGray));
            next_free_x = x + 4;
        }
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer, y: u16) {
        let muted = Style::default().fg(Color::DarkGray);
        let mut x = area.x + LABEL_WIDTH;
        let levels = [
            HeatmapLevel::None,
            HeatmapLevel::Low,
            HeatmapLevel::Medium,
            HeatmapLevel::High,
            HeatmapLevel::Max,
        ];
        let needed = 5 + levels.len() as u16 * CELL_WIDTH + 5;
        if x + needed > area.right() {
            return;
        }

        buf.set_string(x, y, "Less ", muted);
        x += 5;
        for level in levels {
            buf.set_string(x, y, CELL, Style::default().fg(level_color(level)));
            x += CELL_WIDTH;
        }
        buf.set_string(x, y, "More", muted);
    }
}

impl Widget for HeatmapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < HEATMAP_HEIGHT || area.width <= LABEL_WIDTH {
            return;
        }

        let weeks = self.visible_weeks(area.width);
        let muted = Style::default().fg(Color::DarkGray);

        for (day, label) in DISPLAY_ROWS.iter().enumerate() {
            let y = area.y + day as u16;
            buf.set_string(area.x, y, label, muted);

            for (col, week) in weeks.iter().enumerate() {
                if let Some(bucket) = week[day] {
                    let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
                    let color = level_color(self.buckets.level(bucket.count));
                    buf.set_string(x, y, CELL, Style::default().fg(color));
                }
            }
        }

        self.render_month_labels(&weeks, area, buf, area.y + 7);
        self.render_legend(area, buf, area.y + 8);
    }
}
