//! # xpchart
//!
//! Aggregation and layout for profile dashboards: XP per project, best
//! skills, frequent collaborators and a daily activity heatmap.
//!
//! The pipeline is pure: records go in, geometry and text come out, and a
//! [`render::Renderer`] paints the result onto a surface.
//!
//! ```
//! use xpchart::services::{layout, LayoutOptions};
//! use xpchart::types::{Margins, Series, Viewport};
//!
//! let series: Series = vec![("Go", 300.0), ("Graphql", 500.0)].into_iter().collect();
//! let chart = layout(&series, Viewport::new(800.0, 400.0), Margins::default(), LayoutOptions::new(10)).unwrap();
//! assert_eq!(chart.bars[0].label, "Graphql");
//! ```

pub mod config;
pub mod render;
pub mod services;
pub mod types;

pub use config::ChartConfig;
