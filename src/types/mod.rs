//! Type definitions for xpchart

mod chart;
mod error;
mod record;

pub use chart::*;
pub use error::*;
pub use record::*;
