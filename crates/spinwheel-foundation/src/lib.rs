//! Foundation layer for Spinwheel pickers.
//!
//! Everything in this crate is independent of gestures and timing:
//! - [`CellReusePool`] - identifier-keyed free lists of retired cells
//! - [`ColumnGeometry`] - pure per-column viewport math
//! - [`VirtualColumn`] - virtualized cell diffing for one column
//! - [`fade_alpha`] - alpha falloff around the centered row

pub mod cell;
pub mod collections;
pub mod error;
pub mod graphics;
pub mod reuse_pool;
pub mod viewport;
pub mod virtualize;

pub use cell::*;
pub use error::*;
pub use graphics::*;
pub use reuse_pool::*;
pub use viewport::*;
pub use virtualize::*;
