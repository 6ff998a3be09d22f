//! Multi-column picker wheel for Spinwheel.
//!
//! [`PickerNode`] is a scene-graph node showing one independently scrolling
//! column per component. Rows are virtualized: only rows intersecting the
//! viewport own a cell, and cells scrolling out are recycled through the
//! picker's reuse pool.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut picker = PickerNode::new(Point::ZERO, Size::new(200.0, 200.0));
//! picker.register_identifier("cell", LabelCell::default);
//! picker.set_data_source(&source);
//! picker.set_delegate(&delegate);
//! picker.mount(&host);
//! picker.reload();
//!
//! // From the host's frame loop:
//! picker.tick(Instant::now());
//! ```

mod column;
mod decoration;
mod gesture;
mod input;
mod picker;
mod source;
mod spec;

pub use column::*;
pub use decoration::*;
pub use gesture::*;
pub use input::*;
pub use picker::*;
pub use source::*;
pub use spec::*;

pub use spinwheel_foundation::{
    CellNode, CellReusePolicy, Color, Point, Rect, ReusableCell, Size,
};
