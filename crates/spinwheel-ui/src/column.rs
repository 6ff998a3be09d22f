//! Per-component state of a picker.

use spinwheel_animation::{SettleAnimation, SettleFrame};
use spinwheel_foundation::{CellNode, ColumnGeometry, Point, Rect, VirtualColumn};
use web_time::{Duration, Instant};

/// One scrolling column: its visible cells, placement and settle motion.
pub struct Column<C: CellNode> {
    cells: VirtualColumn<C>,

    /// Left edge in control-local coordinates.
    x_origin: f32,

    settle: Option<SettleAnimation>,
}

impl<C: CellNode> Column<C> {
    pub fn new(cells: VirtualColumn<C>, x_origin: f32) -> Self {
        Self {
            cells,
            x_origin,
            settle: None,
        }
    }

    pub fn cells(&self) -> &VirtualColumn<C> {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut VirtualColumn<C> {
        &mut self.cells
    }

    pub fn geometry(&self) -> &ColumnGeometry {
        self.cells.geometry()
    }

    pub fn offset(&self) -> f32 {
        self.cells.offset()
    }

    pub fn x_origin(&self) -> f32 {
        self.x_origin
    }

    /// Touch area of the column in control-local, y-up coordinates.
    pub fn frame(&self) -> Rect {
        let geometry = self.geometry();
        Rect::new(
            self.x_origin,
            -geometry.viewport_height / 2.0,
            geometry.width,
            geometry.viewport_height,
        )
    }

    /// Whether a touch at `location` lands on this column.
    ///
    /// Columns share vertical edges, so x is half-open; the top and bottom
    /// edges of the control both count.
    pub fn hit_test(&self, location: Point) -> bool {
        let frame = self.frame();
        location.x >= frame.x
            && location.x < frame.max_x()
            && location.y >= frame.y
            && location.y <= frame.max_y()
    }

    pub fn settle(&self) -> Option<&SettleAnimation> {
        self.settle.as_ref()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Replaces any running settle with one from the current offset to `target`.
    pub fn start_settle(&mut self, target: f32, duration: Duration) {
        self.settle = Some(SettleAnimation::new(self.offset(), target, duration));
    }

    /// Drops the running settle without completing it.
    pub fn cancel_settle(&mut self) -> bool {
        self.settle.take().is_some()
    }

    /// Advances the settle to `now`, moving the offset. Finished settles are removed.
    pub(crate) fn advance_settle(&mut self, now: Instant) -> Option<SettleFrame> {
        let animation = self.settle.as_mut()?;
        let frame = animation.advance(now);
        if frame.finished {
            self.settle = None;
        }
        self.cells.set_offset(frame.offset);
        Some(frame)
    }
}
