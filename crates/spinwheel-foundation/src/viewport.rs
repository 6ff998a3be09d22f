//! Viewport geometry for a single picker column.
//!
//! All functions are pure. The scroll offset of a column is the content-space
//! y coordinate sitting at the vertical center of the control, so row `r` is
//! centered when the offset equals `r * row_height + row_height / 2`.

use crate::graphics::{Point, Rect, Size};

/// Fixed geometry of one column between two reloads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnGeometry {
    /// Width of the column.
    pub width: f32,

    /// Height of every row in the column.
    pub row_height: f32,

    /// Number of rows reported by the data source.
    pub row_count: usize,

    /// Height of the control's viewport.
    pub viewport_height: f32,
}

impl ColumnGeometry {
    pub fn new(width: f32, row_height: f32, row_count: usize, viewport_height: f32) -> Self {
        Self {
            width,
            row_height,
            row_count,
            viewport_height,
        }
    }

    /// Size of the column's content container.
    pub fn content_size(&self) -> Size {
        Size::new(self.width, self.row_height * self.row_count as f32)
    }

    /// Most rows that can be on screen at once, `ceil(viewport / row_height)`.
    pub fn max_visible_rows(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.viewport_height / self.row_height).ceil() as usize
    }

    /// Content-space rectangle currently inside the viewport.
    pub fn visible_rect(&self, offset: f32) -> Rect {
        Rect::new(
            0.0,
            offset - self.viewport_height / 2.0,
            self.width,
            self.viewport_height,
        )
    }

    /// Content-space rectangle of `row`; rows stack downward.
    pub fn row_rect(&self, row: usize) -> Rect {
        Rect::new(
            0.0,
            self.row_height * row as f32,
            self.width,
            self.row_height,
        )
    }

    /// All rows whose rectangle intersects `rect`, ascending.
    ///
    /// A linear scan: row counts are UI-scale.
    pub fn rows_intersecting(&self, rect: &Rect) -> Vec<usize> {
        (0..self.row_count)
            .filter(|&row| self.row_rect(row).intersects(rect))
            .collect()
    }

    /// Rows intersecting the viewport at `offset`.
    pub fn visible_rows(&self, offset: f32) -> Vec<usize> {
        self.rows_intersecting(&self.visible_rect(offset))
    }

    /// Center of `row` in the content container's local space.
    ///
    /// The container grows downward from its top edge, so y is negative.
    pub fn position_for_row(&self, row: usize) -> Point {
        Point::new(
            self.width / 2.0,
            -(row as f32 * self.row_height + self.row_height / 2.0),
        )
    }

    pub fn size_for_row(&self, _row: usize) -> Size {
        Size::new(self.width, self.row_height)
    }

    /// Offset at which `row` sits at the viewport center.
    pub fn offset_for_row(&self, row: usize) -> f32 {
        -self.position_for_row(row).y
    }

    /// Index of the row whose center is nearest to `offset`.
    ///
    /// Not clamped: offsets past either end yield out-of-range rows.
    pub fn nearest_row(&self, offset: f32) -> i64 {
        if self.row_height <= 0.0 {
            return 0;
        }
        ((offset + self.row_height / 2.0) / self.row_height).round() as i64 - 1
    }

    /// Snaps a raw scroll offset to the offset of its nearest row.
    pub fn nearest_row_offset(&self, offset: f32) -> f32 {
        let row = self.nearest_row(offset) as f32;
        row * self.row_height + self.row_height / 2.0
    }

    /// Clamps an offset so neither the first nor the last row center can
    /// scroll past the viewport center.
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        let min = self.row_height / 2.0;
        let max = self.content_size().height - self.row_height / 2.0;
        offset.max(min).min(max)
    }

    /// Selected row at `offset`, clamped to `[0, row_count - 1]`.
    ///
    /// Columns without rows report row 0.
    pub fn selected_row(&self, offset: f32) -> usize {
        if self.row_height <= 0.0 || self.row_count == 0 {
            return 0;
        }
        let row = (offset / self.row_height).floor();
        if row <= 0.0 {
            0
        } else {
            (row as usize).min(self.row_count - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> ColumnGeometry {
        ColumnGeometry::new(100.0, 44.0, 100, 200.0)
    }

    #[test]
    fn test_row_rect_stacks_downward() {
        let geometry = column();
        assert_eq!(geometry.row_rect(0), Rect::new(0.0, 0.0, 100.0, 44.0));
        assert_eq!(geometry.row_rect(3), Rect::new(0.0, 132.0, 100.0, 44.0));
    }

    #[test]
    fn test_position_for_row_is_flipped_center() {
        let geometry = column();
        assert_eq!(geometry.position_for_row(0), Point::new(50.0, -22.0));
        assert_eq!(geometry.position_for_row(2), Point::new(50.0, -110.0));
        assert_eq!(geometry.offset_for_row(2), 110.0);
        assert_eq!(geometry.size_for_row(7), Size::new(100.0, 44.0));
    }

    #[test]
    fn test_visible_rows_at_first_row() {
        let geometry = column();
        // Row 0 centered: viewport spans content y -78..122.
        assert_eq!(geometry.visible_rect(22.0), Rect::new(0.0, -78.0, 100.0, 200.0));
        assert_eq!(geometry.visible_rows(22.0), vec![0, 1, 2]);
    }

    #[test]
    fn test_visible_rows_mid_list() {
        let geometry = column();
        let rows = geometry.visible_rows(geometry.offset_for_row(50));
        assert_eq!(rows, vec![48, 49, 50, 51, 52]);
        assert_eq!(rows.len(), geometry.max_visible_rows());
    }

    #[test]
    fn test_rows_intersecting_empty_column() {
        let geometry = ColumnGeometry::new(100.0, 44.0, 0, 200.0);
        assert!(geometry.visible_rows(22.0).is_empty());
    }

    #[test]
    fn test_nearest_row_offset_snaps_to_centers() {
        let geometry = column();
        assert_eq!(geometry.nearest_row_offset(22.0), 22.0);
        assert_eq!(geometry.nearest_row_offset(60.0), 66.0);
        assert_eq!(geometry.nearest_row_offset(40.0), 22.0);
        assert_eq!(geometry.nearest_row_offset(-300.0), -286.0);
    }

    #[test]
    fn test_clamp_offset_bounds() {
        let geometry = column();
        assert_eq!(geometry.clamp_offset(-500.0), 22.0);
        assert_eq!(geometry.clamp_offset(1_000_000.0), 4400.0 - 22.0);
        assert_eq!(geometry.clamp_offset(500.0), 500.0);
    }

    #[test]
    fn test_clamp_offset_empty_column_does_not_panic() {
        let geometry = ColumnGeometry::new(100.0, 44.0, 0, 200.0);
        assert_eq!(geometry.clamp_offset(100.0), -22.0);
    }

    #[test]
    fn test_selected_row_is_clamped() {
        let geometry = column();
        assert_eq!(geometry.selected_row(22.0), 0);
        assert_eq!(geometry.selected_row(geometry.offset_for_row(50)), 50);
        assert_eq!(geometry.selected_row(-1_000.0), 0);
        assert_eq!(geometry.selected_row(1_000_000.0), 99);
        assert_eq!(ColumnGeometry::new(100.0, 44.0, 0, 200.0).selected_row(500.0), 0);
    }

    #[test]
    fn test_selected_row_round_trips_every_row() {
        let geometry = column();
        for row in 0..geometry.row_count {
            assert_eq!(geometry.selected_row(geometry.offset_for_row(row)), row);
        }
    }

    #[test]
    fn test_max_visible_rows() {
        assert_eq!(column().max_visible_rows(), 5);
        assert_eq!(ColumnGeometry::new(100.0, 40.0, 10, 200.0).max_visible_rows(), 5);
        assert_eq!(ColumnGeometry::new(100.0, 36.0, 10, 200.0).max_visible_rows(), 6);
    }
}
