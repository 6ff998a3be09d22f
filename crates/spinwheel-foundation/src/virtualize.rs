//! Cell virtualization for picker columns.
//!
//! A [`VirtualColumn`] keeps cells only for rows that intersect its viewport.
//! Each [`reconcile`](VirtualColumn::reconcile) diffs the tracked rows against
//! the rows visible at the current offset:
//! 1. rows that left the viewport are detached and returned to the pool
//! 2. rows that entered it are requested from the [`CellSource`]
//! 3. rows visible before and after are left alone
//!
//! Retirement always completes before the first request so the source can
//! dequeue the cells that just scrolled out.

use smallvec::SmallVec;

use crate::cell::{CellNode, ReusableCell};
use crate::collections::RowMap;
use crate::error::PickerError;
use crate::reuse_pool::CellReusePool;
use crate::viewport::ColumnGeometry;

/// Default draw order for row cells inside their content container.
pub const DEFAULT_CELL_Z_POSITION: f32 = 100.0;

/// Supplies cells for rows entering the viewport.
pub trait CellSource<C: CellNode> {
    /// Produces the cell for `row` in `component`.
    ///
    /// `cells` is the picker's reuse pool; implementations normally dequeue
    /// from it. Returning `None` is a contract violation.
    fn cell_for_row(
        &mut self,
        cells: &mut CellReusePool<C>,
        row: usize,
        component: usize,
    ) -> Option<ReusableCell<C>>;

    /// Called after the cell is attached and positioned, before it is shown.
    fn will_display_cell(&mut self, cell: &mut C, row: usize, component: usize) {
        let _ = (cell, row, component);
    }
}

/// Rows touched by a single reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Rows whose cells went back to the pool.
    pub retired: SmallVec<[usize; 8]>,

    /// Rows whose cells were requested from the source.
    pub materialized: SmallVec<[usize; 8]>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.retired.is_empty() && self.materialized.is_empty()
    }
}

/// Visible-cell bookkeeping for one column.
pub struct VirtualColumn<C: CellNode> {
    component: usize,
    geometry: ColumnGeometry,
    offset: f32,

    /// Fade window, fixed when the column is built.
    fade_rows: usize,

    cell_z_position: f32,
    cells: RowMap<ReusableCell<C>>,
}

impl<C: CellNode> VirtualColumn<C> {
    /// Creates an empty column scrolled to its first row.
    pub fn new(component: usize, geometry: ColumnGeometry) -> Self {
        Self {
            component,
            fade_rows: geometry.max_visible_rows(),
            offset: geometry.offset_for_row(0),
            geometry,
            cell_z_position: DEFAULT_CELL_Z_POSITION,
            cells: RowMap::default(),
        }
    }

    pub fn with_cell_z_position(mut self, z_position: f32) -> Self {
        self.cell_z_position = z_position;
        self
    }

    pub fn component(&self) -> usize {
        self.component
    }

    pub fn geometry(&self) -> &ColumnGeometry {
        &self.geometry
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Moves the content. Cells follow on the next [`reconcile`](Self::reconcile).
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn fade_rows(&self) -> usize {
        self.fade_rows
    }

    /// Tracked rows, ascending.
    pub fn visible_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.cells.keys().copied().collect();
        rows.sort_unstable();
        rows
    }

    pub fn cell(&self, row: usize) -> Option<&ReusableCell<C>> {
        self.cells.get(&row)
    }

    pub fn cell_mut(&mut self, row: usize) -> Option<&mut ReusableCell<C>> {
        self.cells.get_mut(&row)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row nearest to the viewport center, unclamped.
    pub fn center_row(&self) -> i64 {
        self.geometry.nearest_row(self.offset)
    }

    /// Brings the tracked cells in line with the rows visible at the
    /// current offset.
    ///
    /// # Panics
    ///
    /// Panics when `source` yields no cell for an entering row.
    pub fn reconcile<S>(&mut self, pool: &mut CellReusePool<C>, source: &mut S) -> ReconcileReport
    where
        S: CellSource<C> + ?Sized,
    {
        let new_rows = self.geometry.visible_rows(self.offset);

        let retired: SmallVec<[usize; 8]> = self
            .visible_rows()
            .into_iter()
            .filter(|row| new_rows.binary_search(row).is_err())
            .collect();
        for row in &retired {
            if let Some(mut cell) = self.cells.remove(row) {
                cell.detach();
                pool.enqueue(cell);
            }
        }

        let materialized: SmallVec<[usize; 8]> = new_rows
            .iter()
            .copied()
            .filter(|row| !self.cells.contains_key(row))
            .collect();
        for &row in &materialized {
            let mut cell = match source.cell_for_row(pool, row, self.component) {
                Some(cell) => cell,
                None => panic!(
                    "{}",
                    PickerError::MissingCell {
                        row,
                        component: self.component,
                    }
                ),
            };
            cell.attach(self.component);
            let node = cell.node_mut();
            node.set_position(self.geometry.position_for_row(row));
            node.set_z_position(self.cell_z_position);
            source.will_display_cell(node, row, self.component);
            self.cells.insert(row, cell);
        }

        let report = ReconcileReport {
            retired,
            materialized,
        };
        if !report.is_empty() {
            log::trace!(
                "component {}: retired {:?}, materialized {:?}",
                self.component,
                report.retired,
                report.materialized
            );
        }
        report
    }

    /// Sets every tracked cell's alpha from its distance to `center_row`.
    pub fn apply_fade(&mut self, center_row: i64) {
        let window = self.fade_rows;
        for (&row, cell) in self.cells.iter_mut() {
            let distance = row as i64 - center_row;
            cell.node_mut().set_alpha(fade_alpha(distance, window));
        }
    }

    /// Detaches every tracked cell and returns it to `pool`.
    pub fn retire_all(&mut self, pool: &mut CellReusePool<C>) {
        for (_, mut cell) in self.cells.drain() {
            cell.detach();
            pool.enqueue(cell);
        }
    }
}

/// Alpha of a row `distance` rows away from the centered row.
///
/// A symmetric triangle over a window of `window_rows` rows: the step is
/// `1 / ((window_rows + 1) / 2)`, rows at or beyond the window edge get 0.
pub fn fade_alpha(distance: i64, window_rows: usize) -> f32 {
    if window_rows == 0 {
        return 1.0;
    }
    let scope = ((window_rows - 1) / 2) as i64;
    let step = 2.0 / (window_rows as f32 + 1.0);
    let steps = scope + 1 - distance.abs();
    if steps <= 0 {
        0.0
    } else {
        step * steps as f32
    }
}
