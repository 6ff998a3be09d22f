//! Collaborator capabilities consumed by [`PickerNode`](crate::PickerNode).
//!
//! Every optional capability is a default method whose body is the fallback
//! the picker applies when the collaborator does not provide it.

use spinwheel_foundation::{CellNode, CellReusePool, ReusableCell};

use crate::picker::PickerNode;

/// Supplies the rows and cells shown by a picker.
pub trait PickerDataSource<C: CellNode> {
    /// Number of independently scrolling columns. Defaults to one.
    fn number_of_components(&self) -> usize {
        1
    }

    /// Number of rows in `component`.
    fn number_of_rows(&self, component: usize) -> usize;

    /// The cell showing `row` of `component`.
    ///
    /// Implementations normally call [`CellReusePool::dequeue`] on `cells`.
    /// Returning `None` is a contract violation and aborts reconciliation.
    fn cell_for_row(
        &self,
        cells: &mut CellReusePool<C>,
        row: usize,
        component: usize,
    ) -> Option<ReusableCell<C>>;
}

/// Receives selection events and customizes column layout.
pub trait PickerDelegate<C: CellNode> {
    /// A column settled on `row`, either after a drag or via `select_row`.
    fn did_select_row(&self, picker: &PickerNode<C>, row: usize, component: usize) {
        let _ = (picker, row, component);
    }

    /// Width of `component`; `None` splits the control width evenly.
    fn width_for_component(&self, component: usize) -> Option<f32> {
        let _ = component;
        None
    }

    /// Row height of `component`; `None` uses the picker's configured row height.
    fn row_height_for_component(&self, component: usize) -> Option<f32> {
        let _ = component;
        None
    }

    /// Called right before a freshly attached cell is displayed.
    fn will_display_cell(&self, cell: &mut C, row: usize, component: usize) {
        let _ = (cell, row, component);
    }
}
