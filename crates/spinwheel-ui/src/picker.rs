//! The picker node façade.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use spinwheel_foundation::{
    CellNode, CellReusePool, CellSource, Color, ColumnGeometry, PickerError, Point, Rect,
    ReconcileReport, ReusableCell, Size, VirtualColumn,
};
use web_time::Instant;

use crate::column::Column;
use crate::decoration::{Background, Decorations, SelectionIndicator, TextureId};
use crate::gesture::{release_target, GestureController, PanCommand, PanEvent};
use crate::input::{GestureHost, InputBinding};
use crate::source::{PickerDataSource, PickerDelegate};
use crate::spec::PickerSpec;

/// Cell counters across all columns of a picker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickerStats {
    /// Cells attached to a column.
    pub cells_in_use: usize,

    /// Retired cells waiting in the reuse pool.
    pub cells_in_pool: usize,

    /// Cells constructed by registered factories.
    pub total_created: usize,

    /// Dequeues served from the pool.
    pub reuse_count: usize,
}

/// A multi-column picker wheel.
///
/// Holds its data source and delegate weakly; both must be kept alive by
/// the owner. All methods run on the host's main thread.
pub struct PickerNode<C: CellNode> {
    position: Point,
    size: Size,
    spec: PickerSpec,

    data_source: Option<Weak<dyn PickerDataSource<C>>>,
    delegate: Option<Weak<dyn PickerDelegate<C>>>,

    cells: CellReusePool<C>,
    columns: Vec<Column<C>>,

    /// Component count read at the last reload.
    component_count: Option<usize>,

    gestures: GestureController,
    input: InputBinding,
    decorations: Decorations,

    /// Selections waiting to be delivered at the end of the current tick.
    pending_selections: VecDeque<(usize, usize)>,
}

impl<C: CellNode> PickerNode<C> {
    /// Creates a picker centered at `position` with the default [`PickerSpec`].
    pub fn new(position: Point, size: Size) -> Self {
        Self::with_spec(position, size, PickerSpec::default())
    }

    pub fn with_spec(position: Point, size: Size, spec: PickerSpec) -> Self {
        Self {
            position,
            size,
            decorations: Decorations::new(size, spec.shows_selection_indicator, spec.indicator_color),
            cells: CellReusePool::with_policy(spec.reuse_policy.clone()),
            spec,
            data_source: None,
            delegate: None,
            columns: Vec::new(),
            component_count: None,
            gestures: GestureController::new(),
            input: InputBinding::new(),
            pending_selections: VecDeque::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn spec(&self) -> &PickerSpec {
        &self.spec
    }

    /// Attaches the data source. Takes effect on the next [`reload`](Self::reload).
    pub fn set_data_source<D>(&mut self, data_source: &Rc<D>)
    where
        D: PickerDataSource<C> + 'static,
    {
        let data_source: Rc<dyn PickerDataSource<C>> = data_source.clone();
        self.data_source = Some(Rc::downgrade(&data_source));
    }

    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    pub fn set_delegate<D>(&mut self, delegate: &Rc<D>)
    where
        D: PickerDelegate<C> + 'static,
    {
        let delegate: Rc<dyn PickerDelegate<C>> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    // ========================================================================
    // Cell reuse
    // ========================================================================

    /// Registers a cell constructor under a reuse identifier.
    pub fn register_identifier<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> C + 'static,
    {
        self.cells.register_identifier(identifier, factory);
    }

    /// Returns a recycled or new cell for `identifier`.
    ///
    /// Data sources receive the pool directly in
    /// [`cell_for_row`](PickerDataSource::cell_for_row); this is for cells
    /// prepared outside reconciliation.
    ///
    /// # Panics
    ///
    /// Panics when `identifier` is not registered.
    pub fn dequeue(&mut self, identifier: &str) -> ReusableCell<C> {
        self.cells.dequeue(identifier)
    }

    pub fn reuse_pool(&self) -> &CellReusePool<C> {
        &self.cells
    }

    pub fn stats(&self) -> PickerStats {
        let pool = self.cells.stats();
        PickerStats {
            cells_in_use: self.columns.iter().map(|c| c.cells().cell_count()).sum(),
            cells_in_pool: pool.cells_in_pool,
            total_created: pool.total_created,
            reuse_count: pool.reuse_count,
        }
    }

    // ========================================================================
    // Reload
    // ========================================================================

    /// Rebuilds every column from the data source and delegate.
    ///
    /// Does nothing when no data source is attached. Afterwards each column
    /// shows its first row centered.
    pub fn reload(&mut self) {
        let Some(data_source) = self.data_source() else {
            log::debug!("reload skipped: no data source attached");
            return;
        };
        let delegate = self.delegate();

        for column in &mut self.columns {
            column.cells_mut().retire_all(&mut self.cells);
        }
        self.columns.clear();
        self.gestures.reset();
        self.pending_selections.clear();

        let count = data_source.number_of_components();
        self.component_count = Some(count);

        let even_width = if count > 0 {
            self.size.width / count as f32
        } else {
            0.0
        };
        let mut x_origin = -self.size.width / 2.0;
        for component in 0..count {
            let width = delegate
                .as_ref()
                .and_then(|d| d.width_for_component(component))
                .unwrap_or(even_width);
            let row_height = self.spec.resolve_row_height(
                component,
                delegate
                    .as_ref()
                    .and_then(|d| d.row_height_for_component(component)),
            );
            let rows = data_source.number_of_rows(component);
            let geometry = ColumnGeometry::new(width, row_height, rows, self.size.height);
            let cells = VirtualColumn::new(component, geometry)
                .with_cell_z_position(self.spec.cell_z_position);
            self.columns.push(Column::new(cells, x_origin));
            x_origin += width;
        }

        self.decorations.layout(self.size, self.max_row_height());
        if self.spec.scroll_enabled {
            self.input.attach();
        }

        for component in 0..count {
            self.layout_component(component);
        }
        log::debug!(
            "reloaded {count} components, {} cells visible",
            self.stats().cells_in_use
        );
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Scrolls `component` so `row` sits at the center.
    ///
    /// Without animation the delegate hears about the selection before this
    /// returns; with animation it hears when the settle completes.
    pub fn select_row(&mut self, row: usize, component: usize, animated: bool) {
        let spec_duration = self.spec.settle_duration;
        let column = self.column_mut(component);
        let geometry = *column.geometry();
        let target = geometry.clamp_offset(geometry.offset_for_row(row));

        if animated {
            column.start_settle(target, spec_duration);
            return;
        }

        column.cancel_settle();
        column.cells_mut().set_offset(target);
        self.layout_component(component);
        let selected = self.selected_row(component);
        self.pending_selections.push_back((selected, component));
        self.flush_selections();
    }

    /// Row nearest to the center of `component`, clamped to its rows.
    pub fn selected_row(&self, component: usize) -> usize {
        let column = self.column(component);
        column.geometry().selected_row(column.offset())
    }

    // ========================================================================
    // Input and frames
    // ========================================================================

    /// Binds the picker to the view it is displayed in.
    pub fn mount<H: GestureHost + 'static>(&mut self, host: &Rc<RefCell<H>>) {
        self.input.mount(host);
        if self.spec.scroll_enabled {
            self.input.attach();
        }
    }

    /// Removes the picker's recognizer from its view, e.g. before the picker
    /// leaves its scene.
    ///
    /// A view that is busy dispatching keeps the recognizer until the next
    /// `unmount` or until the picker is dropped.
    pub fn unmount(&mut self) {
        self.input.unmount();
        self.gestures.reset();
    }

    pub fn is_input_attached(&self) -> bool {
        self.input.is_attached()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.spec.scroll_enabled
    }

    /// Installs or removes the pan recognizer. Repeated calls are harmless.
    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.spec.scroll_enabled = enabled;
        if enabled {
            self.input.attach();
        } else {
            self.input.detach();
            self.gestures.reset();
        }
    }

    /// Feeds one event from the host's pan recognizer.
    pub fn handle_pan(&mut self, event: PanEvent) {
        if !self.spec.scroll_enabled || !self.input.is_attached() {
            log::trace!("pan event {event:?} ignored: input detached");
            return;
        }

        let columns = &self.columns;
        let command = self.gestures.handle(event, |location| {
            columns
                .iter()
                .position(|column| column.hit_test(location))
        });

        match command {
            Some(PanCommand::Grab { component }) => {
                self.columns[component].cancel_settle();
            }
            Some(PanCommand::ScrollBy { component, delta }) => {
                let cells = self.columns[component].cells_mut();
                let offset = cells.offset() + delta;
                cells.set_offset(offset);
                self.layout_component(component);
            }
            Some(PanCommand::Release {
                component,
                velocity,
            }) => {
                let column = &mut self.columns[component];
                let target = release_target(column.geometry(), column.offset(), velocity, &self.spec);
                column.start_settle(target.offset, target.duration);
            }
            None => log::trace!("pan event {event:?} ignored: no column bound"),
        }
    }

    /// Advances settle animations to `now`. Call once per frame.
    ///
    /// Columns whose settle completes report their selected row to the
    /// delegate after every column has been advanced.
    pub fn tick(&mut self, now: Instant) {
        for component in 0..self.columns.len() {
            let Some(frame) = self.columns[component].advance_settle(now) else {
                continue;
            };
            self.layout_component(component);
            if frame.finished {
                let row = self.selected_row(component);
                self.pending_selections.push_back((row, component));
            }
        }
        self.flush_selections();
    }

    pub fn is_animating(&self) -> bool {
        self.columns.iter().any(Column::is_settling)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Components loaded by the last reload, or what the data source
    /// reports (one without a data source) before the first reload.
    pub fn number_of_components(&self) -> usize {
        if let Some(count) = self.component_count {
            return count;
        }
        self.data_source()
            .map_or(1, |data_source| data_source.number_of_components())
    }

    pub fn number_of_rows_in_component(&self, component: usize) -> usize {
        self.column(component).geometry().row_count
    }

    pub fn row_height_for_component(&self, component: usize) -> f32 {
        self.column(component).geometry().row_height
    }

    pub fn width_for_component(&self, component: usize) -> f32 {
        self.column(component).geometry().width
    }

    pub fn content_size_for_component(&self, component: usize) -> Size {
        self.column(component).geometry().content_size()
    }

    pub fn offset_for_component(&self, component: usize) -> f32 {
        self.column(component).offset()
    }

    /// Touch area of `component` in control-local coordinates.
    pub fn frame_for_component(&self, component: usize) -> Rect {
        self.column(component).frame()
    }

    /// Rows of `component` that currently own a cell, ascending.
    pub fn visible_rows(&self, component: usize) -> Vec<usize> {
        self.column(component).cells().visible_rows()
    }

    pub fn visible_cell(&self, row: usize, component: usize) -> Option<&C> {
        self.column(component).cells().cell(row).map(ReusableCell::node)
    }

    pub fn columns(&self) -> &[Column<C>] {
        &self.columns
    }

    // ========================================================================
    // Decorations
    // ========================================================================

    pub fn shows_selection_indicator(&self) -> bool {
        self.decorations.shows_indicator()
    }

    pub fn set_shows_selection_indicator(&mut self, shows: bool) {
        self.spec.shows_selection_indicator = shows;
        let band = Size::new(self.size.width, self.max_row_height());
        self.decorations.set_shows_indicator(shows, band);
    }

    pub fn selection_indicator(&self) -> Option<&SelectionIndicator> {
        self.decorations.indicator()
    }

    pub fn indicator_color(&self) -> Color {
        self.decorations.indicator_color()
    }

    pub fn set_indicator_color(&mut self, color: Color) {
        self.spec.indicator_color = color;
        self.decorations.set_indicator_color(color);
    }

    pub fn background(&self) -> Background {
        self.decorations.background()
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.decorations.set_background_color(color);
    }

    pub fn set_background_texture(&mut self, texture: Option<TextureId>) {
        self.decorations.set_background_texture(texture);
    }

    /// Viewport mask in control-local coordinates.
    pub fn mask(&self) -> Rect {
        self.decorations.mask()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn data_source(&self) -> Option<Rc<dyn PickerDataSource<C>>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Rc<dyn PickerDelegate<C>>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn column(&self, component: usize) -> &Column<C> {
        match self.columns.get(component) {
            Some(column) => column,
            None => panic!("{}", self.out_of_range(component)),
        }
    }

    fn column_mut(&mut self, component: usize) -> &mut Column<C> {
        let error = self.out_of_range(component);
        match self.columns.get_mut(component) {
            Some(column) => column,
            None => panic!("{error}"),
        }
    }

    fn out_of_range(&self, component: usize) -> PickerError {
        PickerError::ComponentOutOfRange {
            component,
            count: self.columns.len(),
        }
    }

    fn max_row_height(&self) -> f32 {
        self.columns
            .iter()
            .map(|column| column.geometry().row_height)
            .fold(0.0, f32::max)
    }

    /// Reconciles `component` at its current offset and refreshes the fade.
    fn layout_component(&mut self, component: usize) -> ReconcileReport {
        let Some(data_source) = self.data_source() else {
            return ReconcileReport::default();
        };
        let delegate = self.delegate();
        let mut source = CollaboratorCells {
            data_source: data_source.as_ref(),
            delegate: delegate.as_deref(),
        };

        let cells = self.columns[component].cells_mut();
        let report = cells.reconcile(&mut self.cells, &mut source);
        let center = cells.center_row();
        cells.apply_fade(center);
        report
    }

    fn flush_selections(&mut self) {
        if self.pending_selections.is_empty() {
            return;
        }
        let delegate = self.delegate();
        while let Some((row, component)) = self.pending_selections.pop_front() {
            if let Some(delegate) = delegate.as_ref() {
                delegate.did_select_row(self, row, component);
            }
        }
    }
}

impl<C: CellNode> Drop for PickerNode<C> {
    fn drop(&mut self) {
        self.input.unmount();
    }
}

/// Routes cell requests of the virtualization engine to the collaborators.
struct CollaboratorCells<'a, C: CellNode> {
    data_source: &'a dyn PickerDataSource<C>,
    delegate: Option<&'a dyn PickerDelegate<C>>,
}

impl<C: CellNode> CellSource<C> for CollaboratorCells<'_, C> {
    fn cell_for_row(
        &mut self,
        cells: &mut CellReusePool<C>,
        row: usize,
        component: usize,
    ) -> Option<ReusableCell<C>> {
        self.data_source.cell_for_row(cells, row, component)
    }

    fn will_display_cell(&mut self, cell: &mut C, row: usize, component: usize) {
        if let Some(delegate) = self.delegate {
            delegate.will_display_cell(cell, row, component);
        }
    }
}
