use std::cell::RefCell;
use std::rc::Rc;

use spinwheel_foundation::{CellReusePool, Point, ReusableCell, Size};
use spinwheel_ui::{
    GestureHost, PanEvent, PickerDataSource, PickerDelegate, PickerNode, PickerSpec, RecognizerId,
};
use web_time::{Duration, Instant};

use crate::test_cell::TestCell;

/// Reuse identifier registered by [`PickerTestRule`].
pub const TEST_CELL_IDENTIFIER: &str = "cell";

/// One frame at 60 Hz.
pub const FRAME: Duration = Duration::from_nanos(16_666_667);

const MAX_ANIMATION_FRAMES: usize = 10_000;

/// A cell request observed by [`GridDataSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRequest {
    pub row: usize,
    pub component: usize,

    /// Cells waiting in the pool right before the request was served.
    pub pooled: usize,

    /// Id of the cell handed back.
    pub cell_id: u64,
}

/// Data source with a fixed row count per component.
#[derive(Debug, Default)]
pub struct GridDataSource {
    rows: RefCell<Vec<usize>>,
    requests: RefCell<Vec<CellRequest>>,
}

impl GridDataSource {
    pub fn new(rows: Vec<usize>) -> Self {
        Self {
            rows: RefCell::new(rows),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Changes the row counts seen by the next reload.
    pub fn set_rows(&self, rows: Vec<usize>) {
        *self.rows.borrow_mut() = rows;
    }

    pub fn requests(&self) -> Vec<CellRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl PickerDataSource<TestCell> for GridDataSource {
    fn number_of_components(&self) -> usize {
        self.rows.borrow().len()
    }

    fn number_of_rows(&self, component: usize) -> usize {
        self.rows.borrow().get(component).copied().unwrap_or(0)
    }

    fn cell_for_row(
        &self,
        cells: &mut CellReusePool<TestCell>,
        row: usize,
        component: usize,
    ) -> Option<ReusableCell<TestCell>> {
        let pooled = cells.available_count(TEST_CELL_IDENTIFIER);
        let mut cell = cells.dequeue(TEST_CELL_IDENTIFIER);
        let node = cell.node_mut();
        node.label = format!("{component}:{row}");
        self.requests.borrow_mut().push(CellRequest {
            row,
            component,
            pooled,
            cell_id: node.id,
        });
        Some(cell)
    }
}

/// A selection reported to [`RecordingDelegate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub row: usize,
    pub component: usize,

    /// `selected_row` read back from the picker inside the callback.
    pub reported_selected_row: usize,
}

/// Delegate recording callbacks, optionally overriding column layout.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    widths: Vec<Option<f32>>,
    row_heights: Vec<Option<f32>>,
    selections: RefCell<Vec<Selection>>,
    displayed: RefCell<Vec<(usize, usize)>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widths(mut self, widths: Vec<Option<f32>>) -> Self {
        self.widths = widths;
        self
    }

    pub fn with_row_heights(mut self, row_heights: Vec<Option<f32>>) -> Self {
        self.row_heights = row_heights;
        self
    }

    pub fn selections(&self) -> Vec<Selection> {
        self.selections.borrow().clone()
    }

    /// `(row, component)` pairs passed to `will_display_cell`, in order.
    pub fn displayed(&self) -> Vec<(usize, usize)> {
        self.displayed.borrow().clone()
    }

    pub fn clear(&self) {
        self.selections.borrow_mut().clear();
        self.displayed.borrow_mut().clear();
    }
}

impl PickerDelegate<TestCell> for RecordingDelegate {
    fn did_select_row(&self, picker: &PickerNode<TestCell>, row: usize, component: usize) {
        self.selections.borrow_mut().push(Selection {
            row,
            component,
            reported_selected_row: picker.selected_row(component),
        });
    }

    fn width_for_component(&self, component: usize) -> Option<f32> {
        self.widths.get(component).copied().flatten()
    }

    fn row_height_for_component(&self, component: usize) -> Option<f32> {
        self.row_heights.get(component).copied().flatten()
    }

    fn will_display_cell(&self, cell: &mut TestCell, row: usize, component: usize) {
        cell.run_action("display");
        self.displayed.borrow_mut().push((row, component));
    }
}

/// Gesture host keeping track of installed recognizers.
#[derive(Debug, Default)]
pub struct FakeGestureHost {
    next_id: u64,
    installed: Vec<RecognizerId>,
    pub added: usize,
    pub removed: usize,
}

impl FakeGestureHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> &[RecognizerId] {
        &self.installed
    }
}

impl GestureHost for FakeGestureHost {
    fn add_pan_recognizer(&mut self) -> RecognizerId {
        self.next_id += 1;
        let id = RecognizerId(self.next_id);
        self.installed.push(id);
        self.added += 1;
        id
    }

    fn remove_pan_recognizer(&mut self, id: RecognizerId) {
        self.installed.retain(|installed| *installed != id);
        self.removed += 1;
    }
}

/// Builder for [`PickerTestRule`].
pub struct PickerTestRuleBuilder {
    rows: Vec<usize>,
    size: Size,
    spec: PickerSpec,
    widths: Vec<Option<f32>>,
    row_heights: Vec<Option<f32>>,
    cell_factory: fn() -> TestCell,
}

impl PickerTestRuleBuilder {
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_spec(mut self, spec: PickerSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn with_widths(mut self, widths: Vec<Option<f32>>) -> Self {
        self.widths = widths;
        self
    }

    pub fn with_row_heights(mut self, row_heights: Vec<Option<f32>>) -> Self {
        self.row_heights = row_heights;
        self
    }

    pub fn with_cell_factory(mut self, factory: fn() -> TestCell) -> Self {
        self.cell_factory = factory;
        self
    }

    /// Wires everything up, mounts the picker and reloads it.
    pub fn build(self) -> PickerTestRule {
        let mut rule = self.build_unloaded();
        rule.picker.reload();
        rule
    }

    /// Like [`build`](Self::build) without the initial reload.
    pub fn build_unloaded(self) -> PickerTestRule {
        let data_source = Rc::new(GridDataSource::new(self.rows));
        let delegate = Rc::new(
            RecordingDelegate::new()
                .with_widths(self.widths)
                .with_row_heights(self.row_heights),
        );
        let host = Rc::new(RefCell::new(FakeGestureHost::new()));

        let mut picker = PickerNode::with_spec(Point::ZERO, self.size, self.spec);
        picker.register_identifier(TEST_CELL_IDENTIFIER, self.cell_factory);
        picker.set_data_source(&data_source);
        picker.set_delegate(&delegate);
        picker.mount(&host);

        PickerTestRule {
            picker,
            data_source,
            delegate,
            host,
            now: Instant::now(),
        }
    }
}

/// A mounted picker with recording collaborators and a manual clock.
pub struct PickerTestRule {
    picker: PickerNode<TestCell>,
    data_source: Rc<GridDataSource>,
    delegate: Rc<RecordingDelegate>,
    host: Rc<RefCell<FakeGestureHost>>,
    now: Instant,
}

impl PickerTestRule {
    /// Starts a 200x200 picker with `rows[c]` rows in component `c`.
    pub fn builder(rows: Vec<usize>) -> PickerTestRuleBuilder {
        PickerTestRuleBuilder {
            rows,
            size: Size::new(200.0, 200.0),
            spec: PickerSpec::default(),
            widths: Vec::new(),
            row_heights: Vec::new(),
            cell_factory: TestCell::new,
        }
    }

    pub fn new(rows: Vec<usize>) -> Self {
        Self::builder(rows).build()
    }

    pub fn picker(&self) -> &PickerNode<TestCell> {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut PickerNode<TestCell> {
        &mut self.picker
    }

    /// Hands the picker out, e.g. to observe what dropping it does.
    pub fn into_picker(self) -> PickerNode<TestCell> {
        self.picker
    }

    pub fn data_source(&self) -> &Rc<GridDataSource> {
        &self.data_source
    }

    pub fn delegate(&self) -> &Rc<RecordingDelegate> {
        &self.delegate
    }

    pub fn host(&self) -> &Rc<RefCell<FakeGestureHost>> {
        &self.host
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Ticks the picker at the current time.
    pub fn tick(&mut self) {
        self.picker.tick(self.now);
    }

    /// Moves the clock forward by `duration` and ticks once.
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
        self.tick();
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance(FRAME);
        }
    }

    /// Ticks at 60 Hz until no column is settling. Returns the frame count.
    pub fn run_animations(&mut self) -> usize {
        // The first tick latches the start time of fresh animations.
        self.tick();
        let mut frames = 0;
        while self.picker.is_animating() {
            self.advance(FRAME);
            frames += 1;
            if frames > MAX_ANIMATION_FRAMES {
                panic!("Picker failed to settle after {MAX_ANIMATION_FRAMES} frames");
            }
        }
        frames
    }

    /// Runs `block` with touch injection at the center of `component`.
    pub fn perform_drag(&mut self, component: usize, block: impl FnOnce(&mut DragInjectionScope)) {
        let frame = self.picker.frame_for_component(component);
        let location = Point::new(frame.x + frame.width / 2.0, 0.0);
        let mut scope = DragInjectionScope {
            rule: self,
            location,
        };
        block(&mut scope);
    }

    pub fn send_pan(&mut self, event: PanEvent) {
        self.picker.handle_pan(event);
    }
}

/// Injects a pan gesture into a [`PickerTestRule`].
///
/// Distances are in the host's y-down coordinates: a negative `move_by`
/// drags the finger up and scrolls toward later rows.
pub struct DragInjectionScope<'a> {
    rule: &'a mut PickerTestRule,
    location: Point,
}

impl DragInjectionScope<'_> {
    /// Puts the finger down. `at` overrides the column center.
    pub fn down(&mut self, at: Option<Point>) {
        if let Some(at) = at {
            self.location = at;
        }
        self.rule.send_pan(PanEvent::Began {
            location: self.location,
        });
    }

    pub fn move_by(&mut self, dy: f32) {
        self.rule.send_pan(PanEvent::Changed {
            translation: Point::new(0.0, dy),
        });
    }

    /// Lifts the finger moving at `velocity_y` points per second.
    pub fn release(&mut self, velocity_y: f32) {
        self.rule.send_pan(PanEvent::Ended {
            velocity: Point::new(0.0, velocity_y),
        });
    }

    pub fn cancel(&mut self) {
        self.rule.send_pan(PanEvent::Cancelled);
    }

    /// Drags the finger up by `distance` in ten steps and lets go without velocity.
    pub fn swipe_up(&mut self, distance: f32) {
        self.swipe(-distance);
    }

    pub fn swipe_down(&mut self, distance: f32) {
        self.swipe(distance);
    }

    fn swipe(&mut self, dy: f32) {
        self.down(None);
        let steps = 10;
        for _ in 0..steps {
            self.move_by(dy / steps as f32);
        }
        self.release(0.0);
    }
}
