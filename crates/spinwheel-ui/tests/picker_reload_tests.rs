use spinwheel_foundation::{CellReusePool, ReusableCell};
use spinwheel_testing::{GridDataSource, PickerTestRule, TestCell};
use spinwheel_ui::{PickerDataSource, PickerNode, Point, Size};
use std::rc::Rc;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn reload_fills_each_column_from_first_row() {
    let rule = PickerTestRule::new(vec![100, 100]);
    let picker = rule.picker();

    assert_eq!(picker.number_of_components(), 2);
    for component in 0..2 {
        let geometry = *picker.columns()[component].geometry();
        assert_eq!(picker.offset_for_component(component), 22.0);
        assert_eq!(picker.selected_row(component), 0);
        assert_eq!(
            picker.visible_rows(component),
            geometry.visible_rows(picker.offset_for_component(component))
        );
        assert_eq!(picker.visible_rows(component), vec![0, 1, 2]);
        assert_eq!(picker.width_for_component(component), 100.0);
        assert_eq!(picker.row_height_for_component(component), 44.0);
        assert_eq!(picker.content_size_for_component(component), Size::new(100.0, 4400.0));
    }

    let stats = picker.stats();
    assert_eq!(stats.cells_in_use, 6);
    assert_eq!(stats.total_created, 6);
    assert_eq!(stats.cells_in_pool, 0);

    // Reload does not report a selection.
    assert!(rule.delegate().selections().is_empty());
    assert_eq!(
        rule.delegate().displayed(),
        vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    );
}

#[test]
fn reload_places_and_fades_cells() {
    let rule = PickerTestRule::new(vec![100, 100]);
    let picker = rule.picker();

    let first = picker.visible_cell(0, 0).unwrap();
    assert_eq!(first.position, Point::new(50.0, -22.0));
    assert_eq!(first.z_position, 100.0);
    assert_eq!(first.attached_to, Some(0));
    assert_eq!(first.label, "0:0");

    // Five-row window: the centered row is opaque, each step away loses a third.
    assert!(approx(first.alpha, 1.0));
    assert!(approx(picker.visible_cell(1, 0).unwrap().alpha, 2.0 / 3.0));
    assert!(approx(picker.visible_cell(2, 0).unwrap().alpha, 1.0 / 3.0));

    let second_column = picker.visible_cell(1, 1).unwrap();
    assert_eq!(second_column.label, "1:1");
    assert_eq!(second_column.attached_to, Some(1));
}

#[test]
fn reload_recycles_previous_cells() {
    let mut rule = PickerTestRule::new(vec![100, 100]);
    rule.data_source().clear_requests();

    rule.picker_mut().reload();

    let requests = rule.data_source().requests();
    let pooled: Vec<usize> = requests.iter().map(|r| r.pooled).collect();
    assert_eq!(pooled, vec![6, 5, 4, 3, 2, 1]);

    let stats = rule.picker().stats();
    assert_eq!(stats.total_created, 6);
    assert_eq!(stats.reuse_count, 6);
    assert_eq!(stats.cells_in_pool, 0);
    assert_eq!(stats.cells_in_use, 6);
}

#[test]
fn reload_picks_up_new_row_counts() {
    let mut rule = PickerTestRule::new(vec![100, 100]);
    rule.picker_mut().select_row(80, 0, false);

    rule.data_source().set_rows(vec![3]);
    rule.picker_mut().reload();

    let picker = rule.picker();
    assert_eq!(picker.number_of_components(), 1);
    assert_eq!(picker.number_of_rows_in_component(0), 3);
    assert_eq!(picker.width_for_component(0), 200.0);
    assert_eq!(picker.selected_row(0), 0);
    assert_eq!(picker.visible_rows(0), vec![0, 1, 2]);

    let stats = picker.stats();
    assert_eq!(stats.cells_in_use + stats.cells_in_pool, stats.total_created);
}

#[test]
fn reload_applies_delegate_layout() {
    let rule = PickerTestRule::builder(vec![100, 100, 100])
        .with_widths(vec![Some(40.0), None, Some(60.0)])
        .with_row_heights(vec![Some(30.0), Some(0.0)])
        .build();
    let picker = rule.picker();

    assert_eq!(picker.width_for_component(0), 40.0);
    assert_eq!(picker.width_for_component(1), 200.0 / 3.0);
    assert_eq!(picker.width_for_component(2), 60.0);

    assert_eq!(picker.frame_for_component(0).x, -100.0);
    assert_eq!(picker.frame_for_component(1).x, -60.0);

    assert_eq!(picker.row_height_for_component(0), 30.0);
    // Unusable heights fall back to the default.
    assert_eq!(picker.row_height_for_component(1), 44.0);
    assert_eq!(picker.row_height_for_component(2), 44.0);

    assert_eq!(picker.offset_for_component(0), 15.0);
    assert_eq!(picker.visible_rows(0), vec![0, 1, 2, 3]);
    assert_eq!(picker.columns()[0].cells().fade_rows(), 7);
}

#[test]
fn reload_with_empty_column() {
    let rule = PickerTestRule::new(vec![0, 5]);
    let picker = rule.picker();

    assert!(picker.visible_rows(0).is_empty());
    assert_eq!(picker.selected_row(0), 0);
    assert_eq!(picker.visible_rows(1), vec![0, 1, 2]);
}

#[test]
fn reload_with_no_components() {
    let rule = PickerTestRule::new(Vec::new());
    let picker = rule.picker();

    assert_eq!(picker.number_of_components(), 0);
    assert!(picker.columns().is_empty());
    assert_eq!(picker.stats().cells_in_use, 0);
}

#[test]
fn reload_without_data_source_does_nothing() {
    let mut picker: PickerNode<TestCell> = PickerNode::new(Point::ZERO, Size::new(200.0, 200.0));
    picker.register_identifier("cell", TestCell::new);

    picker.reload();

    assert!(picker.columns().is_empty());
    assert_eq!(picker.number_of_components(), 1);
    assert_eq!(picker.stats().total_created, 0);
}

#[test]
fn components_are_read_from_source_before_first_reload() {
    let rule = PickerTestRule::builder(vec![10, 10, 10]).build_unloaded();
    assert_eq!(rule.picker().number_of_components(), 3);
    assert!(rule.picker().columns().is_empty());
}

#[test]
fn dropped_data_source_makes_reload_a_no_op() {
    let mut picker: PickerNode<TestCell> = PickerNode::new(Point::ZERO, Size::new(200.0, 200.0));
    picker.register_identifier("cell", TestCell::new);
    {
        let source = Rc::new(GridDataSource::new(vec![10]));
        picker.set_data_source(&source);
    }

    picker.reload();

    assert!(picker.columns().is_empty());
}

struct NoCells;

impl PickerDataSource<TestCell> for NoCells {
    fn number_of_rows(&self, _component: usize) -> usize {
        10
    }

    fn cell_for_row(
        &self,
        _cells: &mut CellReusePool<TestCell>,
        _row: usize,
        _component: usize,
    ) -> Option<ReusableCell<TestCell>> {
        None
    }
}

#[test]
#[should_panic(expected = "no cell for row 0 in component 0")]
fn reload_panics_when_source_returns_no_cell() {
    let source = Rc::new(NoCells);
    let mut picker: PickerNode<TestCell> = PickerNode::new(Point::ZERO, Size::new(200.0, 200.0));
    picker.set_data_source(&source);
    picker.reload();
}

#[test]
#[should_panic(expected = "no identifier is registered")]
fn reload_panics_when_nothing_registered() {
    let source = Rc::new(GridDataSource::new(vec![10]));
    let mut picker: PickerNode<TestCell> = PickerNode::new(Point::ZERO, Size::new(200.0, 200.0));
    picker.set_data_source(&source);
    picker.reload();
}

#[test]
#[should_panic(expected = "component 2 out of range")]
fn querying_unknown_component_panics() {
    let rule = PickerTestRule::new(vec![10, 10]);
    rule.picker().selected_row(2);
}
