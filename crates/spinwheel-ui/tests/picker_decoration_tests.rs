use spinwheel_testing::PickerTestRule;
use spinwheel_ui::{Background, Color, PickerSpec, Rect, Size, TextureId};

#[test]
fn indicator_spans_control_at_tallest_row() {
    let rule = PickerTestRule::builder(vec![10, 10])
        .with_row_heights(vec![Some(30.0), Some(50.0)])
        .build();
    let picker = rule.picker();

    assert!(picker.shows_selection_indicator());
    let indicator = picker.selection_indicator().unwrap();
    assert_eq!(indicator.size, Size::new(200.0, 50.0));
    assert_eq!(indicator.color, Color::WHITE);
    assert_eq!(picker.mask(), Rect::new(-100.0, -100.0, 200.0, 200.0));
}

#[test]
fn indicator_can_be_hidden_and_recolored() {
    let mut rule = PickerTestRule::new(vec![10]);
    let red = Color::rgba(1.0, 0.0, 0.0, 1.0);

    rule.picker_mut().set_indicator_color(red);
    assert_eq!(rule.picker().selection_indicator().unwrap().color, red);

    rule.picker_mut().set_shows_selection_indicator(false);
    assert!(rule.picker().selection_indicator().is_none());

    rule.picker_mut().set_shows_selection_indicator(true);
    let indicator = rule.picker().selection_indicator().unwrap();
    assert_eq!(indicator.color, red);
    assert_eq!(indicator.size, Size::new(200.0, 44.0));
}

#[test]
fn hidden_indicator_stays_hidden_across_reload() {
    let mut rule = PickerTestRule::builder(vec![10])
        .with_spec(PickerSpec::default().shows_selection_indicator(false))
        .build();
    assert!(rule.picker().selection_indicator().is_none());

    rule.picker_mut().reload();
    assert!(rule.picker().selection_indicator().is_none());
}

#[test]
fn background_color_and_texture() {
    let mut rule = PickerTestRule::new(vec![10]);
    assert_eq!(rule.picker().background(), Background::Clear);

    rule.picker_mut().set_background_color(Color::BLACK);
    assert_eq!(rule.picker().background(), Background::Color(Color::BLACK));

    rule.picker_mut().set_background_texture(Some(TextureId(7)));
    assert_eq!(rule.picker().background(), Background::Texture(TextureId(7)));

    rule.picker_mut().set_background_texture(None);
    assert_eq!(rule.picker().background(), Background::Clear);
}

#[test]
fn cell_z_position_comes_from_spec() {
    let rule = PickerTestRule::builder(vec![10])
        .with_spec(PickerSpec::default().cell_z_position(3.0))
        .build();

    assert_eq!(rule.picker().visible_cell(0, 0).unwrap().z_position, 3.0);
}
