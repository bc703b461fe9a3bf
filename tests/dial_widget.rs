use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thermodial::render::{Scene, active_range};
use thermodial::{
    ConfigError, DialOptions, HvacState, SizePreset, SvgBuffer, TemperatureScale, create_dial,
};

fn counting_dial(options: DialOptions) -> (thermodial::Dial<impl FnMut(&Scene)>, Rc<Cell<usize>>) {
    let presents = Rc::new(Cell::new(0));
    let counter = presents.clone();
    let dial = create_dial(move |_: &Scene| counter.set(counter.get() + 1), options).unwrap();
    (dial, presents)
}

fn active_ticks(scene: &Scene) -> usize {
    scene
        .ticks
        .iter()
        .filter(|t| t.class.as_deref() == Some("active"))
        .count()
}

#[test]
fn renders_once_at_construction_and_on_every_stored_value() {
    let (mut dial, presents) = counting_dial(DialOptions::new());
    assert_eq!(presents.get(), 1);
    assert_eq!(dial.render_count(), 1);

    dial.set_target_temperature(70.0);
    dial.set_target_temperature(70.0);
    assert_eq!(presents.get(), 3, "equal values still render");

    dial.set_name("Hallway");
    dial.set_has_leaf(1);
    dial.set_away("");
    assert_eq!(presents.get(), 6);
    assert_eq!(dial.render_count(), 6);
}

#[test]
fn unknown_hvac_states_are_ignored() {
    let (mut dial, presents) = counting_dial(DialOptions::new());
    dial.set_hvac_state("cooling");
    assert_eq!(presents.get(), 2);

    dial.set_hvac_state("bogus");
    dial.set_hvac_state("Heating");
    assert_eq!(presents.get(), 2);
    assert_eq!(dial.hvac_state(), HvacState::Cooling);
}

#[test]
fn non_finite_temperatures_are_ignored() {
    let (mut dial, presents) = counting_dial(DialOptions::new());
    dial.set_target_temperature(f64::NAN);
    dial.set_ambient_temperature(f64::INFINITY);
    assert_eq!(presents.get(), 1);
    assert_eq!(dial.target_temperature(), 50.0);
}

#[test]
fn temperatures_are_normalized() {
    let (mut dial, _) = counting_dial(DialOptions::new());
    dial.set_target_temperature(999.0);
    assert_eq!(dial.target_temperature(), 90.0);
    dial.set_target_temperature(10.0);
    assert_eq!(dial.target_temperature(), 50.0);
    dial.set_target_temperature(71.3);
    assert_eq!(dial.target_temperature(), 71.5);

    // Ambient is rounded but may sit outside the dial range
    dial.set_ambient_temperature(72.3);
    assert_eq!(dial.ambient_temperature(), 72.5);
    dial.set_ambient_temperature(101.2);
    assert_eq!(dial.ambient_temperature(), 101.0);
}

#[test]
fn callback_fires_for_user_changes_only() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let options = DialOptions::new().on_target_temperature_change(move |t| sink.borrow_mut().push(t));
    let (mut dial, _) = counting_dial(options);

    dial.set_target_temperature(65.0);
    assert!(seen.borrow().is_empty());

    assert_eq!(dial.request_target_temperature(72.2), Some(72.0));
    assert_eq!(dial.set_target_from_pointer(200.0, 10.0), Some(70.0));
    assert_eq!(dial.set_target_from_pointer(203.0, 198.0), None);
    assert_eq!(*seen.borrow(), vec![72.0, 70.0]);
    assert_eq!(dial.target_temperature(), 70.0);
}

#[test]
fn root_classes_follow_state() {
    let (mut dial, _) = counting_dial(DialOptions::new());
    dial.set_hvac_state("heating");
    dial.set_hvac_state(HvacState::Cooling);
    let classes = &dial.scene().root_classes;
    assert!(classes.contains("dial"));
    assert!(classes.contains("dial--state--cooling"));
    assert!(!classes.contains("dial--state--heating"));

    dial.set_has_leaf(true);
    dial.set_away(Some(true));
    assert!(dial.scene().root_classes.contains("has-leaf"));
    assert!(dial.scene().root_classes.contains("away"));

    dial.set_has_leaf(false);
    dial.set_away(0.0);
    assert!(!dial.scene().root_classes.contains("has-leaf"));
    assert!(!dial.scene().root_classes.contains("away"));
}

#[test]
fn active_ticks_span_target_and_ambient() {
    let (mut dial, _) = counting_dial(DialOptions::new());
    dial.set_target_temperature(60.0);
    dial.set_ambient_temperature(70.0);

    let range = active_range(dial.config(), dial.state());
    assert_eq!((range.min, range.max), (38, 75));
    assert_eq!(active_ticks(dial.scene()), 38);

    // Order does not matter
    dial.set_target_temperature(80.0);
    dial.set_ambient_temperature(60.0);
    let range = active_range(dial.config(), dial.state());
    assert_eq!((range.min, range.max), (38, 113));

    // Away lights only the ambient tick
    dial.set_away(true);
    assert_eq!(active_ticks(dial.scene()), 1);
}

#[test]
fn labels_show_whole_degrees_and_halves() {
    let (mut dial, _) = counting_dial(DialOptions::new());
    dial.set_target_temperature(68.5);
    dial.set_ambient_temperature(71.5);
    dial.set_name("Den");

    let scene = dial.scene();
    assert_eq!(scene.lbl_target.content, "68");
    assert!(scene.lbl_target_half_classes.contains("shown"));
    assert_eq!(scene.lbl_ambient.content, "71\u{2075}");
    assert_eq!(scene.lbl_name.content, "Den");
}

#[test]
fn celsius_dials_use_their_own_range() {
    let options = DialOptions::new()
        .scale(TemperatureScale::Celsius)
        .size(SizePreset::Mini);
    let (mut dial, _) = counting_dial(options);
    assert_eq!(dial.config().min_value, 10.0);
    assert_eq!(dial.config().max_value, 30.0);
    assert_eq!(dial.scene().ticks.len(), 38);
    dial.set_target_temperature(35.0);
    assert_eq!(dial.target_temperature(), 30.0);
}

#[test]
fn invalid_options_are_rejected() {
    let err = create_dial(|_: &Scene| {}, DialOptions::new().range(80.0, 80.0))
        .err()
        .unwrap();
    assert_eq!(err, ConfigError::InvalidRange { min: 80.0, max: 80.0 });

    let err = create_dial(|_: &Scene| {}, DialOptions::new().tick_degrees(0.0))
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::InvalidTickArc { .. }));
}

#[test]
fn svg_buffer_keeps_latest_document() {
    let options = DialOptions::new().size(SizePreset::Small).embed_style(true);
    let mut dial = create_dial(SvgBuffer::new(), options).unwrap();
    dial.set_hvac_state("cooling");
    dial.set_name("Office");

    let buffer = dial.container();
    assert_eq!(buffer.presents(), 3);
    let svg = buffer.latest().unwrap();
    assert!(svg.contains("dial__ticks"));
    assert!(svg.contains("dial--state--cooling"));
    assert!(svg.contains("Office"));
    assert!(svg.contains("<style"));
}
