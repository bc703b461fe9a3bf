//! Target and ambient temperature labels

use glam::{DVec2, dvec2};

use crate::config::DialConfig;
use crate::geometry::{clamp, rotate_point};
use crate::state::DialState;

use super::scene::Scene;

/// Angular nudge keeping the ambient label clear of the target tick
pub const AMBIENT_LABEL_NUDGE_DEGREES: f64 = 8.0;

/// Vertical shift applied to the ambient label after rotation
const AMBIENT_LABEL_BASELINE_SHIFT: f64 = 3.0;

/// Appended to the ambient label for half degrees
pub const HALF_DEGREE_GLYPH: char = '\u{2075}';

/// Whole-degree part of a temperature as shown on the dial.
pub fn whole_degrees(value: f64) -> String {
    format!("{}", value.floor() as i64)
}

pub fn has_half(value: f64) -> bool {
    value.fract() != 0.0
}

pub fn ambient_text(value: f64) -> String {
    let mut text = whole_degrees(value);
    if has_half(value) {
        text.push(HALF_DEGREE_GLYPH);
    }
    text
}

/// Where the ambient label goes: a point midway along the tick ring at
/// 12 o'clock, swung round to the ambient reading.
pub fn ambient_label_position(config: &DialConfig, state: &DialState) -> DVec2 {
    let r = config.radius();
    let outer = config.ticks_outer_radius();
    let inner = config.ticks_inner_radius();
    let reference = dvec2(r, outer - (outer - inner) / 2.0);

    let pegged = clamp(state.ambient_temperature(), config.min_value, config.max_value);
    let mut degrees =
        config.tick_degrees * (pegged - config.min_value) / config.range() - config.offset_degrees();
    if pegged > state.target_temperature() {
        degrees += AMBIENT_LABEL_NUDGE_DEGREES;
    } else {
        degrees -= AMBIENT_LABEL_NUDGE_DEGREES;
    }

    let pos = rotate_point(reference, degrees, DVec2::splat(r));
    dvec2(pos.x, pos.y + AMBIENT_LABEL_BASELINE_SHIFT)
}

pub(super) fn render_target_temperature(scene: &mut Scene, state: &DialState) {
    let target = state.target_temperature();
    scene.lbl_target.content = whole_degrees(target);
    scene
        .lbl_target_half_classes
        .toggle("shown", has_half(target));
}

pub(super) fn render_ambient_temperature(scene: &mut Scene, config: &DialConfig, state: &DialState) {
    scene.lbl_ambient.content = ambient_text(state.ambient_temperature());
    let pos = ambient_label_position(config, state);
    scene.lbl_ambient.x = Some(pos.x);
    scene.lbl_ambient.y = Some(pos.y);
}
