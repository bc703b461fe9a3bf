//! Dial rendering
//!
//! This module is organized into submodules:
//! - `scene`: the retained scene graph, built once per dial
//! - `ticks`: active tick range and tick geometry
//! - `labels`: target/ambient label text and placement
//! - `stylesheet`: the optional embedded CSS
//!
//! A render pass never adds or removes elements. It only rewrites tick paths,
//! label text and positions, and class lists.

pub mod labels;
pub mod scene;
pub mod stylesheet;
pub mod ticks;

pub use scene::{ClassList, Scene};
pub use ticks::{ActiveRange, active_range, tick_index};

use crate::config::DialConfig;
use crate::state::DialState;

/// Root class prefix carrying the HVAC state
pub const STATE_CLASS_PREFIX: &str = "dial--state--";

/// Recompute every dynamic part of the scene from the current state.
pub fn render(scene: &mut Scene, config: &DialConfig, state: &DialState) {
    render_name(scene, state);
    render_hvac_state(scene, state);
    ticks::render_ticks(scene, config, state);
    labels::render_target_temperature(scene, state);
    labels::render_ambient_temperature(scene, config, state);
    render_leaf(scene, state);
    render_away(scene, state);

    crate::log::debug!(
        target_temperature = state.target_temperature(),
        ambient_temperature = state.ambient_temperature(),
        hvac_state = state.hvac_state().as_str(),
        "render pass"
    );
}

fn render_name(scene: &mut Scene, state: &DialState) {
    scene.lbl_name.content = state.name().to_string();
}

fn render_hvac_state(scene: &mut Scene, state: &DialState) {
    scene.root_classes.remove_prefixed(STATE_CLASS_PREFIX);
    scene
        .root_classes
        .add(&format!("{}{}", STATE_CLASS_PREFIX, state.hvac_state()));
}

fn render_leaf(scene: &mut Scene, state: &DialState) {
    scene.root_classes.toggle("has-leaf", state.has_leaf());
}

fn render_away(scene: &mut Scene, state: &DialState) {
    scene.root_classes.toggle("away", state.away());
}
