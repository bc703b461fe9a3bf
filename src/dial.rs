//! The dial widget: owns config, state and scene, and renders on every
//! state change.

use glam::{DVec2, dvec2};

use crate::config::{DRAG_LOCK_AXIS_DISTANCE, DialConfig, DialOptions, TargetCallback};
use crate::container::Container;
use crate::errors::{ConfigError, RenderError};
use crate::geometry::clamp;
use crate::render::{self, Scene};
use crate::state::{DialState, HvacState, IntoHvacState, Truthy};

/// Build a dial bound to `container` and render it once.
pub fn create_dial<C: Container>(container: C, options: DialOptions) -> Result<Dial<C>, ConfigError> {
    Dial::new(container, options)
}

/// A thermostat dial.
///
/// The host changes what the dial shows only through the `set_*` methods;
/// each stored value triggers a full render pass and hands the scene to the
/// container.
pub struct Dial<C> {
    config: DialConfig,
    state: DialState,
    scene: Scene,
    container: C,
    on_target_temperature_change: Option<TargetCallback>,
    render_count: u64,
}

impl<C: Container> Dial<C> {
    pub fn new(container: C, mut options: DialOptions) -> Result<Self, ConfigError> {
        let config = DialConfig::from_options(&options)?;
        let state = DialState::new(&config);
        let scene = Scene::build(&config);
        crate::log::debug!(
            size = config.size_preset.as_str(),
            ticks = config.num_ticks,
            min = config.min_value,
            max = config.max_value,
            "dial created"
        );
        let mut dial = Self {
            config,
            state,
            scene,
            container,
            on_target_temperature_change: options.on_target_temperature_change.take(),
            render_count: 0,
        };
        dial.render();
        Ok(dial)
    }

    fn render(&mut self) {
        render::render(&mut self.scene, &self.config, &self.state);
        self.render_count += 1;
        self.container.present(&self.scene);
    }

    fn render_if(&mut self, stored: bool) {
        if stored {
            self.render();
        }
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn state(&self) -> &DialState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn into_container(self) -> C {
        self.container
    }

    /// Number of render passes so far, including the one at construction.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn to_svg_string(&self) -> Result<String, RenderError> {
        self.scene.to_svg_string()
    }

    pub fn target_temperature(&self) -> f64 {
        self.state.target_temperature()
    }

    pub fn ambient_temperature(&self) -> f64 {
        self.state.ambient_temperature()
    }

    pub fn hvac_state(&self) -> HvacState {
        self.state.hvac_state()
    }

    pub fn has_leaf(&self) -> bool {
        self.state.has_leaf()
    }

    pub fn away(&self) -> bool {
        self.state.away()
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    pub fn set_target_temperature(&mut self, value: f64) {
        let stored = self.state.apply_target_temperature(&self.config, value);
        if !stored {
            crate::log::debug!(value, "ignoring non-finite target temperature");
        }
        self.render_if(stored);
    }

    pub fn set_ambient_temperature(&mut self, value: f64) {
        let stored = self.state.apply_ambient_temperature(value);
        if !stored {
            crate::log::debug!(value, "ignoring non-finite ambient temperature");
        }
        self.render_if(stored);
    }

    /// Unknown states are dropped without a render.
    pub fn set_hvac_state(&mut self, value: impl IntoHvacState) {
        let stored = self.state.apply_hvac_state(value);
        self.render_if(stored);
    }

    pub fn set_has_leaf(&mut self, value: impl Truthy) {
        let stored = self.state.apply_has_leaf(value);
        self.render_if(stored);
    }

    pub fn set_away(&mut self, value: impl Truthy) {
        let stored = self.state.apply_away(value);
        self.render_if(stored);
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        let stored = self.state.apply_name(value);
        self.render_if(stored);
    }

    /// Clockwise angle of `point` around the dial center, measured from
    /// 12 o'clock, in `[0, 360)`.
    pub fn angle_at(&self, point: DVec2) -> f64 {
        let d = point - DVec2::splat(self.config.radius());
        d.x.atan2(-d.y).to_degrees().rem_euclid(360.0)
    }

    /// Temperature under `point`, or `None` when the pointer is too close to
    /// the center to have a meaningful angle.
    pub fn temperature_at(&self, point: DVec2) -> Option<f64> {
        let center = DVec2::splat(self.config.radius());
        if point.distance(center) < DRAG_LOCK_AXIS_DISTANCE {
            return None;
        }
        let angle = self.angle_at(point);
        let rotation = if angle > 180.0 { angle - 360.0 } else { angle };
        let config = &self.config;
        let fraction = (rotation + config.offset_degrees()) / config.tick_degrees;
        Some(clamp(
            config.min_value + fraction * config.range(),
            config.min_value,
            config.max_value,
        ))
    }

    /// Set the target from a pointer position on the dial, as a drag would.
    ///
    /// Returns the normalized target that was stored and reported to the
    /// change callback.
    pub fn set_target_from_pointer(&mut self, x: f64, y: f64) -> Option<f64> {
        let value = self.temperature_at(dvec2(x, y))?;
        self.request_target_temperature(value)
    }

    /// A user-initiated target change: stores, renders, and notifies the
    /// change callback with the normalized value.
    pub fn request_target_temperature(&mut self, value: f64) -> Option<f64> {
        let normalized = DialState::normalize_target(&self.config, value)?;
        self.set_target_temperature(normalized);
        if let Some(callback) = self.on_target_temperature_change.as_mut() {
            callback(normalized);
        }
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Scene;

    fn dial() -> Dial<impl Container> {
        Dial::new(|_: &Scene| {}, DialOptions::new()).unwrap()
    }

    #[test]
    fn angles_are_clockwise_from_top() {
        let dial = dial();
        let eps = 1e-9;
        assert!((dial.angle_at(dvec2(200.0, 0.0)) - 0.0).abs() < eps);
        assert!((dial.angle_at(dvec2(400.0, 200.0)) - 90.0).abs() < eps);
        assert!((dial.angle_at(dvec2(200.0, 400.0)) - 180.0).abs() < eps);
        assert!((dial.angle_at(dvec2(0.0, 200.0)) - 270.0).abs() < eps);
    }

    #[test]
    fn pointer_maps_onto_tick_arc() {
        let dial = dial();
        // Top of the dial is the middle of the range
        assert_eq!(dial.temperature_at(dvec2(200.0, 10.0)), Some(70.0));
        // 3 o'clock: rotation 90 -> (90 + 150) / 300 of the range
        let v = dial.temperature_at(dvec2(390.0, 200.0)).unwrap();
        assert!((v - 82.0).abs() < 1e-9, "{v}");
        // The gap at the bottom clamps to the ends
        assert_eq!(dial.temperature_at(dvec2(201.0, 390.0)), Some(90.0));
        assert_eq!(dial.temperature_at(dvec2(199.0, 390.0)), Some(50.0));
        // Too close to the center
        assert_eq!(dial.temperature_at(dvec2(205.0, 205.0)), None);
    }
}
