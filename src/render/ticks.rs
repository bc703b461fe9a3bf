//! Tick ring: which ticks are lit, and where each one is drawn

use glam::{DVec2, dvec2};

use crate::config::DialConfig;
use crate::geometry::{clamp, points_to_path, rotate_points};
use crate::state::DialState;

use super::scene::Scene;

/// The two tick outlines, drawn at 12 o'clock before rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TickShapes {
    pub normal: [DVec2; 4],
    /// Boundary ticks: wider, and reaching further toward the center
    pub large: [DVec2; 4],
}

impl TickShapes {
    pub fn new(config: &DialConfig) -> Self {
        let r = config.radius();
        let outer = config.ticks_outer_radius();
        let inner = config.ticks_inner_radius();
        let long_inner = inner + config.large_tick_offset;
        Self {
            normal: [
                dvec2(r - 1.0, outer),
                dvec2(r + 1.0, outer),
                dvec2(r + 1.0, inner),
                dvec2(r - 1.0, inner),
            ],
            large: [
                dvec2(r - 1.5, outer),
                dvec2(r + 1.5, outer),
                dvec2(r + 1.5, long_inner),
                dvec2(r - 1.5, long_inner),
            ],
        }
    }
}

/// Inclusive span of lit tick indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRange {
    pub min: usize,
    pub max: usize,
}

impl ActiveRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.min && index <= self.max
    }

    pub fn is_boundary(&self, index: usize) -> bool {
        index == self.min || index == self.max
    }
}

/// Nearest tick to `value`, clamped onto the ring.
pub fn tick_index(config: &DialConfig, value: f64) -> usize {
    let n = config.num_ticks as f64;
    let raw = ((value - config.min_value) / config.range() * n).round();
    clamp(raw, 0.0, n - 1.0) as usize
}

/// Away collapses the range onto the ambient tick; otherwise it spans
/// ambient to target.
pub fn active_range(config: &DialConfig, state: &DialState) -> ActiveRange {
    let ambient = state.ambient_temperature();
    let (low, high) = if state.away() {
        (ambient, ambient)
    } else {
        let target = state.target_temperature();
        (ambient.min(target), ambient.max(target))
    };
    ActiveRange {
        min: tick_index(config, low),
        max: tick_index(config, high),
    }
}

/// Rotation applied to tick `index`.
pub fn tick_angle(config: &DialConfig, index: usize) -> f64 {
    index as f64 * config.tick_step() - config.offset_degrees()
}

pub(super) fn render_ticks(scene: &mut Scene, config: &DialConfig, state: &DialState) {
    let range = active_range(config, state);
    let center = DVec2::splat(config.radius());
    let shapes = &scene.tick_shapes;

    for (i, tick) in scene.ticks.iter_mut().enumerate() {
        let outline = if range.is_boundary(i) {
            &shapes.large
        } else {
            &shapes.normal
        };
        let points = rotate_points(outline, tick_angle(config, i), center);
        tick.d = Some(points_to_path(&points));
        tick.class = range.contains(i).then(|| "active".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialOptions;
    use crate::geometry::rotate_point;

    fn config_with_ticks(num_ticks: usize) -> DialConfig {
        let mut config = DialConfig::from_options(&DialOptions::new()).unwrap();
        config.num_ticks = num_ticks;
        config
    }

    #[test]
    fn index_maps_range_onto_ticks() {
        let config = config_with_ticks(100);
        assert_eq!(tick_index(&config, 60.0), 25);
        assert_eq!(tick_index(&config, 70.0), 50);
        assert_eq!(tick_index(&config, 50.0), 0);
        // The top of the range maps past the last tick and is clamped
        assert_eq!(tick_index(&config, 90.0), 99);
        assert_eq!(tick_index(&config, 20.0), 0);
        assert_eq!(tick_index(&config, 200.0), 99);
    }

    #[test]
    fn range_spans_ambient_to_target() {
        let config = config_with_ticks(100);
        let mut state = DialState::new(&config);
        state.apply_ambient_temperature(60.0);
        state.apply_target_temperature(&config, 70.0);
        assert_eq!(active_range(&config, &state), ActiveRange { min: 25, max: 50 });

        // Order of ambient and target does not matter
        state.apply_ambient_temperature(70.0);
        state.apply_target_temperature(&config, 60.0);
        assert_eq!(active_range(&config, &state), ActiveRange { min: 25, max: 50 });
    }

    #[test]
    fn away_collapses_to_ambient() {
        let config = DialConfig::from_options(&DialOptions::new()).unwrap();
        let mut state = DialState::new(&config);
        state.apply_ambient_temperature(68.0);
        state.apply_target_temperature(&config, 75.0);
        state.apply_away(true);
        let range = active_range(&config, &state);
        let nearest = tick_index(&config, 68.0);
        assert_eq!(range, ActiveRange { min: nearest, max: nearest });
        // (68 - 50) / 40 * 150 = 67.5 -> 68
        assert_eq!(nearest, 68);
    }

    #[test]
    fn render_marks_active_and_enlarges_boundaries() {
        let config = config_with_ticks(100);
        let mut scene = Scene::build(&config);
        let mut state = DialState::new(&config);
        state.apply_ambient_temperature(60.0);
        state.apply_target_temperature(&config, 70.0);
        render_ticks(&mut scene, &config, &state);

        let active: Vec<usize> = scene
            .ticks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.class.as_deref() == Some("active"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, (25..=50).collect::<Vec<_>>());
        assert_eq!(scene.ticks[24].class, None);
        assert_eq!(scene.ticks[51].class, None);

        let center = DVec2::splat(200.0);
        let expected = |i: usize, outline: &[DVec2; 4]| {
            points_to_path(&rotate_points(outline, tick_angle(&config, i), center))
        };
        let shapes = TickShapes::new(&config);
        assert_eq!(scene.ticks[25].d, Some(expected(25, &shapes.large)));
        assert_eq!(scene.ticks[50].d, Some(expected(50, &shapes.large)));
        assert_eq!(scene.ticks[30].d, Some(expected(30, &shapes.normal)));
        assert_eq!(scene.ticks[0].d, Some(expected(0, &shapes.normal)));
    }

    #[test]
    fn arc_is_centered_on_the_bottom() {
        let config = DialConfig::from_options(&DialOptions::new()).unwrap();
        let center = DVec2::splat(config.radius());
        let top = dvec2(config.radius(), 0.0);
        let first = rotate_point(top, tick_angle(&config, 0), center);
        // Just past the last tick is the mirror image of the first
        let end = rotate_point(top, tick_angle(&config, config.num_ticks), center);
        assert!((first.x + end.x - 2.0 * center.x).abs() < 1e-9);
        assert!((first.y - end.y).abs() < 1e-9);
        // And both sit below the center line
        assert!(first.y > center.y);
    }

    #[test]
    fn large_tick_reaches_further_in() {
        let config = DialConfig::from_options(&DialOptions::new()).unwrap();
        let shapes = TickShapes::new(&config);
        assert_eq!(shapes.normal[2].y, 50.0);
        assert_eq!(shapes.large[2].y, 70.0);
        assert_eq!(shapes.large[0].x - shapes.normal[0].x, -0.5);
    }
}
