//! Geometry functions: rotations, path strings, numeric helpers
//!
//! Everything here is pure. Coordinates are SVG pixels (Y-down), so a
//! positive angle turns clockwise on screen.

use glam::{DVec2, dvec2};

/// Rotate `point` about `origin` by `angle` degrees.
pub fn rotate_point(point: DVec2, angle: f64, origin: DVec2) -> DVec2 {
    let radians = angle.to_radians();
    let (sin, cos) = radians.sin_cos();
    let d = point - origin;
    dvec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + origin
}

/// Rotate every point about `origin` by `angle` degrees, preserving order.
pub fn rotate_points(points: &[DVec2], angle: f64, origin: DVec2) -> Vec<DVec2> {
    points
        .iter()
        .map(|&p| rotate_point(p, angle, origin))
        .collect()
}

/// Closed polygon path through `points`: `M x y L x y ... Z`.
pub fn points_to_path(points: &[DVec2]) -> String {
    let mut d = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i > 0 { 'L' } else { 'M' };
            format!("{}{} {}", cmd, fmt_num(p.x), fmt_num(p.y))
        })
        .collect::<Vec<_>>()
        .join(" ");
    d.push('Z');
    d
}

/// A full circle expressed as two arcs, so it can be combined with other
/// subpaths (see [`donut_path`]).
pub fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    format!(
        "M {},{} m {},0 a {},{} 0 1,0 {},0 a {},{} 0 1,0 {},0 z",
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(-r),
        fmt_num(r),
        fmt_num(r),
        fmt_num(r * 2.0),
        fmt_num(r),
        fmt_num(r),
        fmt_num(-r * 2.0),
    )
}

/// A ring: the outer circle followed by the inner one. Filled with the
/// even-odd rule the inner disc is cut out.
pub fn donut_path(cx: f64, cy: f64, r_outer: f64, r_inner: f64) -> String {
    format!(
        "{} {}",
        circle_path(cx, cy, r_outer),
        circle_path(cx, cy, r_inner)
    )
}

/// Restrict `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics; a NaN value passes through.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Round to the nearest multiple of 0.5 (`round(v * 2) / 2`, ties away from zero).
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Format a number with up to 6 significant figures, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return if value.is_finite() {
            "0".to_string()
        } else {
            value.to_string()
        };
    }

    // Round to specified significant figures
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
