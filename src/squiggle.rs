//! Synthetic boundary points that roughen the outer cells of the map.
//!
//! A sparse random scatter is laid in the margins between the scaled data and
//! the canvas edge. Those extra seeds carve the outermost real cells into an
//! irregular, hand-drawn looking coastline instead of straight clip lines.
//!
//! Sampling is a plain Bernoulli trial per grid step: cost grows with the
//! margin area (a few hundred thousand trials on a 500x500 canvas), and there
//! is no spatial correlation between samples.

use rand::Rng;

use crate::bounds::Bounds;
use crate::log;
use crate::scale::Scales;
use crate::types::{Canvas, Point, PointPx};

/// Ratio between the data span and the margin left outside it
pub const K_DISTANCE_RATIO: f64 = 0.7 / 0.15;
/// Probability that any one grid step yields a point
pub const P_VALUE: f64 = 0.01;
/// Gutter kept free along the canvas edge, in pixels
pub const POINTS_RADIUS: f64 = 2.0;

/// Sample the rectangle `[start, end) x [start2, end2)` in unit steps,
/// keeping each step independently with probability `density`.
pub fn generate_region<R: Rng + ?Sized>(
    rng: &mut R,
    start: f64,
    end: f64,
    start2: f64,
    end2: f64,
    density: f64,
) -> Vec<PointPx> {
    let mut points = Vec::new();
    for x in steps(start, end) {
        for y in steps(start2, end2) {
            if rng.r#gen::<f64>() < density {
                points.push(Point::px(x, y));
            }
        }
    }
    points
}

fn steps(start: f64, end: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| start + f64::from(i))
        .take_while(move |v| *v < end)
}

/// Scatter points in the four margins around the scaled data.
///
/// Margins are measured from the data bounds, pushed outward by
/// `span / K_DISTANCE_RATIO` and mapped through the scales. An axis whose
/// span is zero has no margins of its own.
pub fn create_squiggly_points<R: Rng + ?Sized>(
    rng: &mut R,
    canvas: Canvas,
    scales: &Scales,
    bounds: &Bounds,
) -> Vec<PointPx> {
    let (w, h) = (canvas.width, canvas.height);
    let kw = bounds.width() / K_DISTANCE_RATIO;
    let kh = bounds.height() / K_DISTANCE_RATIO;

    let mut points = Vec::new();

    if bounds.width() > 0.0 {
        let left_end = scales.x.apply(bounds.min_x as f64 - kw).raw();
        let right_start = scales.x.apply(bounds.max_x as f64 + kw).raw();

        let left = generate_region(rng, POINTS_RADIUS, left_end, POINTS_RADIUS, h, P_VALUE);
        let right = generate_region(rng, right_start, w, POINTS_RADIUS, h, P_VALUE);
        log::debug!(left = left.len(), right = right.len(), "side margins");
        points.extend(left);
        points.extend(right);
    }

    if bounds.height() > 0.0 {
        // y is flipped: the low data margin is at the bottom of the canvas
        let top_start = scales.y.apply(bounds.min_y as f64 - kh).raw();
        let bottom_end = scales.y.apply(bounds.max_y as f64 + kh).raw();

        let top = generate_region(rng, POINTS_RADIUS, w, top_start, h, P_VALUE);
        let bottom = generate_region(rng, POINTS_RADIUS, w, POINTS_RADIUS, bottom_end, P_VALUE);
        log::debug!(top = top.len(), bottom = bottom.len(), "top/bottom margins");
        points.extend(top);
        points.extend(bottom);
    }

    points
}
