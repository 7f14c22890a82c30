//! Linear data-space → display-space mappings and the tessellation extent

use crate::bounds::Bounds;
use crate::types::{Canvas, Point, PointPx, Px, RawPoint};

/// Monotonic linear map from a domain interval to a range interval.
///
/// A zero-width domain maps every input to the midpoint of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// Map a data-space value to display space
    pub fn apply(&self, value: f64) -> Px {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        Px(r0 + t * (r1 - r0))
    }
}

/// Clip rectangle for the tessellation, `[[x0, y0], [x1, y1]]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: PointPx,
    pub max: PointPx,
}

impl Extent {
    /// The whole canvas
    pub fn of(canvas: Canvas) -> Self {
        Extent {
            min: Point::px(0.0, 0.0),
            max: Point::px(canvas.width, canvas.height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x.0 - self.min.x.0
    }

    pub fn height(&self) -> f64 {
        self.max.y.0 - self.min.y.0
    }
}

/// Both axis scales plus the clip extent for one canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub extent: Extent,
}

impl Scales {
    /// x maps onto the middle half of the width; y onto the middle half of
    /// the height, flipped so larger data values sit higher on the canvas.
    pub fn new(bounds: &Bounds, canvas: Canvas) -> Self {
        let (w, h) = (canvas.width, canvas.height);
        Scales {
            x: LinearScale::new(
                (bounds.min_x as f64, bounds.max_x as f64),
                (w / 4.0, 3.0 * w / 4.0),
            ),
            y: LinearScale::new(
                (bounds.min_y as f64, bounds.max_y as f64),
                (3.0 * h / 4.0, h / 4.0),
            ),
            extent: Extent::of(canvas),
        }
    }

    /// Convert a data-space point to display space
    pub fn point(&self, p: &RawPoint) -> PointPx {
        Point {
            x: self.x.apply(p.x.value),
            y: self.y.apply(p.y.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Bounds {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[test]
    fn x_maps_domain_ends_to_quarter_points() {
        let scales = Scales::new(&bounds(0, 0, 10, 10), Canvas::DEFAULT);
        assert_eq!(scales.x.apply(0.0), Px(125.0));
        assert_eq!(scales.x.apply(10.0), Px(375.0));
        assert_eq!(scales.x.apply(5.0), Px(250.0));
    }

    #[test]
    fn y_is_flipped() {
        let scales = Scales::new(&bounds(0, 0, 10, 10), Canvas::DEFAULT);
        assert_eq!(scales.y.apply(0.0), Px(375.0));
        assert_eq!(scales.y.apply(10.0), Px(125.0));
    }

    #[test]
    fn x_is_monotonic() {
        let scales = Scales::new(&bounds(-30, 0, 70, 1), Canvas::DEFAULT);
        let mut prev = scales.x.apply(-100.0);
        for v in -99..200 {
            let next = scales.x.apply(v as f64);
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn zero_width_domain_maps_to_range_midpoint() {
        let scales = Scales::new(&bounds(5, 5, 5, 5), Canvas::DEFAULT);
        assert_eq!(scales.x.apply(5.0), Px(250.0));
        assert_eq!(scales.y.apply(5.0), Px(250.0));
        assert_eq!(scales.x.apply(-1000.0), Px(250.0));
    }

    #[test]
    fn values_outside_domain_extrapolate() {
        let scales = Scales::new(&bounds(0, 0, 10, 10), Canvas::DEFAULT);
        assert_eq!(scales.x.apply(20.0), Px(625.0));
        assert_eq!(scales.y.apply(-10.0), Px(625.0));
    }

    #[test]
    fn extent_covers_canvas() {
        let canvas = Canvas {
            width: 640.0,
            height: 480.0,
        };
        let scales = Scales::new(&bounds(0, 0, 1, 1), canvas);
        assert_eq!(scales.extent.min, Point::px(0.0, 0.0));
        assert_eq!(scales.extent.max, Point::px(640.0, 480.0));
        assert_eq!(scales.extent.width(), 640.0);
        assert_eq!(scales.extent.height(), 480.0);
    }
}
