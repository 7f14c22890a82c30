//! Data-space extents of a point set

use crate::errors::InputError;
use crate::types::RawPoint;

/// Minimum and maximum integer coordinates of a point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Scan the points, reading each coordinate as an integer.
    ///
    /// An empty sequence has no bounds and is rejected.
    pub fn from_points(points: &[RawPoint]) -> Result<Bounds, InputError> {
        let (first, rest) = points.split_first().ok_or(InputError::NoPoints)?;
        let (x, y) = (first.x.integer(), first.y.integer());
        let init = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        Ok(rest.iter().fold(init, |b, p| {
            let (x, y) = (p.x.integer(), p.y.integer());
            Bounds {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            }
        }))
    }

    /// Horizontal span (zero when every point shares an x).
    ///
    /// Taken in `f64`: the integer difference overflows for far-apart extremes.
    pub fn width(&self) -> f64 {
        self.max_x as f64 - self.min_x as f64
    }

    /// Vertical span (zero when every point shares a y)
    pub fn height(&self) -> f64 {
        self.max_y as f64 - self.min_y as f64
    }
}
