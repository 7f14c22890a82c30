//! Strongly-typed coordinates for squigmap.
//!
//! Design goals:
//! - Data-space and display-space values never mix
//! - A point carries its phase, so it cannot be scaled twice
//! - Conversions only via `Scales`

use std::fmt;

use glam::{DVec2, dvec2};

use crate::scale::Scales;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Field is empty after trimming
    Empty,
    /// Field does not read as a number
    NotANumber,
    /// Value is NaN or infinite
    NonFinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Empty => write!(f, "value is empty"),
            NumericError::NotANumber => write!(f, "value is not a number"),
            NumericError::NonFinite => write!(f, "value is NaN or infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A data-space coordinate as submitted: the field text and its value.
#[derive(Clone, Debug, PartialEq)]
pub struct Datum {
    pub text: String,
    pub value: f64,
}

impl Datum {
    /// Read a field as a coordinate (rejects empty, non-numeric and non-finite text)
    pub fn try_new(text: impl Into<String>) -> Result<Datum, NumericError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(NumericError::Empty);
        }
        let value: f64 = trimmed.parse().map_err(|_| NumericError::NotANumber)?;
        if !value.is_finite() {
            return Err(NumericError::NonFinite);
        }
        Ok(Datum { text, value })
    }

    /// The coordinate read as an integer (its integer part).
    #[inline]
    pub fn integer(&self) -> i64 {
        self.value.trunc() as i64
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Display-space pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// A point in data space, as parsed from the input table
pub type RawPoint = Point<Datum>;

/// A point in display space (pixels)
pub type PointPx = Point<Px>;

impl Point<Px> {
    pub fn px(x: f64, y: f64) -> Self {
        Point { x: Px(x), y: Px(y) }
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }
}

/// A tessellation seed in one of its two phases.
///
/// Scaling converts `Raw` into `Scaled` exactly once; scaling an already
/// scaled site leaves it untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Site {
    Raw(RawPoint),
    Scaled(PointPx),
}

impl Site {
    /// Replace data-space coordinates with display-space ones, in place.
    pub fn scale(&mut self, scales: &Scales) {
        if let Site::Raw(raw) = self {
            *self = Site::Scaled(scales.point(raw));
        }
    }

    /// Display-space position, if this site has been scaled
    pub fn scaled(&self) -> Option<PointPx> {
        match self {
            Site::Scaled(p) => Some(*p),
            Site::Raw(_) => None,
        }
    }

    /// Data-space position, if this site has not been scaled yet
    pub fn raw(&self) -> Option<&RawPoint> {
        match self {
            Site::Raw(p) => Some(p),
            Site::Scaled(_) => None,
        }
    }
}

impl From<RawPoint> for Site {
    fn from(p: RawPoint) -> Self {
        Site::Raw(p)
    }
}

/// Fixed-size drawing surface, in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const DEFAULT: Canvas = Canvas {
        width: 500.0,
        height: 500.0,
    };

    /// Both sides positive and finite
    pub fn is_drawable(&self) -> bool {
        let side = |v: f64| v.is_finite() && v > 0.0;
        side(self.width) && side(self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_reads_trimmed_numbers() {
        let d = Datum::try_new(" 42 ").unwrap();
        assert_eq!(d.value, 42.0);
        assert_eq!(d.integer(), 42);
        assert_eq!(d.text, " 42 ");
    }

    #[test]
    fn datum_integer_truncates() {
        assert_eq!(Datum::try_new("2.9").unwrap().integer(), 2);
        assert_eq!(Datum::try_new("-2.9").unwrap().integer(), -2);
    }

    #[test]
    fn canvas_needs_positive_finite_sides() {
        assert!(Canvas::DEFAULT.is_drawable());
        let canvas = |width, height| Canvas { width, height };
        assert!(!canvas(0.0, 500.0).is_drawable());
        assert!(!canvas(500.0, -1.0).is_drawable());
        assert!(!canvas(f64::INFINITY, 500.0).is_drawable());
        assert!(!canvas(500.0, f64::NAN).is_drawable());
    }

    #[test]
    fn datum_rejects_garbage() {
        assert_eq!(Datum::try_new(""), Err(NumericError::Empty));
        assert_eq!(Datum::try_new("  "), Err(NumericError::Empty));
        assert_eq!(Datum::try_new("ten"), Err(NumericError::NotANumber));
        assert_eq!(Datum::try_new("inf"), Err(NumericError::NonFinite));
        assert_eq!(Datum::try_new("NaN"), Err(NumericError::NonFinite));
    }
}
