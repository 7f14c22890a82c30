//! Error types with rich diagnostics using miette
//!
//! Input errors carry source spans so a bad field is pointed at directly.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Input Errors
// ============================================================================

/// The submitted text could not be turned into at least one coordinate pair
#[derive(Error, Diagnostic, Debug)]
pub enum InputError {
    #[error("malformed table: {message}")]
    #[diagnostic(code(squigmap::input::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("missing column: {column}")]
    #[diagnostic(
        code(squigmap::input::missing_column),
        help("the header row must name both an `x` and a `y` column")
    )]
    MissingColumn {
        column: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("header has no `{column}`")]
        span: SourceSpan,
    },

    #[error("coordinate {column} on row {row} is not numeric: {reason}")]
    #[diagnostic(code(squigmap::input::not_numeric))]
    NotNumeric {
        column: &'static str,
        row: usize,
        reason: NumericError,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number")]
        span: SourceSpan,
    },

    #[error("no points to draw")]
    #[diagnostic(
        code(squigmap::input::no_points),
        help("add at least one row below the header")
    )]
    NoPoints,

    #[error("site {site} is already in display space")]
    #[diagnostic(
        code(squigmap::input::already_scaled),
        help("pass the raw parsed points; scaled sites cannot be measured again")
    )]
    AlreadyScaled { site: usize },
}

// ============================================================================
// Geometry conditions
// ============================================================================

/// Why a tessellation cell is absent. Never fatal: the cell is left out of
/// the drawing.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("site {site} coincides with site {earlier}")]
    #[diagnostic(code(squigmap::geometry::coincident_site))]
    CoincidentSite { site: usize, earlier: usize },

    #[error("site {site} has a non-finite coordinate")]
    #[diagnostic(code(squigmap::geometry::non_finite_site))]
    NonFiniteSite { site: usize },

    #[error("site {site} lies outside the extent")]
    #[diagnostic(code(squigmap::geometry::outside_extent))]
    OutsideExtent { site: usize },

    #[error("cell of site {site} clips to nothing inside the extent")]
    #[diagnostic(code(squigmap::geometry::empty_cell))]
    EmptyCell { site: usize },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while producing output
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("XML serialization error: {message}")]
    #[diagnostic(code(squigmap::render::serialize))]
    Serialize { message: String },

    #[error("invalid canvas: {width}x{height}")]
    #[diagnostic(
        code(squigmap::render::invalid_canvas),
        help("width and height must be positive and finite")
    )]
    InvalidCanvas { width: f64, height: f64 },
}
