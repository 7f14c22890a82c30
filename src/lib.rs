use pest_derive::Parser;

pub mod bounds;
pub mod errors;
pub mod log;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod scale;
pub mod squiggle;
pub mod types;
pub mod voronoi;

pub use bounds::Bounds;
pub use errors::{GeometryError, InputError, RenderError, SourceContext};
pub use pipeline::{MapOptions, MapSummary, build_map, create_voronoi, render_map};
pub use render::{CellAttribution, RenderStats, Scene, SceneGraph};
pub use scale::Scales;
pub use types::{Canvas, Datum, Point, PointPx, RawPoint, Site};

#[derive(Parser)]
#[grammar = "csv.pest"]
pub struct CsvParser;

/// Render a CSV point table to an SVG Voronoi map.
///
/// Uses the default 500x500 canvas with fresh squiggly points on every call.
/// Returns the SVG string on success, or an error with diagnostics.
pub fn squigmap(source: &str) -> Result<String, miette::Report> {
    let src = SourceContext::new("<input>", source);
    render_map(&src, &MapOptions::default())
}
