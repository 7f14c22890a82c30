//! Rendering for squigmap diagrams
//!
//! This module is organized into submodules:
//! - `scene`: format-independent scene graph and the `Scene` draw surface
//! - `diagram`: draws cells and seed markers for one tessellation
//! - `svg`: path data, number formatting and SVG serialization

pub mod diagram;
pub mod scene;
pub mod svg;

// Re-export commonly used items
pub use diagram::{CellAttribution, RenderStats, render};
pub use scene::{Mark, MarkKind, MarkStyle, Scene, SceneGraph};
pub use svg::{PathData, to_svg, write_svg};
