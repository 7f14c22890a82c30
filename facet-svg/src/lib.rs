//! Facet-derived types for SVG serialization and parsing.
//!
//! Covers the small subset of SVG that a squigmap scene uses: groups,
//! paths and circles, each with fill/stroke presentation attributes.
//!
//! # Example
//!
//! ```rust
//! use facet_svg::Svg;
//!
//! let svg_str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="500" height="500">
//!     <g class="points"><circle cx="10" cy="10" r="2" fill="black"/></g>
//! </svg>"#;
//!
//! let svg: Svg = facet_xml::from_str(svg_str).unwrap();
//! ```

use facet::Facet;
use facet_xml as xml;

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Root SVG element
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Svg {
    #[facet(xml::attribute)]
    pub xmlns: Option<String>,
    #[facet(xml::attribute)]
    pub width: Option<String>,
    #[facet(xml::attribute)]
    pub height: Option<String>,
    #[facet(xml::attribute, rename = "viewBox")]
    pub view_box: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

impl Svg {
    /// An empty document of the given pixel size, with a matching viewBox.
    pub fn sized(width: f64, height: f64) -> Self {
        Svg {
            xmlns: Some(SVG_NS.to_string()),
            width: Some(width.to_string()),
            height: Some(height.to_string()),
            view_box: Some(format!("0 0 {} {}", width, height)),
            children: Vec::new(),
        }
    }
}

/// Any SVG node a scene can contain
#[derive(Facet, Debug, Clone)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
pub enum SvgNode {
    #[facet(rename = "g")]
    G(Group),
    #[facet(rename = "circle")]
    Circle(Circle),
    #[facet(rename = "path")]
    Path(Path),
}

/// SVG group element (`<g>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Group {
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// Presentation attributes shared by shape elements
pub trait PresentationAttrs {
    fn fill(&self) -> Option<&str>;
    fn fill_opacity(&self) -> Option<&str>;
    fn stroke(&self) -> Option<&str>;
    fn stroke_opacity(&self) -> Option<&str>;
}

macro_rules! impl_presentation_attrs {
    ($($ty:ty),*) => {
        $(
            impl PresentationAttrs for $ty {
                fn fill(&self) -> Option<&str> { self.fill.as_deref() }
                fn fill_opacity(&self) -> Option<&str> { self.fill_opacity.as_deref() }
                fn stroke(&self) -> Option<&str> { self.stroke.as_deref() }
                fn stroke_opacity(&self) -> Option<&str> { self.stroke_opacity.as_deref() }
            }
        )*
    };
}

/// SVG circle element (`<circle>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Circle {
    #[facet(xml::attribute)]
    pub cx: Option<f64>,
    #[facet(xml::attribute)]
    pub cy: Option<f64>,
    #[facet(xml::attribute)]
    pub r: Option<f64>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute, rename = "fill-opacity")]
    pub fill_opacity: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-opacity")]
    pub stroke_opacity: Option<String>,
}

/// SVG path element (`<path>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Path {
    #[facet(xml::attribute)]
    pub d: Option<String>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute, rename = "fill-opacity")]
    pub fill_opacity: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-opacity")]
    pub stroke_opacity: Option<String>,
}

impl_presentation_attrs!(Circle, Path);

// Re-export facet_xml for convenience
pub use facet_xml;
