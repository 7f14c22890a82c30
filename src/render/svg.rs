//! SVG generation

use std::fmt;

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Group, Svg, SvgNode, facet_xml};

use crate::errors::RenderError;
use crate::types::Canvas;

use super::scene::{Mark, SceneGraph};

/// Path `d` attribute builder: absolute move/line commands and close.
///
/// Renders as `M x,y L x,y ... Z` without separating spaces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathCommand {
    Move(f64, f64),
    Line(f64, f64),
    Close,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to an absolute position
    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Move(x, y));
        self
    }

    /// Line to an absolute position
    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Line(x, y));
        self
    }

    /// Close the current subpath
    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Closed polygon through `points` in order
    pub fn polygon(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut data = PathData::new();
        for (i, (x, y)) in points.into_iter().enumerate() {
            data = if i == 0 { data.m(x, y) } else { data.l(x, y) };
        }
        data.z()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match cmd {
                PathCommand::Move(x, y) => write!(f, "M{},{}", fmt_num(*x), fmt_num(*y))?,
                PathCommand::Line(x, y) => write!(f, "L{},{}", fmt_num(*x), fmt_num(*y))?,
                PathCommand::Close => write!(f, "Z")?,
            }
        }
        Ok(())
    }
}

/// Build the SVG document for a scene: one outer group holding a `<g>` per
/// scene layer, in drawing order.
pub fn to_svg(scene: &SceneGraph, canvas: Canvas) -> Svg {
    let layers = scene
        .layers
        .iter()
        .map(|layer| {
            SvgNode::G(Group {
                class: (!layer.class.is_empty()).then(|| layer.class.clone()),
                children: layer.marks.iter().map(|m| m.to_svg()).collect(),
            })
        })
        .collect();

    let mut svg = Svg::sized(canvas.width, canvas.height);
    svg.children.push(SvgNode::G(Group {
        class: None,
        children: layers,
    }));
    svg
}

/// Serialize a scene to SVG text, numbers in the short `fmt_num` form
pub fn write_svg(scene: &SceneGraph, canvas: Canvas) -> Result<String, RenderError> {
    fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
        write!(writer, "{}", fmt_num(value))
    }

    let svg = to_svg(scene, canvas);
    let options = SerializeOptions {
        float_formatter: Some(format_float),
        ..Default::default()
    };
    facet_xml::to_string_with_options(&svg, &options).map_err(|e| RenderError::Serialize {
        message: e.to_string(),
    })
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    s.to_string()
}
