//! Scene graph: named groups of marks, independent of the output format

use enum_dispatch::enum_dispatch;
use facet_svg::{Circle as SvgCircle, Path as SvgPath, SvgNode};

use crate::types::PointPx;

use super::svg::PathData;

/// Presentation attributes of a mark
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkStyle {
    pub fill: Option<&'static str>,
    pub fill_opacity: Option<&'static str>,
    pub stroke: Option<&'static str>,
    pub stroke_opacity: Option<&'static str>,
}

impl MarkStyle {
    /// Solid fill, no stroke
    pub const fn filled(color: &'static str) -> Self {
        MarkStyle {
            fill: Some(color),
            fill_opacity: None,
            stroke: None,
            stroke_opacity: None,
        }
    }
}

/// Common behavior for everything a scene can hold
#[enum_dispatch]
pub trait Mark {
    /// The style the mark is drawn with
    fn style(&self) -> &MarkStyle;

    /// Convert to an SVG node
    fn to_svg(&self) -> SvgNode;
}

/// A closed polygon outline
#[derive(Debug, Clone, PartialEq)]
pub struct PathMark {
    pub data: PathData,
    pub style: MarkStyle,
}

impl Mark for PathMark {
    fn style(&self) -> &MarkStyle {
        &self.style
    }

    fn to_svg(&self) -> SvgNode {
        SvgNode::Path(SvgPath {
            d: Some(self.data.to_string()),
            fill: self.style.fill.map(str::to_string),
            fill_opacity: self.style.fill_opacity.map(str::to_string),
            stroke: self.style.stroke.map(str::to_string),
            stroke_opacity: self.style.stroke_opacity.map(str::to_string),
        })
    }
}

/// A small filled circle
#[derive(Debug, Clone, PartialEq)]
pub struct DotMark {
    pub center: PointPx,
    pub radius: f64,
    pub style: MarkStyle,
}

impl Mark for DotMark {
    fn style(&self) -> &MarkStyle {
        &self.style
    }

    fn to_svg(&self) -> SvgNode {
        SvgNode::Circle(SvgCircle {
            cx: Some(self.center.x.raw()),
            cy: Some(self.center.y.raw()),
            r: Some(self.radius),
            fill: self.style.fill.map(str::to_string),
            fill_opacity: self.style.fill_opacity.map(str::to_string),
            stroke: self.style.stroke.map(str::to_string),
            stroke_opacity: self.style.stroke_opacity.map(str::to_string),
        })
    }
}

/// Every kind of mark, dispatched statically
#[enum_dispatch(Mark)]
#[derive(Debug, Clone, PartialEq)]
pub enum MarkKind {
    PathMark,
    DotMark,
}

/// A named group of marks (`<g class="...">`)
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub class: String,
    pub marks: Vec<MarkKind>,
}

impl Layer {
    pub fn paths(&self) -> impl Iterator<Item = &PathMark> {
        self.marks.iter().filter_map(|m| match m {
            MarkKind::PathMark(p) => Some(p),
            MarkKind::DotMark(_) => None,
        })
    }

    pub fn dots(&self) -> impl Iterator<Item = &DotMark> {
        self.marks.iter().filter_map(|m| match m {
            MarkKind::DotMark(d) => Some(d),
            MarkKind::PathMark(_) => None,
        })
    }
}

/// A 2D draw surface.
///
/// Marks always go to the most recently opened group.
pub trait Scene {
    /// Drop everything drawn so far
    fn clear(&mut self);

    /// Open a new group; following marks are appended to it
    fn group(&mut self, class: &str);

    /// Append a closed path to the open group
    fn path(&mut self, data: PathData, style: &MarkStyle);

    /// Append a circle to the open group
    fn circle(&mut self, center: PointPx, radius: f64, style: &MarkStyle);
}

/// In-memory scene graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    pub layers: Vec<Layer>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first group with the given class
    pub fn layer(&self, class: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.class == class)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.marks.is_empty())
    }

    fn push(&mut self, mark: MarkKind) {
        if self.layers.is_empty() {
            self.group("");
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.marks.push(mark);
        }
    }
}

impl Scene for SceneGraph {
    fn clear(&mut self) {
        self.layers.clear();
    }

    fn group(&mut self, class: &str) {
        self.layers.push(Layer {
            class: class.to_string(),
            marks: Vec::new(),
        });
    }

    fn path(&mut self, data: PathData, style: &MarkStyle) {
        self.push(
            PathMark {
                data,
                style: style.clone(),
            }
            .into(),
        );
    }

    fn circle(&mut self, center: PointPx, radius: f64, style: &MarkStyle) {
        self.push(
            DotMark {
                center,
                radius,
                style: style.clone(),
            }
            .into(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn marks_land_in_the_open_group() {
        let mut scene = SceneGraph::new();
        scene.group("a");
        scene.circle(Point::px(1.0, 2.0), 2.0, &MarkStyle::filled("black"));
        scene.group("b");
        scene.path(PathData::new().m(0.0, 0.0).l(1.0, 0.0).l(1.0, 1.0).z(), &MarkStyle::default());
        scene.circle(Point::px(3.0, 4.0), 2.0, &MarkStyle::filled("red"));

        let a = scene.layer("a").unwrap();
        let b = scene.layer("b").unwrap();
        assert_eq!(a.dots().count(), 1);
        assert_eq!(a.paths().count(), 0);
        assert_eq!(b.dots().count(), 1);
        assert_eq!(b.paths().count(), 1);
        assert_eq!(b.dots().next().unwrap().style().fill, Some("red"));
    }

    #[test]
    fn clear_empties_the_scene() {
        let mut scene = SceneGraph::new();
        scene.circle(Point::px(1.0, 2.0), 2.0, &MarkStyle::filled("black"));
        assert!(!scene.is_empty());
        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.layers.is_empty());
    }

    #[test]
    fn dot_converts_to_svg_circle() {
        let dot = MarkKind::from(DotMark {
            center: Point::px(125.0, 71.428_571_428),
            radius: 2.0,
            style: MarkStyle::filled("black"),
        });
        match dot.to_svg() {
            SvgNode::Circle(c) => {
                assert_eq!(c.cx, Some(125.0));
                assert_eq!(c.cy, Some(71.428_571_428));
                assert_eq!(c.r, Some(2.0));
                assert_eq!(c.fill.as_deref(), Some("black"));
                assert_eq!(c.stroke, None);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }
}
