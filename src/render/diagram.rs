//! Draw the Voronoi map: cell outlines plus the seed points

use glam::DVec2;

use crate::log;
use crate::scale::Extent;
use crate::types::PointPx;
use crate::voronoi::{Cell, tessellate};

use super::scene::{MarkStyle, Scene};
use super::svg::PathData;

/// Group holding the cell outlines
pub const CELL_LAYER: &str = "voronoiLines";
/// Group holding the real data points
pub const DATA_LAYER: &str = "mainVoronoiPoints";
/// Group holding the synthetic boundary points
pub const SQUIGGLE_LAYER: &str = "squigglyPoints";

/// Radius of every point marker, in pixels
pub const POINT_RADIUS: f64 = 2.0;

pub const CELL_STYLE: MarkStyle = MarkStyle {
    fill: Some("green"),
    fill_opacity: Some("100"),
    stroke: Some("black"),
    stroke_opacity: Some("100"),
};
pub const DATA_POINT_STYLE: MarkStyle = MarkStyle::filled("black");
pub const SQUIGGLE_POINT_STYLE: MarkStyle = MarkStyle::filled("red");

/// How drawn cells are matched to the real data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAttribution {
    /// The first N surviving cells, N being the number of data points.
    /// When a data point's cell is degenerate, a cell belonging to a
    /// synthetic point moves up to take its place.
    #[default]
    Positional,
    /// Exactly the surviving cells whose seed is a data point
    BySite,
}

/// What one render pass drew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cell outlines drawn
    pub cells: usize,
    /// Seeds without a cell (real and synthetic)
    pub degenerate: usize,
    /// Black markers drawn
    pub data_points: usize,
    /// Red markers drawn
    pub squiggly_points: usize,
}

impl RenderStats {
    pub fn circles(&self) -> usize {
        self.data_points + self.squiggly_points
    }
}

/// Tessellate data and squiggly points together, then draw the cells
/// attributed to the data points and, if `show_points`, every seed.
///
/// Both point sets must already be in display space.
pub fn render<S: Scene + ?Sized>(
    data: &[PointPx],
    squiggly: &[PointPx],
    extent: &Extent,
    attribution: CellAttribution,
    show_points: bool,
    scene: &mut S,
) -> RenderStats {
    let original_count = data.len();

    let combined: Vec<DVec2> = data
        .iter()
        .chain(squiggly)
        .map(|p| p.to_dvec2())
        .collect();
    let tessellation = tessellate(&combined, extent);

    let degenerate = tessellation
        .degenerate()
        .inspect(|_err| {
            log::debug!(err = %_err, "skipping degenerate cell");
        })
        .count();

    let surviving = tessellation.polygons().flatten();
    let cells: Vec<&Cell> = match attribution {
        CellAttribution::Positional => surviving.take(original_count).collect(),
        CellAttribution::BySite => surviving.filter(|c| c.site < original_count).collect(),
    };

    if attribution == CellAttribution::Positional {
        let foreign = cells.iter().filter(|c| c.site >= original_count).count();
        if foreign > 0 {
            log::warn!(
                foreign,
                "cells of synthetic points drawn in place of degenerate data cells"
            );
        }
    }

    scene.group(CELL_LAYER);
    for cell in &cells {
        let data = PathData::polygon(cell.vertices.iter().map(|v| (v.x, v.y)));
        scene.path(data, &CELL_STYLE);
    }

    let mut stats = RenderStats {
        cells: cells.len(),
        degenerate,
        ..RenderStats::default()
    };

    if show_points {
        scene.group(DATA_LAYER);
        for p in data {
            scene.circle(*p, POINT_RADIUS, &DATA_POINT_STYLE);
        }
        scene.group(SQUIGGLE_LAYER);
        for p in squiggly {
            scene.circle(*p, POINT_RADIUS, &SQUIGGLE_POINT_STYLE);
        }
        stats.data_points = data.len();
        stats.squiggly_points = squiggly.len();
    }

    log::debug!(
        cells = stats.cells,
        degenerate = stats.degenerate,
        circles = stats.circles(),
        "rendered"
    );

    stats
}
