//! Clipped Voronoi tessellation.
//!
//! Cells come from `voronoice`, clipped to the extent. Before building, sites
//! are screened: a site gets no cell when it coincides with an earlier site,
//! has a non-finite coordinate, or lies outside the extent. A cell that
//! collapses to fewer than three distinct vertices is dropped as well.
//!
//! Collinear seeds have no Delaunay triangulation, so their cells are built
//! as parallel strips between consecutive bisectors instead.

use std::collections::HashMap;

use glam::{DVec2, dvec2};
use voronoice::{BoundingBox, ClipBehavior, Point, VoronoiBuilder};

use crate::errors::GeometryError;
use crate::log;
use crate::scale::Extent;

/// Distances below this are treated as zero
const EPS: f64 = 1.0e-9;

/// One tessellation polygon, owned by the site at index `site`
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub site: usize,
    /// Boundary vertices in order; the polygon closes back to the first one
    pub vertices: Vec<DVec2>,
}

impl Cell {
    /// Shoelace area, independent of winding
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.perp_dot(b)
            })
            .sum();
        twice.abs() / 2.0
    }
}

/// Per-site cells of one point set
#[derive(Debug, Clone)]
pub struct Tessellation {
    cells: Vec<Result<Cell, GeometryError>>,
}

impl Tessellation {
    /// Number of sites (including those without a cell)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell of one site, or why it has none
    pub fn cell(&self, site: usize) -> Option<&Result<Cell, GeometryError>> {
        self.cells.get(site)
    }

    /// Cells in site order, `None` marking a degenerate site
    pub fn polygons(&self) -> impl Iterator<Item = Option<&Cell>> {
        self.cells.iter().map(|c| c.as_ref().ok())
    }

    /// Reasons for every missing cell
    pub fn degenerate(&self) -> impl Iterator<Item = &GeometryError> {
        self.cells.iter().filter_map(|c| c.as_ref().err())
    }
}

/// Exact position key; `+ 0.0` folds -0.0 onto 0.0
fn key(x: f64, y: f64) -> (u64, u64) {
    ((x + 0.0).to_bits(), (y + 0.0).to_bits())
}

/// Compute the cells of `sites`, clipped to `extent`.
pub fn tessellate(sites: &[DVec2], extent: &Extent) -> Tessellation {
    let (min, max) = (extent.min.to_dvec2(), extent.max.to_dvec2());

    // First occurrence of each distinct position
    let mut seen: HashMap<(u64, u64), usize> = HashMap::new();
    let mut status: Vec<Result<(), GeometryError>> = Vec::with_capacity(sites.len());
    for (i, s) in sites.iter().enumerate() {
        if !s.is_finite() {
            status.push(Err(GeometryError::NonFiniteSite { site: i }));
        } else if s.cmplt(min).any() || s.cmpgt(max).any() {
            status.push(Err(GeometryError::OutsideExtent { site: i }));
        } else if let Some(&earlier) = seen.get(&key(s.x, s.y)) {
            status.push(Err(GeometryError::CoincidentSite { site: i, earlier }));
        } else {
            seen.insert(key(s.x, s.y), i);
            status.push(Ok(()));
        }
    }

    let seeds: Vec<usize> = (0..sites.len()).filter(|&i| status[i].is_ok()).collect();
    let mut outlines = vec![Vec::new(); sites.len()];
    match seeds.as_slice() {
        [] => {}
        [only] => outlines[*only] = frame(min, max),
        _ if collinear(sites, &seeds) => strips(sites, &seeds, min, max, &mut outlines),
        _ => diagram(sites, &seeds, &seen, min, max, &mut outlines),
    }

    let cells = status
        .into_iter()
        .zip(outlines)
        .enumerate()
        .map(|(site, (st, mut vertices))| {
            st?;
            dedup_vertices(&mut vertices);
            if vertices.len() < 3 {
                return Err(GeometryError::EmptyCell { site });
            }
            log::trace!(site, vertices = vertices.len(), "cell");
            Ok(Cell { site, vertices })
        })
        .collect::<Vec<_>>();

    log::debug!(
        sites = sites.len(),
        degenerate = cells.iter().filter(|c| c.is_err()).count(),
        "tessellated"
    );

    Tessellation { cells }
}

/// Fill `outlines` from a `voronoice` diagram of the seeds
fn diagram(
    sites: &[DVec2],
    seeds: &[usize],
    seen: &HashMap<(u64, u64), usize>,
    min: DVec2,
    max: DVec2,
    outlines: &mut [Vec<DVec2>],
) {
    let center = (min + max) * 0.5;
    let size = max - min;
    let points: Vec<Point> = seeds
        .iter()
        .map(|&i| Point {
            x: sites[i].x,
            y: sites[i].y,
        })
        .collect();

    let Some(voronoi) = VoronoiBuilder::default()
        .set_sites(points)
        .set_bounding_box(BoundingBox::new(Point { x: center.x, y: center.y }, size.x, size.y))
        .set_clip_behavior(ClipBehavior::Clip)
        .build()
    else {
        log::warn!(seeds = seeds.len(), "no diagram for these seeds");
        return;
    };

    // Cells are matched back by position, so sites voronoice drops stay empty
    for cell in voronoi.iter_cells() {
        let p = cell.site_position();
        if let Some(&site) = seen.get(&key(p.x, p.y)) {
            outlines[site] = cell.iter_vertices().map(|v| dvec2(v.x, v.y)).collect();
        }
    }
}

fn frame(min: DVec2, max: DVec2) -> Vec<DVec2> {
    vec![min, dvec2(max.x, min.y), max, dvec2(min.x, max.y)]
}

/// Every seed lies on the line through the first seed and the farthest one
fn collinear(sites: &[DVec2], seeds: &[usize]) -> bool {
    let origin = sites[seeds[0]];
    let Some(far) = seeds
        .iter()
        .map(|&i| sites[i] - origin)
        .max_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
    else {
        return true;
    };
    let len = far.length();
    seeds
        .iter()
        .all(|&i| far.perp_dot(sites[i] - origin).abs() <= EPS * len * len.max(1.0))
}

/// Cells of collinear seeds: the frame cut by the bisectors with the
/// neighbouring seeds along the line
fn strips(sites: &[DVec2], seeds: &[usize], min: DVec2, max: DVec2, outlines: &mut [Vec<DVec2>]) {
    let origin = sites[seeds[0]];
    let along = seeds
        .iter()
        .map(|&i| sites[i] - origin)
        .max_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .unwrap_or(DVec2::X);

    let mut order = seeds.to_vec();
    order.sort_by(|&a, &b| {
        let (pa, pb) = ((sites[a] - origin).dot(along), (sites[b] - origin).dot(along));
        pa.total_cmp(&pb)
    });

    for (k, &site) in order.iter().enumerate() {
        let s = sites[site];
        let mut polygon = frame(min, max);
        if k > 0 {
            polygon = clip_by_bisector(&polygon, s, sites[order[k - 1]]);
        }
        if let Some(&next) = order.get(k + 1) {
            polygon = clip_by_bisector(&polygon, s, sites[next]);
        }
        outlines[site] = polygon;
    }
}

/// Signed distance of `p` past the bisector of `a` and `b`, scaled by |b - a|.
/// Negative on `a`'s side.
fn bisector_side(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let mid = (a + b) * 0.5;
    (p - mid).dot(b - a)
}

/// Keep the part of `polygon` closer to `a` than to `b` (Sutherland-Hodgman).
fn clip_by_bisector(polygon: &[DVec2], a: DVec2, b: DVec2) -> Vec<DVec2> {
    let Some(&last) = polygon.last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(polygon.len() + 1);
    let mut prev = last;
    let mut prev_d = bisector_side(prev, a, b);
    for &curr in polygon {
        let curr_d = bisector_side(curr, a, b);
        let (prev_in, curr_in) = (prev_d <= EPS, curr_d <= EPS);
        if curr_in {
            if !prev_in {
                out.push(crossing(prev, curr, prev_d, curr_d));
            }
            out.push(curr);
        } else if prev_in {
            out.push(crossing(prev, curr, prev_d, curr_d));
        }
        prev = curr;
        prev_d = curr_d;
    }
    out
}

fn crossing(p: DVec2, q: DVec2, dp: f64, dq: f64) -> DVec2 {
    let t = dp / (dp - dq);
    p + (q - p) * t
}

fn dedup_vertices(polygon: &mut Vec<DVec2>) {
    polygon.dedup_by(|a, b| a.distance_squared(*b) <= EPS * EPS);
    while polygon.len() > 1 {
        let (first, last) = (polygon[0], polygon[polygon.len() - 1]);
        if first.distance_squared(last) <= EPS * EPS {
            polygon.pop();
        } else {
            break;
        }
    }
}
