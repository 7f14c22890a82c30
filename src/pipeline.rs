//! One full pass from points to a drawn map

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::bounds::Bounds;
use crate::errors::{InputError, RenderError, SourceContext};
use crate::log;
use crate::parse::parse_points;
use crate::render::{CellAttribution, RenderStats, Scene, SceneGraph, render, write_svg};
use crate::scale::Scales;
use crate::squiggle::create_squiggly_points;
use crate::types::{Canvas, RawPoint, Site};

/// Settings for one map
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Drawing surface size (500x500 unless overridden)
    pub canvas: Canvas,
    /// Seed for the squiggly points; `None` draws fresh ones every run
    pub seed: Option<u64>,
    /// How drawn cells are matched to data points
    pub attribution: CellAttribution,
    /// Draw markers for data and squiggly points
    pub show_points: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::DEFAULT,
            seed: None,
            attribution: CellAttribution::default(),
            show_points: true,
        }
    }
}

impl MapOptions {
    /// Random source for the squiggly points
    pub fn rng(&self) -> Pcg64 {
        match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        }
    }
}

/// What `create_voronoi` computed along the way
#[derive(Debug, Clone, PartialEq)]
pub struct MapSummary {
    pub bounds: Bounds,
    pub scales: Scales,
    pub squiggly: usize,
    pub stats: RenderStats,
}

/// Draw the map of `sites` into `scene`.
///
/// The scene is cleared first. Each site is scaled to display space in
/// place, so on return every site is `Site::Scaled`. Sites must come in raw:
/// an already scaled site has no data-space value to measure bounds with.
pub fn create_voronoi<S, R>(
    sites: &mut [Site],
    options: &MapOptions,
    rng: &mut R,
    scene: &mut S,
) -> miette::Result<MapSummary>
where
    S: Scene + ?Sized,
    R: Rng + ?Sized,
{
    let canvas = options.canvas;
    if !canvas.is_drawable() {
        return Err(RenderError::InvalidCanvas {
            width: canvas.width,
            height: canvas.height,
        }
        .into());
    }

    scene.clear();

    let raw: Vec<RawPoint> = sites
        .iter()
        .enumerate()
        .map(|(i, s)| s.raw().cloned().ok_or(InputError::AlreadyScaled { site: i }))
        .collect::<Result<_, _>>()?;

    let bounds = Bounds::from_points(&raw)?;
    let scales = Scales::new(&bounds, canvas);
    let squiggly = create_squiggly_points(rng, canvas, &scales, &bounds);

    log::info!(
        points = sites.len(),
        squiggly = squiggly.len(),
        min_x = bounds.min_x,
        min_y = bounds.min_y,
        max_x = bounds.max_x,
        max_y = bounds.max_y,
        "creating voronoi map"
    );

    for site in sites.iter_mut() {
        site.scale(&scales);
    }
    let data: Vec<_> = sites.iter().filter_map(Site::scaled).collect();

    let stats = render(
        &data,
        &squiggly,
        &scales.extent,
        options.attribution,
        options.show_points,
        scene,
    );

    Ok(MapSummary {
        bounds,
        scales,
        squiggly: squiggly.len(),
        stats,
    })
}

/// Parse table text and draw its map into a fresh scene graph
pub fn build_map(
    src: &SourceContext,
    options: &MapOptions,
) -> miette::Result<(SceneGraph, MapSummary)> {
    let points = parse_points(src)?;
    let mut sites: Vec<Site> = points.into_iter().map(Site::from).collect();
    let mut scene = SceneGraph::new();
    let summary = create_voronoi(&mut sites, options, &mut options.rng(), &mut scene)?;
    Ok((scene, summary))
}

/// Parse table text and render its map to SVG
pub fn render_map(src: &SourceContext, options: &MapOptions) -> miette::Result<String> {
    let (scene, _) = build_map(src, options)?;
    Ok(write_svg(&scene, options.canvas)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::diagram::{CELL_LAYER, DATA_LAYER, SQUIGGLE_LAYER};
    use crate::types::{Datum, Point};

    fn sites(coords: &[(&str, &str)]) -> Vec<Site> {
        coords
            .iter()
            .map(|(x, y)| {
                let (x, y) = (Datum::try_new(*x).unwrap(), Datum::try_new(*y).unwrap());
                Site::Raw(Point::new(x, y))
            })
            .collect()
    }

    fn seeded(seed: u64) -> MapOptions {
        MapOptions {
            seed: Some(seed),
            ..MapOptions::default()
        }
    }

    #[test]
    fn sites_are_scaled_in_place() {
        let mut s = sites(&[("0", "0"), ("10", "10")]);
        let mut scene = SceneGraph::new();
        let opts = seeded(1);
        create_voronoi(&mut s, &opts, &mut opts.rng(), &mut scene).unwrap();
        assert_eq!(s[0], Site::Scaled(Point::px(125.0, 375.0)));
        assert_eq!(s[1], Site::Scaled(Point::px(375.0, 125.0)));
    }

    #[test]
    fn scaled_sites_are_rejected() {
        let mut s = sites(&[("0", "0"), ("10", "10")]);
        let opts = seeded(1);
        create_voronoi(&mut s, &opts, &mut opts.rng(), &mut SceneGraph::new()).unwrap();
        // a second pass over the same, now scaled, sites must not scale them again
        let err = create_voronoi(&mut s, &opts, &mut opts.rng(), &mut SceneGraph::new())
            .unwrap_err();
        assert!(err.to_string().contains("already"));
        assert_eq!(s[0], Site::Scaled(Point::px(125.0, 375.0)));
    }

    #[test]
    fn scene_is_cleared_before_drawing() {
        let opts = seeded(3);
        let mut scene = SceneGraph::new();
        for _ in 0..2 {
            let mut s = sites(&[("0", "0"), ("10", "0"), ("0", "10"), ("10", "10")]);
            create_voronoi(&mut s, &opts, &mut opts.rng(), &mut scene).unwrap();
        }
        let cell_layers = scene.layers.iter().filter(|l| l.class == CELL_LAYER).count();
        assert_eq!(cell_layers, 1);
        assert_eq!(scene.layer(DATA_LAYER).unwrap().dots().count(), 4);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let src = SourceContext::new("<input>", "x,y\n0,0\n10,0\n0,10\n10,10\n");
        let (a, _) = build_map(&src, &seeded(42)).unwrap();
        let (b, _) = build_map(&src, &seeded(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn squiggly_layer_matches_summary() {
        let src = SourceContext::new("<input>", "x,y\n0,0\n10,0\n0,10\n10,10\n");
        let (scene, summary) = build_map(&src, &seeded(9)).unwrap();
        assert_eq!(
            scene.layer(SQUIGGLE_LAYER).unwrap().dots().count(),
            summary.squiggly
        );
        assert_eq!(summary.stats.squiggly_points, summary.squiggly);
    }

    #[test]
    fn invalid_canvas_is_rejected() {
        let opts = MapOptions {
            canvas: Canvas {
                width: 0.0,
                height: 500.0,
            },
            ..seeded(1)
        };
        let mut s = sites(&[("1", "1")]);
        let err = create_voronoi(&mut s, &opts, &mut opts.rng(), &mut SceneGraph::new())
            .unwrap_err();
        assert!(err.to_string().contains("invalid canvas"));
    }
}
