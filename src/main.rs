use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use miette::{Context, IntoDiagnostic};
use squigmap::{CellAttribution, MapOptions, SourceContext, render_map};

/// Draw a Voronoi map of the points in a CSV table, as SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with `x` and `y` columns; `-` reads stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Where to write the SVG; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the squiggly edge, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Which cells are drawn for the data points
    #[arg(long, value_enum, default_value_t = Attribution::Positional)]
    attribution: Attribution,

    /// Draw only the cell outlines
    #[arg(long)]
    hide_points: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Attribution {
    /// The first N cells, N being the number of rows
    Positional,
    /// The cells whose seed is a row of the table
    BySite,
}

impl From<Attribution> for CellAttribution {
    fn from(a: Attribution) -> Self {
        match a {
            Attribution::Positional => CellAttribution::Positional,
            Attribution::BySite => CellAttribution::BySite,
        }
    }
}

impl Args {
    fn options(&self) -> MapOptions {
        MapOptions {
            seed: self.seed,
            attribution: self.attribution.into(),
            show_points: !self.hide_points,
            ..MapOptions::default()
        }
    }
}

fn main() -> miette::Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let src = if args.input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .into_diagnostic()
            .wrap_err("reading stdin")?;
        SourceContext::new("<stdin>", text)
    } else {
        let text = std::fs::read_to_string(&args.input)
            .into_diagnostic()
            .wrap_err_with(|| format!("reading {}", args.input.display()))?;
        SourceContext::new(args.input.display().to_string(), text)
    };

    let svg = render_map(&src, &args.options())?;

    match &args.output {
        Some(path) => std::fs::write(path, svg)
            .into_diagnostic()
            .wrap_err_with(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{svg}").into_diagnostic()?;
        }
    }
    Ok(())
}
