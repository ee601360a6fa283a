use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use linegrid::{bench_log, format, generators, plot, verify, Grid, LineSet, Segment};

#[derive(Parser)]
#[command(name = "linegrid")]
#[command(about = "Generate segment grids and post-process intersection benchmarks")]
struct Cli {
    /// Log more; pass twice for even more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write an m-by-n grid with exactly m * n intersections
    Gen {
        /// Number of segments in the first family
        #[arg(short, default_value_t = 6_000_000)]
        m: usize,
        /// Number of segments in the second family
        #[arg(short, default_value_t = 4_500_000)]
        n: usize,
        /// YAML file with custom `family_a` and `family_b` line sets
        #[arg(long)]
        config: Option<PathBuf>,
        /// Defaults to grid_m_<m>-n_<n>.txt
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write a result file including the analytic intersection points
        #[arg(long)]
        expected: bool,
    },
    /// Write segments with uniformly random endpoints
    GenRandom {
        #[arg(long)]
        count: usize,
        /// Endpoints are drawn from [-range, range)
        #[arg(long, default_value_t = 5.0)]
        range: f64,
        #[command(flatten)]
        out: RandomOutput,
    },
    /// Write a lattice of segments pointing in random directions
    GenSparse {
        /// The lattice is count by count
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 10.0)]
        mean: f64,
        #[arg(long, default_value_t = 5.0)]
        std: f64,
        #[command(flatten)]
        out: RandomOutput,
    },
    /// Write a stack of increasingly slanted segments
    GenSlanted {
        #[arg(long)]
        count: usize,
        #[arg(long)]
        output: PathBuf,
    },
    /// Write a spiral of nested, rotated squares
    GenCube {
        /// The number of squares
        #[arg(long)]
        count: usize,
        /// Each square is turned by a further PI / d-pi
        #[arg(long, default_value_t = 30.0)]
        d_pi: f64,
        /// Distance from the center to the first square's corners
        #[arg(long, default_value_t = 4.0)]
        radius: f64,
        #[arg(long)]
        output: PathBuf,
    },
    /// Write a jittered grid of horizontal and vertical segments
    GenDrunk {
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 0.1)]
        variance: f64,
        #[arg(long, default_value_t = 10.0)]
        mean: f64,
        #[arg(long, default_value_t = 2.0)]
        std: f64,
        #[command(flatten)]
        out: RandomOutput,
    },
    /// Convert a benchmark log to CSV
    BmToCsv {
        input: PathBuf,
        /// Defaults to the input path with a .csv extension
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a result file as SVG
    Plot {
        input: PathBuf,
        /// Defaults to the input path with a .svg extension
        #[arg(long)]
        output: Option<PathBuf>,
        /// Color segments from this index onwards as the second family
        #[arg(long)]
        split: Option<usize>,
    },
    /// Check a result file against the grid it was computed from
    Verify {
        input: PathBuf,
        #[arg(short)]
        m: usize,
        #[arg(short)]
        n: usize,
        /// The config the grid was generated with, if any
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RandomOutput {
    #[arg(long)]
    output: PathBuf,
    /// Seed for the random number generator; uses entropy if not given
    #[arg(long)]
    seed: Option<u64>,
}

impl RandomOutput {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// The on-disk form of a custom grid.
#[derive(serde::Deserialize)]
struct GridConfig {
    family_a: LineSet,
    family_b: LineSet,
}

fn load_grid(m: usize, n: usize, config: Option<&Path>) -> anyhow::Result<Grid> {
    let Some(path) = config else {
        return Ok(Grid::new(m, n));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: GridConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(Grid::with_line_sets(m, n, config.family_a, config.family_b))
}

fn write_segments_file(path: &Path, segments: &[Segment]) -> anyhow::Result<()> {
    tracing::info!(path = %path.display(), segments = segments.len(), "writing segments");
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    format::write_segments(&mut out, segments.len(), segments.iter().copied())?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.action {
        Action::Gen {
            m,
            n,
            config,
            output,
            expected,
        } => {
            let grid = load_grid(m, n, config.as_deref())?;
            let output =
                output.unwrap_or_else(|| generators::default_file_name(m, n).into());
            if expected {
                generators::generate_expected_result(&output, &grid)?;
            } else {
                generators::generate_grid(&output, &grid)?;
            }
        }
        Action::GenRandom { count, range, out } => {
            let segs = generators::random(count, range, &mut out.rng())?;
            write_segments_file(&out.output, &segs)?;
        }
        Action::GenSparse {
            count,
            mean,
            std,
            out,
        } => {
            let segs = generators::sparse(count, mean, std, &mut out.rng())?;
            write_segments_file(&out.output, &segs)?;
        }
        Action::GenSlanted { count, output } => {
            write_segments_file(&output, &generators::slanted(count))?;
        }
        Action::GenCube {
            count,
            d_pi,
            radius,
            output,
        } => {
            write_segments_file(&output, &generators::cube(count, d_pi, radius)?)?;
        }
        Action::GenDrunk {
            count,
            variance,
            mean,
            std,
            out,
        } => {
            let segs = generators::drunk_grid(count, variance, mean, std, &mut out.rng())?;
            write_segments_file(&out.output, &segs)?;
        }
        Action::BmToCsv { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("csv"));
            let records = bench_log::convert(&input, &output)
                .with_context(|| format!("converting {}", input.display()))?;
            tracing::info!(records, "done");
        }
        Action::Plot {
            input,
            output,
            split,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("svg"));
            let style = plot::PlotStyle {
                family_split: split,
                ..plot::PlotStyle::default()
            };
            plot::plot_file(&input, &output, &style)
                .with_context(|| format!("plotting {}", input.display()))?;
        }
        Action::Verify {
            input,
            m,
            n,
            config,
        } => {
            let grid = load_grid(m, n, config.as_deref())?;
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let result = format::parse_result(BufReader::new(file))
                .with_context(|| format!("reading {}", input.display()))?;
            let report = verify::verify(&grid, &result);
            println!("{report}");
            if !report.is_ok() {
                bail!("{} does not match the {m} by {n} grid", input.display());
            }
        }
    }

    Ok(())
}
