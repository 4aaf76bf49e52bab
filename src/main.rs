use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::{info, warn};
use structopt::StructOpt;

use envsampler::core::distribution::{sample_uniform, ImageDistribution2D};
use envsampler::core::grid::RgbGrid;
use envsampler::core::imageio::{read_image, write_samples_png};
use envsampler::core::rng::RNG;
use envsampler::core::sampler::sample_many;

#[derive(StructOpt, Debug)]
#[structopt(name = "envsampler")]
struct Args {
    /// set LOG verbosity
    #[structopt(short, long)]
    verbose: bool,

    /// Specify the file that log output should be written to.
    /// Default: envsampler.log in the current directory.
    #[structopt(short, long)]
    logdir: Option<PathBuf>,

    /// Print all logging messages to stderr
    #[structopt(short = "e", long)]
    logtostderr: bool,

    /// Working grid width, independent of the source resolution
    #[structopt(long, default_value = "100")]
    grid_width: usize,

    /// Working grid height, independent of the source resolution
    #[structopt(long, default_value = "100")]
    grid_height: usize,

    /// Number of samples to draw
    #[structopt(short, long, default_value = "256")]
    samples: usize,

    /// Draw uniform samples instead of importance samples
    #[structopt(short, long)]
    uniform: bool,

    /// RNG sequence index
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Use specified number of threads for batch sampling
    #[structopt(short, long, default_value = "0")]
    nthreads: u8,

    #[structopt(short, long, parse(from_os_str))]
    /// Write samples as CSV to the given file instead of stdout
    outfile: Option<PathBuf>,

    #[structopt(long, parse(from_os_str))]
    /// Write a PNG of the working grid with a marker per sample
    plot: Option<PathBuf>,

    #[structopt(parse(from_os_str))]
    /// Path to the source image (EXR, PNG, TGA or JPEG)
    input: PathBuf
}

fn setup_logging(verbose: bool, logdir: PathBuf, stderr: bool) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow);
    let clevel = colors.clone().info(Color::Green);

    let mut base_config = fern::Dispatch::new();

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    base_config = base_config.level(level);

    let file_config = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {}",
                record.level(),
                message
            ))
        })
        .chain(fern::log_file(logdir)?);

    let stderr_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{color_line}[{level}] {message}\x1B[0m",
                color_line = format_args!("\x1B[{}m", colors.get_color(&record.level()).to_fg_str()),
                level = clevel.color(record.level()),
                message = message,
            ));
        })
        .level(level)
        .chain(std::io::stderr());

    base_config = base_config.chain(file_config);
    if stderr { base_config = base_config.chain(stderr_config); }
    base_config.apply()?;

    Ok(())
}

fn main() -> Result<()> {
    let args: Args = Args::from_args();

    if args.grid_width == 0 || args.grid_height == 0 {
        bail!(
            "Working grid resolution must be positive, got {}x{}",
            args.grid_width, args.grid_height);
    }

    let nthreads = match args.nthreads {
        0 => num_cpus::get(),
        n => n as usize
    };

    rayon::ThreadPoolBuilder::new().num_threads(nthreads).build_global()?;

    let logdir = if let Some(ref dir) = args.logdir {
        dir.clone()
    } else {
        PathBuf::from(String::from("envsampler.log"))
    };

    setup_logging(args.verbose, logdir, args.logtostderr)?;

    let (pixels, (src_width, src_height)) = read_image(&args.input)?;
    let grid = RgbGrid::resample(
        &pixels, src_width, src_height, args.grid_width, args.grid_height);

    let mut rng = RNG::new(args.seed);

    // Tables are rebuilt for every pass; sampling mode is a per-pass
    // toggle on top of the built tables. An image with no energy only
    // has a defined result in uniform mode.
    let samples = match ImageDistribution2D::build(&grid) {
        Ok(dist) => {
            info!(
                "Built {}x{} distribution, total weight {}",
                dist.width(), dist.height(), dist.total_weight());

            sample_many(&dist, args.samples, &mut rng, !args.uniform)
        }
        Err(e) if args.uniform => {
            warn!("{}; sampling uniformly without tables", e);

            (0..args.samples)
                .map(|_| {
                    let u_row = rng.uniform_float();
                    let u_col = rng.uniform_float();

                    sample_uniform(u_row, u_col)
                })
                .collect()
        }
        Err(e) => {
            return Err(e).with_context(|| format!(
                "Failed to build sampling distribution for \"{}\"",
                args.input.display()));
        }
    };

    let mut out: Box<dyn Write> = match &args.outfile {
        Some(path) => Box::new(File::create(path)
            .with_context(|| format!("Failed to create \"{}\"", path.display()))?),
        None => Box::new(std::io::stdout())
    };

    writeln!(out, "x,y,pdf")?;

    for s in &samples {
        writeln!(out, "{},{},{}", s.x, s.y, s.pdf)?;
    }

    if let Some(path) = &args.plot {
        write_samples_png(path, &grid, &samples)?;
        info!("Wrote sample plot to \"{}\"", path.display());
    }

    Ok(())
}
