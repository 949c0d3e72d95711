//! Render spectrogram jobs to PNG.
//!
//! `raster` paints a whole grid at once; `animate` drives a waterfall or
//! raster scan in real time for a while and saves whatever is on the surface.

mod job;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use spectro_core::{build_static_raster, Spectrogram};
use spectro_driver::{AnimationDriver, CyclingLineSource};

use crate::job::{RenderError, RenderJob};

#[derive(Parser, Debug)]
#[command(name = "spectro-render")]
#[command(about = "Render waterfall and raster-scan spectrograms to PNG.", long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Paint every row of the job as a static raster image.
    Raster(OutputArgs),
    /// Feed the job's rows through an animated display in real time.
    Animate(AnimateArgs),
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// JSON render job.
    job: PathBuf,
    /// Output PNG path.
    #[arg(short, long, default_value = "spectrogram.png")]
    output: PathBuf,
}

#[derive(clap::Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    io: OutputArgs,
    /// How long to run before capturing the surface.
    #[arg(short, long, default_value_t = 2.0)]
    seconds: f64,
    /// Override the job's line rate (lines per second, below 50).
    #[arg(short, long)]
    rate: Option<f64>,
}

fn main() -> Result<(), RenderError> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Raster(a) => cmd_raster(a),
        Command::Animate(a) => cmd_animate(a),
    }
}

fn cmd_raster(args: OutputArgs) -> Result<(), RenderError> {
    let job = RenderJob::load(&args.job)?;
    let surface = build_static_raster(&job.rows, job.width, job.lines, &job.raster_options());
    surface.save_png(&args.output)?;
    log::info!(
        "wrote {}x{} raster to {:?}",
        surface.width(),
        surface.height(),
        args.output
    );
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> Result<(), RenderError> {
    let job = RenderJob::load(&args.io.job)?;
    let mut spectrogram = Spectrogram::new(
        job.width,
        job.lines,
        job.scan_mode(),
        job.direction(),
        &job.spectrogram_options(),
    );
    if let Some(rate) = args.rate {
        spectrogram.set_line_rate(rate)?;
    }
    spectrogram.clear();

    let spectrogram = Arc::new(Mutex::new(spectrogram));
    let mut driver = AnimationDriver::new(spectrogram.clone());
    driver.start(CyclingLineSource::new(job.rows));
    thread::sleep(Duration::from_secs_f64(args.seconds.max(0.0).min(86_400.0)));
    let surface = spectrogram.lock().surface().clone();
    driver.stop();

    surface.save_png(&args.io.output)?;
    log::info!("wrote animated capture after {:.2}s to {:?}", args.seconds, args.io.output);
    Ok(())
}
