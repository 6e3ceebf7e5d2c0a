mod geom;
mod material;
mod scene;
mod spectrum;
mod surfaces;
mod trace;

use std::fs::File;
use std::io;
use std::time::Instant;

use anyhow::{
    bail,
    Context,
};
use clap::{
    Parser,
    ValueEnum,
};
use log::debug;
use log::info;
use log::LevelFilter;
use rayon::prelude::*;
use serde::Serialize;

use crate::spectrum::Rgb;
use crate::trace::Ray;

#[derive(Parser)]
#[command(name = "prismatic")]
/// A 2D dispersive ray tracer.
///
/// Traces one ray per sampled wavelength of the visible spectrum through a
/// scene of segments and prisms, and emits the multi-bounce paths as YAML.
struct TracerOpt {
    /// A scene file to load from configuration.
    ///
    /// Without one, the built-in prism example scene is used.
    #[arg(long)]
    scene: Option<String>,
    /// Override the incidence angle, in degrees from the positive x-axis.
    #[arg(long)]
    angle: Option<f64>,
    /// Spectrum sampling interval in nanometers.
    #[arg(long, default_value_t = spectrum::DEFAULT_INTERVAL_NM)]
    interval: f64,
    /// Maximum number of accepted hits per traced ray.
    #[arg(long, default_value_t = scene::DEFAULT_MAX_BOUNCES)]
    max_bounces: usize,
    /// Destination of the YAML trace report.
    ///
    /// Written to stdout when omitted.
    #[arg(long, short)]
    output: Option<String>,
    /// Viewport width used by the example scene.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    /// Viewport height used by the example scene.
    #[arg(long, default_value_t = 720.0)]
    height: f64,
    /// Set the logging level.
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// The full result of a spectrum sweep, in a shape a downstream rendering
/// layer can consume directly.
#[derive(Serialize)]
struct Report {
    angle: f64,
    traces: Vec<TraceRecord>,
}

#[derive(Serialize)]
struct TraceRecord {
    wavelength: f64,
    color: Rgb,
    path: Vec<Ray>,
}

fn main() -> anyhow::Result<()> {
    let config = TracerOpt::parse();
    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.clone().into())
        .init();

    if config.interval <= 0.0 {
        bail!("sampling interval must be positive, got {}", config.interval);
    }

    let (scene, mut emitter) = if let Some(ref path) = config.scene {
        scene::load_scene(path).with_context(|| format!("load scene file '{path}'"))?
    } else {
        scene::example::prism(config.width, config.height)
    };
    if let Some(angle) = config.angle {
        emitter.angle = angle;
    }

    let samples = spectrum::sample_spectrum(config.interval);
    info!(
        "tracing {} wavelengths at {} deg from ({}, {})",
        samples.len(),
        emitter.angle,
        emitter.origin.x(),
        emitter.origin.y()
    );

    let start = Instant::now();
    let traces = samples
        .par_iter()
        .map(|sample| {
            let path = scene
                .trace(emitter.ray(sample.wavelength), config.max_bounces)
                .with_context(|| format!("trace wavelength {} nm", sample.wavelength))?;
            debug!(
                "{} nm ({}): {} legs",
                sample.wavelength,
                sample.color.hex(),
                path.len()
            );
            Ok(TraceRecord {
                wavelength: sample.wavelength,
                color: sample.color,
                path,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let elapsed = start.elapsed().as_secs_f64();
    let legs: usize = traces.iter().map(|t| t.path.len()).sum();
    info!("traced {} rays ({legs} legs) in {elapsed:.3}s", traces.len());

    let report = Report {
        angle: emitter.angle,
        traces,
    };
    match config.output {
        Some(ref path) => {
            let f = File::create(path).with_context(|| format!("create output file '{path}'"))?;
            serde_yaml::to_writer(f, &report)?;
            info!("wrote report to '{path}'");
        }
        None => {
            serde_yaml::to_writer(io::stdout().lock(), &report)?;
        }
    }
    Ok(())
}
