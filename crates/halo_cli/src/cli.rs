use clap::{Parser, ValueEnum};
use halo_core::SamplingMode;
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
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

/// Sampling modes selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Sampling {
    Corrected,
    Legacy,
}

impl From<Sampling> for SamplingMode {
    fn from(sampling: Sampling) -> Self {
        match sampling {
            Sampling::Corrected => SamplingMode::Corrected,
            Sampling::Legacy => SamplingMode::Legacy,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "halo")]
#[command(about = "Render a scene of spheres with a CPU path tracer")]
pub struct Args {
    /// JSON scene description (defaults to the built-in demo scene)
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// JSON render config (missing fields take defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Override the number of samples per pixel
    #[arg(long, short = 'r')]
    pub rays_per_pixel: Option<u32>,

    /// Override the maximum bounces per path sample
    #[arg(long, short = 'b')]
    pub max_bounces: Option<u32>,

    /// Override the number of worker bands
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the sampling mode
    #[arg(long)]
    pub sampling: Option<Sampling>,
}
