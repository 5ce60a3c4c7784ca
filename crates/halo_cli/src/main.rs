use anyhow::{Context, Result};
use clap::Parser;
use halo_core::{RenderConfig, SceneDescription};
use halo_renderer::{render_description, PixelBuffer};
use log::info;
use std::fs;
use std::path::Path;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn load_scene(path: Option<&Path>) -> Result<SceneDescription> {
    let Some(path) = path else {
        info!("No scene given, using the demo scene");
        return Ok(SceneDescription::demo());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    SceneDescription::from_json_str(&json)
        .with_context(|| format!("failed to load scene {}", path.display()))
}

fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            RenderConfig::from_json_str(&json)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rays) = args.rays_per_pixel {
        config.rays_per_pixel = rays;
    }
    if let Some(bounces) = args.max_bounces {
        config.max_bounces = bounces;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(sampling) = args.sampling {
        config.sampling = sampling.into();
    }

    config.validate().context("invalid render config")?;
    Ok(config)
}

/// Report the finished frame. Presenting it is up to whoever embeds the renderer.
fn present(image: &PixelBuffer) {
    let mean = image.mean_color();
    let lit = image.pixels().iter().filter(|p| **p != [0, 0, 0]).count();
    info!(
        "Frame {}x{}: mean color ({:.3}, {:.3}, {:.3}), {} lit pixels",
        image.width(),
        image.height(),
        mean.x,
        mean.y,
        mean.z,
        lit
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Halo v{}", env!("CARGO_PKG_VERSION"));

    let description = load_scene(args.scene.as_deref())?;
    let config = load_config(&args)?;
    let image = render_description(&description, &config).context("render failed")?;
    present(&image);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_to_default_config() {
        let args = Args::parse_from([
            "halo",
            "--max-bounces",
            "3",
            "-r",
            "8",
            "--height",
            "48",
            "--workers",
            "4",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.max_bounces, 3);
        assert_eq!(config.rays_per_pixel, 8);
        assert_eq!((config.width, config.height), (1000, 48));
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = Args::parse_from(["halo", "--max-bounces", "0"]);
        assert!(load_config(&args).is_err());
    }
}
