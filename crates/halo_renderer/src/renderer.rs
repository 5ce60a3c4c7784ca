//! Core path tracing renderer.
//!
//! Implements the per-pixel estimator and the parallel dispatcher:
//! - Many path samples per pixel, averaged
//! - One rayon task per row band, each with its own random stream
//! - Deterministic reassembly of the finished bands in row order

use crate::band::{band_seed, partition_rows, render_band, BandResult, RowBand};
use crate::camera::Camera;
use crate::integrator::trace;
use crate::scene::Scene;
use crate::Color;
use halo_core::{ConfigError, RenderConfig, SamplingMode, SceneDescription, SceneError};
use halo_math::MathError;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;
use thiserror::Error;

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("band {index} failed: {source}")]
    Band {
        index: usize,
        #[source]
        source: MathError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("incomplete frame: {0}")]
    IncompleteFrame(String),
}

/// Render a single pixel with multi-sampling.
///
/// Sampling stops early once a path misses everything, since every later
/// path through the same pixel would miss too. The sum is then divided by
/// the configured sample count in [`SamplingMode::Legacy`] and by the
/// number of samples taken in [`SamplingMode::Corrected`].
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<Color, MathError> {
    let ray = camera.get_ray(x, y)?;
    let mut pixel_color = Color::ZERO;
    let mut taken = 0u32;

    for _ in 0..config.rays_per_pixel {
        let sample = trace(ray, scene, config, rng)?;
        pixel_color += sample.light;
        taken += 1;

        if !sample.hit {
            break;
        }
    }

    let samples = match config.sampling {
        SamplingMode::Legacy => config.rays_per_pixel,
        SamplingMode::Corrected => taken,
    };
    Ok(pixel_color * (1.0 / samples as f64))
}

/// A finished frame of 8-bit RGB pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Stitch band results into a full frame.
    ///
    /// Bands are placed by index, so the order they finished in does not
    /// matter. Every row must be covered exactly once.
    pub fn assemble(
        width: u32,
        height: u32,
        mut results: Vec<BandResult>,
    ) -> Result<Self, RenderError> {
        results.sort_by_key(|result| result.band.index);

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let mut next_row = 0;
        for result in results {
            let band = result.band;
            if band.start_row != next_row || band.end_row < band.start_row {
                return Err(RenderError::IncompleteFrame(format!(
                    "band {} covers rows {}..{}, expected to start at row {}",
                    band.index, band.start_row, band.end_row, next_row
                )));
            }
            let expected = band.rows() as usize * width as usize;
            if result.width != width || result.pixels.len() != expected {
                return Err(RenderError::IncompleteFrame(format!(
                    "band {} has {} pixels, expected {}",
                    band.index,
                    result.pixels.len(),
                    expected
                )));
            }

            pixels.extend(result.pixels);
            next_row = band.end_row;
        }

        if next_row != height {
            return Err(RenderError::IncompleteFrame(format!(
                "rows {}..{} were never rendered",
                next_row, height
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y), or `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Packed RGB bytes (for display).
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Average color over the frame, each channel in [0, 1].
    pub fn mean_color(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        let sum = self.pixels.iter().fold(Color::ZERO, |acc, [r, g, b]| {
            acc + Color::new(*r as f64, *g as f64, *b as f64)
        });
        sum / (255.0 * self.pixels.len() as f64)
    }
}

/// Render one band with its own seeded random stream.
fn render_seeded_band(
    band: &RowBand,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Result<BandResult, RenderError> {
    let mut rng = StdRng::seed_from_u64(band_seed(config.seed, band.index));
    render_band(band, camera, scene, config, &mut rng).map_err(|source| RenderError::Band {
        index: band.index,
        source,
    })
}

/// Render the entire scene to a pixel buffer.
///
/// Bands render on a dedicated pool of `config.workers` threads, or inline
/// when only one worker is configured. The first failing band aborts the
/// render.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<PixelBuffer, RenderError> {
    config.validate()?;
    let bands = partition_rows(config.height, config.workers)?;
    let camera = Camera::from_config(config);

    log::info!(
        "Rendering {}x{} @ {} spp, {} bounces, {} bands ({:?} sampling)",
        config.width,
        config.height,
        config.rays_per_pixel,
        config.max_bounces,
        bands.len(),
        config.sampling
    );
    let start = Instant::now();

    let results = if config.workers == 1 {
        bands
            .iter()
            .map(|band| render_seeded_band(band, &camera, scene, config))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("halo-band-{i}"))
            .build()?;
        pool.install(|| {
            bands
                .par_iter()
                .map(|band| render_seeded_band(band, &camera, scene, config))
                .collect::<Result<Vec<_>, _>>()
        })?
    };

    let image = PixelBuffer::assemble(config.width, config.height, results)?;
    log::info!("Completed render in {:.2?}", start.elapsed());

    Ok(image)
}

/// Validate the config, build the scene from its description, then render.
///
/// Both checks run before any thread is started.
pub fn render_description(
    description: &SceneDescription,
    config: &RenderConfig,
) -> Result<PixelBuffer, RenderError> {
    config.validate()?;
    let scene = Scene::from_description(description)?;
    log::info!("Scene has {} spheres", scene.len());
    render(&scene, config)
}
