//! Row band tile rendering for Halo.
//!
//! Divides the image into contiguous bands of rows that can be rendered
//! independently and in parallel using rayon.

use crate::camera::Camera;
use crate::renderer::render_pixel;
use crate::scene::Scene;
use halo_core::{ConfigError, RenderConfig};
use halo_math::{MathError, VectorExt};
use rand::RngCore;

/// A contiguous range of image rows, `start_row..end_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// Position of this band in top to bottom order
    pub index: usize,
    /// First row of the band
    pub start_row: u32,
    /// One past the last row of the band
    pub end_row: u32,
}

impl RowBand {
    /// Create a new band.
    pub fn new(index: usize, start_row: u32, end_row: u32) -> Self {
        Self {
            index,
            start_row,
            end_row,
        }
    }

    /// Number of rows in this band.
    pub fn rows(&self) -> u32 {
        self.end_row - self.start_row
    }
}

/// Split `height` rows into `workers` bands of `height / workers` rows.
///
/// The last band absorbs the remainder. Every band gets at least one row,
/// so more workers than rows is rejected.
pub fn partition_rows(height: u32, workers: usize) -> Result<Vec<RowBand>, ConfigError> {
    if workers == 0 {
        return Err(ConfigError::NoWorkers);
    }
    if workers > height as usize {
        return Err(ConfigError::TooManyWorkers { workers, height });
    }

    let rows_per_band = (height as usize / workers) as u32;
    let bands: Vec<RowBand> = (0..workers)
        .map(|index| {
            let start_row = index as u32 * rows_per_band;
            let end_row = if index == workers - 1 {
                height
            } else {
                (index as u32 + 1) * rows_per_band
            };
            RowBand::new(index, start_row, end_row)
        })
        .collect();

    if height as usize % workers != 0 {
        log::debug!(
            "{} rows over {} bands: last band takes {} rows",
            height,
            workers,
            bands[workers - 1].rows()
        );
    }

    Ok(bands)
}

/// Seed of the random stream for one band.
///
/// Each band gets a distinct stream so neighbouring bands do not share
/// noise patterns.
pub fn band_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Result of rendering a band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandResult {
    /// The band that was rendered
    pub band: RowBand,
    /// Image width, the number of pixels per row
    pub width: u32,
    /// Pixel colors in row-major order
    pub pixels: Vec<[u8; 3]>,
}

impl BandResult {
    /// Create a new band result.
    pub fn new(band: RowBand, width: u32, pixels: Vec<[u8; 3]>) -> Self {
        Self {
            band,
            width,
            pixels,
        }
    }

    /// Pixels paired with their image coordinates.
    pub fn iter_pixels(&self) -> impl Iterator<Item = ((u32, u32), [u8; 3])> + '_ {
        let width = self.width.max(1);
        self.pixels.iter().enumerate().map(move |(i, color)| {
            let x = i as u32 % width;
            let y = self.band.start_row + i as u32 / width;
            ((x, y), *color)
        })
    }
}

/// Render a single band.
///
/// Returns pixels in row-major order within the band.
pub fn render_band(
    band: &RowBand,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<BandResult, MathError> {
    log::debug!(
        "Rendering band {} (rows {}..{})",
        band.index,
        band.start_row,
        band.end_row
    );

    let mut pixels = Vec::with_capacity(band.rows() as usize * camera.image_width as usize);
    for y in band.start_row..band.end_row {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, x, y, config, rng)?;
            pixels.push(color.to_rgb8());
        }
    }

    log::debug!("Finished band {}", band.index);
    Ok(BandResult::new(*band, camera.image_width, pixels))
}
