//! Screen calibration: output grid size and the per-cell view ray cache
//!
//! Character cells are rarely square, so the horizontal ray spread is scaled
//! by the physical aspect of the drawn grid (`cols * cell_w` by
//! `rows * cell_h`). That keeps the cube square on any monospace font.

use nalgebra::Vector3;

use crate::math::normalize_or_unit;
use crate::scene::Scene;

/// Narrowest and widest allowed vertical FOV scale
pub const FOV_RANGE: (f32, f32) = (0.55, 1.6);

/// Size of one character cell on the output surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    /// Cell dimensions below one pixel are treated as one pixel
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_cell(width),
            height: clamp_cell(height),
        }
    }

    /// Width over height of a single cell
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

fn clamp_cell(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}

/// Smallest grid ever produced, whatever the surface reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    pub min_cols: usize,
    pub min_rows: usize,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            min_cols: 60,
            min_rows: 32,
        }
    }
}

/// Columns and rows that fit a `width_px` by `height_px` surface
pub fn grid_size(width_px: f32, height_px: f32, cell: CellSize, limits: GridLimits) -> (usize, usize) {
    let fit = |px: f32, cell: f32| -> usize {
        if px.is_finite() && px > 0.0 {
            (px / cell).floor() as usize
        } else {
            0
        }
    };
    let cols = fit(width_px, cell.width).max(limits.min_cols).max(1);
    let rows = fit(height_px, cell.height).max(limits.min_rows).max(1);
    (cols, rows)
}

/// Vertical FOV scale that makes the resting cube fill `fill` of the screen height
pub fn fov_for_fill(camera: &Vector3<f32>, half_extent: &Vector3<f32>, fill: f32) -> f32 {
    let cam_dist = camera.norm();
    if cam_dist <= 0.0 || fill <= 0.0 {
        return FOV_RANGE.1;
    }
    let raw = 2.0 * half_extent.y / cam_dist / fill;
    raw.clamp(FOV_RANGE.0, FOV_RANGE.1)
}

/// Ray directions for every output cell, plus the geometry that produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RayCache {
    pub cols: usize,
    pub rows: usize,
    pub fov: f32,
    /// Horizontal correction applied to `u`
    pub aspect: f32,
    /// Unit directions indexed by `row * cols + col`
    pub rays: Vec<Vector3<f32>>,
}

impl RayCache {
    /// Build the cache for a surface of the given pixel size
    pub fn recalibrate(
        width_px: f32,
        height_px: f32,
        cell: CellSize,
        limits: GridLimits,
        scene: &Scene,
    ) -> Self {
        let (cols, rows) = grid_size(width_px, height_px, cell, limits);
        let fov = fov_for_fill(&scene.camera, &scene.cube.half_extent, scene.fill_fraction);
        let aspect = (cols as f32 / rows as f32) * cell.aspect();

        let inv_cols = 1.0 / cols as f32;
        let inv_rows = 1.0 / rows as f32;
        let mut rays = Vec::with_capacity(cols * rows);
        for y in 0..rows {
            let v = (y as f32 + 0.5) * inv_rows * 2.0 - 1.0;
            for x in 0..cols {
                let u = (x as f32 + 0.5) * inv_cols * 2.0 - 1.0;
                rays.push(normalize_or_unit(&Vector3::new(u * aspect * fov, -v * fov, -1.0)));
            }
        }

        Self {
            cols,
            rows,
            fov,
            aspect,
            rays,
        }
    }

    pub fn ray(&self, row: usize, col: usize) -> &Vector3<f32> {
        &self.rays[row * self.cols + col]
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }
}
