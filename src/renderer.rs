//! Frame renderer
//!
//! Owns every piece of mutable render state: the ray cache, the brightness
//! grid and the last emitted frame. `resize` and `render` are the only
//! entry points that change it.

use std::time::Duration;

use rayon::prelude::*;

use crate::calibration::{grid_size, CellSize, GridLimits, RayCache};
use crate::scene::{FrameState, Rotation, Scene};
use crate::tracer::{trace, Ray};

/// Knobs that used to be baked into separate renderer variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Sphere-tracing step budget per ray
    pub max_steps: u32,
    /// Minimum time between rendered frames; zero renders every tick
    pub target_frame_interval: Duration,
    /// Freeze the spin when the user asked for reduced motion
    pub respect_reduced_motion: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_steps: 48,
            target_frame_interval: Duration::ZERO,
            respect_reduced_motion: false,
        }
    }
}

/// Sphere-tracing ASCII renderer
pub struct Renderer {
    scene: Scene,
    options: RenderOptions,
    limits: GridLimits,
    cache: RayCache,
    cell: Option<CellSize>,
    grid: Vec<f32>,
    buffer: String,
}

impl Renderer {
    pub fn new(scene: Scene, options: RenderOptions, limits: GridLimits) -> Self {
        Self {
            scene,
            options,
            limits,
            cache: RayCache::default(),
            cell: None,
            grid: Vec::new(),
            buffer: String::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cache.cols
    }

    pub fn rows(&self) -> usize {
        self.cache.rows
    }

    pub fn rays(&self) -> &RayCache {
        &self.cache
    }

    /// Per-cell brightness from the most recent frame
    pub fn brightness(&self) -> &[f32] {
        &self.grid
    }

    /// The last frame handed out by [`Renderer::render`]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Adapt to a new surface size or font.
    ///
    /// The ray cache and brightness grid are only rebuilt when the grid
    /// dimensions or cell shape actually change. Returns whether they were.
    pub fn resize(&mut self, width_px: f32, height_px: f32, cell_width: f32, cell_height: f32) -> bool {
        let cell = CellSize::new(cell_width, cell_height);
        let (cols, rows) = grid_size(width_px, height_px, cell, self.limits);
        if self.cell == Some(cell) && self.cache.cols == cols && self.cache.rows == rows {
            return false;
        }

        self.cache = RayCache::recalibrate(width_px, height_px, cell, self.limits, &self.scene);
        self.cell = Some(cell);
        self.grid = vec![0.0; self.cache.len()];

        tracing::debug!(
            cols = self.cache.cols,
            rows = self.cache.rows,
            fov = self.cache.fov,
            aspect = self.cache.aspect,
            "Recalibrated ray cache"
        );
        true
    }

    /// Render one frame.
    ///
    /// Returns the newline-terminated character grid only if it differs from
    /// the previous frame; `None` means the surface is already up to date.
    pub fn render(&mut self, rotation: Rotation, z_offset: f32) -> Option<&str> {
        let frame = FrameState::new(&self.scene, rotation, z_offset);
        let settings = self.scene.march_settings(self.options.max_steps);
        let scene = &self.scene;
        let origin = scene.camera;

        self.grid
            .par_iter_mut()
            .zip(self.cache.rays.par_iter())
            .for_each(|(cell, direction)| {
                *cell = trace(scene, &Ray::new(origin, *direction), &frame, &settings);
            });

        let out = self.to_ascii();
        if out == self.buffer {
            return None;
        }
        self.buffer = out;
        Some(self.buffer.as_str())
    }

    /// Quantize the brightness grid into rows of ramp characters
    fn to_ascii(&self) -> String {
        let cols = self.cache.cols;
        if cols == 0 {
            return String::new();
        }
        let ramp = &self.scene.ramp;
        let mut result = String::with_capacity(self.grid.len() + self.cache.rows);
        for row in self.grid.chunks(cols) {
            result.extend(row.iter().map(|&b| ramp.to_char(b)));
            result.push('\n');
        }
        result
    }
}
