//! Scene constants and per-frame state for the spinning cube

use nalgebra::Vector3;

use crate::ramp::Ramp;
use crate::sdf::BoxSdf;
use crate::shade::{FadeBounds, Lighting};
use crate::tracer::MarchSettings;

/// Cube orientation in radians
///
/// Angles accumulate without wrapping; the rotation helpers are periodic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Tilt about the X axis
    pub x: f32,
    /// Spin about the Y axis
    pub y: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Immutable scene description, fixed for the life of the process
#[derive(Debug, Clone)]
pub struct Scene {
    /// Camera position in world space, looking down -Z
    pub camera: Vector3<f32>,
    pub cube: BoxSdf,
    pub max_distance: f32,
    pub epsilon: f32,
    pub lighting: Lighting,
    pub ramp: Ramp,
    /// Fraction of the screen height the resting cube should cover
    pub fill_fraction: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::cube()
    }
}

impl Scene {
    /// The stock scene: a 1.5 unit cube three units in front of the camera
    pub fn cube() -> Self {
        Self {
            camera: Vector3::new(0.0, 0.0, 3.0),
            cube: BoxSdf::new(Vector3::new(0.75, 0.75, 0.75)),
            max_distance: 10.0,
            epsilon: 0.002,
            lighting: Lighting::new(Vector3::new(0.6, 0.7, 0.3), 0.18, 0.9, 0.1),
            ramp: Ramp::default(),
            fill_fraction: 0.42,
        }
    }

    pub fn march_settings(&self, max_steps: u32) -> MarchSettings {
        MarchSettings {
            max_steps,
            max_distance: self.max_distance,
            epsilon: self.epsilon,
        }
    }
}

/// Everything that changes from one frame to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub rotation: Rotation,
    pub translation: Vector3<f32>,
    pub fade: FadeBounds,
}

impl FrameState {
    /// Pose the cube for this frame, bounced `z_offset` units toward the camera
    pub fn new(scene: &Scene, rotation: Rotation, z_offset: f32) -> Self {
        Self {
            rotation,
            translation: Vector3::new(0.0, 0.0, z_offset),
            fade: FadeBounds::for_offset(&scene.camera, &scene.cube, z_offset),
        }
    }
}
