//! Sphere tracer
//!
//! Marches camera rays through world space, pulling each sample back into the
//! cube's frame before evaluating the distance field.

use nalgebra::Vector3;

use crate::math::{normalize_or_unit, to_object};
use crate::scene::{FrameState, Scene};
use crate::sdf::DistanceField;

/// Central-difference step for normal estimation
pub const NORMAL_EPS: f32 = 0.003;

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Limits bounding the work done for one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSettings {
    pub max_steps: u32,
    pub max_distance: f32,
    /// Distance below which a sample counts as on the surface
    pub epsilon: f32,
}

/// Result of marching a single ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    Hit {
        t: f32,
        world: Vector3<f32>,
        object: Vector3<f32>,
        steps: u32,
    },
    Miss {
        t: f32,
        steps: u32,
    },
}

impl MarchOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, MarchOutcome::Hit { .. })
    }
}

/// March `ray` against `field` posed by `frame`
///
/// Each step advances by the field value at the current sample, so a field
/// that never overestimates can't be stepped through.
pub fn march<F: DistanceField>(
    field: &F,
    ray: &Ray,
    frame: &FrameState,
    settings: &MarchSettings,
) -> MarchOutcome {
    let mut t = 0.0f32;
    for step in 0..settings.max_steps {
        let world = ray.at(t);
        let object = to_object(&(world - frame.translation), &frame.rotation);

        let d = field.distance(&object);
        if d < settings.epsilon {
            return MarchOutcome::Hit {
                t,
                world,
                object,
                steps: step + 1,
            };
        }

        t += d;
        if t > settings.max_distance {
            return MarchOutcome::Miss { t, steps: step + 1 };
        }
    }
    MarchOutcome::Miss {
        t,
        steps: settings.max_steps,
    }
}

/// Unit surface normal at an object-space point, from the field's gradient
pub fn estimate_normal<F: DistanceField>(field: &F, p: &Vector3<f32>) -> Vector3<f32> {
    let dx = Vector3::new(NORMAL_EPS, 0.0, 0.0);
    let dy = Vector3::new(0.0, NORMAL_EPS, 0.0);
    let dz = Vector3::new(0.0, 0.0, NORMAL_EPS);
    let gradient = Vector3::new(
        field.distance(&(p + dx)) - field.distance(&(p - dx)),
        field.distance(&(p + dy)) - field.distance(&(p - dy)),
        field.distance(&(p + dz)) - field.distance(&(p - dz)),
    );
    normalize_or_unit(&gradient)
}

/// Brightness seen along `ray`: shaded on a hit, 0 on a miss
pub fn trace(scene: &Scene, ray: &Ray, frame: &FrameState, settings: &MarchSettings) -> f32 {
    match march(&scene.cube, ray, frame, settings) {
        MarchOutcome::Hit { world, object, .. } => scene.lighting.shade(
            &scene.cube,
            &scene.camera,
            &world,
            &object,
            &frame.rotation,
            &frame.fade,
        ),
        MarchOutcome::Miss { .. } => 0.0,
    }
}
