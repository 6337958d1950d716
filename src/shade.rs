//! Lambert + ambient shading with a depth fade across the cube

use nalgebra::Vector3;

use crate::math::{normalize_or_unit, to_world};
use crate::scene::Rotation;
use crate::sdf::{BoxSdf, DistanceField};
use crate::tracer::estimate_normal;

/// Hermite smoothstep of `x` between `edge0` and `edge1`
///
/// Coincident edges degrade to a hard step at the edge.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Single directional light plus ambient floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Unit vector pointing towards the light
    pub light_dir: Vector3<f32>,
    pub ambient: f32,
    pub diffuse: f32,
    /// Normalized depth at which the fade begins
    pub fade_start: f32,
}

impl Lighting {
    pub fn new(light_dir: Vector3<f32>, ambient: f32, diffuse: f32, fade_start: f32) -> Self {
        Self {
            light_dir: normalize_or_unit(&light_dir),
            ambient,
            diffuse,
            fade_start,
        }
    }

    /// Clamped Lambert term for a world-space normal
    pub fn diffuse_term(&self, normal: &Vector3<f32>) -> f32 {
        normal.dot(&self.light_dir).max(0.0)
    }

    /// Undimmed brightness in [0, 1]
    pub fn base_brightness(&self, normal: &Vector3<f32>) -> f32 {
        (self.ambient + self.diffuse_term(normal) * self.diffuse).clamp(0.0, 1.0)
    }

    /// Shade a surface hit.
    ///
    /// `object` is the hit in the cube's frame and is used for the normal;
    /// `world` drives the depth fade.
    pub fn shade<F: DistanceField>(
        &self,
        field: &F,
        camera: &Vector3<f32>,
        world: &Vector3<f32>,
        object: &Vector3<f32>,
        rotation: &Rotation,
        fade: &FadeBounds,
    ) -> f32 {
        let normal_obj = estimate_normal(field, object);
        let normal = normalize_or_unit(&to_world(&normal_obj, rotation));
        let brightness = self.base_brightness(&normal);

        let cam_dist = (world - camera).norm();
        brightness * (1.0 - fade.fade(cam_dist, self.fade_start))
    }
}

/// Camera-distance range over which the cube fades out
///
/// Tracks the bounding sphere of the bounced cube, so it changes every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeBounds {
    pub near: f32,
    pub far: f32,
}

impl FadeBounds {
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Bounds for the cube translated by `z_offset` along Z
    pub fn for_offset(camera: &Vector3<f32>, cube: &BoxSdf, z_offset: f32) -> Self {
        let radius = cube.bounding_radius();
        let center_to_cam = (camera - Vector3::new(0.0, 0.0, z_offset)).norm();
        Self {
            near: (center_to_cam - radius).max(0.0),
            far: center_to_cam + radius,
        }
    }

    /// `cam_dist` mapped to [0, 1] across the range; an empty range is all near
    pub fn depth01(&self, cam_dist: f32) -> f32 {
        let span = self.far - self.near;
        if span <= 0.0 {
            return 0.0;
        }
        ((cam_dist - self.near) / span).clamp(0.0, 1.0)
    }

    /// Amount of dimming in [0, 1] at `cam_dist`
    pub fn fade(&self, cam_dist: f32, fade_start: f32) -> f32 {
        if self.far <= self.near {
            return 0.0;
        }
        smoothstep(fade_start, 1.0, self.depth01(cam_dist))
    }
}
