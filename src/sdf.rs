//! Signed distance fields

use nalgebra::Vector3;

/// Anything the sphere tracer can march against
///
/// Implementations must return a true lower bound on the distance to the
/// surface, otherwise the tracer can step through it.
pub trait DistanceField {
    /// Signed distance from `p` (object space) to the surface
    fn distance(&self, p: &Vector3<f32>) -> f32;
}

/// Exact signed distance to an axis-aligned box centered at the origin
///
/// Negative inside, zero on the surface, positive outside.
pub fn sd_box(p: &Vector3<f32>, half_extent: &Vector3<f32>) -> f32 {
    let q = p.abs() - half_extent;
    let outside = q.sup(&Vector3::zeros()).norm();
    let inside = q.x.max(q.y.max(q.z)).min(0.0);
    outside + inside
}

/// Axis-aligned box centered at the object-space origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSdf {
    pub half_extent: Vector3<f32>,
}

impl BoxSdf {
    pub fn new(half_extent: Vector3<f32>) -> Self {
        Self { half_extent }
    }

    /// Radius of the sphere enclosing the box
    pub fn bounding_radius(&self) -> f32 {
        self.half_extent.norm()
    }
}

impl DistanceField for BoxSdf {
    fn distance(&self, p: &Vector3<f32>) -> f32 {
        sd_box(p, &self.half_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> BoxSdf {
        BoxSdf::new(Vector3::new(0.75, 0.75, 0.75))
    }

    #[test]
    fn test_center_is_inside() {
        let d = cube().distance(&Vector3::zeros());
        assert!((d + 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_points_inside_are_negative() {
        let b = cube();
        for p in [
            Vector3::new(0.5, 0.0, 0.0),
            Vector3::new(-0.7, 0.7, -0.7),
            Vector3::new(0.1, -0.6, 0.74),
        ] {
            assert!(b.distance(&p) < 0.0, "{:?}", p);
        }
    }

    #[test]
    fn test_points_outside_are_positive() {
        let b = cube();
        for p in [
            Vector3::new(0.76, 0.0, 0.0),
            Vector3::new(0.0, -2.0, 0.0),
            Vector3::new(0.1, 0.1, 0.9),
        ] {
            assert!(b.distance(&p) > 0.0, "{:?}", p);
        }
    }

    #[test]
    fn test_surface_is_zero() {
        let b = cube();
        assert!(b.distance(&Vector3::new(0.75, 0.2, -0.3)).abs() < 1e-6);
        assert!(b.distance(&Vector3::new(0.0, 0.0, -0.75)).abs() < 1e-6);
    }

    #[test]
    fn test_exact_face_distance() {
        let d = cube().distance(&Vector3::new(0.0, 0.0, 3.0));
        assert!((d - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_exact_corner_distance() {
        let b = BoxSdf::new(Vector3::new(1.0, 1.0, 1.0));
        let d = b.distance(&Vector3::new(2.0, 2.0, 2.0));
        assert!((d - 3.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_symmetric_under_sign_flip() {
        let b = BoxSdf::new(Vector3::new(0.5, 0.8, 1.1));
        let p = Vector3::new(0.3, 1.4, -0.2);
        let d = b.distance(&p);
        for axis in 0..3 {
            let mut q = p;
            q[axis] = -q[axis];
            assert!((b.distance(&q) - d).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bounding_radius() {
        let r = cube().bounding_radius();
        assert!((r - (3.0_f32 * 0.75 * 0.75).sqrt()).abs() < 1e-6);
    }
}
