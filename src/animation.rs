//! Animation clock: spin, Z-bounce and frame-skip cadence

use std::f32::consts::TAU;
use std::time::Duration;

use crate::renderer::RenderOptions;
use crate::scene::Rotation;

/// Motion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Base spin rate, radians per second
    pub rot_speed: f32,
    /// Peak Z travel toward / away from the camera
    pub bounce_amp: f32,
    /// Bounce cycles per second
    pub bounce_hz: f32,
    /// Longest step the clock will integrate, in seconds
    pub max_dt: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            rot_speed: 0.9,
            bounce_amp: 0.85,
            bounce_hz: 0.4,
            max_dt: 0.033,
        }
    }
}

/// Cube pose handed to [`crate::Renderer::render`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Rotation,
    pub z_offset: f32,
}

/// Integrates wall-clock deltas into cube poses
#[derive(Debug, Clone)]
pub struct Animator {
    motion: Motion,
    frame_interval: Duration,
    reduced_motion: bool,
    time: f32,
    angle: f32,
    since_frame: Duration,
}

impl Animator {
    pub fn new(motion: Motion, options: &RenderOptions) -> Self {
        Self {
            motion,
            frame_interval: options.target_frame_interval,
            reduced_motion: options.respect_reduced_motion,
            time: 0.0,
            angle: 0.0,
            since_frame: Duration::ZERO,
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Seconds of animation time accumulated so far
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    /// Advance by `dt` of real time.
    ///
    /// Returns a pose when a frame is due under the configured cadence,
    /// `None` when this tick should be skipped.
    pub fn tick(&mut self, dt: Duration) -> Option<Pose> {
        let step = dt.as_secs_f32().clamp(0.0, self.motion.max_dt);
        self.time += step;
        if !self.reduced_motion {
            self.angle += step * self.motion.rot_speed;
        }

        self.since_frame += dt;
        if self.since_frame < self.frame_interval {
            return None;
        }
        self.since_frame = Duration::ZERO;
        Some(self.pose())
    }

    /// Pose at the current clock without advancing it
    pub fn pose(&self) -> Pose {
        Pose {
            rotation: Rotation::new(self.angle * 0.9, self.angle * 1.1),
            z_offset: (TAU * self.motion.bounce_hz * self.time).sin() * self.motion.bounce_amp,
        }
    }
}
