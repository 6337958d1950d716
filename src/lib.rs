//! ASCII cube renderer using sphere tracing
//!
//! Renders a spinning, bouncing cube to a grid of characters by marching
//! rays against the cube's signed distance field, shading hits with a single
//! directional light and mapping brightness onto a glyph ramp.

pub mod animation;
pub mod calibration;
pub mod config;
pub mod error;
pub mod math;
pub mod ramp;
pub mod renderer;
pub mod scene;
pub mod sdf;
pub mod shade;
pub mod terminal;
pub mod tracer;

pub use animation::{Animator, Motion, Pose};
pub use config::AppConfig;
pub use error::InitError;
pub use renderer::{RenderOptions, Renderer};
pub use scene::{Rotation, Scene};
pub use terminal::TerminalDisplay;
