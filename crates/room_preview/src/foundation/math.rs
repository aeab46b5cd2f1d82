//! Math utilities and types
//!
//! Provides the 2D math types used by the room preview. Rooms are laid out in
//! pixel space with Y pointing down, matching the editor's canvas.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D transform representing position, scale, and rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position in room pixels
    pub position: Vec2,

    /// Scale factors
    pub scale: Vec2,

    /// Rotation in radians, clockwise in Y-down space
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set rotation from degrees
    pub fn with_rotation_degrees(mut self, degrees: f32) -> Self {
        self.rotation = utils::deg_to_rad(degrees);
        self
    }

    /// Apply this transform's translation and uniform-or-not scale to a point
    ///
    /// Used for container placement, where rotation is always zero.
    pub fn apply_to_point(&self, point: Vec2) -> Vec2 {
        self.position + self.scale.component_mul(&point)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Snap a point to the pixel grid
    pub fn round_to_pixel(point: Vec2) -> Vec2 {
        Vec2::new(point.x.round(), point.y.round())
    }
}
