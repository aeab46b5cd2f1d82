//! # 2D Camera
//!
//! The camera is the viewer's focal point inside the room. It is independent
//! of any viewport rectangle and of the editor's pan/zoom placement.

use crate::foundation::math::Vec2;

/// Focal point of a room preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    position: Vec2,
}

impl Camera2D {
    /// Create a camera at a position
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    /// Create a camera at the geometric center of a room
    // Room sizes stay far below 2^24, where f32 stops representing integers exactly
    #[allow(clippy::cast_precision_loss)]
    pub fn centered_on(width: u32, height: u32) -> Self {
        Self::new(Vec2::new(width as f32 / 2.0, height as f32 / 2.0))
    }

    /// Current position in room pixels
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Update camera position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Move the camera by an offset
    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(Vec2::zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centered_on_room() {
        let camera = Camera2D::centered_on(320, 240);
        assert_relative_eq!(camera.position().x, 160.0);
        assert_relative_eq!(camera.position().y, 120.0);
    }

    #[test]
    fn test_centered_on_odd_room() {
        let camera = Camera2D::centered_on(33, 17);
        assert_relative_eq!(camera.position().x, 16.5);
        assert_relative_eq!(camera.position().y, 8.5);
    }

    #[test]
    fn test_translate() {
        let mut camera = Camera2D::default();
        camera.translate(Vec2::new(3.0, -2.0));
        camera.translate(Vec2::new(1.0, 1.0));
        assert_relative_eq!(camera.position().x, 4.0);
        assert_relative_eq!(camera.position().y, -1.0);
    }
}
