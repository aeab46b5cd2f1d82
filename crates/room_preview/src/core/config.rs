//! # Surface Configuration
//!
//! Configuration for the preview surface is assembled from three layers:
//!
//! 1. **Defaults**: fixed editor defaults (10x10, device resolution, ...)
//! 2. **Caller options**: whatever the editor host passes in
//! 3. **Room overrides**: values derived from the room itself
//!
//! Later layers win. The room layer always sets the size, pixel rounding,
//! background alpha, and clear-before-render, so a caller can never size the
//! surface differently from the room it previews.

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};

/// Default surface width before room overrides
pub const DEFAULT_SURFACE_WIDTH: u32 = 10;

/// Default surface height before room overrides
pub const DEFAULT_SURFACE_HEIGHT: u32 = 10;

/// # Surface Options
///
/// A partial set of surface settings. Every key is optional so the same type
/// serves as the defaults layer, the caller layer, and the room layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceOptions {
    /// Surface width in pixels
    pub width: Option<u32>,
    /// Surface height in pixels
    pub height: Option<u32>,
    /// Pixel density multiplier
    pub resolution: Option<f32>,
    /// Edge smoothing
    pub antialias: Option<bool>,
    /// Scale the view's CSS size by the resolution automatically
    pub auto_density: Option<bool>,
    /// Use the editor's shared asset loader
    pub shared_loader: Option<bool>,
    /// Drive frames from the shared ticker instead of an independent clock
    pub shared_ticker: Option<bool>,
    /// Keep the draw buffer between frames
    pub preserve_drawing_buffer: Option<bool>,
    /// Alpha of the clear color
    pub background_alpha: Option<f32>,
    /// Clear the surface before each frame
    pub clear_before_render: Option<bool>,
    /// Snap positions to the pixel grid
    pub round_pixels: Option<bool>,
}

impl Config for SurfaceOptions {}

impl SurfaceOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed editor defaults
    ///
    /// The resolution comes from the backend's device pixel ratio.
    pub fn editor_defaults(device_pixel_ratio: f32) -> Self {
        Self {
            width: Some(DEFAULT_SURFACE_WIDTH),
            height: Some(DEFAULT_SURFACE_HEIGHT),
            resolution: Some(device_pixel_ratio),
            antialias: Some(true),
            auto_density: Some(true),
            shared_loader: Some(true),
            shared_ticker: Some(false),
            preserve_drawing_buffer: Some(true),
            background_alpha: Some(1.0),
            clear_before_render: Some(false),
            round_pixels: Some(false),
        }
    }

    /// Options every room forces onto its surface
    pub fn room_overrides(width: u32, height: u32, pixel_art: bool) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            round_pixels: Some(pixel_art),
            background_alpha: Some(0.0),
            clear_before_render: Some(true),
            ..Default::default()
        }
    }

    /// Builder pattern: Set resolution
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Builder pattern: Set antialiasing
    pub fn with_antialias(mut self, enabled: bool) -> Self {
        self.antialias = Some(enabled);
        self
    }

    /// Builder pattern: Set surface size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Builder pattern: Set shared ticker usage
    pub fn with_shared_ticker(mut self, shared: bool) -> Self {
        self.shared_ticker = Some(shared);
        self
    }

    /// Layer `other` on top of `self`; every key set in `other` wins
    pub fn overlay(self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            resolution: other.resolution.or(self.resolution),
            antialias: other.antialias.or(self.antialias),
            auto_density: other.auto_density.or(self.auto_density),
            shared_loader: other.shared_loader.or(self.shared_loader),
            shared_ticker: other.shared_ticker.or(self.shared_ticker),
            preserve_drawing_buffer: other.preserve_drawing_buffer.or(self.preserve_drawing_buffer),
            background_alpha: other.background_alpha.or(self.background_alpha),
            clear_before_render: other.clear_before_render.or(self.clear_before_render),
            round_pixels: other.round_pixels.or(self.round_pixels),
        }
    }

    /// Fill remaining gaps from the editor defaults at 1x and validate
    pub fn resolve(&self) -> Result<SurfaceConfig, ConfigError> {
        // Editor defaults set every key, so nothing below falls through
        let filled = Self::editor_defaults(1.0).overlay(self);
        let config = SurfaceConfig {
            width: filled.width.unwrap_or_default(),
            height: filled.height.unwrap_or_default(),
            resolution: filled.resolution.unwrap_or_default(),
            antialias: filled.antialias.unwrap_or_default(),
            auto_density: filled.auto_density.unwrap_or_default(),
            shared_loader: filled.shared_loader.unwrap_or_default(),
            shared_ticker: filled.shared_ticker.unwrap_or_default(),
            preserve_drawing_buffer: filled.preserve_drawing_buffer.unwrap_or_default(),
            background_alpha: filled.background_alpha.unwrap_or_default(),
            clear_before_render: filled.clear_before_render.unwrap_or_default(),
            round_pixels: filled.round_pixels.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// # Surface Configuration
///
/// Fully resolved settings handed to the render backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Pixel density multiplier
    pub resolution: f32,
    /// Edge smoothing
    pub antialias: bool,
    /// Automatic density scaling
    pub auto_density: bool,
    /// Shared asset loader
    pub shared_loader: bool,
    /// Shared frame clock
    pub shared_ticker: bool,
    /// Retained draw buffer
    pub preserve_drawing_buffer: bool,
    /// Alpha of the clear color
    pub background_alpha: f32,
    /// Clear before each frame
    pub clear_before_render: bool,
    /// Pixel-grid snapping
    pub round_pixels: bool,
}

impl SurfaceConfig {
    /// Merge defaults, caller options, and room-derived overrides
    ///
    /// Room dimensions are taken as signed values so that a malformed room is
    /// reported as a configuration error instead of wrapping around.
    pub fn merge(
        caller: &SurfaceOptions,
        room_width: i32,
        room_height: i32,
        pixel_art: bool,
        device_pixel_ratio: f32,
    ) -> Result<Self, ConfigError> {
        let width = positive_dimension("width", room_width)?;
        let height = positive_dimension("height", room_height)?;

        SurfaceOptions::editor_defaults(device_pixel_ratio)
            .overlay(caller)
            .overlay(&SurfaceOptions::room_overrides(width, height, pixel_art))
            .resolve()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be a positive number, got {}",
                self.resolution
            )));
        }

        if !(0.0..=1.0).contains(&self.background_alpha) {
            return Err(ConfigError::Invalid(format!(
                "background alpha must be within 0..=1, got {}",
                self.background_alpha
            )));
        }

        Ok(())
    }
}

fn positive_dimension(name: &str, value: i32) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ConfigError::Invalid(format!("room {name} must be positive, got {value}")))
}

/// Editor pan/zoom applied to the scene root
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomPlacement {
    /// Horizontal offset in surface pixels
    pub x: f32,
    /// Vertical offset in surface pixels
    pub y: f32,
    /// Uniform zoom factor
    pub scale: f32,
}

impl Default for RoomPlacement {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl RoomPlacement {
    /// Create a placement
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self { x, y, scale }
    }

    /// Validate the placement
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "room placement scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ConfigError::Invalid("room placement offset must be finite".to_string()));
        }
        Ok(())
    }
}
