//! Template types for the entities a room is made of

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// Two-axis scale as stored in room files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scale2 {
    /// Horizontal scale
    pub x: f32,
    /// Vertical scale
    pub y: f32,
}

impl Default for Scale2 {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl From<Scale2> for Vec2 {
    fn from(scale: Scale2) -> Self {
        Vec2::new(scale.x, scale.y)
    }
}

/// How a background texture tiles across the room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundRepeat {
    /// Tile in both directions
    #[default]
    #[serde(rename = "repeat")]
    Repeat,
    /// Tile horizontally only
    #[serde(rename = "repeat-x")]
    RepeatX,
    /// Tile vertically only
    #[serde(rename = "repeat-y")]
    RepeatY,
    /// Draw once
    #[serde(rename = "no-repeat")]
    NoRepeat,
}

/// A background layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundTemplate {
    /// Texture uid
    pub texture: String,
    /// Stacking order
    pub depth: i32,
    /// Horizontal offset
    pub shift_x: f32,
    /// Vertical offset
    pub shift_y: f32,
    /// Horizontal parallax factor
    pub parallax_x: f32,
    /// Vertical parallax factor
    pub parallax_y: f32,
    /// Horizontal scroll speed
    pub movement_x: f32,
    /// Vertical scroll speed
    pub movement_y: f32,
    /// Horizontal texture scale
    pub scale_x: f32,
    /// Vertical texture scale
    pub scale_y: f32,
    /// Tiling mode
    pub repeat: BackgroundRepeat,
}

impl Default for BackgroundTemplate {
    fn default() -> Self {
        Self {
            texture: String::new(),
            depth: 0,
            shift_x: 0.0,
            shift_y: 0.0,
            parallax_x: 1.0,
            parallax_y: 1.0,
            movement_x: 0.0,
            movement_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            repeat: BackgroundRepeat::Repeat,
        }
    }
}

impl BackgroundTemplate {
    /// Create a background for a texture at a depth
    pub fn new(texture: impl Into<String>, depth: i32) -> Self {
        Self {
            texture: texture.into(),
            depth,
            ..Default::default()
        }
    }
}

/// An object instance placed in the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyTemplate {
    /// Uid of the object template this instance is stamped from
    pub uid: String,
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
    /// Instance scale
    pub scale: Scale2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Opacity in 0..=1
    pub opacity: f32,
    /// Optional tint color
    pub tint: Option<String>,
    /// Per-instance property overrides
    pub custom_properties: BTreeMap<String, String>,
}

impl Default for CopyTemplate {
    fn default() -> Self {
        Self {
            uid: String::new(),
            x: 0.0,
            y: 0.0,
            scale: Scale2::default(),
            rotation: 0.0,
            opacity: 1.0,
            tint: None,
            custom_properties: BTreeMap::new(),
        }
    }
}

impl CopyTemplate {
    /// Create an instance of a template at a position
    pub fn new(uid: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            uid: uid.into(),
            x,
            y,
            ..Default::default()
        }
    }
}

/// A single tile inside a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileTemplate {
    /// Texture uid of the tileset
    pub texture: String,
    /// Frame index inside the tileset grid
    pub frame: u32,
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
    /// Tile scale
    pub scale: Scale2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Opacity in 0..=1
    pub opacity: f32,
    /// Optional tint color
    pub tint: Option<String>,
}

impl Default for TileTemplate {
    fn default() -> Self {
        Self {
            texture: String::new(),
            frame: 0,
            x: 0.0,
            y: 0.0,
            scale: Scale2::default(),
            rotation: 0.0,
            opacity: 1.0,
            tint: None,
        }
    }
}

impl TileTemplate {
    /// Create a tile from a tileset frame at a position
    pub fn new(texture: impl Into<String>, frame: u32, x: f32, y: f32) -> Self {
        Self {
            texture: texture.into(),
            frame,
            x,
            y,
            ..Default::default()
        }
    }
}

/// A layer of tiles sharing one stacking order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileLayerTemplate {
    /// Stacking order
    pub depth: i32,
    /// Hidden layers are composed but not drawn
    pub hidden: bool,
    /// Tiles, in authoring order
    pub tiles: Vec<TileTemplate>,
}

impl TileLayerTemplate {
    /// Create an empty layer at a depth
    pub fn new(depth: i32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Builder pattern: Add a tile
    pub fn with_tile(mut self, tile: TileTemplate) -> Self {
        self.tiles.push(tile);
        self
    }
}
