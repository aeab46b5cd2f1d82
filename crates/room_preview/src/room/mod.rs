//! Room descriptions
//!
//! Plain data for a room as authored in the editor. A description is consumed
//! once per preview surface and never written back to.

pub mod color;
mod templates;

pub use color::{parse_color, ColorError};
pub use templates::{
    BackgroundRepeat, BackgroundTemplate, CopyTemplate, Scale2, TileLayerTemplate, TileTemplate,
};

use serde::{Serialize, Deserialize};

use crate::config::Config;

/// A room as authored in the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomDescription {
    /// Room name, used for log output
    pub name: String,
    /// Room width in pixels
    pub width: i32,
    /// Room height in pixels
    pub height: i32,
    /// Solid fill color, e.g. `#112233`
    pub background_color: Option<String>,
    /// UI rooms are drawn over other rooms and get no solid fill
    pub is_ui: bool,
    /// Background layers, bottom first
    pub backgrounds: Vec<BackgroundTemplate>,
    /// Object instances
    pub copies: Vec<CopyTemplate>,
    /// Tile layers
    pub tiles: Vec<TileLayerTemplate>,
}

impl Default for RoomDescription {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 1280,
            height: 720,
            background_color: None,
            is_ui: false,
            backgrounds: Vec::new(),
            copies: Vec::new(),
            tiles: Vec::new(),
        }
    }
}

impl Config for RoomDescription {}

impl RoomDescription {
    /// Create an empty room of the given size
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// Builder pattern: Set the background color
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Builder pattern: Mark as a UI room
    pub fn as_ui(mut self, is_ui: bool) -> Self {
        self.is_ui = is_ui;
        self
    }

    /// Builder pattern: Add a background
    pub fn with_background(mut self, background: BackgroundTemplate) -> Self {
        self.backgrounds.push(background);
        self
    }

    /// Builder pattern: Add an object instance
    pub fn with_copy(mut self, copy: CopyTemplate) -> Self {
        self.copies.push(copy);
        self
    }

    /// Builder pattern: Add a tile layer
    pub fn with_tile_layer(mut self, layer: TileLayerTemplate) -> Self {
        self.tiles.push(layer);
        self
    }
}
