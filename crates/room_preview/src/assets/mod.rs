//! Asset catalog
//!
//! Textures and object templates are loaded by the editor's shared loader
//! before a preview is built. Scene nodes only look them up here; nothing in
//! this module touches the disk or the GPU.

use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::config::Config;

/// Resolved texture metadata
///
/// A texture is a sprite sheet cut into a `columns` by `rows` grid of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureInfo {
    /// Display name
    pub name: String,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frames per row
    pub columns: u32,
    /// Frame rows
    pub rows: u32,
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 1,
            height: 1,
            columns: 1,
            rows: 1,
        }
    }
}

impl TextureInfo {
    /// Create a single-frame texture
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// Builder pattern: Set the frame grid
    pub fn with_grid(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Total number of frames in the grid
    pub fn frame_count(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }
}

/// Object template an instance (copy) is stamped from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTemplate {
    /// Display name
    pub name: String,
    /// Texture uid, `None` for invisible objects
    pub texture: Option<String>,
    /// Template depth; informational for copies
    pub depth: i32,
}

impl ObjectTemplate {
    /// Create a template
    pub fn new(name: impl Into<String>, texture: Option<&str>) -> Self {
        Self {
            name: name.into(),
            texture: texture.map(str::to_string),
            depth: 0,
        }
    }
}

/// Everything the shared loader has resolved, keyed by uid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCatalog {
    /// Textures by uid
    pub textures: HashMap<String, TextureInfo>,
    /// Object templates by uid
    pub templates: HashMap<String, ObjectTemplate>,
}

impl Config for AssetCatalog {}

impl AssetCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Add a texture
    pub fn with_texture(mut self, uid: impl Into<String>, texture: TextureInfo) -> Self {
        self.textures.insert(uid.into(), texture);
        self
    }

    /// Builder pattern: Add an object template
    pub fn with_template(mut self, uid: impl Into<String>, template: ObjectTemplate) -> Self {
        self.templates.insert(uid.into(), template);
        self
    }

    /// Look up a texture
    pub fn texture(&self, uid: &str) -> Option<&TextureInfo> {
        self.textures.get(uid)
    }

    /// Look up an object template
    pub fn template(&self, uid: &str) -> Option<&ObjectTemplate> {
        self.templates.get(uid)
    }
}
