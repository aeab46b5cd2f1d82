//! Room composer
//!
//! Walks a room description once and materializes it through a
//! [`CompositionTarget`], in a fixed pass order:
//!
//! ```text
//! backgrounds  ->  object instances  ->  tile layers
//! ```
//!
//! A broken object instance is recorded, reported to the editor host, and
//! skipped. Backgrounds and tile layers go through the same incremental
//! operations editors call directly, so their failures propagate.

use crate::error::PreviewError;
use crate::foundation::collections::NodeId;
use crate::preview::EditorHost;
use crate::room::{BackgroundTemplate, CopyTemplate, RoomDescription, TileLayerTemplate};
use crate::scene::node::ConstructionFailure;

/// Something a room can be composed into
pub trait CompositionTarget {
    /// Build, attach, and register a background
    fn add_background(&mut self, template: &BackgroundTemplate) -> Result<NodeId, PreviewError>;

    /// Build, attach, and register an object instance
    fn add_copy(&mut self, template: &CopyTemplate) -> Result<NodeId, ConstructionFailure>;

    /// Build, attach, and register a tile layer
    fn add_tile_layer_template(&mut self, template: &TileLayerTemplate) -> Result<NodeId, PreviewError>;

    /// Number of tiles owned by a layer
    fn tile_count(&self, layer: NodeId) -> usize;
}

/// An object instance that could not be built
#[derive(Debug, Clone, PartialEq)]
pub struct CopyFailure {
    /// Position in the room's copy list
    pub index: usize,
    /// Object template uid of the instance
    pub uid: String,
    /// Why construction failed
    pub error: ConstructionFailure,
}

/// Outcome of composing one room
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionReport {
    /// Backgrounds added
    pub backgrounds: usize,
    /// Object instances added
    pub copies: usize,
    /// Tile layers added
    pub tile_layers: usize,
    /// Tiles added across all layers
    pub tiles: usize,
    /// Object instances that were skipped
    pub failures: Vec<CopyFailure>,
}

impl CompositionReport {
    /// Whether every item was composed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Materializes room descriptions
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomComposer;

impl RoomComposer {
    /// Compose `room` into `target`
    ///
    /// Each failed object instance produces exactly one
    /// [`EditorHost::notify_error`] call. The finished report is handed to
    /// [`EditorHost::composition_finished`] and returned.
    pub fn deserialize<T: CompositionTarget + ?Sized>(
        target: &mut T,
        room: &RoomDescription,
        host: &mut dyn EditorHost,
    ) -> Result<CompositionReport, PreviewError> {
        let mut report = CompositionReport::default();

        for background in &room.backgrounds {
            target.add_background(background)?;
            report.backgrounds += 1;
        }

        for (index, copy) in room.copies.iter().enumerate() {
            match target.add_copy(copy) {
                Ok(_) => report.copies += 1,
                Err(error) => {
                    log::error!("Skipping copy #{} ({}): {}", index, copy.uid, error);
                    host.notify_error(&error.to_string());
                    report.failures.push(CopyFailure {
                        index,
                        uid: copy.uid.clone(),
                        error,
                    });
                }
            }
        }

        for layer in &room.tiles {
            let id = target.add_tile_layer_template(layer)?;
            report.tile_layers += 1;
            report.tiles += target.tile_count(id);
        }

        log::info!(
            "Composed room '{}': {} backgrounds, {} copies ({} skipped), {} tile layers, {} tiles",
            room.name,
            report.backgrounds,
            report.copies,
            report.failures.len(),
            report.tile_layers,
            report.tiles
        );

        host.composition_finished(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::NodeMap;
    use crate::preview::CollectingHost;

    /// Records call order; copies with an empty uid fail
    #[derive(Default)]
    struct RecordingTarget {
        ids: NodeMap<&'static str>,
        calls: Vec<&'static str>,
        fail_layers: bool,
    }

    impl CompositionTarget for RecordingTarget {
        fn add_background(&mut self, _template: &BackgroundTemplate) -> Result<NodeId, PreviewError> {
            self.calls.push("background");
            Ok(self.ids.insert("background"))
        }

        fn add_copy(&mut self, template: &CopyTemplate) -> Result<NodeId, ConstructionFailure> {
            self.calls.push("copy");
            if template.uid.is_empty() {
                return Err(ConstructionFailure::UnknownTemplate { uid: String::new() });
            }
            Ok(self.ids.insert("copy"))
        }

        fn add_tile_layer_template(&mut self, _template: &TileLayerTemplate) -> Result<NodeId, PreviewError> {
            self.calls.push("tile layer");
            if self.fail_layers {
                return Err(ConstructionFailure::UnknownTexture { uid: "x".into() }.into());
            }
            Ok(self.ids.insert("tile layer"))
        }

        fn tile_count(&self, _layer: NodeId) -> usize {
            2
        }
    }

    fn room() -> RoomDescription {
        RoomDescription::new("test", 64, 64)
            .with_tile_layer(TileLayerTemplate::new(0))
            .with_copy(CopyTemplate::new("a", 0.0, 0.0))
            .with_background(BackgroundTemplate::new("bg", 0))
            .with_copy(CopyTemplate::new("", 0.0, 0.0))
            .with_copy(CopyTemplate::new("b", 0.0, 0.0))
            .with_background(BackgroundTemplate::new("bg", 0))
    }

    #[test]
    fn test_pass_order_is_fixed() {
        let mut target = RecordingTarget::default();
        let mut host = CollectingHost::new();

        RoomComposer::deserialize(&mut target, &room(), &mut host).unwrap();

        assert_eq!(
            target.calls,
            vec!["background", "background", "copy", "copy", "copy", "tile layer"]
        );
    }

    #[test]
    fn test_one_broken_copy_is_reported_and_skipped() {
        let mut target = RecordingTarget::default();
        let mut host = CollectingHost::new();

        let report = RoomComposer::deserialize(&mut target, &room(), &mut host).unwrap();

        assert_eq!(report.backgrounds, 2);
        assert_eq!(report.copies, 2);
        assert_eq!(report.tile_layers, 1);
        assert_eq!(report.tiles, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert!(!report.is_complete());

        assert_eq!(host.errors().len(), 1);
        assert_eq!(host.reports().len(), 1);
        assert_eq!(host.reports()[0], report);
    }

    #[test]
    fn test_tile_layer_failure_propagates() {
        let mut target = RecordingTarget {
            fail_layers: true,
            ..Default::default()
        };
        let mut host = CollectingHost::new();

        let err = RoomComposer::deserialize(&mut target, &room(), &mut host).unwrap_err();

        assert!(matches!(err, PreviewError::Construction(_)));
        assert!(host.reports().is_empty());
    }
}
