//! Headless backend
//!
//! Keeps a record of every surface it is asked to create and destroy. Used by
//! the viewer binary and throughout the tests.

use std::collections::HashMap;

use crate::core::SurfaceConfig;
use crate::render::{BackendResult, DisposalOptions, RenderBackend, RenderError, SurfaceHandle};

/// Lifecycle record of one surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    /// Configuration the surface was created with
    pub config: SurfaceConfig,
    /// Set once the surface is destroyed: `(detach_view, disposal)`
    pub destroyed: Option<(bool, DisposalOptions)>,
}

/// Backend that renders nothing
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    device_pixel_ratio: f32,
    next_handle: u64,
    surfaces: HashMap<SurfaceHandle, SurfaceRecord>,
}

impl HeadlessBackend {
    /// Create a backend reporting a 1.0 device pixel ratio
    pub fn new() -> Self {
        Self::with_device_pixel_ratio(1.0)
    }

    /// Create a backend reporting the given device pixel ratio
    pub fn with_device_pixel_ratio(device_pixel_ratio: f32) -> Self {
        Self {
            device_pixel_ratio,
            next_handle: 1,
            surfaces: HashMap::new(),
        }
    }

    /// Look up the record for a surface
    pub fn surface(&self, handle: SurfaceHandle) -> Option<&SurfaceRecord> {
        self.surfaces.get(&handle)
    }

    /// Number of surfaces not yet destroyed
    pub fn live_surface_count(&self) -> usize {
        self.surfaces.values().filter(|s| s.destroyed.is_none()).count()
    }

    /// Number of surfaces ever created
    pub fn created_surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn create_surface(&mut self, config: &SurfaceConfig) -> BackendResult<SurfaceHandle> {
        let handle = SurfaceHandle(self.next_handle);
        self.next_handle += 1;

        log::debug!(
            "Headless surface {:?} created at {}x{} @{}x",
            handle,
            config.width,
            config.height,
            config.resolution
        );

        self.surfaces.insert(
            handle,
            SurfaceRecord {
                config: config.clone(),
                destroyed: None,
            },
        );
        Ok(handle)
    }

    fn destroy_surface(
        &mut self,
        handle: SurfaceHandle,
        detach_view: bool,
        disposal: DisposalOptions,
    ) -> BackendResult<()> {
        let record = self
            .surfaces
            .get_mut(&handle)
            .filter(|record| record.destroyed.is_none())
            .ok_or(RenderError::UnknownSurface(handle))?;

        record.destroyed = Some((detach_view, disposal));
        log::debug!("Headless surface {:?} destroyed", handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SurfaceOptions;

    #[test]
    fn test_surface_lifecycle_is_recorded() {
        let mut backend = HeadlessBackend::with_device_pixel_ratio(2.0);
        let config = SurfaceOptions::new().with_size(32, 16).resolve().unwrap();

        let handle = backend.create_surface(&config).unwrap();
        assert_eq!(backend.live_surface_count(), 1);
        assert_eq!(backend.surface(handle).map(|s| s.config.width), Some(32));

        backend.destroy_surface(handle, true, DisposalOptions::all()).unwrap();
        assert_eq!(backend.live_surface_count(), 0);
        assert_eq!(
            backend.surface(handle).and_then(|s| s.destroyed),
            Some((true, DisposalOptions::all()))
        );
    }

    #[test]
    fn test_double_destroy_fails() {
        let mut backend = HeadlessBackend::new();
        let config = SurfaceOptions::new().resolve().unwrap();
        let handle = backend.create_surface(&config).unwrap();

        backend.destroy_surface(handle, false, DisposalOptions::default()).unwrap();
        let err = backend
            .destroy_surface(handle, false, DisposalOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownSurface(_)));
    }
}
