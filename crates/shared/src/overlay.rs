//! Ownership of the single routing overlay drawn on the map.
//!
//! The mapping plugin builds overlays imperatively; [`OverlayManager`] turns
//! that into a keyed resource: callers state which route should exist and the
//! manager destroys and rebuilds only when that changes.

use crate::error::OverlayError;
use crate::models::LatLng;
use crate::route::TransportMode;

/// Everything a routing overlay is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayKey {
    pub origin: LatLng,
    pub destination: LatLng,
    pub mode: TransportMode,
}

/// Creates and removes overlays on a concrete map.
pub trait RoutingBackend {
    type Handle;

    fn create(&mut self, key: &OverlayKey) -> Result<Self::Handle, OverlayError>;

    fn destroy(&mut self, handle: Self::Handle) -> Result<(), OverlayError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Unchanged,
    Created,
    Removed,
    /// The plugin is still loading; the key is built once it is ready.
    Deferred,
}

/// Holds at most one overlay, keyed by the inputs it was built from.
pub struct OverlayManager<B: RoutingBackend> {
    backend: B,
    ready: bool,
    wanted: Option<OverlayKey>,
    current: Option<(OverlayKey, B::Handle)>,
}

impl<B: RoutingBackend> OverlayManager<B> {
    /// A manager whose plugin code is not loaded yet.
    pub fn new(backend: B) -> Self {
        OverlayManager {
            backend,
            ready: false,
            wanted: None,
            current: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn current_key(&self) -> Option<&OverlayKey> {
        self.current.as_ref().map(|(k, _)| k)
    }

    /// Make the overlay match `key`, where `None` means no overlay.
    ///
    /// The previous overlay is always destroyed before a new one is built.
    /// A failed destroy still drops the old handle and the new overlay is
    /// attempted; the destroy error is reported afterwards.
    pub fn sync(&mut self, key: Option<OverlayKey>) -> Result<SyncOutcome, OverlayError> {
        self.wanted = key;
        if self.current_key() == key.as_ref() {
            return Ok(SyncOutcome::Unchanged);
        }

        let released = self.release();
        let Some(key) = key else {
            return released.map(|_| SyncOutcome::Removed);
        };
        if !self.ready {
            return released.map(|_| SyncOutcome::Deferred);
        }

        let handle = self.backend.create(&key)?;
        tracing::debug!(mode = %key.mode, "routing overlay created");
        self.current = Some((key, handle));
        released.map(|_| SyncOutcome::Created)
    }

    /// The plugin finished loading: build whatever was requested meanwhile.
    pub fn mark_ready(&mut self) -> Result<SyncOutcome, OverlayError> {
        self.ready = true;
        let wanted = self.wanted;
        self.sync(wanted)
    }

    /// Remove the overlay and forget any pending request.
    pub fn teardown(&mut self) -> Result<(), OverlayError> {
        self.wanted = None;
        self.release()
    }

    fn release(&mut self) -> Result<(), OverlayError> {
        match self.current.take() {
            Some((_, handle)) => {
                tracing::debug!("routing overlay destroyed");
                self.backend.destroy(handle)
            }
            None => Ok(()),
        }
    }
}

impl<B: RoutingBackend> Drop for OverlayManager<B> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            tracing::warn!(error = e.detail(), "failed to remove routing overlay on teardown");
        }
    }
}
