//! Revocable image resources.
//!
//! An [`ImageResource`] is only a handle. The bytes stay in the [`ResourceStore`]
//! that issued it until the handle is revoked; after that every fetch fails.

use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u64);

/// Handle to image bytes held by a [`ResourceStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    id: ResourceId,
    mime: String,
    len: usize,
}

impl ImageResource {
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Default)]
pub struct ResourceStore {
    next_id: u64,
    blobs: HashMap<ResourceId, Arc<[u8]>>,
}

impl ResourceStore {
    /// Stores `bytes` and returns a handle to them.
    pub fn create(&mut self, bytes: impl Into<Arc<[u8]>>, mime: impl Into<String>) -> ImageResource {
        let bytes = bytes.into();
        let id = ResourceId(self.next_id);
        self.next_id += 1;

        let resource = ImageResource {
            id,
            mime: mime.into(),
            len: bytes.len(),
        };
        debug!("Resource {:?} created ({} bytes, {})", id, resource.len, resource.mime);
        self.blobs.insert(id, bytes);
        resource
    }

    /// Returns the bytes behind a live handle.
    pub fn fetch(&self, resource: &ImageResource) -> Option<Arc<[u8]>> {
        self.blobs.get(&resource.id).cloned()
    }

    /// Releases the bytes. Returns `false` if the handle was already revoked.
    pub fn revoke(&mut self, resource: &ImageResource) -> bool {
        let removed = self.blobs.remove(&resource.id).is_some();
        if removed {
            debug!("Resource {:?} revoked", resource.id);
        }
        removed
    }

    pub fn is_live(&self, id: ResourceId) -> bool {
        self.blobs.contains_key(&id)
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
