// xt-entropy-core/src/registry.rs
//! The volume registry and the per-volume item buffers it owns.
//!
//! A [`Volume`] is created the first time its key is resolved and lives until
//! the registry is dropped. Its item buffer is allocated by Prepare, filled by
//! the collector and taken out again by Finalize.

use std::collections::TryReserveError;

use log::debug;

use crate::errors::XtEntropyError;
use crate::host::ItemId;

/// Per-run lifecycle of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeState {
    /// Known to the registry, no buffer yet.
    Registered,
    /// Buffer allocated; accepting item ids.
    Collecting,
    /// Buffer handed to the entropy pass; no further appends.
    Finalizing,
    /// Entropy pass completed; buffer released.
    Drained,
    /// Entropy pass stopped by the host; buffer released.
    Cancelled,
}

/// One evidence volume and the ids of the items discovered on it.
#[derive(Debug)]
pub struct Volume {
    key: String,
    item_ids: Option<Vec<ItemId>>,
    capacity: usize,
    state: VolumeState,
}

impl Volume {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            item_ids: None,
            capacity: 0,
            state: VolumeState::Registered,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> VolumeState {
        self.state
    }

    /// Capacity fixed at the last allocation (0 when none).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of ids collected into the current buffer.
    pub fn fill_count(&self) -> usize {
        self.item_ids.as_ref().map_or(0, Vec::len)
    }

    pub fn is_allocated(&self) -> bool {
        self.item_ids.is_some()
    }

    /// Ids collected so far, in discovery order.
    pub fn item_ids(&self) -> Option<&[ItemId]> {
        self.item_ids.as_deref()
    }

    /// Replaces any previous buffer with an empty one of exactly `capacity` slots.
    pub fn allocate(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        self.release();
        let mut ids = Vec::new();
        ids.try_reserve_exact(capacity)?;
        self.item_ids = Some(ids);
        self.capacity = capacity;
        self.state = VolumeState::Collecting;
        debug!("Allocated item buffer of {} slots for volume '{}'", capacity, self.key);
        Ok(())
    }

    /// Appends one id. Fails without side effect when the volume is not
    /// collecting or its buffer is already full.
    pub fn push_item(&mut self, item: ItemId) -> Result<(), XtEntropyError> {
        let capacity = self.capacity;
        match self.item_ids.as_mut() {
            Some(ids) if self.state == VolumeState::Collecting => {
                if ids.len() >= capacity {
                    return Err(XtEntropyError::BufferFull { key: self.key.clone(), capacity });
                }
                ids.push(item);
                Ok(())
            }
            _ => Err(XtEntropyError::BufferNotAllocated(self.key.clone())),
        }
    }

    /// Takes the buffer for the entropy pass. Returns `None` when there is
    /// nothing to process, leaving the volume untouched.
    pub fn begin_finalize(&mut self) -> Option<Vec<ItemId>> {
        if self.fill_count() == 0 {
            return None;
        }
        self.state = VolumeState::Finalizing;
        self.capacity = 0;
        self.item_ids.take()
    }

    /// Records how the entropy pass ended.
    pub fn finish(&mut self, cancelled: bool) {
        self.state = if cancelled { VolumeState::Cancelled } else { VolumeState::Drained };
    }

    /// Drops the item buffer, if any.
    pub fn release(&mut self) {
        if self.item_ids.take().is_some() {
            debug!("Released item buffer of volume '{}'", self.key);
        }
        self.capacity = 0;
    }
}

/// Index of a volume within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeId(usize);

/// Append-only collection of volumes, at most one per key.
#[derive(Debug, Default)]
pub struct VolumeRegistry {
    volumes: Vec<Volume>,
}

impl VolumeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the volume with `key`, creating it if unseen.
    ///
    /// Returns its id and whether it already existed. The number of volumes in
    /// one case is small, so a linear scan is used.
    pub fn resolve(&mut self, key: &str) -> (VolumeId, bool) {
        if let Some(id) = self.find(key) {
            return (id, true);
        }
        self.volumes.push(Volume::new(key));
        debug!("Registered volume '{}' ({} known)", key, self.volumes.len());
        (VolumeId(self.volumes.len() - 1), false)
    }

    pub fn find(&self, key: &str) -> Option<VolumeId> {
        self.volumes.iter().position(|v| v.key == key).map(VolumeId)
    }

    pub fn get(&self, id: VolumeId) -> Option<&Volume> {
        self.volumes.get(id.0)
    }

    pub fn get_mut(&mut self, id: VolumeId) -> Option<&mut Volume> {
        self.volumes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Volumes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Volume> {
        self.volumes.iter()
    }

    /// Drops every item buffer. Returns how many were still allocated.
    pub fn release_all(&mut self) -> usize {
        let mut released = 0;
        for volume in &mut self.volumes {
            if volume.is_allocated() {
                released += 1;
            }
            volume.release();
        }
        released
    }
}
