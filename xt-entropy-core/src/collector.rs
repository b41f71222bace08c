// xt-entropy-core/src/collector.rs
//! Phase one: buffering the id of every item the host enumerates.

use crate::errors::XtEntropyError;
use crate::host::ItemId;
use crate::registry::Volume;

/// Stores `item` in the next free slot of the current volume's buffer.
///
/// The host announces the item count at Prepare and must enumerate exactly
/// that many items. A missing current volume, a volume without a buffer, or a
/// full buffer is a contract violation and is rejected with no side effect.
pub fn collect(current_volume: Option<&mut Volume>, item: ItemId) -> Result<(), XtEntropyError> {
    let volume = current_volume.ok_or(XtEntropyError::NoCurrentVolume)?;
    volume.push_item(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::VolumeRegistry;

    #[test]
    fn test_collect_without_volume() {
        assert_eq!(collect(None, 1), Err(XtEntropyError::NoCurrentVolume));
    }

    #[test]
    fn test_collect_fills_exactly_capacity() {
        let mut registry = VolumeRegistry::new();
        let (id, _) = registry.resolve("vol");
        registry.get_mut(id).unwrap().allocate(3).unwrap();

        for item in [100, 200, 300] {
            collect(registry.get_mut(id), item).unwrap();
        }
        let volume = registry.get(id).unwrap();
        assert_eq!(volume.fill_count(), volume.capacity());

        let overflow = collect(registry.get_mut(id), 400);
        assert!(matches!(overflow, Err(XtEntropyError::BufferFull { capacity: 3, .. })));
        assert_eq!(registry.get(id).unwrap().item_ids(), Some(&[100, 200, 300][..]));
    }

    #[test]
    fn test_zero_capacity_rejects_first_item() {
        let mut registry = VolumeRegistry::new();
        let (id, _) = registry.resolve("empty");
        registry.get_mut(id).unwrap().allocate(0).unwrap();
        assert!(collect(registry.get_mut(id), 1).is_err());
    }
}
