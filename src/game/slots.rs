//! Attachment Slot Table
//!
//! Eligible attachment points sit along the body chain at a fixed stride
//! (`start_index`, `start_index + interval`, ...), always below the final
//! segment index so the tail tip never carries a weapon. The table is the
//! single authority on slot occupancy: `bind` and `unbind` are the only
//! mutators, and the slot->attachment / attachment->slot views can never
//! disagree because the reverse view is derived from the same map.
//!
//! Attachments are referenced by a stable `AttachmentId` (index into the
//! session's attachment list - ground weapons are never destroyed), never
//! by back-pointer.

use std::collections::BTreeMap;

/// Stable identifier for an attachment within one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId(pub usize);

/// Why a bind request was refused. Recoverable: the weapon simply
/// stays unattached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// Slot already holds a different attachment (no swap, no overwrite).
    Occupied { slot: usize },
    /// Index is not in the eligible sparse set for the current chain.
    Ineligible { slot: usize },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::Occupied { slot } => write!(f, "slot {} already has a weapon", slot),
            BindError::Ineligible { slot } => write!(f, "slot {} is not an attachment node", slot),
        }
    }
}

impl std::error::Error for BindError {}

/// Owned mapping from segment index to bound attachment.
#[derive(Debug, Clone)]
pub struct SlotTable {
    start_index: usize,
    interval: usize,
    slots: BTreeMap<usize, AttachmentId>,
}

impl SlotTable {
    pub fn new(start_index: usize, interval: usize) -> Self {
        Self {
            start_index,
            interval,
            slots: BTreeMap::new(),
        }
    }

    /// Eligible slot indices for a chain of `chain_len` segments, in
    /// ascending order. The final segment index is excluded.
    pub fn eligible_indices(&self, chain_len: usize) -> impl Iterator<Item = usize> {
        let last = chain_len.saturating_sub(1);
        (self.start_index..last).step_by(self.interval.max(1))
    }

    pub fn is_eligible(&self, slot: usize, chain_len: usize) -> bool {
        slot >= self.start_index
            && slot < chain_len.saturating_sub(1)
            && (slot - self.start_index) % self.interval.max(1) == 0
    }

    /// Bind an attachment to a slot. Re-binding the same attachment to a
    /// new slot releases its old slot first, so the bidirectional
    /// invariant holds across the operation.
    pub fn bind(&mut self, slot: usize, id: AttachmentId, chain_len: usize) -> Result<(), BindError> {
        if !self.is_eligible(slot, chain_len) {
            return Err(BindError::Ineligible { slot });
        }
        match self.slots.get(&slot) {
            Some(&occupant) if occupant != id => return Err(BindError::Occupied { slot }),
            _ => {}
        }
        if let Some(old_slot) = self.slot_of(id) {
            self.slots.remove(&old_slot);
        }
        self.slots.insert(slot, id);
        Ok(())
    }

    /// Release whatever slot this attachment holds. Returns the freed
    /// slot index, or None if it was not bound.
    pub fn unbind(&mut self, id: AttachmentId) -> Option<usize> {
        let slot = self.slot_of(id)?;
        self.slots.remove(&slot);
        Some(slot)
    }

    pub fn occupant(&self, slot: usize) -> Option<AttachmentId> {
        self.slots.get(&slot).copied()
    }

    pub fn slot_of(&self, id: AttachmentId) -> Option<usize> {
        self.slots
            .iter()
            .find(|(_, &occupant)| occupant == id)
            .map(|(&slot, _)| slot)
    }

    /// All current bindings in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AttachmentId)> + '_ {
        self.slots.iter().map(|(&slot, &id)| (slot, id))
    }

    pub fn bound_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SlotTable {
        SlotTable::new(1, 3)
    }

    #[test]
    fn test_eligible_stride_excludes_tail() {
        let t = table();
        // 8 segments: indices 1 and 4 qualify; 7 is the final segment
        let eligible: Vec<usize> = t.eligible_indices(8).collect();
        assert_eq!(eligible, vec![1, 4]);
        assert!(!t.is_eligible(7, 8));
        assert!(!t.is_eligible(2, 8));
        assert!(t.is_eligible(4, 8));
    }

    #[test]
    fn test_bind_and_unbind_consistent_both_ways() {
        let mut t = table();
        let id = AttachmentId(0);
        t.bind(1, id, 8).unwrap();
        assert_eq!(t.occupant(1), Some(id));
        assert_eq!(t.slot_of(id), Some(1));

        assert_eq!(t.unbind(id), Some(1));
        assert_eq!(t.occupant(1), None);
        assert_eq!(t.slot_of(id), None);
    }

    #[test]
    fn test_bind_refuses_occupied_slot() {
        let mut t = table();
        t.bind(1, AttachmentId(0), 8).unwrap();
        let err = t.bind(1, AttachmentId(1), 8).unwrap_err();
        assert_eq!(err, BindError::Occupied { slot: 1 });
        // Loser is untouched, winner still bound
        assert_eq!(t.occupant(1), Some(AttachmentId(0)));
        assert_eq!(t.slot_of(AttachmentId(1)), None);
    }

    #[test]
    fn test_bind_refuses_ineligible_index() {
        let mut t = table();
        assert_eq!(
            t.bind(2, AttachmentId(0), 8).unwrap_err(),
            BindError::Ineligible { slot: 2 }
        );
        // Tail index is never eligible even though it matches the stride
        assert_eq!(
            t.bind(7, AttachmentId(0), 8).unwrap_err(),
            BindError::Ineligible { slot: 7 }
        );
    }

    #[test]
    fn test_rebind_moves_attachment() {
        let mut t = table();
        let id = AttachmentId(3);
        t.bind(1, id, 8).unwrap();
        t.bind(4, id, 8).unwrap();
        assert_eq!(t.occupant(1), None);
        assert_eq!(t.occupant(4), Some(id));
        assert_eq!(t.slot_of(id), Some(4));
        assert_eq!(t.bound_count(), 1);
    }

    #[test]
    fn test_iter_ascending() {
        let mut t = table();
        t.bind(4, AttachmentId(1), 10).unwrap();
        t.bind(1, AttachmentId(0), 10).unwrap();
        let order: Vec<usize> = t.iter().map(|(slot, _)| slot).collect();
        assert_eq!(order, vec![1, 4]);
    }
}
