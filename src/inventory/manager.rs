use super::observer::{ObserverId, ObserverSet};
use crate::catalog::Catalog;
use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::types::{InventoryEntry, ItemTypeId, Placement, SlotIndex};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Slot capacity of the reference configuration
pub const DEFAULT_CAPACITY: usize = 6;

/// Live slot/item bookkeeping of one inventory.
///
/// Three collections are kept in lockstep: the entry per held item type, the
/// slot-to-type index, and the occupied slot set. Occupied slots and held
/// item types are always in bijection. Only [`InventoryManager`] mutates
/// this; observers and the presentation layer read it.
#[derive(Debug)]
pub struct InventoryState {
    entries: HashMap<ItemTypeId, InventoryEntry>,
    slot_to_type: HashMap<SlotIndex, ItemTypeId>,
    occupied: HashSet<SlotIndex>,
    capacity: usize,
}

impl InventoryState {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            slot_to_type: HashMap::new(),
            occupied: HashSet::new(),
            capacity,
        }
    }

    /// Fixed slot capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots (equals the number of distinct held types)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.occupied.len() >= self.capacity
    }

    /// Whether this item type is currently held
    pub fn is_held(&self, item_type: ItemTypeId) -> bool {
        self.entries.contains_key(&item_type)
    }

    pub fn is_slot_occupied(&self, slot: SlotIndex) -> bool {
        self.occupied.contains(&slot)
    }

    /// Entry for a held item type
    pub fn entry(&self, item_type: ItemTypeId) -> Option<&InventoryEntry> {
        self.entries.get(&item_type)
    }

    /// Entry occupying a slot
    pub fn entry_at(&self, slot: SlotIndex) -> Option<&InventoryEntry> {
        let item_type = self.slot_to_type.get(&slot)?;
        self.entries.get(item_type)
    }

    /// All entries, ordered by slot index
    pub fn entries(&self) -> impl Iterator<Item = &InventoryEntry> {
        let mut entries: Vec<&InventoryEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.slot);
        entries.into_iter()
    }

    /// Lowest-indexed free slot, scanning from 0 on every call.
    ///
    /// A full rescan rather than a cached cursor: removals free arbitrary
    /// slots, and the lowest free index must win the tie-break.
    pub fn free_slot(&self) -> Option<SlotIndex> {
        (0..self.capacity).find(|slot| !self.occupied.contains(slot))
    }
}

/// Inventory state manager
///
/// Owns the live slot/item state of one player session and exposes the
/// add/remove/exchange operations. The catalog is injected at construction
/// and consulted to validate item types at add time. After every successful
/// mutation all subscribed observers are notified synchronously, in
/// registration order, before the call returns; rejected operations mutate
/// nothing and notify nobody.
///
/// Single-threaded by design: mutating operations take `&mut self` and run
/// to completion on the calling thread. A multi-threaded adaptation must
/// serialize all operations behind one lock.
pub struct InventoryManager {
    catalog: Arc<Catalog>,
    state: InventoryState,
    observers: ObserverSet,
}

impl InventoryManager {
    /// Create a manager with the given slot capacity
    pub fn new(catalog: Arc<Catalog>, capacity: usize) -> Self {
        Self {
            catalog,
            state: InventoryState::new(capacity),
            observers: ObserverSet::new(),
        }
    }

    /// Create a manager from a loaded [`InventoryConfig`]
    pub fn from_config(config: &InventoryConfig, catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, config.capacity)
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    /// The injected catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Register a change observer. It is called after every successful
    /// mutation, before the mutating call returns.
    pub fn subscribe(&mut self, observer: impl FnMut(&InventoryState) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a previously registered observer
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add one unit of an item type.
    ///
    /// A type that is already held stacks: its quantity is incremented and
    /// its slot is unchanged, even when the inventory is full (no new slot is
    /// consumed). A new type takes a slot chosen by `placement` and is
    /// rejected when the inventory is full, when the catalog does not know
    /// the type, or when the requested slot is occupied or out of range.
    ///
    /// Returns the slot holding the item.
    pub fn add(
        &mut self,
        item_type: ItemTypeId,
        placement: Placement,
    ) -> Result<SlotIndex, InventoryError> {
        let held = self.state.entries.contains_key(&item_type);

        if !held && self.state.is_full() {
            warn!("Rejected add of item type {}: inventory full", item_type);
            return Err(InventoryError::CapacityExceeded {
                capacity: self.state.capacity,
            });
        }

        if !self.catalog.contains(item_type) {
            warn!("Rejected add of item type {}: no catalog entry", item_type);
            return Err(InventoryError::UnknownItemType(item_type));
        }

        // Stack onto the existing entry, slot unchanged
        if let Some(entry) = self.state.entries.get_mut(&item_type) {
            entry.quantity += 1;
            let slot = entry.slot;
            debug!("Stacked item type {} at slot {}", item_type, slot);
            self.observers.notify(&self.state);
            return Ok(slot);
        }

        let slot = match placement {
            Placement::Auto => match self.state.free_slot() {
                Some(slot) => slot,
                None => {
                    return Err(InventoryError::CapacityExceeded {
                        capacity: self.state.capacity,
                    })
                }
            },
            Placement::At(slot) => {
                if slot >= self.state.capacity {
                    warn!("Rejected add of item type {}: slot {} out of range", item_type, slot);
                    return Err(InventoryError::SlotOutOfRange {
                        slot,
                        capacity: self.state.capacity,
                    });
                }
                if self.state.occupied.contains(&slot) {
                    warn!("Rejected add of item type {}: slot {} occupied", item_type, slot);
                    return Err(InventoryError::SlotOccupied(slot));
                }
                slot
            }
        };

        self.state.entries.insert(
            item_type,
            InventoryEntry {
                item_type,
                quantity: 1,
                slot,
            },
        );
        self.state.slot_to_type.insert(slot, item_type);
        self.state.occupied.insert(slot);

        debug!("Added item type {} at slot {}", item_type, slot);
        self.observers.notify(&self.state);
        Ok(slot)
    }

    /// Remove an item type entirely, freeing its slot.
    ///
    /// The whole entry goes regardless of quantity; there is no decrement.
    /// Returns the evicted entry so a caller relocating an item can re-add it
    /// without a second lookup.
    pub fn remove(&mut self, item_type: ItemTypeId) -> Result<InventoryEntry, InventoryError> {
        let entry = match self.state.entries.remove(&item_type) {
            Some(entry) => entry,
            None => {
                warn!("Rejected remove of item type {}: not held", item_type);
                return Err(InventoryError::ItemNotHeld(item_type));
            }
        };

        self.state.slot_to_type.remove(&entry.slot);
        self.state.occupied.remove(&entry.slot);

        debug!("Removed item type {} from slot {}", item_type, entry.slot);
        self.observers.notify(&self.state);
        Ok(entry)
    }

    /// Swap the item types occupying two slots.
    ///
    /// Both slots must be occupied; quantities are untouched. Swapping a slot
    /// with itself is a no-op that still notifies observers.
    pub fn exchange(&mut self, slot_a: SlotIndex, slot_b: SlotIndex) -> Result<(), InventoryError> {
        let type_a = match self.state.slot_to_type.get(&slot_a) {
            Some(item_type) => *item_type,
            None => {
                warn!("Rejected exchange: slot {} is empty", slot_a);
                return Err(InventoryError::SlotEmpty(slot_a));
            }
        };
        let type_b = match self.state.slot_to_type.get(&slot_b) {
            Some(item_type) => *item_type,
            None => {
                warn!("Rejected exchange: slot {} is empty", slot_b);
                return Err(InventoryError::SlotEmpty(slot_b));
            }
        };

        if slot_a != slot_b {
            if let Some(entry) = self.state.entries.get_mut(&type_a) {
                entry.slot = slot_b;
            }
            if let Some(entry) = self.state.entries.get_mut(&type_b) {
                entry.slot = slot_a;
            }
            self.state.slot_to_type.insert(slot_a, type_b);
            self.state.slot_to_type.insert(slot_b, type_a);
        }

        debug!("Exchanged slots {} and {}", slot_a, slot_b);
        self.observers.notify(&self.state);
        Ok(())
    }

    /// Drop-gesture translation: move the entry at `from_slot` to `to_slot`.
    ///
    /// An occupied target is an exchange; an empty in-range target relocates
    /// the entry, quantity and all, with a single notification.
    pub fn move_item(
        &mut self,
        from_slot: SlotIndex,
        to_slot: SlotIndex,
    ) -> Result<(), InventoryError> {
        if self.state.occupied.contains(&to_slot) {
            return self.exchange(from_slot, to_slot);
        }

        let item_type = match self.state.slot_to_type.get(&from_slot) {
            Some(item_type) => *item_type,
            None => {
                warn!("Rejected move: slot {} is empty", from_slot);
                return Err(InventoryError::SlotEmpty(from_slot));
            }
        };
        if to_slot >= self.state.capacity {
            warn!("Rejected move: slot {} out of range", to_slot);
            return Err(InventoryError::SlotOutOfRange {
                slot: to_slot,
                capacity: self.state.capacity,
            });
        }

        if let Some(entry) = self.state.entries.get_mut(&item_type) {
            entry.slot = to_slot;
        }
        self.state.slot_to_type.remove(&from_slot);
        self.state.slot_to_type.insert(to_slot, item_type);
        self.state.occupied.remove(&from_slot);
        self.state.occupied.insert(to_slot);

        debug!(
            "Moved item type {} from slot {} to slot {}",
            item_type, from_slot, to_slot
        );
        self.observers.notify(&self.state);
        Ok(())
    }

    /// Discard all entries and free every slot (session teardown).
    ///
    /// The catalog is unaffected; it outlives the session. Notifies only if
    /// anything was held.
    pub fn clear(&mut self) {
        if self.state.entries.is_empty() {
            return;
        }

        self.state.entries.clear();
        self.state.slot_to_type.clear();
        self.state.occupied.clear();

        debug!("Cleared inventory");
        self.observers.notify(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IconRef, ItemDefinition};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_catalog() -> Arc<Catalog> {
        let rows = (100..=105)
            .map(|id| ItemDefinition {
                id: ItemTypeId(id),
                name: format!("Item {id}"),
                icon: IconRef(format!("icons/{id}.png")),
            })
            .collect();
        Arc::new(Catalog::from_rows(rows).unwrap())
    }

    fn manager() -> InventoryManager {
        InventoryManager::new(test_catalog(), DEFAULT_CAPACITY)
    }

    /// Occupied slots, slot index, and entries must stay in bijection.
    fn assert_consistent(state: &InventoryState) {
        assert_eq!(state.occupied.len(), state.slot_to_type.len());
        assert_eq!(state.occupied.len(), state.entries.len());
        for slot in &state.occupied {
            let item_type = state.slot_to_type.get(slot).expect("occupied slot indexed");
            let entry = state.entries.get(item_type).expect("indexed type has entry");
            assert_eq!(entry.slot, *slot);
            assert_eq!(entry.item_type, *item_type);
            assert!(entry.quantity >= 1);
        }
    }

    #[test]
    fn test_auto_add_takes_lowest_free_slot() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();
        inv.add(ItemTypeId(101), Placement::At(2)).unwrap();

        let slot = inv.add(ItemTypeId(102), Placement::Auto).unwrap();
        assert_eq!(slot, 1);
        assert_consistent(inv.state());
    }

    #[test]
    fn test_same_type_stacks_into_one_slot() {
        let mut inv = manager();
        let first = inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        let second = inv.add(ItemTypeId(100), Placement::Auto).unwrap();

        assert_eq!(first, second);
        assert_eq!(inv.state().len(), 1);
        assert_eq!(inv.state().entry(ItemTypeId(100)).unwrap().quantity, 2);
        assert_consistent(inv.state());
    }

    #[test]
    fn test_new_type_rejected_at_capacity() {
        let mut inv = manager();
        for id in 100..100 + DEFAULT_CAPACITY as u32 {
            inv.add(ItemTypeId(id), Placement::Auto).unwrap();
        }
        assert!(inv.state().is_full());

        // 105 is in the catalog but there is no free slot left
        let err = inv.add(ItemTypeId(105), Placement::Auto).unwrap_err();
        assert!(matches!(err, InventoryError::CapacityExceeded { capacity: 6 }));
        assert_consistent(inv.state());
    }

    #[test]
    fn test_held_type_still_stacks_at_capacity() {
        let mut inv = manager();
        for id in 100..100 + DEFAULT_CAPACITY as u32 {
            inv.add(ItemTypeId(id), Placement::Auto).unwrap();
        }

        let slot = inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(inv.state().entry(ItemTypeId(100)).unwrap().quantity, 2);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut inv = manager();
        let err = inv.add(ItemTypeId(999), Placement::Auto).unwrap_err();
        assert_eq!(err, InventoryError::UnknownItemType(ItemTypeId(999)));
        assert!(inv.state().is_empty());
    }

    #[test]
    fn test_explicit_slot_must_be_free_and_in_range() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(3)).unwrap();

        let err = inv.add(ItemTypeId(101), Placement::At(3)).unwrap_err();
        assert_eq!(err, InventoryError::SlotOccupied(3));

        let err = inv.add(ItemTypeId(101), Placement::At(6)).unwrap_err();
        assert_eq!(err, InventoryError::SlotOutOfRange { slot: 6, capacity: 6 });

        assert_eq!(inv.state().len(), 1);
        assert_consistent(inv.state());
    }

    #[test]
    fn test_remove_frees_slot_and_returns_entry() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        inv.add(ItemTypeId(100), Placement::Auto).unwrap();

        let entry = inv.remove(ItemTypeId(100)).unwrap();
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.slot, 0);
        assert!(inv.state().is_empty());
        assert!(!inv.state().is_slot_occupied(0));
        assert_consistent(inv.state());
    }

    #[test]
    fn test_remove_missing_type_rejected() {
        let mut inv = manager();
        let err = inv.remove(ItemTypeId(100)).unwrap_err();
        assert_eq!(err, InventoryError::ItemNotHeld(ItemTypeId(100)));
    }

    #[test]
    fn test_remove_then_auto_add_reuses_lowest_slot() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        inv.add(ItemTypeId(101), Placement::Auto).unwrap();
        let before = inv.state().len();

        inv.remove(ItemTypeId(100)).unwrap();
        let slot = inv.add(ItemTypeId(102), Placement::Auto).unwrap();

        assert_eq!(slot, 0);
        assert_eq!(inv.state().len(), before);
        assert_consistent(inv.state());
    }

    #[test]
    fn test_exchange_swaps_and_double_exchange_restores() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();
        inv.add(ItemTypeId(101), Placement::At(1)).unwrap();

        inv.exchange(0, 1).unwrap();
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(101));
        assert_eq!(inv.state().entry_at(1).unwrap().item_type, ItemTypeId(100));
        assert_consistent(inv.state());

        inv.exchange(0, 1).unwrap();
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(100));
        assert_eq!(inv.state().entry_at(1).unwrap().item_type, ItemTypeId(101));
        assert_consistent(inv.state());
    }

    #[test]
    fn test_exchange_preserves_quantities() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();
        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        inv.add(ItemTypeId(101), Placement::At(1)).unwrap();

        inv.exchange(0, 1).unwrap();
        assert_eq!(inv.state().entry(ItemTypeId(100)).unwrap().quantity, 2);
        assert_eq!(inv.state().entry(ItemTypeId(101)).unwrap().quantity, 1);
    }

    #[test]
    fn test_exchange_requires_both_slots_occupied() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();

        assert_eq!(inv.exchange(0, 1).unwrap_err(), InventoryError::SlotEmpty(1));
        assert_eq!(inv.exchange(2, 0).unwrap_err(), InventoryError::SlotEmpty(2));
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(100));
    }

    #[test]
    fn test_exchange_same_slot_notifies() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();

        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        inv.subscribe(move |_| *counter.borrow_mut() += 1);

        inv.exchange(0, 0).unwrap();
        assert_eq!(*notifications.borrow(), 1);
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(100));
    }

    #[test]
    fn test_notifications_fire_only_on_success() {
        let mut inv = manager();
        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        inv.subscribe(move |_| *counter.borrow_mut() += 1);

        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        assert_eq!(*notifications.borrow(), 1);

        inv.add(ItemTypeId(999), Placement::Auto).unwrap_err();
        inv.remove(ItemTypeId(101)).unwrap_err();
        inv.exchange(0, 5).unwrap_err();
        assert_eq!(*notifications.borrow(), 1);

        inv.remove(ItemTypeId(100)).unwrap();
        assert_eq!(*notifications.borrow(), 2);
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let mut inv = manager();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        inv.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&order);
        inv.subscribe(move |_| second.borrow_mut().push("second"));

        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_observer_sees_post_mutation_state() {
        let mut inv = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        inv.subscribe(move |state| sink.borrow_mut().push(state.len()));

        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        inv.add(ItemTypeId(101), Placement::Auto).unwrap();
        inv.remove(ItemTypeId(100)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut inv = manager();
        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        let id = inv.subscribe(move |_| *counter.borrow_mut() += 1);

        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        assert!(inv.unsubscribe(id));
        assert!(!inv.unsubscribe(id));

        inv.add(ItemTypeId(101), Placement::Auto).unwrap();
        assert_eq!(*notifications.borrow(), 1);
    }

    #[test]
    fn test_move_item_to_empty_slot_relocates() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();
        inv.add(ItemTypeId(100), Placement::Auto).unwrap();

        inv.move_item(0, 4).unwrap();
        let entry = inv.state().entry_at(4).unwrap();
        assert_eq!(entry.item_type, ItemTypeId(100));
        assert_eq!(entry.quantity, 2);
        assert!(!inv.state().is_slot_occupied(0));
        assert_consistent(inv.state());
    }

    #[test]
    fn test_move_item_onto_occupied_slot_exchanges() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();
        inv.add(ItemTypeId(101), Placement::At(1)).unwrap();

        inv.move_item(0, 1).unwrap();
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(101));
        assert_eq!(inv.state().entry_at(1).unwrap().item_type, ItemTypeId(100));
        assert_consistent(inv.state());
    }

    #[test]
    fn test_move_item_rejections() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(0)).unwrap();

        assert_eq!(inv.move_item(2, 3).unwrap_err(), InventoryError::SlotEmpty(2));
        assert_eq!(
            inv.move_item(0, 9).unwrap_err(),
            InventoryError::SlotOutOfRange { slot: 9, capacity: 6 }
        );
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(100));
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::Auto).unwrap();
        inv.add(ItemTypeId(101), Placement::Auto).unwrap();

        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        inv.subscribe(move |_| *counter.borrow_mut() += 1);

        inv.clear();
        assert!(inv.state().is_empty());
        assert_eq!(inv.state().free_slot(), Some(0));
        assert_eq!(*notifications.borrow(), 1);

        // Clearing an already empty inventory is silent
        inv.clear();
        assert_eq!(*notifications.borrow(), 1);
    }

    #[test]
    fn test_entries_iterate_in_slot_order() {
        let mut inv = manager();
        inv.add(ItemTypeId(100), Placement::At(4)).unwrap();
        inv.add(ItemTypeId(101), Placement::At(1)).unwrap();
        inv.add(ItemTypeId(102), Placement::At(3)).unwrap();

        let slots: Vec<SlotIndex> = inv.state().entries().map(|entry| entry.slot).collect();
        assert_eq!(slots, vec![1, 3, 4]);
    }

    #[test]
    fn test_reference_session_scenario() {
        let mut inv = manager();

        assert_eq!(inv.add(ItemTypeId(100), Placement::Auto).unwrap(), 0);
        assert_eq!(inv.add(ItemTypeId(101), Placement::Auto).unwrap(), 1);
        inv.remove(ItemTypeId(100)).unwrap();

        // Slot 0 is free again and wins the auto-placement tie-break
        assert_eq!(inv.add(ItemTypeId(102), Placement::Auto).unwrap(), 0);

        inv.exchange(0, 1).unwrap();
        assert_eq!(inv.state().entry_at(0).unwrap().item_type, ItemTypeId(101));
        assert_eq!(inv.state().entry_at(1).unwrap().item_type, ItemTypeId(102));
        assert_consistent(inv.state());
    }
}
