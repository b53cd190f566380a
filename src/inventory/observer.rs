use super::manager::InventoryState;

/// Handle returned by [`InventoryManager::subscribe`], used to unsubscribe.
///
/// [`InventoryManager::subscribe`]: super::InventoryManager::subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type BoxedObserver = Box<dyn FnMut(&InventoryState)>;

/// Registered change observers, notified synchronously in registration order.
///
/// Observers receive the read-only [`InventoryState`] view, so they cannot
/// re-enter a mutating operation during delivery.
#[derive(Default)]
pub(crate) struct ObserverSet {
    observers: Vec<(ObserverId, BoxedObserver)>,
    next_id: u64,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&InventoryState) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if the id was never registered or
    /// already removed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, state: &InventoryState) {
        for (_, observer) in &mut self.observers {
            observer(state);
        }
    }
}
