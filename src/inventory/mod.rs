pub mod manager;
pub mod observer;

pub use manager::{InventoryManager, InventoryState, DEFAULT_CAPACITY};
pub use observer::ObserverId;
