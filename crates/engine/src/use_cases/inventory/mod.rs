//! Inventory use cases.
//!
//! Every operation returns the complete post-operation list; clients replace
//! their copy with it.

mod add_item;
mod error;
mod list_items;
mod remove_item;

pub use add_item::AddItem;
pub use error::InventoryError;
pub use list_items::ListItems;
pub use remove_item::RemoveItem;

use std::sync::Arc;

use charsheet_domain::ItemCatalog;
use tokio::sync::Mutex;

use crate::infrastructure::ports::InventoryRepo;

/// Container for inventory use cases.
pub struct InventoryUseCases {
    pub list: Arc<ListItems>,
    pub add: Arc<AddItem>,
    pub remove: Arc<RemoveItem>,
}

impl InventoryUseCases {
    /// Wire the use cases over one repo and catalog.
    ///
    /// Add and remove share a write lock so concurrent requests cannot lose
    /// each other's read-modify-write.
    pub fn new(inventory_repo: Arc<dyn InventoryRepo>, catalog: Arc<dyn ItemCatalog>) -> Self {
        let write_lock = Arc::new(Mutex::new(()));
        Self {
            list: Arc::new(ListItems::new(inventory_repo.clone())),
            add: Arc::new(AddItem::new(
                inventory_repo.clone(),
                catalog,
                write_lock.clone(),
            )),
            remove: Arc::new(RemoveItem::new(inventory_repo, write_lock)),
        }
    }
}
