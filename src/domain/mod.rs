//! Domain layer: the item entity and its identifier.

pub mod item;
pub mod item_id;

pub use item::{Item, ItemName};
pub use item_id::ItemId;
