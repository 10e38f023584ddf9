//! Service layer: business rules between the API and the store.
//!
//! [`ItemService`] validates input and turns store outcomes into
//! [`crate::error::ApiError`]s.

pub mod item_service;

pub use item_service::ItemService;
