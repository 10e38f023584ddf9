//! # shopping-list-api
//!
//! REST API for a shopping list backed by a document store.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ItemService (service/)
//!     │
//!     ├── ItemStore (persistence/)
//!     │       ├── PostgreSQL JSONB collection
//!     │       └── in-memory collection
//!     │
//!     └── Item, ItemId (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
