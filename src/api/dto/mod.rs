//! Data Transfer Objects for REST request/response serialization.
//!
//! Response bodies use camelCase keys to match what browser clients expect.

pub mod item_dto;

pub use item_dto::*;
