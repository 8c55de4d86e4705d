//! Domain model for persons, their books and the transport shapes.
//!
//! # Responsibility
//! - Define persistence entities (`Person`, `Book`) used by repositories.
//! - Define transport objects (`BookDto`, `UserDto`) used at the boundary.
//!
//! # Invariants
//! - Entity ids are assigned by the store; `None` means "not persisted yet".
//! - A persisted `Book` always carries its owner id.
//! - Transport objects are never persisted directly.

pub mod book;
pub mod dto;
pub mod person;
