//! Domain core for the classroom notification service.
//!
//! Holds the identifier types, the error taxonomy, the storage collaborator
//! trait, and the pure notification/roster logic. Nothing in here talks to
//! sqlx or axum directly.

pub mod error;
pub mod memory;
pub mod notification;
pub mod roster;
pub mod store;
pub mod types;
