//! Catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the author workflow.
//! - Keep derived projections (names, URLs) next to the records they read.
//!
//! # Invariants
//! - Every record is identified by a store-assigned UUID.
//! - Deletion is a hard delete; there are no tombstones.

pub mod author;
pub mod book;
