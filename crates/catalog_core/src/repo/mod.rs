//! Entity store gateway: contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow query/command interface the author workflow consumes.
//! - Isolate SQLite query details from workflow orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - A missing record on read is `Ok(None)`, never an error.

pub mod author_repo;
pub mod book_repo;
pub mod sqlite_store;
