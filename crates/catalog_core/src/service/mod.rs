//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into request-level use cases.
//! - Keep the HTTP router and template engine decoupled from storage details.

pub mod author_workflow;
