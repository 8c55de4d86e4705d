//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate existence checks, repository writes and DTO conversion.
//! - Keep request-handling layers decoupled from storage details.
//!
//! # Invariants
//! - Collaborators are supplied through constructors; services hold no
//!   process-wide state.
//! - Misses surface as `ServiceError::NotFound`; store failures pass through
//!   unchanged as `ServiceError::Repo`.

pub mod book_service;
pub mod error;
pub mod user_service;
