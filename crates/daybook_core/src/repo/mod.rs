//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate key layout and serialization details from service orchestration.
//!
//! # Invariants
//! - Repositories guard storage integrity only; domain validation lives with
//!   the caller that assembles the fields.
//! - Repository APIs return semantic errors (`NotFound`) in addition to store
//!   transport errors.

pub mod event_repo;
