//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod biometric_service;
pub mod event_service;
pub mod identity_service;
