//! Cross-layer error classification.
//!
//! Each layer keeps its own error enum; `ErrorKind` maps them onto one
//! caller-facing taxonomy so UI code can react without matching every variant.

/// Caller-facing category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input the caller can correct.
    Validation,
    /// The write collides with existing data (duplicate email).
    Conflict,
    /// Credentials did not match.
    Auth,
    /// The referenced record does not exist.
    NotFound,
    /// The key-value store failed; fatal for the operation.
    Storage,
}
