//! Shared primitive types used across the roster engine.

/// Stable numeric identity of a person. Unique within a roster.
pub type PersonId = u64;

/// The canonical solve identifier, stamped on every report.
pub type RunId = String;
