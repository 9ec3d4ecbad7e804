//! psyexam-core
//!
//! Pure domain types and navigation path conventions.
//! No database or HTTP dependency; this is the shared vocabulary of the
//! psyexam system.

pub mod error;
pub mod models;
pub mod paths;
