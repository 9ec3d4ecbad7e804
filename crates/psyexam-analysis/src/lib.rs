//! psyexam-analysis
//!
//! HTTP client for the scoring service. The clinical server calls it to
//! analyze stored results and to list a patient's analyses.

pub mod client;
pub mod error;
