//! psyexam-auth
//!
//! Password hashing, signed session cookies, registration checks, and the
//! login → approval → role access gate.

pub mod error;
pub mod gate;
pub mod password;
pub mod registration;
pub mod session;
