//! psyexam-storage
//!
//! SQLite persistence. One module per table; every operation is a free
//! function over a borrowed `rusqlite::Connection` obtained from
//! [`db::Database`].

pub mod analyses;
pub mod db;
pub mod error;
pub mod exam_sets;
pub mod exams;
pub mod patients;
pub mod results;
pub mod stacked_exams;
pub mod users;

mod rows;
