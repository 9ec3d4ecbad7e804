pub mod analysis;
pub mod exam;
pub mod exam_set;
pub mod patient;
pub mod result;
pub mod stacked_exam;
pub mod user;
