pub mod auth;
pub mod doctor;
pub mod exam_sets;
pub mod exams;
pub mod health;
pub mod kiosk;
pub mod patients;
pub mod users;
