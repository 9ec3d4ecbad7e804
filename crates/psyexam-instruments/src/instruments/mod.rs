pub mod phq_9;
pub mod sds;
