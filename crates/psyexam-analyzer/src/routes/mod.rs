pub mod analysis;
pub mod analyzers;
pub mod health;
