pub mod config;
pub mod error;
pub mod listings;
pub mod mortgage;
pub mod rent;
pub mod repository;
pub mod telemetry;
