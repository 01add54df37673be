//! Use cases (application services)

pub mod community;
pub mod generate;
