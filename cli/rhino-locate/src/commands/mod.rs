//! CLI command implementations.

pub mod doctor;
pub mod paths;
pub mod platform;
pub mod variants;
