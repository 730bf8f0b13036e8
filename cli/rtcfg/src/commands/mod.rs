//! CLI command implementations.

pub mod dist;
pub mod doctor;
pub mod show;
