//! CLI command implementations.

pub mod common;
pub mod gates;
pub mod sample;
pub mod submit_job;
pub mod version;
