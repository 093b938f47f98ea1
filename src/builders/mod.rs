//! Builders to construct the rotation service from configuration.

pub mod service_builder;

pub use service_builder::build_service;
