//! HTTP handlers for the layer service.

pub mod decompose;
pub mod generate;
pub mod health;
pub mod index;
pub mod metrics;
