//! Scene layering service.
//!
//! Splits a scene description into layers and renders each layer through an
//! external generative model, keying object layers onto a solid color.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
