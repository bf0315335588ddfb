//! VisionLens - see images through simulated vision conditions
//!
//! HTTP and CLI front end for the `vision_sim` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
