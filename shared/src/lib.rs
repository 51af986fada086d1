//! Shared types and models for the Cocoa Cooperative Platform
//!
//! This crate holds the pure computation core (quality grading and route
//! estimation) shared between the backend, the browser (via WASM), and other
//! components of the system. Nothing here performs I/O.

pub mod grading;
pub mod models;
pub mod routing;
pub mod types;
pub mod validation;

pub use grading::*;
pub use models::*;
pub use routing::*;
pub use types::*;
pub use validation::*;
