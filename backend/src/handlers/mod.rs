//! HTTP handlers for the Cocoa Cooperative Platform

pub mod grading;
pub mod health;
pub mod routing;

pub use grading::*;
pub use health::*;
pub use routing::*;
