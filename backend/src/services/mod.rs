//! Business logic services for the Cocoa Cooperative Platform

pub mod grading;
pub mod routing;

pub use grading::GradingService;
pub use routing::RoutingService;
