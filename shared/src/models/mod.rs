//! Domain models for the Cocoa Cooperative Platform

mod collection;
mod producer;
mod quality;
mod route;
mod stock;

pub use collection::*;
pub use producer::*;
pub use quality::*;
pub use route::*;
pub use stock::*;
