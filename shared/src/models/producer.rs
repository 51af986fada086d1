//! Producer and cooperative models

use serde::{Deserialize, Serialize};

use crate::types::{GeoPoint, Located};

/// A cocoa producer registered with the cooperative
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Producer {
    pub id: String,
    pub name: String,
    /// Plantation coordinates, when the field agent has recorded them
    pub location: Option<GeoPoint>,
}

impl Producer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

impl Located for Producer {
    fn location(&self) -> Option<GeoPoint> {
        self.location
    }
}

/// The cooperative headquarters, start and end point of most routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cooperative {
    pub name: String,
    pub location: GeoPoint,
}

impl Located for Cooperative {
    fn location(&self) -> Option<GeoPoint> {
        Some(self.location)
    }
}

/// Find a producer by id
pub fn find_producer<'a>(producers: &'a [Producer], id: &str) -> Option<&'a Producer> {
    producers.iter().find(|p| p.id == id)
}
