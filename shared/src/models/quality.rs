//! Simplified quality tiers shown on collection and stock records

use serde::{Deserialize, Serialize};

use crate::grading::QualityGrade;

/// A/B/C tier used by lists, invoices and the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QualityTier {
    A,
    B,
    C,
}

impl From<QualityGrade> for QualityTier {
    fn from(grade: QualityGrade) -> Self {
        match grade {
            QualityGrade::GradeI => QualityTier::A,
            QualityGrade::GradeII => QualityTier::B,
            QualityGrade::Refused => QualityTier::C,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityTier::A => write!(f, "A"),
            QualityTier::B => write!(f, "B"),
            QualityTier::C => write!(f, "C"),
        }
    }
}
