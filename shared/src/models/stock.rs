//! Warehouse stock models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grading::{GradingResult, QualityAssessment, QualityGrade, QualityRecord};
use crate::models::QualityTier;

/// A stock lot held in a warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub id: String,
    pub warehouse: String,
    pub quantity_kg: Decimal,
    pub quality_assessment: QualityAssessment,
    pub grade: Option<QualityGrade>,
    pub quality_tier: Option<QualityTier>,
    #[serde(default)]
    pub failed_criteria: Vec<String>,
    /// Free-text notes, overwritten by each re-assessment
    pub notes: Option<String>,
}

impl StockEntry {
    /// Refused lots are held back from sale until re-sorted
    pub fn is_refused(&self) -> bool {
        self.grade == Some(QualityGrade::Refused)
    }
}

impl QualityRecord for StockEntry {
    fn quality_assessment(&self) -> QualityAssessment {
        self.quality_assessment
    }

    fn record_grading(&mut self, result: &GradingResult) {
        self.grade = Some(result.grade);
        self.quality_tier = Some(result.grade.into());
        self.failed_criteria = result.failed_criteria.clone();
        self.notes = Some(result.comments.clone());
    }
}
