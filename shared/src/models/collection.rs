//! Field collection models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grading::{GradingResult, QualityAssessment, QualityGrade, QualityRecord};
use crate::models::QualityTier;

/// Beans collected from a producer, with the cut-test done at intake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub producer_id: String,
    pub route_id: Option<String>,
    pub collection_date: NaiveDate,
    pub weight_kg: Decimal,
    pub mouldy_beans: f64,
    pub flat_beans: f64,
    pub violet_beans: f64,
    pub germinated_beans: f64,
    pub insect_damaged_beans: f64,
    pub foreign_matter: f64,
    pub humidity: f64,
    pub grade: Option<QualityGrade>,
    pub quality_tier: Option<QualityTier>,
    #[serde(default)]
    pub failed_criteria: Vec<String>,
    pub comments: Option<String>,
}

impl QualityRecord for Collection {
    fn quality_assessment(&self) -> QualityAssessment {
        QualityAssessment {
            mouldy_beans: self.mouldy_beans,
            flat_beans: self.flat_beans,
            violet_beans: self.violet_beans,
            germinated_beans: self.germinated_beans,
            insect_damaged_beans: self.insect_damaged_beans,
            foreign_matter: self.foreign_matter,
            humidity: self.humidity,
        }
    }

    fn record_grading(&mut self, result: &GradingResult) {
        self.grade = Some(result.grade);
        self.quality_tier = Some(result.grade.into());
        self.failed_criteria = result.failed_criteria.clone();
        self.comments = Some(result.comments.clone());
    }
}
