//! Cocoa quality grading service
//!
//! Wraps the grading engine with the input checks the intake and stock
//! forms rely on. The engine itself accepts any numbers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    apply_grading, calculate_grade, is_humidity_acceptable, validate_quality_assessment,
    Collection, GradingResult, QualityAssessment, QualityRecord, QualityTier, StockEntry,
};

/// Grading service for cut-test assessments
#[derive(Clone, Default)]
pub struct GradingService;

/// Input for grading a cut-test
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssessQualityInput {
    #[validate(range(min = 0.0, max = 100.0))]
    pub mouldy_beans: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub flat_beans: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub violet_beans: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub germinated_beans: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub insect_damaged_beans: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub foreign_matter: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
}

impl From<AssessQualityInput> for QualityAssessment {
    fn from(input: AssessQualityInput) -> Self {
        QualityAssessment {
            mouldy_beans: input.mouldy_beans,
            flat_beans: input.flat_beans,
            violet_beans: input.violet_beans,
            germinated_beans: input.germinated_beans,
            insect_damaged_beans: input.insect_damaged_beans,
            foreign_matter: input.foreign_matter,
            humidity: input.humidity,
        }
    }
}

/// Grading outcome with the tier shown on lists and invoices
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    #[serde(flatten)]
    pub result: GradingResult,
    pub quality_tier: QualityTier,
    pub humidity_acceptable: bool,
}

impl GradingService {
    /// Create a new GradingService instance
    pub fn new() -> Self {
        Self
    }

    /// Grade a cut-test
    pub fn assess(&self, input: AssessQualityInput) -> AppResult<GradingReport> {
        input.validate()?;

        let assessment = QualityAssessment::from(input);
        let result = calculate_grade(&assessment);

        tracing::info!(
            grade = %result.grade,
            failed = result.failed_criteria.len(),
            warnings = result.warnings.len(),
            "Cut-test graded"
        );

        Ok(GradingReport {
            quality_tier: result.grade.into(),
            humidity_acceptable: is_humidity_acceptable(assessment.humidity),
            result,
        })
    }

    /// Grade a field collection at intake and return it with its grade set
    pub fn grade_collection(&self, mut collection: Collection) -> AppResult<Collection> {
        let id = collection.id.clone();
        self.grade_record(&id, &mut collection)?;
        Ok(collection)
    }

    /// Re-assess a warehouse stock lot and return it with its grade set
    pub fn reassess_stock(&self, mut stock: StockEntry) -> AppResult<StockEntry> {
        let id = stock.id.clone();
        self.grade_record(&id, &mut stock)?;
        Ok(stock)
    }

    fn grade_record<R: QualityRecord>(&self, record_id: &str, record: &mut R) -> AppResult<GradingResult> {
        validate_quality_assessment(&record.quality_assessment()).map_err(|e| {
            AppError::invalid_field("qualityAssessment", e, "Mesures de qualité invalides")
        })?;

        let result = apply_grading(record);
        tracing::info!(record_id, grade = %result.grade, "Record graded");
        Ok(result)
    }
}
