//! Cocoa bean quality grading (ISO 2451 / ICCO / Codinorm cut-test rules)
//!
//! Grading is a cascade: a batch is tested against the Grade I limits first,
//! then against the Grade II limits, and is refused when both fail. Humidity
//! only annotates the result; it never changes the grade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Thresholds (percent of the cut-test sample)
// ============================================================================

pub const GRADE_I_MOULD_MAX: f64 = 3.0;
pub const GRADE_I_FLAT_MAX: f64 = 3.0;
pub const GRADE_I_GERMINATED_MAX: f64 = 3.0;
pub const GRADE_I_INSECT_DAMAGED_MAX: f64 = 3.0;
pub const GRADE_I_FOREIGN_MATTER_MAX: f64 = 0.75;
pub const GRADE_I_TOTAL_DEFECTS_MAX: f64 = 6.0;
/// Flat beans plus foreign matter. Only gates Grade I.
pub const GRADE_I_CRITICAL_DEFECTS_MAX: f64 = 5.75;

pub const GRADE_II_MOULD_MAX: f64 = 4.0;
pub const GRADE_II_FLAT_MAX: f64 = 8.0;
pub const GRADE_II_GERMINATED_MAX: f64 = 6.0;
pub const GRADE_II_INSECT_DAMAGED_MAX: f64 = 6.0;
pub const GRADE_II_FOREIGN_MATTER_MAX: f64 = 1.5;
pub const GRADE_II_TOTAL_DEFECTS_MAX: f64 = 12.0;

/// Humidity above this annotates the result with a warning
pub const HUMIDITY_WARNING_THRESHOLD: f64 = 7.5;

// ============================================================================
// Types
// ============================================================================

/// Quality grade of a cocoa batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QualityGrade {
    #[serde(rename = "Grade I")]
    GradeI,
    #[serde(rename = "Grade II")]
    GradeII,
    #[serde(rename = "Refused")]
    Refused,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::GradeI => "Grade I",
            QualityGrade::GradeII => "Grade II",
            QualityGrade::Refused => "Refused",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown quality grade: {0}")]
pub struct ParseGradeError(pub String);

impl FromStr for QualityGrade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Grade I" => Ok(QualityGrade::GradeI),
            "Grade II" => Ok(QualityGrade::GradeII),
            "Refused" => Ok(QualityGrade::Refused),
            other => Err(ParseGradeError(other.to_string())),
        }
    }
}

/// Cut-test measurements, all in percent.
///
/// Values are evaluated literally: nothing here clamps or rejects
/// out-of-range input, that is the job of the calling form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub mouldy_beans: f64,
    pub flat_beans: f64,
    /// Reported only. Not part of any sum or threshold.
    pub violet_beans: f64,
    pub germinated_beans: f64,
    pub insect_damaged_beans: f64,
    pub foreign_matter: f64,
    pub humidity: f64,
}

impl QualityAssessment {
    pub fn total_defects(&self) -> f64 {
        self.mouldy_beans
            + self.flat_beans
            + self.germinated_beans
            + self.insect_damaged_beans
            + self.foreign_matter
    }

    pub fn critical_defects(&self) -> f64 {
        self.flat_beans + self.foreign_matter
    }
}

/// Outcome of [`calculate_grade`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    pub grade: QualityGrade,
    pub failed_criteria: Vec<String>,
    pub warnings: Vec<String>,
    pub comments: String,
}

// ============================================================================
// Engine
// ============================================================================

struct Criterion {
    label: &'static str,
    value: f64,
    max: f64,
}

impl Criterion {
    fn new(label: &'static str, value: f64, max: f64) -> Self {
        Self { label, value, max }
    }

    // NaN never passes
    fn passes(&self) -> bool {
        self.value <= self.max
    }

    fn describe(&self) -> String {
        format!("{}: {}% > {}%", self.label, self.value, self.max)
    }
}

fn failures(criteria: &[Criterion]) -> Vec<String> {
    criteria
        .iter()
        .filter(|c| !c.passes())
        .map(Criterion::describe)
        .collect()
}

fn grade_i_criteria(a: &QualityAssessment) -> [Criterion; 7] {
    [
        Criterion::new("Fèves moisies", a.mouldy_beans, GRADE_I_MOULD_MAX),
        Criterion::new("Fèves plates", a.flat_beans, GRADE_I_FLAT_MAX),
        Criterion::new("Fèves germées", a.germinated_beans, GRADE_I_GERMINATED_MAX),
        Criterion::new("Fèves mitées", a.insect_damaged_beans, GRADE_I_INSECT_DAMAGED_MAX),
        Criterion::new("Matières étrangères", a.foreign_matter, GRADE_I_FOREIGN_MATTER_MAX),
        Criterion::new("Total des défauts", a.total_defects(), GRADE_I_TOTAL_DEFECTS_MAX),
        Criterion::new("Défauts critiques", a.critical_defects(), GRADE_I_CRITICAL_DEFECTS_MAX),
    ]
}

fn grade_ii_criteria(a: &QualityAssessment) -> [Criterion; 6] {
    [
        Criterion::new("Fèves moisies", a.mouldy_beans, GRADE_II_MOULD_MAX),
        Criterion::new("Fèves plates", a.flat_beans, GRADE_II_FLAT_MAX),
        Criterion::new("Fèves germées", a.germinated_beans, GRADE_II_GERMINATED_MAX),
        Criterion::new("Fèves mitées", a.insect_damaged_beans, GRADE_II_INSECT_DAMAGED_MAX),
        Criterion::new("Matières étrangères", a.foreign_matter, GRADE_II_FOREIGN_MATTER_MAX),
        Criterion::new("Total des défauts", a.total_defects(), GRADE_II_TOTAL_DEFECTS_MAX),
    ]
}

/// Grade a batch from its cut-test measurements.
///
/// When Grade II is reached, `failed_criteria` still lists the Grade I
/// failures so the intake form can show why the batch missed Grade I. A
/// refused batch lists its Grade II failures instead.
pub fn calculate_grade(assessment: &QualityAssessment) -> GradingResult {
    let grade_i_failures = failures(&grade_i_criteria(assessment));

    let (grade, failed_criteria) = if grade_i_failures.is_empty() {
        (QualityGrade::GradeI, Vec::new())
    } else {
        let grade_ii_failures = failures(&grade_ii_criteria(assessment));
        if grade_ii_failures.is_empty() {
            (QualityGrade::GradeII, grade_i_failures)
        } else {
            (QualityGrade::Refused, grade_ii_failures)
        }
    };

    let mut warnings = Vec::new();
    if assessment.humidity > HUMIDITY_WARNING_THRESHOLD {
        warnings.push(format!(
            "Humidité élevée: {}% (seuil {}%)",
            assessment.humidity, HUMIDITY_WARNING_THRESHOLD
        ));
    }

    let comments = compose_comments(grade, &failed_criteria, &warnings);

    GradingResult {
        grade,
        failed_criteria,
        warnings,
        comments,
    }
}

fn compose_comments(grade: QualityGrade, failed: &[String], warnings: &[String]) -> String {
    let mut comments = match grade {
        QualityGrade::GradeI => "Conforme Grade I".to_string(),
        QualityGrade::GradeII => "Conforme Grade II".to_string(),
        QualityGrade::Refused => format!("Refusé: {}", failed.join(", ")),
    };
    for warning in warnings {
        comments.push_str(". ");
        comments.push_str(warning);
    }
    comments
}

// ============================================================================
// Record capability
// ============================================================================

/// A record that carries cut-test measurements and stores a grading outcome.
///
/// Field collections and warehouse stock entries are graded the same way;
/// the engine only sees this capability.
pub trait QualityRecord {
    fn quality_assessment(&self) -> QualityAssessment;

    fn record_grading(&mut self, result: &GradingResult);
}

/// Grade a record and write the outcome back onto it
pub fn apply_grading<R: QualityRecord + ?Sized>(record: &mut R) -> GradingResult {
    let result = calculate_grade(&record.quality_assessment());
    record.record_grading(&result);
    result
}
