use serde::{Deserialize, Serialize};

use crate::models::{ChildPughClass, RenalTier, Sex};

// ---------------------------------------------------------------------------
// Derived patient quantities
// ---------------------------------------------------------------------------

/// Body-size quantities derived from height and weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anthropometrics {
    /// Body surface area, m².
    pub bsa: f64,
    /// Ideal body weight, kg.
    pub ibw: f64,
    /// Adjusted body weight, kg.
    pub abw: f64,
}

/// CKD stage with its fixed description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CkdStage {
    pub stage: u8,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenalFunctionAssessment {
    /// Cockcroft-Gault, mL/min.
    pub creatinine_clearance: f64,
    /// CKD-EPI 2021, mL/min/1.73m².
    pub egfr: f64,
    pub ckd_stage: u8,
    pub ckd_description: String,
    pub renal_adjustment_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPughResult {
    pub child_pugh_score: u8,
    pub child_pugh_class: ChildPughClass,
    pub hepatic_adjustment_required: bool,
}

// ---------------------------------------------------------------------------
// Dose adjustment
// ---------------------------------------------------------------------------

/// Renal dose recommendation for one drug. Built fresh per lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseAdjustment {
    /// Drug name as the caller wrote it.
    pub drug: String,
    pub standard_dose: String,
    pub adjusted_dose: String,
    pub adjustment_reason: String,
    pub frequency: String,
    pub warnings: Vec<String>,
    pub monitoring_required: Vec<String>,
}

impl DoseAdjustment {
    pub fn is_contraindicated(&self) -> bool {
        self.adjusted_dose
            .trim()
            .eq_ignore_ascii_case(super::helpers::CONTRAINDICATED)
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Renal and anthropometric snapshot echoed at the top of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub sex: Sex,
    pub renal_function: RenalFunctionAssessment,
    pub anthropometrics: Anthropometrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingReport {
    pub patient_parameters: PatientSnapshot,
    /// Present only when hepatic findings were supplied.
    pub hepatic_function: Option<ChildPughResult>,
    pub renal_tier: RenalTier,
    pub dosing_recommendations: Vec<DoseAdjustment>,
    pub general_warnings: Vec<String>,
}
