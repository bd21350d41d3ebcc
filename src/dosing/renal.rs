use crate::models::{PatientParameters, RenalTier, Sex};

use super::helpers::round_to;
use super::types::{CkdStage, RenalFunctionAssessment};

/// CrCl below this (mL/min) triggers renal dose adjustment.
pub const CRCL_ADJUSTMENT_THRESHOLD: f64 = 50.0;
/// eGFR below this (mL/min/1.73m²) triggers renal dose adjustment.
pub const EGFR_ADJUSTMENT_THRESHOLD: f64 = 60.0;
/// CrCl below this (mL/min) selects the severe dosing tier.
pub const CRCL_SEVERE_THRESHOLD: f64 = 30.0;

const COCKCROFT_GAULT_FEMALE_FACTOR: f64 = 0.85;

/// Descending eGFR lower bounds, inclusive. Anything below the last band is stage 5.
const CKD_STAGES: &[(f64, u8, &str)] = &[
    (90.0, 1, "Normal or high kidney function"),
    (60.0, 2, "Mild decrease in kidney function"),
    (30.0, 3, "Moderate decrease in kidney function"),
    (15.0, 4, "Severe decrease in kidney function"),
];
const CKD_STAGE_5: CkdStage = CkdStage {
    stage: 5,
    description: "Kidney failure (ESRD)",
};

/// Creatinine clearance (Cockcroft-Gault), mL/min, 1 decimal.
pub fn creatinine_clearance(p: &PatientParameters) -> f64 {
    let scr = p.effective_serum_creatinine();
    let mut crcl = ((140.0 - p.age) * p.weight) / (72.0 * scr);
    if p.sex == Sex::Female {
        crcl *= COCKCROFT_GAULT_FEMALE_FACTOR;
    }
    round_to(crcl, 1)
}

/// eGFR (CKD-EPI 2021, race-free creatinine equation), 1 decimal.
///
/// Female constants apply to `Sex::Female` only.
pub fn egfr(p: &PatientParameters) -> f64 {
    let scr = p.effective_serum_creatinine();
    let female = p.sex == Sex::Female;
    let (kappa, alpha) = if female { (0.7, -0.241) } else { (0.9, -0.302) };

    let ratio = scr / kappa;
    let mut gfr = 142.0
        * ratio.min(1.0).powf(alpha)
        * ratio.max(1.0).powf(-1.200)
        * 0.9938_f64.powf(p.age);
    if female {
        gfr *= 1.012;
    }
    round_to(gfr, 1)
}

/// CKD stage for an eGFR value.
pub fn ckd_stage(egfr: f64) -> CkdStage {
    CKD_STAGES
        .iter()
        .find(|(lower, _, _)| egfr >= *lower)
        .map(|&(_, stage, description)| CkdStage { stage, description })
        .unwrap_or(CKD_STAGE_5)
}

pub fn assess_renal_function(p: &PatientParameters) -> RenalFunctionAssessment {
    let creatinine_clearance = creatinine_clearance(p);
    let egfr = egfr(p);
    let stage = ckd_stage(egfr);

    RenalFunctionAssessment {
        creatinine_clearance,
        egfr,
        ckd_stage: stage.stage,
        ckd_description: stage.description.to_string(),
        renal_adjustment_required: creatinine_clearance < CRCL_ADJUSTMENT_THRESHOLD
            || egfr < EGFR_ADJUSTMENT_THRESHOLD,
    }
}

/// Select the dosing tier. Dialysis overrides every CrCl-based tier.
pub fn select_renal_tier(renal: &RenalFunctionAssessment, on_dialysis: bool) -> RenalTier {
    if on_dialysis {
        RenalTier::Dialysis
    } else if !renal.renal_adjustment_required {
        RenalTier::Normal
    } else if renal.creatinine_clearance < CRCL_SEVERE_THRESHOLD {
        RenalTier::Severe
    } else {
        RenalTier::Moderate
    }
}
