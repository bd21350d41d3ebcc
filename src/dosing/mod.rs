//! Renal and hepatic dose adjustment.
//!
//! Patient-derived quantities (BSA, IBW, ABW, CrCl, eGFR, CKD stage,
//! Child-Pugh), per-drug renal dose lookup against an injected rule table,
//! and the dosing report that ties them together.

pub mod adjustment;
pub mod anthropometrics;
pub mod calculators;
pub mod engine;
pub mod helpers;
pub mod hepatic;
pub mod messages;
pub mod reference;
pub mod renal;
pub mod types;

pub use adjustment::get_renal_adjusted_dose;
pub use anthropometrics::{abw, anthropometrics, bsa, ibw};
pub use calculators::{dose_by_bsa, dose_by_weight};
pub use engine::DosingEngine;
pub use hepatic::{child_pugh, child_pugh_class};
pub use reference::{DosingRules, RenalDoseRule, TierDose};
pub use renal::{assess_renal_function, ckd_stage, creatinine_clearance, egfr, select_renal_tier};
pub use types::{
    Anthropometrics, ChildPughResult, CkdStage, DoseAdjustment, DosingReport, PatientSnapshot,
    RenalFunctionAssessment,
};
