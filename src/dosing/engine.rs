use crate::models::{ChildPughClass, ChildPughInput, PatientParameters};

use super::adjustment::get_renal_adjusted_dose;
use super::anthropometrics::anthropometrics;
use super::hepatic::child_pugh;
use super::messages::WarningTemplates;
use super::reference::DosingRules;
use super::renal::{assess_renal_function, select_renal_tier};
use super::types::{
    Anthropometrics, ChildPughResult, DoseAdjustment, DosingReport, PatientSnapshot,
    RenalFunctionAssessment,
};

const GERIATRIC_AGE: f64 = 65.0;
const VERY_ELDERLY_AGE: f64 = 80.0;
const OBESE_IBW_RATIO: f64 = 1.3;
const UNDERWEIGHT_IBW_RATIO: f64 = 0.8;
const ADVANCED_CKD_STAGE: u8 = 4;

/// Dosing engine over an injected renal dosing table.
#[derive(Debug, Clone, Default)]
pub struct DosingEngine {
    rules: DosingRules,
}

impl DosingEngine {
    pub fn new(rules: DosingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DosingRules {
        &self.rules
    }

    /// Renal-adjusted dose for one drug; `None` for drugs without a rule.
    pub fn renal_adjusted_dose(
        &self,
        drug: &str,
        renal: &RenalFunctionAssessment,
        on_dialysis: bool,
    ) -> Option<DoseAdjustment> {
        get_renal_adjusted_dose(&self.rules, drug, renal, on_dialysis)
    }

    /// Build the dosing report for a patient and a proposed drug list.
    ///
    /// Renal function and anthropometrics are computed once. Drugs without a
    /// rule are dropped from the recommendations.
    pub fn generate_report<S: AsRef<str>>(
        &self,
        patient: &PatientParameters,
        drugs: &[S],
        on_dialysis: bool,
        hepatic: Option<&ChildPughInput>,
    ) -> DosingReport {
        let renal = assess_renal_function(patient);
        let body = anthropometrics(patient);
        let hepatic_function = hepatic.map(child_pugh);
        let renal_tier = select_renal_tier(&renal, on_dialysis);

        let dosing_recommendations: Vec<DoseAdjustment> = drugs
            .iter()
            .filter_map(|d| self.renal_adjusted_dose(d.as_ref(), &renal, on_dialysis))
            .collect();

        let general_warnings =
            general_warnings(patient, &renal, &body, hepatic_function.as_ref());

        tracing::info!(
            drugs = drugs.len(),
            recommendations = dosing_recommendations.len(),
            skipped = drugs.len() - dosing_recommendations.len(),
            ckd_stage = renal.ckd_stage,
            tier = renal_tier.as_str(),
            warnings = general_warnings.len(),
            "Dosing report generated"
        );

        DosingReport {
            patient_parameters: PatientSnapshot {
                age: patient.age,
                weight: patient.weight,
                height: patient.height,
                sex: patient.sex,
                renal_function: renal,
                anthropometrics: body,
            },
            hepatic_function,
            renal_tier,
            dosing_recommendations,
            general_warnings,
        }
    }
}

/// Report-level advisories: age, then weight, then renal, then hepatic.
fn general_warnings(
    patient: &PatientParameters,
    renal: &RenalFunctionAssessment,
    body: &Anthropometrics,
    hepatic: Option<&ChildPughResult>,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if patient.age >= GERIATRIC_AGE {
        warnings.push(WarningTemplates::geriatric());
    }
    if patient.age >= VERY_ELDERLY_AGE {
        warnings.push(WarningTemplates::very_elderly());
    }

    if patient.weight > OBESE_IBW_RATIO * body.ibw {
        warnings.push(WarningTemplates::obesity(body.abw));
    }
    if patient.weight < UNDERWEIGHT_IBW_RATIO * body.ibw {
        warnings.push(WarningTemplates::underweight());
    }

    if renal.ckd_stage >= ADVANCED_CKD_STAGE {
        warnings.push(WarningTemplates::avoid_nephrotoxins());
        warnings.push(WarningTemplates::nephrology_referral());
    }

    if let Some(result) = hepatic.filter(|h| h.hepatic_adjustment_required) {
        warnings.push(WarningTemplates::hepatic_impairment(result.child_pugh_class));
        if result.child_pugh_class == ChildPughClass::C {
            warnings.push(WarningTemplates::avoid_hepatotoxins());
        }
    }

    warnings
}
