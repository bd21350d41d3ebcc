use crate::models::RenalTier;

use super::helpers::derive_frequency;
use super::messages::WarningTemplates;
use super::reference::DosingRules;
use super::renal::select_renal_tier;
use super::types::{DoseAdjustment, RenalFunctionAssessment};

fn tier_reason(tier: RenalTier, renal: &RenalFunctionAssessment) -> String {
    match tier {
        RenalTier::Normal => WarningTemplates::reason_normal(),
        RenalTier::Moderate => {
            WarningTemplates::reason_moderate(renal.creatinine_clearance, renal.egfr)
        }
        RenalTier::Severe => WarningTemplates::reason_severe(renal.creatinine_clearance),
        RenalTier::Dialysis => WarningTemplates::reason_dialysis(),
    }
}

/// Renal-adjusted dose for one drug.
///
/// Returns `None` when the drug has no rule. That is a lookup miss, not a failure:
/// callers skip the drug rather than report an error.
pub fn get_renal_adjusted_dose(
    rules: &DosingRules,
    drug: &str,
    renal: &RenalFunctionAssessment,
    on_dialysis: bool,
) -> Option<DoseAdjustment> {
    let rule = rules.find(drug)?;
    let tier = select_renal_tier(renal, on_dialysis);

    let (adjusted_dose, adjustment_reason, warnings, tier_monitoring) = if !rule.renally_cleared
    {
        (
            rule.standard_dose.clone(),
            WarningTemplates::reason_hepatic_clearance(),
            Vec::new(),
            Vec::new(),
        )
    } else {
        match rule.tier(tier) {
            Some(dose) => (
                dose.dose.clone(),
                tier_reason(tier, renal),
                dose.warnings.clone(),
                dose.monitoring.clone(),
            ),
            None if tier == RenalTier::Normal => (
                rule.standard_dose.clone(),
                tier_reason(tier, renal),
                Vec::new(),
                Vec::new(),
            ),
            None => (
                rule.standard_dose.clone(),
                WarningTemplates::reason_unchanged(&tier_reason(tier, renal)),
                Vec::new(),
                Vec::new(),
            ),
        }
    };

    let mut monitoring_required = rule.monitoring.clone();
    for item in tier_monitoring {
        if !monitoring_required.contains(&item) {
            monitoring_required.push(item);
        }
    }

    tracing::debug!(
        drug = %rule.drug,
        tier = tier.as_str(),
        adjusted = adjusted_dose != rule.standard_dose,
        "Renal dose lookup"
    );

    Some(DoseAdjustment {
        drug: drug.to_string(),
        standard_dose: rule.standard_dose.clone(),
        frequency: derive_frequency(&adjusted_dose),
        adjusted_dose,
        adjustment_reason,
        warnings,
        monitoring_required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosing::reference::{RenalDoseRule, TierDose};
    use crate::dosing::renal::assess_renal_function;
    use crate::models::{PatientParameters, Sex};

    fn normal_renal() -> RenalFunctionAssessment {
        assess_renal_function(
            &PatientParameters::new(50.0, 80.0, 175.0, Sex::Male).with_serum_creatinine(1.0),
        )
    }

    fn severe_renal() -> RenalFunctionAssessment {
        assess_renal_function(
            &PatientParameters::new(68.0, 72.0, 170.0, Sex::Male).with_serum_creatinine(4.5),
        )
    }

    fn moderate_renal() -> RenalFunctionAssessment {
        // CrCl 38.2
        assess_renal_function(
            &PatientParameters::new(85.0, 50.0, 160.0, Sex::Male).with_serum_creatinine(1.0),
        )
    }

    fn lookup(drug: &str, renal: &RenalFunctionAssessment, dialysis: bool) -> DoseAdjustment {
        get_renal_adjusted_dose(DosingRules::reference(), drug, renal, dialysis).unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let renal = normal_renal();
        let upper = lookup("Metformin", &renal, false);
        let lower = lookup("metformin", &renal, false);
        assert_eq!(upper.adjusted_dose, lower.adjusted_dose);
        assert_eq!(upper.warnings, lower.warnings);
        assert_eq!(upper.monitoring_required, lower.monitoring_required);
        // Caller's casing is echoed
        assert_eq!(upper.drug, "Metformin");
        assert_eq!(lower.drug, "metformin");
    }

    #[test]
    fn normal_renal_keeps_standard_dose() {
        let adj = lookup("metformin", &normal_renal(), false);
        assert_eq!(adj.adjusted_dose, adj.standard_dose);
        assert_eq!(adj.frequency, "Twice daily");
        assert!(adj.warnings.is_empty());
    }

    #[test]
    fn metformin_contraindicated_in_severe_impairment() {
        let renal = severe_renal();
        assert_eq!(renal.creatinine_clearance, 16.0);
        let adj = lookup("metformin", &renal, false);
        assert_eq!(adj.adjusted_dose, "CONTRAINDICATED");
        assert!(!adj.warnings.is_empty());
        assert!(adj.warnings[0].starts_with("Contraindicated"));
        assert!(adj.is_contraindicated());
        assert_eq!(adj.frequency, "Not applicable");
    }

    #[test]
    fn metformin_contraindicated_on_dialysis() {
        let adj = lookup("metformin", &normal_renal(), true);
        assert_eq!(adj.adjusted_dose, "CONTRAINDICATED");
        assert!(adj.warnings[0].contains("Contraindicated"));
    }

    #[test]
    fn enoxaparin_switches_to_heparin_on_dialysis() {
        let adj = lookup("enoxaparin", &severe_renal(), true);
        assert_eq!(adj.adjusted_dose, "USE UNFRACTIONATED HEPARIN");
        // Severe but not on dialysis keeps enoxaparin at reduced frequency
        let adj = lookup("enoxaparin", &severe_renal(), false);
        assert_eq!(adj.adjusted_dose, "1 mg/kg SC once daily");
        assert_eq!(adj.frequency, "Once daily");
    }

    #[test]
    fn kidney_failure_without_dialysis_stays_on_severe_tier() {
        let renal = severe_renal();
        assert_eq!(renal.ckd_stage, 5);
        assert_eq!(select_renal_tier(&renal, false), RenalTier::Severe);
        let adj = lookup("enoxaparin", &renal, false);
        assert_eq!(adj.adjusted_dose, "1 mg/kg SC once daily");
        assert!(!adj.is_contraindicated());
    }

    #[test]
    fn gabapentin_post_dialysis_dose() {
        let adj = lookup("gabapentin", &severe_renal(), true);
        assert_eq!(adj.adjusted_dose, "125-350 mg post-dialysis");
        assert_eq!(adj.frequency, "After each dialysis session");
        assert_eq!(adj.adjustment_reason, "Patient on dialysis");
    }

    #[test]
    fn atorvastatin_unchanged_at_every_tier() {
        for (renal, dialysis) in [
            (normal_renal(), false),
            (moderate_renal(), false),
            (severe_renal(), false),
            (severe_renal(), true),
        ] {
            let adj = lookup("atorvastatin", &renal, dialysis);
            assert_eq!(adj.adjusted_dose, adj.standard_dose);
            assert!(adj.adjustment_reason.contains("hepatic"));
        }
    }

    #[test]
    fn moderate_tier_reason_and_monitoring() {
        let adj = lookup("lisinopril", &moderate_renal(), false);
        assert_eq!(adj.adjusted_dose, "5-10 mg daily");
        assert!(adj.adjustment_reason.starts_with("Moderate renal impairment (CrCl 38.2"));
        assert_eq!(
            adj.monitoring_required,
            vec![
                "Blood pressure".to_string(),
                "Serum potassium".to_string(),
                "Serum creatinine within 1-2 weeks of starting".to_string(),
            ]
        );
    }

    #[test]
    fn missing_tier_keeps_standard_dose_with_reason() {
        let adj = lookup("amoxicillin", &moderate_renal(), false);
        assert_eq!(adj.adjusted_dose, "500 mg TID");
        assert!(adj.adjustment_reason.ends_with("standard dose remains appropriate"));
    }

    #[test]
    fn ciprofloxacin_interval_extension() {
        let adj = lookup("ciprofloxacin", &severe_renal(), false);
        assert_eq!(adj.frequency, "Every 18 hours");
    }

    #[test]
    fn unknown_drug_is_a_miss() {
        let result =
            get_renal_adjusted_dose(DosingRules::reference(), "warfarin", &normal_renal(), false);
        assert!(result.is_none());
    }

    #[test]
    fn substituted_rule_set() {
        let rules = DosingRules::new(vec![RenalDoseRule {
            drug: "vancomycin".into(),
            standard_dose: "15 mg/kg q12h".into(),
            renally_cleared: true,
            monitoring: vec!["Trough levels".into()],
            moderate: None,
            severe: Some(TierDose {
                dose: "15 mg/kg q24h".into(),
                warnings: vec!["Nephrotoxic".into()],
                monitoring: vec!["Trough levels".into()],
            }),
            dialysis: None,
        }]);

        let adj = get_renal_adjusted_dose(&rules, "Vancomycin", &severe_renal(), false).unwrap();
        assert_eq!(adj.adjusted_dose, "15 mg/kg q24h");
        assert_eq!(adj.frequency, "Every 24 hours");
        // Shared monitoring items are not repeated
        assert_eq!(adj.monitoring_required, vec!["Trough levels".to_string()]);
        assert!(get_renal_adjusted_dose(&rules, "metformin", &severe_renal(), false).is_none());
    }
}
