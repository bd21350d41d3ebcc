use crate::models::ChildPughClass;

/// Fixed wording for dose reasons and report-level advisories.
pub struct WarningTemplates;

impl WarningTemplates {
    pub fn reason_normal() -> String {
        "No renal dose adjustment required".to_string()
    }

    pub fn reason_hepatic_clearance() -> String {
        "Primarily hepatic clearance; no renal dose adjustment required".to_string()
    }

    pub fn reason_moderate(crcl: f64, egfr: f64) -> String {
        format!(
            "Moderate renal impairment (CrCl {:.1} mL/min, eGFR {:.1} mL/min/1.73m²)",
            crcl, egfr
        )
    }

    pub fn reason_severe(crcl: f64) -> String {
        format!("Severe renal impairment (CrCl {:.1} mL/min)", crcl)
    }

    pub fn reason_dialysis() -> String {
        "Patient on dialysis".to_string()
    }

    /// Renal impairment present but the drug keeps its standard dose.
    pub fn reason_unchanged(tier_reason: &str) -> String {
        format!("{}; standard dose remains appropriate", tier_reason)
    }

    pub fn geriatric() -> String {
        "Geriatric patient (65+): start low, go slow; review for Beers Criteria medications"
            .to_string()
    }

    pub fn very_elderly() -> String {
        "Very elderly patient (80+): heightened sensitivity to CNS-active and anticoagulant drugs"
            .to_string()
    }

    pub fn obesity(abw: f64) -> String {
        format!(
            "Obesity (weight > 130% of IBW): use adjusted body weight ({:.1} kg) for weight-based dosing",
            abw
        )
    }

    pub fn underweight() -> String {
        "Underweight (weight < 80% of IBW): consider lower doses".to_string()
    }

    pub fn avoid_nephrotoxins() -> String {
        "Advanced CKD: avoid nephrotoxic agents (NSAIDs, aminoglycosides, IV contrast)".to_string()
    }

    pub fn nephrology_referral() -> String {
        "Advanced CKD: nephrology referral recommended".to_string()
    }

    pub fn hepatic_impairment(class: ChildPughClass) -> String {
        format!(
            "Hepatic impairment (Child-Pugh class {}): review doses of hepatically cleared drugs",
            class
        )
    }

    pub fn avoid_hepatotoxins() -> String {
        "Severe hepatic impairment: avoid hepatotoxic agents where possible".to_string()
    }
}
