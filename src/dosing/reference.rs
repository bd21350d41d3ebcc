use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::RenalTier;

use super::helpers::{drug_key, CONTRAINDICATED};

/// Dose and advisories for one renal tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDose {
    pub dose: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub monitoring: Vec<String>,
}

/// Renal dosing rule for one drug (loaded from renal_dosing.json or the
/// built-in reference set).
///
/// A tier left as `None` means the standard dose still applies at that tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenalDoseRule {
    pub drug: String,
    pub standard_dose: String,
    /// `false` for drugs cleared hepatically; tiers are ignored for them.
    #[serde(default = "default_renally_cleared")]
    pub renally_cleared: bool,
    /// Monitoring that applies at every tier.
    #[serde(default)]
    pub monitoring: Vec<String>,
    #[serde(default)]
    pub moderate: Option<TierDose>,
    #[serde(default)]
    pub severe: Option<TierDose>,
    #[serde(default)]
    pub dialysis: Option<TierDose>,
}

fn default_renally_cleared() -> bool {
    true
}

impl RenalDoseRule {
    pub fn tier(&self, tier: RenalTier) -> Option<&TierDose> {
        if !self.renally_cleared {
            return None;
        }
        match tier {
            RenalTier::Normal => None,
            RenalTier::Moderate => self.moderate.as_ref(),
            RenalTier::Severe => self.severe.as_ref(),
            RenalTier::Dialysis => self.dialysis.as_ref(),
        }
    }
}

/// Immutable renal dosing table, keyed case-insensitively by drug name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DosingRules {
    rules: Vec<RenalDoseRule>,
}

static REFERENCE_DOSING_RULES: LazyLock<DosingRules> =
    LazyLock::new(|| DosingRules::new(reference_rules()));

impl DosingRules {
    pub fn new(rules: Vec<RenalDoseRule>) -> Self {
        Self { rules }
    }

    /// Built-in reference table, constructed once per process.
    pub fn reference() -> &'static DosingRules {
        &REFERENCE_DOSING_RULES
    }

    /// Look up the rule for a drug name (case-insensitive, trimmed).
    pub fn find(&self, drug: &str) -> Option<&RenalDoseRule> {
        let key = drug_key(drug);
        self.rules.iter().find(|r| drug_key(&r.drug) == key)
    }

    pub fn rules(&self) -> &[RenalDoseRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for DosingRules {
    fn default() -> Self {
        Self::reference().clone()
    }
}

fn tier(dose: &str, warnings: &[&str], monitoring: &[&str]) -> Option<TierDose> {
    Some(TierDose {
        dose: dose.into(),
        warnings: warnings.iter().map(|w| w.to_string()).collect(),
        monitoring: monitoring.iter().map(|m| m.to_string()).collect(),
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn reference_rules() -> Vec<RenalDoseRule> {
    vec![
        RenalDoseRule {
            drug: "metformin".into(),
            standard_dose: "500-1000 mg BID".into(),
            renally_cleared: true,
            monitoring: strings(&["Renal function every 3-6 months"]),
            moderate: tier(
                "500 mg BID (max 1000 mg/day)",
                &[
                    "Do not initiate when eGFR is 30-45; reassess benefit if already on therapy",
                    "Hold before iodinated contrast procedures",
                ],
                &["Vitamin B12 level annually"],
            ),
            severe: tier(
                CONTRAINDICATED,
                &[
                    "Contraindicated: eGFR below 30 carries a risk of lactic acidosis",
                    "Switch to an agent that does not require renal clearance",
                ],
                &[],
            ),
            dialysis: tier(
                CONTRAINDICATED,
                &[
                    "Contraindicated in dialysis: risk of lactic acidosis",
                    "Switch to an agent that does not require renal clearance",
                ],
                &[],
            ),
        },
        RenalDoseRule {
            drug: "gabapentin".into(),
            standard_dose: "300-1200 mg TID".into(),
            renally_cleared: true,
            monitoring: strings(&["Sedation and dizziness"]),
            moderate: tier(
                "200-700 mg BID",
                &["Accumulates with reduced clearance; titrate slowly"],
                &[],
            ),
            severe: tier(
                "100-300 mg daily",
                &["High risk of toxicity (somnolence, ataxia) at this level of renal function"],
                &["Mental status"],
            ),
            dialysis: tier(
                "125-350 mg post-dialysis",
                &["Give a supplemental dose after each dialysis session"],
                &["Mental status"],
            ),
        },
        RenalDoseRule {
            drug: "lisinopril".into(),
            standard_dose: "10-40 mg daily".into(),
            renally_cleared: true,
            monitoring: strings(&["Blood pressure", "Serum potassium"]),
            moderate: tier(
                "5-10 mg daily",
                &["Start low; titrate to blood pressure response"],
                &["Serum creatinine within 1-2 weeks of starting"],
            ),
            severe: tier(
                "2.5-5 mg daily",
                &["Risk of hyperkalemia and further decline in renal function"],
                &["Serum creatinine within 1-2 weeks of starting"],
            ),
            dialysis: tier(
                "2.5 mg daily",
                &["Dialyzable: give after dialysis on dialysis days"],
                &["Pre-dialysis blood pressure"],
            ),
        },
        RenalDoseRule {
            drug: "ciprofloxacin".into(),
            standard_dose: "500-750 mg q12h".into(),
            renally_cleared: true,
            monitoring: strings(&["Tendon pain", "QT interval if other QT-prolonging drugs"]),
            moderate: tier(
                "250-500 mg q12h",
                &["Reduced clearance raises CNS and tendon toxicity risk"],
                &[],
            ),
            severe: tier(
                "250-500 mg q18h",
                &["Reduced clearance raises CNS and tendon toxicity risk"],
                &[],
            ),
            dialysis: tier(
                "250-500 mg q24h (after dialysis)",
                &["Administer after dialysis on dialysis days"],
                &[],
            ),
        },
        RenalDoseRule {
            drug: "enoxaparin".into(),
            standard_dose: "1 mg/kg SC q12h".into(),
            renally_cleared: true,
            monitoring: strings(&["Platelet count", "Signs of bleeding"]),
            moderate: tier(
                "1 mg/kg SC q12h",
                &["Accumulation possible; monitor closely"],
                &["Anti-Xa levels if prolonged therapy"],
            ),
            severe: tier(
                "1 mg/kg SC once daily",
                &["Increased bleeding risk with CrCl below 30"],
                &["Anti-Xa levels"],
            ),
            dialysis: tier(
                "USE UNFRACTIONATED HEPARIN",
                &["Enoxaparin is not recommended in end-stage renal disease"],
                &["aPTT"],
            ),
        },
        RenalDoseRule {
            drug: "sildenafil".into(),
            standard_dose: "50 mg PRN".into(),
            renally_cleared: true,
            monitoring: strings(&["Blood pressure"]),
            moderate: None,
            severe: tier(
                "25 mg PRN",
                &["Start at the lowest dose; exposure roughly doubles"],
                &[],
            ),
            dialysis: tier(
                "25 mg PRN",
                &["Start at the lowest dose; exposure roughly doubles"],
                &[],
            ),
        },
        RenalDoseRule {
            drug: "amoxicillin".into(),
            standard_dose: "500 mg TID".into(),
            renally_cleared: true,
            monitoring: Vec::new(),
            moderate: None,
            severe: tier(
                "250-500 mg BID",
                &["Avoid the 875 mg formulation when CrCl is below 30"],
                &[],
            ),
            dialysis: tier(
                "250-500 mg daily (dose after dialysis)",
                &["Amoxicillin is removed by hemodialysis"],
                &[],
            ),
        },
        RenalDoseRule {
            drug: "atorvastatin".into(),
            standard_dose: "10-80 mg daily".into(),
            renally_cleared: false,
            monitoring: strings(&["Lipid panel", "Liver enzymes if symptomatic"]),
            moderate: None,
            severe: None,
            dialysis: None,
        },
    ]
}
