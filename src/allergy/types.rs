use serde::{Deserialize, Serialize};

use crate::models::{AllergyAlertType, AllergySeverity};

/// One allergy safety alert. Identity for deduplication is
/// (allergen, drug, alert_type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergyAlert {
    pub allergen: String,
    /// Proposed drug, or the comma-joined product list for excipient alerts.
    pub drug: String,
    pub alert_type: AllergyAlertType,
    pub severity: AllergySeverity,
    pub cross_reactivity_rate: String,
    pub message: String,
    pub recommendation: String,
}

impl AllergyAlert {
    pub fn is_high(&self) -> bool {
        self.severity == AllergySeverity::High
    }

    pub(crate) fn dedup_key(&self) -> (&str, &str, AllergyAlertType) {
        (&self.allergen, &self.drug, self.alert_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergyCheckResult {
    /// True iff no alert has high severity.
    pub safe: bool,
    pub alerts: Vec<AllergyAlert>,
    pub checked_drugs: Vec<String>,
    pub checked_allergens: Vec<String>,
}

impl AllergyCheckResult {
    pub fn alerts_of(&self, alert_type: AllergyAlertType) -> impl Iterator<Item = &AllergyAlert> {
        self.alerts.iter().filter(move |a| a.alert_type == alert_type)
    }
}
