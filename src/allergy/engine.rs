use super::detection::{
    dedup_alerts, detect_direct, detect_excipients, detect_group_reactions, matching_groups,
};
use super::matcher::{AllergenMatcher, SubstringMatcher};
use super::reference::{AllergyRules, CrossReactivityGroup};
use super::types::{AllergyAlert, AllergyCheckResult};

/// Allergy cross-reactivity engine.
/// Runs direct, group and excipient detection per allergen, then deduplicates.
#[derive(Debug, Clone, Default)]
pub struct AllergyEngine<M = SubstringMatcher> {
    rules: AllergyRules,
    matcher: M,
}

impl AllergyEngine<SubstringMatcher> {
    pub fn new(rules: AllergyRules) -> Self {
        Self::with_matcher(rules, SubstringMatcher)
    }
}

impl<M: AllergenMatcher> AllergyEngine<M> {
    pub fn with_matcher(rules: AllergyRules, matcher: M) -> Self {
        Self { rules, matcher }
    }

    pub fn rules(&self) -> &AllergyRules {
        &self.rules
    }

    /// Check declared allergies against a proposed drug list.
    ///
    /// Entries are trimmed and lower-cased. Blank entries are skipped for
    /// matching but still echoed in `checked_*`.
    pub fn check<A, D>(&self, allergies: &[A], drugs: &[D]) -> AllergyCheckResult
    where
        A: AsRef<str>,
        D: AsRef<str>,
    {
        let drug_terms: Vec<String> = prepare(drugs);

        let mut alerts: Vec<AllergyAlert> = Vec::new();
        for allergen in prepare(allergies) {
            alerts.extend(detect_direct(&self.matcher, &allergen, &drug_terms));
            alerts.extend(detect_group_reactions(
                &self.rules,
                &self.matcher,
                &allergen,
                &drug_terms,
            ));
            alerts.extend(detect_excipients(&self.rules, &self.matcher, &allergen));
        }
        dedup_alerts(&mut alerts);

        let safe = !alerts.iter().any(AllergyAlert::is_high);

        tracing::info!(
            allergens = allergies.len(),
            drugs = drugs.len(),
            alerts = alerts.len(),
            high = alerts.iter().filter(|a| a.is_high()).count(),
            safe,
            "Allergy check complete"
        );

        AllergyCheckResult {
            safe,
            alerts,
            checked_drugs: drugs.iter().map(|d| d.as_ref().to_string()).collect(),
            checked_allergens: allergies.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    /// Single-drug convenience over [`check`](Self::check).
    pub fn is_drug_safe_for_patient<A: AsRef<str>>(&self, drug: &str, allergies: &[A]) -> bool {
        self.check(allergies, &[drug]).safe
    }

    /// Reference groups relevant to an allergen, independent of any drug.
    pub fn cross_reactivity_info_for(&self, allergen: &str) -> Vec<&CrossReactivityGroup> {
        let allergen = allergen.trim().to_lowercase();
        if self.matcher.normalize(&allergen).is_empty() {
            return Vec::new();
        }
        matching_groups(&self.rules, &self.matcher, &allergen)
    }
}

/// Trim and lower-case, dropping entries with nothing left to match.
fn prepare<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}
