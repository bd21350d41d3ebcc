use std::collections::HashSet;

use crate::models::{AllergyAlertType, AllergySeverity};

use super::matcher::AllergenMatcher;
use super::messages::AlertTemplates;
use super::reference::{AllergyRules, CrossReactivityGroup};
use super::types::AllergyAlert;

// ---------------------------------------------------------------------------
// [1] DIRECT detection
// ---------------------------------------------------------------------------

/// Allergen fuzzy-matches a proposed drug. Severity: HIGH.
pub fn detect_direct<M: AllergenMatcher>(
    matcher: &M,
    allergen: &str,
    drugs: &[String],
) -> Vec<AllergyAlert> {
    drugs
        .iter()
        .filter(|drug| matcher.matches(allergen, drug))
        .map(|drug| AllergyAlert {
            allergen: allergen.to_string(),
            drug: drug.clone(),
            alert_type: AllergyAlertType::Direct,
            severity: AllergySeverity::High,
            cross_reactivity_rate: AlertTemplates::DIRECT_RATE.to_string(),
            message: AlertTemplates::direct(allergen, drug),
            recommendation: AlertTemplates::direct_recommendation(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// [2] GROUP detection (cross-reactive + class-based)
// ---------------------------------------------------------------------------

/// Groups whose primary allergens fuzzy-match the allergen.
pub fn matching_groups<'a, M: AllergenMatcher>(
    rules: &'a AllergyRules,
    matcher: &M,
    allergen: &str,
) -> Vec<&'a CrossReactivityGroup> {
    rules
        .groups()
        .iter()
        .filter(|g| g.primary_allergens.iter().any(|p| matcher.matches(p, allergen)))
        .collect()
}

/// For each matching group: drugs listed as cross-reactive get the group
/// severity; drugs that are another member of the same class are HIGH.
/// Both can fire for one drug.
pub fn detect_group_reactions<M: AllergenMatcher>(
    rules: &AllergyRules,
    matcher: &M,
    allergen: &str,
    drugs: &[String],
) -> Vec<AllergyAlert> {
    let mut alerts = Vec::new();

    for group in matching_groups(rules, matcher, allergen) {
        let siblings: Vec<&String> = group
            .primary_allergens
            .iter()
            .filter(|p| !matcher.matches(p, allergen))
            .collect();

        for drug in drugs {
            if group
                .cross_reactive_drugs
                .iter()
                .any(|c| matcher.matches(drug, c))
            {
                alerts.push(AllergyAlert {
                    allergen: allergen.to_string(),
                    drug: drug.clone(),
                    alert_type: AllergyAlertType::CrossReactive,
                    severity: group.severity,
                    cross_reactivity_rate: group.cross_reactivity_rate.clone(),
                    message: AlertTemplates::cross_reactive(
                        allergen,
                        drug,
                        &group.group_name,
                        &group.cross_reactivity_rate,
                    ),
                    recommendation: group.recommendation.clone(),
                });
            }

            if siblings.iter().any(|p| matcher.matches(drug, p)) {
                alerts.push(AllergyAlert {
                    allergen: allergen.to_string(),
                    drug: drug.clone(),
                    alert_type: AllergyAlertType::ClassBased,
                    severity: AllergySeverity::High,
                    cross_reactivity_rate: AlertTemplates::CLASS_RATE.to_string(),
                    message: AlertTemplates::class_based(allergen, drug, &group.group_name),
                    recommendation: AlertTemplates::class_based_recommendation(&group.group_name),
                });
            }
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [3] EXCIPIENT detection
// ---------------------------------------------------------------------------

/// Allergen matches a known excipient. Severity: MODERATE.
/// Independent of the proposed drugs.
pub fn detect_excipients<M: AllergenMatcher>(
    rules: &AllergyRules,
    matcher: &M,
    allergen: &str,
) -> Vec<AllergyAlert> {
    rules
        .excipients()
        .iter()
        .filter(|e| matcher.matches(&e.allergen, allergen))
        .map(|e| AllergyAlert {
            allergen: allergen.to_string(),
            drug: e.drugs_containing.join(", "),
            alert_type: AllergyAlertType::Excipient,
            severity: AllergySeverity::Moderate,
            cross_reactivity_rate: AlertTemplates::EXCIPIENT_RATE.to_string(),
            message: e.message.clone(),
            recommendation: AlertTemplates::excipient_recommendation(&e.allergen),
        })
        .collect()
}

/// Collapse alerts sharing (allergen, drug, alert_type). First occurrence wins.
pub fn dedup_alerts(alerts: &mut Vec<AllergyAlert>) {
    let mut seen: HashSet<(String, String, AllergyAlertType)> = HashSet::new();
    alerts.retain(|a| {
        let (allergen, drug, kind) = a.dedup_key();
        seen.insert((allergen.to_string(), drug.to_string(), kind))
    });
}
