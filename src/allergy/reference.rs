use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::AllergySeverity;

/// Pharmacologic class with known cross-reactivity (loaded from
/// cross_reactivity.json or the built-in reference set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReactivityGroup {
    pub group_name: String,
    /// Terms that identify an allergy to this class.
    pub primary_allergens: Vec<String>,
    /// Drugs outside the class that may still react.
    pub cross_reactive_drugs: Vec<String>,
    pub cross_reactivity_rate: String,
    pub severity: AllergySeverity,
    pub recommendation: String,
}

/// Inactive ingredient that may trigger an allergy (excipients.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcipientMapping {
    pub allergen: String,
    pub drugs_containing: Vec<String>,
    pub message: String,
}

/// Immutable allergy knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergyRules {
    groups: Vec<CrossReactivityGroup>,
    excipients: Vec<ExcipientMapping>,
}

static REFERENCE_ALLERGY_RULES: LazyLock<AllergyRules> =
    LazyLock::new(|| AllergyRules::new(reference_groups(), reference_excipients()));

impl AllergyRules {
    pub fn new(groups: Vec<CrossReactivityGroup>, excipients: Vec<ExcipientMapping>) -> Self {
        Self { groups, excipients }
    }

    /// Built-in reference tables, constructed once per process.
    pub fn reference() -> &'static AllergyRules {
        &REFERENCE_ALLERGY_RULES
    }

    pub fn groups(&self) -> &[CrossReactivityGroup] {
        &self.groups
    }

    pub fn excipients(&self) -> &[ExcipientMapping] {
        &self.excipients
    }
}

impl Default for AllergyRules {
    fn default() -> Self {
        Self::reference().clone()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn group(
    name: &str,
    primary: &[&str],
    cross: &[&str],
    rate: &str,
    severity: AllergySeverity,
    recommendation: &str,
) -> CrossReactivityGroup {
    CrossReactivityGroup {
        group_name: name.into(),
        primary_allergens: strings(primary),
        cross_reactive_drugs: strings(cross),
        cross_reactivity_rate: rate.into(),
        severity,
        recommendation: recommendation.into(),
    }
}

fn excipient(allergen: &str, drugs: &[&str], message: &str) -> ExcipientMapping {
    ExcipientMapping {
        allergen: allergen.into(),
        drugs_containing: strings(drugs),
        message: message.into(),
    }
}

fn reference_groups() -> Vec<CrossReactivityGroup> {
    vec![
        group(
            "Penicillins",
            &[
                "penicillin",
                "amoxicillin",
                "ampicillin",
                "piperacillin",
                "nafcillin",
                "oxacillin",
                "dicloxacillin",
            ],
            &[
                "cephalexin",
                "cefazolin",
                "cefuroxime",
                "ceftriaxone",
                "cefdinir",
                "cefepime",
                "imipenem",
                "meropenem",
                "ertapenem",
            ],
            "1-10%",
            AllergySeverity::High,
            "Avoid cephalosporins and carbapenems unless the reaction history is low-risk \
             or skin testing is negative; prefer a non-beta-lactam alternative",
        ),
        group(
            "Cephalosporins",
            &[
                "cephalosporin",
                "cephalexin",
                "cefazolin",
                "cefuroxime",
                "ceftriaxone",
                "cefdinir",
                "cefepime",
                "cefpodoxime",
            ],
            &["penicillin", "amoxicillin", "ampicillin", "imipenem", "meropenem", "ertapenem"],
            "1-3%",
            AllergySeverity::Moderate,
            "Penicillins and carbapenems may be used with caution; first dose under observation",
        ),
        group(
            "Sulfonamide antibiotics",
            &[
                "sulfa",
                "sulfonamide",
                "sulfamethoxazole",
                "sulfadiazine",
                "sulfasalazine",
                "sulfisoxazole",
            ],
            &[
                "furosemide",
                "hydrochlorothiazide",
                "chlorthalidone",
                "bumetanide",
                "celecoxib",
                "glipizide",
                "glyburide",
                "acetazolamide",
            ],
            "<2%",
            AllergySeverity::Low,
            "Non-antibiotic sulfonamides rarely cross-react; use with routine monitoring",
        ),
        group(
            "NSAIDs",
            &[
                "nsaid",
                "aspirin",
                "ibuprofen",
                "naproxen",
                "diclofenac",
                "ketorolac",
                "indomethacin",
                "meloxicam",
            ],
            &["celecoxib"],
            "<5%",
            AllergySeverity::Moderate,
            "COX-2 selective agents are usually tolerated; consider a supervised test dose",
        ),
        group(
            "Opioids (morphine-type)",
            &["morphine", "codeine", "hydromorphone", "oxycodone", "hydrocodone"],
            &["fentanyl", "methadone", "tramadol", "meperidine"],
            "<5%",
            AllergySeverity::Low,
            "Synthetic opioids from a different structural class are usually tolerated",
        ),
        group(
            "Aromatic anticonvulsants",
            &["carbamazepine", "phenytoin", "phenobarbital"],
            &["lamotrigine", "oxcarbazepine", "primidone"],
            "40-58%",
            AllergySeverity::High,
            "Avoid other aromatic anticonvulsants; consider levetiracetam or valproate",
        ),
        group(
            "ACE inhibitors",
            &["ace inhibitor", "lisinopril", "enalapril", "ramipril", "captopril", "benazepril"],
            &["sacubitril", "losartan", "valsartan"],
            "<10%",
            AllergySeverity::Moderate,
            "After ACE-inhibitor angioedema, use ARBs with caution and avoid sacubitril",
        ),
    ]
}

fn reference_excipients() -> Vec<ExcipientMapping> {
    vec![
        excipient(
            "lactose",
            &["levothyroxine", "prednisone", "dry-powder inhalers"],
            "Lactose is a common tablet filler; confirm lactose-free formulations for severe milk-protein allergy",
        ),
        excipient(
            "gelatin",
            &["hard and soft capsules", "MMR vaccine", "varicella vaccine"],
            "Gelatin is present in capsule shells and some live vaccines",
        ),
        excipient(
            "egg",
            &["propofol", "influenza vaccine (egg-based)", "yellow fever vaccine"],
            "Egg-derived components appear in some vaccines and lipid emulsions",
        ),
        excipient(
            "soy",
            &["propofol", "clevidipine", "intravenous lipid emulsions"],
            "Soybean oil is the lipid phase of several intravenous emulsions",
        ),
        excipient(
            "peanut",
            &["progesterone in oil", "valproic acid capsules (some brands)"],
            "Arachis (peanut) oil is used as a vehicle in some oral and injectable products",
        ),
        excipient(
            "sulfite",
            &["epinephrine", "dopamine", "dexamethasone injection", "gentamicin injection"],
            "Sodium metabisulfite is used as an antioxidant in many injectable products",
        ),
        excipient(
            "latex",
            &["vial stoppers", "syringe plungers", "glucagon emergency kits"],
            "Natural rubber latex may be present in packaging and administration devices",
        ),
        excipient(
            "tartrazine",
            &["yellow-dyed tablets and capsules"],
            "Tartrazine (FD&C Yellow No. 5) is used as a colorant in oral products",
        ),
        excipient(
            "polyethylene glycol",
            &["mRNA vaccines", "pegfilgrastim", "pegaspargase", "PEG 3350 laxatives"],
            "Polyethylene glycol (PEG) is an excipient in vaccines and pegylated biologics",
        ),
    ]
}
