/// Alert wording for the allergy engine.
pub struct AlertTemplates;

impl AlertTemplates {
    pub const DIRECT_RATE: &'static str = "100%";
    pub const CLASS_RATE: &'static str = "Same class";
    pub const EXCIPIENT_RATE: &'static str = "Formulation-dependent";

    pub fn direct(allergen: &str, drug: &str) -> String {
        format!(
            "Documented allergy to {}: {} matches the allergen directly",
            allergen, drug
        )
    }

    pub fn direct_recommendation() -> String {
        "Do not administer; select an agent from an unrelated class".to_string()
    }

    pub fn cross_reactive(allergen: &str, drug: &str, group: &str, rate: &str) -> String {
        format!(
            "{} may cross-react with {} allergy ({}; reported rate {})",
            drug, allergen, group, rate
        )
    }

    pub fn class_based(allergen: &str, drug: &str, group: &str) -> String {
        format!(
            "{} belongs to the same class as {} ({})",
            drug, allergen, group
        )
    }

    pub fn class_based_recommendation(group: &str) -> String {
        format!("Avoid all {}; choose an agent from a different class", group)
    }

    pub fn excipient_recommendation(allergen: &str) -> String {
        format!(
            "Check inactive ingredients of every product for {} before dispensing",
            allergen
        )
    }
}
