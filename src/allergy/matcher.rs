/// Fuzzy comparison between an allergen term and a drug or class term.
pub trait AllergenMatcher: Send + Sync {
    /// Lower-case alphanumeric form used for comparison. Empty means "nothing
    /// to match" and callers skip the entry.
    fn normalize(&self, term: &str) -> String;

    /// Compare two already-normalized, non-empty terms.
    fn matches_normalized(&self, a: &str, b: &str) -> bool;

    fn matches(&self, a: &str, b: &str) -> bool {
        let (a, b) = (self.normalize(a), self.normalize(b));
        !a.is_empty() && !b.is_empty() && self.matches_normalized(&a, &b)
    }
}

/// Bidirectional substring containment after stripping non-alphanumerics.
///
/// Short terms over-match: "sulfa" matches "sulfamethoxazole", and an allergen
/// like "cef" matches every cephalosporin.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl AllergenMatcher for SubstringMatcher {
    fn normalize(&self, term: &str) -> String {
        term.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }

    fn matches_normalized(&self, a: &str, b: &str) -> bool {
        a.contains(b) || b.contains(a)
    }
}
