use std::sync::LazyLock;

use regex::Regex;

/// Round half away from zero to `decimals` places.
///
/// `f64::round` already rounds ties away from zero, so scaling is the only step.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Dose strings that mean "do not give" rather than a schedule.
pub const CONTRAINDICATED: &str = "CONTRAINDICATED";

/// Frequency tokens (compiled once via LazyLock).
static RE_POST_DIALYSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)post-dialysis|after\s+dialysis").unwrap());
static RE_EVERY_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bq(\d{1,2})h\b").unwrap());
static RE_QID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bqid\b").unwrap());
static RE_TID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btid\b").unwrap());
static RE_BID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bbid\b").unwrap());
static RE_PRN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bprn\b|as\s+needed").unwrap());
static RE_DAILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bqd\b|\bdaily\b").unwrap());

/// Human-readable frequency derived from the tokens in a dose string.
///
/// Handles: "BID", "TID", "QID", "q12h", "PRN", "daily", "post-dialysis".
/// The first matching token wins, so "250 mg q24h (after dialysis)" reads as a
/// dialysis schedule.
pub fn derive_frequency(dose: &str) -> String {
    if dose.trim().eq_ignore_ascii_case(CONTRAINDICATED) {
        return "Not applicable".to_string();
    }
    if RE_POST_DIALYSIS.is_match(dose) {
        return "After each dialysis session".to_string();
    }
    if let Some(caps) = RE_EVERY_HOURS.captures(dose) {
        if let Some(hours) = caps.get(1) {
            return format!("Every {} hours", hours.as_str());
        }
    }
    if RE_QID.is_match(dose) {
        return "Four times daily".to_string();
    }
    if RE_TID.is_match(dose) {
        return "Three times daily".to_string();
    }
    if RE_BID.is_match(dose) {
        return "Twice daily".to_string();
    }
    if RE_PRN.is_match(dose) {
        return "As needed".to_string();
    }
    if RE_DAILY.is_match(dose) {
        return "Once daily".to_string();
    }
    "As directed".to_string()
}

/// Canonical lookup key for a drug name.
pub fn drug_key(name: &str) -> String {
    name.trim().to_lowercase()
}
