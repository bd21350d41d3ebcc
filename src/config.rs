use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "ClinicalSafety";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the rule-file directory.
pub const RULES_DIR_ENV: &str = "CLINICAL_SAFETY_RULES_DIR";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinical_safety=info"
}

/// Get the application data directory
/// ~/ClinicalSafety/ on all platforms. `None` when no home directory is known.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Directory holding renal_dosing.json, cross_reactivity.json and excipients.json.
///
/// `CLINICAL_SAFETY_RULES_DIR` wins over ~/ClinicalSafety/rules.
pub fn rules_dir() -> Option<PathBuf> {
    match std::env::var(RULES_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir)),
        _ => app_data_dir().map(|dir| dir.join("rules")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let dir = app_data_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("ClinicalSafety"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!APP_VERSION.is_empty());
    }

    #[test]
    fn log_filter_targets_crate() {
        assert!(default_log_filter().starts_with("clinical_safety"));
    }
}
