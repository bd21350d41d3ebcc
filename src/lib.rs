//! Clinical safety rules engine.
//!
//! Renal and hepatic dose adjustment plus allergy cross-reactivity checks over
//! injected, immutable rule tables. The engines are pure; validation runs as a
//! separate stage in front of them.

pub mod allergy;
pub mod config;
pub mod dosing;
pub mod models;
pub mod rules;
pub mod safety;
pub mod validation;

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use rules::{RuleSet, RuleSetError};
use safety::{SafetyEngine, TreatmentRequest, TreatmentSafetyReport};
use validation::ValidationError;

// ═══════════════════════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rule set error: {0}")]
    Rules(#[from] RuleSetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════════════════════════════════════

/// Install the fmt subscriber on stderr. Call once per process.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Parse, validate and evaluate one JSON treatment request.
pub fn evaluate_request_json(
    engine: &SafetyEngine,
    json: &str,
) -> Result<TreatmentSafetyReport, AppError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    validation::validate_request_enums(&raw)?;
    let request: TreatmentRequest = serde_json::from_value(raw)?;
    validation::validate_request(&request)?;
    Ok(engine.evaluate(&request))
}

/// Read a request from `input` (stdin when `None` or "-"), evaluate it against
/// the rules in `rules_dir` (or the default location) and return pretty JSON.
pub fn run(input: Option<&Path>, rules_dir: Option<&Path>) -> Result<String, AppError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let rules = match rules_dir {
        Some(dir) => RuleSet::load(dir)?,
        None => RuleSet::load_default()?,
    };
    let engine = SafetyEngine::new(rules);

    let json = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let report = evaluate_request_json(&engine, &json)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;

    const REQUEST: &str = r#"{
        "patient": {"age": 68, "weight": 72, "height": 170, "sex": "male", "serum_creatinine": 4.5},
        "drugs": ["metformin", "gabapentin"],
        "allergies": ["penicillin"]
    }"#;

    #[test]
    fn evaluates_valid_request() {
        let report = evaluate_request_json(&SafetyEngine::default(), REQUEST).unwrap();
        assert_eq!(report.dosing.dosing_recommendations.len(), 2);
        assert!(!report.safe);
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = evaluate_request_json(&SafetyEngine::default(), "{").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn unknown_sex_is_validation_error() {
        let json = r#"{"patient": {"age": 50, "weight": 80, "height": 175, "sex": "unknown"}}"#;
        let err = evaluate_request_json(&SafetyEngine::default(), json).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidEnum { ref field, .. }) if field == "Sex"
        ));
    }

    #[test]
    fn enum_values_are_case_insensitive() {
        let json = r#"{
            "patient": {"age": 50, "weight": 80, "height": 175, "sex": "Female"},
            "hepatic": {"bilirubin": 1.0, "albumin": 4.0, "inr": 1.0,
                        "ascites": "None", "encephalopathy": "GRADE1-2"}
        }"#;
        let report = evaluate_request_json(&SafetyEngine::default(), json).unwrap();
        assert_eq!(report.dosing.patient_parameters.sex, Sex::Female);
        assert_eq!(report.dosing.hepatic_function.unwrap().child_pugh_score, 6);
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        let json = r#"{"patient": {"age": 50, "weight": 0, "height": 175, "sex": "male"}}"#;
        let err = evaluate_request_json(&SafetyEngine::default(), json).unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::NotPositive { .. })));
        assert!(err.to_string().starts_with("Invalid request"));
    }

    #[test]
    fn run_reads_file_and_rules_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("request.json");
        std::fs::write(&input, REQUEST).unwrap();

        let out = run(Some(&input), Some(dir.path())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["safe"], false);
        assert_eq!(
            value["dosing"]["dosing_recommendations"][0]["adjusted_dose"],
            "CONTRAINDICATED"
        );
    }

    #[test]
    fn run_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(Some(&dir.path().join("absent.json")), Some(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
