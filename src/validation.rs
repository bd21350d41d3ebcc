// Boundary validation ahead of the pure engines.
// The formulas do not check their inputs.

use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::models::{Ascites, ChildPughInput, Encephalopathy, PatientParameters, Sex};
use crate::safety::TreatmentRequest;

/// Oldest age accepted. Cockcroft-Gault turns negative at 140.
const MAX_AGE_YEARS: f64 = 130.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: String, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("age must be between 0 and 130 years, got {0}")]
    AgeOutOfRange(f64),

    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("{0} list contains a blank entry")]
    BlankEntry(String),
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite {
            field: field.into(),
            value,
        })
    }
}

fn positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive {
            field: field.into(),
            value,
        })
    }
}

/// Reject patient parameters the renal and anthropometric formulas cannot use.
pub fn validate_patient(patient: &PatientParameters) -> Result<(), ValidationError> {
    let age = finite("age", patient.age)?;
    if !(0.0..=MAX_AGE_YEARS).contains(&age) {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    positive("weight", patient.weight)?;
    positive("height", patient.height)?;
    if let Some(scr) = patient.serum_creatinine {
        positive("serum_creatinine", scr)?;
    }
    Ok(())
}

pub fn validate_child_pugh(input: &ChildPughInput) -> Result<(), ValidationError> {
    positive("bilirubin", input.bilirubin)?;
    positive("albumin", input.albumin)?;
    positive("inr", input.inr)?;
    Ok(())
}

/// A name with no letters or digits cannot match anything.
fn validate_names(kind: &str, names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|n| !n.chars().any(char::is_alphanumeric)) {
        return Err(ValidationError::BlankEntry(kind.into()));
    }
    Ok(())
}

fn check_enum<T>(field: Option<&Value>) -> Result<(), ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match field.and_then(Value::as_str) {
        Some(raw) => raw.parse::<T>().map(|_| ()),
        None => Ok(()),
    }
}

/// Check the enumerated fields of a raw JSON request through `FromStr`, so an
/// unknown value is reported as `InvalidEnum` rather than a decoding error.
pub fn validate_request_enums(raw: &Value) -> Result<(), ValidationError> {
    check_enum::<Sex>(raw.pointer("/patient/sex"))?;
    check_enum::<Ascites>(raw.pointer("/hepatic/ascites"))?;
    check_enum::<Encephalopathy>(raw.pointer("/hepatic/encephalopathy"))?;
    Ok(())
}

/// Validate a whole treatment request before it reaches `SafetyEngine::evaluate`.
pub fn validate_request(request: &TreatmentRequest) -> Result<(), ValidationError> {
    validate_patient(&request.patient)?;
    if let Some(hepatic) = &request.hepatic {
        validate_child_pugh(hepatic)?;
    }
    validate_names("drug", &request.drugs)?;
    validate_names("allergen", &request.allergies)?;

    tracing::debug!(
        drugs = request.drugs.len(),
        allergies = request.allergies.len(),
        hepatic = request.hepatic.is_some(),
        "Treatment request validated"
    );
    Ok(())
}
