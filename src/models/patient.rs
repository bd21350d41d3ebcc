use serde::{Deserialize, Serialize};

use super::enums::Sex;

/// Serum creatinine assumed when the caller has no measurement (mg/dL).
pub const DEFAULT_SERUM_CREATININE: f64 = 1.0;

/// Raw patient parameters supplied per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientParameters {
    /// Years.
    pub age: f64,
    /// Kilograms.
    pub weight: f64,
    /// Centimetres.
    pub height: f64,
    pub sex: Sex,
    /// mg/dL.
    #[serde(default)]
    pub serum_creatinine: Option<f64>,
}

impl PatientParameters {
    pub fn new(age: f64, weight: f64, height: f64, sex: Sex) -> Self {
        Self {
            age,
            weight,
            height,
            sex,
            serum_creatinine: None,
        }
    }

    pub fn with_serum_creatinine(mut self, scr: f64) -> Self {
        self.serum_creatinine = Some(scr);
        self
    }

    /// Serum creatinine with the default applied.
    pub fn effective_serum_creatinine(&self) -> f64 {
        self.serum_creatinine.unwrap_or(DEFAULT_SERUM_CREATININE)
    }
}
