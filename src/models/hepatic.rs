use serde::{Deserialize, Serialize};

use super::enums::{Ascites, Encephalopathy};

/// Laboratory and clinical findings scored by Child-Pugh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPughInput {
    /// mg/dL.
    pub bilirubin: f64,
    /// g/dL.
    pub albumin: f64,
    pub inr: f64,
    pub ascites: Ascites,
    pub encephalopathy: Encephalopathy,
}
