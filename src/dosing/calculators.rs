use crate::models::PatientParameters;

use super::anthropometrics::{abw, bsa};
use super::helpers::round_to;

/// Weight-based dose in mg, 1 decimal. `use_abw` substitutes adjusted body weight.
pub fn dose_by_weight(mg_per_kg: f64, patient: &PatientParameters, use_abw: bool) -> f64 {
    let weight = if use_abw { abw(patient) } else { patient.weight };
    round_to(mg_per_kg * weight, 1)
}

/// BSA-based dose in mg, 1 decimal.
pub fn dose_by_bsa(mg_per_m2: f64, patient: &PatientParameters) -> f64 {
    round_to(mg_per_m2 * bsa(patient), 1)
}
