use crate::models::{PatientParameters, Sex};

use super::helpers::round_to;
use super::types::Anthropometrics;

const CM_PER_INCH: f64 = 2.54;

/// Obese branch threshold for adjusted body weight.
const ABW_OBESITY_RATIO: f64 = 1.2;
const ABW_CORRECTION_FACTOR: f64 = 0.4;

/// Body surface area (Mosteller), m², 2 decimals.
pub fn bsa(p: &PatientParameters) -> f64 {
    round_to(((p.height * p.weight) / 3600.0).sqrt(), 2)
}

/// Ideal body weight (Devine), kg, never negative. Not rounded: ABW and the
/// weight advisories are computed from the exact value.
///
/// Only `Sex::Male` uses the 50 kg baseline; `Female` and `Other` use 45.5 kg.
pub fn ibw(p: &PatientParameters) -> f64 {
    let inches = p.height / CM_PER_INCH;
    let baseline = match p.sex {
        Sex::Male => 50.0,
        Sex::Female | Sex::Other => 45.5,
    };
    (baseline + 2.3 * (inches - 60.0)).max(0.0)
}

/// Adjusted body weight, kg.
///
/// Non-obese patients (weight ≤ 1.2 × IBW) get their actual weight back
/// unchanged; otherwise `IBW + 0.4 × (weight − IBW)`, 1 decimal.
pub fn abw(p: &PatientParameters) -> f64 {
    let ideal = ibw(p);
    if p.weight <= ABW_OBESITY_RATIO * ideal {
        return p.weight;
    }
    round_to(ideal + ABW_CORRECTION_FACTOR * (p.weight - ideal), 1)
}

pub fn anthropometrics(p: &PatientParameters) -> Anthropometrics {
    Anthropometrics {
        bsa: bsa(p),
        ibw: ibw(p),
        abw: abw(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(weight: f64, height: f64, sex: Sex) -> PatientParameters {
        PatientParameters::new(45.0, weight, height, sex)
    }

    #[test]
    fn bsa_mosteller() {
        // sqrt(175 * 80 / 3600) = 1.972...
        assert_eq!(bsa(&patient(80.0, 175.0, Sex::Male)), 1.97);
        // sqrt(180 * 80 / 3600) = 2.0 exactly
        assert_eq!(bsa(&patient(80.0, 180.0, Sex::Female)), 2.0);
    }

    #[test]
    fn ibw_devine_by_sex() {
        // 152.4 cm = 60 inches: baseline only
        assert_eq!(ibw(&patient(70.0, 152.4, Sex::Male)), 50.0);
        assert_eq!(ibw(&patient(70.0, 152.4, Sex::Female)), 45.5);
        assert_eq!(ibw(&patient(70.0, 152.4, Sex::Other)), 45.5);
        // 175 cm = 68.9 in -> 50 + 2.3 * 8.898 = 70.4646
        let ideal = ibw(&patient(70.0, 175.0, Sex::Male));
        assert!((ideal - 70.464_566_929).abs() < 1e-6);
    }

    #[test]
    fn abw_rounds_once_from_exact_ibw() {
        // IBW 51.4488; rounding IBW first would give 55.6
        let p = patient(62.0, 154.0, Sex::Male);
        assert_eq!(abw(&p), 55.7);
    }

    #[test]
    fn ibw_floored_at_zero() {
        // 50 cm = 19.7 in -> 45.5 + 2.3 * (-40.3) < 0
        assert_eq!(ibw(&patient(3.0, 50.0, Sex::Female)), 0.0);
    }

    #[test]
    fn abw_non_obese_returns_actual_weight() {
        let p = patient(72.3, 175.0, Sex::Male);
        assert_eq!(abw(&p), 72.3);
    }

    #[test]
    fn abw_obese_uses_correction() {
        // IBW 70.46, weight 120 > 84.56 -> 70.46 + 0.4 * 49.54 = 90.28
        let p = patient(120.0, 175.0, Sex::Male);
        assert_eq!(abw(&p), 90.3);
    }

    #[test]
    fn abw_boundary_is_non_obese() {
        // weight exactly 1.2 * IBW stays on the actual-weight branch
        let p = patient(60.0, 152.4, Sex::Male);
        assert_eq!(abw(&p), 60.0);
    }
}
