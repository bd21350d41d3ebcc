use serde::{Deserialize, Serialize};

use crate::allergy::{AllergyCheckResult, AllergyEngine};
use crate::dosing::{DosingEngine, DosingReport};
use crate::models::{ChildPughInput, PatientParameters};
use crate::rules::RuleSet;

/// Everything needed to assess a proposed treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRequest {
    pub patient: PatientParameters,
    #[serde(default)]
    pub drugs: Vec<String>,
    #[serde(default)]
    pub on_dialysis: bool,
    #[serde(default)]
    pub hepatic: Option<ChildPughInput>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Combined dosing and allergy verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentSafetyReport {
    pub dosing: DosingReport,
    pub allergy: AllergyCheckResult,
    /// False when the allergy check is unsafe or any drug is contraindicated.
    pub safe: bool,
}

impl TreatmentSafetyReport {
    pub fn contraindicated_drugs(&self) -> impl Iterator<Item = &str> {
        self.dosing
            .dosing_recommendations
            .iter()
            .filter(|r| r.is_contraindicated())
            .map(|r| r.drug.as_str())
    }
}

/// Runs both engines over one request. The engines share no state.
#[derive(Debug, Clone, Default)]
pub struct SafetyEngine {
    dosing: DosingEngine,
    allergy: AllergyEngine,
}

impl SafetyEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            dosing: DosingEngine::new(rules.dosing),
            allergy: AllergyEngine::new(rules.allergy),
        }
    }

    pub fn dosing(&self) -> &DosingEngine {
        &self.dosing
    }

    pub fn allergy(&self) -> &AllergyEngine {
        &self.allergy
    }

    /// Evaluate a request. Inputs are expected to have passed
    /// `validation::validate_request`.
    pub fn evaluate(&self, request: &TreatmentRequest) -> TreatmentSafetyReport {
        let dosing = self.dosing.generate_report(
            &request.patient,
            &request.drugs,
            request.on_dialysis,
            request.hepatic.as_ref(),
        );
        let allergy = self.allergy.check(&request.allergies, &request.drugs);

        let report = TreatmentSafetyReport {
            safe: false,
            dosing,
            allergy,
        };
        let contraindicated = report.contraindicated_drugs().count();
        let safe = report.allergy.safe && contraindicated == 0;

        tracing::info!(
            safe,
            allergy_safe = report.allergy.safe,
            contraindicated,
            "Treatment evaluated"
        );

        TreatmentSafetyReport { safe, ..report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ascites, ChildPughClass, Encephalopathy, Sex};

    fn request(patient: PatientParameters, drugs: &[&str], allergies: &[&str]) -> TreatmentRequest {
        TreatmentRequest {
            patient,
            drugs: drugs.iter().map(|s| s.to_string()).collect(),
            on_dialysis: false,
            hepatic: None,
            allergies: allergies.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn healthy() -> PatientParameters {
        PatientParameters::new(50.0, 80.0, 175.0, Sex::Male).with_serum_creatinine(1.0)
    }

    #[test]
    fn clean_request_is_safe() {
        let report = SafetyEngine::default().evaluate(&request(healthy(), &["metformin"], &[]));
        assert!(report.safe);
        assert_eq!(report.dosing.dosing_recommendations.len(), 1);
        assert!(report.allergy.alerts.is_empty());
    }

    #[test]
    fn contraindicated_drug_makes_unsafe() {
        let patient =
            PatientParameters::new(68.0, 72.0, 170.0, Sex::Male).with_serum_creatinine(4.5);
        let report = SafetyEngine::default().evaluate(&request(patient, &["Metformin"], &[]));
        assert!(report.allergy.safe);
        assert!(!report.safe);
        assert_eq!(report.contraindicated_drugs().collect::<Vec<_>>(), vec!["Metformin"]);
    }

    #[test]
    fn high_allergy_alert_makes_unsafe() {
        let report = SafetyEngine::default()
            .evaluate(&request(healthy(), &["amoxicillin"], &["penicillin"]));
        assert!(!report.allergy.safe);
        assert!(!report.safe);
    }

    #[test]
    fn low_allergy_alert_stays_safe() {
        let report =
            SafetyEngine::default().evaluate(&request(healthy(), &["furosemide"], &["sulfa"]));
        assert_eq!(report.allergy.alerts.len(), 1);
        // No dosing rule for furosemide
        assert!(report.dosing.dosing_recommendations.is_empty());
        assert!(report.safe);
    }

    #[test]
    fn hepatic_input_flows_through() {
        let mut req = request(healthy(), &["atorvastatin"], &[]);
        req.hepatic = Some(ChildPughInput {
            bilirubin: 2.5,
            albumin: 3.0,
            inr: 1.8,
            ascites: Ascites::Mild,
            encephalopathy: Encephalopathy::None,
        });
        let report = SafetyEngine::default().evaluate(&req);
        let hepatic = report.dosing.hepatic_function.as_ref().unwrap();
        assert_eq!(hepatic.child_pugh_score, 9);
        assert_eq!(hepatic.child_pugh_class, ChildPughClass::B);
        assert!(report.safe);
    }

    #[test]
    fn engine_uses_injected_rules() {
        let rules = RuleSet {
            dosing: crate::dosing::DosingRules::new(Vec::new()),
            allergy: crate::allergy::AllergyRules::new(Vec::new(), Vec::new()),
        };
        let engine = SafetyEngine::new(rules);
        assert!(engine.dosing().rules().is_empty());
        assert!(engine.allergy().rules().groups().is_empty());

        let report = engine.evaluate(&request(healthy(), &["metformin"], &["penicillin"]));
        assert!(report.dosing.dosing_recommendations.is_empty());
        assert!(report.allergy.alerts.is_empty());
        assert!(report.safe);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engines_are_send_and_sync() {
        assert_send_sync::<crate::dosing::DosingEngine>();
        assert_send_sync::<crate::allergy::AllergyEngine>();
        assert_send_sync::<SafetyEngine>();
        assert_send_sync::<RuleSet>();
    }

    #[test]
    fn shared_engine_gives_identical_reports_across_threads() {
        let engine = SafetyEngine::default();
        let patient =
            PatientParameters::new(77.0, 95.0, 168.0, Sex::Female).with_serum_creatinine(1.7);
        let req = request(
            patient,
            &["metformin", "lisinopril", "ciprofloxacin", "cephalexin"],
            &["penicillin", "sulfa"],
        );

        let (a, b) = std::thread::scope(|s| {
            let first = s.spawn(|| engine.evaluate(&req));
            let second = s.spawn(|| engine.evaluate(&req));
            (first.join().unwrap(), second.join().unwrap())
        });
        assert_eq!(a, b);
        assert_eq!(a, engine.evaluate(&req));
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let req: TreatmentRequest = serde_json::from_str(
            r#"{"patient": {"age": 50, "weight": 80, "height": 175, "sex": "male"}}"#,
        )
        .unwrap();
        assert!(req.drugs.is_empty());
        assert!(!req.on_dialysis);
        assert!(req.hepatic.is_none());
        assert_eq!(req.patient.serum_creatinine, None);
    }

    #[test]
    fn report_serializes_wire_names() {
        let report = SafetyEngine::default()
            .evaluate(&request(healthy(), &["cephalexin"], &["penicillin"]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["safe"], false);
        assert_eq!(json["allergy"]["alerts"][0]["alert_type"], "cross-reactive");
        assert_eq!(json["allergy"]["alerts"][0]["severity"], "high");
        assert_eq!(json["dosing"]["renal_tier"], "normal");
        assert_eq!(json["dosing"]["patient_parameters"]["sex"], "male");
    }
}
