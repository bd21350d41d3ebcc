use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::allergy::{AllergyRules, CrossReactivityGroup, ExcipientMapping};
use crate::config;
use crate::dosing::DosingRules;

pub const RENAL_DOSING_FILE: &str = "renal_dosing.json";
pub const CROSS_REACTIVITY_FILE: &str = "cross_reactivity.json";
pub const EXCIPIENTS_FILE: &str = "excipients.json";

#[derive(Error, Debug)]
pub enum RuleSetError {
    #[error("Failed to read rule file {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse rule file {0}: {1}")]
    Parse(String, String),
}

/// Complete knowledge base for both engines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub dosing: DosingRules,
    pub allergy: AllergyRules,
}

impl RuleSet {
    /// Built-in reference tables.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Load rule files from a directory.
    /// A missing file keeps the reference table for that part.
    pub fn load(dir: &Path) -> Result<Self, RuleSetError> {
        let reference = AllergyRules::reference();

        let dosing = read_optional::<DosingRules>(dir, RENAL_DOSING_FILE)?
            .unwrap_or_else(|| DosingRules::reference().clone());
        let groups = read_optional::<Vec<CrossReactivityGroup>>(dir, CROSS_REACTIVITY_FILE)?
            .unwrap_or_else(|| reference.groups().to_vec());
        let excipients = read_optional::<Vec<ExcipientMapping>>(dir, EXCIPIENTS_FILE)?
            .unwrap_or_else(|| reference.excipients().to_vec());

        tracing::info!(
            dir = %dir.display(),
            drugs = dosing.len(),
            groups = groups.len(),
            excipients = excipients.len(),
            "Rule set loaded"
        );

        Ok(Self {
            dosing,
            allergy: AllergyRules::new(groups, excipients),
        })
    }

    /// Load from `config::rules_dir()`, or the reference tables when no
    /// directory can be resolved.
    pub fn load_default() -> Result<Self, RuleSetError> {
        match config::rules_dir() {
            Some(dir) => Self::load(&dir),
            None => {
                tracing::info!("No rules directory resolved, using reference tables");
                Ok(Self::reference())
            }
        }
    }
}

fn read_optional<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Option<T>, RuleSetError> {
    let path = dir.join(file);
    if !path.exists() {
        tracing::debug!(file, "Rule file absent, using reference table");
        return Ok(None);
    }

    let json = std::fs::read_to_string(&path)
        .map_err(|e| RuleSetError::Load(path.display().to_string(), e.to_string()))?;
    let parsed = serde_json::from_str(&json)
        .map_err(|e| RuleSetError::Parse(file.to_string(), e.to_string()))?;
    Ok(Some(parsed))
}
