//! Allergy cross-reactivity checks for a proposed medication list.

pub mod detection;
pub mod engine;
pub mod matcher;
pub mod messages;
pub mod reference;
pub mod types;

pub use engine::AllergyEngine;
pub use matcher::{AllergenMatcher, SubstringMatcher};
pub use reference::{AllergyRules, CrossReactivityGroup, ExcipientMapping};
pub use types::{AllergyAlert, AllergyCheckResult};
