pub mod enums;
pub mod hepatic;
pub mod patient;

pub use enums::*;
pub use hepatic::ChildPughInput;
pub use patient::{PatientParameters, DEFAULT_SERUM_CREATININE};
