use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde wire name; deserialization goes
/// through `FromStr`, so JSON input is case-insensitive too.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $(v if v == $s.to_lowercase() => Ok(Self::$variant)),+,
                    _ => Err(ValidationError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Biological sex as used by the renal and body-weight equations.
    Sex {
        Male => "male",
        Female => "female",
        Other => "other",
    }
);

str_enum!(Ascites {
    None => "none",
    Mild => "mild",
    Moderate => "moderate",
});

str_enum!(Encephalopathy {
    None => "none",
    Grade1To2 => "grade1-2",
    Grade3To4 => "grade3-4",
});

str_enum!(ChildPughClass {
    A => "A",
    B => "B",
    C => "C",
});

str_enum!(
    /// Renal dosing tier selected from the renal assessment and dialysis status.
    RenalTier {
        Normal => "normal",
        Moderate => "moderate",
        Severe => "severe",
        Dialysis => "dialysis",
    }
);

str_enum!(AllergyAlertType {
    Direct => "direct",
    CrossReactive => "cross-reactive",
    ClassBased => "class-based",
    Excipient => "excipient",
});

str_enum!(AllergySeverity {
    High => "high",
    Moderate => "moderate",
    Low => "low",
});
