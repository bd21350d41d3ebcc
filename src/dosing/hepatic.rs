use crate::models::{Ascites, ChildPughClass, ChildPughInput, Encephalopathy};

use super::types::ChildPughResult;

fn bilirubin_points(bilirubin: f64) -> u8 {
    if bilirubin < 2.0 {
        1
    } else if bilirubin <= 3.0 {
        2
    } else {
        3
    }
}

fn albumin_points(albumin: f64) -> u8 {
    if albumin > 3.5 {
        1
    } else if albumin >= 2.8 {
        2
    } else {
        3
    }
}

fn inr_points(inr: f64) -> u8 {
    if inr < 1.7 {
        1
    } else if inr <= 2.3 {
        2
    } else {
        3
    }
}

fn ascites_points(ascites: Ascites) -> u8 {
    match ascites {
        Ascites::None => 1,
        Ascites::Mild => 2,
        Ascites::Moderate => 3,
    }
}

fn encephalopathy_points(encephalopathy: Encephalopathy) -> u8 {
    match encephalopathy {
        Encephalopathy::None => 1,
        Encephalopathy::Grade1To2 => 2,
        Encephalopathy::Grade3To4 => 3,
    }
}

/// Map a total score (5–15) to its class.
pub fn child_pugh_class(score: u8) -> ChildPughClass {
    match score {
        0..=6 => ChildPughClass::A,
        7..=9 => ChildPughClass::B,
        _ => ChildPughClass::C,
    }
}

/// Child-Pugh score and class. Each of the five components scores 1–3 points.
pub fn child_pugh(input: &ChildPughInput) -> ChildPughResult {
    let score = bilirubin_points(input.bilirubin)
        + albumin_points(input.albumin)
        + inr_points(input.inr)
        + ascites_points(input.ascites)
        + encephalopathy_points(input.encephalopathy);
    let class = child_pugh_class(score);

    ChildPughResult {
        child_pugh_score: score,
        child_pugh_class: class,
        hepatic_adjustment_required: class != ChildPughClass::A,
    }
}
