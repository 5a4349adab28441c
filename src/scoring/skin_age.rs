use crate::questionnaire::AgeBracket;
use crate::scoring::SkinScores;

const MAX_DEVIATION: i32 = 3;

/// Skin age in years, never more than three years away from the bracket's
/// representative age. Low-confidence diagnoses stay closer to that age.
pub fn estimate_skin_age(scores: &SkinScores, age: AgeBracket, confidence: f64) -> i32 {
    let base_age = age.representative_age() as f64;
    let mut skin_age = base_age + mean_band_delta(scores.mean());

    if scores.texture < 50 {
        skin_age += 1.0;
    }
    if scores.tone < 50 {
        skin_age += 1.0;
    }
    if scores.hydration > 85 {
        skin_age -= 1.0;
    }
    if scores.tolerance > 90 {
        skin_age -= 1.0;
    }

    if confidence < 0.6 {
        skin_age = base_age + (skin_age - base_age) * 0.5;
    }

    clamp_skin_age(skin_age.round() as i32, age)
}

/// Pulls any skin age back within three years of the bracket's representative age.
pub fn clamp_skin_age(skin_age: i32, age: AgeBracket) -> i32 {
    let base = age.representative_age();
    skin_age.clamp(base - MAX_DEVIATION, base + MAX_DEVIATION)
}

fn mean_band_delta(mean: f64) -> f64 {
    if mean >= 85.0 {
        -3.0
    } else if mean >= 75.0 {
        -1.0
    } else if mean >= 60.0 {
        0.0
    } else if mean >= 45.0 {
        2.0
    } else {
        3.0
    }
}
