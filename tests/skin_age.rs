use skin_advisor::{
    compute_scores, estimate_skin_age, AgeBracket, PrimaryConcern, ScoreInput, SkinScores,
};

const BRACKETS: [AgeBracket; 4] = [
    AgeBracket::Age16To25,
    AgeBracket::Age26To35,
    AgeBracket::Age36To45,
    AgeBracket::Age46Plus,
];

fn uniform(score: u8) -> SkinScores {
    SkinScores {
        hydration: score,
        sebum: score,
        texture: score,
        tone: score,
        tolerance: score,
    }
}

#[test]
fn reference_profile_skin_age() {
    let input = ScoreInput {
        concerns: vec![
            "Pores dilatés visibles".to_string(),
            "Légère irritation".to_string(),
        ],
        primary_concern: Some(PrimaryConcern::Acne),
        age: AgeBracket::Age16To25,
        sensitivities: Vec::new(),
        is_conservative: false,
        confidence: 0.8,
    };
    let scores = compute_scores(&input);
    assert_eq!(estimate_skin_age(&scores, AgeBracket::Age16To25, 0.8), 24);
}

#[test]
fn estimate_stays_within_three_years() {
    let profiles = [
        uniform(0),
        uniform(30),
        uniform(50),
        uniform(70),
        uniform(100),
        SkinScores {
            hydration: 95,
            sebum: 20,
            texture: 10,
            tone: 10,
            tolerance: 99,
        },
    ];
    for age in BRACKETS {
        let base = age.representative_age();
        for scores in &profiles {
            for confidence in [0.0, 0.3, 0.59, 0.6, 1.0] {
                let estimate = estimate_skin_age(scores, age, confidence);
                assert!(
                    (estimate - base).abs() <= 3,
                    "{} out of range for {:?}",
                    estimate,
                    age
                );
            }
        }
    }
}

#[test]
fn healthy_skin_reads_younger() {
    let scores = SkinScores {
        hydration: 90,
        sebum: 90,
        texture: 90,
        tone: 90,
        tolerance: 95,
    };
    assert_eq!(estimate_skin_age(&scores, AgeBracket::Age26To35, 1.0), 27);
}

#[test]
fn low_confidence_halves_large_deviation() {
    let scores = SkinScores {
        hydration: 90,
        sebum: 90,
        texture: 90,
        tone: 90,
        tolerance: 95,
    };
    let base = AgeBracket::Age26To35.representative_age();
    let confident = estimate_skin_age(&scores, AgeBracket::Age26To35, 1.0);
    let hesitant = estimate_skin_age(&scores, AgeBracket::Age26To35, 0.5);
    assert_eq!(hesitant, 28);
    assert!((hesitant - base).abs() < (confident - base).abs());
}

#[test]
fn damaged_skin_reads_older() {
    assert_eq!(estimate_skin_age(&uniform(40), AgeBracket::Age36To45, 1.0), 43);
    assert_eq!(estimate_skin_age(&uniform(50), AgeBracket::Age36To45, 1.0), 42);
    assert_eq!(estimate_skin_age(&uniform(50), AgeBracket::Age36To45, 0.4), 41);
}

#[test]
fn average_skin_keeps_bracket_age() {
    assert_eq!(estimate_skin_age(&uniform(65), AgeBracket::Age46Plus, 1.0), 50);
}
