use skin_advisor::scoring::{score_insights, score_label, ScoreLabel};
use skin_advisor::{compute_scores, AgeBracket, PrimaryConcern, ScoreInput, SkinScores};

fn reference_input() -> ScoreInput {
    ScoreInput {
        concerns: vec![
            "Pores dilatés visibles".to_string(),
            "Légère irritation".to_string(),
        ],
        primary_concern: Some(PrimaryConcern::Acne),
        age: AgeBracket::Age16To25,
        sensitivities: Vec::new(),
        is_conservative: false,
        confidence: 0.8,
    }
}

#[test]
fn reference_profile_scores_are_pinned() {
    let scores = compute_scores(&reference_input());
    assert_eq!(
        scores,
        SkinScores {
            hydration: 75,
            sebum: 50,
            texture: 47,
            tone: 75,
            tolerance: 35,
        }
    );
}

#[test]
fn empty_input_is_baseline() {
    let scores = compute_scores(&ScoreInput::default());
    assert_eq!(scores.entries().map(|(_, score)| score), [75; 5]);
}

#[test]
fn conservative_baseline_is_higher_on_every_field() {
    for age in [
        AgeBracket::Age16To25,
        AgeBracket::Age26To35,
        AgeBracket::Age36To45,
        AgeBracket::Age46Plus,
    ] {
        let standard = compute_scores(&ScoreInput {
            age,
            ..ScoreInput::default()
        });
        let conservative = compute_scores(&ScoreInput {
            age,
            is_conservative: true,
            ..ScoreInput::default()
        });
        for ((field, low), (_, high)) in standard.entries().iter().zip(conservative.entries().iter()) {
            assert!(high > low, "{:?} not higher for {:?}", field, age);
        }
    }
}

#[test]
fn each_rule_fires_once_per_observation() {
    let scores = compute_scores(&ScoreInput {
        concerns: vec!["Pores dilatés et pores obstrués".to_string()],
        ..ScoreInput::default()
    });
    assert_eq!(scores.texture, 57);

    let scores = compute_scores(&ScoreInput {
        concerns: vec!["Pores visibles".to_string(), "Pores dilatés".to_string()],
        ..ScoreInput::default()
    });
    assert_eq!(scores.texture, 39);
}

#[test]
fn keyword_match_ignores_case() {
    let scores = compute_scores(&ScoreInput {
        concerns: vec!["PEAU TRÈS GRASSE".to_string()],
        ..ScoreInput::default()
    });
    assert_eq!(scores.sebum, 50);
}

#[test]
fn sensitivities_only_count_above_two() {
    let two = compute_scores(&ScoreInput {
        sensitivities: vec!["Parfums".to_string(), "Alcool".to_string()],
        ..ScoreInput::default()
    });
    assert_eq!(two.tolerance, 75);

    let three = compute_scores(&ScoreInput {
        sensitivities: vec![
            "Parfums".to_string(),
            "Alcool".to_string(),
            "Rétinol".to_string(),
        ],
        ..ScoreInput::default()
    });
    assert_eq!(three.tolerance, 60);
}

#[test]
fn scores_are_clamped_to_zero() {
    let concerns = vec![
        "Peau sèche et déshydratée avec tiraillements".to_string(),
        "Très sensible, réactive, picotements".to_string(),
        "Zone grasse, sébum luisant".to_string(),
    ];
    let scores = compute_scores(&ScoreInput {
        concerns: concerns.iter().cycle().take(9).cloned().collect(),
        primary_concern: Some(PrimaryConcern::Sensitivity),
        age: AgeBracket::Age46Plus,
        ..ScoreInput::default()
    });
    assert_eq!(scores.hydration, 0);
    assert_eq!(scores.tolerance, 0);
    assert_eq!(scores.sebum, 0);
    assert!(scores.entries().iter().all(|(_, score)| *score <= 100));
}

#[test]
fn low_confidence_respects_floors() {
    let concerns = vec![
        "Peau sèche, tiraillements".to_string(),
        "Brillance, sébum".to_string(),
        "Pores dilatés, grain irrégulier".to_string(),
        "Taches pigmentaires, rougeurs, teint terne".to_string(),
        "Irritation, réactions, brûlures".to_string(),
    ];
    let scores = compute_scores(&ScoreInput {
        concerns,
        primary_concern: Some(PrimaryConcern::Acne),
        age: AgeBracket::Age46Plus,
        confidence: 0.1,
        ..ScoreInput::default()
    });
    assert_eq!(scores.hydration, 50);
    assert_eq!(scores.sebum, 50);
    assert_eq!(scores.texture, 50);
    assert_eq!(scores.tone, 50);
    assert_eq!(scores.tolerance, 40);
}

#[test]
fn low_confidence_pulls_down_healthy_scores() {
    let scores = compute_scores(&ScoreInput {
        confidence: 0.0,
        ..ScoreInput::default()
    });
    assert_eq!(scores.entries().map(|(_, score)| score), [63; 5]);

    let at_threshold = compute_scores(&ScoreInput {
        confidence: 0.6,
        ..ScoreInput::default()
    });
    assert_eq!(at_threshold.entries().map(|(_, score)| score), [75; 5]);
}

#[test]
fn unknown_primary_concern_adds_no_deltas() {
    let scores = compute_scores(&ScoreInput {
        primary_concern: Some(PrimaryConcern::Unknown),
        ..ScoreInput::default()
    });
    assert_eq!(scores, compute_scores(&ScoreInput::default()));
}

#[test]
fn labels_follow_thresholds() {
    assert_eq!(score_label(80), ScoreLabel::Excellent);
    assert_eq!(score_label(79), ScoreLabel::Good);
    assert_eq!(score_label(60), ScoreLabel::Good);
    assert_eq!(score_label(40), ScoreLabel::Average);
    assert_eq!(score_label(39), ScoreLabel::Weak);
    assert_eq!(ScoreLabel::Good.label(), "Bon");
}

#[test]
fn insights_for_reference_profile() {
    let scores = compute_scores(&reference_input());
    let insights = score_insights(&scores);
    assert_eq!(
        insights.strengths,
        vec![
            "Excellente hydratation naturelle".to_string(),
            "Teint uniforme et lumineux".to_string(),
        ]
    );
    assert_eq!(
        insights.improvements,
        vec![
            "Mieux contrôler la production de sébum".to_string(),
            "Améliorer la texture et resserrer les pores".to_string(),
        ]
    );
    assert_eq!(insights.priority, "Apaiser et renforcer la barrière cutanée");
}

#[test]
fn insight_priority_ties_resolve_to_last_field() {
    let scores = SkinScores {
        hydration: 40,
        sebum: 80,
        texture: 80,
        tone: 80,
        tolerance: 40,
    };
    let insights = score_insights(&scores);
    assert_eq!(insights.priority, "Apaiser et renforcer la barrière cutanée");
    assert_eq!(insights.strengths.len(), 2);
    assert_eq!(insights.improvements.len(), 2);
}
