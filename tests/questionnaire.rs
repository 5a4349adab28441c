use skin_advisor::questionnaire::{BudgetBracket, RoutineComplexity};
use skin_advisor::{scan_id, AgeBracket, PrimaryConcern, QuestionnaireAnswers};

#[test]
fn age_brackets_parse_and_fall_back() {
    assert_eq!(AgeBracket::from_str("16-25"), Some(AgeBracket::Age16To25));
    assert_eq!(AgeBracket::from_str(" 46+ "), Some(AgeBracket::Age46Plus));
    assert_eq!(AgeBracket::from_str("12-15"), None);
    assert_eq!(AgeBracket::parse_or_default(""), AgeBracket::Age26To35);
    assert_eq!(AgeBracket::Age36To45.representative_age(), 40);
}

#[test]
fn primary_concern_labels_round_trip() {
    for concern in [
        PrimaryConcern::Acne,
        PrimaryConcern::Wrinkles,
        PrimaryConcern::Spots,
        PrimaryConcern::Dryness,
        PrimaryConcern::Sensitivity,
        PrimaryConcern::EnlargedPores,
        PrimaryConcern::Unknown,
    ] {
        assert_eq!(PrimaryConcern::from_str(concern.label()), Some(concern));
    }
    assert_eq!(PrimaryConcern::from_str(""), None);
}

#[test]
fn budget_and_complexity_labels_round_trip() {
    for budget in [
        BudgetBracket::Under30,
        BudgetBracket::From30To60,
        BudgetBracket::From60To100,
        BudgetBracket::Over100,
    ] {
        assert_eq!(BudgetBracket::from_str(budget.label()), Some(budget));
    }
    assert_eq!(
        RoutineComplexity::from_str(RoutineComplexity::Complete.label()),
        Some(RoutineComplexity::Complete)
    );
    assert_eq!(RoutineComplexity::from_str("Simple"), Some(RoutineComplexity::Simple));
}

#[test]
fn only_unknown_concern_is_conservative() {
    let mut answers = QuestionnaireAnswers::default();
    assert!(!answers.is_conservative());
    answers.main_concern = Some(PrimaryConcern::Unknown);
    assert!(answers.is_conservative());
    answers.main_concern = Some(PrimaryConcern::Acne);
    assert!(!answers.is_conservative());
}

#[test]
fn scan_id_is_stable_per_request() {
    let answers = QuestionnaireAnswers::default();
    let images = vec!["data:image/png;base64,AAAA".to_string()];
    let first = scan_id(&images, &answers);
    assert_eq!(first, scan_id(&images, &answers));
    assert!(first.starts_with("scan_"));
    assert_eq!(first.len(), "scan_".len() + 16);

    let other = vec!["data:image/png;base64,BBBB".to_string()];
    assert_ne!(first, scan_id(&other, &answers));
}
