use crate::questionnaire::{AgeBracket, PrimaryConcern};
use crate::scoring::ScoreField;

/// A penalty applied once per observation when any of its keywords appears.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub field: ScoreField,
    pub penalty: f64,
}

impl KeywordRule {
    /// `observation` must already be lowercased.
    pub fn matches(&self, observation: &str) -> bool {
        self.keywords.iter().any(|keyword| observation.contains(keyword))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDelta {
    pub field: ScoreField,
    pub delta: f64,
}

const fn delta(field: ScoreField, delta: f64) -> ScoreDelta {
    ScoreDelta { field, delta }
}

pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["sèche", "déshydrat"],
        field: ScoreField::Hydration,
        penalty: 20.0,
    },
    KeywordRule {
        keywords: &["tiraillement", "squame"],
        field: ScoreField::Hydration,
        penalty: 15.0,
    },
    KeywordRule {
        keywords: &["gras", "brillant"],
        field: ScoreField::Sebum,
        penalty: 25.0,
    },
    KeywordRule {
        keywords: &["sébum", "luisant"],
        field: ScoreField::Sebum,
        penalty: 20.0,
    },
    KeywordRule {
        keywords: &["pores", "dilaté"],
        field: ScoreField::Texture,
        penalty: 18.0,
    },
    KeywordRule {
        keywords: &["rugue", "irrégulier"],
        field: ScoreField::Texture,
        penalty: 15.0,
    },
    KeywordRule {
        keywords: &["grain"],
        field: ScoreField::Texture,
        penalty: 12.0,
    },
    KeywordRule {
        keywords: &["tache", "pigment"],
        field: ScoreField::Tone,
        penalty: 22.0,
    },
    KeywordRule {
        keywords: &["rougeur", "couperose"],
        field: ScoreField::Tone,
        penalty: 18.0,
    },
    KeywordRule {
        keywords: &["cernes", "terne"],
        field: ScoreField::Tone,
        penalty: 15.0,
    },
    KeywordRule {
        keywords: &["sensib", "irritation"],
        field: ScoreField::Tolerance,
        penalty: 25.0,
    },
    KeywordRule {
        keywords: &["réact", "allergie"],
        field: ScoreField::Tolerance,
        penalty: 30.0,
    },
    KeywordRule {
        keywords: &["picotement", "brûlure"],
        field: ScoreField::Tolerance,
        penalty: 20.0,
    },
];

pub fn primary_concern_deltas(concern: PrimaryConcern) -> &'static [ScoreDelta] {
    const ACNE: &[ScoreDelta] = &[
        delta(ScoreField::Sebum, -15.0),
        delta(ScoreField::Texture, -10.0),
        delta(ScoreField::Tolerance, -10.0),
    ];
    const DRYNESS: &[ScoreDelta] = &[
        delta(ScoreField::Hydration, -20.0),
        delta(ScoreField::Tolerance, -8.0),
    ];
    const WRINKLES: &[ScoreDelta] = &[
        delta(ScoreField::Hydration, -12.0),
        delta(ScoreField::Texture, -15.0),
    ];
    const SPOTS: &[ScoreDelta] = &[delta(ScoreField::Tone, -20.0)];
    const SENSITIVITY: &[ScoreDelta] = &[
        delta(ScoreField::Tolerance, -20.0),
        delta(ScoreField::Hydration, -8.0),
    ];
    const ENLARGED_PORES: &[ScoreDelta] = &[
        delta(ScoreField::Texture, -18.0),
        delta(ScoreField::Sebum, -10.0),
    ];

    match concern {
        PrimaryConcern::Acne => ACNE,
        PrimaryConcern::Dryness => DRYNESS,
        PrimaryConcern::Wrinkles => WRINKLES,
        PrimaryConcern::Spots => SPOTS,
        PrimaryConcern::Sensitivity => SENSITIVITY,
        PrimaryConcern::EnlargedPores => ENLARGED_PORES,
        PrimaryConcern::Unknown => &[],
    }
}

pub fn age_deltas(age: AgeBracket) -> &'static [ScoreDelta] {
    // hormonal breakouts
    const YOUNG: &[ScoreDelta] = &[
        delta(ScoreField::Tolerance, -5.0),
        delta(ScoreField::Sebum, -10.0),
    ];
    const EARLY_AGING: &[ScoreDelta] = &[
        delta(ScoreField::Hydration, -8.0),
        delta(ScoreField::Texture, -5.0),
    ];
    const VISIBLE_AGING: &[ScoreDelta] = &[
        delta(ScoreField::Hydration, -15.0),
        delta(ScoreField::Texture, -12.0),
        delta(ScoreField::Tone, -8.0),
    ];

    match age {
        AgeBracket::Age16To25 => YOUNG,
        AgeBracket::Age26To35 => &[],
        AgeBracket::Age36To45 => EARLY_AGING,
        AgeBracket::Age46Plus => VISIBLE_AGING,
    }
}
