use crate::questionnaire::{AgeBracket, PrimaryConcern};
use crate::scoring::rules::{age_deltas, primary_concern_deltas, ScoreDelta, KEYWORD_RULES};
use crate::scoring::{ScoreField, SkinScores};

const CONSERVATIVE_BASELINE: [f64; 5] = [85.0, 88.0, 87.0, 92.0, 95.0];
const STANDARD_BASELINE: f64 = 75.0;
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;
const LOW_CONFIDENCE_SCALE: f64 = 20.0;
const LOW_CONFIDENCE_FLOOR: f64 = 50.0;
const LOW_CONFIDENCE_TOLERANCE_FLOOR: f64 = 40.0;
const SENSITIVITY_COUNT_THRESHOLD: usize = 2;
const PENALTY_PER_SENSITIVITY: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct ScoreInput {
    pub concerns: Vec<String>,
    pub primary_concern: Option<PrimaryConcern>,
    pub age: AgeBracket,
    pub sensitivities: Vec<String>,
    pub is_conservative: bool,
    pub confidence: f64,
}

impl Default for ScoreInput {
    fn default() -> Self {
        Self {
            concerns: Vec::new(),
            primary_concern: None,
            age: AgeBracket::default(),
            sensitivities: Vec::new(),
            is_conservative: false,
            confidence: 1.0,
        }
    }
}

/// Unclamped working values, kept as floats until the final rounding step.
#[derive(Debug, Clone, Copy)]
struct RawScores([f64; 5]);

impl RawScores {
    fn baseline(is_conservative: bool) -> Self {
        if is_conservative {
            RawScores(CONSERVATIVE_BASELINE)
        } else {
            RawScores([STANDARD_BASELINE; 5])
        }
    }

    fn slot(field: ScoreField) -> usize {
        match field {
            ScoreField::Hydration => 0,
            ScoreField::Sebum => 1,
            ScoreField::Texture => 2,
            ScoreField::Tone => 3,
            ScoreField::Tolerance => 4,
        }
    }

    fn add(&mut self, field: ScoreField, delta: f64) {
        self.0[Self::slot(field)] += delta;
    }

    fn apply(&mut self, deltas: &[ScoreDelta]) {
        for delta in deltas {
            self.add(delta.field, delta.delta);
        }
    }

    fn pull_toward_floor(&mut self, penalty: f64) {
        for field in ScoreField::ALL {
            let floor = if field == ScoreField::Tolerance {
                LOW_CONFIDENCE_TOLERANCE_FLOOR
            } else {
                LOW_CONFIDENCE_FLOOR
            };
            let slot = Self::slot(field);
            self.0[slot] = (self.0[slot] - penalty).max(floor);
        }
    }

    fn finish(self) -> SkinScores {
        let [hydration, sebum, texture, tone, tolerance] = self.0.map(to_score);
        SkinScores {
            hydration,
            sebum,
            texture,
            tone,
            tolerance,
        }
    }
}

pub fn compute_scores(input: &ScoreInput) -> SkinScores {
    let mut raw = RawScores::baseline(input.is_conservative);

    for concern in &input.concerns {
        let observation = concern.to_lowercase();
        for rule in KEYWORD_RULES {
            if rule.matches(&observation) {
                raw.add(rule.field, -rule.penalty);
            }
        }
    }

    if let Some(primary) = input.primary_concern {
        raw.apply(primary_concern_deltas(primary));
    }
    raw.apply(age_deltas(input.age));

    let sensitivity_count = input.sensitivities.len();
    if sensitivity_count > SENSITIVITY_COUNT_THRESHOLD {
        raw.add(
            ScoreField::Tolerance,
            -(sensitivity_count as f64) * PENALTY_PER_SENSITIVITY,
        );
    }

    if input.confidence < LOW_CONFIDENCE_THRESHOLD {
        let penalty = (LOW_CONFIDENCE_THRESHOLD - input.confidence) * LOW_CONFIDENCE_SCALE;
        raw.pull_toward_floor(penalty);
    }

    raw.finish()
}

pub(crate) fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
