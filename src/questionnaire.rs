use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "16-25")]
    Age16To25,
    #[default]
    #[serde(rename = "26-35")]
    Age26To35,
    #[serde(rename = "36-45")]
    Age36To45,
    #[serde(rename = "46+")]
    Age46Plus,
}

impl AgeBracket {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "16-25" => Some(AgeBracket::Age16To25),
            "26-35" => Some(AgeBracket::Age26To35),
            "36-45" => Some(AgeBracket::Age36To45),
            "46+" | "46-plus" | "46 plus" => Some(AgeBracket::Age46Plus),
            _ => None,
        }
    }

    /// Unknown or missing brackets are treated as 26-35.
    pub fn parse_or_default(value: &str) -> Self {
        Self::from_str(value).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Age16To25 => "16-25",
            AgeBracket::Age26To35 => "26-35",
            AgeBracket::Age36To45 => "36-45",
            AgeBracket::Age46Plus => "46+",
        }
    }

    pub fn representative_age(self) -> i32 {
        match self {
            AgeBracket::Age16To25 => 21,
            AgeBracket::Age26To35 => 30,
            AgeBracket::Age36To45 => 40,
            AgeBracket::Age46Plus => 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryConcern {
    Acne,
    Wrinkles,
    Spots,
    Dryness,
    Sensitivity,
    EnlargedPores,
    Unknown,
}

impl PrimaryConcern {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "acné" | "acne" => Some(PrimaryConcern::Acne),
            "rides" | "wrinkles" => Some(PrimaryConcern::Wrinkles),
            "taches" | "spots" | "dark spots" => Some(PrimaryConcern::Spots),
            "sécheresse" | "secheresse" | "dryness" => Some(PrimaryConcern::Dryness),
            "sensibilité" | "sensibilite" | "sensitivity" => Some(PrimaryConcern::Sensitivity),
            "pores dilatés" | "pores dilates" | "enlarged pores" => {
                Some(PrimaryConcern::EnlargedPores)
            }
            "je ne sais pas" | "unknown" => Some(PrimaryConcern::Unknown),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrimaryConcern::Acne => "Acné",
            PrimaryConcern::Wrinkles => "Rides",
            PrimaryConcern::Spots => "Taches",
            PrimaryConcern::Dryness => "Sécheresse",
            PrimaryConcern::Sensitivity => "Sensibilité",
            PrimaryConcern::EnlargedPores => "Pores dilatés",
            PrimaryConcern::Unknown => "Je ne sais pas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBracket {
    Under30,
    From30To60,
    From60To100,
    Over100,
}

impl BudgetBracket {
    pub fn from_str(value: &str) -> Option<Self> {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '€')
            .collect();
        match compact.as_str() {
            "<30" | "low" => Some(BudgetBracket::Under30),
            "30-60" | "medium" => Some(BudgetBracket::From30To60),
            "60-100" | "high" => Some(BudgetBracket::From60To100),
            "100+" | "premium" => Some(BudgetBracket::Over100),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetBracket::Under30 => "< 30€",
            BudgetBracket::From30To60 => "30-60€",
            BudgetBracket::From60To100 => "60-100€",
            BudgetBracket::Over100 => "100€+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineComplexity {
    Simple,
    Complete,
}

impl RoutineComplexity {
    pub fn from_str(value: &str) -> Option<Self> {
        let lower = value.trim().to_lowercase();
        if lower.starts_with("simple") {
            Some(RoutineComplexity::Simple)
        } else if lower.starts_with("complète") || lower.starts_with("complete") {
            Some(RoutineComplexity::Complete)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoutineComplexity::Simple => "Simple (2-3 produits)",
            RoutineComplexity::Complete => "Complète (5+ étapes)",
        }
    }
}

/// Answers as submitted by the questionnaire form. Never mutated once built.
#[derive(Debug, Clone)]
pub struct QuestionnaireAnswers {
    pub age: AgeBracket,
    pub sensitivities: Vec<String>,
    pub current_routine: String,
    /// `None` when the question was skipped or the label is not recognised.
    pub main_concern: Option<PrimaryConcern>,
    pub budget: Option<BudgetBracket>,
    pub routine_complexity: Option<RoutineComplexity>,
    pub free_text: Option<String>,
}

impl Default for QuestionnaireAnswers {
    fn default() -> Self {
        Self {
            age: AgeBracket::default(),
            sensitivities: Vec::new(),
            current_routine: String::new(),
            main_concern: None,
            budget: None,
            routine_complexity: None,
            free_text: None,
        }
    }
}

impl QuestionnaireAnswers {
    /// Conservative scoring is used when the user could not name a primary concern.
    pub fn is_conservative(&self) -> bool {
        matches!(self.main_concern, Some(PrimaryConcern::Unknown))
    }
}
