use serde::{Deserialize, Serialize};

// ── Aspect questions ────────────────────────────────────────────────

/// A fixed catalog question shown during the aspect-analysis step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectQuestion {
    pub id: u8,
    pub prompt: &'static str,
}

/// How many questions the user must answer before submitting.
pub const QUESTION_COUNT: usize = 10;

/// The full question catalog, ids 1..=10.
pub static ASPECT_QUESTIONS: &[AspectQuestion] = &[
    AspectQuestion { id: 1, prompt: "Did you enjoy the Acting performance?" },
    AspectQuestion { id: 2, prompt: "Did you enjoy the Plot coherence?" },
    AspectQuestion { id: 3, prompt: "Did you enjoy the Visual effects?" },
    AspectQuestion { id: 4, prompt: "Did you enjoy the Soundtrack/Music?" },
    AspectQuestion { id: 5, prompt: "Did you enjoy the Character development?" },
    AspectQuestion { id: 6, prompt: "Did you enjoy the Dialogue quality?" },
    AspectQuestion { id: 7, prompt: "Did you enjoy the Cinematography?" },
    AspectQuestion { id: 8, prompt: "Did you enjoy the Pacing?" },
    AspectQuestion { id: 9, prompt: "Did you enjoy the Story originality?" },
    AspectQuestion { id: 10, prompt: "Did you enjoy the Direction?" },
];

/// Looks up a catalog question by id.
pub fn question(id: u8) -> Option<&'static AspectQuestion> {
    ASPECT_QUESTIONS.iter().find(|q| q.id == id)
}

/// `true` if the id belongs to the fixed catalog.
pub fn is_valid_question(id: u8) -> bool {
    question(id).is_some()
}

// ── Answers ─────────────────────────────────────────────────────────

/// A user's answer to one aspect question. Serialized lowercase to match
/// what the client renders on the three answer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectAnswer {
    Yes,
    Maybe,
    No,
}

impl AspectAnswer {
    /// Contribution toward the mapped category's aspect score.
    pub fn score_weight(self) -> f64 {
        match self {
            AspectAnswer::Yes => 20.0,
            AspectAnswer::Maybe => 10.0,
            AspectAnswer::No => 0.0,
        }
    }
}

// ── Display categories ──────────────────────────────────────────────

/// One of the five coarse dimensions the results view scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectCategory {
    Acting,
    Visuals,
    Plot,
    Pacing,
    Soundtrack,
}

impl AspectCategory {
    /// Display order used by the results view.
    pub const ALL: [AspectCategory; 5] = [
        AspectCategory::Acting,
        AspectCategory::Visuals,
        AspectCategory::Plot,
        AspectCategory::Pacing,
        AspectCategory::Soundtrack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AspectCategory::Acting => "Acting",
            AspectCategory::Visuals => "Visuals",
            AspectCategory::Plot => "Plot",
            AspectCategory::Pacing => "Pacing",
            AspectCategory::Soundtrack => "Soundtrack",
        }
    }
}

/// The fixed question→category mapping used for aspect scoring.
pub fn category_for(question_id: u8) -> Option<AspectCategory> {
    match question_id {
        1 | 5 => Some(AspectCategory::Acting),
        2 | 6 | 9 => Some(AspectCategory::Plot),
        3 | 7 => Some(AspectCategory::Visuals),
        4 => Some(AspectCategory::Soundtrack),
        8 | 10 => Some(AspectCategory::Pacing),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────
