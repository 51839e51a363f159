use serde::{Deserialize, Serialize};

// ── Wizard steps ────────────────────────────────────────────────────

/// The four steps of the review wizard, in the only order they can run.
/// `Processing` is transient and advances on its own once the ticker
/// drives it to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    MovieReview,
    AspectAnalysis,
    Processing,
    Results,
}

/// Total number of steps shown in the progress indicator.
pub const TOTAL_STEPS: u8 = 4;

impl WizardStep {
    /// 1-based position for the step indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::MovieReview => 1,
            Self::AspectAnalysis => 2,
            Self::Processing => 3,
            Self::Results => 4,
        }
    }

    /// Human-readable label for the step indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::MovieReview => "Movie Review",
            Self::AspectAnalysis => "Aspect Analysis",
            Self::Processing => "Processing",
            Self::Results => "Results",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
