use thiserror::Error;

use crate::wizard::step::WizardStep;

// ── Wizard errors ───────────────────────────────────────────────────

/// A blocked wizard transition. The `Display` string is the user-visible
/// reason surfaced by the client; the wizard state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The review text is empty after trimming.
    #[error("empty review")]
    EmptyReview,

    /// Not all catalog questions have an answer yet.
    #[error("incomplete answers")]
    IncompleteAnswers { answered: usize, total: usize },

    /// The question id is not part of the fixed catalog.
    #[error("question {0} is not in the catalog")]
    UnknownQuestion(u8),

    /// The operation does not apply to the wizard's current step.
    #[error("not available in the {0} step")]
    UnavailableInStep(WizardStep),
}

// ── Auth errors ─────────────────────────────────────────────────────

/// Login/register rejection, surfaced inline on the login form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please enter both email and password")]
    MissingCredentials,
}

// ── Transient store errors ──────────────────────────────────────────

/// Encode/decode failure on a transient-store value. Never fatal: callers
/// log it and fall through to the absent-value path.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
