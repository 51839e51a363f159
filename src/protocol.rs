use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::questions::AspectAnswer;
use crate::wizard::step::WizardStep;

// ── Navigation ─────────────────────────────────────────────────────

/// The four client routes the server can navigate to. Anything else the
/// client might ask for collapses to `Login` on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Login,
    Dashboard,
    Analysis,
    Visualizations,
}

// ── Users ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

// ── Wizard view ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieView {
    pub title: String,
    pub year: String,
    pub duration: String,
    pub poster: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: u8,
    pub prompt: String,
}

/// Full wizard state as the client renders it, rebuilt after every
/// wizard command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub step_number: u8,
    pub total_steps: u8,
    pub genre: String,
    pub genres: Vec<String>,
    pub movie: Option<MovieView>,
    pub review_text: String,
    pub answers: HashMap<u8, AspectAnswer>,
    pub questions: Vec<QuestionView>,
}

// ── Results view ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectScoreView {
    pub category: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarView {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordBubbleView {
    pub x: u32,
    pub y: u32,
    pub r: u32,
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudGroupView {
    pub label: String,
    pub bubbles: Vec<WordBubbleView>,
}

/// Sentiment polarity of a highlighted review segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSegmentView {
    pub text: String,
    pub polarity: Option<Polarity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationView {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster: String,
}

/// Everything the visualizations page shows, composed server-side from
/// one stored analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsView {
    pub movie: String,
    pub genre: String,
    pub sentiment: f64,
    pub sentiment_percent: u32,
    pub sentiment_label: String,
    pub emotions: Vec<String>,
    pub aspect_scores: Vec<AspectScoreView>,
    pub radar: RadarView,
    pub word_cloud: Vec<WordCloudGroupView>,
    pub review_segments: Vec<ReviewSegmentView>,
    pub recommendations: Vec<RecommendationView>,
}

// ── Client → Server commands ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientCommand {
    Login {
        email: String,
        password: String,
    },
    Register {
        name: Option<String>,
        email: String,
        password: String,
    },

    // Wizard lifecycle
    StartAnalysis,
    SelectGenre { genre: String },
    SetReviewText { text: String },
    SubmitReview,
    AnswerAspect { question_id: u8, answer: AspectAnswer },
    SubmitAspects,
    GoBackToReview,

    // Results and navigation
    OpenResults,
    GoToDashboard,
}

// ── Server → Client messages ───────────────────────────────────────

/// Server-to-client message wrapper. All traffic to the client is one of
/// these variants so it can dispatch on the outer name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Login or registration accepted.
    Authenticated { user: UserProfile },
    /// Login or registration rejected, with the form error to show.
    AuthFailed { message: String },
    /// Route change the client should follow.
    Navigate { route: Route },
    /// Wizard state after a wizard command was applied.
    Wizard { snapshot: WizardSnapshot },
    /// A guarded wizard transition was blocked; state is unchanged.
    ValidationFailed { message: String },
    /// One processing tick's status line.
    ProcessingStatus { message: String, progress_percent: f64 },
    /// The composed visualizations payload.
    Results { view: ResultsView },
}
