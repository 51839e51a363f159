use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::questions::AspectAnswer;
use crate::wizard::machine::ReviewWizard;

// ── Analysis result ─────────────────────────────────────────────────

/// The stored outcome of one wizard run; everything the results view is
/// later composed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub movie: String,
    pub genre: String,
    pub review: String,
    pub aspects: HashMap<u8, AspectAnswer>,
    pub sentiment: f64,
    pub emotions: Vec<String>,
}

/// The fixed emotion vocabulary. Every result carries all three, in a
/// random order.
pub static EMOTION_VOCABULARY: [&str; 3] = ["Joy", "Surprise", "Trust"];

// ── Synthesis ───────────────────────────────────────────────────────

pub fn synthesize(wizard: &ReviewWizard) -> AnalysisResult {
    synthesize_with_rng(wizard, &mut rand::thread_rng())
}

/// Build the result from the wizard's inputs. The sentiment score is a
/// placeholder draw, uniform in `[0.7, 1.0)` and so permanently biased
/// positive; it deliberately does not read the review text.
pub fn synthesize_with_rng<R: Rng>(wizard: &ReviewWizard, rng: &mut R) -> AnalysisResult {
    let sentiment = 0.7 + rng.gen::<f64>() * 0.3;

    let mut emotions: Vec<String> = EMOTION_VOCABULARY.iter().map(|e| e.to_string()).collect();
    emotions.shuffle(rng);

    AnalysisResult {
        movie: wizard.movie().title.to_string(),
        genre: wizard.genre().label().to_string(),
        review: wizard.review_text().to_string(),
        aspects: wizard.answers().clone(),
        sentiment,
        emotions,
    }
}

// ── Tests ───────────────────────────────────────────────────────────
