use std::collections::HashMap;

use tracing::{info, warn};

use crate::analysis::synthesizer::{self, AnalysisResult};
use crate::catalog::movies::{self, Genre, Movie};
use crate::catalog::questions::{self, AspectAnswer, QUESTION_COUNT};
use crate::error::WizardError;
use crate::protocol::{MovieView, QuestionView, WizardSnapshot};
use crate::wizard::processing::{ProcessingAdvance, ProcessingPhase};
use crate::wizard::step::{WizardStep, TOTAL_STEPS};

// ── Tick outcome ────────────────────────────────────────────────────

/// What one timer tick did to the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The wizard was not processing; stale ticks land here and are
    /// dropped without touching state.
    Ignored,
    /// The next status update to show.
    Status {
        message: &'static str,
        progress_percent: f64,
    },
    /// Playback finished; the result was synthesized and the wizard sits
    /// at the results step.
    Complete(AnalysisResult),
}

// ── Review wizard ───────────────────────────────────────────────────

/// One user's pass through the review flow. Steps advance strictly
/// forward (except the explicit back edge from aspects to review) and
/// only when the current step's guard passes.
pub struct ReviewWizard {
    step: WizardStep,
    genre: Genre,
    movie: Movie,
    review_text: String,
    answers: HashMap<u8, AspectAnswer>,
    processing: Option<ProcessingPhase>,
}

impl ReviewWizard {
    /// Fresh wizard at the first step, with the default genre and a
    /// movie already rolled from its bank.
    pub fn new() -> Self {
        let genre = Genre::DEFAULT;
        Self {
            step: WizardStep::MovieReview,
            genre,
            movie: movies::random_movie(genre),
            review_text: String::new(),
            answers: HashMap::new(),
            processing: None,
        }
    }

    // ── Step 1: movie & review ───────────────────────────────────────

    /// Switch genre and roll a new movie from its bank. Unknown genre
    /// labels and calls outside the first step are ignored.
    pub fn select_genre(&mut self, label: &str) {
        if self.step != WizardStep::MovieReview {
            warn!("Genre change ignored in the {} step", self.step);
            return;
        }
        let Some(genre) = Genre::parse(label) else {
            warn!("Ignoring unknown genre '{}'", label);
            return;
        };
        self.genre = genre;
        self.movie = movies::random_movie(genre);
        info!("Genre set to {}, picked '{}'", genre, self.movie.title);
    }

    /// Replace the review text. No validation; emptiness is only checked
    /// on submit. Edits outside the first step are ignored.
    pub fn set_review_text(&mut self, text: String) {
        if self.step != WizardStep::MovieReview {
            warn!("Review edit ignored in the {} step", self.step);
            return;
        }
        self.review_text = text;
    }

    pub fn submit_review(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::MovieReview {
            return Err(WizardError::UnavailableInStep(self.step));
        }
        if self.review_text.trim().is_empty() {
            return Err(WizardError::EmptyReview);
        }
        self.step = WizardStep::AspectAnalysis;
        Ok(())
    }

    // ── Step 2: aspect questions ─────────────────────────────────────

    /// Record (or overwrite) the answer to one catalog question.
    pub fn answer_aspect(
        &mut self,
        question_id: u8,
        answer: AspectAnswer,
    ) -> Result<(), WizardError> {
        if self.step != WizardStep::AspectAnalysis {
            return Err(WizardError::UnavailableInStep(self.step));
        }
        if !questions::is_valid_question(question_id) {
            return Err(WizardError::UnknownQuestion(question_id));
        }
        self.answers.insert(question_id, answer);
        Ok(())
    }

    pub fn submit_aspects(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::AspectAnalysis {
            return Err(WizardError::UnavailableInStep(self.step));
        }
        let answered = self.answers.len();
        if answered < QUESTION_COUNT {
            return Err(WizardError::IncompleteAnswers {
                answered,
                total: QUESTION_COUNT,
            });
        }
        self.step = WizardStep::Processing;
        self.processing = Some(ProcessingPhase::new());
        info!("Aspects submitted, processing '{}'", self.movie.title);
        Ok(())
    }

    /// Back edge to the review step. Answers already given stay put so
    /// returning does not cost the user their progress.
    pub fn go_back_to_review(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::AspectAnalysis {
            return Err(WizardError::UnavailableInStep(self.step));
        }
        self.step = WizardStep::MovieReview;
        Ok(())
    }

    // ── Step 3: processing ───────────────────────────────────────────

    /// Apply one timer tick. Drives the status playback while processing
    /// and synthesizes the result once it finishes; any tick that arrives
    /// outside the processing step is reported as `Ignored`.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(phase) = self.processing.as_mut() else {
            return TickOutcome::Ignored;
        };
        match phase.advance() {
            ProcessingAdvance::Status {
                message,
                progress_percent,
            } => TickOutcome::Status {
                message,
                progress_percent,
            },
            ProcessingAdvance::Finished => {
                let result = synthesizer::synthesize(self);
                self.processing = None;
                self.step = WizardStep::Results;
                info!(
                    "Analysis complete for '{}' (sentiment {:.2})",
                    result.movie, result.sentiment
                );
                TickOutcome::Complete(result)
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn movie(&self) -> Movie {
        self.movie
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    pub fn answers(&self) -> &HashMap<u8, AspectAnswer> {
        &self.answers
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    /// The full wizard view the client renders.
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.step,
            step_number: self.step.number(),
            total_steps: TOTAL_STEPS,
            genre: self.genre.label().to_string(),
            genres: Genre::ALL.iter().map(|g| g.label().to_string()).collect(),
            movie: Some(MovieView {
                title: self.movie.title.to_string(),
                year: self.movie.year.to_string(),
                duration: self.movie.duration.to_string(),
                poster: self.movie.poster.to_string(),
            }),
            review_text: self.review_text.clone(),
            answers: self.answers.clone(),
            questions: questions::ASPECT_QUESTIONS
                .iter()
                .map(|q| QuestionView {
                    id: q.id,
                    prompt: q.prompt.to_string(),
                })
                .collect(),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::questions::ASPECT_QUESTIONS;
    use crate::wizard::processing::STATUS_MESSAGES;

    fn wizard_at_aspects() -> ReviewWizard {
        let mut wizard = ReviewWizard::new();
        wizard.set_review_text("A stunning film that drags in the middle".to_string());
        wizard.submit_review().unwrap();
        wizard
    }

    fn answer_everything(wizard: &mut ReviewWizard) {
        for question in ASPECT_QUESTIONS {
            wizard.answer_aspect(question.id, AspectAnswer::Yes).unwrap();
        }
    }

    #[test]
    fn new_wizard_starts_at_movie_review_with_default_genre() {
        let wizard = ReviewWizard::new();
        assert_eq!(wizard.step(), WizardStep::MovieReview);
        assert_eq!(wizard.genre(), Genre::Drama);
        assert!(movies::movies_for(Genre::Drama).contains(&wizard.movie()));
        assert!(wizard.review_text().is_empty());
    }

    #[test]
    fn empty_review_does_not_advance() {
        let mut wizard = ReviewWizard::new();
        assert_eq!(wizard.submit_review(), Err(WizardError::EmptyReview));

        wizard.set_review_text("   \n\t ".to_string()); // whitespace only
        assert_eq!(wizard.submit_review(), Err(WizardError::EmptyReview));
        assert_eq!(wizard.step(), WizardStep::MovieReview);
    }

    #[test]
    fn review_with_text_advances_to_aspects() {
        let wizard = wizard_at_aspects();
        assert_eq!(wizard.step(), WizardStep::AspectAnalysis);
    }

    #[test]
    fn unknown_genre_is_a_no_op() {
        let mut wizard = ReviewWizard::new();
        let before = wizard.movie();
        wizard.select_genre("Documentary");
        assert_eq!(wizard.genre(), Genre::Drama);
        assert_eq!(wizard.movie(), before);
    }

    #[test]
    fn selecting_a_genre_rolls_a_movie_from_its_bank() {
        let mut wizard = ReviewWizard::new();
        wizard.select_genre("Horror");
        assert_eq!(wizard.genre(), Genre::Horror);
        assert!(movies::movies_for(Genre::Horror).contains(&wizard.movie()));
    }

    #[test]
    fn genre_changes_are_ignored_after_the_first_step() {
        let mut wizard = wizard_at_aspects();
        wizard.select_genre("Comedy");
        assert_eq!(wizard.genre(), Genre::Drama); // unchanged
    }

    #[test]
    fn review_edits_are_ignored_after_the_first_step() {
        let mut wizard = wizard_at_aspects();
        wizard.set_review_text(String::new());
        assert_eq!(wizard.review_text(), "A stunning film that drags in the middle");
    }

    #[test]
    fn answers_overwrite_instead_of_duplicating() {
        let mut wizard = wizard_at_aspects();
        wizard.answer_aspect(1, AspectAnswer::Yes).unwrap();
        wizard.answer_aspect(1, AspectAnswer::No).unwrap();
        assert_eq!(wizard.answers().len(), 1);
        assert_eq!(wizard.answers()[&1], AspectAnswer::No);
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut wizard = wizard_at_aspects();
        assert_eq!(
            wizard.answer_aspect(11, AspectAnswer::Yes),
            Err(WizardError::UnknownQuestion(11))
        );
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn incomplete_answers_do_not_advance() {
        let mut wizard = wizard_at_aspects();
        for question in &ASPECT_QUESTIONS[..9] {
            wizard.answer_aspect(question.id, AspectAnswer::Maybe).unwrap();
        }
        assert_eq!(
            wizard.submit_aspects(),
            Err(WizardError::IncompleteAnswers {
                answered: 9,
                total: 10
            })
        );
        assert_eq!(wizard.step(), WizardStep::AspectAnalysis);
    }

    #[test]
    fn all_ten_answers_advance_to_processing() {
        let mut wizard = wizard_at_aspects();
        answer_everything(&mut wizard);
        wizard.submit_aspects().unwrap();
        assert_eq!(wizard.step(), WizardStep::Processing);
    }

    #[test]
    fn going_back_keeps_the_answers() {
        let mut wizard = wizard_at_aspects();
        wizard.answer_aspect(1, AspectAnswer::Yes).unwrap();
        wizard.answer_aspect(2, AspectAnswer::No).unwrap();

        wizard.go_back_to_review().unwrap();
        assert_eq!(wizard.step(), WizardStep::MovieReview);

        wizard.submit_review().unwrap();
        assert_eq!(wizard.answers().len(), 2); // still there
    }

    #[test]
    fn submit_review_is_rejected_outside_its_step() {
        let mut wizard = wizard_at_aspects();
        assert_eq!(
            wizard.submit_review(),
            Err(WizardError::UnavailableInStep(WizardStep::AspectAnalysis))
        );
    }

    #[test]
    fn ticks_play_the_messages_then_complete() {
        let mut wizard = wizard_at_aspects();
        answer_everything(&mut wizard);
        wizard.submit_aspects().unwrap();

        for expected in STATUS_MESSAGES {
            match wizard.tick() {
                TickOutcome::Status { message, .. } => assert_eq!(message, expected),
                other => panic!("expected a status update, got {:?}", other),
            }
        }

        match wizard.tick() {
            TickOutcome::Complete(result) => {
                assert_eq!(result.movie, wizard.movie().title);
                assert_eq!(result.review, wizard.review_text());
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(wizard.step(), WizardStep::Results);
    }

    #[test]
    fn mid_processing_edits_do_not_reach_the_result() {
        let mut wizard = wizard_at_aspects();
        answer_everything(&mut wizard);
        wizard.submit_aspects().unwrap();

        wizard.tick();
        wizard.set_review_text(String::new()); // ignored mid-playback
        for _ in 0..5 {
            wizard.tick();
        }

        match wizard.tick() {
            TickOutcome::Complete(result) => {
                assert_eq!(result.review, "A stunning film that drags in the middle");
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn ticks_outside_processing_are_ignored() {
        let mut wizard = ReviewWizard::new();
        assert_eq!(wizard.tick(), TickOutcome::Ignored);

        let mut wizard = wizard_at_aspects();
        answer_everything(&mut wizard);
        wizard.submit_aspects().unwrap();
        for _ in 0..7 {
            wizard.tick();
        }
        // playback is over; a late tick from a dead timer changes nothing
        assert_eq!(wizard.tick(), TickOutcome::Ignored);
        assert_eq!(wizard.step(), WizardStep::Results);
    }

    #[test]
    fn snapshot_reflects_the_wizard() {
        let mut wizard = ReviewWizard::new();
        wizard.set_review_text("Loved it".to_string());
        let snapshot = wizard.snapshot();

        assert_eq!(snapshot.step_number, 1);
        assert_eq!(snapshot.total_steps, 4);
        assert_eq!(snapshot.genre, "Drama");
        assert_eq!(snapshot.genres.len(), 6);
        assert_eq!(snapshot.review_text, "Loved it");
        assert_eq!(snapshot.questions.len(), 10);
        assert_eq!(
            snapshot.movie.map(|m| m.title),
            Some(wizard.movie().title.to_string())
        );
    }
}
