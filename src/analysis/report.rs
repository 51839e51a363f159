use std::collections::HashMap;

use rand::Rng;

use crate::analysis::synthesizer::AnalysisResult;
use crate::catalog::questions::{category_for, AspectAnswer, AspectCategory};
use crate::catalog::recommendations::recommendations_for;
use crate::protocol::{
    AspectScoreView, Polarity, RadarView, RecommendationView, ResultsView, ReviewSegmentView,
    WordBubbleView, WordCloudGroupView,
};

// ── Sentiment label ─────────────────────────────────────────────────

/// Bucket a sentiment score into its display label.
pub fn sentiment_label(score: f64) -> &'static str {
    if score > 0.8 {
        "Very Positive"
    } else if score > 0.6 {
        "Positive"
    } else if score > 0.4 {
        "Neutral"
    } else if score > 0.2 {
        "Negative"
    } else {
        "Very Negative"
    }
}

// ── Aspect scores ───────────────────────────────────────────────────

/// Percentage score per display category, in the fixed category order.
/// Each answer contributes its weight to the category its question maps
/// to; a jittered base is added and the total clamped to [40, 95].
pub fn aspect_scores_with_rng<R: Rng>(
    answers: &HashMap<u8, AspectAnswer>,
    rng: &mut R,
) -> Vec<(AspectCategory, f64)> {
    let mut totals: HashMap<AspectCategory, f64> = HashMap::new();
    for (question_id, answer) in answers {
        if let Some(category) = category_for(*question_id) {
            *totals.entry(category).or_insert(0.0) += answer.score_weight();
        }
    }

    AspectCategory::ALL
        .iter()
        .map(|category| {
            let base = totals.get(category).copied().unwrap_or(0.0);
            let score = (base + 50.0 + rng.gen::<f64>() * 20.0 - 10.0).clamp(40.0, 95.0);
            (*category, score)
        })
        .collect()
}

// ── Radar chart ─────────────────────────────────────────────────────

pub static RADAR_LABELS: [&str; 6] = [
    "Positive Words",
    "Negative Words",
    "Neutral Words",
    "Emotion Intensity",
    "Recommendation Strength",
    "Technical Terms",
];

/// The six rounded radar axis values. The first two derive from the
/// sentiment score; the rest are decorative jitter in fixed bands.
pub fn radar_values_with_rng<R: Rng>(sentiment: f64, rng: &mut R) -> [u32; 6] {
    [
        (sentiment * 100.0).round() as u32,
        (100.0 - sentiment * 100.0).round() as u32,
        (40.0 + rng.gen::<f64>() * 20.0).round() as u32,
        (70.0 + rng.gen::<f64>() * 20.0).round() as u32,
        (75.0 + rng.gen::<f64>() * 15.0).round() as u32,
        (50.0 + rng.gen::<f64>() * 30.0).round() as u32,
    ]
}

// ── Word cloud ──────────────────────────────────────────────────────

// Fixed bubble layout: (x, y, radius, word) per group, in chart
// percent coordinates
static WORD_CLOUD_GROUPS: &[(&str, &[(u32, u32, u32, &str)])] = &[
    (
        "Positive Words",
        &[
            (20, 30, 15, "stunning"),
            (40, 10, 10, "remarkable"),
            (60, 40, 20, "recommend"),
            (80, 20, 15, "satisfying"),
        ],
    ),
    ("Negative Words", &[(30, 70, 10, "drags"), (70, 60, 7, "slow")]),
    (
        "Neutral Words",
        &[(10, 50, 5, "while"), (50, 80, 10, "overall"), (90, 50, 8, "worth")],
    ),
];

pub fn word_cloud() -> Vec<WordCloudGroupView> {
    WORD_CLOUD_GROUPS
        .iter()
        .map(|(label, bubbles)| WordCloudGroupView {
            label: label.to_string(),
            bubbles: bubbles
                .iter()
                .map(|&(x, y, r, word)| WordBubbleView {
                    x,
                    y,
                    r,
                    word: word.to_string(),
                })
                .collect(),
        })
        .collect()
}

// ── Review highlighting ─────────────────────────────────────────────

static POSITIVE_WORDS: [&str; 10] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "beautiful",
    "stunning",
    "impressive",
    "enjoyed",
    "recommend",
];

static NEGATIVE_WORDS: [&str; 10] = [
    "bad",
    "poor",
    "terrible",
    "awful",
    "hate",
    "boring",
    "disappointing",
    "waste",
    "disliked",
    "avoid",
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word_polarity(word: &str) -> Option<Polarity> {
    if POSITIVE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        Some(Polarity::Positive)
    } else if NEGATIVE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        Some(Polarity::Negative)
    } else {
        None
    }
}

/// Split the review into plain and sentiment-tagged segments. Whole
/// words only, case-insensitive; concatenating the segment texts gives
/// back the input exactly.
pub fn highlight_review(text: &str) -> Vec<ReviewSegmentView> {
    let mut segments = Vec::new();
    let mut plain = String::new();

    let mut rest = text;
    while !rest.is_empty() {
        let word_len = rest
            .chars()
            .take_while(|&c| is_word_char(c))
            .map(char::len_utf8)
            .sum::<usize>();
        if word_len == 0 {
            // one non-word char onto the plain run
            let c = rest.chars().next().unwrap_or_default();
            plain.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let (word, tail) = rest.split_at(word_len);
        match word_polarity(word) {
            Some(polarity) => {
                if !plain.is_empty() {
                    segments.push(ReviewSegmentView {
                        text: std::mem::take(&mut plain),
                        polarity: None,
                    });
                }
                segments.push(ReviewSegmentView {
                    text: word.to_string(),
                    polarity: Some(polarity),
                });
            }
            None => plain.push_str(word),
        }
        rest = tail;
    }

    if !plain.is_empty() {
        segments.push(ReviewSegmentView {
            text: plain,
            polarity: None,
        });
    }
    segments
}

// ── Results view ────────────────────────────────────────────────────

/// Compose the full visualizations payload from one stored result.
pub fn results_view(result: &AnalysisResult) -> ResultsView {
    results_view_with_rng(result, &mut rand::thread_rng())
}

pub fn results_view_with_rng<R: Rng>(result: &AnalysisResult, rng: &mut R) -> ResultsView {
    let aspect_scores = aspect_scores_with_rng(&result.aspects, rng)
        .into_iter()
        .map(|(category, score)| AspectScoreView {
            category: category.label().to_string(),
            score,
        })
        .collect();

    let radar = RadarView {
        labels: RADAR_LABELS.iter().map(|l| l.to_string()).collect(),
        values: radar_values_with_rng(result.sentiment, rng).to_vec(),
    };

    let recommendations = recommendations_for(&result.genre)
        .iter()
        .map(|rec| RecommendationView {
            title: rec.title.to_string(),
            year: rec.year.to_string(),
            rating: rec.rating.to_string(),
            poster: rec.poster.to_string(),
        })
        .collect();

    ResultsView {
        movie: result.movie.clone(),
        genre: result.genre.clone(),
        sentiment: result.sentiment,
        sentiment_percent: (result.sentiment * 100.0).round() as u32,
        sentiment_label: sentiment_label(result.sentiment).to_string(),
        emotions: result.emotions.clone(),
        aspect_scores,
        radar,
        word_cloud: word_cloud(),
        review_segments: highlight_review(&result.review),
        recommendations,
    }
}

// ── Tests ───────────────────────────────────────────────────────────
