//! Rule-based sentiment classifier.
//!
//! A small general-purpose English lexicon with negation and intensifier
//! handling. It lets the pipeline run offline and gives tests a deterministic
//! backend; real deployments plug a model in through [`SentimentClassifier`].

use std::collections::HashMap;

use super::model::{ClassificationResult, Label, SentimentClassifier};
use crate::core::LexiconMode;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("love", 0.9),
    ("loved", 0.9),
    ("adore", 0.9),
    ("excellent", 0.9),
    ("amazing", 0.9),
    ("wonderful", 0.8),
    ("fantastic", 0.9),
    ("great", 0.7),
    ("good", 0.6),
    ("nice", 0.5),
    ("happy", 0.7),
    ("glad", 0.6),
    ("like", 0.4),
    ("enjoy", 0.6),
    ("enjoyed", 0.6),
    ("best", 0.8),
    ("beautiful", 0.7),
    ("brilliant", 0.8),
    ("perfect", 0.9),
    ("awesome", 0.8),
    ("pleased", 0.6),
    ("recommend", 0.6),
    ("helpful", 0.5),
    ("fun", 0.5),
    ("thanks", 0.4),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("hate", -0.9),
    ("hated", -0.9),
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("worst", -0.9),
    ("bad", -0.6),
    ("poor", -0.6),
    ("sad", -0.6),
    ("angry", -0.7),
    ("disappointed", -0.7),
    ("disappointing", -0.7),
    ("boring", -0.5),
    ("broken", -0.6),
    ("useless", -0.8),
    ("annoying", -0.6),
    ("ugly", -0.6),
    ("dislike", -0.5),
    ("problem", -0.4),
    ("fail", -0.7),
    ("failed", -0.7),
    ("wrong", -0.5),
    ("slow", -0.3),
    ("expensive", -0.3),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "cannot", "can't", "cant", "don't", "dont",
    "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt", "won't",
    "wont", "hardly",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("really", 1.4),
    ("extremely", 2.0),
    ("so", 1.3),
    ("totally", 1.5),
    ("absolutely", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

/// Steepness of the score-to-confidence curve for polar labels.
const CONFIDENCE_SLOPE: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    mode: LexiconMode,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new(LexiconMode::default())
    }
}

impl LexiconClassifier {
    pub fn new(mode: LexiconMode) -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|(word, score)| (word.to_string(), *score))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|(word, mult)| (word.to_string(), *mult))
            .collect();
        Self {
            words,
            intensifiers,
            mode,
        }
    }

    pub fn binary() -> Self {
        Self::new(LexiconMode::Binary)
    }

    pub fn three_way(neutral_band: f64) -> Self {
        Self::new(LexiconMode::ThreeWay { neutral_band })
    }

    pub fn mode(&self) -> LexiconMode {
        self.mode
    }

    /// Add or override a word score; scores are clamped to [-1, 1].
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    /// Mean of the matched word scores in [-1, 1]; 0 when nothing matched.
    pub fn score(&self, text: &str) -> f64 {
        let mut scores = Vec::new();
        let mut negate_next = false;
        let mut intensifier = 1.0;

        for raw in text.split_whitespace() {
            let word = normalize_word(raw);
            if word.is_empty() {
                continue;
            }
            if NEGATIONS.contains(&word.as_str()) {
                negate_next = true;
                continue;
            }
            if let Some(mult) = self.intensifiers.get(&word) {
                intensifier = *mult;
                continue;
            }
            match self.words.get(&word) {
                Some(score) => {
                    let mut score = *score * intensifier;
                    if negate_next {
                        score = -score;
                    }
                    scores.push(score);
                    negate_next = false;
                    intensifier = 1.0;
                }
                None => {
                    intensifier = 1.0;
                }
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }

    fn classify_one(&self, text: &str) -> ClassificationResult {
        let score = self.score(text);

        if let LexiconMode::ThreeWay { neutral_band } = self.mode {
            if score.abs() < neutral_band {
                let confidence = 1.0 - 0.5 * score.abs() / neutral_band;
                return ClassificationResult::new(Label::Neutral, confidence as f32);
            }
        }

        let label = if score >= 0.0 {
            Label::Positive
        } else {
            Label::Negative
        };
        let confidence = 1.0 / (1.0 + (-CONFIDENCE_SLOPE * score.abs()).exp());
        ClassificationResult::new(label, confidence as f32)
    }
}

fn normalize_word(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        Ok(batch.iter().map(|text| self.classify_one(text)).collect())
    }

    fn name(&self) -> &str {
        match self.mode {
            LexiconMode::Binary => "lexicon-binary",
            LexiconMode::ThreeWay { .. } => "lexicon-three-way",
        }
    }
}
