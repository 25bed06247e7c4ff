use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display-level sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Neutral => "NEUTRAL",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Label::Positive => "😊",
            Label::Negative => "😡",
            Label::Neutral => "😐",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Label {
    type Err = anyhow::Error;

    /// Maps the label spellings commonly emitted by sentiment models onto the
    /// closed display set.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Ok(Label::Positive),
            "negative" | "neg" => Ok(Label::Negative),
            "neutral" | "neu" => Ok(Label::Neutral),
            other => anyhow::bail!("unknown sentiment label '{other}'"),
        }
    }
}

/// One classifier output, parallel to one input segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn new(label: Label, confidence: f32) -> Self {
        Self { label, confidence }
    }

    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }

    /// Confidence rendered as a percentage, e.g. `99.87%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// Batch sentiment classification capability.
///
/// Implementations must return exactly one result per input, in input order,
/// including results for empty strings. A failure anywhere in the batch fails
/// the whole call.
pub trait SentimentClassifier {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>>;

    /// Short identifier used in logs.
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for Box<C> {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        (**self).classify(batch)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for std::sync::Arc<C> {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        (**self).classify(batch)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
