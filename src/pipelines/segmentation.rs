use serde::{Deserialize, Serialize};

/// One fragment of the normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Position in the unfiltered split result.
    pub original_index: usize,
}

impl Segment {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// 1-based sentence number for display.
    pub fn number(&self) -> usize {
        self.original_index + 1
    }
}

/// Naive sentence splitter: a literal split on a single terminator character.
///
/// Empty fragments (leading, doubled or trailing terminators) are kept so that
/// indices stay aligned with the classifier batch.
#[derive(Debug, Clone, Copy)]
pub struct SentenceSegmenter {
    terminator: char,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self { terminator: '.' }
    }
}

impl SentenceSegmenter {
    pub fn new(terminator: char) -> Self {
        Self { terminator }
    }

    pub fn segment(&self, text: &str) -> Vec<Segment> {
        text.split(self.terminator)
            .enumerate()
            .map(|(original_index, fragment)| Segment {
                text: fragment.to_string(),
                original_index,
            })
            .collect()
    }
}
