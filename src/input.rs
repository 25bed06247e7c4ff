//! Raw text sources.
//!
//! Typed text, uploaded files and recognized speech all end up as a
//! [`RawInput`]: a block of text plus its declared language.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Result, SentimentError, SpeechCaptureError};
use crate::pipelines::normalization::Language;

/// Name of the column a CSV upload must carry.
pub const CSV_TEXT_COLUMN: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    text: String,
    language: Language,
}

impl RawInput {
    pub fn from_text(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }

    /// Contents of a plain-text upload, which must be UTF-8.
    pub fn from_plain_bytes(bytes: &[u8], language: Language) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SentimentError::unsupported_file(format!("text file is not UTF-8: {e}")))?;
        Ok(Self::from_text(text, language))
    }

    /// Rows of the `text` column of a CSV upload, joined with newlines.
    pub fn from_csv_reader<R: Read>(reader: R, language: Language) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| SentimentError::unsupported_file(format!("unreadable CSV header: {e}")))?;
        let column = headers
            .iter()
            .position(|h| h == CSV_TEXT_COLUMN)
            .ok_or_else(|| {
                SentimentError::unsupported_file(format!(
                    "CSV must contain a '{CSV_TEXT_COLUMN}' column"
                ))
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| SentimentError::unsupported_file(format!("malformed CSV row: {e}")))?;
            rows.push(record.get(column).unwrap_or_default().to_string());
        }
        tracing::debug!(rows = rows.len(), "loaded CSV upload");
        Ok(Self::from_text(rows.join("\n"), language))
    }

    /// Load an uploaded file, dispatching on its `.txt` or `.csv` extension.
    pub fn from_path(path: impl AsRef<Path>, language: Language) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("txt") => {
                let bytes = std::fs::read(path).map_err(|e| SentimentError::io("reading text file", e))?;
                Self::from_plain_bytes(&bytes, language)
            }
            Some("csv") => {
                let file = std::fs::File::open(path)
                    .map_err(|e| SentimentError::io("opening CSV file", e))?;
                Self::from_csv_reader(file, language)
            }
            _ => Err(SentimentError::unsupported_file(format!(
                "expected a .txt or .csv file, got {}",
                path.display()
            ))),
        }
    }

    /// Text recognized by an external speech service.
    ///
    /// A failed capture is reported and yields empty text, which the pipeline
    /// then rejects as empty input.
    pub fn from_speech<S: SpeechRecognizer + ?Sized>(recognizer: &S, language: Language) -> Self {
        match recognizer.recognize() {
            Ok(text) => {
                tracing::debug!(chars = text.len(), "recognized speech");
                Self::from_text(text, language)
            }
            Err(err) => {
                tracing::warn!(error = %err, "speech capture failed");
                Self::from_text(String::new(), language)
            }
        }
    }

    /// Like [`RawInput::from_speech`] but surfaces the capture failure so a
    /// front end can tell the user why nothing was analyzed.
    pub fn try_from_speech<S: SpeechRecognizer + ?Sized>(
        recognizer: &S,
        language: Language,
    ) -> Result<Self> {
        let text = recognizer.recognize()?;
        Ok(Self::from_text(text, language))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether no text was supplied at all. Whitespace-only text is still
    /// analyzed; its blank segments are classified but never recorded.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// External speech-to-text capture.
pub trait SpeechRecognizer {
    /// Block until an utterance has been captured and recognized.
    fn recognize(&self) -> std::result::Result<String, SpeechCaptureError>;
}
