use thiserror::Error;

use crate::pipelines::normalization::Language;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SentimentError>;

/// Every way an analysis request can fail.
///
/// All variants are terminal for the current invocation. None of them leave
/// a trace in the session: history and running distribution are only touched
/// after a batch has been classified, validated and exported.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// No text was supplied (also the outcome of a failed speech capture).
    #[error("no text supplied")]
    EmptyInput,

    /// Structured input was rejected before reaching the pipeline.
    #[error("unsupported input file: {message}")]
    UnsupportedFile { message: String },

    /// The translation backend failed; the analysis is aborted.
    #[error("failed to translate {language} text to English: {message}")]
    Normalization { language: Language, message: String },

    /// The batch classification call failed or returned an invalid batch.
    #[error("classification failed: {message}")]
    Classification { message: String },

    /// The external speech capture could not produce text.
    #[error("speech capture failed: {0}")]
    SpeechCapture(#[from] SpeechCaptureError),

    #[error("failed to write results table: {0}")]
    Export(#[from] csv::Error),

    /// The export table was handed segments and results of different lengths.
    #[error("cannot export {segments} segments against {results} results")]
    MisalignedExport { segments: usize, results: usize },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SentimentError {
    pub(crate) fn unsupported_file(message: impl Into<String>) -> Self {
        Self::UnsupportedFile {
            message: message.into(),
        }
    }

    pub(crate) fn normalization(language: Language, err: impl std::fmt::Display) -> Self {
        Self::Normalization {
            language,
            message: err.to_string(),
        }
    }

    pub(crate) fn classification(message: impl Into<String>) -> Self {
        Self::Classification {
            message: message.into(),
        }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn config(err: impl std::fmt::Display) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }

    /// Whether the request was rejected before the pipeline ran at all.
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::UnsupportedFile { .. } | Self::SpeechCapture(_)
        )
    }
}

/// Failure reported by a [`SpeechRecognizer`](crate::input::SpeechRecognizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechCaptureError {
    /// Audio was captured but could not be understood.
    #[error("could not understand the audio")]
    Unintelligible,

    /// The recognition service could not be reached.
    #[error("recognition service unavailable: {0}")]
    Unavailable(String),
}
