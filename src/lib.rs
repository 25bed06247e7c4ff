pub mod core;
pub mod input;
pub mod pipelines;

// Re-export the types most front ends need
pub use crate::core::{AnalyzerConfig, SentimentError, Session, SessionId, SessionRegistry};
pub use input::{RawInput, SpeechRecognizer};
pub use pipelines::{
    ClassificationResult, DistributionSummary, Label, Language, LexiconClassifier,
    PipelineResult, SentimentClassifier, SentimentPipeline, SentimentPipelineBuilder,
    SentimentRecord, Translator,
};
