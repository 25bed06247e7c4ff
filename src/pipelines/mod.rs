// Pipeline stages, leaves first
pub mod aggregation;
pub mod export;
pub mod history;
pub mod normalization;
pub mod segmentation;
pub mod sentiment_analysis;

pub use aggregation::DistributionSummary;
pub use export::ResultExporter;
pub use history::{HistoryStore, SentimentRecord};
pub use normalization::{FnTranslator, Language, LanguageNormalizer, NoTranslator, Translator};
pub use segmentation::{Segment, SentenceSegmenter};
pub use sentiment_analysis::*;
