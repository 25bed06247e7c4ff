//! Sentiment analysis pipeline for classifying the tone of each sentence.
//!
//! Input text is normalized to English, split into sentences and classified
//! in a single batch. The batch then feeds the label distribution, the
//! session history and the CSV export.
//!
//! ## Main Types
//!
//! - [`SentimentPipeline`] - runs an analysis against a [`Session`](crate::core::Session)
//! - [`SentimentPipelineBuilder`] - builder for pipeline configuration
//! - [`SentimentClassifier`] - trait for pluggable classification backends
//! - [`LexiconClassifier`] - built-in rule-based backend
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sentiment_pipeline::core::Session;
//! use sentiment_pipeline::input::RawInput;
//! use sentiment_pipeline::pipelines::normalization::Language;
//! use sentiment_pipeline::pipelines::sentiment_analysis::*;
//!
//! let pipeline = SentimentPipelineBuilder::lexicon().build()?;
//! let mut session = Session::new("demo");
//!
//! let input = RawInput::from_text("I love this. I hate that.", Language::English);
//! let result = pipeline.analyze(&input, &mut session)?;
//! for (segment, res) in result.sentences() {
//!     println!("{}: {} ({})", segment.number(), res.label, res.confidence_percent());
//! }
//! # anyhow::Ok(())
//! ```

pub mod builder;
pub mod lexicon;
pub mod model;
pub mod pipeline;

pub use builder::SentimentPipelineBuilder;
pub use lexicon::LexiconClassifier;
pub use model::{ClassificationResult, Label, SentimentClassifier};
pub use pipeline::{PipelineResult, SentimentPipeline};
