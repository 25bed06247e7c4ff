use super::lexicon::LexiconClassifier;
use super::model::SentimentClassifier;
use super::pipeline::SentimentPipeline;
use crate::core::{AnalyzerConfig, FilterConfig, Result};
use crate::pipelines::export::ResultExporter;
use crate::pipelines::normalization::{LanguageNormalizer, NoTranslator, Translator};
use crate::pipelines::segmentation::SentenceSegmenter;

pub struct SentimentPipelineBuilder<C: SentimentClassifier, T: Translator = NoTranslator> {
    classifier: C,
    translator: T,
    config: AnalyzerConfig,
}

impl<C: SentimentClassifier> SentimentPipelineBuilder<C, NoTranslator> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            translator: NoTranslator,
            config: AnalyzerConfig::default(),
        }
    }
}

impl<C: SentimentClassifier, T: Translator> SentimentPipelineBuilder<C, T> {
    /// Use `translator` for non-English input.
    pub fn translator<U: Translator>(self, translator: U) -> SentimentPipelineBuilder<C, U> {
        SentimentPipelineBuilder {
            classifier: self.classifier,
            translator,
            config: self.config,
        }
    }

    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn terminator(mut self, terminator: char) -> Self {
        self.config.terminator = terminator;
        self
    }

    pub fn filters(mut self, filters: FilterConfig) -> Self {
        self.config.filters = filters;
        self
    }

    pub fn export_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.export_file_name = name.into();
        self
    }

    pub fn build(self) -> Result<SentimentPipeline<C, T>> {
        self.config.validate()?;
        tracing::debug!(
            classifier = self.classifier.name(),
            terminator = %self.config.terminator,
            "building sentiment pipeline"
        );
        Ok(SentimentPipeline {
            classifier: self.classifier,
            normalizer: LanguageNormalizer::new(self.translator),
            segmenter: SentenceSegmenter::new(self.config.terminator),
            exporter: ResultExporter::new(self.config.filters.export),
            config: self.config,
        })
    }
}

impl SentimentPipelineBuilder<LexiconClassifier> {
    /// Pipeline backed by the built-in lexicon classifier in binary mode.
    pub fn lexicon() -> Self {
        Self::new(LexiconClassifier::default())
    }

    /// Lexicon-backed pipeline whose classifier mode comes from `config`.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        Self::new(LexiconClassifier::new(config.lexicon)).config(config)
    }
}
