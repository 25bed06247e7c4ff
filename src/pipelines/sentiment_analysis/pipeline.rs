use serde::Serialize;

use super::model::{ClassificationResult, SentimentClassifier};
use crate::core::{AnalyzerConfig, Result, SentimentError, Session, SessionId, SessionRegistry};
use crate::input::RawInput;
use crate::pipelines::aggregation::DistributionSummary;
use crate::pipelines::export::ResultExporter;
use crate::pipelines::history::SentimentRecord;
use crate::pipelines::normalization::{Language, LanguageNormalizer, NoTranslator, Translator};
use crate::pipelines::segmentation::{Segment, SentenceSegmenter};

/// Everything one successful analysis produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub language: Language,
    /// Text after normalization; differs from the input only when translated.
    pub normalized_text: String,
    pub segments: Vec<Segment>,
    /// Parallel to `segments`.
    pub results: Vec<ClassificationResult>,
    pub distribution: DistributionSummary,
    /// Records appended to the session history by this analysis.
    pub recorded: Vec<SentimentRecord>,
    pub export_file_name: String,
    #[serde(skip)]
    pub export: Vec<u8>,
}

impl PipelineResult {
    pub fn was_translated(&self) -> bool {
        !self.language.is_english()
    }

    /// Segment/result pairs worth showing: blank segments are skipped.
    pub fn sentences(&self) -> impl Iterator<Item = (&Segment, &ClassificationResult)> + '_ {
        self.segments
            .iter()
            .zip(&self.results)
            .filter(|(segment, _)| !segment.is_blank())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct SentimentPipeline<C: SentimentClassifier, T: Translator = NoTranslator> {
    pub(crate) classifier: C,
    pub(crate) normalizer: LanguageNormalizer<T>,
    pub(crate) segmenter: SentenceSegmenter,
    pub(crate) exporter: ResultExporter,
    pub(crate) config: AnalyzerConfig,
}

impl<C: SentimentClassifier, T: Translator> SentimentPipeline<C, T> {
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Run one analysis and fold its outcome into `session`.
    ///
    /// The session is only touched once the batch has been classified,
    /// validated and exported; any error leaves it exactly as it was.
    pub fn analyze(&self, input: &RawInput, session: &mut Session) -> Result<PipelineResult> {
        let span = tracing::info_span!(
            "analyze",
            session = %session.id(),
            language = input.language().code(),
            classifier = self.classifier.name(),
        );
        let _enter = span.enter();

        if input.is_empty() {
            tracing::warn!("rejecting empty input");
            return Err(SentimentError::EmptyInput);
        }

        let normalized_text = self.normalizer.normalize(input.text(), input.language())?;
        let segments = self.segmenter.segment(&normalized_text);
        tracing::debug!(segments = segments.len(), "segmented input");

        let results = self.classify(&segments)?;

        let distribution = DistributionSummary::aggregate(
            segments
                .iter()
                .zip(&results)
                .filter(|(segment, _)| self.config.filters.distribution.keeps(&segment.text))
                .map(|(_, result)| result),
        );
        let export = self.exporter.export(&segments, &results)?;

        let history = session.history_mut();
        let first_new = history.len();
        for (segment, result) in segments.iter().zip(&results) {
            history.append(&segment.text, result.label, result.confidence);
        }
        let recorded = history.snapshot()[first_new..].to_vec();
        session.finish_analysis(&distribution);

        tracing::info!(
            segments = segments.len(),
            recorded = recorded.len(),
            history = session.history().len(),
            "analysis complete"
        );

        Ok(PipelineResult {
            language: input.language(),
            normalized_text,
            segments,
            results,
            distribution,
            recorded,
            export_file_name: self.config.export_file_name.clone(),
            export,
        })
    }

    /// Analyze within the registry session identified by `id`.
    ///
    /// Holds the session lock for the whole call, so analyses for one session
    /// never overlap.
    pub fn analyze_in(
        &self,
        registry: &SessionRegistry,
        id: &SessionId,
        input: &RawInput,
    ) -> Result<PipelineResult> {
        registry.with_session(id, |session| self.analyze(input, session))
    }

    /// One batch call for the whole analysis, validated before use.
    fn classify(&self, segments: &[Segment]) -> Result<Vec<ClassificationResult>> {
        let batch: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        let results = self
            .classifier
            .classify(&batch)
            .map_err(|e| SentimentError::classification(format!("{e:#}")))?;

        if results.len() != batch.len() {
            return Err(SentimentError::classification(format!(
                "classifier returned {} results for {} segments",
                results.len(),
                batch.len()
            )));
        }
        if let Some(index) = results.iter().position(|r| !r.has_valid_confidence()) {
            return Err(SentimentError::classification(format!(
                "confidence {} for segment {} is outside [0, 1]",
                results[index].confidence, index
            )));
        }
        Ok(results)
    }
}
