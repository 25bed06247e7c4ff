// Integration tests for the sentiment pipeline
// This is a separate crate that tests the public API

use std::cell::{Cell, RefCell};

use sentiment_pipeline::core::FilterConfig;
use sentiment_pipeline::pipelines::normalization::{FnTranslator, NoTranslator};
use sentiment_pipeline::*;

/// Labels every segment by a keyword and records each batch it receives.
#[derive(Default)]
struct KeywordClassifier {
    batches: RefCell<Vec<Vec<String>>>,
}

impl SentimentClassifier for KeywordClassifier {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        self.batches
            .borrow_mut()
            .push(batch.iter().map(|s| s.to_string()).collect());
        Ok(batch
            .iter()
            .map(|text| {
                if text.contains("love") {
                    ClassificationResult::new(Label::Positive, 0.99)
                } else if text.contains("hate") {
                    ClassificationResult::new(Label::Negative, 0.98)
                } else {
                    ClassificationResult::new(Label::Neutral, 0.6)
                }
            })
            .collect())
    }
}

struct FailingClassifier;

impl SentimentClassifier for FailingClassifier {
    fn classify(&self, _batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        anyhow::bail!("model crashed")
    }
}

/// Drops the last result of every batch.
struct ShortClassifier;

impl SentimentClassifier for ShortClassifier {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        Ok(batch
            .iter()
            .skip(1)
            .map(|_| ClassificationResult::new(Label::Positive, 0.9))
            .collect())
    }
}

struct OverconfidentClassifier;

impl SentimentClassifier for OverconfidentClassifier {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        Ok(batch
            .iter()
            .map(|_| ClassificationResult::new(Label::Positive, 1.5))
            .collect())
    }
}

/// Returns a NaN confidence for every segment.
struct UndefinedConfidenceClassifier;

impl SentimentClassifier for UndefinedConfidenceClassifier {
    fn classify(&self, batch: &[&str]) -> anyhow::Result<Vec<ClassificationResult>> {
        Ok(batch
            .iter()
            .map(|_| ClassificationResult::new(Label::Negative, f32::NAN))
            .collect())
    }
}

fn english(text: &str) -> RawInput {
    RawInput::from_text(text, Language::English)
}

#[test]
fn love_hate_scenario() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    let mut session = Session::new("s1");

    let result = pipeline.analyze(&english("I love this. I hate that."), &mut session)?;

    let texts: Vec<&str> = result.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["I love this", " I hate that", ""]);
    assert_eq!(result.results.len(), 3);
    assert_eq!(result.results[0].label, Label::Positive);
    assert_eq!(result.results[1].label, Label::Negative);

    assert_eq!(session.history().len(), 2);
    assert_eq!(result.recorded.len(), 2);
    assert_eq!(result.recorded[1].segment_text, "I hate that");

    assert_eq!(result.distribution.total(), 3);

    let mut reader = csv::Reader::from_reader(result.export.as_slice());
    assert_eq!(reader.records().count(), 3);
    assert_eq!(result.export_file_name, "sentiment_results.csv");
    Ok(())
}

#[test]
fn classifier_is_called_once_with_whole_batch() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    let mut session = Session::default();
    pipeline.analyze(&english("a. b. c"), &mut session)?;

    let batches = pipeline.classifier().batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], vec!["a", " b", " c"]);
    Ok(())
}

#[test]
fn empty_input_is_rejected_without_side_effects() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    let mut session = Session::default();

    let err = pipeline.analyze(&english(""), &mut session).unwrap_err();
    assert!(matches!(err, SentimentError::EmptyInput));
    assert!(pipeline.classifier().batches.borrow().is_empty());
    assert!(session.history().is_empty());
    assert!(session.running_distribution().is_empty());
    assert_eq!(session.analyses(), 0);
    Ok(())
}

#[test]
fn whitespace_only_input_is_analyzed_but_not_recorded() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    let mut session = Session::default();

    let result = pipeline.analyze(&english("   "), &mut session)?;

    assert_eq!(pipeline.classifier().batches.borrow().as_slice(), &[vec!["   ".to_string()]]);
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.distribution.total(), 1);
    let mut reader = csv::Reader::from_reader(result.export.as_slice());
    assert_eq!(reader.records().count(), 1);
    assert!(result.recorded.is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.analyses(), 1);
    Ok(())
}

#[test]
fn translation_failure_aborts_before_segmentation() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default())
        .translator(NoTranslator)
        .build()?;
    let mut session = Session::default();

    let input = RawInput::from_text("J'adore ça.", Language::French);
    let err = pipeline.analyze(&input, &mut session).unwrap_err();

    assert!(matches!(
        err,
        SentimentError::Normalization {
            language: Language::French,
            ..
        }
    ));
    assert!(pipeline.classifier().batches.borrow().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.analyses(), 0);
    Ok(())
}

#[test]
fn translated_text_is_what_gets_classified() -> anyhow::Result<()> {
    let calls = Cell::new(0);
    let translator = FnTranslator::new(|text: &str, source: Language, target: Language| {
        calls.set(calls.get() + 1);
        assert_eq!(source, Language::Bengali);
        assert_eq!(target, Language::English);
        assert_eq!(text, "আমি এটা ভালোবাসি। ");
        Ok("I love it. I hate rain.".to_string())
    });
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default())
        .translator(translator)
        .build()?;
    let mut session = Session::default();

    let input = RawInput::from_text("আমি এটা ভালোবাসি। ", Language::Bengali);
    let result = pipeline.analyze(&input, &mut session)?;

    assert_eq!(calls.get(), 1);
    assert!(result.was_translated());
    assert_eq!(result.normalized_text, "I love it. I hate rain.");
    assert_eq!(result.segments.len(), 3);
    assert_eq!(session.history().len(), 2);
    Ok(())
}

#[test]
fn classification_failure_leaves_session_untouched() -> anyhow::Result<()> {
    let mut session = Session::default();
    let good = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    good.analyze(&english("I love this."), &mut session)?;
    let before = session.history().snapshot().to_vec();
    let before_dist = session.running_distribution().clone();

    let failing = SentimentPipelineBuilder::new(FailingClassifier).build()?;
    let err = failing.analyze(&english("I hate that."), &mut session).unwrap_err();
    assert!(matches!(err, SentimentError::Classification { .. }));

    let short = SentimentPipelineBuilder::new(ShortClassifier).build()?;
    let err = short.analyze(&english("one. two."), &mut session).unwrap_err();
    assert!(matches!(err, SentimentError::Classification { .. }));

    let overconfident = SentimentPipelineBuilder::new(OverconfidentClassifier).build()?;
    let err = overconfident.analyze(&english("one."), &mut session).unwrap_err();
    assert!(matches!(err, SentimentError::Classification { .. }));

    let undefined = SentimentPipelineBuilder::new(UndefinedConfidenceClassifier).build()?;
    let err = undefined.analyze(&english("I hate that."), &mut session).unwrap_err();
    assert!(matches!(err, SentimentError::Classification { .. }));

    assert_eq!(session.history().snapshot(), before.as_slice());
    assert_eq!(session.running_distribution(), &before_dist);
    assert_eq!(session.analyses(), 1);
    Ok(())
}

#[test]
fn history_grows_by_non_empty_segment_counts() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    let mut session = Session::default();

    let inputs = ["I love this. I hate that.", "one.. two", "  .  .solo"];
    let expected_new = [2, 2, 1];
    let mut expected_len = 0;
    for (text, new) in inputs.iter().zip(expected_new) {
        let result = pipeline.analyze(&english(text), &mut session)?;
        expected_len += new;
        assert_eq!(result.recorded.len(), new);
        assert_eq!(session.history().len(), expected_len);
    }

    let numbers: Vec<u64> = session
        .snapshot()
        .iter()
        .map(|r| r.sequence_number)
        .collect();
    assert_eq!(numbers, (1..=expected_len as u64).collect::<Vec<_>>());
    assert_eq!(session.analyses(), 3);
    Ok(())
}

#[test]
fn running_distribution_counts_every_segment_by_default() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default()).build()?;
    let mut session = Session::default();
    pipeline.analyze(&english("I love this. I hate that."), &mut session)?;
    pipeline.analyze(&english("I love it"), &mut session)?;

    let running = session.running_distribution();
    assert_eq!(running.total(), 4);
    assert_eq!(running.count(Label::Positive), 2);
    assert_eq!(running.count(Label::Neutral), 1);
    Ok(())
}

#[test]
fn unified_filters_skip_blank_segments_everywhere() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::new(KeywordClassifier::default())
        .filters(FilterConfig::unified())
        .build()?;
    let mut session = Session::default();
    let result = pipeline.analyze(&english("I love this. I hate that."), &mut session)?;

    assert_eq!(result.results.len(), 3);
    assert_eq!(result.distribution.total(), 2);
    let mut reader = csv::Reader::from_reader(result.export.as_slice());
    assert_eq!(reader.records().count(), 2);
    assert_eq!(session.history().len(), 2);
    Ok(())
}

#[test]
fn sessions_in_registry_are_isolated() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::lexicon().build()?;
    let registry = SessionRegistry::new();
    let alice = SessionId::from("alice");
    let bob = SessionId::from("bob");

    pipeline.analyze_in(&registry, &alice, &english("I love this. I hate that."))?;
    pipeline.analyze_in(&registry, &bob, &english("Great work."))?;
    pipeline.analyze_in(&registry, &alice, &english("Terrible."))?;

    assert_eq!(registry.with_session(&alice, |s| s.history().len()), 3);
    assert_eq!(registry.with_session(&bob, |s| s.history().len()), 1);

    registry.end(&alice);
    assert_eq!(registry.with_session(&alice, |s| s.history().len()), 0);
    assert_eq!(registry.with_session(&bob, |s| s.history().len()), 1);
    Ok(())
}

#[test]
fn concurrent_analyses_of_one_session_do_not_interleave() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::lexicon().build()?;
    let registry = SessionRegistry::new();
    let id = SessionId::from("shared");
    let text = "I love this. I hate that. Great work. Terrible service.";

    let (pipeline, registry, id) = (&pipeline, &registry, &id);
    let outcomes = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..2)
            .map(|_| scope.spawn(move || pipeline.analyze_in(registry, id, &english(text))))
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("analysis thread panicked"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    for result in &outcomes {
        let numbers: Vec<u64> = result.recorded.iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers.len(), 4);
        assert!(numbers.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }

    registry.with_session(id, |session| {
        assert_eq!(session.analyses(), 2);
        assert_eq!(session.history().len(), 8);
        let numbers: Vec<u64> = session.snapshot().iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    });
    Ok(())
}

#[test]
fn csv_upload_without_text_column_never_reaches_pipeline() {
    let err = RawInput::from_csv_reader("review\ngreat\n".as_bytes(), Language::English)
        .unwrap_err();
    assert!(matches!(err, SentimentError::UnsupportedFile { .. }));
}

#[test]
fn csv_upload_is_analyzed_as_joined_text() -> anyhow::Result<()> {
    let pipeline = SentimentPipelineBuilder::lexicon().build()?;
    let mut session = Session::default();
    let input = RawInput::from_csv_reader(
        "text\nI love this.\nI hate that.\n".as_bytes(),
        Language::English,
    )?;
    let result = pipeline.analyze(&input, &mut session)?;

    let texts: Vec<&str> = result.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["I love this", "\nI hate that", ""]);
    assert_eq!(session.history().snapshot()[1].segment_text, "I hate that");
    Ok(())
}

#[test]
fn lexicon_pipeline_produces_valid_results() -> anyhow::Result<()> {
    let config = AnalyzerConfig::from_toml_str(
        r#"
        [lexicon]
        kind = "three_way"
        neutral_band = 0.2
        "#,
    )?;
    let pipeline = SentimentPipelineBuilder::from_config(config).build()?;
    let mut session = Session::default();
    let result = pipeline.analyze(
        &english("I love this. I hate that. The train leaves at noon."),
        &mut session,
    )?;

    assert_eq!(result.results.len(), result.segments.len());
    assert!(result
        .results
        .iter()
        .all(|r| (0.0..=1.0).contains(&r.confidence)));
    let labels: Vec<Label> = result.sentences().map(|(_, r)| r.label).collect();
    assert_eq!(labels, vec![Label::Positive, Label::Negative, Label::Neutral]);

    let json: serde_json::Value = serde_json::from_str(&result.to_json()?)?;
    assert_eq!(json["results"][0]["label"], "POSITIVE");
    assert!(json.get("export").is_none());
    Ok(())
}

#[test]
fn builder_rejects_invalid_config() {
    let err = SentimentPipelineBuilder::lexicon()
        .export_file_name("  ")
        .build()
        .err()
        .expect("blank export name must be rejected");
    assert!(matches!(err, SentimentError::Config { .. }));
}
