use anyhow::Result;
use sentiment_pipeline::pipelines::normalization::FnTranslator;
use sentiment_pipeline::{Language, RawInput, SentimentPipelineBuilder, SessionId, SessionRegistry};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Stand-in for a real translation service.
    let phrasebook = FnTranslator::new(|text: &str, _source: Language, _target: Language| {
        Ok(text
            .replace("J'adore ce film", "I love this film")
            .replace("La fin était terrible", "The ending was terrible"))
    });

    let pipeline = SentimentPipelineBuilder::lexicon()
        .translator(phrasebook)
        .build()?;
    let registry = SessionRegistry::new();
    let session = SessionId::from("demo");

    let inputs = [
        RawInput::from_text("I love my new car. The seats are awful.", Language::English),
        RawInput::from_text("J'adore ce film. La fin était terrible.", Language::French),
    ];

    for input in &inputs {
        let result = pipeline.analyze_in(&registry, &session, input)?;

        println!("\n=== Sentiment Analysis Result ===");
        if result.was_translated() {
            println!("Translated: \"{}\"", result.normalized_text);
        }
        for (segment, res) in result.sentences() {
            println!(
                "Sentence {}: \"{}\" -> {} {} ({})",
                segment.number(),
                segment.text.trim(),
                res.label,
                res.label.emoji(),
                res.confidence_percent()
            );
        }
        println!("Distribution: {:?}", result.distribution.ranked());
    }

    let history_len = registry.with_session(&session, |s| s.history().len());
    println!("\nHistory now holds {history_len} sentences");

    Ok(())
}
