//! Command-line front end for the sentiment pipeline.
//!
//! Run with: cargo run --bin sentiment -- --text "I love this. I hate that."

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_pipeline::pipelines::export;
use sentiment_pipeline::{
    AnalyzerConfig, Label, Language, PipelineResult, RawInput, SentimentPipelineBuilder, Session,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(about = "Sentence-level sentiment analysis", long_about = None)]
struct Cli {
    /// Text to analyze
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// A .txt file, or a .csv file with a `text` column
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Source language (English, French, Spanish, German, Bengali)
    #[arg(short, long, default_value = "English")]
    language: String,

    /// Write the results table; without a path the configured file name is used
    #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
    output: Option<Option<PathBuf>>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the analysis as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Verbosity level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level: Level = cli
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let language: Language = cli.language.parse()?;

    let input = match (&cli.text, &cli.file) {
        (Some(text), _) => RawInput::from_text(text.clone(), language),
        (None, Some(path)) => RawInput::from_path(path, language)?,
        (None, None) => anyhow::bail!("please pass --text or --file"),
    };

    let pipeline = SentimentPipelineBuilder::from_config(config.clone()).build()?;
    let mut session = Session::new("cli");
    let result = pipeline.analyze(&input, &mut session)?;

    if cli.json {
        println!("{}", result.to_json()?);
    } else {
        print_report(&result);
    }

    if let Some(path) = cli.output {
        let path = path.unwrap_or_else(|| PathBuf::from(&config.export_file_name));
        export::save(&result.export, &path)?;
        eprintln!("Results written to {}", path.display());
    }

    Ok(())
}

fn print_report(result: &PipelineResult) {
    if result.was_translated() {
        println!("Translated text: {}", result.normalized_text);
        println!();
    }

    println!("Results");
    println!("{}", "-".repeat(60));
    for (segment, res) in result.sentences() {
        println!("Sentence {}: {}", segment.number(), segment.text.trim());
        println!(
            "Sentiment: {} {} | Confidence: {}",
            res.label,
            res.label.emoji(),
            res.confidence_percent()
        );
        println!("{}", "-".repeat(60));
    }

    println!();
    println!("Sentiment distribution");
    for label in Label::ALL {
        let count = result.distribution.count(label);
        println!("  {:<8} {:>4} {}", label, count, "#".repeat(count));
    }
}
