use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, SentimentError};

/// Which segments a consumer of classifier output looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentFilter {
    /// Every segment, including empty fragments of the split.
    All,
    /// Only segments whose trimmed text is non-empty.
    NonEmpty,
}

impl SegmentFilter {
    pub fn keeps(self, text: &str) -> bool {
        match self {
            SegmentFilter::All => true,
            SegmentFilter::NonEmpty => !text.trim().is_empty(),
        }
    }
}

/// Output space of the built-in lexicon classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LexiconMode {
    /// POSITIVE or NEGATIVE only.
    #[default]
    Binary,
    /// Scores whose magnitude falls inside the band are NEUTRAL.
    ThreeWay { neutral_band: f64 },
}

/// Filtering applied by the distribution and export consumers.
///
/// The history log never records blank segments. The defaults keep the
/// historical behaviour where the distribution and the export table still
/// count every segment, blank ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub distribution: SegmentFilter,
    pub export: SegmentFilter,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            distribution: SegmentFilter::All,
            export: SegmentFilter::All,
        }
    }
}

impl FilterConfig {
    /// Skip blank segments in every consumer, matching the history log.
    pub fn unified() -> Self {
        Self {
            distribution: SegmentFilter::NonEmpty,
            export: SegmentFilter::NonEmpty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub terminator: char,
    pub filters: FilterConfig,
    pub export_file_name: String,
    pub lexicon: LexiconMode,
}

pub const DEFAULT_EXPORT_FILE_NAME: &str = "sentiment_results.csv";

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            terminator: '.',
            filters: FilterConfig::default(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            lexicon: LexiconMode::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AnalyzerConfig = toml::from_str(contents).map_err(SentimentError::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SentimentError::io("reading configuration", e))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.terminator.is_whitespace() {
            return Err(SentimentError::config(
                "terminator must not be a whitespace character",
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(SentimentError::config("export_file_name must not be empty"));
        }
        if let LexiconMode::ThreeWay { neutral_band } = self.lexicon {
            if !(0.0..1.0).contains(&neutral_band) {
                return Err(SentimentError::config(format!(
                    "neutral_band must be in [0, 1), got {neutral_band}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_count_blank_segments() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.terminator, '.');
        assert_eq!(config.filters.distribution, SegmentFilter::All);
        assert_eq!(config.filters.export, SegmentFilter::All);
        assert_eq!(config.export_file_name, "sentiment_results.csv");
        assert_eq!(config.lexicon, LexiconMode::Binary);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() -> anyhow::Result<()> {
        let config = AnalyzerConfig::from_toml_str(
            r#"
            export_file_name = "out.csv"

            [filters]
            distribution = "non_empty"

            [lexicon]
            kind = "three_way"
            neutral_band = 0.2
            "#,
        )?;
        assert_eq!(config.export_file_name, "out.csv");
        assert_eq!(config.filters.distribution, SegmentFilter::NonEmpty);
        assert_eq!(config.filters.export, SegmentFilter::All);
        assert_eq!(config.lexicon, LexiconMode::ThreeWay { neutral_band: 0.2 });
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_neutral_band() {
        let err = AnalyzerConfig::from_toml_str(
            r#"
            [lexicon]
            kind = "three_way"
            neutral_band = 1.5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SentimentError::Config { .. }));
    }

    #[test]
    fn segment_filter_keeps() {
        assert!(SegmentFilter::All.keeps("   "));
        assert!(!SegmentFilter::NonEmpty.keeps(" \t"));
        assert!(SegmentFilter::NonEmpty.keeps(" hi "));
    }
}
