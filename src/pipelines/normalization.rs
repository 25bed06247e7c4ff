//! Language normalization: turning declared-language input into English text.
//!
//! Translation itself is delegated to a [`Translator`] backend. The normalizer
//! only decides *whether* to translate and enforces that a failed translation
//! aborts the analysis instead of falling back to the untranslated text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Result, SentimentError};

/// Source languages accepted by the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    French,
    Spanish,
    German,
    Bengali,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::French,
        Language::Spanish,
        Language::German,
        Language::Bengali,
    ];

    /// Language code handed to the translation backend.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::German => "de",
            Language::Bengali => "bn",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Bengali => "Bengali",
        }
    }

    pub fn is_english(self) -> bool {
        self == Language::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Language {
    type Err = SentimentError;

    /// Accepts either the English name or the code, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.name().eq_ignore_ascii_case(wanted) || lang.code().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SentimentError::config(format!("unsupported language '{s}'")))
    }
}

/// External translation capability.
pub trait Translator {
    /// Translate the whole of `text` from `source` into `target`.
    fn translate(&self, text: &str, source: Language, target: Language) -> anyhow::Result<String>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, source: Language, target: Language) -> anyhow::Result<String> {
        (**self).translate(text, source, target)
    }
}

impl<T: Translator + ?Sized> Translator for std::sync::Arc<T> {
    fn translate(&self, text: &str, source: Language, target: Language) -> anyhow::Result<String> {
        (**self).translate(text, source, target)
    }
}

/// Backend used when none is configured: every translation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslator;

impl Translator for NoTranslator {
    fn translate(&self, _text: &str, source: Language, _target: Language) -> anyhow::Result<String> {
        anyhow::bail!("no translation backend configured for {source}")
    }
}

/// Adapts a closure into a [`Translator`].
pub struct FnTranslator<F>(F);

impl<F> FnTranslator<F>
where
    F: Fn(&str, Language, Language) -> anyhow::Result<String>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Translator for FnTranslator<F>
where
    F: Fn(&str, Language, Language) -> anyhow::Result<String>,
{
    fn translate(&self, text: &str, source: Language, target: Language) -> anyhow::Result<String> {
        (self.0)(text, source, target)
    }
}

pub struct LanguageNormalizer<T: Translator> {
    translator: T,
}

impl<T: Translator> LanguageNormalizer<T> {
    pub fn new(translator: T) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Return `text` in English, translating it in a single call if needed.
    pub fn normalize(&self, text: &str, language: Language) -> Result<String> {
        if language.is_english() {
            return Ok(text.to_string());
        }

        tracing::debug!(language = language.code(), chars = text.len(), "translating input");
        let translated = self
            .translator
            .translate(text, language, Language::English)
            .map_err(|e| SentimentError::normalization(language, format!("{e:#}")))?;

        if translated.trim().is_empty() && !text.trim().is_empty() {
            return Err(SentimentError::normalization(
                language,
                "translation backend returned empty text",
            ));
        }
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn english_passes_through_without_translation() -> anyhow::Result<()> {
        let calls = Cell::new(0);
        let normalizer = LanguageNormalizer::new(FnTranslator::new(|_: &str, _, _| {
            calls.set(calls.get() + 1);
            Ok("should not be used".to_string())
        }));
        let out = normalizer.normalize("Keep me. As is.", Language::English)?;
        assert_eq!(out, "Keep me. As is.");
        assert_eq!(calls.get(), 0);
        Ok(())
    }

    #[test]
    fn translates_whole_text_once() -> anyhow::Result<()> {
        let calls = Cell::new(0);
        let normalizer = LanguageNormalizer::new(FnTranslator::new(|text: &str, src, dest| {
            calls.set(calls.get() + 1);
            assert_eq!(src, Language::French);
            assert_eq!(dest, Language::English);
            assert_eq!(text, "J'adore. Je déteste.");
            Ok("I love it. I hate it.".to_string())
        }));
        let out = normalizer.normalize("J'adore. Je déteste.", Language::French)?;
        assert_eq!(out, "I love it. I hate it.");
        assert_eq!(calls.get(), 1);
        Ok(())
    }

    #[test]
    fn failure_does_not_fall_back() {
        let normalizer = LanguageNormalizer::new(NoTranslator);
        let err = normalizer.normalize("Hola", Language::Spanish).unwrap_err();
        match err {
            SentimentError::Normalization { language, .. } => {
                assert_eq!(language, Language::Spanish)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_translation_is_an_error() {
        let normalizer =
            LanguageNormalizer::new(FnTranslator::new(|_: &str, _, _| Ok("   ".to_string())));
        assert!(normalizer.normalize("Hallo", Language::German).is_err());
    }

    #[test]
    fn parses_names_and_codes() -> anyhow::Result<()> {
        assert_eq!("bengali".parse::<Language>()?, Language::Bengali);
        assert_eq!("FR".parse::<Language>()?, Language::French);
        assert_eq!(Language::German.code(), "de");
        assert!("klingon".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::English);
        Ok(())
    }
}
