//! Two-language localization switch for catalog text and section comments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Output language for localized catalog text and generated section comments.
///
/// Exactly two tokens are supported; anything else fails at the parse
/// boundary, never inside the assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// Lowercase wire tag (`"en"` / `"ru"`), used in snapshots and remote
    /// backend requests.
    pub fn as_tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(CoreError::UnsupportedLanguage {
                tag: other.to_string(),
            }),
        }
    }
}

/// A localized string pair, one entry per supported [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ru: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ru: impl Into<String>) -> Self {
        LocalizedText {
            en: en.into(),
            ru: ru.into(),
        }
    }

    /// Returns the string for `language`.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ru => &self.ru,
        }
    }
}
