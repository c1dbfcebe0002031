use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TarjomanError};

/// The two languages the translator works between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Persian,
}

impl Language {
    /// ISO 639-1 code, as sent to the remote translator
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Persian => "fa",
        }
    }

    /// BCP 47 locale handed to speech capture and playback
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Persian => "fa-IR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Persian => "Persian",
        }
    }

    /// Whether the script distinguishes upper and lower case
    pub fn is_case_bearing(&self) -> bool {
        matches!(self, Self::English)
    }

    /// Punctuation stripped from input before dictionary lookups
    pub fn punctuation(&self) -> &'static [char] {
        match self {
            Self::English => &[',', '.', ';', '?', '!'],
            Self::Persian => &['،', '؛', '؟'],
        }
    }

    /// Phrase used when nothing at all could be resolved into this language
    pub fn untranslatable_phrase(&self) -> &'static str {
        match self {
            Self::English => "Could not translate",
            Self::Persian => "قابل ترجمه نیست",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        // "en-US" → "en", "fa_IR" → "fa"
        let base = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match base.as_str() {
            "en" | "english" => Ok(Self::English),
            "fa" | "persian" | "farsi" => Ok(Self::Persian),
            _ => Err(TarjomanError::InvalidDirection(format!(
                "Unsupported language '{}'. Valid languages: en, fa",
                code
            ))),
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::English => Self::Persian,
            Self::Persian => Self::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which language is the source and which the target for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    EnglishToPersian,
    PersianToEnglish,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::EnglishToPersian, Direction::PersianToEnglish];

    /// Direction whose source is `language`
    pub fn from_source(language: Language) -> Self {
        match language {
            Language::English => Self::EnglishToPersian,
            Language::Persian => Self::PersianToEnglish,
        }
    }

    pub fn source(&self) -> Language {
        match self {
            Self::EnglishToPersian => Language::English,
            Self::PersianToEnglish => Language::Persian,
        }
    }

    pub fn target(&self) -> Language {
        self.source().other()
    }

    pub fn reversed(&self) -> Self {
        Self::from_source(self.target())
    }
}

impl FromStr for Direction {
    type Err = TarjomanError;

    /// Accepts a source language code ("en", "fa-IR") or an explicit pair ("en-fa", "fa:en")
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let pair: Vec<&str> = trimmed.split([':', '>']).collect();

        if pair.len() == 2 {
            let source = Language::from_code(pair[0])?;
            let target = Language::from_code(pair[1])?;
            if source == target {
                return Err(TarjomanError::InvalidDirection(format!(
                    "Source and target are both '{}'",
                    source
                )));
            }
            return Ok(Self::from_source(source));
        }

        match trimmed.to_lowercase().as_str() {
            "en-fa" => Ok(Self::EnglishToPersian),
            "fa-en" => Ok(Self::PersianToEnglish),
            _ => Language::from_code(trimmed)
                .map(Self::from_source)
                .map_err(|_| {
                    TarjomanError::InvalidDirection(format!(
                        "Invalid direction '{}'. Valid values: en, fa, en-fa, fa-en",
                        s
                    ))
                }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source(), self.target())
    }
}
