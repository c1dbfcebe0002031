use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::language::Direction;
use super::dictionary::PhraseDictionary;
use super::normalize::{find_folded, fold, normalize};

/// What kind of answer a translation string carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationKind {
    /// A complete translation
    Translated,
    /// Some words were left as `[word]`
    Partial,
    /// Produced by the dictionary after the remote translator failed
    Fallback,
    /// Nothing could be resolved; the whole string is a bracketed marker
    Failed,
}

/// Openings of the markers written when nothing could be translated
const FAILURE_PREFIXES: [&str; 3] = ["[Translation error: ", "[Could not translate: ", "[قابل ترجمه نیست: "];

impl TranslationKind {
    /// Recover the kind from a returned string
    pub fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with(super::FALLBACK_TAG) {
            return Self::Fallback;
        }
        if FAILURE_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
            return Self::Failed;
        }
        if has_bracketed_token(trimmed) {
            return Self::Partial;
        }
        Self::Translated
    }
}

fn has_bracketed_token(text: &str) -> bool {
    text.split(' ')
        .any(|token| token.len() > 2 && token.starts_with('[') && token.ends_with(']'))
}

/// Result of an offline dictionary resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfflineResolution {
    Translated(String),
    Partial(String),
    Untranslatable(String),
}

impl OfflineResolution {
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) | Self::Partial(text) | Self::Untranslatable(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) | Self::Partial(text) | Self::Untranslatable(text) => text,
        }
    }

    pub fn kind(&self) -> TranslationKind {
        match self {
            Self::Translated(_) => TranslationKind::Translated,
            Self::Partial(_) => TranslationKind::Partial,
            Self::Untranslatable(_) => TranslationKind::Failed,
        }
    }

    pub fn is_untranslatable(&self) -> bool {
        matches!(self, Self::Untranslatable(_))
    }
}

impl fmt::Display for OfflineResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Offline resolver over a shared, immutable phrase dictionary
#[derive(Debug, Clone)]
pub struct DictionaryResolver {
    dictionary: Arc<PhraseDictionary>,
}

impl DictionaryResolver {
    pub fn new(dictionary: Arc<PhraseDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &PhraseDictionary {
        &self.dictionary
    }

    /// Resolve `text` with exact, longest-substring and word-walk matching, in that order
    pub fn resolve_offline(&self, text: &str, direction: Direction) -> OfflineResolution {
        let normalized = normalize(text, direction);
        debug!("Dictionary lookup ({}): {:?}", direction, normalized);

        if let Some(translation) = self.exact_match(&normalized, direction) {
            debug!("Exact phrase match: {:?} -> {:?}", normalized, translation);
            return OfflineResolution::Translated(translation);
        }

        if let Some(translation) = self.substring_match(&normalized, direction) {
            return OfflineResolution::Translated(translation);
        }

        let (joined, missed) = self.word_walk(&normalized, direction);
        if joined.is_empty() {
            let marker = format!("[{}: {}]", direction.target().untranslatable_phrase(), text);
            debug!("Nothing resolvable in {:?}", text);
            return OfflineResolution::Untranslatable(marker);
        }

        if missed > 0 {
            OfflineResolution::Partial(joined)
        } else {
            OfflineResolution::Translated(joined)
        }
    }

    fn exact_match(&self, normalized: &str, direction: Direction) -> Option<String> {
        if normalized.is_empty() {
            return None;
        }
        let table = self.dictionary.table(direction);
        table
            .get(&fold(normalized, direction.source()))
            .map(|entry| entry.target.clone())
    }

    /// Replace the single first occurrence of the longest contained phrase
    fn substring_match(&self, normalized: &str, direction: Direction) -> Option<String> {
        let table = self.dictionary.table(direction);

        for entry in table.by_length_desc() {
            if let Some((start, end)) = find_folded(normalized, &entry.source, direction.source()) {
                debug!("Partial phrase match: {:?} -> {:?}", entry.source, entry.target);
                let mut replaced = String::with_capacity(normalized.len() + entry.target.len());
                replaced.push_str(&normalized[..start]);
                replaced.push_str(&entry.target);
                replaced.push_str(&normalized[end..]);
                return Some(replaced);
            }
        }

        None
    }

    /// Bigram then unigram lookup per position; misses become `[word]`.
    /// Returns the joined string and the number of missed words.
    fn word_walk(&self, normalized: &str, direction: Direction) -> (String, usize) {
        let table = self.dictionary.table(direction);
        let language = direction.source();
        let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
        let folded: Vec<String> = words.iter().map(|w| fold(w, language)).collect();

        let mut tokens = Vec::with_capacity(words.len());
        let mut missed = 0;
        let mut i = 0;

        while i < words.len() {
            if i + 1 < words.len() {
                let bigram = format!("{} {}", folded[i], folded[i + 1]);
                if let Some(entry) = table.get(&bigram) {
                    debug!("Two-word match: {:?} -> {:?}", bigram, entry.target);
                    tokens.push(entry.target.clone());
                    i += 2;
                    continue;
                }
            }

            match table.get(&folded[i]) {
                Some(entry) => {
                    debug!("Single word match: {:?} -> {:?}", words[i], entry.target);
                    tokens.push(entry.target.clone());
                }
                None => {
                    debug!("No match for word: {:?}", words[i]);
                    tokens.push(format!("[{}]", words[i]));
                    missed += 1;
                }
            }
            i += 1;
        }

        (tokens.join(" "), missed)
    }
}
