// Translation resolution
//
// - dictionary: immutable English/Persian phrase tables
// - normalize: punctuation/whitespace normalization and case folding
// - offline: exact, longest-substring and word-walk dictionary matching
// - remote: LibreTranslate-compatible HTTP translator
// - engine: remote first, dictionary fallback

pub mod dictionary;
pub mod normalize;
pub mod offline;
pub mod remote;
pub mod engine;

use async_trait::async_trait;

pub use dictionary::{PhraseDictionary, PhraseEntry, PhraseTable};
pub use engine::TranslationEngine;
pub use normalize::normalize;
pub use offline::{DictionaryResolver, OfflineResolution, TranslationKind};
pub use remote::LibreTranslateClient;

use crate::error::Result;
use crate::language::Direction;

/// Prefix marking an answer produced by the dictionary after the remote translator failed
pub const FALLBACK_TAG: &str = "[API failed, dictionary fallback]";

/// A machine translation service reached over the network
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteTranslator: Send + Sync {
    /// Translate `text` from the direction's source language to its target.
    ///
    /// Fails with `RemoteUnavailable` when the service cannot be reached and
    /// `RemoteRejected` when it answers with an error or an unexpected payload.
    async fn translate(&self, text: &str, direction: Direction) -> Result<String>;
}
