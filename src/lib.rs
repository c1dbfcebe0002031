//! Tarjoman - English/Persian phrase translation
//!
//! Translates short phrases through a remote machine translation service and
//! falls back to a bilingual phrase dictionary when the service is
//! unavailable. Dictionary answers stay explainable: unknown words come back
//! as `[word]` and degraded answers carry a fallback tag.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod language;
pub mod session;
pub mod speech;
pub mod translate;

pub use error::{Result, TarjomanError};
pub use language::{Direction, Language};
pub use translate::{TranslationEngine, TranslationKind};
