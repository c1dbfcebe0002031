use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, TarjomanError};
use crate::language::Direction;
use super::dictionary::PhraseDictionary;
use super::offline::{DictionaryResolver, OfflineResolution};
use super::remote::LibreTranslateClient;
use super::{FALLBACK_TAG, RemoteTranslator};

/// Remote-first translator with an offline dictionary fallback.
///
/// Cheap to clone and safe to share between tasks: the dictionary is
/// immutable and no state is kept between calls.
#[derive(Clone)]
pub struct TranslationEngine {
    remote: Option<Arc<dyn RemoteTranslator>>,
    resolver: DictionaryResolver,
    timeout: Option<Duration>,
}

impl TranslationEngine {
    pub fn new(remote: Arc<dyn RemoteTranslator>, dictionary: Arc<PhraseDictionary>) -> Self {
        Self {
            remote: Some(remote),
            resolver: DictionaryResolver::new(dictionary),
            timeout: None,
        }
    }

    /// Engine without a remote translator; every call falls back to the dictionary
    pub fn offline(dictionary: Arc<PhraseDictionary>) -> Self {
        Self {
            remote: None,
            resolver: DictionaryResolver::new(dictionary),
            timeout: None,
        }
    }

    /// Give up on the remote translator after `timeout` and use the dictionary instead
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut dictionary = PhraseDictionary::builtin();
        if let Some(path) = &config.dictionary.extra_phrases {
            dictionary = dictionary.extended_with(path)?;
        }
        let dictionary = Arc::new(dictionary);

        if !config.remote.enabled {
            info!("Remote translation disabled, using the phrase dictionary only");
            return Ok(Self::offline(dictionary));
        }

        let client = LibreTranslateClient::new(&config.remote)?;
        info!("Using translation server at {}", client.url());

        Ok(Self::new(Arc::new(client), dictionary)
            .with_timeout(Duration::from_secs(config.remote.timeout_secs.max(1))))
    }

    pub fn resolver(&self) -> &DictionaryResolver {
        &self.resolver
    }

    /// Translate `text`, falling back to the dictionary when the remote translator fails.
    ///
    /// Never fails: degraded answers carry the fallback tag and total failures
    /// come back as a bracketed error string.
    pub async fn translate(&self, text: &str, direction: Direction) -> String {
        if text.trim().is_empty() {
            debug!("Translation skipped: empty text");
            return String::new();
        }

        info!("Translating {} chars ({})", text.chars().count(), direction);

        let error = match self.resolve_remote(text, direction).await {
            Ok(translation) => return translation,
            Err(e) => e,
        };

        warn!("Remote translation failed, falling back to dictionary: {}", error);

        match self.resolver.resolve_offline(text, direction) {
            OfflineResolution::Untranslatable(marker) => {
                debug!("Dictionary fallback found nothing: {}", marker);
                format!("[Translation error: {}]", error)
            }
            resolution => {
                info!("Dictionary fallback produced a {:?} result", resolution.kind());
                format!("{} {}", FALLBACK_TAG, resolution.text())
            }
        }
    }

    /// Like [`translate`](Self::translate), with the direction given as a language code.
    ///
    /// The only error is `InvalidDirection`.
    pub async fn translate_code(&self, text: &str, source: &str) -> Result<String> {
        let direction: Direction = source.parse()?;
        Ok(self.translate(text, direction).await)
    }

    /// Dictionary-only resolution
    pub fn translate_offline(&self, text: &str, direction: Direction) -> OfflineResolution {
        self.resolver.resolve_offline(text, direction)
    }

    async fn resolve_remote(&self, text: &str, direction: Direction) -> Result<String> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| TarjomanError::RemoteUnavailable("remote translation disabled".to_string()))?;

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, remote.translate(text, direction))
                .await
                .map_err(|_| {
                    TarjomanError::RemoteUnavailable(format!("no answer within {}s", limit.as_secs_f32()))
                })?,
            None => remote.translate(text, direction).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MockRemoteTranslator;
    use async_trait::async_trait;
    use mockall::predicate::eq;

    fn dictionary() -> Arc<PhraseDictionary> {
        Arc::new(PhraseDictionary::builtin())
    }

    fn failing(error: fn() -> TarjomanError) -> MockRemoteTranslator {
        let mut mock = MockRemoteTranslator::new();
        mock.expect_translate().returning(move |_, _| Err(error()));
        mock
    }

    #[tokio::test]
    async fn test_remote_success_is_verbatim() {
        let mut mock = MockRemoteTranslator::new();
        mock.expect_translate()
            .with(eq("Hello there"), eq(Direction::EnglishToPersian))
            .times(1)
            .returning(|_, _| Ok("سلام آنجا".to_string()));

        let engine = TranslationEngine::new(Arc::new(mock), dictionary());
        assert_eq!(engine.translate("Hello there", Direction::EnglishToPersian).await, "سلام آنجا");
    }

    #[tokio::test]
    async fn test_empty_input_skips_remote() {
        let mut mock = MockRemoteTranslator::new();
        mock.expect_translate().times(0);

        let engine = TranslationEngine::new(Arc::new(mock), dictionary());
        assert_eq!(engine.translate("", Direction::EnglishToPersian).await, "");
        assert_eq!(engine.translate("   \n", Direction::PersianToEnglish).await, "");
    }

    #[tokio::test]
    async fn test_fallback_when_unavailable() {
        let mock = failing(|| TarjomanError::RemoteUnavailable("connection refused".to_string()));
        let engine = TranslationEngine::new(Arc::new(mock), dictionary());

        let expected = format!(
            "{} {}",
            FALLBACK_TAG,
            engine.translate_offline("Hello", Direction::EnglishToPersian).text()
        );
        assert_eq!(engine.translate("Hello", Direction::EnglishToPersian).await, expected);
        assert_eq!(expected, "[API failed, dictionary fallback] سلام");
    }

    #[tokio::test]
    async fn test_fallback_when_rejected_keeps_partial_markers() {
        let mock = failing(|| TarjomanError::RemoteRejected("500".to_string()));
        let engine = TranslationEngine::new(Arc::new(mock), dictionary());

        assert_eq!(
            engine.translate("xyz abc", Direction::EnglishToPersian).await,
            "[API failed, dictionary fallback] [xyz] [abc]"
        );
    }

    #[tokio::test]
    async fn test_error_annotation_when_dictionary_fails() {
        let mock = failing(|| TarjomanError::RemoteRejected("API error 400: bad request".to_string()));
        let engine = TranslationEngine::new(Arc::new(mock), dictionary());

        // Punctuation-only input survives the trim check but normalizes to nothing
        assert_eq!(
            engine.translate("?!", Direction::EnglishToPersian).await,
            "[Translation error: Translation server rejected the request: API error 400: bad request]"
        );
    }

    #[tokio::test]
    async fn test_offline_engine_tags_fallback() {
        let engine = TranslationEngine::offline(dictionary());
        assert_eq!(
            engine.translate("سلام", Direction::PersianToEnglish).await,
            "[API failed, dictionary fallback] Hello"
        );
    }

    #[tokio::test]
    async fn test_translate_code() {
        let engine = TranslationEngine::offline(dictionary());
        assert_eq!(
            engine.translate_code("Thanks", "en").await.unwrap(),
            "[API failed, dictionary fallback] ممنون"
        );
        assert!(matches!(
            engine.translate_code("Thanks", "de").await,
            Err(TarjomanError::InvalidDirection(_))
        ));
    }

    struct SlowRemote;

    #[async_trait]
    impl RemoteTranslator for SlowRemote {
        async fn translate(&self, _text: &str, _direction: Direction) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let engine = TranslationEngine::new(Arc::new(SlowRemote), dictionary())
            .with_timeout(Duration::from_secs(5));

        assert_eq!(
            engine.translate("Goodbye", Direction::EnglishToPersian).await,
            "[API failed, dictionary fallback] خداحافظ"
        );
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let mut mock = MockRemoteTranslator::new();
        mock.expect_translate()
            .returning(|text, _| {
                if text.starts_with('x') {
                    Err(TarjomanError::RemoteUnavailable("down".to_string()))
                } else {
                    Ok(format!("remote:{}", text))
                }
            });
        let engine = TranslationEngine::new(Arc::new(mock), dictionary());

        let handles: Vec<_> = ["Hello", "xyz", "Bread", "xxx"]
            .into_iter()
            .map(|text| {
                let engine = engine.clone();
                tokio::spawn(async move { engine.translate(text, Direction::EnglishToPersian).await })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(results[0], "remote:Hello");
        assert_eq!(results[1], "[API failed, dictionary fallback] [xyz]");
        assert_eq!(results[2], "remote:Bread");
        assert_eq!(results[3], "[API failed, dictionary fallback] [xxx]");
    }
}
