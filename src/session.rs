use tracing::{debug, info, warn};

use crate::error::{Result, TarjomanError};
use crate::history::{HistoryEntry, TranslationHistory};
use crate::language::Direction;
use crate::speech::{SpeechCapture, SpeechPlayback, TranscriptEvent};
use crate::translate::TranslationEngine;

/// Translate what the user says or types, log it and read the answer back
pub struct TranslationSession {
    engine: TranslationEngine,
    history: TranslationHistory,
    playback: Option<Box<dyn SpeechPlayback>>,
}

impl TranslationSession {
    pub fn new(engine: TranslationEngine, history: TranslationHistory) -> Self {
        Self {
            engine,
            history,
            playback: None,
        }
    }

    pub fn with_playback(mut self, playback: Box<dyn SpeechPlayback>) -> Self {
        self.playback = Some(playback);
        self
    }

    /// Translate one phrase. Blank input is ignored and returns `None`.
    pub async fn submit(&mut self, text: &str, direction: Direction) -> Option<HistoryEntry> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let translation = self.engine.translate(text, direction).await;
        if translation.is_empty() {
            return None;
        }

        let entry = self.history.record(text, &translation, direction).clone();
        info!("{} → {} ({:?})", entry.text, entry.translation, entry.kind);

        if let Some(playback) = &self.playback {
            let locale = direction.target().speech_locale();
            if let Err(e) = playback.speak(&translation, locale).await {
                warn!("Playback failed: {}", e);
            }
        }

        Some(entry)
    }

    /// Submit every final transcript until capture stops
    pub async fn listen<C: SpeechCapture>(
        &mut self,
        capture: &mut C,
        direction: Direction,
    ) -> Result<Vec<HistoryEntry>> {
        info!("Listening for {} input", direction.source().name());
        let mut entries = Vec::new();

        while let Some(event) = capture.next_event().await? {
            match event {
                TranscriptEvent::Interim(partial) => debug!("Interim transcript: {}", partial),
                TranscriptEvent::Final(text) => {
                    if let Some(entry) = self.submit(&text, direction).await {
                        entries.push(entry);
                    }
                }
            }
        }

        info!("Capture stopped after {} translations", entries.len());
        Ok(entries)
    }

    /// Read the `n`th most recent translation aloud again (1 is the newest)
    pub async fn replay(&self, n: usize) -> Result<HistoryEntry> {
        let entry = self
            .history
            .nth_recent(n)
            .cloned()
            .ok_or_else(|| TarjomanError::History(format!("No history entry #{} ({} recorded)", n, self.history.len())))?;

        match &self.playback {
            Some(playback) => {
                let locale = entry.direction.target().speech_locale();
                playback.speak(&entry.translation, locale).await?;
            }
            None => warn!("Playback is disabled, not speaking entry #{}", n),
        }

        Ok(entry)
    }

    pub fn history(&self) -> &TranslationHistory {
        &self.history
    }

    pub fn save_history(&self) -> Result<()> {
        self.history.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{LineCapture, MockSpeechPlayback};
    use crate::translate::{PhraseDictionary, TranslationKind};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use std::collections::VecDeque;
    use std::sync::Arc;

    fn session(dir: &tempfile::TempDir) -> TranslationSession {
        let engine = TranslationEngine::offline(Arc::new(PhraseDictionary::builtin()));
        let history = TranslationHistory::new(dir.path().join("history.json"), 50);
        TranslationSession::new(engine, history)
    }

    #[tokio::test]
    async fn test_submit_records_and_speaks_target_locale() {
        let dir = tempfile::tempdir().unwrap();
        let mut playback = MockSpeechPlayback::new();
        playback
            .expect_speak()
            .with(eq("[API failed, dictionary fallback] سلام"), eq("fa-IR"))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut session = session(&dir).with_playback(Box::new(playback));
        let entry = session.submit("  Hello ", Direction::EnglishToPersian).await.unwrap();

        assert_eq!(entry.text, "Hello");
        assert_eq!(entry.kind, TranslationKind::Fallback);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_submission_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut playback = MockSpeechPlayback::new();
        playback.expect_speak().times(0);

        let mut session = session(&dir).with_playback(Box::new(playback));
        assert!(session.submit("   ", Direction::PersianToEnglish).await.is_none());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_playback_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut playback = MockSpeechPlayback::new();
        playback
            .expect_speak()
            .returning(|_, _| Err(TarjomanError::Speech("no voice".to_string())));

        let mut session = session(&dir).with_playback(Box::new(playback));
        let entry = session.submit("سلام", Direction::PersianToEnglish).await;
        assert!(entry.is_some());
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_speaks_nth_newest_in_target_locale() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = TranslationHistory::new(dir.path().join("history.json"), 50);
        history.record("Hello", "سلام", Direction::EnglishToPersian);
        history.record("خداحافظ", "Goodbye", Direction::PersianToEnglish);

        let mut playback = MockSpeechPlayback::new();
        playback
            .expect_speak()
            .with(eq("سلام"), eq("fa-IR"))
            .times(1)
            .returning(|_, _| Ok(()));
        playback
            .expect_speak()
            .with(eq("Goodbye"), eq("en-US"))
            .times(1)
            .returning(|_, _| Ok(()));

        let engine = TranslationEngine::offline(Arc::new(PhraseDictionary::builtin()));
        let session = TranslationSession::new(engine, history).with_playback(Box::new(playback));

        assert_eq!(session.replay(1).await.unwrap().text, "خداحافظ");
        assert_eq!(session.replay(2).await.unwrap().text, "Hello");
    }

    #[tokio::test]
    async fn test_replay_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut playback = MockSpeechPlayback::new();
        playback.expect_speak().times(0);

        let session = session(&dir).with_playback(Box::new(playback));
        assert!(matches!(session.replay(1).await, Err(TarjomanError::History(_))));
        assert!(matches!(session.replay(0).await, Err(TarjomanError::History(_))));
    }

    struct ScriptedCapture(VecDeque<TranscriptEvent>);

    #[async_trait]
    impl SpeechCapture for ScriptedCapture {
        async fn next_event(&mut self) -> Result<Option<TranscriptEvent>> {
            Ok(self.0.pop_front())
        }
    }

    #[tokio::test]
    async fn test_listen_submits_final_transcripts_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut capture = ScriptedCapture(VecDeque::from(vec![
            TranscriptEvent::Interim("Good".to_string()),
            TranscriptEvent::Final("Goodbye".to_string()),
            TranscriptEvent::Interim("Tha".to_string()),
            TranscriptEvent::Final("Thanks".to_string()),
        ]));

        let entries = session.listen(&mut capture, Direction::EnglishToPersian).await.unwrap();
        let translations: Vec<&str> = entries.iter().map(|e| e.translation.as_str()).collect();
        assert_eq!(
            translations,
            vec![
                "[API failed, dictionary fallback] خداحافظ",
                "[API failed, dictionary fallback] ممنون"
            ]
        );
    }

    #[tokio::test]
    async fn test_listen_with_typed_lines_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut capture = LineCapture::new("خداحافظ\n\nنان\n".as_bytes());

        let entries = session.listen(&mut capture, Direction::PersianToEnglish).await.unwrap();
        assert_eq!(entries.len(), 2);

        session.save_history().unwrap();
        let reloaded = TranslationHistory::load(dir.path().join("history.json"), 50).unwrap();
        assert_eq!(reloaded.len(), 2);
    }
}
