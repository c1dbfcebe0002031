// Speech collaborators
//
// Capture and playback live outside this crate (browser APIs, OS voices).
// Only their interfaces are defined here, plus two small implementations
// used by the CLI: typed lines as transcripts and a playback that only logs.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::info;

use crate::error::{Result, TarjomanError};

/// Transcript events produced while listening
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Partial transcript, may still change
    Interim(String),
    /// Completed utterance
    Final(String),
}

/// Source of transcript events; `None` means capture has stopped
#[async_trait]
pub trait SpeechCapture: Send {
    async fn next_event(&mut self) -> Result<Option<TranscriptEvent>>;
}

/// Reads the given text aloud in `locale` (e.g. "fa-IR")
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechPlayback: Send + Sync {
    async fn speak(&self, text: &str, locale: &str) -> Result<()>;
}

/// Treats every non-empty input line as a final transcript
pub struct LineCapture<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineCapture<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines() }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> SpeechCapture for LineCapture<R> {
    async fn next_event(&mut self) -> Result<Option<TranscriptEvent>> {
        loop {
            match self.lines.next_line().await? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(TranscriptEvent::Final(line))),
                None => return Ok(None),
            }
        }
    }
}

/// Playback that logs what would have been spoken
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayback;

#[async_trait]
impl SpeechPlayback for SilentPlayback {
    async fn speak(&self, text: &str, locale: &str) -> Result<()> {
        if locale.trim().is_empty() {
            return Err(TarjomanError::Speech("No locale given for playback".to_string()));
        }
        info!("Speaking ({}): {}", locale, text);
        Ok(())
    }
}
