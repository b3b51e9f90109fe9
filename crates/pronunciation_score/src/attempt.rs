use async_trait::async_trait;

use crate::scorer::{MatchResult, PronunciationScorer};

/// Encoded recording of one practice attempt, as produced by audio capture.
#[derive(Debug, Clone, Default)]
pub struct RecordedAudio {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Speech-to-text backend. Implementations own upload, polling and retries.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &RecordedAudio, language: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone)]
pub struct AttemptReport {
    pub recognized_text: String,
    pub result: MatchResult,
    pub transcription_error: Option<String>,
}

impl AttemptReport {
    pub fn transcription_failed(&self) -> bool {
        self.transcription_error.is_some()
    }
}

/// Transcribe one recording and score it against `expected`.
///
/// A failed transcription is scored as an empty transcript, so the caller
/// always gets a well-formed result plus the error to surface.
pub async fn score_attempt(
    transcriber: &dyn Transcriber,
    scorer: &PronunciationScorer,
    audio: &RecordedAudio,
    expected: &str,
    language: &str,
) -> AttemptReport {
    let (recognized_text, transcription_error) = match transcriber.transcribe(audio, language).await {
        Ok(text) => (text, None),
        Err(e) => {
            log::warn!(
                "transcription failed ({} bytes, {}): {:#}",
                audio.bytes.len(),
                audio.mime_type,
                e
            );
            (String::new(), Some(format!("{e:#}")))
        }
    };
    let result = scorer.score(expected, &recognized_text);
    AttemptReport {
        recognized_text,
        result,
        transcription_error,
    }
}
