//! Pronunciation scoring: compares what a learner was asked to say with
//! what speech-to-text heard, and reports a 0-100 score, the expected words
//! that were missed, and per-word flags for highlighting the transcript.

pub mod attempt;
pub mod feedback;
pub mod normalize;
pub mod progress;
pub mod scorer;
pub mod similarity;
pub mod wer;

pub use attempt::{score_attempt, AttemptReport, RecordedAudio, Transcriber};
pub use feedback::{Progression, ScoreBand, ScoreTier, DEFAULT_PASS_THRESHOLD};
pub use normalize::{normalize_text, tokenize_words, CharClass};
pub use progress::{ConversationProgress, SentenceState};
pub use scorer::{score, MatchPredicate, MatchResult, PronunciationScorer, ScoringParams};
pub use similarity::{is_fuzzy_match, levenshtein, word_similarity, DEFAULT_FUZZY_THRESHOLD};
pub use wer::{wer, WerStats};
