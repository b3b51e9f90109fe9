use serde::{Deserialize, Serialize};

use crate::feedback::{Progression, ScoreBand};
use crate::normalize::{display_words, normalize_text, tokenize_words, CharClass};
use crate::similarity::{is_fuzzy_match, DEFAULT_FUZZY_THRESHOLD};

/// How an expected word is considered "found" among the recognized words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPredicate {
    /// Edit-distance similarity above the fuzzy threshold.
    #[default]
    Fuzzy,
    /// Either word contains the other. Enables the whole-sentence bonus.
    Substring,
}

/// Tunable scoring constants. Defaults reproduce the shipped behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    pub predicate: MatchPredicate,
    pub fuzzy_threshold: f64,
    /// Responses with fewer words than `ratio * expected` are penalized.
    pub short_response_ratio: f64,
    pub short_response_penalty: f64,
    pub substring_bonus: f64,
    pub char_class: CharClass,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            predicate: MatchPredicate::Fuzzy,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            short_response_ratio: 0.5,
            short_response_penalty: 0.7,
            substring_bonus: 10.0,
            char_class: CharClass::Ascii,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0..=100
    pub score: u8,
    /// Expected words with no matching recognized word, in sentence order.
    pub missing_words: Vec<String>,
    /// One flag per recognized word, aligned with `recognized_words`.
    pub matched_flags: Vec<bool>,
    /// Recognized words with their original casing and punctuation.
    pub recognized_words: Vec<String>,
}

impl MatchResult {
    pub fn highlighted(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.recognized_words
            .iter()
            .map(String::as_str)
            .zip(self.matched_flags.iter().copied())
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    pub fn progression(&self, pass_threshold: u8) -> Progression {
        Progression::decide(self.score, pass_threshold)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PronunciationScorer {
    params: ScoringParams,
}

impl PronunciationScorer {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score a recognized transcript against the expected sentence.
    ///
    /// Never fails: empty or punctuation-only inputs on either side yield a
    /// score of 0 with the corresponding degenerate word lists.
    pub fn score(&self, expected: &str, recognized: &str) -> MatchResult {
        let p = &self.params;
        let expected_norm = normalize_text(expected, p.char_class);
        let expected_tokens = tokenize_words(&expected_norm);
        let (recognized_words, recognized_tokens): (Vec<&str>, Vec<String>) =
            display_words(recognized, p.char_class).into_iter().unzip();

        if expected_tokens.is_empty() {
            log::debug!("empty expected sentence; nothing to score against");
            return MatchResult {
                score: 0,
                missing_words: Vec::new(),
                matched_flags: vec![false; recognized_tokens.len()],
                recognized_words: owned(&recognized_words),
            };
        }
        if recognized_tokens.is_empty() {
            log::debug!("empty recognized transcript for {:?}", expected_norm);
            return MatchResult {
                score: 0,
                missing_words: owned(&expected_tokens),
                matched_flags: Vec::new(),
                recognized_words: Vec::new(),
            };
        }

        let matched_flags = recognized_tokens
            .iter()
            .map(|r| {
                expected_tokens
                    .iter()
                    .any(|e| is_fuzzy_match(r, e, p.fuzzy_threshold))
            })
            .collect::<Vec<_>>();

        if expected_tokens.iter().copied().eq(recognized_tokens.iter().map(String::as_str)) {
            return MatchResult {
                score: 100,
                missing_words: Vec::new(),
                matched_flags,
                recognized_words: owned(&recognized_words),
            };
        }

        let missing_words = expected_tokens
            .iter()
            .filter(|e| !recognized_tokens.iter().any(|r| self.found(e, r)))
            .map(|e| e.to_string())
            .collect::<Vec<_>>();
        let matched = expected_tokens.len() - missing_words.len();

        let mut score = (100.0 * matched as f64 / expected_tokens.len() as f64).round();

        if p.predicate == MatchPredicate::Substring {
            let expected_joined = expected_tokens.join(" ");
            let recognized_joined = recognized_tokens.join(" ");
            if recognized_joined.contains(&expected_joined) {
                score += p.substring_bonus;
            }
        }

        if (recognized_tokens.len() as f64) < p.short_response_ratio * expected_tokens.len() as f64 {
            score *= p.short_response_penalty;
        }

        MatchResult {
            score: score.clamp(0.0, 100.0).round() as u8,
            missing_words,
            matched_flags,
            recognized_words: owned(&recognized_words),
        }
    }

    fn found(&self, expected: &str, recognized: &str) -> bool {
        match self.params.predicate {
            MatchPredicate::Fuzzy => is_fuzzy_match(recognized, expected, self.params.fuzzy_threshold),
            MatchPredicate::Substring => recognized.contains(expected) || expected.contains(recognized),
        }
    }
}

/// Score with the default parameters.
pub fn score(expected: &str, recognized: &str) -> MatchResult {
    PronunciationScorer::default().score(expected, recognized)
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
