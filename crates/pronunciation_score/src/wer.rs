use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_text, tokenize_words, CharClass};
use crate::similarity::levenshtein;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WerStats {
    pub edits: usize,
    pub ref_words: usize,
    pub wer: f32,
}

/// Word error rate of `hyp_text` against `ref_text`, on normalized words.
pub fn wer(ref_text: &str, hyp_text: &str) -> WerStats {
    let r = normalize_text(ref_text, CharClass::Ascii);
    let h = normalize_text(hyp_text, CharClass::Ascii);
    let r_tok = tokenize_words(&r);
    let h_tok = tokenize_words(&h);
    let edits = levenshtein(&r_tok, &h_tok);
    let ref_words = r_tok.len();
    let wer = if ref_words == 0 {
        if h_tok.is_empty() { 0.0 } else { 1.0 }
    } else {
        edits as f32 / ref_words as f32
    };
    WerStats {
        edits,
        ref_words,
        wer,
    }
}
