use serde::{Deserialize, Serialize};

/// Which characters survive normalization besides whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// `[A-Za-z0-9]` only. Accented and non-Latin letters are dropped.
    #[default]
    Ascii,
    /// Any Unicode alphanumeric character.
    Unicode,
}

impl CharClass {
    fn keeps(self, c: char) -> bool {
        match self {
            CharClass::Ascii => c.is_ascii_alphanumeric(),
            CharClass::Unicode => c.is_alphanumeric(),
        }
    }
}

/// Lowercase, strip everything that is neither a kept character nor
/// whitespace, then trim. Inner whitespace runs are left alone.
pub fn normalize_text(s: &str, class: CharClass) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if class.keeps(c) {
            out.extend(c.to_lowercase());
        } else if c.is_whitespace() {
            out.push(c);
        }
    }
    out.trim().to_string()
}

pub fn tokenize_words(s: &str) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split_whitespace().collect()
}

/// Raw whitespace-separated words paired with their normalized form.
///
/// Words that normalize to nothing (a lone "?" or "--") are dropped, so the
/// normalized halves line up exactly with
/// `tokenize_words(&normalize_text(raw, class))`.
pub fn display_words(raw: &str, class: CharClass) -> Vec<(&str, String)> {
    raw.split_whitespace()
        .filter_map(|word| {
            let norm = normalize_text(word, class);
            if norm.is_empty() {
                None
            } else {
                Some((word, norm))
            }
        })
        .collect()
}
