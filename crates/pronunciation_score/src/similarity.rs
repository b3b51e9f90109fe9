/// Recognized words closer than this to an expected word count as a match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

/// Unit-cost edit distance (insert, delete, substitute).
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    // DP with O(min(m,n)) memory.
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let n = long.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for i in 1..=n {
        curr[0] = i;
        for j in 1..=m {
            curr[j] = if long[i - 1] == short[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j - 1].min(curr[j - 1]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Similarity in `[0, 1]` relative to the longer word, measured in chars.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (longer, shorter) = if a.len() > b.len() { (&a, &b) } else { (&b, &a) };
    if longer.is_empty() {
        return 1.0;
    }
    let distance = levenshtein(longer, shorter);
    (longer.len() - distance) as f64 / longer.len() as f64
}

pub fn is_fuzzy_match(a: &str, b: &str, threshold: f64) -> bool {
    word_similarity(a, b) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars("flaw"), &chars("lawn")), 2);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein(&chars("abc"), &chars("")), 3);
        assert_eq!(levenshtein(&chars("same"), &chars("same")), 0);
    }

    #[test]
    fn test_levenshtein_tokens() {
        // ref: a b c d
        // hyp: a b x d  => 1 substitution
        assert_eq!(levenshtein(&["a", "b", "c", "d"], &["a", "b", "x", "d"]), 1);
        assert_eq!(levenshtein(&["a", "b"], &["b"]), 1);
    }

    #[test]
    fn test_similarity_boundaries() {
        let s = word_similarity("coffee", "coffe");
        assert!((s - 5.0 / 6.0).abs() < 1e-9);
        assert!(is_fuzzy_match("coffee", "coffe", DEFAULT_FUZZY_THRESHOLD));
        assert!(!is_fuzzy_match("coffee", "tea", DEFAULT_FUZZY_THRESHOLD));
        assert_eq!(word_similarity("menu", "menu"), 1.0);
        assert_eq!(word_similarity("", ""), 1.0);
        assert_eq!(word_similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_similarity_symmetric() {
        let words = ["coffee", "coffe", "tea", "learn", "english", "i", "", "menu", "many"];
        for a in words {
            for b in words {
                assert_eq!(word_similarity(a, b), word_similarity(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        // 7 of 10 chars survive: similarity is exactly 0.7, which does not match.
        assert!((word_similarity("abcdefghij", "abcdefgxyz") - 0.7).abs() < 1e-9);
        assert!(!is_fuzzy_match("abcdefghij", "abcdefgxyz", 0.7));
    }
}
