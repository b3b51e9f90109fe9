use serde::{Deserialize, Serialize};

/// Scores at or above this let the learner move on to the next sentence.
pub const DEFAULT_PASS_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    TryAgain,
    KeepPracticing,
    NotBad,
    Good,
    VeryGood,
    Excellent,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 6] = [
        ScoreBand::Excellent,
        ScoreBand::VeryGood,
        ScoreBand::Good,
        ScoreBand::NotBad,
        ScoreBand::KeepPracticing,
        ScoreBand::TryAgain,
    ];

    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::NotBad,
            40..=59 => ScoreBand::KeepPracticing,
            _ => ScoreBand::TryAgain,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent!",
            ScoreBand::VeryGood => "Very good!",
            ScoreBand::Good => "Good!",
            ScoreBand::NotBad => "Not bad!",
            ScoreBand::KeepPracticing => "Keep practicing!",
            ScoreBand::TryAgain => "Try again!",
        }
    }

    pub fn tier(self) -> ScoreTier {
        match self {
            ScoreBand::Excellent | ScoreBand::VeryGood => ScoreTier::High,
            ScoreBand::Good | ScoreBand::NotBad => ScoreTier::Medium,
            ScoreBand::KeepPracticing | ScoreBand::TryAgain => ScoreTier::Low,
        }
    }
}

/// Coarse colour bucket for rendering a score (green / amber / red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progression {
    Continue,
    Retry,
}

impl Progression {
    pub fn decide(score: u8, pass_threshold: u8) -> Self {
        if score >= pass_threshold {
            Progression::Continue
        } else {
            Progression::Retry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(90), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(89), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::NotBad);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::KeepPracticing);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::KeepPracticing);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::TryAgain);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::TryAgain);
    }

    #[test]
    fn test_tier_matches_colour_cutoffs() {
        assert_eq!(ScoreBand::from_score(80).tier(), ScoreTier::High);
        assert_eq!(ScoreBand::from_score(79).tier(), ScoreTier::Medium);
        assert_eq!(ScoreBand::from_score(60).tier(), ScoreTier::Medium);
        assert_eq!(ScoreBand::from_score(59).tier(), ScoreTier::Low);
    }

    #[test]
    fn test_progression() {
        assert_eq!(Progression::decide(70, DEFAULT_PASS_THRESHOLD), Progression::Continue);
        assert_eq!(Progression::decide(69, DEFAULT_PASS_THRESHOLD), Progression::Retry);
        assert_eq!(Progression::decide(0, 0), Progression::Continue);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ScoreBand::Excellent.message(), "Excellent!");
        assert_eq!(ScoreBand::TryAgain.message(), "Try again!");
    }
}
