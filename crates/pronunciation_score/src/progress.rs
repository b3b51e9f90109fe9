#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceState {
    Pending,
    Completed { score: u8 },
}

/// Per-conversation tally of sentence scores for one practice session.
#[derive(Debug, Clone)]
pub struct ConversationProgress {
    sentences: Vec<SentenceState>,
    current_index: usize,
}

impl ConversationProgress {
    pub fn new(total_sentences: usize) -> Self {
        Self {
            sentences: vec![SentenceState::Pending; total_sentences],
            current_index: 0,
        }
    }

    pub fn total_sentences(&self) -> usize {
        self.sentences.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self, index: usize) -> Option<SentenceState> {
        self.sentences.get(index).copied()
    }

    /// Record a passing attempt. A later attempt overwrites the earlier score.
    pub fn complete_sentence(&mut self, index: usize, score: u8) -> anyhow::Result<()> {
        let total = self.sentences.len();
        let slot = self
            .sentences
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("sentence index {index} out of range (conversation has {total})"))?;
        *slot = SentenceState::Completed { score: score.min(100) };
        if index == self.current_index && index + 1 < total {
            self.current_index = index + 1;
        }
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.scores().count()
    }

    pub fn is_completed(&self) -> bool {
        !self.sentences.is_empty() && self.completed_count() == self.sentences.len()
    }

    /// Rounded mean of completed sentence scores, 0 before any completion.
    pub fn overall_score(&self) -> u8 {
        let (sum, n) = self.scores().fold((0u32, 0u32), |(s, n), v| (s + v as u32, n + 1));
        if n == 0 {
            return 0;
        }
        (sum as f64 / n as f64).round() as u8
    }

    pub fn progress_percentage(&self) -> u8 {
        if self.sentences.is_empty() {
            return 0;
        }
        (100.0 * self.completed_count() as f64 / self.sentences.len() as f64).round() as u8
    }

    pub fn reset(&mut self) {
        self.sentences.fill(SentenceState::Pending);
        self.current_index = 0;
    }

    fn scores(&self) -> impl Iterator<Item = u8> + '_ {
        self.sentences.iter().filter_map(|s| match s {
            SentenceState::Completed { score } => Some(*score),
            SentenceState::Pending => None,
        })
    }
}
