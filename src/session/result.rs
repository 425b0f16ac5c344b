use thiserror::Error;

use crate::session::controller::{self, WordStatus};
use crate::session::text::TimeLimit;

/// Rate metrics are undefined over a session that ended at elapsed time zero.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("cannot compute a rate over a session with zero elapsed time")]
pub struct DegenerateSessionError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordCounts {
    pub correct: usize,
    pub incorrect: usize,
    pub remaining: usize,
}

/// Immutable snapshot taken when a session ends. Word classification counts
/// always sum to the expected word count.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultStats {
    pub words: WordCounts,
    pub time_limit: TimeLimit,
    pub time_played_secs: u64,
}

impl ResultStats {
    /// Classify every expected word against the received words at the given
    /// cursor position and capture the timing values.
    pub fn calculate(
        expected: &[String],
        received: &[String],
        cursor: usize,
        time_limit: TimeLimit,
        time_played_secs: u64,
    ) -> Self {
        let mut words = WordCounts::default();

        for index in 0..expected.len() {
            match controller::word_status(expected, received, cursor, index) {
                WordStatus::Correct => words.correct += 1,
                WordStatus::Incorrect => words.incorrect += 1,
                WordStatus::Current | WordStatus::Unreceived => words.remaining += 1,
            }
        }

        Self {
            words,
            time_limit,
            time_played_secs,
        }
    }

    pub fn took_minutes(&self) -> f64 {
        self.time_played_secs as f64 / 60.0
    }

    /// Words attempted per minute, counting incorrect attempts.
    pub fn wpm(&self) -> Result<f64, DegenerateSessionError> {
        let minutes = self.nonzero_minutes()?;
        Ok((self.words.correct + self.words.incorrect) as f64 / minutes)
    }

    /// Correct words per minute.
    pub fn effective_wpm(&self) -> Result<f64, DegenerateSessionError> {
        let minutes = self.nonzero_minutes()?;
        Ok(self.words.correct as f64 / minutes)
    }

    pub fn total_words(&self) -> usize {
        self.words.correct + self.words.incorrect + self.words.remaining
    }

    /// One-decimal display form, `"--"` for a zero-duration session.
    pub fn wpm_text(&self) -> String {
        Self::rate_text(self.wpm())
    }

    pub fn effective_wpm_text(&self) -> String {
        Self::rate_text(self.effective_wpm())
    }

    fn rate_text(rate: Result<f64, DegenerateSessionError>) -> String {
        match rate {
            Ok(value) => format!("{value:.1}"),
            Err(_) => "--".to_string(),
        }
    }

    fn nonzero_minutes(&self) -> Result<f64, DegenerateSessionError> {
        if self.time_played_secs == 0 {
            return Err(DegenerateSessionError);
        }
        Ok(self.took_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_counts_sum_to_expected_word_count() {
        let expected = words(&["a", "b", "c", "d", "e"]);
        let received = words(&["a", "x"]);
        let stats = ResultStats::calculate(&expected, &received, 2, TimeLimit::Off, 10);

        assert_eq!(stats.words.correct, 1);
        assert_eq!(stats.words.incorrect, 1);
        assert_eq!(stats.words.remaining, 3);
        assert_eq!(stats.total_words(), expected.len());
    }

    #[test]
    fn test_current_word_counts_as_remaining() {
        let expected = words(&["a", "b"]);
        let received = words(&["a"]);
        let stats = ResultStats::calculate(&expected, &received, 1, TimeLimit::Off, 10);

        assert_eq!(stats.words.correct, 1);
        assert_eq!(stats.words.remaining, 1);
    }

    #[test]
    fn test_rates_over_a_one_minute_session() {
        let expected = words(&["the", "quick", "fox"]);
        let received = words(&["the", "quick", "wrong"]);
        let stats = ResultStats::calculate(&expected, &received, 3, TimeLimit::Off, 60);

        assert_eq!(stats.words.correct, 2);
        assert_eq!(stats.words.incorrect, 1);
        assert_eq!(stats.words.remaining, 0);
        assert_eq!(stats.wpm_text(), "3.0");
        assert_eq!(stats.effective_wpm_text(), "2.0");
    }

    #[test]
    fn test_took_minutes() {
        let stats = ResultStats {
            words: WordCounts::default(),
            time_limit: TimeLimit::OneMinute,
            time_played_secs: 90,
        };
        assert_eq!(stats.took_minutes(), 1.5);
    }

    #[test]
    fn test_zero_elapsed_rates_are_degenerate() {
        let stats = ResultStats {
            words: WordCounts {
                correct: 3,
                incorrect: 1,
                remaining: 0,
            },
            time_limit: TimeLimit::Off,
            time_played_secs: 0,
        };

        assert_eq!(stats.wpm(), Err(DegenerateSessionError));
        assert_eq!(stats.effective_wpm(), Err(DegenerateSessionError));
        assert_eq!(stats.wpm_text(), "--");
        assert_eq!(stats.effective_wpm_text(), "--");
        // Counts stay usable even when rates are undefined.
        assert_eq!(stats.total_words(), 4);
    }

    #[test]
    fn test_empty_expected_words_never_happen_but_calculate_is_total() {
        let stats = ResultStats::calculate(&[], &[], 0, TimeLimit::Off, 5);
        assert_eq!(stats.total_words(), 0);
    }
}
