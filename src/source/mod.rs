use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::session::text::Session;

const EASY_PASSAGES: &[&str] = &[
    "the cat sat on the mat and looked out at the rain",
    "she went to the shop to buy milk and bread for the week",
    "the sun came up over the hill and the day began",
    "he put on his coat and hat and walked out the door",
    "the dog ran across the field to fetch the red ball",
    "we sat by the fire and told old tales late into the night",
];

const MEDIUM_PASSAGES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog and then runs across the field while the sun sets behind the distant hills",
    "she walked along the narrow path through the forest listening to the birds singing in the trees above her head",
    "the old man sat on the bench watching the children play in the park while the autumn leaves fell softly around him",
    "the river flowed quietly through the green valley and the mountains rose high on either side covered with trees and snow",
    "they gathered around the fire telling stories and laughing while the wind howled outside and the snow piled up against the door",
    "morning mist hung low over the meadow as the first birds began their chorus and dew drops sparkled on every blade of grass",
];

const HARD_PASSAGES: &[&str] = &[
    "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife.",
    "When you have eliminated the impossible, whatever remains, however improbable, must be the truth; my dear Watson, nothing is more deceptive than an obvious fact.",
    "It was a bright cold day in April, and the clocks were striking thirteen; Winston Smith slipped quickly through the glass doors of Victory Mansions.",
    "I went to the woods because I wished to live deliberately, to front only the essential facts of life, and see if I could not learn what it had to teach.",
    "In my younger and more vulnerable years my father gave me some advice that I've been turning over in my mind ever since.",
];

/// Fixed set of difficulty keys, persisted as the last-used value in the
/// preference store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Difficulty::ALL.into_iter().find(|d| d.key() == key)
    }

    fn passages(self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => EASY_PASSAGES,
            Difficulty::Medium => MEDIUM_PASSAGES,
            Difficulty::Hard => HARD_PASSAGES,
        }
    }
}

/// Picks practice texts from the built-in passage lists.
pub struct TextSource {
    rng: SmallRng,
}

impl TextSource {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self, difficulty: Difficulty) -> Session {
        let passages = difficulty.passages();
        let text = passages[self.rng.gen_range(0..passages.len())];
        Session::new(text)
    }
}

impl Default for TextSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_keys_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_key(difficulty.key()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_key("nightmare"), None);
        assert_eq!(Difficulty::from_key(""), None);
    }

    #[test]
    fn test_default_difficulty() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_passage_lists_are_non_empty_single_spaced() {
        for difficulty in Difficulty::ALL {
            assert!(!difficulty.passages().is_empty());
            for passage in difficulty.passages() {
                assert!(!passage.is_empty());
                assert!(!passage.contains("  "), "double space in {passage:?}");
            }
        }
    }

    #[test]
    fn test_pick_returns_passage_from_the_requested_list() {
        let mut source = TextSource::with_seed(7);
        for _ in 0..20 {
            let session = source.pick(Difficulty::Easy);
            assert!(EASY_PASSAGES.contains(&session.text.as_str()));
            assert!(!session.id.is_empty());
        }
    }

    #[test]
    fn test_seeded_picks_are_deterministic() {
        let mut a = TextSource::with_seed(42);
        let mut b = TextSource::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.pick(Difficulty::Hard).text, b.pick(Difficulty::Hard).text);
        }
    }
}
