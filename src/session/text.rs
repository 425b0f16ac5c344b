use chrono::Utc;

/// One practice attempt's source text. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub text: String,
}

impl Session {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            text: text.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Tokenize into expected words. Split on single spaces, so consecutive
    /// spaces produce empty words and empty text produces one empty word.
    pub fn words(&self) -> Vec<String> {
        self.text.split(' ').map(str::to_string).collect()
    }
}

/// Session time limit in minutes, restricted to a fixed set of choices.
/// `Off` disables the limit check entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeLimit {
    Off,
    HalfMinute,
    #[default]
    OneMinute,
    TwoMinutes,
    ThreeMinutes,
    FourMinutes,
    FiveMinutes,
}

impl TimeLimit {
    pub const ALL: [TimeLimit; 7] = [
        TimeLimit::Off,
        TimeLimit::HalfMinute,
        TimeLimit::OneMinute,
        TimeLimit::TwoMinutes,
        TimeLimit::ThreeMinutes,
        TimeLimit::FourMinutes,
        TimeLimit::FiveMinutes,
    ];

    pub fn minutes(self) -> f64 {
        match self {
            TimeLimit::Off => 0.0,
            TimeLimit::HalfMinute => 0.5,
            TimeLimit::OneMinute => 1.0,
            TimeLimit::TwoMinutes => 2.0,
            TimeLimit::ThreeMinutes => 3.0,
            TimeLimit::FourMinutes => 4.0,
            TimeLimit::FiveMinutes => 5.0,
        }
    }

    pub fn secs(self) -> u64 {
        (self.minutes() * 60.0) as u64
    }

    /// Match a minutes value back to a member of the fixed set.
    pub fn from_minutes(minutes: f64) -> Option<Self> {
        TimeLimit::ALL
            .into_iter()
            .find(|limit| limit.minutes() == minutes)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeLimit::Off => "No limit",
            TimeLimit::HalfMinute => "30 seconds",
            TimeLimit::OneMinute => "1 minute",
            TimeLimit::TwoMinutes => "2 minutes",
            TimeLimit::ThreeMinutes => "3 minutes",
            TimeLimit::FourMinutes => "4 minutes",
            TimeLimit::FiveMinutes => "5 minutes",
        }
    }
}
