use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::text::TimeLimit;
use crate::source::Difficulty;

/// On-disk shape of the preference file. All fields optional so that a file
/// from any older or newer version still loads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct PrefsData {
    #[serde(default)]
    time_limit_minutes: Option<f64>,
    #[serde(default)]
    difficulty: Option<String>,
}

/// Last-used session preferences. Malformed or missing values read back as
/// absent, never as errors; only writes can fail.
#[derive(Debug)]
pub struct PrefsStore {
    base_dir: PathBuf,
}

impl PrefsStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordpace");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join("preferences.json")
    }

    fn load(&self) -> PrefsData {
        let path = self.file_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => PrefsData::default(),
            }
        } else {
            PrefsData::default()
        }
    }

    fn save(&self, data: &PrefsData) -> Result<()> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Last-used time limit. A stored value outside the fixed set of
    /// choices is treated as absent.
    pub fn time_limit(&self) -> Option<TimeLimit> {
        self.load()
            .time_limit_minutes
            .and_then(TimeLimit::from_minutes)
    }

    pub fn set_time_limit(&self, limit: TimeLimit) -> Result<()> {
        let mut data = self.load();
        data.time_limit_minutes = Some(limit.minutes());
        self.save(&data)
    }

    /// Last-used text difficulty. An unknown stored key is treated as absent.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.load()
            .difficulty
            .as_deref()
            .and_then(Difficulty::from_key)
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        let mut data = self.load();
        data.difficulty = Some(difficulty.key().to_string());
        self.save(&data)
    }
}
