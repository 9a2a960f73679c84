/// Runtime configuration.  The binary fills this from the command line;
/// tests and other frontends use `GameConfig::default()`.

use std::path::PathBuf;

use crate::constants::MAX_LEVEL;
use crate::entities::AudioSettings;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Level a new game starts on (1 unless debugging a later level).
    pub start_level: u32,
    pub music_on: bool,
    pub sounds_on: bool,
    /// Directory searched for `<cue>.wav|.mp3|.ogg`.
    pub sound_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: None,
            start_level: 1,
            music_on: true,
            sounds_on: true,
            sound_dir: PathBuf::from("sounds"),
        }
    }
}

impl GameConfig {
    /// Clamp out-of-range values into the playable range.
    pub fn normalized(mut self) -> Self {
        self.start_level = self.start_level.clamp(1, MAX_LEVEL);
        self
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            music_on: self.music_on,
            sounds_on: self.sounds_on,
        }
    }
}
