/// Sound bank for the terminal frontend.
///
/// The terminal has no mixer, so "playing" a cue resolves its asset and logs
/// it.  A missing directory or asset mutes the whole bank with a warning; the
/// game keeps running either way.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entities::SoundCue;
use crate::error::AudioError;
use crate::services::{Audio, MUSIC_TRACK};

const EXTENSIONS: [&str; 3] = ["wav", "mp3", "ogg"];

#[derive(Debug, Default)]
pub struct SoundBank {
    assets: HashMap<String, PathBuf>,
    muted: bool,
    music_playing: bool,
    plays: u64,
}

impl SoundBank {
    /// A bank that accepts every call and plays nothing.
    pub fn muted() -> Self {
        SoundBank {
            muted: true,
            ..SoundBank::default()
        }
    }

    /// Index every `<name>.wav|.mp3|.ogg` in `dir` and check that each cue
    /// and the music track is present.
    pub fn load(dir: &Path) -> Result<Self, AudioError> {
        let entries = fs::read_dir(dir).map_err(|source| AudioError::AssetDir {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut assets = HashMap::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let known = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if !known {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                assets.entry(stem.to_string()).or_insert(path);
            }
        }

        let required = SoundCue::ALL
            .iter()
            .map(|cue| cue.name())
            .chain(std::iter::once(MUSIC_TRACK));
        for name in required {
            if !assets.contains_key(name) {
                return Err(AudioError::MissingAsset {
                    name: name.to_string(),
                    dir: dir.to_path_buf(),
                });
            }
        }

        log::debug!("loaded {} sound assets from {}", assets.len(), dir.display());
        Ok(SoundBank {
            assets,
            ..SoundBank::default()
        })
    }

    /// `load`, falling back to a muted bank on any error.
    pub fn load_or_mute(dir: &Path) -> Self {
        match Self::load(dir) {
            Ok(bank) => bank,
            Err(err) => {
                log::warn!("{err}; sound disabled");
                Self::muted()
            }
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Number of sounds played since the bank was created.
    pub fn plays(&self) -> u64 {
        self.plays
    }

    pub fn asset(&self, name: &str) -> Option<&Path> {
        self.assets.get(name).map(PathBuf::as_path)
    }
}

impl Audio for SoundBank {
    fn play_sound(&mut self, name: &str, volume: f32) {
        if self.muted {
            return;
        }
        match self.asset(name) {
            Some(path) => {
                log::debug!("sound {} at {:.1}", path.display(), volume);
                self.plays += 1;
            }
            None => log::debug!("no asset for sound `{name}`"),
        }
    }

    fn play_music(&mut self, name: &str) {
        if self.muted || self.music_playing {
            return;
        }
        if self.asset(name).is_some() {
            log::debug!("music `{name}` started");
            self.music_playing = true;
        }
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            log::debug!("music stopped");
            self.music_playing = false;
        }
    }
}
