/// Contracts for the collaborators around the simulation core: the 2D
/// renderer, the audio service and the input events the core accepts.
///
/// The core never talks to a terminal, window or sound device directly; a
/// frontend implements these traits and feeds input events in.

use crate::entities::{AudioSettings, FrameEvent, SoundCue};

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// World-space drawing primitives.  Coordinates are world pixels.
pub trait Renderer {
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    fn draw_filled_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
    fn draw_filled_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb);
    /// Text centred on `(cx, cy)`.
    fn draw_text(&mut self, text: &str, cx: f32, cy: f32, color: Rgb);
}

/// Fire-and-forget audio.  Implementations log failures and carry on.
pub trait Audio {
    fn play_sound(&mut self, name: &str, volume: f32);
    fn play_music(&mut self, name: &str);
    fn stop_music(&mut self);
}

pub const MUSIC_TRACK: &str = "music";

impl SoundCue {
    pub const ALL: [SoundCue; 8] = [
        SoundCue::Ability,
        SoundCue::Attack,
        SoundCue::Collect,
        SoundCue::Door,
        SoundCue::Hurt,
        SoundCue::Jump,
        SoundCue::Select,
        SoundCue::Shield,
    ];

    /// Asset name, without extension.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Ability => "ability",
            SoundCue::Attack => "attack",
            SoundCue::Collect => "collect",
            SoundCue::Door => "door",
            SoundCue::Hurt => "hurt",
            SoundCue::Jump => "jump",
            SoundCue::Select => "select",
            SoundCue::Shield => "shield",
        }
    }

    pub fn volume(self) -> f32 {
        match self {
            SoundCue::Jump | SoundCue::Shield => 0.7,
            SoundCue::Ability
            | SoundCue::Attack
            | SoundCue::Collect
            | SoundCue::Door
            | SoundCue::Hurt
            | SoundCue::Select => 0.8,
        }
    }
}

/// Forward the audio-related events of a frame to the audio service,
/// honouring the player's music and sound switches.
pub fn play_events<A: Audio>(audio: &mut A, events: &[FrameEvent], settings: AudioSettings) {
    for event in events {
        match event {
            FrameEvent::Sound(cue) if settings.sounds_on => {
                audio.play_sound(cue.name(), cue.volume());
            }
            FrameEvent::MusicStart if settings.music_on => audio.play_music(MUSIC_TRACK),
            FrameEvent::MusicStop => audio.stop_music(),
            _ => {}
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Gameplay actions bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
    Shield,
    Ability,
    /// Superman beam on/off.
    Beam,
    Pause,
}

/// Discrete key-down / key-up events delivered to the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Press(Action),
    Release(Action),
}
