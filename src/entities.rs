/// All game entity types: pure data, no logic.
///
/// Behaviour lives in `player`, `enemy`, `abilities` and `compute`; this
/// module only describes what the world is made of.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// The eight collectible abilities, in the order levels hand them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    BigFireball,
    EnergyWave,
    Lightning,
    SlowTime,
    EnergyOrbs,
    Necromancer,
    PainSpikes,
    /// No discrete effect: arms the player's laser beam instead.
    Superman,
}

impl AbilityKind {
    pub const SEQUENCE: [AbilityKind; 8] = [
        AbilityKind::BigFireball,
        AbilityKind::EnergyWave,
        AbilityKind::Lightning,
        AbilityKind::SlowTime,
        AbilityKind::EnergyOrbs,
        AbilityKind::Necromancer,
        AbilityKind::PainSpikes,
        AbilityKind::Superman,
    ];
}

/// Sound cues the core asks the audio collaborator to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Ability,
    Attack,
    Collect,
    Door,
    Hurt,
    Jump,
    Select,
    Shield,
}

/// Result of a `take_damage` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Applied,
    Blocked,
}

// ── Ability effects ──────────────────────────────────────────────────────────

/// Per-variant payload of a live ability effect.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectKind {
    /// Travels horizontally; `direction` is -1.0 or 1.0.
    BigFireball { direction: f32 },
    /// Expanding ring centred on the origin.
    EnergyWave { radius: f32 },
    Lightning,
    /// Aura shown while enemies are being slowed.
    SlowTime,
    /// Three orbs circling the origin.
    EnergyOrbs { angle: f32 },
    /// Aura shown while kills are being raised.
    Necromancer,
    PainSpikes { direction: f32 },
}

/// A live ability effect.  Owns no reference to anything it damages.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityEffect {
    pub kind: EffectKind,
    /// Where the effect was cast (player centre at activation).
    pub origin_x: f32,
    pub origin_y: f32,
    /// Total lifetime in ticks.
    pub lifetime: u32,
    pub ticks_left: u32,
    pub damage: i32,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub speed: f32,
    pub jump_power: f32,
    pub is_jumping: bool,
    pub facing: Facing,

    /// May dip to or below zero on the tick the player dies.
    pub health: i32,
    pub max_health: i32,
    pub mana: f32,
    pub max_mana: f32,

    pub animation_frame: u32,
    pub animation_timer: u32,

    pub attacking: bool,
    pub attack_timer: u32,
    /// Whip reach; `Some` only while attacking.
    pub attack_rect: Option<Rect>,

    pub shielding: bool,
    pub shield_timer: u32,
    pub shield_cooldown: u32,

    pub invincibility_timer: u32,

    pub collected_ability: Option<AbilityKind>,
    pub ability_active: bool,
    pub ability_timer: u32,
    pub ability_cooldown: u32,
    pub effects: Vec<AbilityEffect>,

    pub laser_active: bool,
    pub laser_duration: u32,

    /// Ids of enemies raised while the necromancer ability was active.
    pub necromanced: Vec<u32>,

    /// Sound cues raised by player actions, drained by the session.
    pub cues: Vec<SoundCue>,
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// The ten enemy kinds, tier 1 through 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Tier 1: melee only.
    Grunt,
    /// Tier 2: hops at random while chasing.
    Hopper,
    /// Tier 3: fast melee.
    Runner,
    /// Tier 4: teleports behind the player.
    Blinker,
    /// Tier 5: shoots projectiles.
    Archer,
    /// Tier 6: large and slow.
    Brute,
    /// Tier 7: cycles through cosmetic forms.
    Shifter,
    /// Tier 8: flies toward the player.
    Flyer,
    /// Tier 9: flags a twin spawn.
    Twin,
    /// Tier 10: the boss.
    Boss,
}

/// Capabilities resolved once when an enemy is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub shoots: bool,
    pub flies: bool,
    pub boss_phases: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Approach,
    Retreat,
    Tremble,
    Shoot,
    Speed,
    Teleport,
    Jump,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossBrain {
    pub phase: BossPhase,
    /// Ticks spent in the current phase.
    pub timer: u32,
    /// Counts down every tick; a shot is allowed at zero or below.
    pub attack_cooldown: i32,
}

/// Kind-specific state carried alongside the common enemy fields.
#[derive(Clone, Debug, PartialEq)]
pub enum KindState {
    Plain,
    Hopper { jump_power: f32 },
    Blinker { teleport_cooldown: i32 },
    Archer { shoot_cooldown: i32 },
    Shifter { form: u8, form_timer: u32 },
    Twin { spawned_twin: bool },
    Boss(BossBrain),
}

/// A point projectile moving horizontally at constant speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// -1.0 or 1.0.
    pub direction: f32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub caps: Capabilities,
    pub level: u32,
    pub rect: Rect,
    /// -1.0 or 1.0.
    pub direction: f32,
    pub velocity_y: f32,
    pub is_jumping: bool,

    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    /// Base speed; the slow factor is applied on read (`Enemy::current_speed`).
    pub speed: f32,
    pub aggro_range: f32,

    pub aggro: bool,
    pub aggro_timer: u32,

    pub state: KindState,
    pub projectiles: Vec<Projectile>,

    pub necromanced: bool,
    pub slowed: bool,
    pub slow_timer: u32,

    pub animation_frame: u32,
    pub animation_timer: u32,
}

// ── Static level geometry ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub is_ground: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    Spikes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hazard {
    pub rect: Rect,
    pub kind: HazardKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AbilityOrb {
    pub rect: Rect,
    pub ability: AbilityKind,
    pub collected: bool,
    /// Drives the pulsing animation.
    pub pulse_timer: u32,
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Things that happened during a tick, drained by the frontend.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    Sound(SoundCue),
    MusicStart,
    MusicStop,
    EnemyKilled { kind: EnemyKind },
    EnemyRaised { kind: EnemyKind },
    AbilityCollected { ability: AbilityKind },
    DoorReached { level: u32 },
    LevelStarted { level: u32 },
    PlayerDied { level: u32 },
    Victory,
}

// ── Tutorial ─────────────────────────────────────────────────────────────────

/// Control hints overlaid at the start of a game.  Each hint is dismissed by
/// performing the action it names or after a timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TutorialHints {
    /// 0 while hidden, otherwise the hint on screen (1..=3).
    pub step: u8,
    /// Ticks the current hint has been shown.
    pub timer: u32,
    /// Set once the last hint is gone; the hints do not come back.
    pub finished: bool,
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioSettings {
    pub music_on: bool,
    pub sounds_on: bool,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    /// Current level, 1 through `MAX_LEVEL`.
    pub level: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub door: Option<Door>,
    pub orbs: Vec<AbilityOrb>,
    /// Ticks left before the next level loads, while a door transition runs.
    pub transition: Option<u32>,
    pub next_enemy_id: u32,
    pub frame: u64,
    pub settings: AudioSettings,
    pub tutorial: TutorialHints,
    /// Level the next `start_game` begins on.
    pub start_level: u32,
    pub events: Vec<FrameEvent>,
}
