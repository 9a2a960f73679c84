/// Gameplay tuning shared by the simulation modules.
///
/// Every timer is measured in ticks; the game runs at `TICKS_PER_SECOND`.

pub const TICKS_PER_SECOND: u32 = 60;

// ── World ────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const GRAVITY: f32 = 0.8;
pub const FLOOR_Y: f32 = 550.0;
pub const MAX_LEVEL: u32 = 10;
pub const BOSS_LEVEL: u32 = 10;
pub const TRANSITION_TICKS: u32 = 60;
pub const TUTORIAL_STEPS: u8 = 3;
pub const TUTORIAL_HINT_TICKS: u32 = 180;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 32.0;
pub const PLAYER_SPAWN: (f32, f32) = (50.0, 500.0);
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_JUMP_POWER: f32 = -15.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_MAX_MANA: f32 = 100.0;
pub const MANA_REGEN: f32 = 0.5;
pub const LASER_DRAIN: f32 = 0.1;
pub const HIT_COOLDOWN: u32 = 30;
pub const ANIMATION_STEP: u32 = 10;

pub const SHIELD_DURATION: u32 = 300;
pub const SHIELD_COOLDOWN: u32 = 300;

pub const ATTACK_TICKS: u32 = 15;
pub const WHIP_LENGTH: f32 = 64.0;
pub const WHIP_WIDTH: f32 = 3.0;
pub const WHIP_DAMAGE: i32 = 50;

pub const ABILITY_COOLDOWN: u32 = 180;
pub const CONTACT_KNOCKBACK: f32 = 20.0;

// ── Hazards ──────────────────────────────────────────────────────────────────

pub const HAZARD_DAMAGE: i32 = 10;
pub const SHIELDED_HAZARD_DAMAGE: i32 = 3;
pub const HAZARD_BOUNCE: f32 = -10.0;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const AGGRO_HOLD: u32 = 120;
pub const PATROL_TURN_CHANCE: f64 = 0.01;
pub const HOP_CHANCE: f64 = 0.02;
pub const TELEPORT_CHANCE: f64 = 0.01;
pub const TELEPORT_OFFSET: f32 = 160.0;
pub const TELEPORT_COOLDOWN: i32 = 180;
pub const FORM_CHANGE_TICKS: u32 = 300;
pub const FLYER_DRIFT: f32 = 1.0;
pub const ENEMY_ANIMATION_STEP: u32 = 15;

pub const SLOW_FACTOR: f32 = 0.4;
pub const SLOW_DURATION: u32 = 600;

pub const PROJECTILE_SPEED: f32 = 5.0;

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_RETREAT_GAP: f32 = 100.0;
pub const BOSS_RETREAT_TICKS: u32 = 60;
pub const BOSS_TREMBLE_TICKS: u32 = 30;
pub const BOSS_TREMBLE_JITTER: i32 = 2;
pub const BOSS_SHOT_COOLDOWN: i32 = 60;
pub const BOSS_DASH_SPEED: f32 = 5.0;
pub const BOSS_DASH_GAP: f32 = 50.0;
pub const BOSS_JUMP_POWER: f32 = -15.0;
