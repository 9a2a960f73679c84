/// Ability tables, effect spawning and ageing, and effect-versus-enemy
/// damage resolution.

use crate::entities::{
    AbilityEffect, AbilityKind, EffectKind, Enemy, Facing, FrameEvent, Player,
};
use crate::geometry::Rect;

// ── Ability tables ───────────────────────────────────────────────────────────

pub fn mana_cost(kind: AbilityKind) -> f32 {
    match kind {
        AbilityKind::BigFireball => 30.0,
        AbilityKind::EnergyWave => 37.0,
        AbilityKind::Lightning => 45.0,
        AbilityKind::SlowTime => 55.0,
        AbilityKind::EnergyOrbs => 55.0,
        AbilityKind::Necromancer => 70.0,
        AbilityKind::PainSpikes => 75.0,
        AbilityKind::Superman => 100.0,
    }
}

/// How long the ability stays active after it is used.
pub fn active_ticks(kind: AbilityKind) -> u32 {
    match kind {
        AbilityKind::BigFireball | AbilityKind::EnergyWave => 30,
        AbilityKind::Lightning => 60,
        AbilityKind::SlowTime | AbilityKind::EnergyOrbs => 600,
        AbilityKind::PainSpikes => 180,
        AbilityKind::Necromancer | AbilityKind::Superman => 1800,
    }
}

pub fn ability_name(kind: AbilityKind) -> &'static str {
    match kind {
        AbilityKind::BigFireball => "big_fireball",
        AbilityKind::EnergyWave => "energy_wave",
        AbilityKind::Lightning => "lightning",
        AbilityKind::SlowTime => "slow_time",
        AbilityKind::EnergyOrbs => "energy_orbs",
        AbilityKind::Necromancer => "necromancer",
        AbilityKind::PainSpikes => "pain_spikes",
        AbilityKind::Superman => "superman",
    }
}

const PROJECTILE_TRAVEL: f32 = 10.0;
const WAVE_START_RADIUS: f32 = 10.0;
const WAVE_GROWTH: f32 = 5.0;
const ORB_SPIN: f32 = 0.1;
const FIREBALL_BOX: f32 = 40.0;
const SPIKES_BOX: (f32, f32) = (60.0, 10.0);

// ── Spawning & ageing ────────────────────────────────────────────────────────

/// Build the effect an ability leaves in the world, cast from `(x, y)`.
/// Superman has none.
pub fn spawn_effect(kind: AbilityKind, x: f32, y: f32, facing: Facing) -> Option<AbilityEffect> {
    let (effect, lifetime, damage) = match kind {
        AbilityKind::BigFireball => (EffectKind::BigFireball { direction: facing.sign() }, 60, 50),
        AbilityKind::EnergyWave => (EffectKind::EnergyWave { radius: WAVE_START_RADIUS }, 30, 40),
        AbilityKind::Lightning => (EffectKind::Lightning, 60, 35),
        AbilityKind::SlowTime => (EffectKind::SlowTime, active_ticks(kind), 0),
        AbilityKind::EnergyOrbs => (EffectKind::EnergyOrbs { angle: 0.0 }, 600, 10),
        AbilityKind::Necromancer => (EffectKind::Necromancer, active_ticks(kind), 0),
        AbilityKind::PainSpikes => (EffectKind::PainSpikes { direction: facing.sign() }, 60, 60),
        AbilityKind::Superman => return None,
    };
    Some(AbilityEffect {
        kind: effect,
        origin_x: x,
        origin_y: y,
        lifetime,
        ticks_left: lifetime,
        damage,
    })
}

/// Age every effect by one tick and drop the expired ones.
pub fn tick_effects(effects: &mut Vec<AbilityEffect>) {
    for effect in effects.iter_mut() {
        effect.ticks_left = effect.ticks_left.saturating_sub(1);
        let elapsed = effect.elapsed() as f32;
        match &mut effect.kind {
            EffectKind::EnergyWave { radius } => {
                *radius = WAVE_START_RADIUS + elapsed * WAVE_GROWTH;
            }
            EffectKind::EnergyOrbs { angle } => *angle += ORB_SPIN,
            EffectKind::BigFireball { .. }
            | EffectKind::Lightning
            | EffectKind::SlowTime
            | EffectKind::Necromancer
            | EffectKind::PainSpikes { .. } => {}
        }
    }
    effects.retain(|e| e.ticks_left > 0);
}

impl AbilityEffect {
    pub fn elapsed(&self) -> u32 {
        self.lifetime - self.ticks_left
    }

    /// Current centre; projectiles travel away from the origin.
    pub fn position(&self) -> (f32, f32) {
        match self.kind {
            EffectKind::BigFireball { direction } | EffectKind::PainSpikes { direction } => (
                self.origin_x + direction * PROJECTILE_TRAVEL * self.elapsed() as f32,
                self.origin_y,
            ),
            _ => (self.origin_x, self.origin_y),
        }
    }

    /// Whether this effect damages a target occupying `target` right now.
    ///
    /// Lightning and energy orbs are visual only; the two auras never hit.
    pub fn hits(&self, target: &Rect) -> bool {
        let (x, y) = self.position();
        match self.kind {
            EffectKind::BigFireball { .. } => {
                Rect::centered(x, y, FIREBALL_BOX, FIREBALL_BOX).overlaps(target)
            }
            EffectKind::PainSpikes { .. } => {
                Rect::centered(x, y, SPIKES_BOX.0, SPIKES_BOX.1).overlaps(target)
            }
            EffectKind::EnergyWave { radius } => target.center_distance_to(x, y) < radius,
            EffectKind::Lightning
            | EffectKind::EnergyOrbs { .. }
            | EffectKind::SlowTime
            | EffectKind::Necromancer => false,
        }
    }
}

// ── Damage resolution ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strike {
    Survived,
    /// Health reached zero; the caller removes the enemy.
    Killed,
    /// Health reached zero while necromancy was active; converted in place.
    Raised,
}

/// Apply `damage` to an enemy, converting it instead of killing it while the
/// player's necromancer ability is running.
pub fn strike(enemy: &mut Enemy, damage: i32, player: &mut Player) -> Strike {
    enemy.health -= damage;
    if enemy.health > 0 {
        return Strike::Survived;
    }
    if player.ability_running(AbilityKind::Necromancer) {
        enemy.necromanced = true;
        enemy.health = enemy.max_health / 2;
        if !player.necromanced.contains(&enemy.id) {
            player.necromanced.push(enemy.id);
        }
        Strike::Raised
    } else {
        Strike::Killed
    }
}

/// Test every live effect against every live enemy.  Killed enemies are
/// removed in place without skipping their neighbours.
pub fn resolve_effect_hits(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    events: &mut Vec<FrameEvent>,
) {
    let effects = player.effects.clone();
    for effect in &effects {
        let mut i = 0;
        while i < enemies.len() {
            if effect.hits(&enemies[i].rect) {
                match strike(&mut enemies[i], effect.damage, player) {
                    Strike::Killed => {
                        let dead = enemies.remove(i);
                        log::debug!("{:?} #{} destroyed by ability", dead.kind, dead.id);
                        events.push(FrameEvent::EnemyKilled { kind: dead.kind });
                        continue;
                    }
                    Strike::Raised => {
                        events.push(FrameEvent::EnemyRaised { kind: enemies[i].kind });
                    }
                    Strike::Survived => {}
                }
            }
            i += 1;
        }
    }
}
