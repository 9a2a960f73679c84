/// Enemy behaviour engine: stat tables, aggro, patrol/chase with per-kind
/// augmentations, projectiles, the slow effect and the boss phase machine.

use rand::Rng;

use crate::constants::{
    AGGRO_HOLD, BOSS_DASH_GAP, BOSS_DASH_SPEED, BOSS_JUMP_POWER, BOSS_RETREAT_GAP,
    BOSS_RETREAT_TICKS, BOSS_SHOT_COOLDOWN, BOSS_TREMBLE_JITTER, BOSS_TREMBLE_TICKS,
    ENEMY_ANIMATION_STEP, FLYER_DRIFT, FORM_CHANGE_TICKS, HOP_CHANCE, PATROL_TURN_CHANCE,
    PROJECTILE_SPEED, SLOW_DURATION, SLOW_FACTOR, TELEPORT_CHANCE, TELEPORT_COOLDOWN,
    TELEPORT_OFFSET, WORLD_WIDTH,
};
use crate::entities::{
    BossBrain, BossPhase, Capabilities, Enemy, EnemyKind, KindState, Platform, Player, Projectile,
};
use crate::geometry::Rect;
use crate::physics;

// ── Kind tables ──────────────────────────────────────────────────────────────

impl EnemyKind {
    pub const ALL: [EnemyKind; 10] = [
        EnemyKind::Grunt,
        EnemyKind::Hopper,
        EnemyKind::Runner,
        EnemyKind::Blinker,
        EnemyKind::Archer,
        EnemyKind::Brute,
        EnemyKind::Shifter,
        EnemyKind::Flyer,
        EnemyKind::Twin,
        EnemyKind::Boss,
    ];

    /// Kind for a tier number 1..=10.
    pub fn from_tier(tier: u32) -> Option<EnemyKind> {
        let index = tier.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn tier(self) -> u32 {
        Self::ALL.iter().position(|&k| k == self).map_or(0, |i| i as u32 + 1)
    }

    pub fn capabilities(self) -> Capabilities {
        Capabilities {
            shoots: matches!(self, EnemyKind::Archer | EnemyKind::Boss),
            flies: self == EnemyKind::Flyer,
            boss_phases: self == EnemyKind::Boss,
        }
    }
}

struct BaseStats {
    health: i32,
    health_per_level: i32,
    damage: f64,
    speed: (f64, f64),
    aggro_range: f32,
    size: f32,
}

fn base_stats(kind: EnemyKind) -> BaseStats {
    let stats = |health, health_per_level, damage, speed, aggro_range, size| BaseStats {
        health,
        health_per_level,
        damage,
        speed,
        aggro_range,
        size,
    };
    match kind {
        EnemyKind::Grunt => stats(30, 5, 20.0, (1.0, 2.0), 200.0, 32.0),
        EnemyKind::Hopper => stats(40, 5, 25.0, (1.5, 2.5), 250.0, 32.0),
        EnemyKind::Runner => stats(25, 5, 15.0, (2.0, 3.0), 220.0, 32.0),
        EnemyKind::Blinker => stats(35, 5, 30.0, (1.0, 1.5), 300.0, 32.0),
        EnemyKind::Archer => stats(30, 5, 15.0, (1.0, 1.5), 350.0, 32.0),
        EnemyKind::Brute => stats(100, 10, 35.0, (0.3, 0.8), 180.0, 64.0),
        EnemyKind::Shifter => stats(50, 5, 25.0, (1.0, 2.0), 250.0, 32.0),
        EnemyKind::Flyer => stats(35, 5, 20.0, (1.5, 2.5), 300.0, 32.0),
        EnemyKind::Twin => stats(40, 5, 30.0, (1.0, 1.5), 280.0, 32.0),
        EnemyKind::Boss => stats(2000, 0, 50.0, (0.5, 1.0), 500.0, 96.0),
    }
}

fn initial_state(kind: EnemyKind) -> KindState {
    match kind {
        EnemyKind::Hopper => KindState::Hopper { jump_power: -12.0 },
        EnemyKind::Blinker => KindState::Blinker { teleport_cooldown: 0 },
        EnemyKind::Archer => KindState::Archer { shoot_cooldown: 0 },
        EnemyKind::Shifter => KindState::Shifter { form: 1, form_timer: 0 },
        EnemyKind::Twin => KindState::Twin { spawned_twin: false },
        EnemyKind::Boss => KindState::Boss(BossBrain {
            phase: BossPhase::Approach,
            timer: 0,
            attack_cooldown: 0,
        }),
        EnemyKind::Grunt | EnemyKind::Runner | EnemyKind::Brute | EnemyKind::Flyer => {
            KindState::Plain
        }
    }
}

/// Stat multiplier for a level: `1 + level * 0.1`.
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level as f64 * 0.1
}

// ── Construction & queries ───────────────────────────────────────────────────

impl Enemy {
    pub fn new<R: Rng>(id: u32, kind: EnemyKind, x: f32, y: f32, level: u32, rng: &mut R) -> Self {
        let stats = base_stats(kind);
        let multiplier = level_multiplier(level);
        let health = stats.health + stats.health_per_level * level as i32;
        let (low, high) = stats.speed;

        Enemy {
            id,
            kind,
            caps: kind.capabilities(),
            level,
            rect: Rect::new(x, y, stats.size, stats.size),
            direction: 1.0,
            velocity_y: 0.0,
            is_jumping: false,
            health,
            max_health: health,
            damage: (stats.damage * multiplier) as i32,
            speed: (rng.gen_range(low..=high) * multiplier) as f32,
            aggro_range: stats.aggro_range,
            aggro: false,
            aggro_timer: 0,
            state: initial_state(kind),
            projectiles: Vec::new(),
            necromanced: false,
            slowed: false,
            slow_timer: 0,
            animation_frame: 0,
            animation_timer: 0,
        }
    }

    /// Base speed with the slow factor applied while slowed.
    pub fn current_speed(&self) -> f32 {
        if self.slowed {
            self.speed * SLOW_FACTOR
        } else {
            self.speed
        }
    }

    /// Slow the enemy for `SLOW_DURATION` ticks.  Ignored while already
    /// slowed, so repeated calls never stack.
    pub fn apply_slow(&mut self) {
        if !self.slowed {
            self.slowed = true;
            self.slow_timer = SLOW_DURATION;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn boss_phase(&self) -> Option<BossPhase> {
        match &self.state {
            KindState::Boss(brain) => Some(brain.phase),
            _ => None,
        }
    }

    fn face_x(&self, target_x: f32) -> f32 {
        if self.rect.x < target_x {
            1.0
        } else {
            -1.0
        }
    }

    fn fire_at(&mut self, player: &Player) {
        let (x, y) = self.rect.center();
        let direction = self.face_x(player.rect.x);
        self.projectiles.push(Projectile { x, y, direction });
    }

    // ── Per-tick update ──────────────────────────────────────────────────────

    /// Advance this enemy by one tick.  Projectiles that reach the player
    /// deal their damage here.
    pub fn update<R: Rng>(&mut self, player: &mut Player, platforms: &[Platform], rng: &mut R) {
        if self.slowed {
            self.slow_timer = self.slow_timer.saturating_sub(1);
            if self.slow_timer == 0 {
                self.slowed = false;
            }
        }

        let grounded_kind = !self.caps.flies;
        if grounded_kind {
            physics::fall(self);
            physics::resolve_platforms(self, platforms);
        }
        let edges = physics::clamp_to_world(self, grounded_kind);
        if edges.left {
            self.direction = 1.0;
        }
        if edges.right {
            self.direction = -1.0;
        }

        if self.rect.origin_distance(&player.rect) < self.aggro_range {
            self.aggro = true;
            self.aggro_timer = AGGRO_HOLD;
        } else if self.aggro_timer > 0 {
            self.aggro_timer -= 1;
        } else {
            self.aggro = false;
        }

        if self.aggro {
            self.chase(player, rng);
        } else {
            self.patrol(rng);
        }

        self.update_projectiles(player);

        self.animation_timer += 1;
        if self.animation_timer >= ENEMY_ANIMATION_STEP {
            self.animation_frame = (self.animation_frame + 1) % 4;
            self.animation_timer = 0;
        }

        if self.caps.boss_phases {
            self.boss_behavior(player, rng);
        }
    }

    fn patrol<R: Rng>(&mut self, rng: &mut R) {
        if self.caps.boss_phases {
            return;
        }
        self.rect.x += self.current_speed() * self.direction;
        if self.rect.left() < 0.0
            || self.rect.right() > WORLD_WIDTH
            || rng.gen_bool(PATROL_TURN_CHANCE)
        {
            self.direction = -self.direction;
        }
    }

    fn chase<R: Rng>(&mut self, player: &Player, rng: &mut R) {
        if self.caps.boss_phases {
            return;
        }

        let speed = self.current_speed();
        self.direction = self.face_x(player.rect.x);
        self.rect.x += speed * self.direction;

        let fire_interval = 120 - self.level as i32 * 5;
        let mut fire = false;
        match &mut self.state {
            KindState::Hopper { jump_power } => {
                if !self.is_jumping && rng.gen_bool(HOP_CHANCE) {
                    self.velocity_y = *jump_power;
                    self.is_jumping = true;
                }
            }
            KindState::Blinker { teleport_cooldown } => {
                if *teleport_cooldown <= 0 && rng.gen_bool(TELEPORT_CHANCE) {
                    self.rect.x = player.rect.x - TELEPORT_OFFSET;
                    *teleport_cooldown = TELEPORT_COOLDOWN;
                }
                *teleport_cooldown -= 1;
            }
            KindState::Archer { shoot_cooldown } => {
                if *shoot_cooldown <= 0 {
                    fire = true;
                    *shoot_cooldown = fire_interval;
                }
                *shoot_cooldown -= 1;
            }
            KindState::Shifter { form, form_timer } => {
                *form_timer += 1;
                if *form_timer >= FORM_CHANGE_TICKS {
                    *form = rng.gen_range(1..=8);
                    *form_timer = 0;
                }
            }
            KindState::Twin { spawned_twin } => {
                if !*spawned_twin {
                    *spawned_twin = true;
                    log::debug!("twin enemy #{} flagged its spawn", self.id);
                }
            }
            KindState::Plain | KindState::Boss(_) => {}
        }

        if self.caps.flies {
            if self.rect.y < player.rect.y {
                self.rect.y += FLYER_DRIFT;
            } else {
                self.rect.y -= FLYER_DRIFT;
            }
        }

        if fire {
            self.fire_at(player);
        }
    }

    fn update_projectiles(&mut self, player: &mut Player) {
        if !self.caps.shoots {
            return;
        }
        let damage = self.damage / 2;
        self.projectiles.retain_mut(|shot| {
            shot.x += shot.direction * PROJECTILE_SPEED;
            if shot.x < 0.0 || shot.x > WORLD_WIDTH {
                return false;
            }
            if player.rect.contains_point(shot.x, shot.y) {
                player.take_damage(damage);
                return false;
            }
            true
        });
    }

    // ── Boss ─────────────────────────────────────────────────────────────────

    fn boss_behavior<R: Rng>(&mut self, player: &Player, rng: &mut R) {
        let slow = if self.slowed { SLOW_FACTOR } else { 1.0 };
        let player_x = player.rect.x;
        let toward = self.face_x(player_x);
        let mut fire = false;

        let KindState::Boss(brain) = &mut self.state else {
            return;
        };
        brain.timer += 1;
        brain.attack_cooldown -= 1;

        let next = match brain.phase {
            BossPhase::Approach => {
                self.rect.x += toward * self.speed * slow;
                ((self.rect.x - player_x).abs() < BOSS_RETREAT_GAP).then_some(BossPhase::Retreat)
            }
            BossPhase::Retreat => {
                self.rect.x -= toward * self.speed * slow;
                (brain.timer > BOSS_RETREAT_TICKS).then_some(BossPhase::Tremble)
            }
            BossPhase::Tremble => {
                self.rect.x += rng.gen_range(-BOSS_TREMBLE_JITTER..=BOSS_TREMBLE_JITTER) as f32;
                (brain.timer > BOSS_TREMBLE_TICKS).then_some(BossPhase::Shoot)
            }
            BossPhase::Shoot => {
                if brain.attack_cooldown <= 0 {
                    fire = true;
                    brain.attack_cooldown = BOSS_SHOT_COOLDOWN;
                    Some(BossPhase::Speed)
                } else {
                    None
                }
            }
            BossPhase::Speed => {
                self.speed = BOSS_DASH_SPEED;
                self.rect.x += toward * self.speed * slow;
                ((self.rect.x - player_x).abs() < BOSS_DASH_GAP).then_some(BossPhase::Teleport)
            }
            BossPhase::Teleport => {
                self.rect.x = player_x - TELEPORT_OFFSET;
                Some(BossPhase::Jump)
            }
            BossPhase::Jump => {
                if !self.is_jumping {
                    self.velocity_y = BOSS_JUMP_POWER;
                    self.is_jumping = true;
                }
                if self.rect.bottom() >= player.rect.top() && self.velocity_y > 0.0 {
                    self.speed = rng.gen_range(0.5..=1.0);
                    Some(BossPhase::Approach)
                } else {
                    None
                }
            }
        };

        if let Some(phase) = next {
            log::debug!("boss #{}: {:?} -> {:?}", self.id, brain.phase, phase);
            brain.phase = phase;
            brain.timer = 0;
        }

        if fire {
            self.fire_at(player);
        }
    }
}
