/// Player controller: intent operations called from input events, plus the
/// per-tick update that runs physics and counts down every timer.
///
/// States are orthogonal flags (moving, jumping, attacking, shielding,
/// invincible) rather than a single enum; each operation checks only the
/// flags it cares about and silently does nothing when blocked.

use crate::abilities;
use crate::constants::{
    ABILITY_COOLDOWN, ANIMATION_STEP, ATTACK_TICKS, HIT_COOLDOWN, LASER_DRAIN, MANA_REGEN,
    PLAYER_JUMP_POWER, PLAYER_MAX_HEALTH, PLAYER_MAX_MANA, PLAYER_SIZE, PLAYER_SPAWN,
    PLAYER_SPEED, SHIELD_COOLDOWN, SHIELD_DURATION, WHIP_LENGTH, WHIP_WIDTH,
};
use crate::entities::{
    AbilityKind, DamageOutcome, Facing, Hazard, Platform, Player, SoundCue,
};
use crate::geometry::Rect;
use crate::physics;

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            rect: Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            velocity_x: 0.0,
            velocity_y: 0.0,
            speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            is_jumping: false,
            facing: Facing::Right,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            mana: PLAYER_MAX_MANA,
            max_mana: PLAYER_MAX_MANA,
            animation_frame: 0,
            animation_timer: 0,
            attacking: false,
            attack_timer: 0,
            attack_rect: None,
            shielding: false,
            shield_timer: 0,
            shield_cooldown: 0,
            invincibility_timer: 0,
            collected_ability: None,
            ability_active: false,
            ability_timer: 0,
            ability_cooldown: 0,
            effects: Vec::new(),
            laser_active: false,
            laser_duration: 0,
            necromanced: Vec::new(),
            cues: Vec::new(),
        }
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    pub fn move_left(&mut self) {
        self.move_toward(Facing::Left);
    }

    pub fn move_right(&mut self) {
        self.move_toward(Facing::Right);
    }

    pub fn move_toward(&mut self, facing: Facing) {
        self.velocity_x = facing.sign() * self.speed;
        self.facing = facing;
    }

    pub fn stop(&mut self) {
        self.velocity_x = 0.0;
    }

    /// Only works while grounded.
    pub fn jump(&mut self) {
        if !self.is_jumping {
            self.velocity_y = self.jump_power;
            self.is_jumping = true;
            self.cues.push(SoundCue::Jump);
        }
    }

    // ── Combat ───────────────────────────────────────────────────────────────

    pub fn attack(&mut self) {
        if !self.attacking {
            self.attacking = true;
            self.attack_timer = 0;
            self.attack_rect = None;
            self.cues.push(SoundCue::Attack);
        }
    }

    /// The whip's reach, extending from the facing edge at mid-height.
    pub fn reach_rect(&self) -> Rect {
        let y = self.rect.center_y() - (WHIP_WIDTH / 2.0).floor();
        match self.facing {
            Facing::Right => Rect::new(self.rect.right(), y, WHIP_LENGTH, WHIP_WIDTH),
            Facing::Left => Rect::new(self.rect.left() - WHIP_LENGTH, y, WHIP_LENGTH, WHIP_WIDTH),
        }
    }

    pub fn shield(&mut self) {
        if !self.shielding && self.shield_cooldown == 0 {
            self.shielding = true;
            self.shield_timer = 0;
            self.cues.push(SoundCue::Shield);
        }
    }

    pub fn stop_shield(&mut self) {
        if self.shielding {
            self.shielding = false;
            self.shield_timer = 0;
        }
    }

    /// Damage from enemies and projectiles.  Blocked while shielding or
    /// invincible; health may go to zero or below, the caller checks death.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.shielding {
            return DamageOutcome::Blocked;
        }
        self.wound(amount)
    }

    /// Damage that gets through the shield (hazards); only invincibility
    /// blocks it.
    fn wound(&mut self, amount: i32) -> DamageOutcome {
        if self.invincibility_timer > 0 {
            return DamageOutcome::Blocked;
        }
        self.health -= amount;
        self.invincibility_timer = HIT_COOLDOWN;
        self.cues.push(SoundCue::Hurt);
        DamageOutcome::Applied
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    // ── Abilities ────────────────────────────────────────────────────────────

    pub fn collect_ability(&mut self, ability: AbilityKind) {
        self.collected_ability = Some(ability);
        self.cues.push(SoundCue::Collect);
    }

    /// Activate the collected ability.  Returns `false` (and changes nothing)
    /// when no ability is held, one is already running, the cooldown has not
    /// elapsed, or mana is short.
    pub fn use_ability(&mut self) -> bool {
        let Some(kind) = self.collected_ability else {
            return false;
        };
        if self.ability_active || self.ability_cooldown > 0 {
            return false;
        }
        let cost = abilities::mana_cost(kind);
        if self.mana < cost {
            return false;
        }

        self.mana -= cost;
        self.ability_active = true;
        self.ability_cooldown = ABILITY_COOLDOWN;
        self.ability_timer = abilities::active_ticks(kind);

        let (cx, cy) = self.rect.center();
        if let Some(effect) = abilities::spawn_effect(kind, cx, cy, self.facing) {
            self.effects.push(effect);
        }
        if kind == AbilityKind::Superman {
            // Armed, not firing: the beam is switched on separately.
            self.laser_active = false;
        }

        self.cues.push(SoundCue::Ability);
        true
    }

    /// Switch the superman beam on or off.  Only available while superman is
    /// the active ability; it will not switch on with an empty mana pool.
    pub fn toggle_laser(&mut self) -> bool {
        if self.collected_ability != Some(AbilityKind::Superman) || !self.ability_active {
            return false;
        }
        if self.laser_active {
            self.laser_active = false;
        } else if self.mana > 0.0 {
            self.laser_active = true;
        }
        self.laser_active
    }

    pub fn ability_running(&self, kind: AbilityKind) -> bool {
        self.ability_active && self.collected_ability == Some(kind)
    }

    // ── Level carry-over ─────────────────────────────────────────────────────

    /// Move back to the spawn point with full health and mana.  The collected
    /// ability is dropped unless `keep_ability`.
    pub fn reset_for_level(&mut self, keep_ability: bool) {
        self.rect.x = PLAYER_SPAWN.0;
        self.rect.y = PLAYER_SPAWN.1;
        self.health = self.max_health;
        self.mana = self.max_mana;
        if !keep_ability {
            self.collected_ability = None;
            self.ability_active = false;
            self.ability_timer = 0;
            self.laser_active = false;
        }
    }

    // ── Per-tick update ──────────────────────────────────────────────────────

    pub fn update(&mut self, platforms: &[Platform], hazards: &[Hazard]) {
        physics::fall(self);
        self.rect.x += self.velocity_x;
        let incoming_vy = self.velocity_y;
        physics::resolve_platforms(self, platforms);
        let shielding = self.shielding;
        if let Some(damage) = physics::hazard_contact(self, hazards, shielding, incoming_vy) {
            self.wound(damage);
        }
        physics::clamp_to_world(self, true);

        if self.mana < self.max_mana && !self.laser_active {
            self.mana = (self.mana + MANA_REGEN).min(self.max_mana);
        }

        self.tick_shield();

        self.animation_timer += 1;
        if self.animation_timer >= ANIMATION_STEP {
            self.animation_frame = (self.animation_frame + 1) % 4;
            self.animation_timer = 0;
        }

        self.tick_attack();
        self.tick_ability();
        self.tick_laser();

        self.invincibility_timer = self.invincibility_timer.saturating_sub(1);

        abilities::tick_effects(&mut self.effects);
    }

    fn tick_shield(&mut self) {
        if self.shielding {
            self.shield_timer += 1;
            if self.shield_timer >= SHIELD_DURATION {
                self.stop_shield();
                self.shield_cooldown = SHIELD_COOLDOWN;
            }
        }
        self.shield_cooldown = self.shield_cooldown.saturating_sub(1);
    }

    fn tick_attack(&mut self) {
        if !self.attacking {
            return;
        }
        self.attack_timer += 1;
        if self.attack_timer > ATTACK_TICKS {
            self.attacking = false;
            self.attack_timer = 0;
            self.attack_rect = None;
        } else {
            self.attack_rect = Some(self.reach_rect());
        }
    }

    fn tick_ability(&mut self) {
        self.ability_cooldown = self.ability_cooldown.saturating_sub(1);
        if !self.ability_active {
            return;
        }
        self.ability_timer = self.ability_timer.saturating_sub(1);
        if self.ability_timer == 0 {
            self.ability_active = false;
            match self.collected_ability {
                Some(AbilityKind::Necromancer) => self.necromanced.clear(),
                Some(AbilityKind::Superman) => self.laser_active = false,
                _ => {}
            }
        }
    }

    fn tick_laser(&mut self) {
        if !self.laser_active {
            return;
        }
        self.laser_duration += 1;
        self.mana -= LASER_DRAIN;
        if self.mana <= 0.0 {
            self.laser_active = false;
            self.mana = 0.0;
        }
    }
}
