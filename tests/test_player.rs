use pantheon::constants::{FLOOR_Y, WORLD_HEIGHT, WORLD_WIDTH};
use pantheon::entities::*;
use pantheon::geometry::Rect;

fn floor() -> Vec<Platform> {
    vec![Platform {
        rect: Rect::new(0.0, FLOOR_Y, WORLD_WIDTH, WORLD_HEIGHT - FLOOR_Y),
        is_ground: true,
    }]
}

fn spikes_at(x: f32) -> Vec<Hazard> {
    vec![Hazard {
        rect: Rect::new(x, 530.0, 50.0, 20.0),
        kind: HazardKind::Spikes,
    }]
}

/// A player standing on the floor.
fn grounded() -> Player {
    Player::new(200.0, FLOOR_Y - 32.0)
}

// ── Construction & movement ───────────────────────────────────────────────────

#[test]
fn new_player_is_full() {
    let p = Player::new(50.0, 500.0);
    assert_eq!(p.health, 100);
    assert_eq!(p.mana, 100.0);
    assert_eq!(p.facing, Facing::Right);
    assert_eq!(p.collected_ability, None);
    assert!(!p.is_invincible());
}

#[test]
fn move_sets_velocity_and_facing() {
    let mut p = grounded();
    p.move_left();
    assert_eq!(p.velocity_x, -5.0);
    assert_eq!(p.facing, Facing::Left);
    p.move_right();
    assert_eq!(p.velocity_x, 5.0);
    assert_eq!(p.facing, Facing::Right);
    p.stop();
    assert_eq!(p.velocity_x, 0.0);
    assert_eq!(p.facing, Facing::Right);
}

#[test]
fn jump_only_while_grounded() {
    let mut p = grounded();
    p.jump();
    assert_eq!(p.velocity_y, -15.0);
    assert!(p.is_jumping);

    p.velocity_y = -3.0;
    p.jump();
    assert_eq!(p.velocity_y, -3.0);
    let jumps = p.cues.iter().filter(|&&c| c == SoundCue::Jump).count();
    assert_eq!(jumps, 1);
}

#[test]
fn landing_clears_jump_state() {
    let mut p = grounded();
    p.jump();
    for _ in 0..60 {
        p.update(&floor(), &[]);
    }
    assert!(!p.is_jumping);
    assert_eq!(p.rect.bottom(), FLOOR_Y);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn second_hit_within_invincibility_is_blocked() {
    let mut p = grounded();
    assert_eq!(p.take_damage(20), DamageOutcome::Applied);
    assert_eq!(p.health, 80);
    assert_eq!(p.invincibility_timer, 30);

    assert_eq!(p.take_damage(20), DamageOutcome::Blocked);
    assert_eq!(p.health, 80);
}

#[test]
fn invincibility_wears_off_after_thirty_ticks() {
    let mut p = grounded();
    p.take_damage(20);
    for _ in 0..29 {
        p.update(&floor(), &[]);
    }
    assert!(p.is_invincible());
    p.update(&floor(), &[]);
    assert!(!p.is_invincible());
    assert_eq!(p.take_damage(20), DamageOutcome::Applied);
    assert_eq!(p.health, 60);
}

#[test]
fn shield_blocks_contact_damage_entirely() {
    let mut p = grounded();
    p.shield();
    assert_eq!(p.take_damage(50), DamageOutcome::Blocked);
    assert_eq!(p.health, 100);
    assert!(!p.is_invincible());
}

#[test]
fn hazard_deals_ten_or_three_while_shielding() {
    let mut p = grounded();
    p.update(&floor(), &spikes_at(200.0));
    assert_eq!(p.health, 90);

    let mut p = grounded();
    p.shield();
    p.update(&floor(), &spikes_at(200.0));
    assert_eq!(p.health, 97);

    // Standing on the spikes again inside the invincibility window is free.
    p.update(&floor(), &spikes_at(200.0));
    assert_eq!(p.health, 97);
}

#[test]
fn landing_on_floor_spikes_bounces_player_up() {
    let mut p = Player::new(200.0, 514.0);
    p.velocity_y = 5.0;
    p.update(&floor(), &spikes_at(200.0));
    assert_eq!(p.health, 90);
    assert_eq!(p.velocity_y, -10.0);
    assert_eq!(p.rect.bottom(), FLOOR_Y);
}

#[test]
fn health_can_reach_zero() {
    let mut p = grounded();
    p.health = 5;
    p.take_damage(20);
    assert!(p.is_dead());
}

// ── Shield timing ─────────────────────────────────────────────────────────────

#[test]
fn shield_expires_and_starts_cooldown() {
    let mut p = grounded();
    p.shield();
    assert!(p.shielding);
    for _ in 0..300 {
        p.update(&floor(), &[]);
    }
    assert!(!p.shielding);
    assert!(p.shield_cooldown > 0);

    p.shield();
    assert!(!p.shielding);
}

#[test]
fn stop_shield_drops_it_without_cooldown() {
    let mut p = grounded();
    p.shield();
    p.stop_shield();
    assert!(!p.shielding);
    assert_eq!(p.shield_cooldown, 0);
    p.shield();
    assert!(p.shielding);
}

// ── Attack ────────────────────────────────────────────────────────────────────

#[test]
fn attack_exposes_whip_reach_for_its_duration() {
    let mut p = grounded();
    p.attack();
    assert!(p.attacking);
    p.update(&floor(), &[]);

    let reach = p.attack_rect.expect("whip reach while attacking");
    assert_eq!(reach.x, p.rect.right());
    assert_eq!(reach.w, 64.0);
    assert_eq!(reach.h, 3.0);

    for _ in 0..14 {
        p.update(&floor(), &[]);
    }
    assert!(p.attacking);
    p.update(&floor(), &[]);
    assert!(!p.attacking);
    assert!(p.attack_rect.is_none());
}

#[test]
fn whip_reach_extends_left_when_facing_left() {
    let mut p = grounded();
    p.move_left();
    let reach = p.reach_rect();
    assert_eq!(reach.right(), p.rect.left());
}

// ── Abilities ─────────────────────────────────────────────────────────────────

#[test]
fn use_ability_without_one_does_nothing() {
    let mut p = grounded();
    assert!(!p.use_ability());
    assert_eq!(p.mana, 100.0);
}

#[test]
fn use_ability_with_insufficient_mana_changes_nothing() {
    let mut p = grounded();
    p.collect_ability(AbilityKind::Superman);
    p.mana = 50.0;
    p.cues.clear();

    assert!(!p.use_ability());
    assert_eq!(p.mana, 50.0);
    assert!(!p.ability_active);
    assert_eq!(p.ability_cooldown, 0);
    assert!(p.effects.is_empty());
    assert!(p.cues.is_empty());
}

#[test]
fn use_ability_spends_mana_and_spawns_effect() {
    let mut p = grounded();
    p.collect_ability(AbilityKind::BigFireball);
    assert!(p.use_ability());
    assert_eq!(p.mana, 70.0);
    assert!(p.ability_active);
    assert_eq!(p.ability_cooldown, 180);
    assert_eq!(p.effects.len(), 1);
    assert!(p.cues.contains(&SoundCue::Ability));

    // Already active and cooling down.
    assert!(!p.use_ability());
    assert_eq!(p.mana, 70.0);
}

#[test]
fn ability_expires_but_cooldown_keeps_running() {
    let mut p = grounded();
    p.collect_ability(AbilityKind::BigFireball);
    p.use_ability();
    for _ in 0..30 {
        p.update(&floor(), &[]);
    }
    assert!(!p.ability_active);
    assert!(p.ability_cooldown > 0);
    assert!(!p.use_ability());
}

#[test]
fn mana_regenerates_up_to_max() {
    let mut p = grounded();
    p.mana = 50.0;
    p.update(&floor(), &[]);
    assert_eq!(p.mana, 50.5);

    p.mana = 99.9;
    p.update(&floor(), &[]);
    assert_eq!(p.mana, 100.0);
}

#[test]
fn laser_needs_superman_and_drains_mana() {
    let mut p = grounded();
    assert!(!p.toggle_laser());

    p.collect_ability(AbilityKind::Superman);
    assert!(p.use_ability());
    assert!(!p.laser_active);
    assert_eq!(p.mana, 0.0);
    // Empty pool: the beam will not switch on.
    assert!(!p.toggle_laser());

    p.update(&floor(), &[]);
    assert!(p.toggle_laser());
    let before = p.mana;
    p.update(&floor(), &[]);
    assert!(p.mana < before);

    assert!(!p.toggle_laser());
    assert!(!p.laser_active);
}

#[test]
fn reset_for_level_restores_and_optionally_keeps_ability() {
    let mut p = grounded();
    p.health = 10;
    p.mana = 5.0;
    p.collect_ability(AbilityKind::Lightning);

    p.reset_for_level(true);
    assert_eq!((p.rect.x, p.rect.y), (50.0, 500.0));
    assert_eq!(p.health, 100);
    assert_eq!(p.mana, 100.0);
    assert_eq!(p.collected_ability, Some(AbilityKind::Lightning));

    p.reset_for_level(false);
    assert_eq!(p.collected_ability, None);
    assert!(!p.ability_active);
}
