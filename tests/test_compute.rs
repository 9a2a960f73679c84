use pantheon::compute::*;
use pantheon::config::GameConfig;
use pantheon::constants::{FLOOR_Y, TICKS_PER_SECOND};
use pantheon::entities::*;
use pantheon::geometry::Rect;
use pantheon::services::{Action, InputEvent};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A freshly started game on level 1, with the start-up events drained.
fn playing() -> GameState {
    let mut s = start_game(&init_state(&GameConfig::default()), &mut seeded_rng());
    take_events(&mut s);
    s
}

/// Level 1 with no enemies and the player standing at `x` on the floor.
fn empty_level_with_player_at(x: f32) -> GameState {
    let mut s = playing();
    s.enemies.clear();
    s.player.rect.x = x;
    s.player.rect.y = FLOOR_Y - 32.0;
    s
}

fn grunt(x: f32) -> Enemy {
    Enemy::new(99, EnemyKind::Grunt, x, FLOOR_Y - 32.0, 1, &mut seeded_rng())
}

// ── init_state / start_game ───────────────────────────────────────────────────

#[test]
fn init_state_is_an_empty_menu() {
    let s = init_state(&GameConfig::default());
    assert_eq!(s.status, GameStatus::Menu);
    assert_eq!(s.level, 1);
    assert!(s.enemies.is_empty());
    assert!(s.platforms.is_empty());
    assert!(s.door.is_none());
    assert!(s.events.is_empty());
}

#[test]
fn init_state_clamps_start_level() {
    let config = GameConfig {
        start_level: 42,
        ..GameConfig::default()
    };
    assert_eq!(init_state(&config).start_level, 10);
}

#[test]
fn start_game_loads_first_level() {
    let mut s = start_game(&init_state(&GameConfig::default()), &mut seeded_rng());
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.level, 1);
    assert_eq!(s.enemies.len(), 5);
    assert!(s.door.is_some());

    let events = take_events(&mut s);
    assert!(events.contains(&FrameEvent::MusicStart));
    assert!(events.contains(&FrameEvent::LevelStarted { level: 1 }));
    assert!(s.events.is_empty());
}

// ── Status transitions ────────────────────────────────────────────────────────

#[test]
fn tick_outside_play_changes_nothing() {
    let menu = init_state(&GameConfig::default());
    let after = tick(&menu, &mut seeded_rng());
    assert_eq!(after.frame, menu.frame);
    assert_eq!(after.status, GameStatus::Menu);
}

#[test]
fn pause_freezes_ticking_and_ignores_input() {
    let s = playing();
    let paused = handle_input(&s, InputEvent::Press(Action::Pause));
    assert_eq!(paused.status, GameStatus::Paused);

    let ticked = tick(&paused, &mut seeded_rng());
    assert_eq!(ticked.frame, paused.frame);

    let moved = handle_input(&paused, InputEvent::Press(Action::Left));
    assert_eq!(moved.player.velocity_x, 0.0);

    let resumed = handle_input(&paused, InputEvent::Press(Action::Pause));
    assert_eq!(resumed.status, GameStatus::Playing);
}

#[test]
fn return_to_menu_stops_music() {
    let s = playing();
    let mut menu = return_to_menu(&s);
    assert_eq!(menu.status, GameStatus::Menu);
    assert_eq!(take_events(&mut menu), vec![FrameEvent::MusicStop]);
}

#[test]
fn toggles_flip_audio_settings() {
    let s = playing();
    let mut quiet = toggle_music(&s);
    assert!(!quiet.settings.music_on);
    assert_eq!(take_events(&mut quiet), vec![FrameEvent::MusicStop]);

    let mut loud = toggle_music(&quiet);
    assert!(loud.settings.music_on);
    assert_eq!(take_events(&mut loud), vec![FrameEvent::MusicStart]);

    assert!(!toggle_sounds(&s).settings.sounds_on);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn press_and_release_move() {
    let s = playing();
    let left = handle_input(&s, InputEvent::Press(Action::Left));
    assert_eq!(left.player.velocity_x, -5.0);
    let stopped = handle_input(&left, InputEvent::Release(Action::Left));
    assert_eq!(stopped.player.velocity_x, 0.0);
}

#[test]
fn shield_press_and_release() {
    let s = playing();
    let guarded = handle_input(&s, InputEvent::Press(Action::Shield));
    assert!(guarded.player.shielding);
    let dropped = handle_input(&guarded, InputEvent::Release(Action::Shield));
    assert!(!dropped.player.shielding);
}

#[test]
fn player_cues_become_sound_events() {
    let s = playing();
    let mut jumped = handle_input(&s, InputEvent::Press(Action::Jump));
    assert!(jumped.player.cues.is_empty());
    assert_eq!(
        take_events(&mut jumped),
        vec![FrameEvent::Sound(SoundCue::Jump)]
    );
}

#[test]
fn pure_functions_leave_input_untouched() {
    let s = playing();
    let _ = handle_input(&s, InputEvent::Press(Action::Right));
    let _ = tick(&s, &mut seeded_rng());
    assert_eq!(s.player.velocity_x, 0.0);
    assert_eq!(s.frame, 0);
}

// ── Combat ────────────────────────────────────────────────────────────────────

#[test]
fn enemy_contact_damages_and_knocks_back() {
    let mut s = empty_level_with_player_at(300.0);
    s.enemies.push(grunt(310.0));

    let next = tick(&s, &mut seeded_rng());
    assert_eq!(next.player.health, 78);
    assert_eq!(next.player.rect.x, 280.0);
    assert!(next.events.contains(&FrameEvent::Sound(SoundCue::Hurt)));
}

#[test]
fn shield_blocks_enemy_contact() {
    let mut s = empty_level_with_player_at(300.0);
    s.enemies.push(grunt(310.0));
    s = handle_input(&s, InputEvent::Press(Action::Shield));

    let next = tick(&s, &mut seeded_rng());
    assert_eq!(next.player.health, 100);
    assert_eq!(next.player.rect.x, 300.0);
}

#[test]
fn whip_kills_enemy_in_reach() {
    let mut s = empty_level_with_player_at(300.0);
    s.enemies.push(grunt(340.0));
    s = handle_input(&s, InputEvent::Press(Action::Attack));

    let next = tick(&s, &mut seeded_rng());
    assert!(next.enemies.is_empty());
    assert!(next
        .events
        .contains(&FrameEvent::EnemyKilled { kind: EnemyKind::Grunt }));
}

#[test]
fn projectile_death_ends_the_enemy_pass() {
    let mut s = empty_level_with_player_at(300.0);
    s.player.health = 5;
    let mut archer = Enemy::new(99, EnemyKind::Archer, 340.0, FLOOR_Y - 32.0, 1, &mut seeded_rng());
    let (cx, cy) = s.player.rect.center();
    archer.projectiles.push(Projectile {
        x: cx,
        y: cy,
        direction: 1.0,
    });
    s.enemies.push(archer);
    s = handle_input(&s, InputEvent::Press(Action::Attack));
    take_events(&mut s);

    let over = tick(&s, &mut seeded_rng());
    assert_eq!(over.status, GameStatus::GameOver);
    // The whip was in reach, but nothing is simulated after the player dies.
    assert_eq!(over.enemies.len(), 1);
    assert!(!over
        .events
        .iter()
        .any(|e| matches!(e, FrameEvent::EnemyKilled { .. })));
}

#[test]
fn slow_time_slows_every_enemy() {
    let mut s = playing();
    s.player.collected_ability = Some(AbilityKind::SlowTime);
    s.player.ability_active = true;
    s.player.ability_timer = 600;

    let next = tick(&s, &mut seeded_rng());
    assert!(!next.enemies.is_empty());
    assert!(next.enemies.iter().all(|e| e.slowed));
}

#[test]
fn hazard_death_ends_the_game() {
    let mut s = playing();
    s.enemies.clear();
    s.player.health = 5;
    s.hazards.push(Hazard {
        rect: Rect::new(40.0, 530.0, 50.0, 20.0),
        kind: HazardKind::Spikes,
    });

    let over = tick(&s, &mut seeded_rng());
    assert_eq!(over.status, GameStatus::GameOver);
    assert!(over.events.contains(&FrameEvent::PlayerDied { level: 1 }));

    let after = tick(&over, &mut seeded_rng());
    assert_eq!(after.frame, over.frame);
}

#[test]
fn long_run_keeps_invariants() {
    let mut rng = seeded_rng();
    let mut s = start_game(
        &init_state(&GameConfig {
            start_level: 3,
            ..GameConfig::default()
        }),
        &mut rng,
    );
    for _ in 0..600 {
        s = tick(&s, &mut rng);
        take_events(&mut s);
        assert!(s.enemies.iter().all(|e| e.health > 0));
        assert!(s.player.health <= s.player.max_health);
        assert!(s.player.health > 0 || s.status == GameStatus::GameOver);
    }
}

// ── Pickups & progression ─────────────────────────────────────────────────────

#[test]
fn walking_into_orb_collects_ability() {
    let s = empty_level_with_player_at(700.0);
    let next = tick(&s, &mut seeded_rng());
    assert_eq!(next.player.collected_ability, Some(AbilityKind::BigFireball));
    assert!(next.orbs.is_empty());
    assert!(next.events.contains(&FrameEvent::AbilityCollected {
        ability: AbilityKind::BigFireball
    }));
}

#[test]
fn door_starts_transition_then_loads_next_level() {
    let mut s = playing();
    s.enemies.clear();
    s.player.collected_ability = Some(AbilityKind::BigFireball);
    let door = s.door.clone().expect("level has a door");
    s.player.rect.x = door.rect.x + 5.0;
    s.player.rect.y = door.rect.y + 5.0;

    let mut rng = seeded_rng();
    s = tick(&s, &mut rng);
    assert_eq!(s.transition, Some(60));
    assert!(s.events.contains(&FrameEvent::DoorReached { level: 1 }));

    for _ in 0..TICKS_PER_SECOND - 1 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.level, 1);
    s = tick(&s, &mut rng);
    assert_eq!(s.level, 2);
    assert_eq!(s.transition, None);
    assert_eq!((s.player.rect.x, s.player.rect.y), (50.0, 500.0));
    assert_eq!(s.player.collected_ability, None);
    assert!(s.events.contains(&FrameEvent::LevelStarted { level: 2 }));
}

#[test]
fn ability_carries_into_boss_level() {
    let mut s = playing();
    s.level = 9;
    s.player.collected_ability = Some(AbilityKind::PainSpikes);
    let boss = next_level(&s, &mut seeded_rng());
    assert_eq!(boss.level, 10);
    assert_eq!(boss.player.collected_ability, Some(AbilityKind::PainSpikes));
    assert_eq!(boss.enemies[0].kind, EnemyKind::Boss);
}

#[test]
fn leaving_last_level_is_victory() {
    let mut s = playing();
    s.level = 10;
    let won = next_level(&s, &mut seeded_rng());
    assert_eq!(won.status, GameStatus::Victory);
    assert!(won.events.contains(&FrameEvent::Victory));
}

// ── Tutorial hints ────────────────────────────────────────────────────────────

#[test]
fn hints_follow_the_controls_in_order() {
    let mut s = empty_level_with_player_at(50.0);
    assert_eq!(s.tutorial.step, 0);

    s = handle_input(&s, InputEvent::Press(Action::Right));
    assert_eq!(s.tutorial.step, 1);
    // Out-of-order actions leave the hint alone.
    s = handle_input(&s, InputEvent::Press(Action::Attack));
    assert_eq!(s.tutorial.step, 1);
    s = handle_input(&s, InputEvent::Press(Action::Jump));
    assert_eq!(s.tutorial.step, 2);
    s = handle_input(&s, InputEvent::Press(Action::Attack));
    assert_eq!(s.tutorial.step, 3);
    s = handle_input(&s, InputEvent::Press(Action::Shield));
    assert_eq!(s.tutorial.step, 0);
    assert!(s.tutorial.finished);

    s = handle_input(&s, InputEvent::Press(Action::Left));
    assert_eq!(s.tutorial.step, 0);
}

#[test]
fn idle_hints_time_out_one_by_one() {
    let mut s = empty_level_with_player_at(50.0);
    s = handle_input(&s, InputEvent::Press(Action::Right));
    s = handle_input(&s, InputEvent::Release(Action::Right));
    let mut rng = seeded_rng();

    for _ in 0..180 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.tutorial.step, 1);
    s = tick(&s, &mut rng);
    assert_eq!(s.tutorial.step, 2);
    assert_eq!(s.tutorial.timer, 0);

    for _ in 0..2 * 181 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.tutorial.step, 0);
    assert!(s.tutorial.finished);
}

#[test]
fn new_game_shows_hints_again() {
    let mut s = playing();
    s.tutorial.finished = true;
    let menu = return_to_menu(&s);
    let again = start_game(&menu, &mut seeded_rng());
    assert_eq!(again.tutorial, TutorialHints::default());
}
