/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::abilities::{self, Strike};
use crate::config::GameConfig;
use crate::constants::{
    BOSS_LEVEL, CONTACT_KNOCKBACK, MAX_LEVEL, PLAYER_SPAWN, TRANSITION_TICKS, TUTORIAL_HINT_TICKS,
    TUTORIAL_STEPS, WHIP_DAMAGE,
};
use crate::entities::{
    AbilityKind, DamageOutcome, FrameEvent, GameState, GameStatus, Player, SoundCue,
    TutorialHints,
};
use crate::level;
use crate::services::{Action, InputEvent};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial (menu) state.  No level is loaded until `start_game`.
pub fn init_state(config: &GameConfig) -> GameState {
    let config = config.clone().normalized();
    GameState {
        status: GameStatus::Menu,
        level: config.start_level,
        player: Player::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
        enemies: Vec::new(),
        platforms: Vec::new(),
        hazards: Vec::new(),
        door: None,
        orbs: Vec::new(),
        transition: None,
        next_enemy_id: 0,
        frame: 0,
        settings: config.audio_settings(),
        tutorial: TutorialHints::default(),
        start_level: config.start_level,
        events: Vec::new(),
    }
}

/// Leave the menu (or a finished run) and start playing from the starting
/// level with a fresh player.
pub fn start_game(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.level = next.start_level;
    next.player = Player::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
    next.status = GameStatus::Playing;
    next.frame = 0;
    next.tutorial = TutorialHints::default();
    load_level(&mut next, rng);
    next.events.push(FrameEvent::Sound(SoundCue::Select));
    next.events.push(FrameEvent::MusicStart);
    log::info!("new game from level {}", next.level);
    next
}

// ── Menu / pause transitions ─────────────────────────────────────────────────

pub fn return_to_menu(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Menu {
        next.status = GameStatus::Menu;
        next.transition = None;
        next.events.push(FrameEvent::MusicStop);
    }
    next
}

pub fn toggle_pause(state: &GameState) -> GameState {
    let status = match state.status {
        GameStatus::Playing => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Playing,
        other => other,
    };
    GameState {
        status,
        ..state.clone()
    }
}

pub fn toggle_music(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.settings.music_on = !next.settings.music_on;
    let event = if next.settings.music_on && next.status != GameStatus::Menu {
        FrameEvent::MusicStart
    } else {
        FrameEvent::MusicStop
    };
    next.events.push(event);
    next
}

pub fn toggle_sounds(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.settings.sounds_on = !next.settings.sounds_on;
    next
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Apply one key-down / key-up event.  Everything but the pause toggle is
/// ignored unless a level is being played.
pub fn handle_input(state: &GameState, input: InputEvent) -> GameState {
    if input == InputEvent::Press(Action::Pause) {
        return toggle_pause(state);
    }
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    let player = &mut next.player;
    match input {
        InputEvent::Press(action) => {
            match action {
                Action::Left => player.move_left(),
                Action::Right => player.move_right(),
                Action::Jump => player.jump(),
                Action::Attack => player.attack(),
                Action::Shield => player.shield(),
                Action::Ability => {
                    player.use_ability();
                }
                Action::Beam => {
                    player.toggle_laser();
                }
                Action::Pause => {}
            }
            advance_hint(&mut next.tutorial, action);
        }
        InputEvent::Release(action) => match action {
            Action::Left | Action::Right => player.stop(),
            Action::Shield => player.stop_shield(),
            _ => {}
        },
    }
    flush_cues(&mut next);
    next
}

// ── Tutorial hints ───────────────────────────────────────────────────────────

/// Move to the next hint when the player performs the action the current
/// one asks for.  Walking shows the first hint.
fn advance_hint(hints: &mut TutorialHints, action: Action) {
    let step = match (hints.step, action) {
        (0, Action::Left | Action::Right) if !hints.finished => 1,
        (1, Action::Jump) => 2,
        (2, Action::Attack) => 3,
        (3, Action::Shield) => {
            hints.finished = true;
            0
        }
        _ => return,
    };
    hints.step = step;
    hints.timer = 0;
}

/// A hint left alone for `TUTORIAL_HINT_TICKS` gives way to the next one.
fn tick_hints(hints: &mut TutorialHints) {
    if hints.step == 0 {
        return;
    }
    hints.timer += 1;
    if hints.timer > TUTORIAL_HINT_TICKS {
        hints.timer = 0;
        hints.step += 1;
        if hints.step > TUTORIAL_STEPS {
            hints.step = 0;
            hints.finished = true;
        }
    }
}

// ── Level progression ────────────────────────────────────────────────────────

/// Move on to the next level, or to victory after the last one.
pub fn next_level(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    advance_level(&mut next, rng);
    next
}

fn advance_level<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.transition = None;
    state.level += 1;
    if state.level > MAX_LEVEL {
        state.status = GameStatus::Victory;
        state.events.push(FrameEvent::Victory);
        log::info!("victory");
        return;
    }
    load_level(state, rng);
}

/// Replace the level collections wholesale and put the player back at the
/// spawn point.
fn load_level<R: Rng>(state: &mut GameState, rng: &mut R) {
    let layout = level::generate_level(state.level, &mut state.next_enemy_id, rng);
    state.platforms = layout.platforms;
    state.enemies = layout.enemies;
    state.hazards = layout.hazards;
    state.door = Some(layout.door);
    state.orbs = layout.orbs;
    state.transition = None;
    state.player.reset_for_level(state.level == BOSS_LEVEL);
    state.events.push(FrameEvent::LevelStarted { level: state.level });
}

// ── Per-frame tick (nearly pure, RNG is injected) ────────────────────────────

/// Advance the simulation by one tick.  Paused and finished games are
/// returned unchanged; during a door transition only the countdown runs.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }
    next.frame += 1;
    tick_hints(&mut next.tutorial);

    if let Some(left) = next.transition {
        match left.saturating_sub(1) {
            0 => advance_level(&mut next, rng),
            left => next.transition = Some(left),
        }
        return next;
    }

    step(&mut next, rng);
    flush_cues(&mut next);
    next
}

/// Drain the events accumulated since the last call.
pub fn take_events(state: &mut GameState) -> Vec<FrameEvent> {
    std::mem::take(&mut state.events)
}

fn flush_cues(state: &mut GameState) {
    let cues = std::mem::take(&mut state.player.cues);
    state.events.extend(cues.into_iter().map(FrameEvent::Sound));
}

fn die(state: &mut GameState) {
    state.status = GameStatus::GameOver;
    state.events.push(FrameEvent::PlayerDied { level: state.level });
    log::info!("player died on level {}", state.level);
}

fn step<R: Rng>(state: &mut GameState, rng: &mut R) {
    // ── 1. Player physics & collision ────────────────────────────────────────
    state.player.update(&state.platforms, &state.hazards);
    if state.player.is_dead() {
        die(state);
        return;
    }

    // ── 2. Ability effects ↔ enemies ─────────────────────────────────────────
    abilities::resolve_effect_hits(&mut state.player, &mut state.enemies, &mut state.events);

    // ── 3. Enemies: behaviour, slow, whip, contact ───────────────────────────
    let slowing = state.player.ability_running(AbilityKind::SlowTime);
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.update(&mut state.player, &state.platforms, rng);
        if state.player.is_dead() {
            die(state);
            return;
        }
        if slowing {
            enemy.apply_slow();
        }

        let whipped = state.player.attacking
            && state
                .player
                .attack_rect
                .is_some_and(|reach| enemy.rect.overlaps(&reach));
        if whipped {
            match abilities::strike(enemy, WHIP_DAMAGE, &mut state.player) {
                Strike::Killed => {
                    let dead = state.enemies.remove(i);
                    log::debug!("{:?} #{} destroyed by whip", dead.kind, dead.id);
                    state.events.push(FrameEvent::EnemyKilled { kind: dead.kind });
                    continue;
                }
                Strike::Raised => {
                    let kind = state.enemies[i].kind;
                    state.events.push(FrameEvent::EnemyRaised { kind });
                }
                Strike::Survived => {}
            }
        }

        let enemy = &state.enemies[i];
        let player = &mut state.player;
        if !player.is_invincible()
            && enemy.rect.overlaps(&player.rect)
            && player.take_damage(enemy.damage) == DamageOutcome::Applied
        {
            if enemy.rect.x < player.rect.x {
                player.rect.x += CONTACT_KNOCKBACK;
            } else {
                player.rect.x -= CONTACT_KNOCKBACK;
            }
        }

        if state.player.is_dead() {
            die(state);
            return;
        }
        i += 1;
    }

    // ── 4. Ability orbs ──────────────────────────────────────────────────────
    for orb in state.orbs.iter_mut() {
        orb.pulse_timer += 1;
        if !orb.collected && state.player.rect.overlaps(&orb.rect) {
            state.player.collect_ability(orb.ability);
            orb.collected = true;
            state.events.push(FrameEvent::AbilityCollected { ability: orb.ability });
        }
    }
    state.orbs.retain(|orb| !orb.collected);

    // ── 5. Door ──────────────────────────────────────────────────────────────
    let at_door = state
        .door
        .as_ref()
        .is_some_and(|door| state.player.rect.overlaps(&door.rect));
    if at_door {
        state.transition = Some(TRANSITION_TICKS);
        state.events.push(FrameEvent::Sound(SoundCue::Door));
        state.events.push(FrameEvent::DoorReached { level: state.level });
        log::debug!("door reached on level {}", state.level);
    }
}
