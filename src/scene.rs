/// Scene drawing: translates a `GameState` into `Renderer` calls.
///
/// No game logic is performed here; the only state touched is the injected
/// RNG, which scatters the lightning bolts.

use std::f32::consts::TAU;

use rand::Rng;

use crate::abilities::ability_name;
use crate::constants::{
    BOSS_LEVEL, SHIELD_DURATION, TUTORIAL_STEPS, WORLD_HEIGHT, WORLD_WIDTH, WHIP_LENGTH,
};
use crate::entities::{
    AbilityEffect, AbilityKind, AbilityOrb, Door, EffectKind, Enemy, EnemyKind, Facing,
    GameState, GameStatus, Hazard, HazardKind, Platform, Player, TutorialHints,
};
use crate::geometry::Rect;
use crate::services::{Renderer, Rgb};

// ── Colour palette ───────────────────────────────────────────────────────────

const BLACK: Rgb = Rgb(0, 0, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
const RED: Rgb = Rgb(255, 0, 0);
const GREEN: Rgb = Rgb(0, 255, 0);
const BLUE: Rgb = Rgb(0, 0, 255);
const BROWN: Rgb = Rgb(139, 69, 19);
const PURPLE: Rgb = Rgb(128, 0, 128);
const ORANGE: Rgb = Rgb(255, 165, 0);
const DARK_BLUE: Rgb = Rgb(0, 0, 139);
const GRAY: Rgb = Rgb(100, 100, 100);
const YELLOW: Rgb = Rgb(255, 255, 0);
const DARK_PURPLE: Rgb = Rgb(50, 0, 50);
const GOLD: Rgb = Rgb(255, 215, 0);
const DARK_GOLD: Rgb = Rgb(200, 150, 0);
const DARK_RED: Rgb = Rgb(139, 0, 0);
const CYAN: Rgb = Rgb(0, 255, 255);
const LAVA: Rgb = Rgb(255, 80, 0);
const DARK_GREEN: Rgb = Rgb(0, 100, 0);
const LIGHT_BLUE: Rgb = Rgb(173, 216, 230);
const PINK: Rgb = Rgb(255, 192, 203);
const SHIELD_RIM: Rgb = Rgb(200, 200, 200);
const FLASH: Rgb = Rgb(100, 100, 255);
const SOIL: Rgb = Rgb(100, 50, 0);

fn enemy_color(kind: EnemyKind) -> Rgb {
    match kind {
        EnemyKind::Grunt => RED,
        EnemyKind::Hopper => CYAN,
        EnemyKind::Runner => GREEN,
        EnemyKind::Blinker => PURPLE,
        EnemyKind::Archer => ORANGE,
        EnemyKind::Brute => GRAY,
        EnemyKind::Shifter => Rgb(150, 150, 150),
        EnemyKind::Flyer => LIGHT_BLUE,
        EnemyKind::Twin => PINK,
        EnemyKind::Boss => DARK_RED,
    }
}

fn orb_color(kind: AbilityKind) -> Rgb {
    match kind {
        AbilityKind::BigFireball => ORANGE,
        AbilityKind::EnergyWave => BLUE,
        AbilityKind::Lightning => PURPLE,
        AbilityKind::SlowTime => GRAY,
        AbilityKind::EnergyOrbs => YELLOW,
        AbilityKind::Necromancer => Rgb(50, 50, 50),
        AbilityKind::PainSpikes => DARK_RED,
        AbilityKind::Superman => RED,
    }
}

fn fill<R: Renderer>(r: &mut R, rect: &Rect, color: Rgb) {
    r.draw_filled_rect(rect.x, rect.y, rect.w, rect.h, color);
}

fn outline<R: Renderer>(r: &mut R, rect: &Rect, color: Rgb) {
    r.draw_rect(rect.x, rect.y, rect.w, rect.h, color);
}

// ── Public entry point ───────────────────────────────────────────────────────

/// Draw one complete frame for the current status.
pub fn draw_scene<R: Renderer, G: Rng>(r: &mut R, state: &GameState, rng: &mut G) {
    match state.status {
        GameStatus::Menu => draw_menu(r, state),
        GameStatus::Playing | GameStatus::Paused => {
            draw_world(r, state, rng);
            if state.status == GameStatus::Paused {
                draw_pause(r, state);
            }
            if state.transition.is_some() {
                fill(r, &Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT), BLACK);
                r.draw_text("LOADING NEXT LEVEL...", 400.0, 300.0, WHITE);
            }
        }
        GameStatus::GameOver => {
            fill(r, &Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT), BLACK);
            r.draw_text("GAME OVER", 400.0, 200.0, RED);
            r.draw_text(&format!("You reached level {}", state.level), 400.0, 300.0, WHITE);
            r.draw_text("R: menu   Q: quit", 400.0, 400.0, WHITE);
        }
        GameStatus::Victory => {
            fill(r, &Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT), DARK_PURPLE);
            r.draw_text("VICTORY", 400.0, 200.0, GOLD);
            r.draw_text("The pantheon is yours", 400.0, 300.0, WHITE);
            r.draw_text("R: menu   Q: quit", 400.0, 400.0, WHITE);
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

fn draw_menu<R: Renderer>(r: &mut R, state: &GameState) {
    fill(r, &Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT), BLACK);
    r.draw_text("PANTHEON", 400.0, 100.0, WHITE);
    r.draw_text("ENTER: play", 400.0, 250.0, WHITE);
    r.draw_text(
        &format!("M: music {}", on_off(state.settings.music_on)),
        400.0,
        310.0,
        WHITE,
    );
    r.draw_text(
        &format!("S: sounds {}", on_off(state.settings.sounds_on)),
        400.0,
        370.0,
        WHITE,
    );
    r.draw_text("Q: quit", 400.0, 430.0, WHITE);
    r.draw_text(
        "move A/D  jump SPACE  attack J  shield K  ability L  beam I",
        400.0,
        540.0,
        GRAY,
    );
}

fn draw_pause<R: Renderer>(r: &mut R, state: &GameState) {
    fill(r, &Rect::new(200.0, 150.0, 400.0, 300.0), BLACK);
    r.draw_text("PAUSED", 400.0, 180.0, WHITE);
    r.draw_text("ESC: resume", 400.0, 250.0, WHITE);
    r.draw_text(
        &format!("M: music {}", on_off(state.settings.music_on)),
        400.0,
        300.0,
        WHITE,
    );
    r.draw_text(
        &format!("S: sounds {}", on_off(state.settings.sounds_on)),
        400.0,
        350.0,
        WHITE,
    );
    r.draw_text("Q: menu", 400.0, 400.0, WHITE);
}

// ── World ────────────────────────────────────────────────────────────────────

fn draw_world<R: Renderer, G: Rng>(r: &mut R, state: &GameState, rng: &mut G) {
    draw_background(r, state.level);
    for platform in &state.platforms {
        draw_platform(r, platform);
    }
    for hazard in &state.hazards {
        draw_hazard(r, hazard);
    }
    if let Some(door) = &state.door {
        draw_door(r, door);
    }
    for orb in &state.orbs {
        draw_orb(r, orb);
    }
    for enemy in &state.enemies {
        draw_enemy(r, enemy);
    }
    draw_player(r, &state.player, rng);
    draw_hud(r, state);
    draw_tutorial(r, &state.tutorial);
}

fn draw_tutorial<R: Renderer>(r: &mut R, hints: &TutorialHints) {
    let text = match hints.step {
        1 => "Use LEFT and RIGHT (or A/D) to move",
        2 => "Press SPACE to jump",
        3 => "Press J to attack and K to shield",
        _ => return,
    };
    fill(r, &Rect::new(100.0, 50.0, 600.0, 100.0), BLACK);
    r.draw_text(text, 400.0, 80.0, WHITE);
    r.draw_text(&format!("{}/{}", hints.step, TUTORIAL_STEPS), 400.0, 120.0, WHITE);
}

fn draw_background<R: Renderer>(r: &mut R, level: u32) {
    if level == BOSS_LEVEL {
        fill(r, &Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT), DARK_PURPLE);
        for i in 0..50u32 {
            let x = (i * 37 % 800) as f32;
            let y = (i * 23 % 600) as f32;
            r.draw_filled_circle(x, y, 1.0, WHITE);
        }
    } else {
        fill(r, &Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT), DARK_BLUE);
        for i in 0..10u32 {
            let x = (i * 120 % 800) as f32;
            let y = (100 + i * 30 % 100) as f32;
            r.draw_filled_circle(x, y, 15.0, WHITE);
            r.draw_filled_circle(x + 10.0, y - 5.0, 12.0, WHITE);
            r.draw_filled_circle(x - 10.0, y + 5.0, 10.0, WHITE);
        }
    }
}

fn draw_platform<R: Renderer>(r: &mut R, platform: &Platform) {
    let rect = &platform.rect;
    if platform.is_ground {
        fill(r, rect, BROWN);
        let mut x = rect.x;
        while x < rect.right() {
            r.draw_line(x, rect.y, x, rect.bottom(), SOIL);
            x += 20.0;
        }
    } else {
        fill(r, rect, GREEN);
        outline(r, rect, DARK_GREEN);
    }
}

fn draw_hazard<R: Renderer>(r: &mut R, hazard: &Hazard) {
    let rect = &hazard.rect;
    match hazard.kind {
        HazardKind::Spikes => {
            fill(r, rect, LAVA);
            let mut x = rect.x;
            while x < rect.right() {
                r.draw_line(x, rect.bottom(), x + 5.0, rect.y, RED);
                x += 10.0;
            }
        }
    }
}

fn draw_door<R: Renderer>(r: &mut R, door: &Door) {
    let rect = &door.rect;
    fill(r, rect, GOLD);
    outline(r, rect, DARK_GOLD);
    outline(r, &Rect::new(rect.x + 10.0, rect.y + 20.0, 30.0, 5.0), DARK_GOLD);
    outline(r, &Rect::new(rect.x + 10.0, rect.y + 40.0, 30.0, 5.0), DARK_GOLD);
}

fn draw_orb<R: Renderer>(r: &mut R, orb: &AbilityOrb) {
    if orb.collected {
        return;
    }
    let pulse = ((orb.pulse_timer as f32 * 0.1).sin() + 1.0) / 2.0;
    let size = (15.0 + pulse * 10.0).floor();
    let (cx, cy) = orb.rect.center();
    r.draw_filled_circle(cx, cy, size, orb_color(orb.ability));
    r.draw_circle(cx, cy, size, WHITE);
}

/// Two eyes on the side the body is facing.
fn draw_eyes<R: Renderer>(r: &mut R, rect: &Rect, right: bool, size: f32) {
    let x = if right { rect.right() - 10.0 } else { rect.x + 10.0 };
    r.draw_filled_circle(x, rect.y + 10.0, size, WHITE);
    r.draw_filled_circle(x, rect.y + 22.0, size, WHITE);
}

fn draw_enemy<R: Renderer>(r: &mut R, enemy: &Enemy) {
    let rect = &enemy.rect;
    let body = if enemy.necromanced {
        GRAY
    } else {
        enemy_color(enemy.kind)
    };
    fill(r, rect, body);

    let eye = if enemy.kind == EnemyKind::Boss { 8.0 } else { 4.0 };
    draw_eyes(r, rect, enemy.direction > 0.0, eye);

    if enemy.health < enemy.max_health {
        let ratio = enemy.health as f32 / enemy.max_health as f32;
        fill(r, &Rect::new(rect.x, rect.y - 10.0, rect.w, 5.0), RED);
        fill(r, &Rect::new(rect.x, rect.y - 10.0, (ratio * rect.w).floor(), 5.0), GREEN);
    }

    for shot in &enemy.projectiles {
        r.draw_filled_circle(shot.x.trunc(), shot.y.trunc(), 5.0, ORANGE);
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

fn draw_player<R: Renderer, G: Rng>(r: &mut R, player: &Player, rng: &mut G) {
    let rect = &player.rect;
    let flashing = player.invincibility_timer > 0 && player.invincibility_timer % 5 < 3;
    fill(r, rect, if flashing { FLASH } else { BLUE });
    draw_eyes(r, rect, player.facing == Facing::Right, 4.0);

    let (cx, cy) = rect.center();
    if player.shielding {
        r.draw_circle(cx, cy, 25.0, SHIELD_RIM);
        if player.shield_timer > 0 {
            let remaining = 1.0 - player.shield_timer as f32 / SHIELD_DURATION as f32;
            let bar = Rect::new(cx - 20.0, rect.top() - 15.0, 40.0, 5.0);
            fill(r, &bar, RED);
            fill(r, &Rect::new(bar.x, bar.y, (40.0 * remaining).floor(), 5.0), GREEN);
        }
    }

    if player.attacking {
        let end_x = cx + player.facing.sign() * (rect.w / 2.0 + WHIP_LENGTH);
        let start_x = match player.facing {
            Facing::Right => rect.right(),
            Facing::Left => rect.left(),
        };
        r.draw_line(start_x, cy, end_x, cy, WHITE);
        r.draw_filled_circle(end_x, cy, 4.0, WHITE);
    }

    if player.laser_active {
        let beam = match player.facing {
            Facing::Right => Rect::new(rect.right(), cy - 5.0, WORLD_WIDTH - rect.right(), 10.0),
            Facing::Left => Rect::new(0.0, cy - 5.0, rect.left(), 10.0),
        };
        fill(r, &beam, RED);
    }

    for effect in &player.effects {
        draw_effect(r, effect, rng);
    }
}

fn draw_effect<R: Renderer, G: Rng>(r: &mut R, effect: &AbilityEffect, rng: &mut G) {
    let (x, y) = effect.position();
    match effect.kind {
        EffectKind::BigFireball { .. } => {
            r.draw_filled_circle(x, y, 20.0, ORANGE);
            r.draw_circle(x, y, 20.0, RED);
        }
        EffectKind::EnergyWave { radius } => r.draw_circle(x, y, radius, CYAN),
        EffectKind::Lightning => {
            for _ in 0..5 {
                let angle = rng.gen_range(0.0..TAU);
                let length = rng.gen_range(50..=150) as f32;
                r.draw_line(x, y, x + angle.cos() * length, y + angle.sin() * length, YELLOW);
            }
        }
        EffectKind::EnergyOrbs { angle } => {
            for i in 0..3 {
                let a = angle + i as f32 * TAU / 3.0;
                let (ox, oy) = (x + a.cos() * 40.0, y + a.sin() * 40.0);
                r.draw_filled_circle(ox, oy, 10.0, YELLOW);
                r.draw_circle(ox, oy, 10.0, ORANGE);
            }
        }
        EffectKind::PainSpikes { .. } => {
            fill(r, &Rect::new(x - 30.0, y - 5.0, 60.0, 10.0), DARK_RED);
            for i in 0..6 {
                let spike_x = x - 25.0 + i as f32 * 10.0;
                r.draw_line(spike_x, y - 5.0, spike_x + 5.0, y - 15.0, RED);
            }
        }
        EffectKind::SlowTime => r.draw_circle(x, y, 30.0, GRAY),
        EffectKind::Necromancer => r.draw_circle(x, y, 30.0, Rgb(50, 50, 50)),
    }
}

// ── HUD ──────────────────────────────────────────────────────────────────────

fn draw_hud<R: Renderer>(r: &mut R, state: &GameState) {
    let player = &state.player;

    let health = player.health.max(0) as f32 / player.max_health as f32;
    fill(r, &Rect::new(10.0, 10.0, 200.0, 20.0), BLACK);
    fill(r, &Rect::new(10.0, 10.0, (200.0 * health).floor(), 20.0), RED);
    r.draw_text(
        &format!("HP: {}/{}", player.health.max(0), player.max_health),
        110.0,
        20.0,
        WHITE,
    );

    let mana = player.mana / player.max_mana;
    fill(r, &Rect::new(10.0, 40.0, 200.0, 20.0), BLACK);
    fill(r, &Rect::new(10.0, 40.0, (200.0 * mana).floor(), 20.0), BLUE);
    r.draw_text(
        &format!("MP: {}/{}", player.mana as i32, player.max_mana as i32),
        110.0,
        50.0,
        WHITE,
    );

    r.draw_text(&format!("LEVEL: {}", state.level), 730.0, 20.0, WHITE);

    if let Some(ability) = player.collected_ability {
        let label = format!("ABILITY: {}", ability_name(ability).to_uppercase());
        r.draw_text(&label, 110.0, 80.0, YELLOW);
    }
}
