/// Procedural level layouts.
///
/// Level 1 is a fixed tutorial, level 10 a fixed boss arena, and levels 2–9
/// are built from the level number plus the injected RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{BOSS_LEVEL, FLOOR_Y, MAX_LEVEL, WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{
    AbilityKind, AbilityOrb, Door, Enemy, EnemyKind, Hazard, HazardKind, Platform,
};
use crate::geometry::Rect;

const DOOR_SIZE: (f32, f32) = (50.0, 70.0);
const ORB_SIZE: f32 = 30.0;
const ORB_SPOT: (f32, f32) = (700.0, 520.0);
const HAZARD_SLOTS: [f32; 3] = [200.0, 400.0, 600.0];
const HAZARD_SIZE: (f32, f32) = (50.0, 20.0);
const RAISED_PLATFORM: (f32, f32) = (200.0, 20.0);
const SMALL_PLATFORM: (f32, f32) = (150.0, 20.0);
/// Spawn height for an enemy standing on the floor.
const GROUND_SPAWN_Y: f32 = FLOOR_Y - 32.0;

/// Everything a level places in the world.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<Hazard>,
    pub door: Door,
    pub orbs: Vec<AbilityOrb>,
}

fn floor() -> Platform {
    Platform {
        rect: Rect::new(0.0, FLOOR_Y, WORLD_WIDTH, WORLD_HEIGHT - FLOOR_Y),
        is_ground: true,
    }
}

fn platform(x: f32, y: f32, (w, h): (f32, f32)) -> Platform {
    Platform {
        rect: Rect::new(x, y, w, h),
        is_ground: false,
    }
}

fn door(x: f32, y: f32) -> Door {
    Door {
        rect: Rect::new(x, y, DOOR_SIZE.0, DOOR_SIZE.1),
    }
}

fn orb(ability: AbilityKind) -> AbilityOrb {
    AbilityOrb {
        rect: Rect::new(ORB_SPOT.0, ORB_SPOT.1, ORB_SIZE, ORB_SIZE),
        ability,
        collected: false,
        pulse_timer: 0,
    }
}

fn spawn<R: Rng>(
    kind: EnemyKind,
    x: f32,
    y: f32,
    level: u32,
    next_id: &mut u32,
    rng: &mut R,
) -> Enemy {
    let id = *next_id;
    *next_id += 1;
    Enemy::new(id, kind, x, y, level, rng)
}

/// Lay out level `level`, clamped to `1..=MAX_LEVEL`.  Enemy ids are drawn
/// from `next_id`.
pub fn generate_level<R: Rng>(level: u32, next_id: &mut u32, rng: &mut R) -> LevelLayout {
    let level = level.clamp(1, MAX_LEVEL);
    let layout = match level {
        1 => tutorial(next_id, rng),
        BOSS_LEVEL => boss_arena(next_id, rng),
        _ => regular(level, next_id, rng),
    };
    log::debug!(
        "level {level}: {} platforms, {} enemies, {} hazards, {} orbs",
        layout.platforms.len(),
        layout.enemies.len(),
        layout.hazards.len(),
        layout.orbs.len()
    );
    layout
}

fn tutorial<R: Rng>(next_id: &mut u32, rng: &mut R) -> LevelLayout {
    let platforms = vec![
        floor(),
        platform(100.0, 450.0, SMALL_PLATFORM),
        platform(350.0, 350.0, SMALL_PLATFORM),
        platform(600.0, 450.0, SMALL_PLATFORM),
    ];

    let spots = [
        (200.0, 518.0),
        (400.0, 518.0),
        (600.0, 518.0),
        (300.0, 418.0),
        (500.0, 418.0),
    ];
    let enemies = spots
        .iter()
        .map(|&(x, y)| spawn(EnemyKind::Grunt, x, y, 1, next_id, rng))
        .collect();

    LevelLayout {
        platforms,
        enemies,
        hazards: Vec::new(),
        door: door(675.0, 320.0),
        orbs: vec![orb(AbilityKind::BigFireball)],
    }
}

fn boss_arena<R: Rng>(next_id: &mut u32, rng: &mut R) -> LevelLayout {
    LevelLayout {
        platforms: vec![
            floor(),
            platform(150.0, 450.0, SMALL_PLATFORM),
            platform(500.0, 450.0, SMALL_PLATFORM),
        ],
        enemies: vec![spawn(EnemyKind::Boss, 400.0, 350.0, BOSS_LEVEL, next_id, rng)],
        hazards: Vec::new(),
        door: door(675.0, 380.0),
        orbs: vec![orb(AbilityKind::Superman)],
    }
}

fn regular<R: Rng>(level: u32, next_id: &mut u32, rng: &mut R) -> LevelLayout {
    let mut platforms = vec![floor()];
    let platform_count = (5 + level).min(10);
    for i in 0..platform_count {
        let x = if i % 2 == 0 { 100.0 } else { 500.0 };
        let y = 500.0 - i as f32 * 60.0;
        platforms.push(platform(x, y, RAISED_PLATFORM));
    }

    let hazard_count = if level > 3 { (level - 3).min(4) as usize } else { 0 };
    let hazards = HAZARD_SLOTS
        .iter()
        .take(hazard_count)
        .map(|&x| Hazard {
            rect: Rect::new(x, FLOOR_Y - HAZARD_SIZE.1, HAZARD_SIZE.0, HAZARD_SIZE.1),
            kind: HazardKind::Spikes,
        })
        .collect();

    let raised: Vec<Rect> = platforms
        .iter()
        .filter(|p| !p.is_ground)
        .map(|p| p.rect)
        .collect();

    let enemy_count = 5 + level;
    let top_tier = level.min(9);
    let mut enemies = Vec::with_capacity(enemy_count as usize);
    for i in 0..enemy_count {
        let perch = if i % 2 == 1 { raised.choose(rng).copied() } else { None };
        let (x, y) = match perch {
            Some(p) => (p.x + rng.gen_range(0.0..=(p.w - 32.0)), p.y - 32.0),
            None => (rng.gen_range(100..=700) as f32, GROUND_SPAWN_Y),
        };
        let kind = EnemyKind::from_tier(rng.gen_range(1..=top_tier)).unwrap_or(EnemyKind::Grunt);
        enemies.push(spawn(kind, x, y, level, next_id, rng));
    }

    let exit = raised
        .iter()
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .map(|top| door(top.center_x() - DOOR_SIZE.0 / 2.0, top.y - DOOR_SIZE.1))
        .unwrap_or_else(|| door(675.0, 320.0));

    let orbs = level
        .checked_sub(1)
        .and_then(|i| AbilityKind::SEQUENCE.get(i as usize))
        .map(|&ability| vec![orb(ability)])
        .unwrap_or_default();

    LevelLayout {
        platforms,
        enemies,
        hazards,
        door: exit,
        orbs,
    }
}
