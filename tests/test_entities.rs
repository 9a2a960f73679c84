use pantheon::compute::{init_state, start_game};
use pantheon::config::GameConfig;
use pantheon::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn facing_sign() {
    assert_eq!(Facing::Left.sign(), -1.0);
    assert_eq!(Facing::Right.sign(), 1.0);
}

#[test]
fn ability_sequence_ends_with_superman() {
    assert_eq!(AbilityKind::SEQUENCE[0], AbilityKind::BigFireball);
    assert_eq!(AbilityKind::SEQUENCE[7], AbilityKind::Superman);
}

#[test]
fn game_state_clone_is_independent() {
    let original = start_game(
        &init_state(&GameConfig::default()),
        &mut StdRng::seed_from_u64(42),
    );
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 999.0;
    cloned.enemies.clear();
    cloned.level = 7;

    assert_eq!(original.player.rect.x, 50.0);
    assert_eq!(original.enemies.len(), 5);
    assert_eq!(original.level, 1);
}
