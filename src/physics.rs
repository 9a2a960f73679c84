/// Gravity integration and collision resolution shared by the player and
/// ground enemies.
///
/// Resolution is single-step: a body moving farther than a platform's
/// thickness in one tick can pass through it.  Velocities in this game stay
/// well below that, so no sweep is performed.

use crate::constants::{
    GRAVITY, HAZARD_BOUNCE, HAZARD_DAMAGE, SHIELDED_HAZARD_DAMAGE, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::entities::{Enemy, Hazard, Platform, Player};
use crate::geometry::Rect;

/// Anything with a hitbox and a vertical velocity.
pub trait Body {
    fn hitbox(&self) -> &Rect;
    fn hitbox_mut(&mut self) -> &mut Rect;
    fn velocity_y(&self) -> f32;
    fn set_velocity_y(&mut self, vy: f32);
    /// Called when the body touches down; clears jump state.
    fn land(&mut self);
}

impl Body for Player {
    fn hitbox(&self) -> &Rect {
        &self.rect
    }
    fn hitbox_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn velocity_y(&self) -> f32 {
        self.velocity_y
    }
    fn set_velocity_y(&mut self, vy: f32) {
        self.velocity_y = vy;
    }
    fn land(&mut self) {
        self.is_jumping = false;
    }
}

impl Body for Enemy {
    fn hitbox(&self) -> &Rect {
        &self.rect
    }
    fn hitbox_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn velocity_y(&self) -> f32 {
        self.velocity_y
    }
    fn set_velocity_y(&mut self, vy: f32) {
        self.velocity_y = vy;
    }
    fn land(&mut self) {
        self.is_jumping = false;
    }
}

/// World edges a body was pushed back from during `clamp_to_world`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeContact {
    pub left: bool,
    pub right: bool,
    pub floor: bool,
}

/// Add one tick of gravity and apply the vertical displacement.
pub fn fall<B: Body>(body: &mut B) {
    let vy = body.velocity_y() + GRAVITY;
    body.set_velocity_y(vy);
    body.hitbox_mut().y += vy;
}

/// Snap the body out of every platform it overlaps.
///
/// Falling bodies land on top of the platform; rising bodies bump their head
/// on its underside.  A body with zero vertical velocity is left alone.
pub fn resolve_platforms<B: Body>(body: &mut B, platforms: &[Platform]) {
    for platform in platforms {
        if !body.hitbox().overlaps(&platform.rect) {
            continue;
        }
        let vy = body.velocity_y();
        if vy > 0.0 {
            body.hitbox_mut().set_bottom(platform.rect.top());
            body.set_velocity_y(0.0);
            body.land();
        } else if vy < 0.0 {
            body.hitbox_mut().set_top(platform.rect.bottom());
            body.set_velocity_y(0.0);
        }
    }
}

/// Keep the body inside `[0, WORLD_WIDTH]` and, when `has_floor`, above the
/// bottom of the world.
pub fn clamp_to_world<B: Body>(body: &mut B, has_floor: bool) -> EdgeContact {
    let mut contact = EdgeContact::default();
    let rect = body.hitbox_mut();
    if rect.left() < 0.0 {
        rect.set_left(0.0);
        contact.left = true;
    }
    if rect.right() > WORLD_WIDTH {
        rect.set_right(WORLD_WIDTH);
        contact.right = true;
    }
    if has_floor && rect.bottom() > WORLD_HEIGHT {
        rect.set_bottom(WORLD_HEIGHT);
        body.set_velocity_y(0.0);
        body.land();
        contact.floor = true;
    }
    contact
}

/// Damage owed for touching hazards this tick, if any.
///
/// `incoming_vy` is the vertical velocity before platform resolution, since
/// landing on the floor zeroes it.  A body that was moving downward into a
/// hazard is bounced back up.
pub fn hazard_contact<B: Body>(
    body: &mut B,
    hazards: &[Hazard],
    shielding: bool,
    incoming_vy: f32,
) -> Option<i32> {
    let mut damage = None;
    for hazard in hazards {
        if !body.hitbox().overlaps(&hazard.rect) {
            continue;
        }
        damage = Some(if shielding {
            SHIELDED_HAZARD_DAMAGE
        } else {
            HAZARD_DAMAGE
        });
        if incoming_vy > 0.0 {
            body.set_velocity_y(HAZARD_BOUNCE);
        }
    }
    damage
}
