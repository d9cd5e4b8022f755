//! Hat stack: the cosmetic life tokens worn above the player
//!
//! The player's base sprite already wears one hat, so the stack holds one
//! token per health point *above* 1: `max(0, health - 1)` tokens at all
//! times. The stack itself never decides when to grow or shrink; it replays
//! the `HealthChange` events returned by the health mutators, one add or
//! remove per unit, so the tokens can never drift out of sync with health.
//!
//! A removed token turns into a `FallingHat`: a detached body that tumbles
//! off-screen and is owned (and culled) by the `FallingHats` container.

use crate::animation::{AnimationState, Facing};
use crate::geometry::{RectF, Vec2};
use crate::stats::HealthChange;

/// Fraction of a hat's height each stacked token is raised by
const STACK_RAISE: f32 = 0.1;
/// Hat sprite frame size in pixels
const HAT_SIZE: (f32, f32) = (40.0, 32.0);

const FALL_VELOCITY: Vec2 = Vec2::new(100.0, -300.0);
const FALL_GRAVITY: f32 = 1000.0;
const SPIN_SPEED: f32 = 360.0;

/// Everything the renderer needs to draw one hat frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatSprite {
    pub state: AnimationState,
    pub frame: u32,
    pub facing: Facing,
}

/// One stacked life token
#[derive(Debug, Clone)]
pub struct HatToken {
    pub rect: RectF,
    pub state: AnimationState,
    pub frame_index: f32,
    pub facing: Facing,
}

impl HatToken {
    /// Snapshot of the currently displayed frame
    pub fn sprite(&self) -> HatSprite {
        HatSprite {
            state: self.state,
            frame: (self.frame_index as u32) % (self.state.frame_count() as u32),
            facing: self.facing,
        }
    }
}

/// Ordered stack of hat tokens, most recently added on top
#[derive(Debug, Clone, Default)]
pub struct HatStack {
    hats: Vec<HatToken>,
}

impl HatStack {
    pub fn new() -> Self {
        HatStack { hats: Vec::new() }
    }

    fn stack_pos(base: Vec2, index: usize) -> Vec2 {
        Vec2::new(
            base.x,
            base.y - HAT_SIZE.1 * STACK_RAISE * (index + 1) as f32,
        )
    }

    /// Appends one token above all existing ones, anchored to the player's
    /// sprite top-left
    pub fn add(&mut self, pos: Vec2, state: AnimationState) {
        let top = Self::stack_pos(pos, self.hats.len());
        self.hats.push(HatToken {
            rect: RectF::new(top.x, top.y, HAT_SIZE.0, HAT_SIZE.1),
            state,
            frame_index: 0.0,
            facing: Facing::Right,
        });
    }

    /// Pops the topmost token and converts it into a `FallingHat` spawned at
    /// the token's last rendered position. Safe no-op on an empty stack:
    /// returns `None` and spawns nothing.
    pub fn remove(&mut self) -> Option<FallingHat> {
        let hat = self.hats.pop()?;
        Some(FallingHat::new(hat.rect.center(), hat.sprite()))
    }

    /// Repositions every token over the player and mirrors its animation
    pub fn update(&mut self, pos: Vec2, frame_index: f32, state: AnimationState, facing: Facing) {
        for (index, hat) in self.hats.iter_mut().enumerate() {
            let stacked = Self::stack_pos(pos, index);
            hat.rect.x = stacked.x;
            hat.rect.y = stacked.y;
            hat.frame_index = frame_index;
            hat.state = state;
            hat.facing = facing;
        }
    }

    /// Replays a health mutation one unit at a time: N units added means N
    /// `add` calls, N removed means N `remove` calls, with every popped token
    /// handed to the falling-hats container
    pub fn apply_change(
        &mut self,
        change: HealthChange,
        pos: Vec2,
        state: AnimationState,
        falling: &mut FallingHats,
    ) {
        for _ in 0..change.hats_added {
            self.add(pos, state);
        }
        for _ in 0..change.hats_removed {
            if let Some(hat) = self.remove() {
                falling.spawn(hat);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hats.is_empty()
    }

    pub fn tokens(&self) -> &[HatToken] {
        &self.hats
    }
}

/// A hat knocked off the stack, tumbling off-screen
#[derive(Debug, Clone)]
pub struct FallingHat {
    pub rect: RectF,
    pub sprite: HatSprite,
    velocity: Vec2,
    rotation: f32,
}

impl FallingHat {
    fn new(center: Vec2, sprite: HatSprite) -> Self {
        FallingHat {
            rect: RectF::from_center(center, HAT_SIZE.0, HAT_SIZE.1),
            sprite,
            velocity: FALL_VELOCITY,
            rotation: 0.0,
        }
    }

    /// Current spin angle in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Advances one tick; returns false once the hat's top edge has passed
    /// the level's bottom boundary and it should be dropped
    fn update(&mut self, dt: f32, level_bottom: f32) -> bool {
        self.velocity.y += FALL_GRAVITY * dt;
        self.rect.translate(self.velocity * dt);
        self.rotation = (self.rotation + SPIN_SPEED * dt) % 360.0;

        self.rect.top() <= level_bottom
    }
}

/// Sole owner of all detached hats currently in flight
#[derive(Debug, Clone, Default)]
pub struct FallingHats {
    hats: Vec<FallingHat>,
}

impl FallingHats {
    pub fn new() -> Self {
        FallingHats { hats: Vec::new() }
    }

    pub fn spawn(&mut self, hat: FallingHat) {
        self.hats.push(hat);
    }

    /// Steps every hat and discards the ones past the level bottom
    pub fn update(&mut self, dt: f32, level_bottom: f32) {
        self.hats.retain_mut(|hat| hat.update(dt, level_bottom));
    }

    pub fn len(&self) -> usize {
        self.hats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingHat> {
        self.hats.iter()
    }
}
