//! Player movement and collision resolution
//!
//! The player is a kinematic body: input and gravity produce a candidate
//! position each tick, then the hitbox is pushed out of overlapping level
//! geometry one axis at a time. Side disambiguation uses the previous-frame
//! rectangles of both parties (compared through integer truncation, as the
//! collision grid is pixel-aligned), so a body already overlapping on one
//! axis cannot snap through a thin obstacle.
//!
//! Per-frame order inside `update()`: snapshot the old hitbox, poll timers,
//! apply the input snapshot, integrate and resolve, ride the carried
//! platform, re-probe surface contact, then derive animation state. Callers
//! must feed every tick exactly once; ticks are never skipped or reordered.

use crate::animation::{determine_animation_state, AnimationState, Facing};
use crate::geometry::{RectF, Vec2};
use crate::input::InputSnapshot;
use crate::settings::ANIMATION_SPEED;
use crate::stats::{HealthChange, PlayerData};
use crate::timer::Timer;
use crate::world::CollisionWorld;
use std::time::Duration;

/// Visual sprite frame size; the hitbox is inset from it
const SPRITE_SIZE: (f32, f32) = (120.0, 110.0);
const HITBOX_INSET: (f32, f32) = (-76.0, -36.0);

const SPEED: f32 = 300.0;
const GRAVITY: f32 = 1300.0;
const JUMP_HEIGHT: f32 = 750.0;

/// Which surfaces the hitbox probes are currently touching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceContact {
    pub floor: bool,
    pub left: bool,
    pub right: bool,
}

impl SurfaceContact {
    pub fn on_wall(&self) -> bool {
        self.left || self.right
    }
}

/// Cooldown and suppression windows owned by the player
#[derive(Debug, Clone)]
pub struct PlayerTimers {
    /// Horizontal input suppression after kicking off a wall
    pub wall_jump: Timer,
    /// Blocks wall sliding right after a floor jump
    pub wall_slide_block: Timer,
    /// Lets the player drop through semi-solid platforms
    pub platform_skip: Timer,
    /// Attack cooldown
    pub attack_block: Timer,
    /// Post-damage invulnerability
    pub hit: Timer,
}

impl PlayerTimers {
    fn new() -> Self {
        PlayerTimers {
            wall_jump: Timer::new(Duration::from_millis(400)),
            wall_slide_block: Timer::new(Duration::from_millis(250)),
            platform_skip: Timer::new(Duration::from_millis(100)),
            attack_block: Timer::new(Duration::from_millis(500)),
            hit: Timer::new(Duration::from_millis(400)),
        }
    }

    fn update_all(&mut self) {
        self.wall_jump.update();
        self.wall_slide_block.update();
        self.platform_skip.update();
        self.attack_block.update();
        self.hit.update();
    }
}

/// What happened during a tick that the front end may want to react to
/// (jump / attack sounds live outside this crate)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerEvents {
    pub jumped: bool,
    pub attacked: bool,
}

/// Read-only per-frame view for the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct PlayerSnapshot {
    pub health: i32,
    pub coins: i32,
    pub hitbox: RectF,
    pub state: AnimationState,
    pub facing: Facing,
    pub hit_flash: bool,
}

enum Axis {
    Horizontal,
    Vertical,
}

pub struct Player {
    /// Sprite-aligned rectangle, kept centered on the hitbox; hats anchor to
    /// its top-left corner
    pub rect: RectF,
    pub hitbox: RectF,
    pub old_hitbox: RectF,
    /// `x` is the input direction (-1/0/1), `y` the vertical velocity in px/s
    direction: Vec2,
    jump: bool,
    pub attacking: bool,
    pub facing: Facing,
    pub state: AnimationState,
    pub frame_index: f32,
    on_surface: SurfaceContact,
    /// Index of the moving platform currently carrying the player, if any.
    /// Cleared and re-derived from the floor probe every frame.
    platform: Option<usize>,
    pub timers: PlayerTimers,
    level_bottom: f32,
    flicker_clock: f32,
}

impl Player {
    pub fn new(pos: Vec2, level_bottom: f32) -> Self {
        let rect = RectF::new(pos.x, pos.y, SPRITE_SIZE.0, SPRITE_SIZE.1);
        let hitbox = rect.inflate(HITBOX_INSET.0, HITBOX_INSET.1);

        Player {
            rect,
            hitbox,
            old_hitbox: hitbox,
            direction: Vec2::ZERO,
            jump: false,
            attacking: false,
            facing: Facing::Right,
            state: AnimationState::Idle,
            frame_index: 0.0,
            on_surface: SurfaceContact::default(),
            platform: None,
            timers: PlayerTimers::new(),
            level_bottom,
            flicker_clock: 0.0,
        }
    }

    /// Runs one simulation tick against the already-updated collision world
    pub fn update(&mut self, dt: f32, input: &InputSnapshot, world: &CollisionWorld) -> PlayerEvents {
        self.old_hitbox = self.hitbox;
        self.timers.update_all();

        let attacked = self.handle_input(input);
        let jumped = self.apply_movement(dt, world);
        self.ride_platform(dt, world);
        self.check_contact(world);

        self.derive_state();
        self.animate(dt);
        self.flicker_clock += dt;

        PlayerEvents { jumped, attacked }
    }

    /// Horizontal input, drop-through and attack are suppressed while the
    /// wall-jump timer runs; the jump flag is latched regardless
    fn handle_input(&mut self, input: &InputSnapshot) -> bool {
        let mut attacked = false;

        if !self.timers.wall_jump.active() {
            let mut input_x = 0.0;
            if input.right {
                input_x += 1.0;
                self.facing = Facing::Right;
            }
            if input.left {
                input_x -= 1.0;
                self.facing = Facing::Left;
            }
            if input.drop_through {
                self.timers.platform_skip.activate();
            }
            if input.attack {
                attacked = self.try_attack();
            }
            self.direction.x = input_x;
        }

        if input.jump {
            self.jump = true;
        }

        attacked
    }

    fn try_attack(&mut self) -> bool {
        if self.timers.attack_block.active() {
            return false;
        }
        self.attacking = true;
        self.frame_index = 0.0;
        self.timers.attack_block.activate();
        true
    }

    fn apply_movement(&mut self, dt: f32, world: &CollisionWorld) -> bool {
        // horizontal
        self.hitbox.x += self.direction.x * SPEED * dt;
        self.collide_solids(Axis::Horizontal, world);

        // vertical: wall slide at a tenth of gravity, or split gravity
        // integration (half before, half after the position update)
        if !self.on_surface.floor
            && self.on_surface.on_wall()
            && !self.timers.wall_slide_block.active()
        {
            self.direction.y = 0.0;
            self.hitbox.y += GRAVITY / 10.0 * dt;
        } else {
            self.direction.y += GRAVITY / 2.0 * dt;
            self.hitbox.y += self.direction.y * dt;
            self.direction.y += GRAVITY / 2.0 * dt;
        }

        let jumped = self.resolve_jump();

        self.collide_solids(Axis::Vertical, world);
        self.collide_semi_solids(world);
        self.rect.set_center(self.hitbox.center());

        jumped
    }

    fn resolve_jump(&mut self) -> bool {
        if !self.jump {
            return false;
        }
        self.jump = false;

        if self.on_surface.floor {
            self.direction.y = -JUMP_HEIGHT;
            self.timers.wall_slide_block.activate();
            // 1px nudge so the floor probe doesn't re-ground us immediately
            self.hitbox.y -= 1.0;
            true
        } else if self.on_surface.on_wall() && !self.timers.wall_slide_block.active() {
            self.timers.wall_jump.activate();
            self.direction.y = -JUMP_HEIGHT;
            self.direction.x = if self.on_surface.left { 1.0 } else { -1.0 };
            true
        } else {
            false
        }
    }

    fn collide_solids(&mut self, axis: Axis, world: &CollisionWorld) {
        for obstacle in world.solids() {
            if !obstacle.rect.intersects(&self.hitbox) {
                continue;
            }
            match axis {
                Axis::Horizontal => {
                    // approached from the obstacle's right side
                    if self.hitbox.left() <= obstacle.rect.right()
                        && self.old_hitbox.left() as i32 >= obstacle.old_rect.right() as i32
                    {
                        self.hitbox.set_left(obstacle.rect.right());
                    }
                    // approached from the obstacle's left side
                    if self.hitbox.right() >= obstacle.rect.left()
                        && self.old_hitbox.right() as i32 <= obstacle.old_rect.left() as i32
                    {
                        self.hitbox.set_right(obstacle.rect.left());
                    }
                }
                Axis::Vertical => {
                    // bumped the underside
                    if self.hitbox.top() <= obstacle.rect.bottom()
                        && self.old_hitbox.top() as i32 >= obstacle.old_rect.bottom() as i32
                    {
                        self.hitbox.set_top(obstacle.rect.bottom());
                        if obstacle.is_moving() {
                            // a platform rising into the player needs extra
                            // clearance or the next frame re-embeds
                            self.hitbox.y += 6.0;
                        }
                    }
                    // landed on top
                    if self.hitbox.bottom() >= obstacle.rect.top()
                        && self.old_hitbox.bottom() as i32 <= obstacle.old_rect.top() as i32
                    {
                        self.hitbox.set_bottom(obstacle.rect.top());
                    }
                    self.direction.y = 0.0;
                }
            }
        }
    }

    /// Downward landings only; never blocks upward or sideways movement,
    /// and skipped entirely while a drop-through is in progress
    fn collide_semi_solids(&mut self, world: &CollisionWorld) {
        if self.timers.platform_skip.active() {
            return;
        }
        for obstacle in world.semi_solids() {
            if !obstacle.rect.intersects(&self.hitbox) {
                continue;
            }
            if self.hitbox.bottom() >= obstacle.rect.top()
                && self.old_hitbox.bottom() as i32 <= obstacle.old_rect.top() as i32
            {
                self.hitbox.set_bottom(obstacle.rect.top());
                if self.direction.y > 0.0 {
                    self.direction.y = 0.0;
                }
            }
        }
    }

    /// Carried platforms shift the player by their own per-frame displacement
    fn ride_platform(&mut self, dt: f32, world: &CollisionWorld) {
        if let Some(index) = self.platform {
            if let Some(platform) = world.obstacle(index) {
                self.hitbox.translate(platform.displacement(dt));
            }
        }
    }

    /// Probes a 2px strip under the hitbox for floor contact and 2px strips
    /// flush against each side (over the middle half of the height) for wall
    /// contact. Semi-solids count as floor only while descending, so the
    /// player can jump up through them. Walls are solids only.
    fn check_contact(&mut self, world: &CollisionWorld) {
        let floor_rect = RectF::new(self.hitbox.left(), self.hitbox.bottom(), self.hitbox.w, 2.0);
        let right_rect = RectF::new(
            self.hitbox.right(),
            self.hitbox.top() + self.hitbox.h / 4.0,
            2.0,
            self.hitbox.h / 2.0,
        );
        let left_rect = RectF::new(
            self.hitbox.left() - 2.0,
            self.hitbox.top() + self.hitbox.h / 4.0,
            2.0,
            self.hitbox.h / 2.0,
        );

        let solid_floor = world.solids().any(|o| o.rect.intersects(&floor_rect));
        let semi_floor = world.semi_solids().any(|o| o.rect.intersects(&floor_rect))
            && self.direction.y >= 0.0;
        self.on_surface.floor = solid_floor || semi_floor;
        self.on_surface.right = world.solids().any(|o| o.rect.intersects(&right_rect));
        self.on_surface.left = world.solids().any(|o| o.rect.intersects(&left_rect));

        self.platform = None;
        for (index, obstacle) in world.moving() {
            if obstacle.rect.intersects(&floor_rect) {
                self.platform = Some(index);
            }
        }
    }

    fn derive_state(&mut self) {
        self.state = determine_animation_state(
            self.on_surface.floor,
            self.on_surface.on_wall(),
            self.direction,
            self.attacking,
        );
    }

    fn animate(&mut self, dt: f32) {
        self.frame_index += ANIMATION_SPEED * dt;
        if self.state == AnimationState::Attack && self.frame_index >= self.state.frame_count() {
            self.state = AnimationState::Idle;
        }
        if self.attacking && self.frame_index > self.state.frame_count() {
            self.attacking = false;
        }
    }

    /// Applies one point of damage unless the invulnerability window is
    /// running; repeated hits inside the window are no-ops
    pub fn take_damage(&mut self, data: &mut PlayerData) -> HealthChange {
        if self.timers.hit.active() {
            return HealthChange::default();
        }
        self.timers.hit.activate();
        data.apply_health_delta(-1)
    }

    /// Damage flicker pulse for the renderer
    pub fn hit_flash(&self) -> bool {
        self.timers.hit.active() && (self.flicker_clock * 100.0).sin() >= 0.0
    }

    /// Fall-death condition: the hitbox dropped past the level's bottom edge
    pub fn fell_out(&self) -> bool {
        self.hitbox.bottom() > self.level_bottom
    }

    /// Anchor point for the hat stack (sprite top-left)
    pub fn position(&self) -> Vec2 {
        self.rect.topleft()
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn contact(&self) -> SurfaceContact {
        self.on_surface
    }

    pub fn carried_platform(&self) -> Option<usize> {
        self.platform
    }

    pub fn snapshot(&self, data: &PlayerData) -> PlayerSnapshot {
        PlayerSnapshot {
            health: data.health(),
            coins: data.coins(),
            hitbox: self.hitbox,
            state: self.state,
            facing: self.facing,
            hit_flash: self.hit_flash(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ObstacleKind, PatrolAxis, PatrolMotion};

    const DT: f32 = 1.0 / 60.0;

    /// Player with its hitbox bottom resting exactly on `y`, centered at `x`
    fn player_resting_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(Vec2::ZERO, 2000.0);
        player.hitbox.set_center(Vec2::new(x, 0.0));
        player.hitbox.set_bottom(y);
        player.old_hitbox = player.hitbox;
        player.rect.set_center(player.hitbox.center());
        player
    }

    fn floor_world(top: f32) -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_solid(RectF::new(-1000.0, top, 2000.0, 64.0));
        world
    }

    #[test]
    fn test_rest_on_floor_is_stable() {
        let mut world = floor_world(500.0);
        let mut player = player_resting_at(0.0, 500.0);

        for _ in 0..5 {
            world.update(DT);
            player.update(DT, &InputSnapshot::none(), &world);
        }

        // No jitter: the hitbox bottom stays exactly on the floor
        assert_eq!(player.hitbox.bottom(), 500.0);
        assert!(player.contact().floor);
        assert_eq!(player.state, AnimationState::Idle);
    }

    #[test]
    fn test_run_state_and_facing() {
        let mut world = floor_world(500.0);
        let mut player = player_resting_at(0.0, 500.0);

        let start_x = player.hitbox.x;
        let input = InputSnapshot {
            left: true,
            ..InputSnapshot::none()
        };
        world.update(DT);
        player.update(DT, &input, &world);
        world.update(DT);
        player.update(DT, &input, &world);

        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.state, AnimationState::Run);
        assert!(player.hitbox.x < start_x - 5.0);
    }

    #[test]
    fn test_horizontal_push_out_of_wall() {
        let mut world = floor_world(500.0);
        // wall to the player's right
        world.add_solid(RectF::new(100.0, 300.0, 64.0, 200.0));
        let mut player = player_resting_at(60.0, 500.0);

        let input = InputSnapshot {
            right: true,
            ..InputSnapshot::none()
        };
        for _ in 0..30 {
            world.update(DT);
            player.update(DT, &input, &world);
        }

        // Stopped flush against the wall, not inside it
        assert_eq!(player.hitbox.right(), 100.0);
        assert!(player.contact().right);
    }

    #[test]
    fn test_floor_jump_sets_velocity_and_leaves_ground() {
        let mut world = floor_world(500.0);
        let mut player = player_resting_at(0.0, 500.0);

        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);

        let input = InputSnapshot {
            jump: true,
            ..InputSnapshot::none()
        };
        world.update(DT);
        let events = player.update(DT, &input, &world);

        assert!(events.jumped);
        assert_eq!(player.direction().y, -750.0);
        assert!(player.timers.wall_slide_block.active());

        // next frame actually ascends
        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);
        assert!(player.hitbox.bottom() < 499.0);
        assert_eq!(player.state, AnimationState::Jump);
    }

    /// World with one tall wall and the player airborne flush against its
    /// right face
    fn wall_hugging_setup() -> (CollisionWorld, Player) {
        let mut world = CollisionWorld::new();
        world.add_solid(RectF::new(0.0, 0.0, 64.0, 600.0));

        let mut player = Player::new(Vec2::ZERO, 2000.0);
        player.hitbox.set_left(64.0);
        player.hitbox.set_top(200.0);
        player.old_hitbox = player.hitbox;
        player.rect.set_center(player.hitbox.center());

        // one settle frame so the wall probe registers
        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);
        assert!(player.contact().left);
        assert!(!player.contact().floor);

        (world, player)
    }

    #[test]
    fn test_wall_slide_descends_slowly() {
        let (mut world, mut player) = wall_hugging_setup();
        let top_before = player.hitbox.top();

        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);

        // gravity/10: about 2px at 60fps, velocity pinned to zero
        let dropped = player.hitbox.top() - top_before;
        assert!(dropped > 0.0 && dropped < 3.0);
        assert_eq!(player.direction().y, 0.0);
        assert_eq!(player.state, AnimationState::Wall);
    }

    #[test]
    fn test_wall_jump_kicks_away_and_suppresses_input() {
        let (mut world, mut player) = wall_hugging_setup();

        let input = InputSnapshot {
            jump: true,
            ..InputSnapshot::none()
        };
        world.update(DT);
        let events = player.update(DT, &input, &world);

        assert!(events.jumped);
        assert_eq!(player.direction().y, -750.0);
        assert_eq!(player.direction().x, 1.0); // away from the left-side wall
        assert!(player.timers.wall_jump.active());

        // held input does nothing while the wall-jump timer runs
        let held = InputSnapshot {
            left: true,
            ..InputSnapshot::none()
        };
        world.update(DT);
        player.update(DT, &held, &world);
        assert_eq!(player.direction().x, 1.0);

        // once the timer is gone, input is honored again
        player.timers.wall_jump.deactivate();
        world.update(DT);
        player.update(DT, &held, &world);
        assert_eq!(player.direction().x, -1.0);
    }

    #[test]
    fn test_lands_on_semi_solid_from_above() {
        let mut world = CollisionWorld::new();
        world.add_semi_solid(RectF::new(-200.0, 400.0, 400.0, 16.0));

        let mut player = Player::new(Vec2::ZERO, 2000.0);
        player.hitbox.set_center(Vec2::new(0.0, 0.0));
        player.hitbox.set_bottom(380.0);
        player.old_hitbox = player.hitbox;

        for _ in 0..60 {
            world.update(DT);
            player.update(DT, &InputSnapshot::none(), &world);
        }

        assert_eq!(player.hitbox.bottom(), 400.0);
        assert!(player.contact().floor);
    }

    #[test]
    fn test_jumps_up_through_semi_solid() {
        let mut world = CollisionWorld::new();
        world.add_solid(RectF::new(-1000.0, 500.0, 2000.0, 64.0));
        world.add_semi_solid(RectF::new(-200.0, 400.0, 400.0, 16.0));

        let mut player = player_resting_at(0.0, 500.0);
        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);

        let input = InputSnapshot {
            jump: true,
            ..InputSnapshot::none()
        };
        world.update(DT);
        player.update(DT, &input, &world);

        // ride the jump through the platform
        let mut min_bottom = player.hitbox.bottom();
        for _ in 0..30 {
            world.update(DT);
            player.update(DT, &InputSnapshot::none(), &world);
            min_bottom = min_bottom.min(player.hitbox.bottom());
        }

        // apex is above the semi-solid: it never blocked the ascent
        assert!(min_bottom < 400.0);
    }

    #[test]
    fn test_drop_through_semi_solid() {
        let mut world = CollisionWorld::new();
        world.add_semi_solid(RectF::new(-200.0, 400.0, 400.0, 16.0));

        let mut player = player_resting_at(0.0, 400.0);
        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);
        assert!(player.contact().floor);

        let input = InputSnapshot {
            drop_through: true,
            ..InputSnapshot::none()
        };
        for _ in 0..30 {
            world.update(DT);
            player.update(DT, &input, &world);
        }

        assert!(player.hitbox.top() > 416.0); // fully below the platform
    }

    #[test]
    fn test_rides_moving_platform() {
        let mut world = CollisionWorld::new();
        let idx = world.add_moving_platform(
            ObstacleKind::SemiSolid,
            RectF::new(-100.0, 400.0, 200.0, 16.0),
            PatrolMotion::new(PatrolAxis::X, -2000.0, 2000.0, 60.0),
        );

        let mut player = player_resting_at(0.0, 400.0);
        world.update(DT);
        player.update(DT, &InputSnapshot::none(), &world);
        assert_eq!(player.carried_platform(), Some(idx));

        let start_x = player.hitbox.center().x;
        let platform_start_x = world.obstacle(idx).unwrap().rect.x;
        for _ in 0..30 {
            world.update(DT);
            player.update(DT, &InputSnapshot::none(), &world);
        }

        let platform_moved = world.obstacle(idx).unwrap().rect.x - platform_start_x;
        let player_moved = player.hitbox.center().x - start_x;
        assert!(platform_moved > 25.0);
        assert!((player_moved - platform_moved).abs() < 1.5);
        assert!(player.contact().floor);
    }

    #[test]
    fn test_damage_is_gated_by_invulnerability() {
        let mut player = Player::new(Vec2::ZERO, 2000.0);
        let mut data = PlayerData::new();

        let first = player.take_damage(&mut data);
        assert_eq!(first.hats_removed, 1);
        assert_eq!(data.health(), 1);

        // second hit lands inside the 400ms window: no-op
        let second = player.take_damage(&mut data);
        assert!(second.is_empty());
        assert_eq!(data.health(), 1);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut world = floor_world(500.0);
        let mut player = player_resting_at(0.0, 500.0);

        let input = InputSnapshot {
            attack: true,
            ..InputSnapshot::none()
        };
        world.update(DT);
        let events = player.update(DT, &input, &world);
        assert!(events.attacked);
        assert!(player.attacking);
        assert_eq!(player.state, AnimationState::Attack);

        // held attack during the cooldown doesn't restart the swing
        world.update(DT);
        let events = player.update(DT, &input, &world);
        assert!(!events.attacked);
    }

    #[test]
    fn test_fell_out_past_level_bottom() {
        let world = CollisionWorld::new();
        let mut player = Player::new(Vec2::new(0.0, 0.0), 300.0);
        assert!(!player.fell_out());

        for _ in 0..90 {
            player.update(DT, &InputSnapshot::none(), &world);
        }

        assert!(player.fell_out());
    }
}
