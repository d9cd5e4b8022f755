//! Gameplay simulation core for One Life Climber
//!
//! This crate owns the game's simulation: player movement and collision
//! against solid / semi-solid / moving geometry, the hat-stack life
//! mechanic, and the overworld node-graph navigation. Rendering, audio,
//! asset loading and the window loop live outside and consume the types
//! re-exported here.
//!
//! Everything is single-threaded and frame-stepped. A frame runs its phases
//! in a fixed order, one writer per phase:
//!
//! 1. `CollisionWorld::update`: moving platforms advance, `old_rect`s refresh
//! 2. `Player::update`: timers, the sampled `InputSnapshot`, integration and
//!    collision resolution
//! 3. `HatStack::update` / `FallingHats::update` mirror the just-computed
//!    player position
//! 4. read side: `Player::snapshot` for the presentation layer
//!
//! Health mutations go through `PlayerData` and return `HealthChange` events
//! that the caller replays into the hat stack the same frame.

pub mod animation;
pub mod geometry;
pub mod hat;
pub mod input;
pub mod overworld;
pub mod player;
pub mod settings;
pub mod stats;
pub mod timer;
pub mod world;

// Re-export the types a frame loop touches every tick
pub use animation::{determine_animation_state, AnimationState, Facing};
pub use geometry::{RectF, Vec2};
pub use hat::{FallingHat, FallingHats, HatStack};
pub use input::InputSnapshot;
pub use overworld::{GraphError, Icon, IconState, Node, NodeGraph, PathDirection, RouteError};
pub use player::{Player, PlayerEvents, PlayerSnapshot, SurfaceContact};
pub use stats::{CoinChange, HealthChange, PlayerData};
pub use timer::Timer;
pub use world::{CollisionWorld, Obstacle, ObstacleKind, PatrolAxis, PatrolMotion};
