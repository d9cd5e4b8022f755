// Shared tuning constants used across the simulation core

/// Side length of one map tile in pixels; overworld grid coordinates are in
/// tile units
pub const TILE_SIZE: f32 = 64.0;

/// Animation playback rate in frames per second
pub const ANIMATION_SPEED: f32 = 6.0;
