use crate::geometry::Vec2;

/// Animation states shared by the player and the hat tokens stacked on it.
/// Hat sprite sheets are keyed `"<name>_hat"` in the asset packs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Idle,
    Run,
    Jump,
    Fall,
    Wall,
    Attack,
    AirAttack,
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState::Idle
    }
}

impl AnimationState {
    /// Asset key for this state's sprite sheet
    pub fn name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Run => "run",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
            AnimationState::Wall => "wall",
            AnimationState::Attack => "attack",
            AnimationState::AirAttack => "air_attack",
        }
    }

    /// Number of frames in this state's sprite sheet
    pub fn frame_count(&self) -> f32 {
        match self {
            AnimationState::Idle => 4.0,
            AnimationState::Run => 6.0,
            AnimationState::Jump => 1.0,
            AnimationState::Fall => 1.0,
            AnimationState::Wall => 2.0,
            AnimationState::Attack => 3.0,
            AnimationState::AirAttack => 3.0,
        }
    }

    /// Attack animations play once; everything else cycles
    pub fn loops(&self) -> bool {
        !matches!(self, AnimationState::Attack | AnimationState::AirAttack)
    }
}

/// Horizontal facing, mirrored into the rendered sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Default for Facing {
    fn default() -> Self {
        Facing::Right
    }
}

/// Derives the animation state from the player's current physical situation.
///
/// This is recomputed from scratch every frame rather than kept as a latched
/// state machine, so a frame-long flicker at a transition (e.g. the single
/// airborne frame when walking off a ledge) is expected.
///
/// Priority on the ground: attack > run/idle. In the air: attack > wall
/// contact > jump (ascending) / fall (descending).
pub fn determine_animation_state(
    on_floor: bool,
    on_wall: bool,
    direction: Vec2,
    attacking: bool,
) -> AnimationState {
    if on_floor {
        if attacking {
            AnimationState::Attack
        } else if direction.x == 0.0 {
            AnimationState::Idle
        } else {
            AnimationState::Run
        }
    } else if attacking {
        AnimationState::AirAttack
    } else if on_wall {
        AnimationState::Wall
    } else if direction.y < 0.0 {
        AnimationState::Jump
    } else {
        AnimationState::Fall
    }
}
