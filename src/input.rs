//! Per-frame input snapshot
//!
//! The movement code never reads the keyboard directly; the front end samples
//! its event source once per frame and hands the result to
//! `Player::update()`. This keeps a motion tick a pure function of
//! (state, input, world, dt) and lets tests drive the player without an input
//! backend.

/// Input state for one simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Move left is held
    pub left: bool,
    /// Move right is held
    pub right: bool,
    /// Jump was pressed this frame
    pub jump: bool,
    /// Drop through semi-solid platforms is held
    pub drop_through: bool,
    /// Attack was pressed this frame
    pub attack: bool,
}

impl InputSnapshot {
    /// No buttons held; the idle frame
    pub fn none() -> Self {
        Self::default()
    }
}
