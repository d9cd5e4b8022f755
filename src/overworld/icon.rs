//! The overworld cursor that travels waypoint routes between nodes
//!
//! Routes come from `PathEdge::waypoints` and are axis-aligned between
//! consecutive points; the icon moves at a fixed speed toward the next
//! pending waypoint and snaps exactly onto it once the travel direction's
//! sign says it has been reached or passed (frame-time overshoot is expected
//! and corrected by the snap). An exhausted route leaves the icon idle.

use crate::geometry::{RectF, Vec2};
use crate::settings::ANIMATION_SPEED;
use std::collections::VecDeque;
use std::fmt;

const ICON_SPEED: f32 = 400.0;
const ICON_SIZE: (f32, f32) = (64.0, 64.0);

/// Travel state, used to pick the icon's animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    Idle,
    Up,
    Down,
    Left,
    Right,
}

/// A route the icon cannot follow: its geometry assumes axis-aligned
/// segments, so a diagonal segment is rejected up front
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    NotAxisAligned { from: Vec2, to: Vec2 },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteError::NotAxisAligned { from, to } => write!(
                f,
                "Route segment ({}, {}) -> ({}, {}) is not axis-aligned",
                from.x, from.y, to.x, to.y
            ),
        }
    }
}

impl std::error::Error for RouteError {}

pub struct Icon {
    pub rect: RectF,
    /// Unit axis-aligned travel direction, or zero when idle
    direction: Vec2,
    speed: f32,
    path: VecDeque<Vec2>,
    pub state: IconState,
    pub frame_index: f32,
}

impl Icon {
    pub fn new(pos: Vec2) -> Self {
        Self::with_speed(pos, ICON_SPEED)
    }

    pub fn with_speed(pos: Vec2, speed: f32) -> Self {
        Icon {
            rect: RectF::from_center(pos, ICON_SIZE.0, ICON_SIZE.1),
            direction: Vec2::ZERO,
            speed,
            path: VecDeque::new(),
            state: IconState::Idle,
            frame_index: 0.0,
        }
    }

    /// Replaces any route in progress: snaps the icon onto the first
    /// waypoint and queues the rest. The whole route is validated before
    /// anything moves, so a rejected route leaves the icon untouched.
    pub fn start_move(&mut self, route: &[Vec2]) -> Result<(), RouteError> {
        for pair in route.windows(2) {
            if pair[0].x != pair[1].x && pair[0].y != pair[1].y {
                return Err(RouteError::NotAxisAligned {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        self.path.clear();
        if let Some(&first) = route.first() {
            self.rect.set_center(first);
            self.path.extend(route[1..].iter().copied());
        }
        self.find_path();
        Ok(())
    }

    /// Points travel at the next pending waypoint; zero when none remain
    fn find_path(&mut self) {
        match self.path.front() {
            Some(&next) => {
                let center = self.rect.center();
                // waypoints are snapped onto exactly, so whichever axis still
                // matches is the one we are not traveling on
                self.direction = if center.x == next.x {
                    Vec2::new(0.0, if next.y > center.y { 1.0 } else { -1.0 })
                } else {
                    Vec2::new(if next.x > center.x { 1.0 } else { -1.0 }, 0.0)
                };
            }
            None => self.direction = Vec2::ZERO,
        }
    }

    /// Reached-or-passed test against the pending waypoint: snap onto it,
    /// consume it and turn toward the one after
    fn point_collision(&mut self) {
        if let Some(&next) = self.path.front() {
            let center = self.rect.center();
            if (self.direction.y > 0.0 && center.y >= next.y)
                || (self.direction.y < 0.0 && center.y <= next.y)
            {
                self.rect.set_center(Vec2::new(center.x, next.y));
                self.path.pop_front();
                self.find_path();
            }
        }

        if let Some(&next) = self.path.front() {
            let center = self.rect.center();
            if (self.direction.x > 0.0 && center.x >= next.x)
                || (self.direction.x < 0.0 && center.x <= next.x)
            {
                self.rect.set_center(Vec2::new(next.x, center.y));
                self.path.pop_front();
                self.find_path();
            }
        }
    }

    /// Advances along the route; a tick with no route pending is a no-op
    /// that leaves the icon idle
    pub fn update(&mut self, dt: f32) {
        if !self.path.is_empty() {
            self.point_collision();
            self.rect.translate(self.direction * self.speed * dt);
        }
        self.derive_state();
        self.frame_index += ANIMATION_SPEED * dt;
    }

    fn derive_state(&mut self) {
        self.state = if self.direction == Vec2::new(1.0, 0.0) {
            IconState::Right
        } else if self.direction == Vec2::new(-1.0, 0.0) {
            IconState::Left
        } else if self.direction == Vec2::new(0.0, 1.0) {
            IconState::Down
        } else if self.direction == Vec2::new(0.0, -1.0) {
            IconState::Up
        } else {
            IconState::Idle
        };
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// True while waypoints remain to be consumed
    pub fn moving(&self) -> bool {
        !self.path.is_empty()
    }
}
