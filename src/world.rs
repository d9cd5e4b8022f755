//! Collision world: the level geometry the player resolves against
//!
//! Obstacles come in two kinds (`Solid` blocks from every side, `SemiSolid`
//! only stops a downward landing) and either kind may carry a patrol motion
//! (helicopter platforms, boats). Whether an obstacle moves is decided once
//! when the level is built and stored as data on the descriptor, not probed
//! per collision check.
//!
//! The world never learns about the player; movement code reads the obstacle
//! rectangles (current and previous frame) and resolves itself against them.

use crate::geometry::{RectF, Vec2};

/// How an obstacle interacts with bodies moving into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Blocks movement from every direction
    Solid,
    /// One-way platform: blocks only a downward landing
    SemiSolid,
}

/// Axis a patrolling platform travels on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolAxis {
    X,
    Y,
}

/// Back-and-forth motion between two bounds on one axis.
///
/// For `PatrolAxis::X` the bounds are the leftmost left edge and the
/// rightmost right edge the platform may reach; for `PatrolAxis::Y` the
/// topmost top edge and the bottommost bottom edge.
#[derive(Debug, Clone)]
pub struct PatrolMotion {
    axis: PatrolAxis,
    from: f32,
    to: f32,
    speed: f32,
    direction: Vec2,
    reverse: (bool, bool),
}

impl PatrolMotion {
    pub fn new(axis: PatrolAxis, from: f32, to: f32, speed: f32) -> Self {
        let direction = match axis {
            PatrolAxis::X => Vec2::new(1.0, 0.0),
            PatrolAxis::Y => Vec2::new(0.0, 1.0),
        };
        PatrolMotion {
            axis,
            from,
            to,
            speed,
            direction,
            reverse: (false, false),
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Per-axis flip flags for mirrored sprite rendering
    pub fn reversed(&self) -> (bool, bool) {
        self.reverse
    }

    /// Turn around when a bound is reached, clamping flush against it
    fn check_border(&mut self, rect: &mut RectF) {
        match self.axis {
            PatrolAxis::X => {
                if rect.right() >= self.to && self.direction.x > 0.0 {
                    self.direction.x = -1.0;
                    rect.set_right(self.to);
                }
                if rect.left() <= self.from && self.direction.x < 0.0 {
                    self.direction.x = 1.0;
                    rect.set_left(self.from);
                }
                self.reverse.0 = self.direction.x < 0.0;
            }
            PatrolAxis::Y => {
                if rect.bottom() >= self.to && self.direction.y > 0.0 {
                    self.direction.y = -1.0;
                    rect.set_bottom(self.to);
                }
                if rect.top() <= self.from && self.direction.y < 0.0 {
                    self.direction.y = 1.0;
                    rect.set_top(self.from);
                }
                self.reverse.1 = self.direction.y > 0.0;
            }
        }
    }
}

/// One piece of level geometry
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: RectF,
    /// Previous-frame rectangle; movement code compares against this to tell
    /// which side a body approached from
    pub old_rect: RectF,
    kind: ObstacleKind,
    patrol: Option<PatrolMotion>,
}

impl Obstacle {
    fn fixed(kind: ObstacleKind, rect: RectF) -> Self {
        Obstacle {
            rect,
            old_rect: rect,
            kind,
            patrol: None,
        }
    }

    fn patrolling(kind: ObstacleKind, rect: RectF, patrol: PatrolMotion) -> Self {
        Obstacle {
            rect,
            old_rect: rect,
            kind,
            patrol: Some(patrol),
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn is_moving(&self) -> bool {
        self.patrol.is_some()
    }

    pub fn patrol(&self) -> Option<&PatrolMotion> {
        self.patrol.as_ref()
    }

    /// How far this obstacle travels over `dt`; zero for fixed geometry
    pub fn displacement(&self, dt: f32) -> Vec2 {
        match &self.patrol {
            Some(p) => p.direction * p.speed * dt,
            None => Vec2::ZERO,
        }
    }
}

/// All obstacles of one loaded level. Append-only: indices handed out by the
/// `add_*` methods stay valid for the life of the level.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    obstacles: Vec<Obstacle>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        CollisionWorld {
            obstacles: Vec::new(),
        }
    }

    pub fn add_solid(&mut self, rect: RectF) -> usize {
        self.push(Obstacle::fixed(ObstacleKind::Solid, rect))
    }

    pub fn add_semi_solid(&mut self, rect: RectF) -> usize {
        self.push(Obstacle::fixed(ObstacleKind::SemiSolid, rect))
    }

    pub fn add_moving_platform(
        &mut self,
        kind: ObstacleKind,
        rect: RectF,
        patrol: PatrolMotion,
    ) -> usize {
        self.push(Obstacle::patrolling(kind, rect, patrol))
    }

    fn push(&mut self, obstacle: Obstacle) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    pub fn obstacle(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn solids(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Solid)
    }

    pub fn semi_solids(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::SemiSolid)
    }

    /// Moving platforms of either kind, with their stable indices
    pub fn moving(&self) -> impl Iterator<Item = (usize, &Obstacle)> {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_moving())
    }

    /// Advance patrolling platforms by one tick. Every obstacle's `old_rect`
    /// is refreshed here, so this must run before the player's tick.
    pub fn update(&mut self, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.old_rect = obstacle.rect;
            if let Some(patrol) = &mut obstacle.patrol {
                let delta = patrol.direction * patrol.speed * dt;
                obstacle.rect.translate(delta);
                patrol.check_border(&mut obstacle.rect);
            }
        }
    }
}
