//! 2D vector and float rectangle types used by the physics core
//!
//! Collision positions are continuous (pixels per second integrated over
//! variable `dt`), so rectangles are f32 rather than integer. `RectF` moves
//! through edge setters: assigning to an edge repositions the rectangle
//! without resizing it, which is what axis-separated collision resolution
//! wants ("put my bottom on top of that platform").

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// 2D vector in pixel units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

/// Axis-aligned rectangle with float position and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn topleft(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move the rectangle so its left edge sits at `value` (size unchanged)
    pub fn set_left(&mut self, value: f32) {
        self.x = value;
    }

    /// Move the rectangle so its right edge sits at `value` (size unchanged)
    pub fn set_right(&mut self, value: f32) {
        self.x = value - self.w;
    }

    /// Move the rectangle so its top edge sits at `value` (size unchanged)
    pub fn set_top(&mut self, value: f32) {
        self.y = value;
    }

    /// Move the rectangle so its bottom edge sits at `value` (size unchanged)
    pub fn set_bottom(&mut self, value: f32) {
        self.y = value - self.h;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Grow (positive) or shrink (negative) by the given amounts about the
    /// center, the way sprite rects are inset down to hitboxes
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self::new(
            self.x - dw / 2.0,
            self.y - dh / 2.0,
            self.w + dw,
            self.h + dh,
        )
    }

    /// Strict overlap test: rectangles sharing only an edge do not intersect
    pub fn intersects(&self, other: &RectF) -> bool {
        let x_overlap = self.x < other.right() && self.right() > other.x;
        let y_overlap = self.y < other.bottom() && self.bottom() > other.y;

        x_overlap && y_overlap
    }
}
