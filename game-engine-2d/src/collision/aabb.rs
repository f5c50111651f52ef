// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Axis-aligned bounding boxes, swept intersection, and side classification
//!
//! Boxes are derived values: every collision pass rebuilds them from the
//! entity's `prev_position` and collider extents, anchoring the sweep to
//! the start-of-step location. Nothing here mutates a box in place.

use crate::math::Vec2;
use std::fmt;

/// Overlaps at or below this on both axes classify as a numerical
/// near-miss rather than a contact
pub const SIDE_EPSILON: f32 = 1e-4;

/// Axis-aligned bounding box defined by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from its center and half extents
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half extents of the box
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// The box shifted by an offset
    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Static overlap test; edges that merely touch do not count
    ///
    /// The swept test still reports touching boxes as contacts through
    /// its per-axis windows; this predicate is for genuine area overlap,
    /// where corner-touching neighbors must not qualify.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Which side of an entity a contact presses against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSide {
    /// Contact to the entity's left
    Left,
    /// Contact to the entity's right
    Right,
    /// Contact above the entity
    Top,
    /// Contact below the entity
    Bottom,
}

impl CollisionSide {
    /// Unit normal pointing from the contact into the entity
    ///
    /// Impulses and positional corrections push the entity along this
    /// direction, away from whatever it hit.
    pub fn normal(&self) -> Vec2 {
        match self {
            CollisionSide::Left => Vec2::new(1.0, 0.0),
            CollisionSide::Right => Vec2::new(-1.0, 0.0),
            CollisionSide::Top => Vec2::new(0.0, -1.0),
            CollisionSide::Bottom => Vec2::new(0.0, 1.0),
        }
    }
}

impl fmt::Display for CollisionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionSide::Left => write!(f, "left"),
            CollisionSide::Right => write!(f, "right"),
            CollisionSide::Top => write!(f, "top"),
            CollisionSide::Bottom => write!(f, "bottom"),
        }
    }
}

/// Swept intersection test between two boxes over one frame
///
/// `relative_velocity` is the second box's velocity minus the first's;
/// the test runs in the first box's frame of reference. Returns the
/// first time of contact within `[0, delta_time]`, or `None` when the
/// boxes never meet in the interval.
///
/// The x axis is evaluated in full before the y axis, with per-axis
/// early exits when the boxes are separated and diverging (or separated
/// with no relative motion on that axis); the combined entry-after-exit
/// rejection happens once after both axes.
pub fn sweep_rect_rect(
    first: &Aabb,
    second: &Aabb,
    relative_velocity: Vec2,
    delta_time: f32,
) -> Option<f32> {
    if first.overlaps(second) && relative_velocity == Vec2::ZERO {
        return Some(0.0);
    }

    let mut t_first: f32 = 0.0;
    let mut t_last: f32 = delta_time;

    let vx = relative_velocity.x;
    if vx < 0.0 {
        if second.max.x < first.min.x {
            return None;
        }
        if first.max.x < second.min.x {
            t_first = t_first.max((first.max.x - second.min.x) / vx);
        }
        if second.max.x > first.min.x {
            t_last = t_last.min((first.min.x - second.max.x) / vx);
        }
    } else if vx > 0.0 {
        if second.min.x > first.max.x {
            return None;
        }
        if second.max.x < first.min.x {
            t_first = t_first.max((first.min.x - second.max.x) / vx);
        }
        if first.max.x > second.min.x {
            t_last = t_last.min((first.max.x - second.min.x) / vx);
        }
    } else if second.max.x < first.min.x || second.min.x > first.max.x {
        return None;
    }

    let vy = relative_velocity.y;
    if vy < 0.0 {
        if second.max.y < first.min.y {
            return None;
        }
        if first.max.y < second.min.y {
            t_first = t_first.max((first.max.y - second.min.y) / vy);
        }
        if second.max.y > first.min.y {
            t_last = t_last.min((first.min.y - second.max.y) / vy);
        }
    } else if vy > 0.0 {
        if second.min.y > first.max.y {
            return None;
        }
        if second.max.y < first.min.y {
            t_first = t_first.max((first.min.y - second.max.y) / vy);
        }
        if first.max.y > second.min.y {
            t_last = t_last.min((first.max.y - second.min.y) / vy);
        }
    } else if second.max.y < first.min.y || second.min.y > first.max.y {
        return None;
    }

    if t_first > t_last {
        return None;
    }
    Some(t_first)
}

/// Classify which side of the first box the second presses against
///
/// The axis with the smaller overlap separates the boxes: a contact
/// patch wider than it is tall reads as top or bottom, a patch taller
/// than it is wide reads as left or right. Ties go to the vertical
/// sides. Returns the side together with the per-axis overlap vector,
/// or `None` when both overlaps are within [`SIDE_EPSILON`].
pub fn classify_side(first: &Aabb, second: &Aabb) -> Option<(CollisionSide, Vec2)> {
    let delta = second.center() - first.center();
    let half_sum = first.half_extents() + second.half_extents();
    let overlap = Vec2::new(half_sum.x - delta.x.abs(), half_sum.y - delta.y.abs());

    if overlap.x <= SIDE_EPSILON && overlap.y <= SIDE_EPSILON {
        return None;
    }

    let side = if overlap.x < overlap.y {
        if delta.x < 0.0 {
            CollisionSide::Left
        } else {
            CollisionSide::Right
        }
    } else if delta.y < 0.0 {
        CollisionSide::Bottom
    } else {
        CollisionSide::Top
    };
    Some((side, overlap))
}
