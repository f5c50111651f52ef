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
//! Physics integration and tuning
//!
//! The movement system advances velocity and position from accumulated
//! forces; the collision system (in [`crate::collision`]) owns grounding
//! and contact response. Both read their shared tuning constants from
//! [`PhysicsConfig`].

use crate::ecs::Physics;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};

mod movement;

pub use movement::MovementSystem;

/// Tuning constants shared by the movement and collision systems
///
/// The defaults are calibrated for a platformer at 60 Hz with world
/// units roughly one tile across. Scenes may override individual fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity restored to airborne bodies by the collision pass
    pub gravity: Vec2,
    /// Edge length of one spatial grid cell, in world units
    pub cell_size: f32,
    /// Seconds within which opposing side contacts count as a squeeze
    pub squeeze_window: f32,
    /// Restitution for bottom contacts; near zero so landings do not bounce
    pub restitution_ground: f32,
    /// Restitution for left, right, and top contacts
    pub restitution_side: f32,
    /// Factor applied to relative velocity before the impulse projection
    pub contact_damping: f32,
    /// Vertical overlap below which no positional correction is applied
    pub penetration_tolerance: f32,
    /// Fraction of the overlap corrected per frame
    pub correction_factor: f32,
    /// Extra shrink applied to corrections from side contacts
    pub side_correction_scale: f32,
    /// Horizontal velocity multiplier applied on side contacts
    pub side_velocity_damping: f32,
    /// Vertical speeds below this snap to zero on bottom contacts
    pub velocity_snap: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: Physics::DEFAULT_GRAVITY,
            cell_size: 1.0,
            squeeze_window: 0.1,
            restitution_ground: 0.01,
            restitution_side: 0.2,
            contact_damping: 0.9,
            penetration_tolerance: 0.01,
            correction_factor: 0.3,
            side_correction_scale: 0.1,
            side_velocity_damping: 0.5,
            velocity_snap: 0.1,
        }
    }
}
