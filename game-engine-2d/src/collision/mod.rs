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
//! Collision detection and contact resolution
//!
//! The geometric primitives (box construction, the swept intersection
//! test, side classification) live alongside the uniform spatial grid
//! behind proximity queries; [`CollisionSystem`] ties both into the
//! per-frame detect-then-resolve pass.

mod aabb;
mod grid;
mod system;

pub use aabb::{classify_side, sweep_rect_rect, Aabb, CollisionSide, SIDE_EPSILON};
pub use grid::SpatialGrid;
pub use system::{CollisionEvent, CollisionSystem};
