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
//! Uniform spatial grid for neighborhood queries
//!
//! The grid backs the proximity layer only; the primary collision pass
//! tests every pair directly. It is rebuilt from scratch each frame, so
//! nothing is ever removed from it.

use crate::collision::aabb::Aabb;
use crate::ecs::EntityId;
use crate::math::Vec2;
use std::collections::HashMap;

/// Uniform grid mapping cells to the entities whose boxes touch them
///
/// An entity wider or taller than one cell occupies every cell its box
/// touches, so a neighborhood query can return it from any of them.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<EntityId>>,
}

impl SpatialGrid {
    /// Create a grid with the given cell edge length
    ///
    /// # Panics
    /// Panics if the cell size is not positive and finite.
    pub fn new(cell_size: f32) -> Self {
        assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "Grid cell size must be positive and finite, got: {}",
            cell_size
        );
        SpatialGrid {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// The configured cell edge length
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Drop all entries, keeping allocated cell buckets for reuse
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    /// The cell containing a point; negative coordinates round down
    pub fn cell_of(&self, point: Vec2) -> (i32, i32) {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Record an entity in every cell its box touches
    pub fn insert(&mut self, entity: EntityId, aabb: &Aabb) {
        let (min_x, min_y) = self.cell_of(aabb.min);
        let (max_x, max_y) = self.cell_of(aabb.max);
        for cell_x in min_x..=max_x {
            for cell_y in min_y..=max_y {
                self.cells.entry((cell_x, cell_y)).or_default().push(entity);
            }
        }
    }

    /// Collect the entities in a cell and its eight neighbors
    ///
    /// The result replaces `out`'s contents, deduplicated and sorted
    /// ascending so callers see a deterministic order with the oldest
    /// entity first.
    pub fn neighborhood_into(&self, cell: (i32, i32), out: &mut Vec<EntityId>) {
        out.clear();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cell.0 + dx, cell.1 + dy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
    }
}
