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
//! System scheduler
//!
//! The scheduler runs registered systems strictly in registration order,
//! once per frame, passing every system the same delta time. Frame order
//! is the dependency mechanism: register movement before collision and
//! collision always sees this frame's integrated positions.

use crate::ecs::System;
use crate::ecs::World;

/// Ordered collection of systems driven once per frame
///
/// # Examples
///
/// ```
/// use game_engine_2d::ecs::{Scheduler, Signature, System, World};
///
/// struct Tick;
///
/// impl System for Tick {
///     fn signature(&self) -> Signature {
///         Signature::EMPTY
///     }
///
///     fn update(&mut self, _world: &mut World, _delta_time: f32) {}
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(Tick);
/// assert_eq!(scheduler.system_count(), 1);
/// ```
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    /// Create a new scheduler with no systems
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
        }
    }

    /// Register a system; registration order is execution order
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every system once, in registration order
    ///
    /// All systems observe the same `delta_time` for the frame.
    pub fn update(&mut self, world: &mut World, delta_time: f32) {
        for system in &mut self.systems {
            log::trace!("running system {}", system.name());
            system.update(world, delta_time);
        }
    }

    /// Remove all registered systems
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
