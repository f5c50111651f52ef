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
//! System execution framework
//!
//! Systems contain the logic that operates on entities and components.
//! Each system declares a component signature; the entities it acts on
//! each frame are those whose signatures contain every required slot.

use crate::ecs::entity::Signature;
use crate::ecs::World;

/// Trait for systems that operate on the ECS world
///
/// A system's signature names the component slots an entity must carry
/// for the system to touch it. Matching is superset-based: entities with
/// additional components still qualify.
pub trait System: Send + Sync {
    /// The component mask entities must contain to be processed
    fn signature(&self) -> Signature;

    /// Advance the system by one frame
    fn update(&mut self, world: &mut World, delta_time: f32);

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
