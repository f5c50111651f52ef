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
//! # Game Engine 2D
//!
//! An ECS (Entity Component System) based 2D game engine with swept-AABB
//! collision detection and impulse-style contact resolution, built for
//! platformer-style games.
//!
//! ## Features
//!
//! - **ECS Architecture**: Entities as ids, components in typed storages,
//!   systems matched by signature and run in registration order
//! - **Swept Collision**: Time-of-impact AABB tests anchored at each
//!   entity's previous position, so fast movers cannot tunnel
//! - **Platformer Physics**: Force integration with grounding, jumping,
//!   restitution, and positional correction tuned for side-scrollers
//! - **Spatial Hashing**: A uniform grid answers what-is-next-to-me
//!   queries for gameplay without rescanning every entity
//! - **Parallelization**: Optional Rayon integration for contact detection
//! - **Scenes**: JSON documents spawn entities, gated by a semver
//!   format version
//!
//! ## Example
//!
//! ```rust
//! use game_engine_2d::collision::CollisionSystem;
//! use game_engine_2d::ecs::{BoxCollider, Physics, Scheduler, Transform, Velocity, World};
//! use game_engine_2d::math::Vec2;
//! use game_engine_2d::physics::{MovementSystem, PhysicsConfig};
//!
//! let mut world = World::new();
//! let mut scheduler = Scheduler::new();
//! let movement = MovementSystem::new(&mut world);
//! let collision = CollisionSystem::new(&mut world, PhysicsConfig::default());
//! scheduler.add_system(movement);
//! scheduler.add_system(collision);
//!
//! let player = world.create_entity();
//! world.add_component(player, Transform::new(Vec2::new(0.0, 2.0)));
//! world.add_component(player, Velocity::ZERO);
//! world.add_component(player, Physics::new(1.0));
//! world.add_component(player, BoxCollider::new(1.0, 1.0));
//!
//! let floor = world.create_entity();
//! world.add_component(floor, Transform::new(Vec2::ZERO));
//! world.add_component(floor, Physics::immovable());
//! world.add_component(floor, BoxCollider::new(10.0, 1.0));
//!
//! for _ in 0..60 {
//!     scheduler.update(&mut world, 1.0 / 60.0);
//! }
//! assert!(world.component::<Physics>(player).is_grounded);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// 2D vector math
pub mod math;

/// Keyboard input state tracking
pub mod input;

/// Force integration and physics configuration
pub mod physics;

/// Swept AABB collision detection and resolution
pub mod collision;

/// Sprite sheet animation stepping
pub mod animation;

/// Sprite collection and layer-ordered submission
pub mod render;

/// Audio request forwarding
pub mod audio;

/// Scene loading from JSON documents
pub mod scene;

pub use ecs::{EntityId, World};
