//! Entity Component System (ECS) core implementation
//!
//! This module provides the foundational ECS architecture including:
//! - Entity management with signature bitmasks
//! - Slot-indexed component storage
//! - Gameplay component types
//! - System trait and registration-order scheduler

mod component;
mod components;
mod entity;
mod scheduler;
mod system;
mod world;

pub use component::{Component, ComponentSlot, ComponentStore, HashMapStorage};
pub use components::{
    Animation, AudioSource, BoxCollider, InputControlled, Physics, Proximity, Sprite, Transform,
    Velocity,
};
pub use entity::{EntityId, EntityRegistry, Signature, MAX_COMPONENT_TYPES};
pub use scheduler::Scheduler;
pub use system::System;
pub use world::World;
