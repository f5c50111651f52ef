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
//! Entity identity and signatures
//!
//! Entities are unique identifiers in the ECS that represent game objects.
//! They are lightweight handles that tie together components. Every live
//! entity carries a [`Signature`] recording which component slots it has;
//! systems match entities by signature superset.

use std::collections::HashMap;
use std::fmt;

/// Maximum number of component types the engine can register
///
/// Signatures are a single 64-bit word, so slot indices are bounded by
/// this. Registration past the limit is a startup error.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Unique identifier for an entity
///
/// IDs are handed out in monotonically increasing order and never reused
/// within a session, so systems may safely cache them across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new EntityId from a raw u64 value
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Bitmask of component slots
///
/// One bit per registered component type. An entity's signature records
/// what it currently carries; a system's signature records what it
/// requires. Matching is a superset check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(u64);

impl Signature {
    /// The signature with no bits set
    pub const EMPTY: Signature = Signature(0);

    /// Set the bit for a component slot
    pub fn set(&mut self, slot: usize) {
        assert!(
            slot < MAX_COMPONENT_TYPES,
            "Component slot {} out of range (max {})",
            slot,
            MAX_COMPONENT_TYPES
        );
        self.0 |= 1 << slot;
    }

    /// Clear the bit for a component slot
    pub fn clear(&mut self, slot: usize) {
        assert!(
            slot < MAX_COMPONENT_TYPES,
            "Component slot {} out of range (max {})",
            slot,
            MAX_COMPONENT_TYPES
        );
        self.0 &= !(1 << slot);
    }

    /// Whether the bit for a component slot is set
    pub fn has(&self, slot: usize) -> bool {
        slot < MAX_COMPONENT_TYPES && (self.0 & (1 << slot)) != 0
    }

    /// Whether every bit of `required` is also set here
    pub fn contains_all(&self, required: Signature) -> bool {
        (self.0 & required.0) == required.0
    }

    /// Builder-style variant of [`Signature::set`] for composing system
    /// signatures
    pub fn with(mut self, slot: usize) -> Self {
        self.set(slot);
        self
    }

    /// Whether no bits are set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Tracks live entities and their component signatures
///
/// The registry is the source of truth for "all known entities". Creation
/// only appends; destroying an entity removes it without renumbering the
/// rest. Live IDs iterate in creation order, which keeps per-frame scans
/// deterministic.
pub struct EntityRegistry {
    next_entity_id: u64,
    entities: Vec<EntityId>,
    signatures: HashMap<EntityId, Signature>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        EntityRegistry {
            next_entity_id: 0,
            entities: Vec::new(),
            signatures: HashMap::new(),
        }
    }

    /// Create a new entity with an empty component mask
    pub fn create_entity(&mut self) -> EntityId {
        let entity = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        self.signatures.insert(entity, Signature::EMPTY);
        entity
    }

    /// Destroy an entity, returning whether it was alive
    ///
    /// The freed ID is never handed out again; remaining entities keep
    /// their IDs and ordering.
    pub fn destroy_entity(&mut self, entity: EntityId) -> bool {
        if self.signatures.remove(&entity).is_some() {
            self.entities.retain(|e| *e != entity);
            true
        } else {
            false
        }
    }

    /// Check if an entity is alive
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.signatures.contains_key(&entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Remove all entities and restart the ID sequence
    pub fn clear(&mut self) {
        self.entities.clear();
        self.signatures.clear();
        self.next_entity_id = 0;
    }

    /// Iterate over live entity IDs in creation order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    /// The component signature of an entity
    ///
    /// # Panics
    /// Panics if the entity is unknown or destroyed.
    pub fn signature(&self, entity: EntityId) -> Signature {
        match self.signatures.get(&entity) {
            Some(signature) => *signature,
            None => panic!("Cannot read signature of unknown entity {}", entity),
        }
    }

    /// Set the presence bit for a component slot on an entity
    ///
    /// # Panics
    /// Panics if the entity is unknown or destroyed.
    pub fn add_component_flag(&mut self, entity: EntityId, slot: usize) {
        match self.signatures.get_mut(&entity) {
            Some(signature) => signature.set(slot),
            None => panic!("Cannot set component flag on unknown entity {}", entity),
        }
    }

    /// Clear the presence bit for a component slot on an entity
    ///
    /// # Panics
    /// Panics if the entity is unknown or destroyed.
    pub fn remove_component_flag(&mut self, entity: EntityId, slot: usize) {
        match self.signatures.get_mut(&entity) {
            Some(signature) => signature.clear(slot),
            None => panic!("Cannot clear component flag on unknown entity {}", entity),
        }
    }

    /// Whether an entity has the presence bit for a component slot
    ///
    /// Returns false for unknown entities.
    pub fn has_component(&self, entity: EntityId, slot: usize) -> bool {
        self.signatures
            .get(&entity)
            .map(|signature| signature.has(slot))
            .unwrap_or(false)
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
