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
//! Component storage and management
//!
//! Components are data containers that can be attached to entities. Each
//! component type registers once and receives a small slot index bounded
//! by the signature width; the [`ComponentStore`] keeps one type-erased
//! map per slot and recovers the concrete type by downcast at the typed
//! call sites.

use crate::ecs::entity::{EntityId, MAX_COMPONENT_TYPES};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior.
/// Keep components small and focused for better cache performance.
pub trait Component: 'static + Send + Sync {}

/// Slot index assigned to a registered component type
///
/// Slots are allocated in registration order and double as bit positions
/// in entity and system signatures.
pub type ComponentSlot = usize;

/// Simple HashMap-based component storage for a single component type
///
/// Maps entity IDs to owned component instances. Insertion overwrites any
/// previous instance for the same entity.
pub struct HashMapStorage<T: Component> {
    components: HashMap<EntityId, T>,
}

impl<T: Component> HashMapStorage<T> {
    /// Create a new empty storage
    pub fn new() -> Self {
        HashMapStorage {
            components: HashMap::new(),
        }
    }

    /// Insert a component for the given entity, returning any previous one
    pub fn insert(&mut self, entity: EntityId, component: T) -> Option<T> {
        self.components.insert(entity, component)
    }

    /// Remove a component for the given entity
    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        self.components.remove(&entity)
    }

    /// Get a reference to a component for the given entity
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.components.get(&entity)
    }

    /// Get a mutable reference to a component for the given entity
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.components.get_mut(&entity)
    }

    /// Check if an entity has this component
    pub fn contains(&self, entity: EntityId) -> bool {
        self.components.contains_key(&entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Clear all components
    pub fn clear(&mut self) {
        self.components.clear();
    }
}

impl<T: Component> Default for HashMapStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Erased view over a HashMapStorage<T>. The store addresses storages by
// slot; typed access goes back through as_any + downcast.
trait ErasedStorage: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove_entity(&mut self, entity: EntityId) -> bool;
    fn contains(&self, entity: EntityId) -> bool;
    fn len(&self) -> usize;
    fn clear(&mut self);
}

impl<T: Component> ErasedStorage for HashMapStorage<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.components.remove(&entity).is_some()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.components.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn clear(&mut self) {
        self.components.clear();
    }
}

/// Slot-indexed table of type-erased component storages
///
/// The store owns every component instance in the engine. Registration is
/// idempotent: the first call for a type allocates the next slot, later
/// calls return the cached one. Typed lookups on unregistered types and
/// missing-component accesses are contract violations and panic.
pub struct ComponentStore {
    slots: HashMap<TypeId, ComponentSlot>,
    storages: Vec<Box<dyn ErasedStorage>>,
    names: Vec<&'static str>,
}

impl ComponentStore {
    /// Create an empty store with no registered types
    pub fn new() -> Self {
        ComponentStore {
            slots: HashMap::new(),
            storages: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Register a component type, allocating a slot on first call
    ///
    /// # Panics
    /// Panics if a new registration would exceed [`MAX_COMPONENT_TYPES`].
    pub fn register<T: Component>(&mut self) -> ComponentSlot {
        let type_id = TypeId::of::<T>();
        if let Some(&slot) = self.slots.get(&type_id) {
            return slot;
        }
        let slot = self.storages.len();
        assert!(
            slot < MAX_COMPONENT_TYPES,
            "Component type limit ({}) exceeded registering {}",
            MAX_COMPONENT_TYPES,
            type_name::<T>()
        );
        self.slots.insert(type_id, slot);
        self.storages.push(Box::new(HashMapStorage::<T>::new()));
        self.names.push(type_name::<T>());
        slot
    }

    /// Slot of an already-registered component type
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn slot_of<T: Component>(&self) -> ComponentSlot {
        match self.slots.get(&TypeId::of::<T>()) {
            Some(&slot) => slot,
            None => panic!("Component type {} is not registered", type_name::<T>()),
        }
    }

    /// Whether a component type has been registered
    pub fn is_registered<T: Component>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered component types
    pub fn registered_count(&self) -> usize {
        self.storages.len()
    }

    /// Name of the component type at a slot, for diagnostics
    ///
    /// # Panics
    /// Panics if the slot was never allocated.
    pub fn slot_name(&self, slot: ComponentSlot) -> &'static str {
        assert!(slot < self.names.len(), "Unallocated component slot {}", slot);
        self.names[slot]
    }

    fn storage<T: Component>(&self) -> &HashMapStorage<T> {
        let slot = self.slot_of::<T>();
        self.storages[slot]
            .as_any()
            .downcast_ref::<HashMapStorage<T>>()
            .expect("component slot mapped to a mismatched storage type")
    }

    fn storage_mut<T: Component>(&mut self) -> &mut HashMapStorage<T> {
        let slot = self.slot_of::<T>();
        self.storages[slot]
            .as_any_mut()
            .downcast_mut::<HashMapStorage<T>>()
            .expect("component slot mapped to a mismatched storage type")
    }

    /// Store a component for an entity, overwriting any previous instance
    ///
    /// Returns the slot so the caller can update the entity's signature.
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn add<T: Component>(&mut self, entity: EntityId, component: T) -> ComponentSlot {
        let slot = self.slot_of::<T>();
        self.storage_mut::<T>().insert(entity, component);
        slot
    }

    /// Reference to an entity's component
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity lacks it.
    pub fn get<T: Component>(&self, entity: EntityId) -> &T {
        match self.storage::<T>().get(entity) {
            Some(component) => component,
            None => panic!("Missing component {} on {}", type_name::<T>(), entity),
        }
    }

    /// Mutable reference to an entity's component
    ///
    /// Mutations are visible engine-wide immediately; the store never
    /// copies on read.
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity lacks it.
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> &mut T {
        match self.storage_mut::<T>().get_mut(entity) {
            Some(component) => component,
            None => panic!("Missing component {} on {}", type_name::<T>(), entity),
        }
    }

    /// Whether an entity has a component of this type
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn contains<T: Component>(&self, entity: EntityId) -> bool {
        self.storage::<T>().contains(entity)
    }

    /// Remove and return an entity's component
    ///
    /// Returns the slot alongside the value so the caller can clear the
    /// entity's signature bit.
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity lacks it.
    pub fn remove<T: Component>(&mut self, entity: EntityId) -> (ComponentSlot, T) {
        let slot = self.slot_of::<T>();
        match self.storage_mut::<T>().remove(entity) {
            Some(component) => (slot, component),
            None => panic!(
                "Cannot remove absent component {} from {}",
                type_name::<T>(),
                entity
            ),
        }
    }

    /// Drop every component belonging to an entity, across all slots
    pub fn remove_all(&mut self, entity: EntityId) {
        for storage in &mut self.storages {
            storage.remove_entity(entity);
        }
    }

    /// Number of stored instances for a slot
    ///
    /// # Panics
    /// Panics if the slot was never allocated.
    pub fn slot_len(&self, slot: ComponentSlot) -> usize {
        assert!(slot < self.storages.len(), "Unallocated component slot {}", slot);
        self.storages[slot].len()
    }

    /// Whether an entity has a component at a slot, by erased lookup
    pub fn slot_contains(&self, slot: ComponentSlot, entity: EntityId) -> bool {
        slot < self.storages.len() && self.storages[slot].contains(entity)
    }

    /// Clear all stored components, keeping registrations
    pub fn clear(&mut self) {
        for storage in &mut self.storages {
            storage.clear();
        }
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}
