//! World management
//!
//! The World is the central container for all ECS data. It glues the
//! entity registry to the component store so that signatures stay in
//! sync with storage, and carries the shared input state systems read.

use crate::ecs::component::{Component, ComponentSlot, ComponentStore};
use crate::ecs::entity::{EntityId, EntityRegistry, Signature};
use crate::input::InputState;

/// The main ECS world container
///
/// World manages entity lifecycles, owns all component data, and serves
/// as the central access point for ECS operations. Component lookups on
/// unregistered types panic; lookups on entities that merely lack the
/// component return `None` through the `get_` accessors.
pub struct World {
    entities: EntityRegistry,
    components: ComponentStore,
    /// Keyboard state fed by the host and read by gameplay systems
    pub input: InputState,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World {
            entities: EntityRegistry::new(),
            components: ComponentStore::new(),
            input: InputState::new(),
        }
    }

    /// Create a new entity with an empty signature
    pub fn create_entity(&mut self) -> EntityId {
        self.entities.create_entity()
    }

    /// Destroy an entity and drop all of its components
    ///
    /// Destroying an unknown or already-destroyed entity is a no-op that
    /// returns false. Surviving entities keep their IDs.
    pub fn destroy_entity(&mut self, entity: EntityId) -> bool {
        if !self.entities.is_alive(entity) {
            return false;
        }
        self.components.remove_all(entity);
        self.entities.destroy_entity(entity)
    }

    /// Check if an entity is alive
    pub fn is_entity_alive(&self, entity: EntityId) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.entities.entity_count()
    }

    /// Remove every entity and component, keeping type registrations
    ///
    /// The ID sequence restarts from zero. Input state is host-owned and
    /// survives the reset.
    pub fn clear(&mut self) {
        self.components.clear();
        self.entities.clear();
    }

    /// Iterate over all alive entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.entities()
    }

    /// Register a component type, allocating its slot on first call
    ///
    /// Registration is idempotent; repeated calls return the same slot.
    pub fn register_component<T: Component>(&mut self) -> ComponentSlot {
        self.components.register::<T>()
    }

    /// Slot of an already-registered component type
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn slot_of<T: Component>(&self) -> ComponentSlot {
        self.components.slot_of::<T>()
    }

    /// Whether a component type has been registered
    pub fn is_component_registered<T: Component>(&self) -> bool {
        self.components.is_registered::<T>()
    }

    /// Attach a component to an entity, overwriting any previous instance
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity is not alive.
    pub fn add_component<T: Component>(&mut self, entity: EntityId, component: T) {
        let slot = self.components.add(entity, component);
        self.entities.add_component_flag(entity, slot);
    }

    /// Reference to a component the caller knows is present
    ///
    /// Use this for entities found through [`World::matching`], where the
    /// signature already guarantees presence.
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity lacks it.
    pub fn component<T: Component>(&self, entity: EntityId) -> &T {
        self.components.get::<T>(entity)
    }

    /// Mutable reference to a component the caller knows is present
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity lacks it.
    pub fn component_mut<T: Component>(&mut self, entity: EntityId) -> &mut T {
        self.components.get_mut::<T>(entity)
    }

    /// Reference to a component, or `None` if the entity lacks it
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<&T> {
        if self.components.contains::<T>(entity) {
            Some(self.components.get::<T>(entity))
        } else {
            None
        }
    }

    /// Mutable reference to a component, or `None` if the entity lacks it
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn get_component_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if self.components.contains::<T>(entity) {
            Some(self.components.get_mut::<T>(entity))
        } else {
            None
        }
    }

    /// Detach and return an entity's component, clearing its mask bit
    ///
    /// # Panics
    /// Panics if the type is unregistered or the entity lacks it.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> T {
        let (slot, component) = self.components.remove::<T>(entity);
        self.entities.remove_component_flag(entity, slot);
        component
    }

    /// Whether an entity carries a component of this type
    ///
    /// Answered from the entity's signature. Returns false for entities
    /// that are not alive.
    ///
    /// # Panics
    /// Panics if the type was never registered.
    pub fn has_component<T: Component>(&self, entity: EntityId) -> bool {
        let slot = self.components.slot_of::<T>();
        self.entities.has_component(entity, slot)
    }

    /// The entity's current component signature
    ///
    /// # Panics
    /// Panics if the entity is not alive.
    pub fn signature(&self, entity: EntityId) -> Signature {
        self.entities.signature(entity)
    }

    /// Collect entities whose signatures contain every required slot
    ///
    /// A full scan over alive entities, returned in creation order so
    /// that systems process entities deterministically.
    pub fn matching(&self, required: Signature) -> Vec<EntityId> {
        self.entities
            .entities()
            .filter(|&entity| self.entities.signature(entity).contains_all(required))
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
