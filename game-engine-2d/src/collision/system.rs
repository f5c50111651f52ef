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
//! Collision detection and resolution
//!
//! Each frame runs as a read-only detection phase over an immutable
//! candidate snapshot, followed by a single-writer resolution phase.
//! Detection sweeps every dynamic body against every other candidate;
//! resolution applies impulses, positional correction, and grounding in
//! event order. With the `parallel` feature the detection sweep fans out
//! across threads; resolution always stays sequential.

use crate::collision::aabb::{classify_side, sweep_rect_rect, Aabb, CollisionSide};
use crate::collision::grid::SpatialGrid;
use crate::ecs::{
    BoxCollider, ComponentSlot, EntityId, Physics, Proximity, Signature, System, Transform,
    Velocity, World,
};
use crate::math::Vec2;
use crate::physics::PhysicsConfig;
use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One detected contact between a dynamic entity and another candidate
///
/// Events are rebuilt every frame; they are only meaningful until the
/// next collision pass runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The dynamic entity the sweep ran for
    pub entity: EntityId,
    /// The candidate it hit
    pub other: EntityId,
    /// Per-axis overlap between the two boxes; an axis can be negative
    /// when contact is reached by motion within the frame
    pub overlap: Vec2,
    /// Side of `entity` the contact presses against
    pub side: CollisionSide,
    /// First time of contact within the frame, in `[0, delta_time]`
    pub contact_time: f32,
}

/// Immutable per-entity snapshot the detection sweep runs against
#[derive(Debug, Clone, Copy)]
struct Candidate {
    entity: EntityId,
    aabb: Aabb,
    velocity: Vec2,
    collidable: bool,
    dynamic: bool,
}

/// Timestamps of the most recent side contacts, for squeeze detection
#[derive(Debug, Clone, Copy, Default)]
struct SideMemory {
    last_left: Option<f32>,
    last_right: Option<f32>,
}

/// Detects contacts with swept boxes and resolves them with impulses
///
/// Boxes are built from `prev_position`, so the system must run after
/// movement integration within the frame. Grounding is re-derived every
/// pass: an entity is grounded exactly when the pass saw a bottom
/// contact against a collidable candidate, and its gravity field is
/// zeroed while grounded and restored once the contact is lost.
///
/// Non-collidable (sensor) shapes appear in [`CollisionSystem::events`]
/// like any other contact but never ground, block, or receive impulses.
pub struct CollisionSystem {
    signature: Signature,
    collider_signature: Signature,
    proximity_signature: Signature,
    physics_slot: ComponentSlot,
    velocity_slot: ComponentSlot,
    config: PhysicsConfig,
    clock: f32,
    grid: SpatialGrid,
    candidates: Vec<Candidate>,
    events: Vec<CollisionEvent>,
    memory: HashMap<EntityId, SideMemory>,
    scratch: Vec<EntityId>,
}

impl CollisionSystem {
    /// Create the system, registering the component types it consumes
    pub fn new(world: &mut World, config: PhysicsConfig) -> Self {
        let transform = world.register_component::<Transform>();
        let velocity = world.register_component::<Velocity>();
        let physics = world.register_component::<Physics>();
        let collider = world.register_component::<BoxCollider>();
        let proximity = world.register_component::<Proximity>();
        CollisionSystem {
            signature: Signature::EMPTY
                .with(transform)
                .with(velocity)
                .with(physics)
                .with(collider),
            collider_signature: Signature::EMPTY.with(transform).with(collider),
            proximity_signature: Signature::EMPTY.with(transform).with(collider).with(proximity),
            physics_slot: physics,
            velocity_slot: velocity,
            config,
            clock: 0.0,
            grid: SpatialGrid::new(config.cell_size),
            candidates: Vec::new(),
            events: Vec::new(),
            memory: HashMap::new(),
            scratch: Vec::new(),
        }
    }

    /// The tuning constants this system resolves with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Contacts recorded by the most recent pass
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    fn rebuild_candidates(&mut self, world: &World) {
        self.candidates.clear();
        for entity in world.matching(self.collider_signature) {
            let transform = world.component::<Transform>(entity);
            let collider = world.component::<BoxCollider>(entity);
            let mask = world.signature(entity);
            let dynamic = mask.has(self.physics_slot)
                && mask.has(self.velocity_slot)
                && !world.component::<Physics>(entity).is_static;
            let velocity = world
                .get_component::<Velocity>(entity)
                .map(|velocity| velocity.0)
                .unwrap_or(Vec2::ZERO);
            self.candidates.push(Candidate {
                entity,
                aabb: Aabb::from_center(transform.prev_position, collider.half_extents()),
                velocity,
                collidable: collider.collidable,
                dynamic,
            });
        }
    }

    /// Snapshot lookup; candidates are sorted because entity IDs are
    /// handed out in increasing order and the scan preserves it.
    fn candidate(&self, entity: EntityId) -> Option<&Candidate> {
        self.candidates
            .binary_search_by_key(&entity, |candidate| candidate.entity)
            .ok()
            .map(|index| &self.candidates[index])
    }

    fn contacts_for(
        candidate: &Candidate,
        all: &[Candidate],
        delta_time: f32,
    ) -> Vec<CollisionEvent> {
        let mut contacts = Vec::new();
        for other in all {
            if other.entity == candidate.entity {
                continue;
            }
            let relative = other.velocity - candidate.velocity;
            let contact_time =
                match sweep_rect_rect(&candidate.aabb, &other.aabb, relative, delta_time) {
                    Some(time) => time,
                    None => continue,
                };
            if let Some((side, overlap)) = classify_side(&candidate.aabb, &other.aabb) {
                contacts.push(CollisionEvent {
                    entity: candidate.entity,
                    other: other.entity,
                    overlap,
                    side,
                    contact_time,
                });
            }
        }
        contacts
    }

    #[cfg(feature = "parallel")]
    fn detect_contacts(&mut self, delta_time: f32) {
        let candidates = self.candidates.as_slice();
        let events: Vec<CollisionEvent> = candidates
            .par_iter()
            .filter(|candidate| candidate.dynamic)
            .flat_map_iter(|candidate| Self::contacts_for(candidate, candidates, delta_time))
            .collect();
        self.events = events;
    }

    #[cfg(not(feature = "parallel"))]
    fn detect_contacts(&mut self, delta_time: f32) {
        let candidates = self.candidates.as_slice();
        let events: Vec<CollisionEvent> = candidates
            .iter()
            .filter(|candidate| candidate.dynamic)
            .flat_map(|candidate| Self::contacts_for(candidate, candidates, delta_time))
            .collect();
        self.events = events;
    }

    /// True when the contact is between two blocking shapes, which is
    /// what grounding, squeezing, and resolution all require.
    fn blocking(&self, event: &CollisionEvent) -> bool {
        let entity_blocks = self
            .candidate(event.entity)
            .map(|candidate| candidate.collidable)
            .unwrap_or(false);
        let other_blocks = self
            .candidate(event.other)
            .map(|candidate| candidate.collidable)
            .unwrap_or(false);
        entity_blocks && other_blocks
    }

    fn record_side_contacts(&mut self) {
        let clock = self.clock;
        let window = self.config.squeeze_window;
        self.memory.retain(|_, memory| {
            let recent = |stamp: Option<f32>| stamp.is_some_and(|at| clock - at <= window);
            recent(memory.last_left) || recent(memory.last_right)
        });
        for index in 0..self.events.len() {
            let event = self.events[index];
            if !self.blocking(&event) {
                continue;
            }
            match event.side {
                CollisionSide::Left => {
                    self.memory.entry(event.entity).or_default().last_left = Some(clock);
                }
                CollisionSide::Right => {
                    self.memory.entry(event.entity).or_default().last_right = Some(clock);
                }
                CollisionSide::Top | CollisionSide::Bottom => {}
            }
        }
    }

    fn squeezed_entities(&self) -> HashSet<EntityId> {
        let mut squeezed = HashSet::new();
        for (&entity, memory) in &self.memory {
            if let (Some(left), Some(right)) = (memory.last_left, memory.last_right) {
                if self.clock - left <= self.config.squeeze_window
                    && self.clock - right <= self.config.squeeze_window
                {
                    squeezed.insert(entity);
                }
            }
        }
        squeezed
    }

    fn apply_grounding(&self, world: &mut World) {
        for entity in world.matching(self.signature) {
            if !world.component::<BoxCollider>(entity).collidable {
                continue;
            }
            if world.component::<Physics>(entity).is_static {
                continue;
            }
            let grounded = self.events.iter().any(|event| {
                event.entity == entity
                    && event.side == CollisionSide::Bottom
                    && self.blocking(event)
            });
            let physics = world.component_mut::<Physics>(entity);
            if grounded {
                physics.is_grounded = true;
                physics.gravity = Vec2::ZERO;
            } else {
                physics.is_grounded = false;
                physics.gravity = self.config.gravity;
            }
        }
    }

    fn resolve_contacts(&self, world: &mut World) {
        let squeezed = self.squeezed_entities();
        for event in &self.events {
            if !self.blocking(event) {
                continue;
            }

            // Re-fetch per event: an earlier contact this frame may have
            // already moved this entity.
            let mut transform = *world.component::<Transform>(event.entity);
            let mut velocity = *world.component::<Velocity>(event.entity);
            let mut physics = *world.component::<Physics>(event.entity);
            let other_velocity = world
                .get_component::<Velocity>(event.other)
                .map(|velocity| velocity.0)
                .unwrap_or(Vec2::ZERO);
            let normal = event.side.normal();

            // Opposing side contacts within the squeeze window would make
            // the impulse path fight itself, so the entity is parked
            // instead: no impulse, no correction, just a nudge out.
            if squeezed.contains(&event.entity)
                && matches!(event.side, CollisionSide::Left | CollisionSide::Right)
            {
                log::debug!("{} squeezed between opposing side contacts", event.entity);
                velocity.0.x = 0.0;
                physics.gravity = self.config.gravity;
                physics.is_grounded = false;
                transform.position += normal * self.config.penetration_tolerance;

                *world.component_mut::<Transform>(event.entity) = transform;
                *world.component_mut::<Velocity>(event.entity) = velocity;
                *world.component_mut::<Physics>(event.entity) = physics;
                continue;
            }

            let relative = (velocity.0 - other_velocity) * self.config.contact_damping;
            let along = relative.dot(normal);
            if along < 0.0 && physics.inverse_mass() > 0.0 {
                let restitution = if event.side == CollisionSide::Bottom {
                    self.config.restitution_ground
                } else {
                    self.config.restitution_side
                };
                let impulse = -(1.0 + restitution) * along / physics.inverse_mass();
                velocity.0 += normal * (impulse * physics.inverse_mass());
            }

            if event.overlap.y > self.config.penetration_tolerance {
                let mut correction = normal * (event.overlap.y * self.config.correction_factor);
                match event.side {
                    CollisionSide::Bottom => {
                        correction.x = 0.0;
                        physics.is_grounded = true;
                        physics.has_jumped = false;
                        physics.gravity = Vec2::ZERO;
                        if velocity.0.y.abs() < self.config.velocity_snap {
                            velocity.0.y = 0.0;
                        }
                    }
                    CollisionSide::Left | CollisionSide::Right => {
                        correction *= self.config.side_correction_scale;
                        velocity.0.x *= self.config.side_velocity_damping;
                    }
                    CollisionSide::Top => {}
                }
                transform.position += correction;
            }

            *world.component_mut::<Transform>(event.entity) = transform;
            *world.component_mut::<Velocity>(event.entity) = velocity;
            *world.component_mut::<Physics>(event.entity) = physics;
        }
    }

    fn refresh_proximity(&mut self, world: &mut World) {
        for entity in world.matching(self.proximity_signature) {
            let transform = *world.component::<Transform>(entity);
            let collider = *world.component::<BoxCollider>(entity);
            let aabb = Aabb::from_center(transform.prev_position, collider.half_extents());

            let cell = self.grid.cell_of(aabb.center());
            self.grid.neighborhood_into(cell, &mut self.scratch);

            let neighbors = Proximity {
                left: self
                    .first_probe_hit(entity, aabb.translated(Vec2::new(-collider.width, 0.0))),
                right: self
                    .first_probe_hit(entity, aabb.translated(Vec2::new(collider.width, 0.0))),
                above: self
                    .first_probe_hit(entity, aabb.translated(Vec2::new(0.0, collider.height))),
                below: self
                    .first_probe_hit(entity, aabb.translated(Vec2::new(0.0, -collider.height))),
            };
            *world.component_mut::<Proximity>(entity) = neighbors;
        }
    }

    /// First grid neighbor whose box touches the probe; the scratch list
    /// is sorted ascending, so ties go to the oldest entity.
    fn first_probe_hit(&self, entity: EntityId, probe: Aabb) -> Option<EntityId> {
        for &id in &self.scratch {
            if id == entity {
                continue;
            }
            if let Some(candidate) = self.candidate(id) {
                if candidate.aabb.overlaps(&probe) {
                    return Some(id);
                }
            }
        }
        None
    }
}

impl System for CollisionSystem {
    fn signature(&self) -> Signature {
        self.signature
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        self.clock += delta_time;

        self.rebuild_candidates(world);

        self.grid.clear();
        for candidate in &self.candidates {
            if candidate.collidable {
                self.grid.insert(candidate.entity, &candidate.aabb);
            }
        }

        self.detect_contacts(delta_time);
        log::trace!(
            "collision pass: {} candidates, {} contacts",
            self.candidates.len(),
            self.events.len()
        );

        self.record_side_contacts();
        self.apply_grounding(world);
        self.resolve_contacts(world);
        self.refresh_proximity(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_collision() -> (World, CollisionSystem) {
        let mut world = World::new();
        let system = CollisionSystem::new(&mut world, PhysicsConfig::default());
        (world, system)
    }

    fn spawn_dynamic(world: &mut World, position: Vec2, velocity: Vec2) -> EntityId {
        let entity = world.create_entity();
        world.add_component(entity, Transform::new(position));
        world.add_component(entity, Velocity(velocity));
        world.add_component(
            entity,
            Physics::new(1.0).with_gravity(Vec2::ZERO).with_damping(1.0),
        );
        world.add_component(entity, BoxCollider::new(1.0, 1.0));
        entity
    }

    fn spawn_static(world: &mut World, position: Vec2, width: f32, height: f32) -> EntityId {
        let entity = world.create_entity();
        world.add_component(entity, Transform::new(position));
        world.add_component(entity, Velocity::ZERO);
        world.add_component(entity, Physics::immovable());
        world.add_component(entity, BoxCollider::new(width, height));
        entity
    }

    #[test]
    fn test_falling_body_grounds_on_floor() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::new(0.0, 1.02), Vec2::new(0.0, -2.0));
        spawn_static(&mut world, Vec2::ZERO, 10.0, 1.0);

        system.update(&mut world, DT);

        let physics = world.component::<Physics>(body);
        assert!(physics.is_grounded);
        assert_eq!(physics.gravity, Vec2::ZERO);
        assert!(system
            .events()
            .iter()
            .any(|event| event.entity == body && event.side == CollisionSide::Bottom));
    }

    #[test]
    fn test_no_contact_restores_gravity() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::new(0.0, 5.0), Vec2::ZERO);
        {
            let physics = world.component_mut::<Physics>(body);
            physics.is_grounded = true;
            physics.gravity = Vec2::ZERO;
        }

        system.update(&mut world, DT);

        let physics = world.component::<Physics>(body);
        assert!(!physics.is_grounded);
        assert_eq!(physics.gravity, PhysicsConfig::default().gravity);
    }

    #[test]
    fn test_deep_bottom_contact_corrects_and_clears_jump() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::new(0.0, 0.95), Vec2::new(0.0, -0.05));
        world.component_mut::<Physics>(body).has_jumped = true;
        spawn_static(&mut world, Vec2::ZERO, 10.0, 1.0);

        system.update(&mut world, DT);

        let physics = world.component::<Physics>(body);
        let transform = world.component::<Transform>(body);
        assert!(physics.is_grounded);
        assert!(!physics.has_jumped);
        assert_eq!(world.component::<Velocity>(body).0.y, 0.0);
        assert!((transform.position.y - (0.95 + 0.05 * 0.3)).abs() < 1e-5);
    }

    #[test]
    fn test_side_contact_damps_horizontal_velocity() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::ZERO, Vec2::new(2.0, 0.0));
        spawn_static(&mut world, Vec2::new(0.95, 0.0), 1.0, 3.0);

        system.update(&mut world, DT);

        let velocity = world.component::<Velocity>(body).0;
        // impulse kills the approach, then side damping halves what is left
        assert!((velocity.x - (-0.08)).abs() < 1e-4);
        assert!(world.component::<Transform>(body).position.x < 0.0);
    }

    #[test]
    fn test_squeeze_parks_the_entity() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::ZERO, Vec2::new(5.0, 0.0));
        spawn_static(&mut world, Vec2::new(-0.95, 0.0), 1.0, 3.0);
        spawn_static(&mut world, Vec2::new(0.95, 0.0), 1.0, 3.0);

        system.update(&mut world, DT);

        let physics = world.component::<Physics>(body);
        let transform = world.component::<Transform>(body);
        assert_eq!(world.component::<Velocity>(body).0.x, 0.0);
        assert_eq!(physics.gravity, PhysicsConfig::default().gravity);
        assert!(!physics.is_grounded);
        // opposing nudges cancel, so the entity does not drift
        assert!(transform.position.x.abs() < 1e-5);
    }

    #[test]
    fn test_sensor_reports_but_never_blocks() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::new(0.0, 1.02), Vec2::new(0.0, -2.0));
        let zone = world.create_entity();
        world.add_component(zone, Transform::new(Vec2::ZERO));
        world.add_component(zone, BoxCollider::sensor(10.0, 1.0));

        system.update(&mut world, DT);

        assert!(system
            .events()
            .iter()
            .any(|event| event.entity == body && event.other == zone));
        let physics = world.component::<Physics>(body);
        assert!(!physics.is_grounded);
        assert_eq!(world.component::<Velocity>(body).0.y, -2.0);
    }

    #[test]
    fn test_events_are_rebuilt_each_pass() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::new(0.0, 0.95), Vec2::ZERO);
        spawn_static(&mut world, Vec2::ZERO, 10.0, 1.0);

        system.update(&mut world, DT);
        assert!(!system.events().is_empty());

        let transform = world.component_mut::<Transform>(body);
        transform.position = Vec2::new(0.0, 50.0);
        transform.prev_position = Vec2::new(0.0, 50.0);
        system.update(&mut world, DT);
        assert!(system.events().is_empty());
    }

    #[test]
    fn test_detection_anchors_to_prev_position() {
        let (mut world, mut system) = world_with_collision();
        let body = spawn_dynamic(&mut world, Vec2::new(0.0, 0.95), Vec2::ZERO);
        spawn_static(&mut world, Vec2::ZERO, 10.0, 1.0);

        // current position is far away, but the sweep anchors where the
        // step began
        world.component_mut::<Transform>(body).position = Vec2::new(100.0, 100.0);
        system.update(&mut world, DT);

        assert!(system
            .events()
            .iter()
            .any(|event| event.entity == body && event.side == CollisionSide::Bottom));
    }

    #[test]
    fn test_proximity_reports_adjacent_tiles() {
        let (mut world, mut system) = world_with_collision();
        let miner = world.create_entity();
        world.add_component(miner, Transform::new(Vec2::ZERO));
        world.add_component(miner, BoxCollider::new(1.0, 1.0));
        world.add_component(miner, Proximity::new());

        let left = spawn_static(&mut world, Vec2::new(-1.0, 0.0), 1.0, 1.0);
        let right = spawn_static(&mut world, Vec2::new(1.0, 0.0), 1.0, 1.0);
        let above = spawn_static(&mut world, Vec2::new(0.0, 1.0), 1.0, 1.0);
        let below = spawn_static(&mut world, Vec2::new(0.0, -1.0), 1.0, 1.0);

        system.update(&mut world, DT);

        let proximity = world.component::<Proximity>(miner);
        assert_eq!(proximity.left, Some(left));
        assert_eq!(proximity.right, Some(right));
        assert_eq!(proximity.above, Some(above));
        assert_eq!(proximity.below, Some(below));
    }

    #[test]
    fn test_proximity_ignores_sensors_and_distance() {
        let (mut world, mut system) = world_with_collision();
        let miner = world.create_entity();
        world.add_component(miner, Transform::new(Vec2::ZERO));
        world.add_component(miner, BoxCollider::new(1.0, 1.0));
        world.add_component(miner, Proximity::new());

        let zone = world.create_entity();
        world.add_component(zone, Transform::new(Vec2::new(-1.0, 0.0)));
        world.add_component(zone, BoxCollider::sensor(1.0, 1.0));
        spawn_static(&mut world, Vec2::new(5.0, 0.0), 1.0, 1.0);

        system.update(&mut world, DT);

        let proximity = world.component::<Proximity>(miner);
        assert_eq!(proximity.left, None);
        assert_eq!(proximity.right, None);
    }
}
