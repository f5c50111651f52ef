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
//! Velocity and position integration
//!
//! Runs before collision each frame: collision's swept tests consume the
//! velocities computed here and the `prev_position` saved here.

use crate::ecs::{
    ComponentSlot, InputControlled, Physics, Signature, System, Transform, Velocity, World,
};
use crate::input::Key;
use crate::math::Vec2;

/// Integrates forces into velocity and velocity into position
///
/// Processes entities matching {Transform, Velocity, Physics}; static
/// bodies are skipped entirely. Entities additionally carrying
/// [`InputControlled`] have their horizontal velocity and jump force
/// driven by the world's input state before integration.
///
/// Grounded and jump state are never cleared here; grounding decisions
/// belong to the collision pass.
pub struct MovementSystem {
    signature: Signature,
    input_slot: ComponentSlot,
}

impl MovementSystem {
    /// Create the system, registering the component types it integrates
    pub fn new(world: &mut World) -> Self {
        let transform = world.register_component::<Transform>();
        let velocity = world.register_component::<Velocity>();
        let physics = world.register_component::<Physics>();
        let input = world.register_component::<InputControlled>();
        MovementSystem {
            signature: Signature::EMPTY.with(transform).with(velocity).with(physics),
            input_slot: input,
        }
    }
}

impl System for MovementSystem {
    fn signature(&self) -> Signature {
        self.signature
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        for entity in world.matching(self.signature) {
            let mut physics = *world.component::<Physics>(entity);
            if physics.is_static {
                continue;
            }
            let mut transform = *world.component::<Transform>(entity);
            let mut velocity = *world.component::<Velocity>(entity);

            transform.prev_position = transform.position;

            if world.signature(entity).has(self.input_slot) {
                let control = *world.component::<InputControlled>(entity);
                if world.input.is_held(Key::Left) {
                    velocity.0.x = -control.move_speed;
                }
                if world.input.is_held(Key::Right) {
                    velocity.0.x = control.move_speed;
                }
                // Grounded bodies have their gravity field zeroed by the
                // collision pass, so the jump force is undiluted on its
                // first frame.
                if world.input.was_pressed(Key::Jump) && physics.is_grounded && !physics.has_jumped
                {
                    physics.force += Vec2::new(0.0, physics.jump_force * physics.mass());
                    physics.is_grounded = false;
                    physics.has_jumped = true;
                }
            }

            // Gravity enters twice: once through the force accumulator
            // and once as a direct acceleration bias independent of mass.
            physics.force += physics.gravity * physics.mass();
            let acceleration = physics.force * physics.inverse_mass() + physics.gravity;

            velocity.0 += acceleration * delta_time;
            velocity.0 *= physics.damping;
            transform.position += velocity.0 * delta_time;
            transform.rotation += transform.angular_velocity * delta_time;

            // Position integrates the unclamped velocity; the cap applies
            // to what later systems and the next frame observe.
            if velocity.0.length_squared() > physics.max_velocity_squared() {
                velocity.0 = velocity.0.normalized() * physics.max_velocity();
            }
            physics.force = Vec2::ZERO;

            *world.component_mut::<Transform>(entity) = transform;
            *world.component_mut::<Velocity>(entity) = velocity;
            *world.component_mut::<Physics>(entity) = physics;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityId;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_movement() -> (World, MovementSystem) {
        let mut world = World::new();
        let system = MovementSystem::new(&mut world);
        (world, system)
    }

    fn spawn_body(world: &mut World, position: Vec2, physics: Physics) -> EntityId {
        let entity = world.create_entity();
        world.add_component(entity, Transform::new(position));
        world.add_component(entity, Velocity::ZERO);
        world.add_component(entity, physics);
        entity
    }

    #[test]
    fn test_static_bodies_never_move() {
        let (mut world, mut system) = world_with_movement();
        let entity = spawn_body(&mut world, Vec2::new(1.0, 2.0), Physics::immovable());
        world.add_component(entity, Velocity::new(3.0, 3.0));

        for _ in 0..100 {
            system.update(&mut world, DT);
        }

        assert_eq!(world.component::<Transform>(entity).position, Vec2::new(1.0, 2.0));
        assert_eq!(world.component::<Velocity>(entity).0, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_prev_position_tracks_start_of_step() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0).with_gravity(Vec2::ZERO).with_damping(1.0);
        let entity = spawn_body(&mut world, Vec2::new(4.0, 4.0), physics);
        world.add_component(entity, Velocity::new(6.0, 0.0));

        system.update(&mut world, DT);

        let transform = world.component::<Transform>(entity);
        assert_eq!(transform.prev_position, Vec2::new(4.0, 4.0));
        assert!((transform.position.x - (4.0 + 6.0 * DT)).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_applies_twice() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(2.0)
            .with_gravity(Vec2::new(0.0, -10.0))
            .with_damping(1.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);

        system.update(&mut world, DT);

        let velocity = world.component::<Velocity>(entity).0;
        assert!((velocity.y - (-20.0 * DT)).abs() < 1e-5);
    }

    #[test]
    fn test_velocity_clamp_over_many_steps() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0)
            .with_gravity(Vec2::new(0.0, -1000.0))
            .with_damping(1.0)
            .with_max_velocity(5.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);

        for _ in 0..200 {
            system.update(&mut world, DT);
        }

        let speed = world.component::<Velocity>(entity).0.length();
        assert!(speed <= 5.0 + 1e-4, "speed {} exceeds cap", speed);
    }

    #[test]
    fn test_position_integrates_before_clamp() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0)
            .with_gravity(Vec2::ZERO)
            .with_damping(1.0)
            .with_max_velocity(5.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.add_component(entity, Velocity::new(100.0, 0.0));

        system.update(&mut world, 1.0);

        assert!((world.component::<Transform>(entity).position.x - 100.0).abs() < 1e-4);
        assert!((world.component::<Velocity>(entity).0.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_jump_impulse() {
        let (mut world, mut system) = world_with_movement();
        let mut physics = Physics::new(1.0)
            .with_gravity(Vec2::ZERO)
            .with_damping(1.0)
            .with_jump_force(10.0);
        physics.is_grounded = true;
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.add_component(entity, InputControlled::new(5.0));

        world.input.press(Key::Jump);
        system.update(&mut world, DT);

        let physics = world.component::<Physics>(entity);
        let velocity = world.component::<Velocity>(entity).0;
        assert!((velocity.y - 10.0 * DT).abs() < 1e-5);
        assert!(!physics.is_grounded);
        assert!(physics.has_jumped);
        assert_eq!(physics.force, Vec2::ZERO);
    }

    #[test]
    fn test_jump_requires_grounding() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0)
            .with_gravity(Vec2::ZERO)
            .with_damping(1.0)
            .with_jump_force(10.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.add_component(entity, InputControlled::new(5.0));

        world.input.press(Key::Jump);
        system.update(&mut world, DT);

        let physics = world.component::<Physics>(entity);
        assert_eq!(world.component::<Velocity>(entity).0, Vec2::ZERO);
        assert!(!physics.has_jumped);
    }

    #[test]
    fn test_move_keys_override_horizontal_velocity() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0).with_gravity(Vec2::ZERO).with_damping(1.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.add_component(entity, InputControlled::new(5.0));

        world.input.press(Key::Right);
        system.update(&mut world, DT);
        assert!((world.component::<Velocity>(entity).0.x - 5.0).abs() < 1e-6);

        world.input.release(Key::Right);
        world.input.press(Key::Left);
        system.update(&mut world, DT);
        assert!((world.component::<Velocity>(entity).0.x + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_force_resets_after_integration() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0).with_damping(1.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.component_mut::<Physics>(entity).force = Vec2::new(40.0, 0.0);

        system.update(&mut world, DT);
        assert_eq!(world.component::<Physics>(entity).force, Vec2::ZERO);
    }

    #[test]
    fn test_rotation_integration() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0).with_gravity(Vec2::ZERO).with_damping(1.0);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.component_mut::<Transform>(entity).angular_velocity = 2.0;

        system.update(&mut world, 0.5);
        assert!((world.component::<Transform>(entity).rotation - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_damping_decays_velocity() {
        let (mut world, mut system) = world_with_movement();
        let physics = Physics::new(1.0).with_gravity(Vec2::ZERO).with_damping(0.5);
        let entity = spawn_body(&mut world, Vec2::ZERO, physics);
        world.add_component(entity, Velocity::new(8.0, 0.0));

        system.update(&mut world, DT);
        assert!((world.component::<Velocity>(entity).0.x - 4.0).abs() < 1e-6);
    }
}
