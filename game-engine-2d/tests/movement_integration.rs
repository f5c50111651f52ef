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
//! Integration tests for force integration and input-driven movement

use game_engine_2d::ecs::{InputControlled, Physics, System, Transform, Velocity, World};
use game_engine_2d::input::Key;
use game_engine_2d::math::Vec2;
use game_engine_2d::physics::MovementSystem;
use game_engine_2d::EntityId;

const DT: f32 = 0.1;

/// Body with no gravity and no damping, so effects are exact
fn floaty_body(world: &mut World, mass: f32) -> EntityId {
    let entity = world.create_entity();
    world.add_component(entity, Transform::new(Vec2::ZERO));
    world.add_component(entity, Velocity::ZERO);
    world.add_component(
        entity,
        Physics::new(mass).with_gravity(Vec2::ZERO).with_damping(1.0),
    );
    entity
}

#[test]
fn test_fall_rate_is_mass_independent() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);

    let light = world.create_entity();
    world.add_component(light, Transform::new(Vec2::ZERO));
    world.add_component(light, Velocity::ZERO);
    world.add_component(light, Physics::new(1.0));

    let heavy = world.create_entity();
    world.add_component(heavy, Transform::new(Vec2::ZERO));
    world.add_component(heavy, Velocity::ZERO);
    world.add_component(heavy, Physics::new(5.0));

    for _ in 0..30 {
        movement.update(&mut world, 1.0 / 60.0);
    }

    // Gravity enters as both a force and an acceleration bias, and the
    // force is proportional to mass, so the fall is identical.
    assert_eq!(
        world.component::<Velocity>(light).0,
        world.component::<Velocity>(heavy).0,
    );
    assert_eq!(
        world.component::<Transform>(light).position,
        world.component::<Transform>(heavy).position,
    );
    assert!(world.component::<Velocity>(light).0.y < 0.0);
}

#[test]
fn test_applied_forces_scale_with_mass() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let light = floaty_body(&mut world, 1.0);
    let heavy = floaty_body(&mut world, 2.0);

    world.component_mut::<Physics>(light).force = Vec2::new(10.0, 0.0);
    world.component_mut::<Physics>(heavy).force = Vec2::new(10.0, 0.0);
    movement.update(&mut world, 0.5);

    assert_eq!(world.component::<Velocity>(light).0.x, 5.0);
    assert_eq!(world.component::<Velocity>(heavy).0.x, 2.5);

    // The accumulator resets once integrated.
    assert_eq!(world.component::<Physics>(light).force, Vec2::ZERO);
    assert_eq!(world.component::<Physics>(heavy).force, Vec2::ZERO);
}

#[test]
fn test_held_direction_keys_drive_horizontal_velocity() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = floaty_body(&mut world, 1.0);
    world.add_component(entity, InputControlled::new(4.0));

    world.input.press(Key::Right);
    movement.update(&mut world, DT);
    assert_eq!(world.component::<Velocity>(entity).0.x, 4.0);
    let after_right = world.component::<Transform>(entity).position.x;
    assert!((after_right - 0.4).abs() < 1e-6);

    world.input.release(Key::Right);
    world.input.press(Key::Left);
    movement.update(&mut world, DT);
    assert_eq!(world.component::<Velocity>(entity).0.x, -4.0);
}

#[test]
fn test_jump_requires_ground_and_a_fresh_press() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = floaty_body(&mut world, 1.0);
    world.component_mut::<Physics>(entity).jump_force = 400.0;
    world.add_component(entity, InputControlled::new(4.0));

    // Airborne press does nothing.
    world.input.press(Key::Jump);
    movement.update(&mut world, DT);
    assert_eq!(world.component::<Velocity>(entity).0.y, 0.0);
    assert!(!world.component::<Physics>(entity).has_jumped);

    // The press edge is gone by the time the body is grounded.
    world.input.begin_frame();
    world.component_mut::<Physics>(entity).is_grounded = true;
    movement.update(&mut world, DT);
    assert_eq!(world.component::<Velocity>(entity).0.y, 0.0);

    // A fresh press while grounded fires the jump.
    world.input.release(Key::Jump);
    world.input.press(Key::Jump);
    movement.update(&mut world, DT);
    assert!((world.component::<Velocity>(entity).0.y - 40.0).abs() < 1e-4);
    assert!(world.component::<Physics>(entity).has_jumped);
    assert!(!world.component::<Physics>(entity).is_grounded);
}

#[test]
fn test_velocity_cap_applies_to_the_stored_velocity_only() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = floaty_body(&mut world, 1.0);
    world.component_mut::<Physics>(entity).set_max_velocity(50.0);
    world.component_mut::<Velocity>(entity).0 = Vec2::new(100.0, 0.0);

    movement.update(&mut world, 1.0);

    // The frame moves at full speed; only what later frames see is capped.
    assert_eq!(world.component::<Transform>(entity).position.x, 100.0);
    assert!((world.component::<Velocity>(entity).0.x - 50.0).abs() < 1e-3);
}

#[test]
fn test_static_bodies_never_integrate() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = world.create_entity();
    world.add_component(entity, Transform::new(Vec2::new(2.0, 2.0)));
    world.add_component(entity, Velocity::new(5.0, 5.0));
    world.add_component(entity, Physics::immovable());

    for _ in 0..10 {
        movement.update(&mut world, DT);
    }

    assert_eq!(world.component::<Transform>(entity).position, Vec2::new(2.0, 2.0));
    assert_eq!(world.component::<Velocity>(entity).0, Vec2::new(5.0, 5.0));
}

#[test]
fn test_rotation_follows_angular_velocity() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = floaty_body(&mut world, 1.0);
    world.component_mut::<Transform>(entity).angular_velocity = 2.0;

    movement.update(&mut world, 0.25);
    assert!((world.component::<Transform>(entity).rotation - 0.5).abs() < 1e-6);
}

#[test]
fn test_damping_decays_velocity_geometrically() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = floaty_body(&mut world, 1.0);
    world.component_mut::<Physics>(entity).damping = 0.5;
    world.component_mut::<Velocity>(entity).0 = Vec2::new(8.0, 0.0);

    for _ in 0..3 {
        movement.update(&mut world, DT);
    }
    assert_eq!(world.component::<Velocity>(entity).0.x, 1.0);
}

#[test]
fn test_prev_position_trails_by_one_frame() {
    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let entity = floaty_body(&mut world, 1.0);
    world.component_mut::<Velocity>(entity).0 = Vec2::new(1.0, 0.0);

    movement.update(&mut world, DT);
    let transform = world.component::<Transform>(entity);
    assert_eq!(transform.prev_position, Vec2::ZERO);
    let first_position = transform.position;

    movement.update(&mut world, DT);
    let transform = world.component::<Transform>(entity);
    assert_eq!(transform.prev_position, first_position);
}
