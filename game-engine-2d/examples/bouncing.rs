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
//! Bouncing bodies example
//!
//! Drops three boxes into a walled pit with the ground restitution
//! turned up, then watches them bounce themselves out of energy. It
//! shows the movement and collision systems driven directly, contact
//! events read back per frame, and bodies coming to rest.
//!
//! # Running
//!
//! ```sh
//! cargo run --example bouncing
//! ```

use game_engine_2d::collision::CollisionSystem;
use game_engine_2d::ecs::{BoxCollider, Physics, System, Transform, Velocity, World};
use game_engine_2d::math::Vec2;
use game_engine_2d::physics::{MovementSystem, PhysicsConfig};
use game_engine_2d::EntityId;

const DT: f32 = 1.0 / 60.0;
const FRAMES: usize = 600;

fn spawn_box(world: &mut World, position: Vec2, velocity: Vec2) -> EntityId {
    let entity = world.create_entity();
    world.add_component(entity, Transform::new(position));
    world.add_component(entity, Velocity(velocity));
    world.add_component(entity, Physics::new(1.0));
    world.add_component(entity, BoxCollider::new(1.0, 1.0));
    entity
}

fn spawn_wall(world: &mut World, position: Vec2, width: f32, height: f32) {
    let entity = world.create_entity();
    world.add_component(entity, Transform::new(position));
    world.add_component(entity, Physics::immovable());
    world.add_component(entity, BoxCollider::new(width, height));
}

fn main() {
    env_logger::init();

    println!("Game Engine 2D - Bouncing Bodies Example");
    println!("========================================\n");

    // Landings normally kill vertical speed; raise the ground
    // restitution so drops turn into bounces.
    let config = PhysicsConfig {
        restitution_ground: 0.85,
        ..PhysicsConfig::default()
    };
    println!("Ground restitution: {:.2}", config.restitution_ground);

    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world);
    let mut collision = CollisionSystem::new(&mut world, config);

    // A pit: floor plus two walls to keep the drifters in.
    spawn_wall(&mut world, Vec2::ZERO, 20.0, 1.0);
    spawn_wall(&mut world, Vec2::new(-9.0, 5.0), 1.0, 20.0);
    spawn_wall(&mut world, Vec2::new(9.0, 5.0), 1.0, 20.0);

    let bodies = [
        spawn_box(&mut world, Vec2::new(-4.0, 6.0), Vec2::new(1.5, 0.0)),
        spawn_box(&mut world, Vec2::new(0.0, 9.0), Vec2::ZERO),
        spawn_box(&mut world, Vec2::new(4.0, 12.0), Vec2::new(-1.5, 0.0)),
    ];
    println!("Dropped {} boxes from 6, 9, and 12 units up\n", bodies.len());

    let mut bounces = [0usize; 3];
    let mut falling_speed = [0.0f32; 3];

    for frame in 0..FRAMES {
        for (index, &body) in bodies.iter().enumerate() {
            falling_speed[index] = world.component::<Velocity>(body).0.y;
        }

        movement.update(&mut world, DT);
        collision.update(&mut world, DT);

        // A fast descent that ends moving upward is a bounce.
        for (index, &body) in bodies.iter().enumerate() {
            let vy = world.component::<Velocity>(body).0.y;
            if falling_speed[index] < -0.5 && vy > 0.0 {
                bounces[index] += 1;
                println!(
                    "  frame {frame:3}: box {index} bounced, {:.1} m/s down -> {vy:.1} m/s up",
                    -falling_speed[index]
                );
            }
        }

        if frame % 120 == 0 {
            println!("\n--- t = {:.1} s ---", frame as f32 * DT);
            for (index, &body) in bodies.iter().enumerate() {
                let position = world.component::<Transform>(body).position;
                let grounded = world.component::<Physics>(body).is_grounded;
                println!(
                    "  box {index}: x = {:6.2}, y = {:5.2}, grounded = {grounded}",
                    position.x, position.y
                );
            }
            println!();
        }
    }

    println!("\nAfter {:.0} seconds:", FRAMES as f32 * DT);
    for (index, &body) in bodies.iter().enumerate() {
        let position = world.component::<Transform>(body).position;
        let grounded = world.component::<Physics>(body).is_grounded;
        println!(
            "  box {index}: {} bounces, settled at x = {:.2}, y = {:.2}, grounded = {grounded}",
            bounces[index], position.x, position.y
        );
    }

    #[cfg(feature = "parallel")]
    println!("\n[Parallel contact detection enabled via Rayon]");

    #[cfg(not(feature = "parallel"))]
    println!("\n[Running the contact sweep sequentially]");
}
