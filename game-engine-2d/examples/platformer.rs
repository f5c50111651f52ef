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
//! Platformer example
//!
//! Loads a small level from a JSON scene document, then scripts a run:
//! the player walks right, jumps, walks back, and comes to rest against
//! the level geometry. Every engine system runs each frame; rendering
//! goes to a recording backend and audio to a recording sink so the
//! whole loop is observable from the terminal.
//!
//! # Running
//!
//! ```sh
//! cargo run --example platformer
//! ```

use game_engine_2d::animation::AnimationSystem;
use game_engine_2d::audio::{AudioSystem, RecordingSink};
use game_engine_2d::collision::CollisionSystem;
use game_engine_2d::ecs::{AudioSource, Physics, Proximity, System, Transform, Velocity, World};
use game_engine_2d::input::Key;
use game_engine_2d::physics::{MovementSystem, PhysicsConfig};
use game_engine_2d::render::{RecordingBackend, RenderSystem};
use game_engine_2d::scene::load_scene;

const DT: f32 = 1.0 / 60.0;
const FRAMES: usize = 360;

const LEVEL: &str = r#"{
    "version": "1.0.0",
    "entities": [
        {
            "name": "player",
            "components": {
                "transform": { "position": [0.0, 1.0] },
                "velocity": [0.0, 0.0],
                "physics": { "mass": 1.0, "jump_force": 600.0 },
                "collider": { "width": 1.0, "height": 1.0 },
                "sprite": { "texture": "hero", "layer": 1 },
                "animation": { "frame_count": 4, "frame_time": 0.12 },
                "audio": { "clip": "jump" },
                "input": { "move_speed": 5.0 },
                "proximity": true
            }
        },
        {
            "name": "ground",
            "components": {
                "transform": { "position": [0.0, 0.0] },
                "physics": { "is_static": true },
                "collider": { "width": 30.0, "height": 1.0 },
                "sprite": { "texture": "ground", "width": 30.0, "height": 1.0 }
            }
        },
        {
            "name": "wall",
            "components": {
                "transform": { "position": [10.0, 2.0] },
                "physics": { "is_static": true },
                "collider": { "width": 1.0, "height": 3.0 },
                "sprite": { "texture": "bricks", "width": 1.0, "height": 3.0 }
            }
        },
        {
            "name": "backdrop",
            "components": {
                "transform": { "position": [0.0, 4.0] },
                "sprite": { "texture": "sky", "width": 40.0, "height": 10.0, "layer": -1 }
            }
        }
    ]
}"#;

fn main() {
    env_logger::init();

    println!("Game Engine 2D - Platformer Example");
    println!("===================================\n");

    let mut world = World::new();
    let spawned = load_scene(&mut world, LEVEL).expect("level must load");
    let player = spawned[0];
    println!("Loaded level with {} entities", spawned.len());

    let mut movement = MovementSystem::new(&mut world);
    let mut collision = CollisionSystem::new(&mut world, PhysicsConfig::default());
    let mut animation = AnimationSystem::new(&mut world);
    let mut render = RenderSystem::new(&mut world, RecordingBackend::new());
    let mut audio = AudioSystem::new(&mut world, RecordingSink::default());

    println!("Script: run right, jump at 1 s, glide into the wall, walk back, stop at 5.5 s\n");

    for frame in 0..FRAMES {
        match frame {
            0 => world.input.press(Key::Right),
            60 => {
                world.input.press(Key::Jump);
                world.component_mut::<AudioSource>(player).play_requested = true;
            }
            90 => world.input.release(Key::Right),
            150 => world.input.press(Key::Left),
            330 => {
                world.input.release(Key::Left);
                world.component_mut::<Velocity>(player).0.x = 0.0;
            }
            _ => {}
        }

        movement.update(&mut world, DT);
        collision.update(&mut world, DT);
        animation.update(&mut world, DT);
        render.update(&mut world, DT);
        audio.update(&mut world, DT);
        world.input.begin_frame();

        if frame % 60 == 59 {
            let position = world.component::<Transform>(player).position;
            let velocity = world.component::<Velocity>(player).0;
            let grounded = world.component::<Physics>(player).is_grounded;
            println!(
                "t = {:.0} s: x = {:6.2}, y = {:5.2}, vx = {:5.2}, vy = {:5.2}, grounded = {grounded}",
                (frame + 1) as f32 * DT,
                position.x,
                position.y,
                velocity.x,
                velocity.y
            );
        }
    }

    let proximity = world.component::<Proximity>(player);
    println!("\nPlayer neighbors: below = {:?}, right = {:?}", proximity.below, proximity.right);

    let frames = render.backend().frames();
    println!("Rendered {} frames", frames.len());
    if let Some(frame) = render.backend().last_frame() {
        println!("Final frame draws, back to front:");
        for draw in frame {
            println!(
                "  {:8} layer {:2} at ({:6.2}, {:5.2}) frame {}",
                draw.texture, draw.layer, draw.position.x, draw.position.y, draw.frame_index
            );
        }
    }

    println!("Audio commands forwarded: {:?}", audio.sink().commands());
}
