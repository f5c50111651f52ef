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
//! Benchmarks for collision detection
//!
//! These benchmarks measure:
//! - The swept AABB test on single pairs
//! - A whole collision pass (contact sweep, resolution, proximity) as
//!   the number of dynamic bodies grows

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use game_engine_2d::collision::{classify_side, sweep_rect_rect, Aabb, CollisionSystem};
use game_engine_2d::ecs::{BoxCollider, Physics, System, Transform, Velocity, World};
use game_engine_2d::math::Vec2;
use game_engine_2d::physics::PhysicsConfig;

/// World with a tile floor and `bodies` falling boxes just above it
fn arena(bodies: usize) -> (World, CollisionSystem) {
    let mut world = World::new();
    let system = CollisionSystem::new(&mut world, PhysicsConfig::default());

    let tiles = (bodies as f32 * 1.5).ceil() as usize + 2;
    for i in 0..tiles {
        let tile = world.create_entity();
        world.add_component(tile, Transform::new(Vec2::new(i as f32, 0.0)));
        world.add_component(tile, Physics::immovable());
        world.add_component(tile, BoxCollider::new(1.0, 1.0));
    }

    for i in 0..bodies {
        let body = world.create_entity();
        world.add_component(body, Transform::new(Vec2::new(i as f32 * 1.5, 1.02)));
        world.add_component(body, Velocity::new(0.0, -2.0));
        world.add_component(body, Physics::new(1.0));
        world.add_component(body, BoxCollider::new(1.0, 1.0));
    }

    (world, system)
}

/// Benchmark: Single-pair swept tests
fn bench_swept_aabb(c: &mut Criterion) {
    let mut group = c.benchmark_group("swept_aabb");
    let half = Vec2::new(0.5, 0.5);

    group.bench_function("approaching", |b| {
        let first = Aabb::from_center(Vec2::ZERO, half);
        let second = Aabb::from_center(Vec2::new(3.0, 0.0), half);
        b.iter(|| {
            black_box(sweep_rect_rect(
                black_box(&first),
                black_box(&second),
                Vec2::new(10.0, 0.0),
                1.0,
            ))
        });
    });

    group.bench_function("overlapping", |b| {
        let first = Aabb::from_center(Vec2::ZERO, half);
        let second = Aabb::from_center(Vec2::new(0.2, 0.1), half);
        b.iter(|| {
            black_box(sweep_rect_rect(
                black_box(&first),
                black_box(&second),
                Vec2::new(-1.0, 0.0),
                1.0,
            ))
        });
    });

    group.bench_function("separated", |b| {
        let first = Aabb::from_center(Vec2::ZERO, half);
        let second = Aabb::from_center(Vec2::new(5.0, 5.0), half);
        b.iter(|| {
            black_box(sweep_rect_rect(
                black_box(&first),
                black_box(&second),
                Vec2::new(-1.0, 0.0),
                1.0,
            ))
        });
    });

    group.bench_function("classify", |b| {
        let first = Aabb::from_center(Vec2::new(0.0, 0.95), half);
        let second = Aabb::from_center(Vec2::ZERO, half);
        b.iter(|| black_box(classify_side(black_box(&first), black_box(&second))));
    });

    group.finish();
}

/// Benchmark: One full collision pass over a populated arena
fn bench_collision_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_pass");

    for body_count in [16, 64, 256].iter() {
        group.throughput(Throughput::Elements(*body_count as u64));

        group.bench_with_input(
            BenchmarkId::new("update", body_count),
            body_count,
            |b, &count| {
                b.iter_batched(
                    || arena(count),
                    |(mut world, mut system)| {
                        system.update(&mut world, 1.0 / 60.0);
                        black_box(system.events().len());
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(collision_benches, bench_swept_aabb, bench_collision_pass);
criterion_main!(collision_benches);
