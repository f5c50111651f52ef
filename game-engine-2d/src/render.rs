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
//! Sprite collection and layer-ordered submission
//!
//! The engine itself never talks to a window or a GPU. [`RenderSystem`]
//! gathers every visible sprite into [`SpriteDraw`] commands, orders them
//! by layer, and hands them to a [`RenderBackend`] implementation. The
//! backend is where a host application plugs in its actual drawing code;
//! [`RecordingBackend`] captures frames for tests and headless runs.

use crate::ecs::{EntityId, Signature, Sprite, System, Transform, World};
use crate::math::Vec2;

/// One sprite ready to be drawn this frame
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    /// Entity the sprite belongs to
    pub entity: EntityId,
    /// Texture identifier, resolved by the backend
    pub texture: String,
    /// World-space position of the sprite center
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Per-axis scale applied to the sprite extents
    pub scale: Vec2,
    /// Unscaled sprite width in world units
    pub width: f32,
    /// Unscaled sprite height in world units
    pub height: f32,
    /// Draw layer; lower layers are submitted first
    pub layer: i32,
    /// Frame within the sprite sheet
    pub frame_index: usize,
}

/// Receiver for the frame's ordered draw commands
pub trait RenderBackend {
    /// Called once before the frame's draws are submitted
    fn begin_frame(&mut self);

    /// Called once per sprite, in back-to-front layer order
    fn draw(&mut self, command: &SpriteDraw);

    /// Called once after the last draw of the frame
    fn end_frame(&mut self);
}

/// Collects sprites and submits them to the backend in layer order
///
/// Draws are sorted by layer, then by entity id so entities on the same
/// layer keep a stable order from frame to frame.
pub struct RenderSystem<B: RenderBackend> {
    signature: Signature,
    backend: B,
    queue: Vec<SpriteDraw>,
}

impl<B: RenderBackend> RenderSystem<B> {
    /// Create the system around the backend that will receive draws
    pub fn new(world: &mut World, backend: B) -> Self {
        let transform = world.register_component::<Transform>();
        let sprite = world.register_component::<Sprite>();
        RenderSystem {
            signature: Signature::EMPTY.with(transform).with(sprite),
            backend,
            queue: Vec::new(),
        }
    }

    /// Access the backend, typically to read back recorded frames
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: RenderBackend + Send + Sync> System for RenderSystem<B> {
    fn signature(&self) -> Signature {
        self.signature
    }

    fn update(&mut self, world: &mut World, _delta_time: f32) {
        self.queue.clear();
        for entity in world.matching(self.signature) {
            let transform = world.component::<Transform>(entity);
            let sprite = world.component::<Sprite>(entity);
            self.queue.push(SpriteDraw {
                entity,
                texture: sprite.texture.clone(),
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
                width: sprite.width,
                height: sprite.height,
                layer: sprite.layer,
                frame_index: sprite.frame_index,
            });
        }
        self.queue.sort_by_key(|draw| (draw.layer, draw.entity));

        log::trace!("render pass: {} sprites", self.queue.len());

        self.backend.begin_frame();
        for draw in &self.queue {
            self.backend.draw(draw);
        }
        self.backend.end_frame();
    }
}

/// Backend that stores every submitted frame instead of drawing it
#[derive(Debug, Default)]
pub struct RecordingBackend {
    frames: Vec<Vec<SpriteDraw>>,
    current: Vec<SpriteDraw>,
}

impl RecordingBackend {
    /// New backend with no recorded frames
    pub fn new() -> Self {
        RecordingBackend::default()
    }

    /// All completed frames, oldest first
    pub fn frames(&self) -> &[Vec<SpriteDraw>] {
        &self.frames
    }

    /// The most recently completed frame, if any
    pub fn last_frame(&self) -> Option<&[SpriteDraw]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw(&mut self, command: &SpriteDraw) {
        self.current.push(command.clone());
    }

    fn end_frame(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_system(world: &mut World) -> RenderSystem<RecordingBackend> {
        RenderSystem::new(world, RecordingBackend::new())
    }

    #[test]
    fn test_draws_sorted_by_layer() {
        let mut world = World::new();
        let mut system = recording_system(&mut world);

        let front = world.create_entity();
        world.add_component(front, Transform::new(Vec2::new(1.0, 0.0)));
        world.add_component(front, Sprite::new("front", 1.0, 1.0).with_layer(5));

        let back = world.create_entity();
        world.add_component(back, Transform::new(Vec2::new(2.0, 0.0)));
        world.add_component(back, Sprite::new("back", 1.0, 1.0).with_layer(-1));

        system.update(&mut world, 0.0);

        let frames = system.backend().frames();
        assert_eq!(frames.len(), 1);
        let textures: Vec<&str> = frames[0].iter().map(|d| d.texture.as_str()).collect();
        assert_eq!(textures, ["back", "front"]);
    }

    #[test]
    fn test_same_layer_orders_by_entity() {
        let mut world = World::new();
        let mut system = recording_system(&mut world);

        let first = world.create_entity();
        world.add_component(first, Transform::new(Vec2::ZERO));
        world.add_component(first, Sprite::new("first", 1.0, 1.0));

        let second = world.create_entity();
        world.add_component(second, Transform::new(Vec2::ZERO));
        world.add_component(second, Sprite::new("second", 1.0, 1.0));

        system.update(&mut world, 0.0);

        let frames = system.backend().frames();
        let entities: Vec<EntityId> = frames[0].iter().map(|d| d.entity).collect();
        assert_eq!(entities, [first, second]);
    }

    #[test]
    fn test_draw_carries_transform_state() {
        let mut world = World::new();
        let mut system = recording_system(&mut world);

        let entity = world.create_entity();
        world.add_component(
            entity,
            Transform::new(Vec2::new(3.0, 4.0))
                .with_rotation(1.5)
                .with_scale(Vec2::new(2.0, 2.0)),
        );
        let mut sprite = Sprite::new("hero", 1.0, 2.0);
        sprite.frame_index = 7;
        world.add_component(entity, sprite);

        system.update(&mut world, 0.0);

        let draw = &system.backend().frames()[0][0];
        assert_eq!(draw.position, Vec2::new(3.0, 4.0));
        assert_eq!(draw.rotation, 1.5);
        assert_eq!(draw.scale, Vec2::new(2.0, 2.0));
        assert_eq!(draw.frame_index, 7);
    }

    #[test]
    fn test_each_update_records_one_frame() {
        let mut world = World::new();
        let mut system = recording_system(&mut world);

        let entity = world.create_entity();
        world.add_component(entity, Transform::new(Vec2::ZERO));
        world.add_component(entity, Sprite::new("tile", 1.0, 1.0));

        system.update(&mut world, 0.0);
        system.update(&mut world, 0.0);

        assert_eq!(system.backend().frames().len(), 2);
        assert_eq!(system.backend().frames()[1].len(), 1);
    }

    #[test]
    fn test_entities_without_sprites_are_skipped() {
        let mut world = World::new();
        let mut system = recording_system(&mut world);

        let bare = world.create_entity();
        world.add_component(bare, Transform::new(Vec2::ZERO));

        system.update(&mut world, 0.0);
        assert!(system.backend().frames()[0].is_empty());
    }
}
