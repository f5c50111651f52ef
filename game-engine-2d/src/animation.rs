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
//! Sprite sheet animation stepping

use crate::ecs::{Animation, Signature, Sprite, System, World};

/// Advances animations and publishes the current frame to sprites
///
/// Each playing animation accumulates elapsed time and steps one frame
/// per elapsed `frame_time`, so a large delta advances several frames in
/// one update. Looping animations wrap to frame zero; one-shot
/// animations freeze on their last frame and stop playing.
pub struct AnimationSystem {
    signature: Signature,
}

impl AnimationSystem {
    /// Create the system, registering the component types it drives
    pub fn new(world: &mut World) -> Self {
        let animation = world.register_component::<Animation>();
        let sprite = world.register_component::<Sprite>();
        AnimationSystem {
            signature: Signature::EMPTY.with(animation).with(sprite),
        }
    }
}

impl System for AnimationSystem {
    fn signature(&self) -> Signature {
        self.signature
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        for entity in world.matching(self.signature) {
            let mut animation = *world.component::<Animation>(entity);
            if !animation.playing {
                continue;
            }

            animation.elapsed += delta_time;
            while animation.elapsed >= animation.frame_time {
                animation.elapsed -= animation.frame_time;
                animation.frame += 1;
                if animation.frame >= animation.frame_count {
                    if animation.looping {
                        animation.frame = 0;
                    } else {
                        animation.frame = animation.frame_count - 1;
                        animation.playing = false;
                        animation.elapsed = 0.0;
                        break;
                    }
                }
            }

            *world.component_mut::<Animation>(entity) = animation;
            world.component_mut::<Sprite>(entity).frame_index = animation.frame;
        }
    }
}
