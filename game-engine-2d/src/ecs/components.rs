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
//! Gameplay component types
//!
//! Plain data attached to entities and mutated in place by systems each
//! frame. The movement system owns velocity and position integration; the
//! collision system owns grounding, gravity suppression, and contact
//! response; the animation, render, and audio systems read what they need.

use crate::ecs::component::Component;
use crate::ecs::entity::EntityId;
use crate::math::Vec2;

/// Spatial state of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World position of the entity's center
    pub position: Vec2,
    /// Position before the current frame's integration step
    ///
    /// Collision sweeps anchor their AABBs here, keeping the test tied to
    /// the start-of-step location.
    pub prev_position: Vec2,
    /// Orientation angle in radians
    pub rotation: f32,
    /// Angular rate in radians per second
    pub angular_velocity: f32,
    /// Per-axis scale
    pub scale: Vec2,
}

impl Transform {
    /// Create a transform at a position with unit scale and no rotation
    pub fn new(position: Vec2) -> Self {
        Transform {
            position,
            prev_position: position,
            rotation: 0.0,
            angular_velocity: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Builder-style scale override
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style rotation override, in radians
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Component for Transform {}

/// Linear velocity in world units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// A velocity at rest
    pub const ZERO: Velocity = Velocity(Vec2::ZERO);

    /// Create a velocity from components
    pub fn new(x: f32, y: f32) -> Self {
        Velocity(Vec2::new(x, y))
    }
}

impl Component for Velocity {}

/// Physical state for integration
///
/// Mass and max velocity keep derived values (inverse mass, squared max)
/// in sync behind setters; everything else is free to mutate directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    mass: f32,
    inverse_mass: f32,
    /// Per-entity gravity vector
    ///
    /// The collision pass zeroes this while the entity is grounded and
    /// restores the default when the bottom contact is lost.
    pub gravity: Vec2,
    /// Multiplicative velocity decay applied every integration step
    pub damping: f32,
    max_velocity: f32,
    max_velocity_squared: f32,
    /// Force accumulated this step, cleared after integration
    pub force: Vec2,
    /// Static bodies are never integrated and never receive impulses
    pub is_static: bool,
    /// True iff the latest collision pass saw a bottom contact
    pub is_grounded: bool,
    /// Set when a jump impulse fires; only a bottom contact clears it
    pub has_jumped: bool,
    /// Magnitude of the jump impulse, scaled by mass when applied
    pub jump_force: f32,
}

impl Physics {
    /// Gravity applied to bodies that do not override it
    pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

    /// Bodies with mass below this use inverse mass 0 (cannot be pushed)
    pub const IMMOVABLE_THRESHOLD: f32 = 1e-8;

    /// Create a dynamic body
    ///
    /// # Panics
    /// Panics if mass is negative, NaN, or infinite.
    pub fn new(mass: f32) -> Self {
        assert!(
            mass >= 0.0 && mass.is_finite(),
            "Mass must be non-negative and finite, got: {}",
            mass
        );
        Physics {
            mass,
            inverse_mass: Self::inverse_of(mass),
            gravity: Self::DEFAULT_GRAVITY,
            damping: 0.99,
            max_velocity: 50.0,
            max_velocity_squared: 2500.0,
            force: Vec2::ZERO,
            is_static: false,
            is_grounded: false,
            has_jumped: false,
            jump_force: 0.0,
        }
    }

    /// Create a static body that never moves or falls
    pub fn immovable() -> Self {
        Physics {
            mass: 0.0,
            inverse_mass: 0.0,
            gravity: Vec2::ZERO,
            damping: 1.0,
            max_velocity: 0.0,
            max_velocity_squared: 0.0,
            force: Vec2::ZERO,
            is_static: true,
            is_grounded: false,
            has_jumped: false,
            jump_force: 0.0,
        }
    }

    fn inverse_of(mass: f32) -> f32 {
        if mass < Self::IMMOVABLE_THRESHOLD {
            0.0
        } else {
            1.0 / mass
        }
    }

    /// The body's mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// The body's inverse mass; 0 for immovable bodies
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Set the mass, keeping the inverse in sync
    ///
    /// # Panics
    /// Panics if mass is negative, NaN, or infinite.
    pub fn set_mass(&mut self, mass: f32) {
        assert!(
            mass >= 0.0 && mass.is_finite(),
            "Mass must be non-negative and finite, got: {}",
            mass
        );
        self.mass = mass;
        self.inverse_mass = Self::inverse_of(mass);
    }

    /// The speed cap applied after integration
    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// The squared speed cap, for cheap clamping
    pub fn max_velocity_squared(&self) -> f32 {
        self.max_velocity_squared
    }

    /// Set the speed cap, keeping the squared value in sync
    ///
    /// # Panics
    /// Panics if the cap is not positive and finite.
    pub fn set_max_velocity(&mut self, max_velocity: f32) {
        assert!(
            max_velocity > 0.0 && max_velocity.is_finite(),
            "Max velocity must be positive and finite, got: {}",
            max_velocity
        );
        self.max_velocity = max_velocity;
        self.max_velocity_squared = max_velocity * max_velocity;
    }

    /// Builder-style gravity override
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder-style damping override
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Builder-style speed cap override
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.set_max_velocity(max_velocity);
        self
    }

    /// Builder-style jump force override
    pub fn with_jump_force(mut self, jump_force: f32) -> Self {
        self.jump_force = jump_force;
        self
    }
}

impl Component for Physics {}

/// Axis-aligned collision shape centered on the entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Full width of the box in world units
    pub width: f32,
    /// Full height of the box in world units
    pub height: f32,
    /// Non-collidable shapes are sensor zones: they are swept and
    /// classified like any other box but never block or receive impulses
    pub collidable: bool,
}

impl BoxCollider {
    /// Create a blocking collider
    ///
    /// # Panics
    /// Panics if either extent is not positive and finite.
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite(),
            "Collider extents must be positive and finite, got: {}x{}",
            width,
            height
        );
        BoxCollider {
            width,
            height,
            collidable: true,
        }
    }

    /// Create a sensor collider that detects but never blocks
    pub fn sensor(width: f32, height: f32) -> Self {
        let mut collider = Self::new(width, height);
        collider.collidable = false;
        collider
    }

    /// Half extents as a vector
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Component for BoxCollider {}

/// Drawable sprite state consumed by the render system
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Texture key resolved by the render backend
    pub texture: String,
    /// Draw width in world units
    pub width: f32,
    /// Draw height in world units
    pub height: f32,
    /// Draw order; higher layers draw on top
    pub layer: i32,
    /// Frame index within the texture's sheet, driven by animation
    pub frame_index: usize,
}

impl Sprite {
    /// Create a sprite on layer 0 showing frame 0
    pub fn new(texture: impl Into<String>, width: f32, height: f32) -> Self {
        Sprite {
            texture: texture.into(),
            width,
            height,
            layer: 0,
            frame_index: 0,
        }
    }

    /// Builder-style layer override
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }
}

impl Component for Sprite {}

/// Frame-stepped animation over a sprite sheet row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Number of frames in the sheet row
    pub frame_count: usize,
    /// Seconds each frame is shown
    pub frame_time: f32,
    /// Time accumulated toward the next frame step
    pub elapsed: f32,
    /// Current frame index
    pub frame: usize,
    /// Wrap to frame 0 after the last frame instead of freezing
    pub looping: bool,
    /// Paused animations keep their current frame
    pub playing: bool,
}

impl Animation {
    /// Create a looping animation starting at frame 0
    ///
    /// # Panics
    /// Panics if the frame count is zero or the frame time is not
    /// positive and finite.
    pub fn new(frame_count: usize, frame_time: f32) -> Self {
        assert!(frame_count > 0, "Animation needs at least one frame");
        assert!(
            frame_time > 0.0 && frame_time.is_finite(),
            "Frame time must be positive and finite, got: {}",
            frame_time
        );
        Animation {
            frame_count,
            frame_time,
            elapsed: 0.0,
            frame: 0,
            looping: true,
            playing: true,
        }
    }

    /// Builder-style one-shot variant that freezes on the last frame
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }
}

impl Component for Animation {}

/// Playback requests consumed by the audio system
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSource {
    /// Clip key resolved by the audio sink
    pub clip: String,
    /// Whether playback should loop
    pub looped: bool,
    /// One-shot request flag; the audio system clears it after forwarding
    pub play_requested: bool,
    /// One-shot stop flag; the audio system clears it after forwarding
    pub stop_requested: bool,
}

impl AudioSource {
    /// Create a silent source for a clip
    pub fn new(clip: impl Into<String>) -> Self {
        AudioSource {
            clip: clip.into(),
            looped: false,
            play_requested: false,
            stop_requested: false,
        }
    }

    /// Request playback on the next audio update
    pub fn play(&mut self) {
        self.play_requested = true;
    }

    /// Request a stop on the next audio update
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }
}

impl Component for AudioSource {}

/// Marks an entity as driven by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputControlled {
    /// Horizontal speed applied directly while a move key is held
    pub move_speed: f32,
}

impl InputControlled {
    /// Create a control component with the given move speed
    pub fn new(move_speed: f32) -> Self {
        InputControlled { move_speed }
    }
}

impl Component for InputControlled {}

/// Per-frame neighbor cache filled by the collision pass
///
/// Entities carrying this component get the four fields refilled every
/// pass from the spatial grid; gameplay reads them for mining and
/// interaction checks. A field is `None` when nothing touches the probe
/// box in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Proximity {
    /// Nearest collidable entity immediately to the left
    pub left: Option<EntityId>,
    /// Nearest collidable entity immediately to the right
    pub right: Option<EntityId>,
    /// Nearest collidable entity immediately above
    pub above: Option<EntityId>,
    /// Nearest collidable entity immediately below
    pub below: Option<EntityId>,
}

impl Proximity {
    /// Create an empty neighbor cache
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for Proximity {}
