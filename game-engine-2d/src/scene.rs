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
//! Scene loading from JSON documents
//!
//! A scene document declares entities as named bags of component records.
//! [`load_scene`] parses the whole document and validates every record
//! before it spawns anything, so a scene that fails to load leaves the
//! world untouched. Unknown component names are skipped with a warning,
//! which lets documents carry editor-only data; a record that names a
//! known component but does not match its shape is an error.

use semver::Version;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::ecs::{
    Animation, AudioSource, BoxCollider, EntityId, InputControlled, Physics, Proximity, Sprite,
    Transform, Velocity, World,
};
use crate::math::Vec2;

/// Newest scene format version this engine reads
pub const SCENE_FORMAT_VERSION: &str = "1.0.0";

/// Reasons a scene document can fail to load
#[derive(Debug)]
pub enum SceneError {
    /// The document is not valid JSON or not shaped like a scene
    Parse(serde_json::Error),
    /// The document's format version is incompatible with this engine
    UnsupportedVersion {
        /// Version string the document declared
        found: String,
        /// Version this engine supports
        supported: &'static str,
    },
    /// A component record named a known component but its data is invalid
    BadComponent {
        /// Declared entity name, or its index when unnamed
        entity: String,
        /// Component record name
        component: String,
        /// What was wrong with the record
        reason: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Parse(err) => write!(f, "scene document is not valid JSON: {err}"),
            SceneError::UnsupportedVersion { found, supported } => write!(
                f,
                "scene format version {found} is not supported (this engine reads {supported})"
            ),
            SceneError::BadComponent {
                entity,
                component,
                reason,
            } => write!(f, "scene {entity}: bad {component} component: {reason}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Parse(err)
    }
}

/// Check whether a document's format version can be read by this engine
///
/// Uses semantic versioning rules:
/// - Major version must match
/// - For major version 0.x.y, minor versions must match (breaking changes)
/// - For major version >= 1, document minor must be less than or equal
/// - Patch version is ignored
fn is_version_compatible(document_version: &str, engine_version: &str) -> bool {
    let document = match Version::parse(document_version) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let engine = match Version::parse(engine_version) {
        Ok(v) => v,
        Err(_) => return false,
    };

    if document.major != engine.major {
        return false;
    }

    if document.major != 0 {
        document.minor <= engine.minor
    } else {
        document.minor == engine.minor
    }
}

#[derive(Deserialize)]
struct SceneDoc {
    version: String,
    #[serde(default)]
    entities: Vec<EntityDecl>,
}

#[derive(Deserialize)]
struct EntityDecl {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    components: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(default)]
struct TransformDecl {
    position: Vec2,
    rotation: f32,
    angular_velocity: f32,
    scale: Vec2,
}

impl Default for TransformDecl {
    fn default() -> Self {
        TransformDecl {
            position: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct PhysicsDecl {
    mass: f32,
    gravity: Option<Vec2>,
    damping: Option<f32>,
    max_velocity: Option<f32>,
    jump_force: f32,
    is_static: bool,
}

impl Default for PhysicsDecl {
    fn default() -> Self {
        PhysicsDecl {
            mass: 1.0,
            gravity: None,
            damping: None,
            max_velocity: None,
            jump_force: 0.0,
            is_static: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct ColliderDecl {
    width: f32,
    height: f32,
    collidable: bool,
}

impl Default for ColliderDecl {
    fn default() -> Self {
        ColliderDecl {
            width: 1.0,
            height: 1.0,
            collidable: true,
        }
    }
}

#[derive(Deserialize)]
struct SpriteDecl {
    texture: String,
    #[serde(default = "default_extent")]
    width: f32,
    #[serde(default = "default_extent")]
    height: f32,
    #[serde(default)]
    layer: i32,
}

#[derive(Deserialize)]
struct AnimationDecl {
    frame_count: usize,
    frame_time: f32,
    #[serde(default = "default_true")]
    looping: bool,
    #[serde(default = "default_true")]
    playing: bool,
}

#[derive(Deserialize)]
struct AudioDecl {
    clip: String,
    #[serde(default)]
    looped: bool,
}

#[derive(Deserialize)]
#[serde(default)]
struct InputDecl {
    move_speed: f32,
}

impl Default for InputDecl {
    fn default() -> Self {
        InputDecl { move_speed: 5.0 }
    }
}

fn default_extent() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Every component a single scene entity declared, decoded and validated
#[derive(Default)]
struct DecodedEntity {
    transform: Option<Transform>,
    velocity: Option<Velocity>,
    physics: Option<Physics>,
    collider: Option<BoxCollider>,
    sprite: Option<Sprite>,
    animation: Option<Animation>,
    audio: Option<AudioSource>,
    input: Option<InputControlled>,
    proximity: bool,
}

impl DecodedEntity {
    fn attach(self, world: &mut World, entity: EntityId) {
        if let Some(transform) = self.transform {
            world.add_component(entity, transform);
        }
        if let Some(velocity) = self.velocity {
            world.add_component(entity, velocity);
        }
        if let Some(physics) = self.physics {
            world.add_component(entity, physics);
        }
        if let Some(collider) = self.collider {
            world.add_component(entity, collider);
        }
        if let Some(sprite) = self.sprite {
            world.add_component(entity, sprite);
        }
        if let Some(animation) = self.animation {
            world.add_component(entity, animation);
        }
        if let Some(audio) = self.audio {
            world.add_component(entity, audio);
        }
        if let Some(input) = self.input {
            world.add_component(entity, input);
        }
        if self.proximity {
            world.add_component(entity, Proximity::new());
        }
    }
}

/// Spawn every entity a scene document declares
///
/// Returns the spawned entity ids in declaration order. All component
/// types the format knows are registered as a side effect, so a scene can
/// be loaded into a fresh world before any system exists.
///
/// # Errors
///
/// [`SceneError::Parse`] when the document is not a JSON scene,
/// [`SceneError::UnsupportedVersion`] when its format version is
/// incompatible, and [`SceneError::BadComponent`] when a component record
/// fails to decode or validate. On error the world is left unchanged.
pub fn load_scene(world: &mut World, json: &str) -> Result<Vec<EntityId>, SceneError> {
    let doc: SceneDoc = serde_json::from_str(json)?;
    if !is_version_compatible(&doc.version, SCENE_FORMAT_VERSION) {
        return Err(SceneError::UnsupportedVersion {
            found: doc.version,
            supported: SCENE_FORMAT_VERSION,
        });
    }

    // Decode everything up front; spawning starts only once the whole
    // document is known to be valid.
    let mut decoded = Vec::with_capacity(doc.entities.len());
    for (index, decl) in doc.entities.iter().enumerate() {
        decoded.push(decode_entity(index, decl)?);
    }

    register_scene_components(world);

    let mut spawned = Vec::with_capacity(decoded.len());
    for components in decoded {
        let entity = world.create_entity();
        components.attach(world, entity);
        spawned.push(entity);
    }
    log::debug!("scene loaded: {} entities", spawned.len());
    Ok(spawned)
}

fn register_scene_components(world: &mut World) {
    world.register_component::<Transform>();
    world.register_component::<Velocity>();
    world.register_component::<Physics>();
    world.register_component::<BoxCollider>();
    world.register_component::<Sprite>();
    world.register_component::<Animation>();
    world.register_component::<AudioSource>();
    world.register_component::<InputControlled>();
    world.register_component::<Proximity>();
}

fn decode_entity(index: usize, decl: &EntityDecl) -> Result<DecodedEntity, SceneError> {
    let label = decl
        .name
        .clone()
        .unwrap_or_else(|| format!("entity {index}"));
    let mut decoded = DecodedEntity::default();
    for (component, value) in &decl.components {
        match component.as_str() {
            "transform" => decoded.transform = Some(decode_transform(&label, value)?),
            "velocity" => decoded.velocity = Some(decode_velocity(&label, value)?),
            "physics" => decoded.physics = Some(decode_physics(&label, value)?),
            "collider" => decoded.collider = Some(decode_collider(&label, value)?),
            "sprite" => decoded.sprite = Some(decode_sprite(&label, value)?),
            "animation" => decoded.animation = Some(decode_animation(&label, value)?),
            "audio" => decoded.audio = Some(decode_audio(&label, value)?),
            "input" => decoded.input = Some(decode_input(&label, value)?),
            "proximity" => decoded.proximity = true,
            unknown => {
                log::warn!("scene {label}: unknown component {unknown:?} skipped");
            }
        }
    }
    Ok(decoded)
}

fn decode<T: DeserializeOwned>(
    label: &str,
    component: &str,
    value: &Value,
) -> Result<T, SceneError> {
    serde_json::from_value(value.clone()).map_err(|err| SceneError::BadComponent {
        entity: label.to_owned(),
        component: component.to_owned(),
        reason: err.to_string(),
    })
}

fn bad(label: &str, component: &str, reason: String) -> SceneError {
    SceneError::BadComponent {
        entity: label.to_owned(),
        component: component.to_owned(),
        reason,
    }
}

fn decode_transform(label: &str, value: &Value) -> Result<Transform, SceneError> {
    let decl: TransformDecl = decode(label, "transform", value)?;
    if !decl.position.is_valid()
        || !decl.scale.is_valid()
        || !decl.rotation.is_finite()
        || !decl.angular_velocity.is_finite()
    {
        return Err(bad(label, "transform", "fields must be finite".to_owned()));
    }
    let mut transform = Transform::new(decl.position)
        .with_rotation(decl.rotation)
        .with_scale(decl.scale);
    transform.angular_velocity = decl.angular_velocity;
    Ok(transform)
}

fn decode_velocity(label: &str, value: &Value) -> Result<Velocity, SceneError> {
    let linear: Vec2 = decode(label, "velocity", value)?;
    if !linear.is_valid() {
        return Err(bad(label, "velocity", "components must be finite".to_owned()));
    }
    Ok(Velocity(linear))
}

fn decode_physics(label: &str, value: &Value) -> Result<Physics, SceneError> {
    let decl: PhysicsDecl = decode(label, "physics", value)?;
    if !decl.mass.is_finite() || decl.mass < 0.0 {
        return Err(bad(
            label,
            "physics",
            format!("mass must be non-negative and finite, got {}", decl.mass),
        ));
    }
    let mut physics = if decl.is_static {
        Physics::immovable()
    } else {
        Physics::new(decl.mass)
    };
    if let Some(gravity) = decl.gravity {
        if !gravity.is_valid() {
            return Err(bad(label, "physics", "gravity must be finite".to_owned()));
        }
        physics = physics.with_gravity(gravity);
    }
    if let Some(damping) = decl.damping {
        if !damping.is_finite() {
            return Err(bad(label, "physics", "damping must be finite".to_owned()));
        }
        physics = physics.with_damping(damping);
    }
    if let Some(max_velocity) = decl.max_velocity {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return Err(bad(
                label,
                "physics",
                format!("max_velocity must be positive and finite, got {max_velocity}"),
            ));
        }
        physics = physics.with_max_velocity(max_velocity);
    }
    if !decl.jump_force.is_finite() {
        return Err(bad(label, "physics", "jump_force must be finite".to_owned()));
    }
    Ok(physics.with_jump_force(decl.jump_force))
}

fn decode_collider(label: &str, value: &Value) -> Result<BoxCollider, SceneError> {
    let decl: ColliderDecl = decode(label, "collider", value)?;
    let valid_extents =
        decl.width.is_finite() && decl.width > 0.0 && decl.height.is_finite() && decl.height > 0.0;
    if !valid_extents {
        return Err(bad(
            label,
            "collider",
            format!(
                "extents must be positive and finite, got {}x{}",
                decl.width, decl.height
            ),
        ));
    }
    if decl.collidable {
        Ok(BoxCollider::new(decl.width, decl.height))
    } else {
        Ok(BoxCollider::sensor(decl.width, decl.height))
    }
}

fn decode_sprite(label: &str, value: &Value) -> Result<Sprite, SceneError> {
    let decl: SpriteDecl = decode(label, "sprite", value)?;
    if !decl.width.is_finite() || !decl.height.is_finite() {
        return Err(bad(label, "sprite", "extents must be finite".to_owned()));
    }
    Ok(Sprite::new(decl.texture, decl.width, decl.height).with_layer(decl.layer))
}

fn decode_animation(label: &str, value: &Value) -> Result<Animation, SceneError> {
    let decl: AnimationDecl = decode(label, "animation", value)?;
    if decl.frame_count == 0 {
        return Err(bad(
            label,
            "animation",
            "frame_count must be at least 1".to_owned(),
        ));
    }
    if !decl.frame_time.is_finite() || decl.frame_time <= 0.0 {
        return Err(bad(
            label,
            "animation",
            format!("frame_time must be positive and finite, got {}", decl.frame_time),
        ));
    }
    let mut animation = Animation::new(decl.frame_count, decl.frame_time);
    if !decl.looping {
        animation = animation.once();
    }
    animation.playing = decl.playing;
    Ok(animation)
}

fn decode_audio(label: &str, value: &Value) -> Result<AudioSource, SceneError> {
    let decl: AudioDecl = decode(label, "audio", value)?;
    let mut source = AudioSource::new(decl.clip);
    source.looped = decl.looped;
    Ok(source)
}

fn decode_input(label: &str, value: &Value) -> Result<InputControlled, SceneError> {
    let decl: InputDecl = decode(label, "input", value)?;
    if !decl.move_speed.is_finite() || decl.move_speed < 0.0 {
        return Err(bad(
            label,
            "input",
            format!("move_speed must be non-negative and finite, got {}", decl.move_speed),
        ));
    }
    Ok(InputControlled::new(decl.move_speed))
}
