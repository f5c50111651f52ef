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
//! Keyboard input state
//!
//! The host application feeds key transitions in; gameplay systems read
//! level and edge state out. [`InputState::begin_frame`] marks the frame
//! boundary: edge state (`was_pressed`, `was_released`) lives for exactly
//! one frame, level state (`is_held`) persists until the key is released.

use std::collections::HashSet;

/// Logical keys the engine reacts to
///
/// The host maps physical scancodes to these before feeding the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move left
    Left,
    /// Move right
    Right,
    /// Aim or climb up
    Up,
    /// Aim or crouch down
    Down,
    /// Jump
    Jump,
    /// Context action (mine, interact)
    Action,
    /// Pause toggle
    Pause,
}

/// Per-frame keyboard state
///
/// Pressing an already-held key is a no-op, so host key-repeat events do
/// not produce spurious edges.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    /// Create a state with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down transition from the host
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Record a key-up transition from the host
    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Clear edge state at the start of a frame, before host events
    pub fn begin_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Whether a key is currently down
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Whether a key went down since the last `begin_frame`
    pub fn was_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Whether a key went up since the last `begin_frame`
    pub fn was_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Drop all held keys and edges
    pub fn clear(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
