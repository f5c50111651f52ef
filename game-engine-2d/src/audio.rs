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
//! Audio request forwarding
//!
//! Gameplay code asks for sound by flagging an [`AudioSource`] component;
//! [`AudioSystem`] drains those flags each frame and forwards them to an
//! [`AudioSink`]. Like rendering, actual playback belongs to the host
//! application; [`RecordingSink`] captures the command stream for tests.

use crate::ecs::{AudioSource, Signature, System, World};

/// Receiver for playback commands
pub trait AudioSink {
    /// Start playing a clip; `looped` clips repeat until stopped
    fn play(&mut self, clip: &str, looped: bool);

    /// Stop a playing clip; unknown clips are ignored
    fn stop(&mut self, clip: &str);
}

/// Drains play and stop requests into the sink
///
/// Requests are one-shot: each flag is cleared as soon as it is
/// forwarded, so setting `play_requested` fires exactly once no matter
/// how many frames pass before the next request.
pub struct AudioSystem<S: AudioSink> {
    signature: Signature,
    sink: S,
}

impl<S: AudioSink> AudioSystem<S> {
    /// Create the system around the sink that will receive commands
    pub fn new(world: &mut World, sink: S) -> Self {
        let audio = world.register_component::<AudioSource>();
        AudioSystem {
            signature: Signature::EMPTY.with(audio),
            sink,
        }
    }

    /// Access the sink, typically to read back recorded commands
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: AudioSink + Send + Sync> System for AudioSystem<S> {
    fn signature(&self) -> Signature {
        self.signature
    }

    fn update(&mut self, world: &mut World, _delta_time: f32) {
        for entity in world.matching(self.signature) {
            let source = world.component_mut::<AudioSource>(entity);
            let play = source.play_requested;
            let stop = source.stop_requested;
            let looped = source.looped;
            source.play_requested = false;
            source.stop_requested = false;
            if !(play || stop) {
                continue;
            }

            let clip = source.clip.clone();
            if play {
                self.sink.play(&clip, looped);
            }
            if stop {
                self.sink.stop(&clip);
            }
        }
    }
}

/// One forwarded playback command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    /// A clip was started
    Play {
        /// Clip identifier
        clip: String,
        /// Whether the clip repeats
        looped: bool,
    },
    /// A clip was stopped
    Stop {
        /// Clip identifier
        clip: String,
    },
}

/// Sink that stores commands instead of playing them
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<AudioCommand>,
}

impl RecordingSink {
    /// New sink with no recorded commands
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// Every command forwarded so far, in order
    pub fn commands(&self) -> &[AudioCommand] {
        &self.commands
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, clip: &str, looped: bool) {
        self.commands.push(AudioCommand::Play {
            clip: clip.to_owned(),
            looped,
        });
    }

    fn stop(&mut self, clip: &str) {
        self.commands.push(AudioCommand::Stop {
            clip: clip.to_owned(),
        });
    }
}
