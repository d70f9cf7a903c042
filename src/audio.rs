//! Audio cues issued by the round controller.
//!
//! The controller never touches an audio device. It talks to an [`AudioSink`],
//! which is either a real mixer owned by the host or the [`AudioQueue`], which
//! buffers commands as [`AudioEvent`]s for the ECS audio system to drain.

use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::{event::Event, resource::Resource};
use parking_lot::Mutex;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::trace;

/// Every clip the round controller knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Sound {
    GhostEaten,
    /// Looping background music during play.
    GameTheme,
    PelletEaten,
    /// Looping music while ghosts are frightened.
    PowerPellet,
    /// Jingle after the board is cleared.
    Over,
}

/// Commands understood by an audio backend.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Replace the current clip and start it now.
    PlayImmediate(Sound),
    /// Overlay a short effect without interrupting the current clip.
    PlayOneShot(Sound),
    Stop(Sound),
    /// Replace the current clip and start it after a delay.
    PlayAfterDelay(Sound, Duration),
}

/// The audio collaborator consumed by the round controller.
pub trait AudioSink: Send + Sync {
    fn play_immediate(&mut self, sound: Sound);
    fn play_one_shot(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
    fn play_after_delay(&mut self, sound: Sound, delay: Duration);

    /// Routes an [`AudioEvent`] to the matching method.
    fn apply(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::PlayImmediate(sound) => self.play_immediate(sound),
            AudioEvent::PlayOneShot(sound) => self.play_one_shot(sound),
            AudioEvent::Stop(sound) => self.stop(sound),
            AudioEvent::PlayAfterDelay(sound, delay) => self.play_after_delay(sound, delay),
        }
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Arc<Mutex<T>> {
    fn play_immediate(&mut self, sound: Sound) {
        self.lock().play_immediate(sound);
    }

    fn play_one_shot(&mut self, sound: Sound) {
        self.lock().play_one_shot(sound);
    }

    fn stop(&mut self, sound: Sound) {
        self.lock().stop(sound);
    }

    fn play_after_delay(&mut self, sound: Sound, delay: Duration) {
        self.lock().play_after_delay(sound, delay);
    }
}

/// An [`AudioSink`] that buffers commands until someone drains them.
///
/// Clones share the same buffer, so one half can live inside the session while
/// the other is registered as an ECS resource.
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioQueue {
    events: Arc<Mutex<Vec<AudioEvent>>>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every buffered command, oldest first.
    pub fn drain(&self) -> Vec<AudioEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    fn push(&self, event: AudioEvent) {
        trace!(?event, "Queued audio command");
        self.events.lock().push(event);
    }
}

impl AudioSink for AudioQueue {
    fn play_immediate(&mut self, sound: Sound) {
        self.push(AudioEvent::PlayImmediate(sound));
    }

    fn play_one_shot(&mut self, sound: Sound) {
        self.push(AudioEvent::PlayOneShot(sound));
    }

    fn stop(&mut self, sound: Sound) {
        self.push(AudioEvent::Stop(sound));
    }

    fn play_after_delay(&mut self, sound: Sound, delay: Duration) {
        self.push(AudioEvent::PlayAfterDelay(sound, delay));
    }
}

/// An [`AudioSink`] that only logs, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_immediate(&mut self, sound: Sound) {
        trace!(%sound, "Play");
    }

    fn play_one_shot(&mut self, sound: Sound) {
        trace!(%sound, "Play one-shot");
    }

    fn stop(&mut self, sound: Sound) {
        trace!(%sound, "Stop");
    }

    fn play_after_delay(&mut self, sound: Sound, delay: Duration) {
        trace!(%sound, ?delay, "Play delayed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn sound_names_are_snake_case() {
        let names: Vec<&'static str> = Sound::iter().map(Into::into).collect();
        assert_eq!(names, ["ghost_eaten", "game_theme", "pellet_eaten", "power_pellet", "over"]);
        assert_eq!(Sound::PowerPellet.to_string(), "power_pellet");
    }

    #[test]
    fn queue_clones_share_a_buffer() {
        let queue = AudioQueue::new();
        let mut sink = queue.clone();
        sink.apply(AudioEvent::Stop(Sound::GameTheme));
        sink.play_one_shot(Sound::PelletEaten);

        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![AudioEvent::Stop(Sound::GameTheme), AudioEvent::PlayOneShot(Sound::PelletEaten)]
        );
        assert!(queue.is_empty());
    }
}
