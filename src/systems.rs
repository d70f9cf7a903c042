//! ECS glue for hosting a [`GameSession`] inside a bevy `World`.

use std::time::Duration;

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::trace;

use crate::audio::{AudioEvent, AudioQueue};
use crate::events::RoundEvent;
use crate::session::GameSession;

#[derive(Resource)]
pub struct SessionResource(pub GameSession);

/// Simulation time covered by the current frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaTime(pub Duration);

/// Whether any key went down this frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyKeyPressed(pub bool);

/// Feeds this frame's round events into the session, then steps its timers.
pub fn round_event_system(
    mut session: ResMut<SessionResource>,
    mut events: EventReader<RoundEvent>,
    dt: Res<DeltaTime>,
    input: Res<AnyKeyPressed>,
) {
    for event in events.read() {
        trace!(?event, "Round event");
        session.0.handle(*event);
    }

    session.0.step(dt.0, input.0);
}

/// Moves commands buffered by the session's [`AudioQueue`] onto the `AudioEvent` channel.
pub fn audio_forward_system(queue: Res<AudioQueue>, mut audio_events: EventWriter<AudioEvent>) {
    for event in queue.drain() {
        audio_events.write(event);
    }
}
