//! A ready-made `World` + `Schedule` pairing that drives a [`GameSession`] frame by frame.

use std::time::Duration;

use bevy_ecs::{
    event::Events,
    schedule::{IntoScheduleConfigs, Schedule},
    world::World,
};

use crate::audio::{AudioEvent, AudioQueue};
use crate::events::RoundEvent;
use crate::round::RoundPhase;
use crate::session::GameSession;
use crate::systems::{audio_forward_system, round_event_system, AnyKeyPressed, DeltaTime, SessionResource};

/// Owns the ECS world hosting the session.
///
/// Events sent with [`Game::send`] are consumed on the next [`Game::tick`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Hosts `session`. `audio` must be the queue the session's collaborators write to.
    pub fn new(session: GameSession, audio: AudioQueue) -> Self {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        world.init_resource::<Events<RoundEvent>>();
        world.init_resource::<Events<AudioEvent>>();
        world.insert_resource(SessionResource(session));
        world.insert_resource(audio);
        world.insert_resource(DeltaTime::default());
        world.insert_resource(AnyKeyPressed::default());

        schedule.add_systems((round_event_system, audio_forward_system).chain());

        Game { world, schedule }
    }

    pub fn send(&mut self, event: impl Into<RoundEvent>) {
        self.world.resource_mut::<Events<RoundEvent>>().send(event.into());
    }

    /// Runs one frame and returns the audio commands it produced.
    pub fn tick(&mut self, dt: Duration, any_key_pressed: bool) -> Vec<AudioEvent> {
        self.world.insert_resource(DeltaTime(dt));
        self.world.insert_resource(AnyKeyPressed(any_key_pressed));

        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<RoundEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().drain().collect()
    }

    pub fn session(&self) -> &GameSession {
        &self.world.resource::<SessionResource>().0
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.world.resource_mut::<SessionResource>().into_inner().0
    }

    pub fn phase(&self) -> RoundPhase {
        self.session().phase()
    }
}
