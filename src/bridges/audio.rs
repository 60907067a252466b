//! Sound cue consumer.
//!
//! There are no audio assets yet; cues are logged and the most recent one
//! is kept for the debug overlay and tests.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::actions::{SoundCue, SoundRequested};

#[derive(Resource, Debug, Default)]
pub struct AudioLog {
    pub last: Option<SoundCue>,
    pub played: u64,
}

impl AudioLog {
    pub fn record(&mut self, cue: SoundCue) {
        self.last = Some(cue);
        self.played += 1;
    }
}

pub(crate) fn play_sound_requests(
    mut requests: MessageReader<SoundRequested>,
    mut log: ResMut<AudioLog>,
) {
    for request in requests.read() {
        debug!("{}: sound '{}'", request.entity, request.cue.0);
        log.record(request.cue);
    }
}
