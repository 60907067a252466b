//! Camera rig following the player and honouring action requests.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::actions::{CameraRequest, CameraRequested};
use crate::core::secs_from_steps;
use crate::movement::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Follow,
    Frozen,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub mode: CameraMode,
    /// Remaining seconds the horizontal follow is held back
    pub lag_secs: f32,
    pub pan_target: f32,
    pub pan: f32,
    /// Follow smoothing per second
    pub stiffness: f32,
    pub pan_speed: f32,
    pub last_request: Option<CameraRequest>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Follow,
            lag_secs: 0.0,
            pan_target: 0.0,
            pan: 0.0,
            stiffness: 10.0,
            pan_speed: 120.0,
            last_request: None,
        }
    }
}

impl CameraRig {
    pub fn apply(&mut self, request: CameraRequest) {
        match request {
            CameraRequest::Follow => self.mode = CameraMode::Follow,
            CameraRequest::Freeze => self.mode = CameraMode::Frozen,
            CameraRequest::Lag { steps } => self.lag_secs = secs_from_steps(steps),
            CameraRequest::Pan { offset_y } => self.pan_target = offset_y,
        }
        self.last_request = Some(request);
    }

    /// Next camera position when tracking `target` from `current`.
    pub fn step(&mut self, current: Vec2, target: Vec2, dt: f32) -> Vec2 {
        if self.mode == CameraMode::Frozen {
            return current;
        }

        let max_pan = self.pan_speed * dt;
        self.pan += (self.pan_target - self.pan).clamp(-max_pan, max_pan);

        let goal = target + Vec2::new(0.0, self.pan);
        let t = (self.stiffness * dt).min(1.0);
        let mut next = current.lerp(goal, t);
        if self.lag_secs > 0.0 {
            self.lag_secs = (self.lag_secs - dt).max(0.0);
            next.x = current.x;
        }
        next
    }
}

pub(crate) fn apply_camera_requests(
    mut requests: MessageReader<CameraRequested>,
    mut rigs: Query<&mut CameraRig>,
) {
    for request in requests.read() {
        debug!("{}: camera {:?}", request.entity, request.request);
        for mut rig in &mut rigs {
            rig.apply(request.request);
        }
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    player: Query<&Transform, (With<Player>, Without<CameraRig>)>,
    mut cameras: Query<(&mut CameraRig, &mut Transform)>,
) {
    let Some(target) = player.iter().next() else {
        return;
    };
    let target = target.translation.truncate();

    for (mut rig, mut transform) in &mut cameras {
        let next = rig.step(transform.translation.truncate(), target, time.delta_secs());
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
