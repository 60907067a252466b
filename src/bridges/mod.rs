//! Bridges domain: consumers for the animation, sound and camera requests
//! the action scheduler emits.

pub mod animation;
pub mod audio;
pub mod camera;


pub use animation::{AnimationController, clip_for_tag};
pub use audio::AudioLog;
pub use camera::{CameraMode, CameraRig};

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::bridges::animation::{apply_animation_requests, sync_visibility, update_animation_frames};
use crate::bridges::audio::play_sound_requests;
use crate::bridges::camera::{apply_camera_requests, follow_player};

pub struct BridgesPlugin;

impl Plugin for BridgesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioLog>()
            .add_systems(
                Update,
                (apply_animation_requests, update_animation_frames, sync_visibility).chain(),
            )
            .add_systems(Update, play_sound_requests)
            .add_systems(
                PostUpdate,
                (apply_camera_requests, follow_player)
                    .chain()
                    .before(TransformSystems::Propagate),
            );
    }
}
