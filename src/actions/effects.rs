//! Actions domain: outbound calls to the animation, audio and camera bridges.
//!
//! Actions queue requests into an [`Effects`] outbox; the host drains it
//! after every step and forwards each entry as a message.

use serde::Serialize;

/// Opaque animation identifier handed to the animation bridge on launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AnimationTag(pub i32);

impl AnimationTag {
    /// No action active: locomotion animations take over.
    pub const NONE: AnimationTag = AnimationTag(0);
}

/// Animator parameters the catalog writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnimParam {
    /// Current action tag
    Action,
    /// Variant-specific substate (glide phase, balance side, ...)
    Substate,
    Charged,
    Tired,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnimationCommand {
    SetInt { param: AnimParam, value: i32 },
    SetBool { param: AnimParam, value: bool },
    Play {
        clip: &'static str,
        normalized_time: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundCue(pub &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CameraRequest {
    Follow,
    Freeze,
    /// Hold the camera back for a number of steps
    Lag { steps: u32 },
    /// Vertical look offset; 0 restores the default framing
    Pan { offset_y: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub animation: Vec<AnimationCommand>,
    pub sounds: Vec<SoundCue>,
    pub camera: Vec<CameraRequest>,
}

impl Effects {
    pub fn set_int(&mut self, param: AnimParam, value: i32) {
        self.animation.push(AnimationCommand::SetInt { param, value });
    }

    pub fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.animation.push(AnimationCommand::SetBool { param, value });
    }

    pub fn play(&mut self, clip: &'static str, normalized_time: f32) {
        self.animation.push(AnimationCommand::Play {
            clip,
            normalized_time: normalized_time.clamp(0.0, 1.0),
        });
    }

    pub fn sound(&mut self, clip: &'static str) {
        self.sounds.push(SoundCue(clip));
    }

    pub fn camera(&mut self, request: CameraRequest) {
        self.camera.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.animation.is_empty() && self.sounds.is_empty() && self.camera.is_empty()
    }

    pub fn clear(&mut self) {
        self.animation.clear();
        self.sounds.clear();
        self.camera.clear();
    }

    pub fn played_sound(&self, clip: &str) -> bool {
        self.sounds.iter().any(|cue| cue.0 == clip)
    }
}
