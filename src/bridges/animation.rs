//! Animation playback driven by the action scheduler's requests.
//!
//! Actions only write animator parameters (`Action`, `Substate`, ...) or
//! ask for a one-shot clip; this controller keeps those parameters and
//! steps frames for whatever clip they select.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::actions::{AnimParam, AnimationCommand, AnimationRequested, AnimationTag};

/// Clip played for an action tag; tag 0 falls back to locomotion.
pub fn clip_for_tag(tag: AnimationTag) -> &'static str {
    match tag.0 {
        1 => "victory",
        2 => "death",
        3 => "hurt",
        4 => "spindash",
        5 => "peel_out",
        6 => "jump",
        7 => "ledge_climb",
        8 => "climb",
        9 => "glide_slide",
        10 => "roll",
        11 => "skid",
        12 => "push",
        13 => "crouch",
        14 => "look_up",
        15 => "balance",
        20 => "transform",
        21 => "fire_dash",
        22 => "bubble_bounce",
        23 => "thunder_jump",
        24 => "insta_shield",
        25 => "homing",
        26 => "drop_dash",
        27 => "glide",
        28 => "fly",
        _ => "locomotion",
    }
}

/// Component for animation playback on the controlled character.
#[derive(Component, Debug)]
pub struct AnimationController {
    /// Current action tag.
    pub action: AnimationTag,
    pub substate: i32,
    pub charged: bool,
    pub tired: bool,
    /// Cleared while hurt flicker hides the sprite.
    pub visible: bool,
    /// One-shot clip overriding the tag clip until it finishes.
    pub one_shot: Option<&'static str>,
    /// Current frame index (0-based).
    pub current_frame: u32,
    /// Total frames in current animation.
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            action: AnimationTag::NONE,
            substate: 0,
            charged: false,
            tired: false,
            visible: true,
            one_shot: None,
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.1,
        }
    }
}

impl AnimationController {
    fn restart(&mut self, total_frames: u32) {
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.total_frames = total_frames.max(1);
    }

    pub fn apply(&mut self, command: &AnimationCommand) {
        match *command {
            AnimationCommand::SetInt { param, value } => match param {
                AnimParam::Action => {
                    let tag = AnimationTag(value);
                    if self.action != tag {
                        self.action = tag;
                        self.substate = 0;
                        self.one_shot = None;
                        self.restart(4);
                    }
                }
                AnimParam::Substate => self.substate = value,
                other => debug!("int written to bool parameter {other:?}"),
            },
            AnimationCommand::SetBool { param, value } => match param {
                AnimParam::Charged => self.charged = value,
                AnimParam::Tired => self.tired = value,
                AnimParam::Visible => self.visible = value,
                other => debug!("bool written to int parameter {other:?}"),
            },
            AnimationCommand::Play {
                clip,
                normalized_time,
            } => {
                self.one_shot = Some(clip);
                self.restart(self.total_frames);
                self.current_frame =
                    ((self.total_frames - 1) as f32 * normalized_time).round() as u32;
            }
        }
    }

    pub fn clip(&self) -> &'static str {
        self.one_shot.unwrap_or_else(|| clip_for_tag(self.action))
    }

    /// Get the full sprite key for the current frame.
    pub fn current_sprite_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.clip(),
            self.substate,
            self.current_frame + 1 // 1-indexed for file naming
        )
    }

    /// Advance playback; a one-shot clip hands back to the tag clip at its end.
    pub fn advance(&mut self, dt: f32) {
        // Charging clips run twice as fast
        let duration = if self.charged {
            self.frame_duration * 0.5
        } else {
            self.frame_duration
        };
        self.frame_timer += dt;
        while self.frame_timer >= duration {
            self.frame_timer -= duration;
            self.current_frame += 1;
            if self.current_frame >= self.total_frames {
                self.current_frame = 0;
                if self.one_shot.take().is_some() {
                    self.frame_timer = 0.0;
                    break;
                }
            }
        }
    }
}

pub(crate) fn apply_animation_requests(
    mut requests: MessageReader<AnimationRequested>,
    mut query: Query<&mut AnimationController>,
) {
    for request in requests.read() {
        if let Ok(mut controller) = query.get_mut(request.entity) {
            controller.apply(&request.command);
        }
    }
}

/// System that updates animation frames based on time.
pub(crate) fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<&mut AnimationController>,
) {
    for mut controller in &mut query {
        controller.advance(time.delta_secs());
    }
}

/// Hide the sprite while the flicker parameter is cleared.
pub(crate) fn sync_visibility(
    mut query: Query<(&AnimationController, &mut Visibility), Changed<AnimationController>>,
) {
    for (controller, mut visibility) in &mut query {
        let wanted = if controller.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}
