//! Actions domain: stable tags for every action variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actions::effects::AnimationTag;
use crate::actions::state::SizeMode;

/// Primary actions: mutually exclusive top-level behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Victory,
    Die,
    Hurt,
    Spindash,
    SuperPeelOut,
    Jump,
    LedgeClimb,
    Climb,
    GlideSlide,
    Roll,
    Skid,
    Push,
    Crouch,
    LookUp,
    Balance,
}

impl ActionKind {
    pub const ALL: [ActionKind; 15] = [
        ActionKind::Victory,
        ActionKind::Die,
        ActionKind::Hurt,
        ActionKind::Spindash,
        ActionKind::SuperPeelOut,
        ActionKind::Jump,
        ActionKind::LedgeClimb,
        ActionKind::Climb,
        ActionKind::GlideSlide,
        ActionKind::Roll,
        ActionKind::Skid,
        ActionKind::Push,
        ActionKind::Crouch,
        ActionKind::LookUp,
        ActionKind::Balance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Victory => "victory",
            ActionKind::Die => "die",
            ActionKind::Hurt => "hurt",
            ActionKind::Spindash => "spindash",
            ActionKind::SuperPeelOut => "super_peel_out",
            ActionKind::Jump => "jump",
            ActionKind::LedgeClimb => "ledge_climb",
            ActionKind::Climb => "climb",
            ActionKind::GlideSlide => "glide_slide",
            ActionKind::Roll => "roll",
            ActionKind::Skid => "skid",
            ActionKind::Push => "push",
            ActionKind::Crouch => "crouch",
            ActionKind::LookUp => "look_up",
            ActionKind::Balance => "balance",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-actions: nested inside one activation of a hosting primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubActionKind {
    SuperTransform,
    FireDash,
    BubbleBounce,
    ThunderJump,
    InstaShield,
    HomingAttack,
    DropDash,
    Glide,
    Fly,
}

impl SubActionKind {
    pub const ALL: [SubActionKind; 9] = [
        SubActionKind::SuperTransform,
        SubActionKind::FireDash,
        SubActionKind::BubbleBounce,
        SubActionKind::ThunderJump,
        SubActionKind::InstaShield,
        SubActionKind::HomingAttack,
        SubActionKind::DropDash,
        SubActionKind::Glide,
        SubActionKind::Fly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubActionKind::SuperTransform => "super_transform",
            SubActionKind::FireDash => "fire_dash",
            SubActionKind::BubbleBounce => "bubble_bounce",
            SubActionKind::ThunderJump => "thunder_jump",
            SubActionKind::InstaShield => "insta_shield",
            SubActionKind::HomingAttack => "homing_attack",
            SubActionKind::DropDash => "drop_dash",
            SubActionKind::Glide => "glide",
            SubActionKind::Fly => "fly",
        }
    }
}

impl fmt::Display for SubActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one action instance of an entity: a primary, or a sub-action
/// under its hosting primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionId {
    Primary(ActionKind),
    Sub {
        parent: ActionKind,
        kind: SubActionKind,
    },
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionId::Primary(kind) => write!(f, "{kind}"),
            ActionId::Sub { parent, kind } => write!(f, "{parent}/{kind}"),
        }
    }
}

/// Lifecycle of a registered action as tracked by its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Lifecycle {
    #[default]
    Idle,
    /// Guard holds but the launch condition does not
    ReadyToLaunch,
    /// Guard and launch condition hold this step
    Launching,
    Active,
}

/// Static attributes of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionProfile {
    pub animation_tag: AnimationTag,
    pub attacking: bool,
    pub size: SizeMode,
}

impl ActionProfile {
    pub const fn new(animation_tag: i32, attacking: bool, size: SizeMode) -> Self {
        Self {
            animation_tag: AnimationTag(animation_tag),
            attacking,
            size,
        }
    }
}

/// Variant-local discriminator for the timers an action schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerTag(pub u8);

/// Payload stored in the entity's timer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub owner: ActionId,
    pub tag: TimerTag,
}

/// Why an action is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitReason {
    /// Its own exit condition held
    Natural,
    /// Another primary launched over it
    Forced,
    /// The hosting primary exited while the sub-action was active
    ParentExit,
}
