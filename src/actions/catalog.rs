//! Actions domain: the tag-keyed registry of variants and loadout
//! composition.
//!
//! A loadout declares its primary and sub-action priority lists
//! explicitly. [`compose`] reviews the declared order against the known
//! overlaps between guards before building a slot, so a reordering that
//! would silently change which action wins is rejected up front.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::actions::contract::{PrimaryAction, SubAction};
use crate::actions::error::CompositionError;
use crate::actions::kinds::{ActionKind, SubActionKind};
use crate::actions::primary::{
    Balance, Climb, Die, GlideSlide, Hurt, Jump, LedgeClimb, Look, Push, Roll, Skid, Spindash,
    SuperPeelOut, Victory,
};
use crate::actions::slot::PrimaryActionSlot;
use crate::actions::sub::{
    BubbleBounce, DropDash, FireDash, Fly, Glide, HomingAttack, InstaShield, SuperTransform,
    ThunderJump,
};
use crate::actions::sub_slot::SubActionSlot;

/// Declared action set of one character.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Loadout {
    pub id: String,
    /// Primary actions, highest priority first
    pub primary: Vec<ActionKind>,
    /// Sub-actions hosted by `Jump`, highest priority first
    #[serde(default)]
    pub sub_actions: Vec<SubActionKind>,
}

/// Terminal and damage actions must outrank every ordinary move, in this
/// order.
const HEAD: [ActionKind; 3] = [ActionKind::Victory, ActionKind::Die, ActionKind::Hurt];

/// `(earlier, later)`: when both are declared, `earlier` must come first.
pub const PRIORITY_RULES: &[(ActionKind, ActionKind)] = &[
    // Both launch on a jump press; the crouch/look-up charge wins.
    (ActionKind::Spindash, ActionKind::Jump),
    (ActionKind::SuperPeelOut, ActionKind::Jump),
    // Both hold while climbing; the pull-up must pre-empt the climb.
    (ActionKind::LedgeClimb, ActionKind::Climb),
    (ActionKind::Jump, ActionKind::Push),
    (ActionKind::Jump, ActionKind::Skid),
    (ActionKind::Jump, ActionKind::Crouch),
    (ActionKind::Jump, ActionKind::LookUp),
    (ActionKind::Roll, ActionKind::Crouch),
    (ActionKind::Skid, ActionKind::Push),
];

enum Requirement {
    Primary(ActionKind),
    Sub(SubActionKind),
}

const PRIMARY_PREREQUISITES: &[(ActionKind, Requirement)] = &[
    (ActionKind::GlideSlide, Requirement::Sub(SubActionKind::Glide)),
    (ActionKind::LedgeClimb, Requirement::Primary(ActionKind::Climb)),
    (ActionKind::Climb, Requirement::Sub(SubActionKind::Glide)),
    (ActionKind::Spindash, Requirement::Primary(ActionKind::Roll)),
];

/// Primaries a sub-action hands off to when it ends.
const SUB_PREREQUISITES: &[(SubActionKind, ActionKind)] = &[
    (SubActionKind::DropDash, ActionKind::Roll),
    (SubActionKind::Glide, ActionKind::GlideSlide),
];

impl Loadout {
    pub fn new(
        id: impl Into<String>,
        primary: impl Into<Vec<ActionKind>>,
        sub_actions: impl Into<Vec<SubActionKind>>,
    ) -> Self {
        Self {
            id: id.into(),
            primary: primary.into(),
            sub_actions: sub_actions.into(),
        }
    }

    /// Drop dash, super peel-out and the elemental shields.
    pub fn sonic() -> Self {
        Self::new(
            "sonic",
            [
                ActionKind::Victory,
                ActionKind::Die,
                ActionKind::Hurt,
                ActionKind::Spindash,
                ActionKind::SuperPeelOut,
                ActionKind::Jump,
                ActionKind::Roll,
                ActionKind::Skid,
                ActionKind::Push,
                ActionKind::Crouch,
                ActionKind::LookUp,
                ActionKind::Balance,
            ],
            [
                SubActionKind::SuperTransform,
                SubActionKind::FireDash,
                SubActionKind::BubbleBounce,
                SubActionKind::ThunderJump,
                SubActionKind::DropDash,
            ],
        )
    }

    /// Insta-shield in place of the drop dash.
    pub fn sonic_classic() -> Self {
        let mut loadout = Self::sonic();
        loadout.id = "sonic_classic".to_string();
        loadout.primary.retain(|kind| *kind != ActionKind::SuperPeelOut);
        loadout.sub_actions = vec![
            SubActionKind::SuperTransform,
            SubActionKind::FireDash,
            SubActionKind::BubbleBounce,
            SubActionKind::ThunderJump,
            SubActionKind::InstaShield,
        ];
        loadout
    }

    /// Homing attack in place of the shield moves.
    pub fn sonic_homing() -> Self {
        let mut loadout = Self::sonic();
        loadout.id = "sonic_homing".to_string();
        loadout.sub_actions = vec![SubActionKind::SuperTransform, SubActionKind::HomingAttack];
        loadout
    }

    pub fn tails() -> Self {
        Self::new(
            "tails",
            [
                ActionKind::Victory,
                ActionKind::Die,
                ActionKind::Hurt,
                ActionKind::Spindash,
                ActionKind::Jump,
                ActionKind::Roll,
                ActionKind::Skid,
                ActionKind::Push,
                ActionKind::Crouch,
                ActionKind::LookUp,
                ActionKind::Balance,
            ],
            [SubActionKind::SuperTransform, SubActionKind::Fly],
        )
    }

    pub fn knuckles() -> Self {
        Self::new(
            "knuckles",
            [
                ActionKind::Victory,
                ActionKind::Die,
                ActionKind::Hurt,
                ActionKind::Spindash,
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
            ],
            [SubActionKind::SuperTransform, SubActionKind::Glide],
        )
    }

    pub fn presets() -> Vec<Loadout> {
        vec![
            Self::sonic(),
            Self::sonic_classic(),
            Self::sonic_homing(),
            Self::tails(),
            Self::knuckles(),
        ]
    }

    fn has(&self, kind: ActionKind) -> bool {
        self.primary.contains(&kind)
    }

    fn has_sub(&self, kind: SubActionKind) -> bool {
        self.sub_actions.contains(&kind)
    }

    fn position(&self, kind: ActionKind) -> Option<usize> {
        self.primary.iter().position(|k| *k == kind)
    }
}

/// Check a loadout for duplicates, missing prerequisites and priority
/// inversions.
pub fn review(loadout: &Loadout) -> Result<(), CompositionError> {
    let id = || loadout.id.clone();

    if loadout.primary.is_empty() {
        return Err(CompositionError::Empty { loadout: id() });
    }

    let mut seen = HashSet::new();
    for kind in &loadout.primary {
        if !seen.insert(*kind) {
            return Err(CompositionError::DuplicatePrimary {
                loadout: id(),
                kind: *kind,
            });
        }
    }
    let mut seen_sub = HashSet::new();
    for kind in &loadout.sub_actions {
        if !seen_sub.insert(*kind) {
            return Err(CompositionError::DuplicateSub {
                loadout: id(),
                kind: *kind,
            });
        }
    }

    if !loadout.sub_actions.is_empty() && !loadout.has(ActionKind::Jump) {
        return Err(CompositionError::MissingPrerequisite {
            loadout: id(),
            kind: "sub-actions".to_string(),
            requires: ActionKind::Jump.to_string(),
        });
    }
    for (kind, requirement) in PRIMARY_PREREQUISITES {
        if !loadout.has(*kind) {
            continue;
        }
        let (met, requires) = match requirement {
            Requirement::Primary(other) => (loadout.has(*other), other.to_string()),
            Requirement::Sub(other) => (loadout.has_sub(*other), other.to_string()),
        };
        if !met {
            return Err(CompositionError::MissingPrerequisite {
                loadout: id(),
                kind: kind.to_string(),
                requires,
            });
        }
    }
    for (kind, requires) in SUB_PREREQUISITES {
        if loadout.has_sub(*kind) && !loadout.has(*requires) {
            return Err(CompositionError::MissingPrerequisite {
                loadout: id(),
                kind: kind.to_string(),
                requires: requires.to_string(),
            });
        }
    }

    review_priorities(loadout)
}

fn review_priorities(loadout: &Loadout) -> Result<(), CompositionError> {
    let inversion = |earlier: String, later: String| CompositionError::PriorityOrder {
        loadout: loadout.id.clone(),
        earlier,
        later,
    };

    // The head actions, where present, occupy the first slots in order.
    let head: Vec<ActionKind> = HEAD.into_iter().filter(|k| loadout.has(*k)).collect();
    for (index, kind) in loadout.primary.iter().take(head.len()).enumerate() {
        if *kind != head[index] {
            return Err(inversion(head[index].to_string(), kind.to_string()));
        }
    }

    for (earlier, later) in PRIORITY_RULES {
        if let (Some(a), Some(b)) = (loadout.position(*earlier), loadout.position(*later)) {
            if a > b {
                return Err(inversion(earlier.to_string(), later.to_string()));
            }
        }
    }

    let transform = SubActionKind::SuperTransform;
    if let Some(first) = loadout.sub_actions.first() {
        if loadout.has_sub(transform) && *first != transform {
            return Err(inversion(transform.to_string(), first.to_string()));
        }
    }
    Ok(())
}

pub fn instantiate_sub(kind: SubActionKind) -> Box<dyn SubAction> {
    match kind {
        SubActionKind::SuperTransform => Box::new(SuperTransform::default()),
        SubActionKind::FireDash => Box::new(FireDash::default()),
        SubActionKind::BubbleBounce => Box::new(BubbleBounce),
        SubActionKind::ThunderJump => Box::new(ThunderJump),
        SubActionKind::InstaShield => Box::new(InstaShield::default()),
        SubActionKind::HomingAttack => Box::new(HomingAttack::default()),
        SubActionKind::DropDash => Box::new(DropDash::default()),
        SubActionKind::Glide => Box::new(Glide::default()),
        SubActionKind::Fly => Box::new(Fly::default()),
    }
}

/// Build one primary. Only `Jump` hosts the given sub-actions.
pub fn instantiate_primary(kind: ActionKind, sub_actions: &[SubActionKind]) -> Box<dyn PrimaryAction> {
    match kind {
        ActionKind::Victory => Box::new(Victory),
        ActionKind::Die => Box::new(Die::default()),
        ActionKind::Hurt => Box::new(Hurt::default()),
        ActionKind::Spindash => Box::new(Spindash::default()),
        ActionKind::SuperPeelOut => Box::new(SuperPeelOut::default()),
        ActionKind::Jump => {
            let subs = sub_actions.iter().map(|k| instantiate_sub(*k)).collect();
            Box::new(Jump::new(SubActionSlot::new(subs)))
        }
        ActionKind::LedgeClimb => Box::new(LedgeClimb::default()),
        ActionKind::Climb => Box::new(Climb),
        ActionKind::GlideSlide => Box::new(GlideSlide),
        ActionKind::Roll => Box::new(Roll::default()),
        ActionKind::Skid => Box::new(Skid::default()),
        ActionKind::Push => Box::new(Push),
        ActionKind::Crouch => Box::new(Look::crouch()),
        ActionKind::LookUp => Box::new(Look::up()),
        ActionKind::Balance => Box::new(Balance),
    }
}

/// Review a loadout and build its slot.
pub fn compose(loadout: &Loadout) -> Result<PrimaryActionSlot, CompositionError> {
    review(loadout)?;
    let actions = loadout
        .primary
        .iter()
        .map(|kind| instantiate_primary(*kind, &loadout.sub_actions))
        .collect();
    Ok(PrimaryActionSlot::new(loadout.id.clone(), actions))
}
