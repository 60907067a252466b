//! Actions domain: sub-action variants hosted by an airborne primary.

pub(crate) mod drop_dash;
pub(crate) mod fly;
pub(crate) mod glide;
pub(crate) mod homing;
pub(crate) mod shield;
pub(crate) mod super_transform;

pub use drop_dash::DropDash;
pub use fly::Fly;
pub use glide::{Glide, GlidePhase};
pub use homing::HomingAttack;
pub use shield::{BubbleBounce, FireDash, InstaShield, ThunderJump};
pub use super_transform::SuperTransform;

use crate::actions::contract::ActionView;
use crate::actions::state::ShieldKind;

/// Jump pressed again while airborne.
pub(crate) fn air_press(view: &ActionView<'_>) -> bool {
    !view.grounded() && view.input.jump.pressed
}

/// The elemental shield currently worn, ignoring super form.
pub(crate) fn elemental_shield(view: &ActionView<'_>) -> Option<ShieldKind> {
    if view.state.super_form {
        return None;
    }
    view.state.shield.filter(|shield| shield.is_elemental())
}
