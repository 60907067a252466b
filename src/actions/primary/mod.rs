//! Actions domain: primary action variants.

pub(crate) mod balance;
pub(crate) mod climb;
pub(crate) mod glide_slide;
pub(crate) mod hurt;
pub(crate) mod jump;
pub(crate) mod look;
pub(crate) mod peel_out;
pub(crate) mod push;
pub(crate) mod roll;
pub(crate) mod skid;
pub(crate) mod spindash;
pub(crate) mod terminal;

pub use balance::Balance;
pub use climb::{Climb, LedgeClimb};
pub use glide_slide::GlideSlide;
pub use hurt::Hurt;
pub use jump::Jump;
pub use look::Look;
pub use peel_out::SuperPeelOut;
pub use push::Push;
pub use roll::Roll;
pub use skid::Skid;
pub use spindash::Spindash;
pub use terminal::{Die, Victory};

use crate::actions::contract::ActionView;
use crate::actions::kinds::ActionKind;

/// A scripted or terminal primary owns the entity and must not be
/// pre-empted by ordinary moves.
pub(crate) fn locked_out(view: &ActionView<'_>) -> bool {
    matches!(
        view.current,
        Some(ActionKind::Victory | ActionKind::Die | ActionKind::Hurt)
    )
}

/// A charge move holds the crouch or look-up pose itself.
pub(crate) fn charging(view: &ActionView<'_>) -> bool {
    matches!(
        view.current,
        Some(ActionKind::Spindash | ActionKind::SuperPeelOut)
    )
}

/// A jump settles its own landing, including any sub-action hand-off or
/// bounce. Ground moves wait until it has exited.
pub(crate) fn jumping(view: &ActionView<'_>) -> bool {
    view.is_current(ActionKind::Jump)
}

/// Move `value` toward `target` by at most `delta`.
pub(crate) fn approach(value: f32, target: f32, delta: f32) -> f32 {
    if value < target {
        (value + delta).min(target)
    } else {
        (value - delta).max(target)
    }
}
