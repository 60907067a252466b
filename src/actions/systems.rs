//! Actions domain: the fixed-step system that ticks every controller.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::actions::components::{ActionController, ActionFrame};
use crate::actions::effects::Effects;
use crate::actions::error::{TickError, TickFailure};
use crate::actions::events::{
    ActionTransition, AnimationRequested, CameraRequested, SoundRequested,
};
use crate::actions::resources::ActionSettings;
use crate::actions::slot::TickReport;
use crate::actions::tuning::ActionTuning;

/// Split a tick result into the transitions to forward and the error to
/// report.
fn settle(result: Result<TickReport, TickFailure>) -> (TickReport, Option<TickError>) {
    match result {
        Ok(report) => (report, None),
        Err(TickFailure { error, report }) => (report, Some(error)),
    }
}

pub(crate) fn tick_actions(
    settings: Res<ActionSettings>,
    tuning: Res<ActionTuning>,
    mut query: Query<(Entity, &mut ActionController, &ActionFrame)>,
    mut animation: MessageWriter<AnimationRequested>,
    mut sounds: MessageWriter<SoundRequested>,
    mut camera: MessageWriter<CameraRequested>,
    mut transitions: MessageWriter<ActionTransition>,
) {
    for (entity, mut controller, frame) in &mut query {
        let ActionController { slot, state } = &mut *controller;
        let mut effects = Effects::default();

        let (report, failure) = settle(slot.tick(&frame.0, state, &mut effects, &tuning));
        for transition in report.transitions {
            transitions.write(ActionTransition { entity, transition });
        }

        match failure {
            Some(err) if err.is_contract_bug() => {
                error!("{entity} [{}]: {err}", slot.loadout());
                if settings.halt_on_violation {
                    panic!("action contract violated for {entity}: {err}");
                }
            }
            Some(err) => debug!("{entity}: {err}"),
            None => {}
        }

        let Effects {
            animation: commands,
            sounds: cues,
            camera: requests,
        } = effects;
        for command in commands {
            animation.write(AnimationRequested { entity, command });
        }
        for cue in cues {
            sounds.write(SoundRequested { entity, cue });
        }
        for request in requests {
            camera.write(CameraRequested { entity, request });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::settle;
    use crate::actions::error::{TickError, TickFailure};
    use crate::actions::kinds::{ActionId, ActionKind};
    use crate::actions::slot::{TickReport, Transition, TransitionKind};

    #[test]
    fn failed_step_still_forwards_its_transitions() {
        let exited = Transition {
            step: 4,
            action: ActionId::Primary(ActionKind::Roll),
            change: TransitionKind::Exited,
        };
        let error = TickError::InputLeftRestricted {
            action: ActionId::Primary(ActionKind::Roll),
        };
        let failure = TickFailure {
            error: error.clone(),
            report: TickReport {
                step: 4,
                transitions: vec![exited],
            },
        };

        let (report, failed) = settle(Err(failure));

        assert_eq!(report.transitions, vec![exited]);
        assert_eq!(failed, Some(error));
    }
}
