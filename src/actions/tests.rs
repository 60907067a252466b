//! Actions domain: scheduler scenarios driven step by step.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::catalog::{Loadout, compose, instantiate_primary, review};
use super::contract::{Action, ActionContext, ActionView, PrimaryAction, SubAction};
use super::effects::{AnimParam, AnimationCommand, CameraRequest, Effects};
use super::error::{CompositionError, TickError, TickFailure};
use super::kinds::{
    ActionId, ActionKind, ActionProfile, ExitReason, Lifecycle, SubActionKind, TimerTag,
};
use super::primary::{Die, Roll};
use super::slot::{PrimaryActionSlot, TickReport, TransitionKind};
use super::snapshot::{
    ButtonState, DamageContact, Frame, HomingTarget, InputSnapshot, PhysicsSnapshot, WallContact,
    WallSide, WorldSnapshot,
};
use super::state::{CharacterState, Facing, InputRestriction, ShieldKind, SizeMode};
use super::sub_slot::SubActionSlot;
use super::timer::TimerHandle;
use super::tuning::ActionTuning;

const DOWN: Vec2 = Vec2::new(0.0, -1.0);
const UP: Vec2 = Vec2::new(0.0, 1.0);
const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
const NO_SUBS: [SubActionKind; 0] = [];

fn primary(kind: ActionKind) -> ActionId {
    ActionId::Primary(kind)
}

fn sub(kind: SubActionKind) -> ActionId {
    ActionId::Sub {
        parent: ActionKind::Jump,
        kind,
    }
}

fn input(axis: Vec2, jump: ButtonState) -> InputSnapshot {
    InputSnapshot {
        axis,
        jump,
        special: ButtonState::default(),
    }
}

fn idle() -> ButtonState {
    ButtonState::default()
}

fn grounded(velocity: Vec2, input: InputSnapshot) -> Frame {
    Frame::new(PhysicsSnapshot::grounded().with_velocity(velocity), input)
}

fn airborne(velocity: Vec2, input: InputSnapshot) -> Frame {
    Frame::new(PhysicsSnapshot::airborne(velocity), input)
}

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

struct TestRig {
    slot: PrimaryActionSlot,
    state: CharacterState,
    effects: Effects,
    tuning: ActionTuning,
}

impl TestRig {
    fn new(loadout: Loadout) -> Self {
        Self::with_slot(compose(&loadout).expect("preset loadouts compose"))
    }

    fn with_slot(slot: PrimaryActionSlot) -> Self {
        Self {
            slot,
            state: CharacterState::default(),
            effects: Effects::default(),
            tuning: ActionTuning::default(),
        }
    }

    fn try_step(&mut self, frame: &Frame) -> Result<TickReport, TickFailure> {
        self.effects.clear();
        let report = self
            .slot
            .tick(frame, &mut self.state, &mut self.effects, &self.tuning);
        self.assert_exclusive();
        report
    }

    fn step(&mut self, frame: &Frame) -> TickReport {
        self.try_step(frame).expect("step should run cleanly")
    }

    /// Launch `Jump` from flat ground.
    fn jump(&mut self) -> TickReport {
        let report = self.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, ButtonState::just_pressed())));
        assert_eq!(self.slot.current(), Some(ActionKind::Jump));
        report
    }

    fn assert_exclusive(&self) {
        assert!(self.slot.active_count() <= 1);
        if let Some(sub_slot) = self.slot.sub_slot(ActionKind::Jump) {
            assert!(sub_slot.active_count() <= 1);
        }
    }

    fn set_action_tag(&self, value: i32) -> bool {
        self.effects.animation.contains(&AnimationCommand::SetInt {
            param: AnimParam::Action,
            value,
        })
    }
}

/// Records its lifecycle calls; launches on a special press and exits on
/// its release.
#[derive(Clone, Default)]
struct RecorderRules {
    leak_timer: bool,
    leave_restricted: bool,
    hand_off: Option<ActionKind>,
}

struct Recorder {
    rules: RecorderRules,
    log: Arc<Mutex<Vec<String>>>,
    timer: Option<TimerHandle>,
    sub_actions: Option<SubActionSlot>,
}

impl Recorder {
    fn boxed(rules: RecorderRules, log: &Arc<Mutex<Vec<String>>>) -> Box<dyn PrimaryAction> {
        Box::new(Self {
            rules,
            log: Arc::clone(log),
            timer: None,
            sub_actions: None,
        })
    }

    /// Same, hosting a [`RecordingSub`] that logs into the shared log.
    fn hosting(rules: RecorderRules, log: &Arc<Mutex<Vec<String>>>) -> Box<dyn PrimaryAction> {
        Box::new(Self {
            rules,
            log: Arc::clone(log),
            timer: None,
            sub_actions: Some(SubActionSlot::new(vec![Box::new(RecordingSub {
                log: Arc::clone(log),
            })])),
        })
    }

    fn note(&self, entry: impl Into<String>) {
        self.log.lock().expect("recorder log").push(entry.into());
    }
}

impl Action for Recorder {
    fn profile(&self) -> ActionProfile {
        ActionProfile::new(99, true, SizeMode::Crouched)
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.special.pressed
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        self.note("start");
        ctx.state.input_restriction = InputRestriction::LockHorizontal;
        ctx.state.size_mode = SizeMode::Crouched;
        self.timer = Some(ctx.schedule(100, TimerTag(0)));
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {
        self.note("perform");
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.special.released
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        self.note(format!("end:{:?}", ctx.exit_reason()));
        if !self.rules.leak_timer {
            ctx.cancel(&mut self.timer);
        }
        if !self.rules.leave_restricted {
            ctx.state.input_restriction = InputRestriction::Unrestricted;
        }
        ctx.state.size_mode = SizeMode::Regular;
        if let Some(next) = self.rules.hand_off {
            ctx.hand_off(next);
        }
    }

    fn reset(&mut self) {
        self.note("reset");
        self.timer = None;
    }
}

impl PrimaryAction for Recorder {
    fn kind(&self) -> ActionKind {
        ActionKind::Push
    }

    fn sub_actions(&self) -> Option<&SubActionSlot> {
        self.sub_actions.as_ref()
    }

    fn sub_actions_mut(&mut self) -> Option<&mut SubActionSlot> {
        self.sub_actions.as_mut()
    }
}

/// Launches on a jump press under a [`Recorder`] and stays until its
/// parent goes.
struct RecordingSub {
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingSub {
    fn note(&self, entry: impl Into<String>) {
        self.log.lock().expect("recorder log").push(entry.into());
    }
}

impl Action for RecordingSub {
    fn profile(&self) -> ActionProfile {
        ActionProfile::new(98, true, SizeMode::Crouched)
    }

    fn can_perform(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.jump.pressed
    }

    fn on_start(&mut self, _ctx: &mut ActionContext<'_>) {
        self.note("sub:start");
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn exit_condition(&self, _view: &ActionView<'_>) -> bool {
        false
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        self.note(format!("sub:end:{:?}", ctx.exit_reason()));
    }

    fn reset(&mut self) {
        self.note("sub:reset");
    }
}

impl SubAction for RecordingSub {
    fn kind(&self) -> SubActionKind {
        SubActionKind::InstaShield
    }
}

fn special(button: ButtonState) -> InputSnapshot {
    InputSnapshot {
        special: button,
        ..Default::default()
    }
}

fn recorder_rig(rules: RecorderRules, extra: Vec<Box<dyn PrimaryAction>>) -> (TestRig, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut actions = vec![Recorder::boxed(rules, &log)];
    actions.extend(extra);
    (TestRig::with_slot(PrimaryActionSlot::new("recorder", actions)), log)
}

// --- Launch and exit ---

#[test]
fn test_jump_launches_on_press() {
    let mut rig = TestRig::new(Loadout::sonic());
    let frame = grounded(Vec2::new(120.0, 0.0), input(Vec2::ZERO, ButtonState::just_pressed()));

    let report = rig.step(&frame);

    assert!(report.has(primary(ActionKind::Jump), TransitionKind::Launched));
    assert_eq!(rig.slot.current(), Some(ActionKind::Jump));
    assert!(rig.state.velocity.y > 0.0);
    assert_eq!(rig.state.velocity.x, 120.0);
    assert_eq!(rig.state.size_mode, SizeMode::Shrunk);
    assert!(rig.state.attacking);
    assert!(rig.set_action_tag(6));
}

#[test]
fn test_jump_blocked_by_low_ceiling() {
    let mut rig = TestRig::new(Loadout::sonic());
    let mut physics = PhysicsSnapshot::grounded();
    physics.ceiling_clearance = Some(10.0);

    rig.step(&Frame::new(physics, input(Vec2::ZERO, ButtonState::just_pressed())));

    assert_eq!(rig.slot.current(), None);
    assert_eq!(rig.slot.lifecycle(ActionKind::Jump), Some(Lifecycle::Idle));
}

#[test]
fn test_roll_exits_below_stop_speed_without_performing() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.step(&grounded(Vec2::new(200.0, 0.0), input(DOWN, idle())));
    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert_eq!(rig.state.input_restriction, InputRestriction::LockHorizontal);

    let report = rig.step(&grounded(Vec2::new(20.0, 0.0), input(DOWN, idle())));

    assert!(report.has(primary(ActionKind::Roll), TransitionKind::Exited));
    assert_eq!(rig.slot.current(), None);
    assert_eq!(rig.slot.previous(), Some(ActionKind::Roll));
    // Friction would have been applied had the roll performed this step.
    assert_eq!(rig.state.ground_speed, 20.0);
    assert!(rig.state.is_neutral());
    assert!(rig.set_action_tag(0));
}

#[test]
fn test_roll_decelerates_while_performing() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.step(&grounded(Vec2::new(200.0, 0.0), input(DOWN, idle())));
    rig.step(&grounded(Vec2::new(200.0, 0.0), input(DOWN, idle())));

    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert!(rig.state.ground_speed < 200.0);
    assert!(rig.state.ground_speed > 190.0);
}

#[test]
fn test_spindash_release_hands_off_to_roll() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.step(&grounded(Vec2::ZERO, input(DOWN, idle())));
    assert_eq!(rig.slot.current(), Some(ActionKind::Crouch));

    let report = rig.step(&grounded(Vec2::ZERO, input(DOWN, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current(), Some(ActionKind::Spindash));
    assert_eq!(report.transitions[0].action, primary(ActionKind::Crouch));
    assert_eq!(report.transitions[0].change, TransitionKind::ForcedExit);
    assert_eq!(report.transitions[1].action, primary(ActionKind::Spindash));

    // One more press revs the charge to one step
    rig.step(&grounded(Vec2::ZERO, input(DOWN, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current(), Some(ActionKind::Spindash));

    let report = rig.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, idle())));

    let expected = rig.tuning.spindash_rev_step / 2.0 + rig.tuning.min_spindash_rev;
    assert!(report.has(primary(ActionKind::Spindash), TransitionKind::Exited));
    assert!(report.has(primary(ActionKind::Roll), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert!(near(rig.state.ground_speed, expected));
    assert!(
        rig.effects
            .camera
            .iter()
            .any(|request| matches!(request, CameraRequest::Lag { .. }))
    );
}

#[test]
fn test_spindash_facing_left_releases_left() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.facing = Facing::Left;
    rig.step(&grounded(Vec2::ZERO, input(DOWN, ButtonState::just_pressed())));
    rig.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, idle())));

    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert!(near(rig.state.ground_speed, -rig.tuning.min_spindash_rev));
}

#[test]
fn test_simultaneous_launches_pick_highest_priority() {
    let mut rig = TestRig::new(Loadout::sonic());

    let report = rig.step(&grounded(Vec2::ZERO, input(DOWN, ButtonState::just_pressed())));

    assert_eq!(report.launches(), 1);
    assert_eq!(rig.slot.current(), Some(ActionKind::Spindash));
    assert_eq!(rig.slot.lifecycle(ActionKind::Jump), Some(Lifecycle::ReadyToLaunch));
    assert_eq!(rig.slot.lifecycle(ActionKind::Crouch), Some(Lifecycle::ReadyToLaunch));
    assert_eq!(rig.slot.lifecycle(ActionKind::Roll), Some(Lifecycle::Idle));
}

#[test]
fn test_peel_out_releases_only_when_charged() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.step(&grounded(Vec2::ZERO, input(UP, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current(), Some(ActionKind::SuperPeelOut));

    for _ in 0..rig.tuning.peel_out_charge_steps {
        rig.step(&grounded(Vec2::ZERO, input(UP, idle())));
        assert_eq!(rig.slot.current(), Some(ActionKind::SuperPeelOut));
    }
    rig.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, idle())));

    assert_eq!(rig.slot.current(), None);
    assert!(near(rig.state.ground_speed, rig.tuning.peel_out_speed));
}

#[test]
fn test_uncharged_peel_out_cancels_its_timer() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.step(&grounded(Vec2::ZERO, input(UP, ButtonState::just_pressed())));
    rig.step(&grounded(Vec2::ZERO, input(UP, idle())));
    assert_eq!(rig.slot.pending_timers(), 1);

    rig.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, idle())));
    assert_eq!(rig.slot.current(), None);
    assert_eq!(rig.slot.pending_timers(), 0);
    assert_eq!(rig.state.ground_speed, 0.0);

    // Well past the charge time nothing fires
    for _ in 0..rig.tuning.peel_out_charge_steps + 5 {
        rig.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, idle())));
    }
    assert_eq!(rig.slot.current(), None);
}

// --- Sub-actions ---

fn glider() -> Loadout {
    Loadout::new(
        "glider",
        [ActionKind::Jump, ActionKind::GlideSlide, ActionKind::Roll],
        [SubActionKind::Glide, SubActionKind::DropDash],
    )
}

#[test]
fn test_consumed_sub_slot_blocks_second_sub_action() {
    let mut rig = TestRig::new(glider());
    rig.jump();

    rig.step(&airborne(Vec2::new(0.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    let sub_slot = rig.slot.sub_slot(ActionKind::Jump).expect("jump hosts sub-actions");
    assert_eq!(sub_slot.current(), Some(SubActionKind::Glide));
    assert!(sub_slot.is_consumed());
    assert_eq!(sub_slot.lifecycle(SubActionKind::DropDash), Some(Lifecycle::ReadyToLaunch));

    rig.step(&airborne(Vec2::new(0.0, 100.0), input(Vec2::ZERO, ButtonState::just_released())));
    rig.step(&airborne(Vec2::new(0.0, 50.0), input(Vec2::ZERO, ButtonState::just_pressed())));

    let sub_slot = rig.slot.sub_slot(ActionKind::Jump).expect("jump hosts sub-actions");
    assert_eq!(sub_slot.current(), Some(SubActionKind::Glide));
    assert_eq!(sub_slot.lifecycle(SubActionKind::DropDash), Some(Lifecycle::Idle));
}

#[test]
fn test_sub_slot_is_not_polled_on_parent_launch() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.jump();

    let sub_slot = rig.slot.sub_slot(ActionKind::Jump).expect("jump hosts sub-actions");
    assert_eq!(sub_slot.current(), None);
    assert!(!sub_slot.is_consumed());
}

#[test]
fn test_drop_dash_landing_charged_hands_off_to_roll() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.jump();

    let report = rig.step(&airborne(Vec2::new(0.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert!(report.has(sub(SubActionKind::DropDash), TransitionKind::Launched));
    assert!(rig.set_action_tag(26));

    for _ in 0..rig.tuning.drop_dash_charge_steps {
        rig.step(&airborne(Vec2::new(0.0, -100.0), input(Vec2::ZERO, ButtonState::holding())));
    }
    let report = rig.step(&grounded(Vec2::new(300.0, 0.0), input(Vec2::ZERO, ButtonState::holding())));

    let expected = 300.0 / 4.0 + rig.tuning.drop_dash_speed;
    assert!(report.has(sub(SubActionKind::DropDash), TransitionKind::ForcedExit));
    assert!(report.has(primary(ActionKind::Jump), TransitionKind::Exited));
    assert!(report.has(primary(ActionKind::Roll), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert!(near(rig.state.ground_speed, expected));
    assert_eq!(rig.slot.pending_timers(), 0);
}

#[test]
fn test_charged_drop_dash_landing_at_rest_rolls_instead_of_crouching() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.jump();
    rig.step(&airborne(Vec2::new(0.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    for _ in 0..rig.tuning.drop_dash_charge_steps {
        rig.step(&airborne(Vec2::new(0.0, -100.0), input(DOWN, ButtonState::holding())));
    }

    let report = rig.step(&grounded(Vec2::ZERO, input(DOWN, ButtonState::holding())));

    assert!(!report.has(primary(ActionKind::Crouch), TransitionKind::Launched));
    assert!(report.has(primary(ActionKind::Jump), TransitionKind::Exited));
    assert!(report.has(primary(ActionKind::Roll), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert!(near(rig.state.ground_speed, rig.tuning.drop_dash_speed));
}

#[test]
fn test_drop_dash_landing_uncharged_just_lands() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.jump();
    rig.step(&airborne(Vec2::new(0.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    rig.step(&airborne(Vec2::new(0.0, -100.0), input(Vec2::ZERO, ButtonState::holding())));

    let report = rig.step(&grounded(Vec2::new(300.0, 0.0), input(Vec2::ZERO, ButtonState::holding())));

    assert!(report.has(primary(ActionKind::Jump), TransitionKind::Exited));
    assert_eq!(rig.slot.current(), None);
    assert_eq!(rig.slot.pending_timers(), 0);
    assert!(!rig.state.attacking);
    assert!(rig.state.is_neutral());
}

#[test]
fn test_sub_action_exit_restores_parent_animation() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.shield = Some(ShieldKind::Lightning);
    rig.jump();

    rig.step(&airborne(Vec2::new(0.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert!(rig.set_action_tag(23));

    // Falling ends the thunder jump
    let report = rig.step(&airborne(Vec2::new(0.0, -10.0), input(Vec2::ZERO, idle())));
    assert!(report.has(sub(SubActionKind::ThunderJump), TransitionKind::Exited));
    assert!(rig.set_action_tag(6));
    assert!(rig.state.attacking);
}

#[test]
fn test_bubble_bounce_keeps_jump_and_frees_sub_slot() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.shield = Some(ShieldKind::Bubble);
    rig.jump();

    rig.step(&airborne(Vec2::new(80.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::BubbleBounce));
    assert_eq!(rig.state.velocity, Vec2::new(0.0, -rig.tuning.bubble_drop_speed));

    let report = rig.step(&grounded(Vec2::new(0.0, -480.0), input(Vec2::ZERO, idle())));

    assert!(report.has(sub(SubActionKind::BubbleBounce), TransitionKind::Exited));
    assert!(!report.has(primary(ActionKind::Jump), TransitionKind::Exited));
    assert_eq!(rig.slot.current(), Some(ActionKind::Jump));
    assert_eq!(rig.state.velocity.y, rig.tuning.bubble_bounce_speed);
    let sub_slot = rig.slot.sub_slot(ActionKind::Jump).expect("jump hosts sub-actions");
    assert!(!sub_slot.is_consumed());

    let report = rig.step(&airborne(Vec2::new(0.0, 300.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert!(report.has(sub(SubActionKind::BubbleBounce), TransitionKind::Launched));
}

#[test]
fn test_bubble_bounce_into_wall_bounces_instead_of_pushing() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.shield = Some(ShieldKind::Bubble);
    rig.jump();
    rig.step(&airborne(Vec2::new(0.0, 200.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::BubbleBounce));

    let mut landing = PhysicsSnapshot::grounded().with_velocity(Vec2::new(0.0, -480.0));
    landing.wall = Some(WallContact {
        side: WallSide::Right,
        ledge_top: false,
    });
    let report = rig.step(&Frame::new(landing, input(RIGHT, idle())));

    assert!(!report.has(primary(ActionKind::Push), TransitionKind::Launched));
    assert!(report.has(sub(SubActionKind::BubbleBounce), TransitionKind::Exited));
    assert_eq!(rig.slot.current(), Some(ActionKind::Jump));
    assert_eq!(rig.state.velocity.y, rig.tuning.bubble_bounce_speed);
}

#[test]
fn test_homing_attack_chains_after_hit() {
    let mut rig = TestRig::new(Loadout::sonic_homing());
    rig.jump();

    let origin = Vec2::new(0.0, 100.0);
    let world = WorldSnapshot {
        homing_targets: vec![
            HomingTarget {
                id: 7,
                position: Vec2::new(60.0, 80.0),
                obstructed: false,
            },
            HomingTarget {
                id: 8,
                position: Vec2::new(30.0, 100.0),
                obstructed: true,
            },
        ],
        ..Default::default()
    };
    let mut physics = PhysicsSnapshot::airborne(Vec2::new(0.0, 150.0));
    physics.position = origin;

    let press = Frame::new(physics.clone(), input(Vec2::ZERO, ButtonState::just_pressed()))
        .with_world(world.clone());
    rig.step(&press);
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::HomingAttack));
    assert_eq!(rig.state.gravity_scale, 0.0);

    let seek = Frame::new(physics.clone(), input(Vec2::ZERO, idle())).with_world(world.clone());
    rig.step(&seek);
    assert!(rig.state.velocity.x > 0.0);
    assert!(rig.state.velocity.y < 0.0);

    let mut contact = world.clone();
    contact.contacted_targets = vec![7];
    let hit = Frame::new(physics.clone(), input(Vec2::ZERO, idle())).with_world(contact);
    let report = rig.step(&hit);

    assert!(report.has(sub(SubActionKind::HomingAttack), TransitionKind::Exited));
    assert_eq!(rig.state.velocity, Vec2::new(0.0, rig.tuning.homing_bounce_speed));
    assert_eq!(rig.state.gravity_scale, 1.0);
    assert_eq!(rig.slot.current(), Some(ActionKind::Jump));

    rig.step(&press);
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::HomingAttack));
}

#[test]
fn test_homing_without_target_dashes_forward() {
    let mut rig = TestRig::new(Loadout::sonic_homing());
    rig.jump();

    rig.step(&airborne(Vec2::new(0.0, 150.0), input(Vec2::ZERO, ButtonState::just_pressed())));

    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::HomingAttack));
    assert_eq!(rig.state.velocity, Vec2::new(rig.tuning.homing_dash_speed, 0.0));
}

#[test]
fn test_glide_landing_hands_off_to_glide_slide() {
    let mut rig = TestRig::new(Loadout::knuckles());
    rig.jump();

    rig.step(&airborne(Vec2::new(100.0, 50.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::Glide));
    assert_eq!(rig.state.size_mode, SizeMode::Gliding);
    assert_eq!(rig.state.gravity_scale, 0.0);

    rig.step(&airborne(Vec2::new(240.0, -30.0), input(Vec2::ZERO, ButtonState::holding())));
    let report = rig.step(&grounded(Vec2::new(240.0, 0.0), input(Vec2::ZERO, ButtonState::holding())));

    assert!(report.has(primary(ActionKind::GlideSlide), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::GlideSlide));
    assert!(rig.state.ground_speed > rig.tuning.glide_start_speed);
    assert_eq!(rig.state.gravity_scale, 1.0);
    assert_eq!(rig.state.input_restriction, InputRestriction::LockAll);

    rig.step(&grounded(Vec2::new(200.0, 0.0), input(Vec2::ZERO, ButtonState::holding())));
    assert!(rig.state.ground_speed < 200.0);

    let report = rig.step(&grounded(Vec2::new(150.0, 0.0), input(Vec2::ZERO, idle())));
    assert!(report.has(primary(ActionKind::GlideSlide), TransitionKind::Exited));
    assert!(rig.state.is_neutral());
}

#[test]
fn test_minimal_glider_lands_into_glide_slide() {
    let mut rig = TestRig::new(glider());
    rig.jump();
    rig.step(&airborne(Vec2::new(100.0, 50.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::Glide));
    rig.step(&airborne(Vec2::new(240.0, -30.0), input(Vec2::ZERO, ButtonState::holding())));

    let report = rig.step(&grounded(Vec2::new(240.0, 0.0), input(Vec2::ZERO, ButtonState::holding())));

    assert!(report.has(primary(ActionKind::Jump), TransitionKind::Exited));
    assert!(report.has(primary(ActionKind::GlideSlide), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::GlideSlide));
}

#[test]
fn test_glide_let_go_drops_and_lands_without_slide() {
    let mut rig = TestRig::new(Loadout::knuckles());
    rig.jump();
    rig.step(&airborne(Vec2::new(100.0, 50.0), input(Vec2::ZERO, ButtonState::just_pressed())));

    rig.step(&airborne(Vec2::new(240.0, -30.0), input(Vec2::ZERO, ButtonState::just_released())));
    assert_eq!(rig.state.gravity_scale, 1.0);
    assert_eq!(rig.state.velocity.x, 240.0 * rig.tuning.glide_drop_keep);

    rig.step(&grounded(Vec2::new(60.0, 0.0), input(Vec2::ZERO, idle())));
    assert_eq!(rig.slot.current(), None);
    assert!(rig.state.is_neutral());
}

#[test]
fn test_climb_grabs_wall_and_wall_jumps() {
    let mut rig = TestRig::new(Loadout::knuckles());
    rig.jump();
    rig.step(&airborne(Vec2::new(100.0, 50.0), input(Vec2::ZERO, ButtonState::just_pressed())));

    let mut wall = PhysicsSnapshot::airborne(Vec2::new(240.0, -30.0));
    wall.wall = Some(WallContact {
        side: WallSide::Right,
        ledge_top: false,
    });
    let report = rig.step(&Frame::new(wall.clone(), input(Vec2::ZERO, ButtonState::holding())));

    let changes: Vec<_> = report.transitions.iter().map(|t| (t.action, t.change)).collect();
    assert_eq!(
        changes,
        vec![
            (sub(SubActionKind::Glide), TransitionKind::ForcedExit),
            (primary(ActionKind::Jump), TransitionKind::ForcedExit),
            (primary(ActionKind::Climb), TransitionKind::Launched),
        ]
    );
    assert_eq!(rig.state.gravity_scale, 0.0);
    assert!(!rig.state.attacking);

    rig.step(&Frame::new(wall.clone(), input(UP, idle())));
    assert_eq!(rig.state.velocity, Vec2::new(0.0, rig.tuning.climb_speed));

    let report = rig.step(&Frame::new(wall, input(Vec2::ZERO, ButtonState::just_pressed())));

    assert!(report.has(primary(ActionKind::Climb), TransitionKind::Exited));
    assert!(report.has(primary(ActionKind::Jump), TransitionKind::HandedOff));
    assert_eq!(rig.state.facing, Facing::Left);
    assert_eq!(rig.state.velocity.x, -rig.tuning.wall_jump_speed);
    assert_eq!(rig.state.velocity.y, rig.tuning.jump_speed);
    assert_eq!(rig.state.gravity_scale, 1.0);
}

#[test]
fn test_ledge_climb_pulls_up_over_the_top() {
    let mut rig = TestRig::new(Loadout::knuckles());
    rig.jump();
    rig.step(&airborne(Vec2::new(100.0, 50.0), input(Vec2::ZERO, ButtonState::just_pressed())));

    let mut wall = PhysicsSnapshot::airborne(Vec2::ZERO);
    wall.wall = Some(WallContact {
        side: WallSide::Right,
        ledge_top: false,
    });
    rig.step(&Frame::new(wall.clone(), input(Vec2::ZERO, ButtonState::holding())));
    assert_eq!(rig.slot.current(), Some(ActionKind::Climb));

    let mut top = wall.clone();
    top.wall = Some(WallContact {
        side: WallSide::Right,
        ledge_top: true,
    });
    rig.step(&Frame::new(top.clone(), input(UP, idle())));
    assert_eq!(rig.slot.current(), Some(ActionKind::LedgeClimb));

    for _ in 0..rig.tuning.ledge_climb_steps {
        rig.step(&Frame::new(top.clone(), input(Vec2::ZERO, idle())));
    }
    assert_eq!(rig.slot.current(), None);
    let pop = rig.tuning.ledge_pop_speed;
    assert_eq!(rig.state.velocity, Vec2::new(pop, pop));
    assert!(rig.state.is_neutral());
}

#[test]
fn test_super_transform_grants_super_form() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.rings = rig.tuning.super_ring_cost;
    rig.state.emeralds = rig.tuning.super_emeralds;
    rig.jump();

    let press = InputSnapshot {
        special: ButtonState::just_pressed(),
        ..Default::default()
    };
    rig.step(&airborne(Vec2::new(0.0, 200.0), press));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::SuperTransform));
    assert_eq!(rig.state.input_restriction, InputRestriction::LockAll);

    for _ in 0..rig.tuning.super_transform_steps {
        rig.step(&airborne(Vec2::ZERO, InputSnapshot::default()));
    }
    assert_eq!(rig.slot.current_sub(), None);
    assert!(rig.state.super_form);
    assert_eq!(rig.state.gravity_scale, 1.0);
    assert_eq!(rig.state.input_restriction, InputRestriction::Unrestricted);
}

#[test]
fn test_fly_ends_on_landing() {
    let mut rig = TestRig::new(Loadout::tails());
    rig.jump();

    rig.step(&airborne(Vec2::new(0.0, 100.0), input(Vec2::ZERO, ButtonState::just_pressed())));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::Fly));
    assert_eq!(rig.state.gravity_scale, rig.tuning.fly_gravity_scale);

    let report = rig.step(&grounded(Vec2::ZERO, input(Vec2::ZERO, idle())));
    assert!(report.has(primary(ActionKind::Jump), TransitionKind::Exited));
    assert_eq!(rig.state.gravity_scale, 1.0);
    assert_eq!(rig.slot.pending_timers(), 0);
}

// --- Damage and terminal actions ---

fn damage_from(source_x: f32) -> WorldSnapshot {
    WorldSnapshot {
        damage: Some(DamageContact { source_x }),
        ..Default::default()
    }
}

#[test]
fn test_hurt_scatters_rings_then_grants_invulnerability() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.rings = 10;

    let hit = grounded(Vec2::ZERO, InputSnapshot::default()).with_world(damage_from(50.0));
    rig.step(&hit);

    assert_eq!(rig.slot.current(), Some(ActionKind::Hurt));
    assert_eq!(rig.state.rings, 0);
    assert_eq!(rig.state.input_restriction, InputRestriction::LockAll);
    assert_eq!(
        rig.state.velocity,
        Vec2::new(-rig.tuning.hurt_knockback_x, rig.tuning.hurt_knockback_y)
    );

    rig.step(&airborne(Vec2::new(-120.0, 100.0), InputSnapshot::default()));
    let report = rig.step(&grounded(Vec2::ZERO, InputSnapshot::default()));
    assert!(report.has(primary(ActionKind::Hurt), TransitionKind::Exited));
    assert_eq!(rig.state.invulnerable_steps, rig.tuning.hurt_invulnerable_steps);
    assert_eq!(rig.state.input_restriction, InputRestriction::Unrestricted);
    assert_eq!(rig.slot.pending_timers(), 0);

    // Ringless but still invulnerable: no death
    rig.step(&hit);
    assert_eq!(rig.slot.current(), None);
}

#[test]
fn test_hurt_drops_shield_before_rings() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.rings = 10;
    rig.state.shield = Some(ShieldKind::Fire);

    rig.step(&grounded(Vec2::ZERO, InputSnapshot::default()).with_world(damage_from(-50.0)));

    assert_eq!(rig.slot.current(), Some(ActionKind::Hurt));
    assert_eq!(rig.state.shield, None);
    assert_eq!(rig.state.rings, 10);
    assert!(rig.state.velocity.x > 0.0);
}

#[test]
fn test_unprotected_damage_kills_and_respawns() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.jump();

    let report = rig.step(&airborne(Vec2::new(0.0, 100.0), InputSnapshot::default()).with_world(damage_from(10.0)));

    assert!(report.has(primary(ActionKind::Jump), TransitionKind::ForcedExit));
    assert_eq!(rig.slot.current(), Some(ActionKind::Die));
    assert!(!rig.state.attacking);
    assert_eq!(rig.state.velocity, Vec2::new(0.0, rig.tuning.death_hop_speed));

    for _ in 0..rig.tuning.respawn_delay_steps {
        rig.step(&airborne(Vec2::new(0.0, -200.0), InputSnapshot::default()));
    }
    assert_eq!(rig.slot.current(), None);
    assert_eq!(rig.state.input_restriction, InputRestriction::Unrestricted);
}

#[test]
fn test_lethal_hazard_kills_despite_rings() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.state.rings = 30;
    let world = WorldSnapshot {
        lethal_hazard: true,
        ..Default::default()
    };

    rig.step(&airborne(Vec2::ZERO, InputSnapshot::default()).with_world(world));

    assert_eq!(rig.slot.current(), Some(ActionKind::Die));
    assert_eq!(rig.slot.lifecycle(ActionKind::Hurt), Some(Lifecycle::Idle));
}

#[test]
fn test_victory_locks_input_until_goal_clears() {
    let mut rig = TestRig::new(Loadout::sonic());
    let world = WorldSnapshot {
        goal_reached: true,
        ..Default::default()
    };

    rig.step(&grounded(Vec2::new(300.0, 0.0), InputSnapshot::default()).with_world(world.clone()));
    assert_eq!(rig.slot.current(), Some(ActionKind::Victory));
    assert!(rig.effects.camera.contains(&CameraRequest::Freeze));

    // A jump press cannot pre-empt the victory pose
    rig.step(&grounded(Vec2::new(300.0, 0.0), input(Vec2::ZERO, ButtonState::just_pressed())).with_world(world));
    assert_eq!(rig.slot.current(), Some(ActionKind::Victory));
    assert!(rig.state.ground_speed < 300.0);
}

// --- Contract enforcement ---

#[test]
fn test_lifecycle_calls_are_symmetric() {
    let (mut rig, log) = recorder_rig(RecorderRules::default(), Vec::new());

    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::holding())));
    let report = rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_released())));

    assert!(report.has(primary(ActionKind::Push), TransitionKind::Exited));
    let log = log.lock().expect("recorder log");
    assert_eq!(
        *log,
        vec!["start", "perform", "end:Some(Natural)", "reset"]
    );
    assert!(rig.state.is_neutral());
    assert!(!rig.state.attacking);
    assert_eq!(rig.slot.pending_timers(), 0);
}

#[test]
fn test_leaked_timer_is_swept_and_reported() {
    let rules = RecorderRules {
        leak_timer: true,
        ..Default::default()
    };
    let (mut rig, _log) = recorder_rig(rules, Vec::new());
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));

    let failure = rig
        .try_step(&grounded(Vec2::ZERO, special(ButtonState::just_released())))
        .expect_err("leaked timer is reported");

    assert!(failure.report.has(primary(ActionKind::Push), TransitionKind::Exited));
    match failure.error {
        TickError::DanglingTimer { owner, count, .. } => {
            assert_eq!(owner, primary(ActionKind::Push));
            assert_eq!(count, 1);
        }
        other => panic!("expected a dangling timer, got {other:?}"),
    }
    assert_eq!(rig.slot.current(), None);
    assert_eq!(rig.slot.pending_timers(), 0);
}

#[test]
fn test_exit_with_input_restricted_is_reported_and_cleared() {
    let rules = RecorderRules {
        leave_restricted: true,
        ..Default::default()
    };
    let (mut rig, _log) = recorder_rig(rules, Vec::new());
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));

    let failure = rig
        .try_step(&grounded(Vec2::ZERO, special(ButtonState::just_released())))
        .expect_err("restricted exit is reported");

    assert_eq!(
        failure.error,
        TickError::InputLeftRestricted {
            action: primary(ActionKind::Push)
        }
    );
    assert_eq!(failure.report.transitions.len(), 1);
    assert!(failure.report.has(primary(ActionKind::Push), TransitionKind::Exited));
    assert_eq!(rig.state.input_restriction, InputRestriction::Unrestricted);
}

#[test]
fn test_hand_off_launches_in_same_step() {
    let rules = RecorderRules {
        hand_off: Some(ActionKind::Roll),
        ..Default::default()
    };
    let (mut rig, _log) = recorder_rig(rules, vec![Box::new(Roll::default())]);
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));

    let report = rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_released())));

    assert!(report.has(primary(ActionKind::Push), TransitionKind::Exited));
    assert!(report.has(primary(ActionKind::Roll), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::Roll));
    assert_eq!(rig.slot.previous(), Some(ActionKind::Push));
    assert_eq!(rig.slot.lifecycle(ActionKind::Push), Some(Lifecycle::Idle));
}

#[test]
fn test_hand_off_to_unregistered_action_is_a_violation() {
    let rules = RecorderRules {
        hand_off: Some(ActionKind::Jump),
        ..Default::default()
    };
    let (mut rig, _log) = recorder_rig(rules, Vec::new());
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));

    let failure = rig
        .try_step(&grounded(Vec2::ZERO, special(ButtonState::just_released())))
        .expect_err("unregistered hand-off is reported");

    assert!(matches!(failure.error, TickError::ContractViolation { .. }));
    assert!(failure.error.is_contract_bug());
    assert!(failure.report.has(primary(ActionKind::Push), TransitionKind::Exited));
    assert_eq!(rig.slot.current(), None);
}

#[test]
fn test_forced_exit_discards_hand_off() {
    let rules = RecorderRules {
        hand_off: Some(ActionKind::Roll),
        ..Default::default()
    };
    let log = Arc::new(Mutex::new(Vec::new()));
    let slot = PrimaryActionSlot::new(
        "forced",
        vec![
            instantiate_primary(ActionKind::Die, &NO_SUBS),
            Recorder::boxed(rules, &log),
            Box::new(Roll::default()),
        ],
    );
    let mut rig = TestRig::with_slot(slot);
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));
    assert_eq!(rig.slot.current(), Some(ActionKind::Push));

    let lethal = WorldSnapshot {
        lethal_hazard: true,
        ..Default::default()
    };
    let report = rig.step(&grounded(Vec2::ZERO, special(ButtonState::holding())).with_world(lethal));

    assert!(report.has(primary(ActionKind::Push), TransitionKind::ForcedExit));
    assert!(!report.has(primary(ActionKind::Roll), TransitionKind::HandedOff));
    assert_eq!(rig.slot.current(), Some(ActionKind::Die));
    let log = log.lock().expect("recorder log");
    assert_eq!(log.last().map(String::as_str), Some("reset"));
    assert!(log.contains(&format!("end:{:?}", Some(ExitReason::Forced))));
}

#[test]
fn test_forced_exit_tears_down_sub_action_before_parent() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let slot = PrimaryActionSlot::new(
        "nested",
        vec![
            Box::new(Die::default()),
            Recorder::hosting(RecorderRules::default(), &log),
        ],
    );
    let mut rig = TestRig::with_slot(slot);
    rig.step(&grounded(Vec2::ZERO, special(ButtonState::just_pressed())));
    let both = InputSnapshot {
        jump: ButtonState::just_pressed(),
        special: ButtonState::holding(),
        ..Default::default()
    };
    rig.step(&grounded(Vec2::ZERO, both));
    assert_eq!(rig.slot.current_sub(), Some(SubActionKind::InstaShield));
    assert!(rig.state.attacking);

    let lethal = WorldSnapshot {
        lethal_hazard: true,
        ..Default::default()
    };
    let report = rig.step(&grounded(Vec2::ZERO, special(ButtonState::holding())).with_world(lethal));

    let nested = ActionId::Sub {
        parent: ActionKind::Push,
        kind: SubActionKind::InstaShield,
    };
    assert_eq!(report.transitions[0].action, nested);
    assert_eq!(report.transitions[0].change, TransitionKind::ForcedExit);
    assert_eq!(report.transitions[1].action, primary(ActionKind::Push));
    assert_eq!(report.transitions[1].change, TransitionKind::ForcedExit);
    assert_eq!(report.transitions[2].action, primary(ActionKind::Die));
    assert!(!rig.state.attacking);

    let log = log.lock().expect("recorder log");
    assert_eq!(
        *log,
        vec![
            "start",
            "perform",
            "sub:start",
            "sub:end:Some(ParentExit)",
            "sub:reset",
            "end:Some(Forced)",
            "reset",
        ]
    );
}

#[test]
fn test_missing_snapshot_leaves_everything_untouched() {
    let mut rig = TestRig::new(Loadout::sonic());
    rig.jump();
    let state = rig.state.clone();
    let step = rig.slot.step();
    let timers = rig.slot.pending_timers();

    let failure = rig
        .try_step(&Frame::default())
        .expect_err("missing snapshot is reported");

    assert_eq!(failure.error, TickError::MissingSnapshot);
    assert!(!failure.error.is_contract_bug());
    assert!(failure.report.transitions.is_empty());
    assert_eq!(rig.state, state);
    assert_eq!(rig.slot.step(), step);
    assert_eq!(rig.slot.pending_timers(), timers);
    assert_eq!(rig.slot.current(), Some(ActionKind::Jump));
    assert!(rig.effects.is_empty());
}

// --- Composition ---

#[test]
fn test_presets_compose() {
    for loadout in Loadout::presets() {
        let slot = compose(&loadout).expect("preset composes");
        assert_eq!(slot.priorities(), loadout.primary);
        assert_eq!(slot.current(), None);
    }
}

#[test]
fn test_review_rejects_duplicates() {
    let loadout = Loadout::new("dup", [ActionKind::Jump, ActionKind::Jump], NO_SUBS);
    assert!(matches!(
        review(&loadout),
        Err(CompositionError::DuplicatePrimary {
            kind: ActionKind::Jump,
            ..
        })
    ));

    let loadout = Loadout::new(
        "dup_sub",
        [ActionKind::Jump, ActionKind::Roll],
        [SubActionKind::DropDash, SubActionKind::DropDash],
    );
    assert!(matches!(
        review(&loadout),
        Err(CompositionError::DuplicateSub { .. })
    ));
}

#[test]
fn test_review_rejects_priority_inversion() {
    let loadout = Loadout::new(
        "inverted",
        [ActionKind::Jump, ActionKind::Spindash, ActionKind::Roll],
        NO_SUBS,
    );
    assert_eq!(
        review(&loadout),
        Err(CompositionError::PriorityOrder {
            loadout: "inverted".to_string(),
            earlier: "spindash".to_string(),
            later: "jump".to_string(),
        })
    );

    let loadout = Loadout::new("head", [ActionKind::Hurt, ActionKind::Die, ActionKind::Jump], NO_SUBS);
    assert!(matches!(
        review(&loadout),
        Err(CompositionError::PriorityOrder { .. })
    ));

    let loadout = Loadout::new(
        "transform_late",
        [ActionKind::Jump],
        [SubActionKind::Fly, SubActionKind::SuperTransform],
    );
    assert!(matches!(
        review(&loadout),
        Err(CompositionError::PriorityOrder { .. })
    ));
}

#[test]
fn test_review_rejects_missing_prerequisites() {
    let loadout = Loadout::new("no_roll", [ActionKind::Jump], [SubActionKind::DropDash]);
    assert_eq!(
        review(&loadout),
        Err(CompositionError::MissingPrerequisite {
            loadout: "no_roll".to_string(),
            kind: "drop_dash".to_string(),
            requires: "roll".to_string(),
        })
    );

    let loadout = Loadout::new("no_jump", [ActionKind::Roll], [SubActionKind::Fly]);
    assert!(matches!(
        review(&loadout),
        Err(CompositionError::MissingPrerequisite { .. })
    ));

    let loadout = Loadout::new("no_glide", [ActionKind::Jump, ActionKind::GlideSlide], NO_SUBS);
    assert!(matches!(
        review(&loadout),
        Err(CompositionError::MissingPrerequisite { .. })
    ));

    let loadout = Loadout::new("no_slide", [ActionKind::Jump], [SubActionKind::Glide]);
    assert_eq!(
        review(&loadout),
        Err(CompositionError::MissingPrerequisite {
            loadout: "no_slide".to_string(),
            kind: "glide".to_string(),
            requires: "glide_slide".to_string(),
        })
    );
}

#[test]
fn test_review_rejects_empty_loadout() {
    let loadout = Loadout::new("empty", Vec::<ActionKind>::new(), NO_SUBS);
    assert_eq!(
        compose(&loadout).err(),
        Some(CompositionError::Empty {
            loadout: "empty".to_string()
        })
    );
}
