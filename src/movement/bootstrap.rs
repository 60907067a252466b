//! Movement domain: player bootstrap from the selected loadout and the
//! test stage.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actions::{
    ActionController, ActionFrame, CompositionError, Loadout, PrimaryActionSlot, ShieldKind,
    SizeMode, compose,
};
use crate::bridges::AnimationController;
use crate::content::ContentRegistry;
use crate::core::SelectedCharacter;
use crate::movement::{
    Badnik, Bounds, GameLayer, Goal, Ground, Hazard, Player, RingPickup, ShieldPickup, SpawnPoint,
    Wall,
};

const PLAYER_SPAWN: Vec2 = Vec2::new(-400.0, 0.0);

/// Compose the selected loadout, falling back to the default Sonic set when
/// it is missing or rejected.
pub(crate) fn compose_selected(
    loadout_id: &str,
    registry: Option<&ContentRegistry>,
) -> Option<PrimaryActionSlot> {
    let composed = match registry {
        Some(registry) => registry.compose(loadout_id),
        None => Err(CompositionError::UnknownLoadout(loadout_id.to_string())),
    };

    match composed {
        Ok(slot) => Some(slot),
        Err(err) => {
            warn!("{err}, using default loadout");
            match compose(&Loadout::sonic()) {
                Ok(slot) => Some(slot),
                Err(err) => {
                    error!("Default loadout rejected: {err}");
                    None
                }
            }
        }
    }
}

/// Spawn the player from the selected loadout.
/// This system runs on entering GameState::Run.
pub(crate) fn spawn_player(
    mut commands: Commands,
    selected: Res<SelectedCharacter>,
    registry: Option<Res<ContentRegistry>>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let Some(slot) = compose_selected(&selected.loadout_id, registry.as_deref()) else {
        return;
    };
    info!(
        "Spawning player: loadout={}, actions={:?}",
        slot.loadout(),
        slot.priorities()
    );

    let size = SizeMode::Regular.extents();
    commands.spawn((
        // Identity & actions
        (
            Player,
            SpawnPoint(PLAYER_SPAWN),
            ActionController::new(slot),
            ActionFrame::default(),
        ),
        // Rendering
        AnimationController::default(),
        Sprite {
            color: Color::srgb(0.2, 0.35, 0.95),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity is applied by the locomotion step
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}

/// Swap the player's slot when a different loadout is selected. The old
/// slot is dropped with whatever it had active; state starts fresh.
pub(crate) fn recompose_on_selection(
    selected: Res<SelectedCharacter>,
    registry: Option<Res<ContentRegistry>>,
    mut query: Query<
        (
            &mut ActionController,
            &mut AnimationController,
            &SpawnPoint,
            &mut Transform,
        ),
        With<Player>,
    >,
) {
    if !selected.is_changed() || selected.is_added() {
        return;
    }

    for (mut controller, mut animation, spawn, mut transform) in &mut query {
        if controller.slot.loadout() == selected.loadout_id {
            continue;
        }
        let Some(slot) = compose_selected(&selected.loadout_id, registry.as_deref()) else {
            continue;
        };
        info!("Recomposed player with loadout={}", slot.loadout());
        *controller = ActionController::new(slot);
        *animation = AnimationController::default();
        transform.translation = spawn.0.extend(transform.translation.z);
    }
}

fn terrain(
    commands: &mut Commands,
    marker: impl Bundle,
    layers: CollisionLayers,
    color: Color,
    center: Vec2,
    size: Vec2,
    angle: f32,
) {
    commands.spawn((
        marker,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0).with_rotation(Quat::from_rotation_z(angle)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        layers,
    ));
}

fn trigger(commands: &mut Commands, marker: impl Bundle, color: Color, center: Vec2, size: Vec2) {
    commands.spawn((
        marker,
        Bounds(size * 0.5),
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.5),
    ));
}

/// Floor pieces as (center, size, angle)
const GROUND_PIECES: [(Vec2, Vec2, f32); 5] = [
    // Floor, with a pit between the two halves
    (Vec2::new(-300.0, -150.0), Vec2::new(800.0, 40.0), 0.0),
    (Vec2::new(650.0, -150.0), Vec2::new(900.0, 40.0), 0.0),
    // Slope up to a raised platform whose edge is a balance ledge
    (Vec2::new(-20.0, -100.0), Vec2::new(200.0, 20.0), 0.35),
    (Vec2::new(160.0, -55.0), Vec2::new(160.0, 20.0), 0.0),
    // Ledge on top of the climbable wall
    (Vec2::new(940.0, 140.0), Vec2::new(280.0, 20.0), 0.0),
];

const WALL_PIECES: [(Vec2, Vec2); 2] = [
    (Vec2::new(-720.0, 60.0), Vec2::new(40.0, 460.0)),
    (Vec2::new(820.0, 0.0), Vec2::new(40.0, 260.0)),
];

/// Test stage with a slope, a climbable wall, a ledge, hazards, pickups and
/// a goal post.
pub(crate) fn spawn_stage(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.25, 0.35);
    let ground_color = Color::srgb(0.35, 0.5, 0.3);
    let ring_color = Color::srgb(1.0, 0.85, 0.1);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    for (center, size, angle) in GROUND_PIECES {
        terrain(&mut commands, Ground, ground_layers, ground_color, center, size, angle);
    }
    for (center, size) in WALL_PIECES {
        terrain(&mut commands, Wall, wall_layers, wall_color, center, size, 0.0);
    }

    // Pit floor kills, spikes hurt
    trigger(
        &mut commands,
        Hazard { lethal: true },
        Color::srgb(0.1, 0.1, 0.1),
        Vec2::new(175.0, -240.0),
        Vec2::new(120.0, 40.0),
    );
    trigger(
        &mut commands,
        Hazard { lethal: false },
        Color::srgb(0.85, 0.2, 0.2),
        Vec2::new(450.0, -120.0),
        Vec2::new(40.0, 20.0),
    );

    // Badniks in a rising row for homing chains
    for id in 1..=3u32 {
        let at = Vec2::new(440.0 + 80.0 * id as f32, -40.0 + 20.0 * id as f32);
        trigger(&mut commands, Badnik { id }, Color::srgb(0.9, 0.5, 0.1), at, Vec2::splat(24.0));
    }

    for i in 0..10 {
        let at = Vec2::new(-600.0 + 24.0 * i as f32, -110.0);
        trigger(&mut commands, RingPickup { amount: 1 }, ring_color, at, Vec2::splat(12.0));
    }
    // Enough for the super transform
    trigger(
        &mut commands,
        RingPickup { amount: 50 },
        ring_color,
        Vec2::new(-250.0, -40.0),
        Vec2::splat(20.0),
    );

    for (kind, x) in [
        (ShieldKind::Fire, -150.0),
        (ShieldKind::Bubble, 260.0),
        (ShieldKind::Lightning, 360.0),
    ] {
        let at = Vec2::new(x, -110.0);
        trigger(&mut commands, ShieldPickup(kind), Color::srgb(0.5, 0.8, 1.0), at, Vec2::splat(20.0));
    }

    // Goal post on the ledge behind the climbable wall
    trigger(
        &mut commands,
        Goal,
        Color::srgb(0.95, 0.95, 0.95),
        Vec2::new(1040.0, 180.0),
        Vec2::new(16.0, 60.0),
    );

    info!("Stage spawned");
}
