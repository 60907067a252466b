//! Movement domain: components and physics layers for the stage and the
//! controlled character.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actions::ShieldKind;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, slopes, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Where the player reappears after dying.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Half extents of a trigger volume, checked by overlap rather than by
/// the physics solver.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bounds(pub Vec2);

/// Touching this hurts the player.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    /// Kills regardless of rings or shield (pits, crushers)
    pub lethal: bool,
}

/// Enemy that can be homed onto and is destroyed by an attacking touch.
#[derive(Component, Debug, Clone, Copy)]
pub struct Badnik {
    pub id: u32,
}

/// End-of-stage goal post.
#[derive(Component, Debug)]
pub struct Goal;

#[derive(Component, Debug, Clone, Copy)]
pub struct RingPickup {
    pub amount: u32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ShieldPickup(pub ShieldKind);
