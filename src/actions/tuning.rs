//! Actions domain: thresholds, speeds and timer lengths for the catalog.
//!
//! Speeds are world units per second and accelerations units per second
//! squared at the fixed step rate; durations are in steps.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActionTuning {
    /// Below this ground speed the entity counts as standing still
    pub rest_speed: f32,

    pub jump_speed: f32,
    /// Upward speed clamp applied when jump is released early
    pub jump_release_speed: f32,
    pub min_jump_clearance: f32,

    pub min_roll_speed: f32,
    pub roll_stop_speed: f32,
    pub roll_friction: f32,
    pub roll_brake: f32,
    pub roll_slope_up: f32,
    pub roll_slope_down: f32,

    pub spindash_rev_step: f32,
    pub spindash_max_rev: f32,
    pub min_spindash_rev: f32,
    /// Fraction of the rev lost per step while jump is not pressed
    pub spindash_rev_decay: f32,
    pub spindash_camera_lag_steps: u32,

    pub peel_out_charge_steps: u32,
    pub peel_out_speed: f32,

    pub look_pan_delay_steps: u32,
    pub look_up_offset: f32,
    pub look_down_offset: f32,

    pub skid_min_speed: f32,
    pub skid_decel: f32,
    pub skid_dust_period_steps: u32,

    pub climb_speed: f32,
    pub ledge_climb_steps: u32,
    pub ledge_pop_speed: f32,
    pub wall_jump_speed: f32,

    pub glide_start_speed: f32,
    pub glide_accel: f32,
    pub glide_max_speed: f32,
    pub glide_sink_speed: f32,
    pub glide_turn_steps: u32,
    pub glide_turn_grace_steps: u32,
    /// Horizontal speed kept when letting go of a glide
    pub glide_drop_keep: f32,
    pub glide_slide_friction: f32,

    pub fly_gravity_scale: f32,
    pub fly_thrust: f32,
    pub fly_max_rise: f32,
    pub fly_duration_steps: u32,

    pub homing_radius: f32,
    pub homing_speed: f32,
    pub homing_dash_speed: f32,
    pub homing_hit_radius: f32,
    pub homing_timeout_steps: u32,
    pub homing_bounce_speed: f32,

    pub drop_dash_charge_steps: u32,
    pub drop_dash_speed: f32,
    pub drop_dash_max_speed: f32,

    pub insta_shield_steps: u32,
    pub fire_dash_speed: f32,
    pub fire_dash_steps: u32,
    pub bubble_drop_speed: f32,
    pub bubble_bounce_speed: f32,
    pub thunder_jump_speed: f32,

    pub super_ring_cost: u32,
    pub super_emeralds: u8,
    pub super_transform_steps: u32,

    pub hurt_knockback_x: f32,
    pub hurt_knockback_y: f32,
    pub hurt_invulnerable_steps: u32,
    pub hurt_flicker_period_steps: u32,

    pub death_hop_speed: f32,
    pub respawn_delay_steps: u32,

    pub victory_decel: f32,
}

impl Default for ActionTuning {
    fn default() -> Self {
        Self {
            rest_speed: 6.0,

            jump_speed: 390.0,
            jump_release_speed: 240.0,
            min_jump_clearance: 25.0,

            min_roll_speed: 61.875,
            roll_stop_speed: 30.0,
            roll_friction: 84.375,
            roll_brake: 450.0,
            roll_slope_up: 281.25,
            roll_slope_down: 1125.0,

            spindash_rev_step: 120.0,
            spindash_max_rev: 480.0,
            min_spindash_rev: 480.0,
            spindash_rev_decay: 0.03125,
            spindash_camera_lag_steps: 16,

            peel_out_charge_steps: 30,
            peel_out_speed: 720.0,

            look_pan_delay_steps: 120,
            look_up_offset: 104.0,
            look_down_offset: -88.0,

            skid_min_speed: 240.0,
            skid_decel: 1800.0,
            skid_dust_period_steps: 4,

            climb_speed: 60.0,
            ledge_climb_steps: 18,
            ledge_pop_speed: 120.0,
            wall_jump_speed: 240.0,

            glide_start_speed: 240.0,
            glide_accel: 56.25,
            glide_max_speed: 1440.0,
            glide_sink_speed: 30.0,
            glide_turn_steps: 16,
            glide_turn_grace_steps: 6,
            glide_drop_keep: 0.25,
            glide_slide_friction: 450.0,

            fly_gravity_scale: 0.142857,
            fly_thrust: 120.0,
            fly_max_rise: 90.0,
            fly_duration_steps: 480,

            homing_radius: 160.0,
            homing_speed: 720.0,
            homing_dash_speed: 480.0,
            homing_hit_radius: 16.0,
            homing_timeout_steps: 60,
            homing_bounce_speed: 390.0,

            drop_dash_charge_steps: 20,
            drop_dash_speed: 480.0,
            drop_dash_max_speed: 720.0,

            insta_shield_steps: 14,
            fire_dash_speed: 480.0,
            fire_dash_steps: 16,
            bubble_drop_speed: 480.0,
            bubble_bounce_speed: 450.0,
            thunder_jump_speed: 330.0,

            super_ring_cost: 50,
            super_emeralds: 7,
            super_transform_steps: 30,

            hurt_knockback_x: 120.0,
            hurt_knockback_y: 240.0,
            hurt_invulnerable_steps: 120,
            hurt_flicker_period_steps: 4,

            death_hop_speed: 420.0,
            respawn_delay_steps: 180,

            victory_decel: 1800.0,
        }
    }
}
