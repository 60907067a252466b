//! Core domain: fixed simulation step rate and conversions.

/// Fixed simulation rate shared by the scheduler, the timer table and `Time<Fixed>`.
pub const STEP_RATE_HZ: u32 = 60;

/// Length of one simulation step in seconds.
pub const STEP_SECS: f32 = 1.0 / STEP_RATE_HZ as f32;

/// Convert a duration in seconds to whole steps, rounding up so a
/// non-zero duration never collapses to zero steps.
pub fn steps_from_secs(secs: f32) -> u32 {
    if secs <= 0.0 {
        return 0;
    }
    (secs * STEP_RATE_HZ as f32).ceil() as u32
}

pub fn secs_from_steps(steps: u32) -> f32 {
    steps as f32 * STEP_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_from_secs_rounds_up() {
        assert_eq!(steps_from_secs(0.0), 0);
        assert_eq!(steps_from_secs(1.0), 60);
        assert_eq!(steps_from_secs(0.001), 1);
        assert_eq!(steps_from_secs(-2.0), 0);
    }

    #[test]
    fn test_secs_from_steps() {
        assert!((secs_from_steps(30) - 0.5).abs() < 1e-6);
        assert_eq!(secs_from_steps(0), 0.0);
    }
}
