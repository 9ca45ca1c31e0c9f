use crate::config::params::LanderParams;
use crate::state::SimState;
use crate::termination::is_successful_landing;

pub const THRUST_PENALTY: f64 = 0.1;
pub const DISTANCE_PENALTY: f64 = 0.01;
pub const SPEED_PENALTY: f64 = 0.1;
pub const TILT_PENALTY: f64 = 0.5;
pub const LANDING_BONUS: f64 = 1000.0;
pub const CRASH_PENALTY: f64 = 500.0;

/// Per-step shaping terms, all non-positive.
pub fn shaping(state: &SimState, thrust: f64) -> f64 {
    -thrust * THRUST_PENALTY
        - state.distance_to_pad() * DISTANCE_PENALTY
        - state.speed() * SPEED_PENALTY
        - state.tilt.abs() * TILT_PENALTY
}

/// Reward for the step that produced `state` with the given (clamped) thrust.
pub fn evaluate(params: &LanderParams, state: &SimState, thrust: f64) -> f64 {
    let mut reward = shaping(state, thrust);
    if is_successful_landing(params, state) {
        reward += LANDING_BONUS;
    } else if state.has_touched_down() {
        reward -= CRASH_PENALTY;
    }
    reward
}
