use std::f64::consts::PI;

use nalgebra::{Point2, Vector2};

use crate::config::params::LanderParams;
use crate::math::{clamp_or, wrap_angle};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SimState {
    // (x, altitude). Altitude may dip below zero for the step that touches down.
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    // In (-π, π], zero is upright.
    pub tilt: f64,
    pub angular_velocity: f64,
    pub fuel: f64,
    pub pad_x: f64,
    pub t: f64,
    pub step: usize,
}

impl SimState {
    pub fn new(
        position: Point2<f64>,
        velocity: Vector2<f64>,
        tilt: f64,
        angular_velocity: f64,
        fuel: f64,
    ) -> SimState {
        SimState {
            position,
            velocity,
            tilt,
            angular_velocity,
            fuel,
            pad_x: 0.0,
            t: 0.0,
            step: 0,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn distance_to_pad(&self) -> f64 {
        (self.x() - self.pad_x).abs()
    }

    pub fn has_touched_down(&self) -> bool {
        self.altitude() <= 0.0
    }

    /// Restore the state invariants: fuel within the tank, tilt wrapped.
    pub fn normalized(mut self, params: &LanderParams) -> SimState {
        self.fuel = clamp_or(self.fuel, 0.0, params.max_fuel, 0.0);
        self.tilt = wrap_angle(self.tilt);
        self
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            altitude: self.altitude(),
            x: self.x(),
            velocity: [self.velocity.x, self.velocity.y],
            tilt: self.tilt,
            angular_velocity: self.angular_velocity,
            fuel: self.fuel,
            pad_x: self.pad_x,
            time: self.t,
        }
    }
}

pub const THRUST_RANGE: (f64, f64) = (0.0, 1.0);
pub const ANGLE_RANGE: (f64, f64) = (-1.0, 1.0);

/// Per-step command: thrust magnitude in [0, 1], steering angle in [-1, 1].
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Action {
    pub thrust: f64,
    pub angle: f64,
}

impl Action {
    pub const IDLE: Action = Action {
        thrust: 0.0,
        angle: 0.0,
    };

    pub fn new(thrust: f64, angle: f64) -> Self {
        Action { thrust, angle }
    }

    /// Bring both components into range. NaN means "no command" and maps to zero.
    pub fn clamped(self) -> Action {
        Action {
            thrust: clamp_or(self.thrust, THRUST_RANGE.0, THRUST_RANGE.1, 0.0),
            angle: clamp_or(self.angle, ANGLE_RANGE.0, ANGLE_RANGE.1, 0.0),
        }
    }
}

pub const OBSERVATION_SIZE: usize = 7;
pub const MAX_OBSERVED_SPEED: f64 = 50.0;
pub const MAX_OBSERVED_ANGULAR_VELOCITY: f64 = 5.0;

/// Bounds of each observation component, in observation order.
pub fn observation_bounds(
    params: &LanderParams,
) -> ([f64; OBSERVATION_SIZE], [f64; OBSERVATION_SIZE]) {
    (
        [
            0.0,
            -MAX_OBSERVED_SPEED,
            -MAX_OBSERVED_SPEED,
            -PI,
            -MAX_OBSERVED_ANGULAR_VELOCITY,
            0.0,
            -params.max_horizontal,
        ],
        [
            params.max_altitude,
            MAX_OBSERVED_SPEED,
            MAX_OBSERVED_SPEED,
            PI,
            MAX_OBSERVED_ANGULAR_VELOCITY,
            params.max_fuel,
            params.max_horizontal,
        ],
    )
}

/// What a decision-maker sees: altitude, vx, vy, tilt, angular velocity,
/// fuel, pad_x. Absolute x is deliberately absent.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Observation(pub [f64; OBSERVATION_SIZE]);

impl Observation {
    pub fn from_state(state: &SimState, params: &LanderParams) -> Observation {
        let raw = [
            state.altitude(),
            state.velocity.x,
            state.velocity.y,
            state.tilt,
            state.angular_velocity,
            state.fuel,
            state.pad_x,
        ];
        let (low, high) = observation_bounds(params);
        Observation(std::array::from_fn(|i| {
            clamp_or(raw[i], low[i], high[i], 0.0)
        }))
    }

    pub fn altitude(&self) -> f64 {
        self.0[0]
    }

    pub fn vx(&self) -> f64 {
        self.0[1]
    }

    pub fn vy(&self) -> f64 {
        self.0[2]
    }

    pub fn tilt(&self) -> f64 {
        self.0[3]
    }

    pub fn angular_velocity(&self) -> f64 {
        self.0[4]
    }

    pub fn fuel(&self) -> f64 {
        self.0[5]
    }

    pub fn pad_x(&self) -> f64 {
        self.0[6]
    }
}

/// Display state for rendering and telemetry, independent of the observation.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub altitude: f64,
    pub x: f64,
    pub velocity: [f64; 2],
    pub tilt: f64,
    pub angular_velocity: f64,
    pub fuel: f64,
    pub pad_x: f64,
    pub time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state() -> SimState {
        SimState::new(
            Point2::new(12.0, 210.0),
            Vector2::new(3.0, -4.0),
            0.2,
            -0.1,
            80.0,
        )
    }

    #[test]
    fn action_is_clamped_not_rejected() {
        let a = Action::new(1.7, -3.0).clamped();
        assert_eq!(a, Action::new(1.0, -1.0));
        let a = Action::new(-0.2, 0.4).clamped();
        assert_eq!(a, Action::new(0.0, 0.4));
    }

    #[test]
    fn nan_action_is_idle() {
        assert_eq!(Action::new(f64::NAN, f64::NAN).clamped(), Action::IDLE);
    }

    #[test]
    fn observation_excludes_x() {
        let params = LanderParams::default();
        let obs = Observation::from_state(&state(), &params);
        assert_eq!(obs.0, [210.0, 3.0, -4.0, 0.2, -0.1, 80.0, 0.0]);
    }

    #[test]
    fn observation_is_clamped_to_bounds() {
        let params = LanderParams::default();
        let mut s = state();
        s.position.y = -1.5;
        s.velocity = Vector2::new(-80.0, 60.0);
        s.angular_velocity = 9.0;
        let obs = Observation::from_state(&s, &params);
        assert_eq!(obs.altitude(), 0.0);
        assert_eq!(obs.vx(), -MAX_OBSERVED_SPEED);
        assert_eq!(obs.vy(), MAX_OBSERVED_SPEED);
        assert_eq!(obs.angular_velocity(), MAX_OBSERVED_ANGULAR_VELOCITY);
    }

    #[test]
    fn speed_and_distance() {
        let mut s = state();
        s.pad_x = 20.0;
        assert_relative_eq!(s.speed(), 5.0);
        assert_relative_eq!(s.distance_to_pad(), 8.0);
    }

    #[test]
    fn normalized_restores_invariants() {
        let params = LanderParams::default();
        let mut s = state();
        s.fuel = 250.0;
        s.tilt = 3.0 * PI / 2.0;
        let s = s.normalized(&params);
        assert_eq!(s.fuel, params.max_fuel);
        assert_relative_eq!(s.tilt, -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn snapshot_carries_velocity_pair() {
        let snap = state().snapshot();
        assert_eq!(snap.velocity, [3.0, -4.0]);
        assert_eq!(snap.altitude, 210.0);
        assert_eq!(snap.x, 12.0);
    }
}
