use std::ops::RangeInclusive;

use super::ConfigError;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LanderParams {
    // Time step.
    pub dt: f64,
    // Environment.
    pub gravity: f64,
    // Vehicle.
    pub max_thrust: f64,
    pub mass: f64,
    pub moment_of_inertia: f64,
    pub max_fuel: f64,
    // Fuel units burned per second at full thrust.
    pub fuel_burn_rate: f64,
    // Landing pad, oscillating horizontally around x = 0.
    pub pad_amplitude: f64,
    pub pad_period: f64,
    // World boundaries.
    pub max_altitude: f64,
    pub max_horizontal: f64,
    // Landing criteria.
    pub max_landing_velocity: f64,
    pub max_landing_tilt: f64,
    pub landing_radius: f64,
}

impl Default for LanderParams {
    fn default() -> Self {
        LanderParams {
            dt: 0.1,
            gravity: 9.81,
            max_thrust: 15000.0,
            mass: 1000.0,
            moment_of_inertia: 1000.0,
            max_fuel: 100.0,
            fuel_burn_rate: 0.5,
            pad_amplitude: 50.0,
            pad_period: 20.0,
            max_altitude: 500.0,
            max_horizontal: 200.0,
            max_landing_velocity: 2.0,
            max_landing_tilt: 0.1,
            landing_radius: 5.0,
        }
    }
}

fn require_positive(param: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(param, format!("must be positive, got {value}")))
    }
}

impl LanderParams {
    pub fn to_steps(&self, t: f64) -> usize {
        (t / self.dt).ceil() as usize
    }

    /// Acceleration from thrust alone at full throttle.
    pub fn max_acceleration(&self) -> f64 {
        self.max_thrust / self.mass
    }

    /// Thrust-to-weight ratio at full thrust. Above one the vehicle can climb.
    pub fn thrust_to_weight(&self) -> f64 {
        self.max_thrust / (self.mass * self.gravity)
    }

    /// Time the vehicle can burn at full thrust on a full tank.
    pub fn full_thrust_burn_time(&self) -> f64 {
        self.max_fuel / self.fuel_burn_rate
    }

    /// Horizontal position of the landing pad at simulated time `t`.
    pub fn pad_position(&self, t: f64) -> f64 {
        self.pad_amplitude * (2.0 * std::f64::consts::PI * t / self.pad_period).sin()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("dt", self.dt)?;
        require_positive("mass", self.mass)?;
        require_positive("moment_of_inertia", self.moment_of_inertia)?;
        require_positive("max_fuel", self.max_fuel)?;
        require_positive("pad_period", self.pad_period)?;
        require_positive("max_altitude", self.max_altitude)?;
        require_positive("max_horizontal", self.max_horizontal)?;
        require_positive("max_landing_velocity", self.max_landing_velocity)?;
        require_positive("max_landing_tilt", self.max_landing_tilt)?;
        require_positive("landing_radius", self.landing_radius)?;
        for (param, value) in [
            ("gravity", self.gravity),
            ("max_thrust", self.max_thrust),
            ("fuel_burn_rate", self.fuel_burn_rate),
            ("pad_amplitude", self.pad_amplitude),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::invalid(
                    param,
                    format!("must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Closed interval that a reset draws a state variable from.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub const fn new(low: f64, high: f64) -> Self {
        Interval { low, high }
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.low..=self.high
    }

    pub fn contains(&self, x: f64) -> bool {
        self.range().contains(&x)
    }

    fn validate(&self, param: &'static str) -> Result<(), ConfigError> {
        if !(self.low.is_finite() && self.high.is_finite() && self.low <= self.high) {
            return Err(ConfigError::invalid(
                param,
                format!("expected low <= high, got [{}, {}]", self.low, self.high),
            ));
        }
        // The sampler needs the width itself to be representable.
        if !(self.high - self.low).is_finite() {
            return Err(ConfigError::invalid(
                param,
                format!("range [{}, {}] is too wide", self.low, self.high),
            ));
        }
        Ok(())
    }
}

// Ranges for the randomized initial state drawn on reset.
// Fuel is always reset to the maximum, the pad and clock to zero.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InitialConditions {
    // Lower bound only; the upper bound is the world ceiling.
    pub altitude_min: f64,
    // Fraction of the horizontal bound the vehicle may start within, either side of x = 0.
    pub horizontal_fraction: f64,
    pub vx: Interval,
    pub vy: Interval,
    pub tilt: Interval,
    pub angular_velocity: Interval,
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            altitude_min: 200.0,
            horizontal_fraction: 0.5,
            vx: Interval::new(-10.0, 10.0),
            vy: Interval::new(-5.0, 0.0),
            tilt: Interval::new(-0.5, 0.5),
            angular_velocity: Interval::new(-0.5, 0.5),
        }
    }
}

impl InitialConditions {
    pub fn altitude(&self, params: &LanderParams) -> Interval {
        Interval::new(self.altitude_min, params.max_altitude)
    }

    pub fn x(&self, params: &LanderParams) -> Interval {
        let x_max = self.horizontal_fraction * params.max_horizontal;
        Interval::new(-x_max, x_max)
    }

    pub fn validate(&self, params: &LanderParams) -> Result<(), ConfigError> {
        self.altitude(params).validate("altitude_min")?;
        if self.altitude_min <= 0.0 {
            return Err(ConfigError::invalid(
                "altitude_min",
                format!("must start airborne, got {}", self.altitude_min),
            ));
        }
        if !(0.0..=1.0).contains(&self.horizontal_fraction) {
            return Err(ConfigError::invalid(
                "horizontal_fraction",
                format!("must lie in [0, 1], got {}", self.horizontal_fraction),
            ));
        }
        self.x(params).validate("horizontal_fraction")?;
        self.vx.validate("vx")?;
        self.vy.validate("vy")?;
        self.tilt.validate("tilt")?;
        self.angular_velocity.validate("angular_velocity")?;
        if self.tilt.low <= -std::f64::consts::PI || self.tilt.high > std::f64::consts::PI {
            return Err(ConfigError::invalid("tilt", "must lie within (-pi, pi]".to_string()));
        }
        Ok(())
    }
}
