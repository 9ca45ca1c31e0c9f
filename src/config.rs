pub mod params;
pub mod run;

use std::{fs::File, io::Read, path::Path};

use self::params::{InitialConditions, LanderParams};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid parameter `{param}`: {reason}")]
    Invalid { param: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(param: &'static str, reason: String) -> Self {
        ConfigError::Invalid { param, reason }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LanderConfig {
    pub lander: LanderParams,
    pub initial_conditions: InitialConditions,
}

impl LanderConfig {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: LanderConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lander.validate()?;
        self.initial_conditions.validate(&self.lander)
    }

    pub fn print(&self) {
        let p = &self.lander;
        let ic = &self.initial_conditions;
        let x = ic.x(p);
        println!(
            "\
Lander parameters:
  Environment:
    Timestep: {dt} s
    Gravity: {gravity} m/s^2
    Ceiling: {max_altitude} m
    Horizontal bound: ±{max_horizontal} m

  Vehicle:
    Mass: {mass} kg
    Moment of inertia: {inertia} kg·m^2
    Maximum thrust: {max_thrust} N
    Fuel capacity: {max_fuel} units
    Fuel burn rate: {burn_rate} units/s at full thrust

  Landing pad:
    Amplitude: {pad_amplitude} m
    Period: {pad_period} s

  Landing criteria:
    Radius: {landing_radius} m
    Speed: < {max_landing_velocity} m/s
    Tilt: < {max_landing_tilt} rad

  Initial conditions:
    Altitude: [{alt_low}, {alt_high}] m
    Horizontal position: [{x_low}, {x_high}] m
    Velocity: vx [{vx_low}, {vx_high}] m/s, vy [{vy_low}, {vy_high}] m/s
    Tilt: [{tilt_low}, {tilt_high}] rad
    Angular velocity: [{w_low}, {w_high}] rad/s

Computed derived parameters (for info only):
  Maximum thrust acceleration: {max_accel:.2} m/s^2
  Thrust-to-weight ratio: {twr:.2}
  Full-thrust burn time: {burn_time:.1} s",
            dt = p.dt,
            gravity = p.gravity,
            max_altitude = p.max_altitude,
            max_horizontal = p.max_horizontal,
            mass = p.mass,
            inertia = p.moment_of_inertia,
            max_thrust = p.max_thrust,
            max_fuel = p.max_fuel,
            burn_rate = p.fuel_burn_rate,
            pad_amplitude = p.pad_amplitude,
            pad_period = p.pad_period,
            landing_radius = p.landing_radius,
            max_landing_velocity = p.max_landing_velocity,
            max_landing_tilt = p.max_landing_tilt,
            alt_low = ic.altitude_min,
            alt_high = p.max_altitude,
            x_low = x.low,
            x_high = x.high,
            vx_low = ic.vx.low,
            vx_high = ic.vx.high,
            vy_low = ic.vy.low,
            vy_high = ic.vy.high,
            tilt_low = ic.tilt.low,
            tilt_high = ic.tilt.high,
            w_low = ic.angular_velocity.low,
            w_high = ic.angular_velocity.high,
            max_accel = p.max_acceleration(),
            twr = p.thrust_to_weight(),
            burn_time = p.full_thrust_burn_time(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = LanderConfig::from_yaml("{}").unwrap();
        assert_eq!(config, LanderConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = LanderConfig::from_yaml(
            "
lander:
  max_thrust: 20000.0
  pad_period: 10.0
initial_conditions:
  vy:
    low: -2.0
    high: -1.0
",
        )
        .unwrap();
        assert_eq!(config.lander.max_thrust, 20000.0);
        assert_eq!(config.lander.pad_period, 10.0);
        assert_eq!(config.lander.mass, LanderParams::default().mass);
        assert_eq!(config.initial_conditions.vy.low, -2.0);
        assert_eq!(
            config.initial_conditions.vx,
            InitialConditions::default().vx
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = LanderConfig::from_yaml("lander:\n  mass: -5.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { param: "mass", .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = LanderConfig::from_yaml("lander: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn demo_config_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/lander.yaml");
        assert_eq!(LanderConfig::parse(path).unwrap(), LanderConfig::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LanderConfig::parse("/nonexistent/lander.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
