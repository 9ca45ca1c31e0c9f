use log::debug;
use nalgebra::Vector2;

use crate::config::params::LanderParams;
use crate::math::wrap_angle;
use crate::state::{Action, SimState};

// Fraction of the steering input that deflects the thrust from the body axis.
pub const THRUST_VECTORING_GAIN: f64 = 0.5;
// Lever arm of the simplified torque model.
pub const TORQUE_ARM: f64 = 0.1;
// Per-step angular velocity decay once the tank is empty.
pub const ANGULAR_DAMPING: f64 = 0.99;

/// Force and torque acting on the vehicle over one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepForces {
    pub thrust: Vector2<f64>,
    pub net: Vector2<f64>,
    pub torque: f64,
}

/// Fuel left after burning at `thrust` magnitude for one step. Never negative.
pub fn burn_fuel(params: &LanderParams, fuel: f64, thrust: f64) -> f64 {
    (fuel - params.fuel_burn_rate * thrust * params.dt).max(0.0)
}

/// Thrust vector in world axes, x to the right and y up.
pub fn thrust_vector(params: &LanderParams, tilt: f64, action: Action) -> Vector2<f64> {
    let magnitude = action.thrust * params.max_thrust;
    let direction = tilt + action.angle * THRUST_VECTORING_GAIN;
    Vector2::new(direction.sin(), direction.cos()) * magnitude
}

/// Advance `sim_state` by one fixed step. `action` must already be clamped.
///
/// Velocities are updated from forces first and positions from the new
/// velocities after (semi-implicit Euler). Fuel is burned before checking
/// whether the engine can fire this step, so the step that empties the tank
/// produces no thrust.
pub fn update(params: &LanderParams, sim_state: &mut SimState, action: Action) -> StepForces {
    let gravity = Vector2::new(0.0, -params.gravity * params.mass);

    sim_state.fuel = burn_fuel(params, sim_state.fuel, action.thrust);

    let forces = if sim_state.fuel > 0.0 {
        let thrust = thrust_vector(params, sim_state.tilt, action);
        let torque = thrust.x * TORQUE_ARM * action.angle;
        sim_state.angular_velocity += torque / params.moment_of_inertia * params.dt;
        StepForces {
            thrust,
            net: thrust + gravity,
            torque,
        }
    } else {
        sim_state.angular_velocity *= ANGULAR_DAMPING;
        StepForces {
            thrust: Vector2::zeros(),
            net: gravity,
            torque: 0.0,
        }
    };
    sim_state.velocity += forces.net / params.mass * params.dt;

    // Update position and orientation from the new velocities.
    sim_state.position += sim_state.velocity * params.dt;
    sim_state.tilt = wrap_angle(sim_state.tilt + sim_state.angular_velocity * params.dt);

    // The pad is driven by the clock alone.
    sim_state.pad_x = params.pad_position(sim_state.t);

    // Update time and step.
    sim_state.t += params.dt;
    sim_state.step += 1;

    debug!(
        "step={} t={:.2} alt={:.2} x={:.2} v=({:.2}, {:.2}) tilt={:.3} fuel={:.2} thrust=({:.1}, {:.1})",
        sim_state.step,
        sim_state.t,
        sim_state.altitude(),
        sim_state.x(),
        sim_state.velocity.x,
        sim_state.velocity.y,
        sim_state.tilt,
        sim_state.fuel,
        forces.thrust.x,
        forces.thrust.y,
    );

    forces
}
