use crate::config::params::LanderParams;
use crate::state::SimState;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    BelowSurface,
    Ceiling,
    Horizontal,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum EpisodeStatus {
    Running,
    Landed,
    Crashed,
    OutOfBounds { boundary: Boundary },
    FuelDepleted,
}

impl EpisodeStatus {
    /// Landed or crashed: the episode reached a decisive outcome.
    pub fn is_decisive(&self) -> bool {
        matches!(self, EpisodeStatus::Landed | EpisodeStatus::Crashed)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, EpisodeStatus::Running)
    }
}

/// Classification of a post-step state, with its projection onto the
/// `terminated`/`truncated` pair callers see.
///
/// Each flag is raised by its own triggers, so a touchdown below the surface
/// (or beyond the horizontal bound) reports both.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    pub status: EpisodeStatus,
    pub terminated: bool,
    pub truncated: bool,
}

impl Termination {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }

    pub fn success(&self) -> bool {
        self.status == EpisodeStatus::Landed
    }
}

/// Distance, speed and tilt all inside the landing thresholds.
pub fn within_landing_limits(params: &LanderParams, state: &SimState) -> bool {
    state.distance_to_pad() < params.landing_radius
        && state.speed() < params.max_landing_velocity
        && state.tilt.abs() < params.max_landing_tilt
}

/// Touchdown within the landing thresholds. Both the reward and the episode
/// outcome decide success through this.
pub fn is_successful_landing(params: &LanderParams, state: &SimState) -> bool {
    state.has_touched_down() && within_landing_limits(params, state)
}

pub fn out_of_bounds(params: &LanderParams, state: &SimState) -> Option<Boundary> {
    if state.altitude() < 0.0 {
        Some(Boundary::BelowSurface)
    } else if state.altitude() > params.max_altitude {
        Some(Boundary::Ceiling)
    } else if state.x().abs() > params.max_horizontal {
        Some(Boundary::Horizontal)
    } else {
        None
    }
}

pub fn fuel_depleted_airborne(state: &SimState) -> bool {
    state.fuel <= 0.0 && state.altitude() > 0.0
}

pub fn evaluate(params: &LanderParams, state: &SimState) -> Termination {
    let boundary = out_of_bounds(params, state);
    let fuel_depleted = fuel_depleted_airborne(state);

    let status = if is_successful_landing(params, state) {
        EpisodeStatus::Landed
    } else if state.has_touched_down() {
        EpisodeStatus::Crashed
    } else if let Some(boundary) = boundary {
        EpisodeStatus::OutOfBounds { boundary }
    } else if fuel_depleted {
        EpisodeStatus::FuelDepleted
    } else {
        EpisodeStatus::Running
    };

    Termination {
        status,
        terminated: status.is_decisive(),
        truncated: boundary.is_some() || fuel_depleted,
    }
}
