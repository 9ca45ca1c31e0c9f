use log::{info, warn};
use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::config::params::{InitialConditions, LanderParams};
use crate::config::{ConfigError, LanderConfig};
use crate::dynamics;
use crate::math::sample_interval;
use crate::reward;
use crate::state::{Action, Observation, SimState, Snapshot};
use crate::termination::{self, EpisodeStatus, Termination};
use crate::trajectory::{Trajectory, TrajectoryEntry};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ResetInfo {
    pub seed: Option<u64>,
    pub snapshot: Snapshot,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Outcome {
    // True only when the episode ended in a landing within all thresholds.
    pub success: bool,
    pub fuel_used: f64,
    pub status: EpisodeStatus,
    pub episode_return: f64,
    pub steps: usize,
    // Filled on steps that end the episode.
    pub trajectory: Option<Vec<TrajectoryEntry>>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub outcome: Outcome,
}

impl StepResult {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// One landing simulation: owns its state, its trajectory and its source of
/// randomness. Calls into one instance must be serialized by the caller.
pub struct LandingEnv<R = Pcg64Mcg> {
    params: LanderParams,
    initial_conditions: InitialConditions,
    state: SimState,
    initial_fuel: f64,
    episode_return: f64,
    termination: Termination,
    trajectory: Trajectory,
    rng: R,
}

impl LandingEnv<Pcg64Mcg> {
    pub fn from_seed(config: LanderConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Pcg64Mcg::seed_from_u64(seed))
    }
}

impl<R: Rng + SeedableRng> LandingEnv<R> {
    /// Validates the configuration and draws a first initial state, so the
    /// environment is usable straight away; `reset` starts a fresh episode.
    pub fn new(config: LanderConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let LanderConfig {
            lander: params,
            initial_conditions,
        } = config;
        let state = random_initial_state(&mut rng, &params, &initial_conditions);
        Ok(LandingEnv {
            initial_fuel: state.fuel,
            episode_return: 0.0,
            termination: termination::evaluate(&params, &state),
            trajectory: Trajectory::new(),
            params,
            initial_conditions,
            state,
            rng,
        })
    }

    /// Start a new episode from a random initial state. Passing a seed
    /// reseeds the generator first, making the episode reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, ResetInfo) {
        if let Some(seed) = seed {
            self.rng = R::seed_from_u64(seed);
        }
        let state = random_initial_state(&mut self.rng, &self.params, &self.initial_conditions);
        let observation = self.start_episode(state);
        info!(
            "Reset: altitude={:.1} m, x={:.1} m, v=({:.2}, {:.2}) m/s, tilt={:.3} rad",
            state.altitude(),
            state.x(),
            state.velocity.x,
            state.velocity.y,
            state.tilt,
        );
        (
            observation,
            ResetInfo {
                seed,
                snapshot: self.snapshot(),
            },
        )
    }
}

impl<R> LandingEnv<R> {
    /// Start a new episode from a given state. Fuel is clamped into the tank
    /// and tilt wrapped; everything else is taken as is.
    pub fn reset_to(&mut self, state: SimState) -> Observation {
        let state = state.normalized(&self.params);
        info!(
            "Reset to injected state: altitude={:.1} m, fuel={:.1}",
            state.altitude(),
            state.fuel
        );
        self.start_episode(state)
    }

    fn start_episode(&mut self, state: SimState) -> Observation {
        self.state = state;
        self.initial_fuel = state.fuel;
        self.episode_return = 0.0;
        self.termination = termination::evaluate(&self.params, &state);
        self.trajectory.clear();
        self.observation()
    }

    pub fn step(&mut self, action: Action) -> StepResult {
        if self.termination.is_done() {
            warn!(
                "Stepping an episode that already ended ({:?}) at step {}",
                self.termination.status, self.state.step
            );
        }

        let action = action.clamped();
        dynamics::update(&self.params, &mut self.state, action);
        let reward = reward::evaluate(&self.params, &self.state, action.thrust);
        let termination = termination::evaluate(&self.params, &self.state);

        self.trajectory.record(self.state, action, reward);
        self.episode_return += reward;
        self.termination = termination;

        let done = termination.is_done();
        let outcome = Outcome {
            success: termination.success(),
            fuel_used: self.fuel_used(),
            status: termination.status,
            episode_return: self.episode_return,
            steps: self.trajectory.len(),
            trajectory: if done {
                Some(self.trajectory.to_vec())
            } else {
                None
            },
        };
        if done {
            info!(
                "Episode ended after {} steps ({:.1} s): {:?}, return={:.2}, fuel used={:.2}",
                outcome.steps, self.state.t, outcome.status, outcome.episode_return, outcome.fuel_used,
            );
        }

        StepResult {
            observation: self.observation(),
            reward,
            terminated: termination.terminated,
            truncated: termination.truncated,
            outcome,
        }
    }

    pub fn observation(&self) -> Observation {
        Observation::from_state(&self.state, &self.params)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn params(&self) -> &LanderParams {
        &self.params
    }

    pub fn status(&self) -> EpisodeStatus {
        self.termination.status
    }

    pub fn is_done(&self) -> bool {
        self.termination.is_done()
    }

    pub fn trajectory_len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn fuel_used(&self) -> f64 {
        self.initial_fuel - self.state.fuel
    }
}

pub fn random_initial_state<R: Rng + ?Sized>(
    rng: &mut R,
    params: &LanderParams,
    initial: &InitialConditions,
) -> SimState {
    let altitude = sample_interval(rng, initial.altitude(params));
    let x = sample_interval(rng, initial.x(params));
    let vx = sample_interval(rng, initial.vx);
    let vy = sample_interval(rng, initial.vy);
    let tilt = sample_interval(rng, initial.tilt);
    let angular_velocity = sample_interval(rng, initial.angular_velocity);
    SimState::new(
        Point2::new(x, altitude),
        Vector2::new(vx, vy),
        tilt,
        angular_velocity,
        params.max_fuel,
    )
}
