pub mod config;
pub mod dynamics;
pub mod env;
pub mod math;
pub mod policy;
pub mod reward;
pub mod state;
pub mod termination;
pub mod trajectory;

pub use config::{ConfigError, LanderConfig};
pub use env::{LandingEnv, Outcome, ResetInfo, StepResult};
pub use state::{Action, Observation, SimState, Snapshot};
