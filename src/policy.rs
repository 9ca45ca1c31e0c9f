use log::{debug, warn};
use rand::{Rng, SeedableRng};

use crate::env::{LandingEnv, Outcome};
use crate::state::{Action, Observation, ANGLE_RANGE, THRUST_RANGE};

/// Anything that turns an observation into an action: a human at the
/// controls, a random sampler or a learned policy.
pub trait Policy {
    fn act(&mut self, observation: &Observation) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Observation) -> Action,
{
    fn act(&mut self, observation: &Observation) -> Action {
        self(observation)
    }
}

/// Uniform samples over the whole action range, ignoring the observation.
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        RandomPolicy { rng }
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn act(&mut self, _observation: &Observation) -> Action {
        Action::new(
            self.rng.gen_range(THRUST_RANGE.0..=THRUST_RANGE.1),
            self.rng.gen_range(ANGLE_RANGE.0..=ANGLE_RANGE.1),
        )
    }
}

pub struct ConstantPolicy(pub Action);

impl Policy for ConstantPolicy {
    fn act(&mut self, _observation: &Observation) -> Action {
        self.0
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    // None when the step cap was hit before the episode ended.
    pub outcome: Option<Outcome>,
    pub steps: usize,
}

impl EpisodeSummary {
    pub fn success(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.success)
    }
}

/// Reset `env` and drive it with `policy` until the episode ends or
/// `max_steps` steps have been taken.
pub fn run_episode<R, P>(
    env: &mut LandingEnv<R>,
    policy: &mut P,
    max_steps: usize,
    seed: Option<u64>,
) -> EpisodeSummary
where
    R: Rng + SeedableRng,
    P: Policy + ?Sized,
{
    let (mut observation, _) = env.reset(seed);
    for step in 1..=max_steps {
        let action = policy.act(&observation);
        let result = env.step(action);
        if result.is_done() {
            debug!(
                "Episode finished: success={}, steps={}",
                result.outcome.success, step
            );
            return EpisodeSummary {
                outcome: Some(result.outcome),
                steps: step,
            };
        }
        observation = result.observation;
    }
    warn!("Episode abandoned after {} steps without ending", max_steps);
    EpisodeSummary {
        outcome: None,
        steps: max_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::params::Interval;
    use crate::config::LanderConfig;
    use crate::termination::EpisodeStatus;
    use rand_pcg::Pcg64Mcg;

    fn env() -> LandingEnv {
        LandingEnv::from_seed(LanderConfig::default(), 11).unwrap()
    }

    #[test]
    fn random_actions_stay_in_range() {
        let mut policy = RandomPolicy::new(Pcg64Mcg::seed_from_u64(1));
        let obs = Observation([0.0; 7]);
        for _ in 0..1000 {
            let action = policy.act(&obs);
            assert_eq!(action, action.clamped());
        }
    }

    #[test]
    fn idle_vehicle_falls_and_crashes() {
        let mut config = LanderConfig::default();
        config.initial_conditions.vx = Interval::new(0.0, 0.0);
        config.initial_conditions.horizontal_fraction = 0.0;
        let mut env = LandingEnv::from_seed(config, 11).unwrap();
        let summary = run_episode(&mut env, &mut ConstantPolicy(Action::IDLE), 10_000, Some(4));
        let outcome = summary.outcome.unwrap();
        assert_eq!(outcome.status, EpisodeStatus::Crashed);
        assert!(!outcome.success);
        assert_eq!(outcome.fuel_used, 0.0);
        assert_eq!(outcome.trajectory.unwrap().len(), summary.steps);
    }

    #[test]
    fn full_thrust_burns_fuel_until_episode_ends() {
        let mut env = env();
        let mut policy = ConstantPolicy(Action::new(1.0, 0.0));
        let summary = run_episode(&mut env, &mut policy, 10_000, Some(4));
        let outcome = summary.outcome.unwrap();
        assert!(!outcome.status.is_running());
        assert!(outcome.fuel_used > 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = |seed| {
            let mut env = env();
            let mut policy = RandomPolicy::new(Pcg64Mcg::seed_from_u64(seed));
            run_episode(&mut env, &mut policy, 10_000, Some(seed))
        };
        assert_eq!(run(8), run(8));
    }

    #[test]
    fn step_cap_abandons_episode() {
        let mut env = env();
        let mut hover = |obs: &Observation| Action::new(if obs.vy() < 0.0 { 0.8 } else { 0.5 }, 0.0);
        let summary = run_episode(&mut env, &mut hover, 5, Some(2));
        assert_eq!(summary.steps, 5);
        assert!(summary.outcome.is_none());
        assert!(!summary.success());
    }

    #[test]
    fn summary_success_follows_outcome() {
        let outcome = Outcome {
            success: true,
            fuel_used: 12.5,
            status: EpisodeStatus::Landed,
            episode_return: 900.0,
            steps: 140,
            trajectory: None,
        };
        let mut summary = EpisodeSummary {
            outcome: Some(outcome),
            steps: 140,
        };
        assert!(summary.success());
        if let Some(o) = summary.outcome.as_mut() {
            o.success = false;
            o.status = EpisodeStatus::Crashed;
        }
        assert!(!summary.success());
    }
}
