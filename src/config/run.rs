use super::params::LanderParams;

pub struct RunParams {
    pub episodes: usize,
    // Steps after which an episode that has not ended is abandoned.
    pub max_steps: usize,
    pub seed: Option<u64>,
    pub emit_trajectory: bool,
}

impl RunParams {
    /// Seed for the `i`th episode, so that each episode of a seeded run is
    /// reproducible on its own.
    pub fn episode_seed(&self, i: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(i as u64))
    }
}

/// Step cap for a run: an explicit step count wins over a simulated duration.
pub fn resolve_max_steps(params: &LanderParams, max_steps: Option<usize>, t_max: f64) -> usize {
    max_steps.unwrap_or_else(|| params.to_steps(t_max))
}
