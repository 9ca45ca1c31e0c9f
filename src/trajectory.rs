use crate::state::{Action, SimState};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryEntry {
    // State after the step.
    pub state: SimState,
    // Action as applied, after clamping.
    pub action: Action,
    pub reward: f64,
}

/// Append-only history of one episode.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    entries: Vec<TrajectoryEntry>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: SimState, action: Action, reward: f64) {
        self.entries.push(TrajectoryEntry {
            state,
            action,
            reward,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectoryEntry> {
        self.entries.last()
    }

    pub fn total_reward(&self) -> f64 {
        self.entries.iter().map(|e| e.reward).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copy of the history so far; the recorder keeps its own.
    pub fn to_vec(&self) -> Vec<TrajectoryEntry> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector2};

    fn state(step: usize) -> SimState {
        let mut s = SimState::new(Point2::new(0.0, 100.0), Vector2::zeros(), 0.0, 0.0, 10.0);
        s.step = step;
        s
    }

    #[test]
    fn records_in_order() {
        let mut trajectory = Trajectory::new();
        assert!(trajectory.is_empty());
        for i in 1..=3 {
            trajectory.record(state(i), Action::new(0.5, 0.0), -(i as f64));
        }
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.last().unwrap().state.step, 3);
        assert_eq!(trajectory.total_reward(), -6.0);
        let steps: Vec<usize> = trajectory.to_vec().iter().map(|e| e.state.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_is_independent_of_recorder() {
        let mut trajectory = Trajectory::new();
        trajectory.record(state(1), Action::IDLE, 0.0);
        let snapshot = trajectory.to_vec();
        trajectory.record(state(2), Action::IDLE, 0.0);
        trajectory.clear();
        assert_eq!(snapshot.len(), 1);
        assert!(trajectory.is_empty());
    }
}
