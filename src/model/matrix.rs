//! Simulated price matrix

/// Row-major `steps x trials` matrix of simulated prices
///
/// Row `t` holds the price of every trial after `t` steps; column `n` is
/// one simulated path.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatrix {
    steps: usize,
    trials: usize,
    data: Vec<f64>,
}

impl PriceMatrix {
    /// Matrix with every entry set to `value`
    pub(crate) fn filled(steps: usize, trials: usize, value: f64) -> Self {
        Self {
            steps,
            trials,
            data: vec![value; steps * trials],
        }
    }

    /// Number of time steps (rows)
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of trial paths (columns)
    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn get(&self, step: usize, trial: usize) -> Option<f64> {
        if step < self.steps && trial < self.trials {
            Some(self.data[step * self.trials + trial])
        } else {
            None
        }
    }

    /// Prices of all trials at `step`
    ///
    /// # Panics
    /// Panics if `step >= self.steps()`
    pub fn row(&self, step: usize) -> &[f64] {
        let start = step * self.trials;
        &self.data[start..start + self.trials]
    }

    /// One simulated path
    pub fn column(&self, trial: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().skip(trial).step_by(self.trials.max(1)).copied()
    }

    /// Iterate over rows in time order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.trials.max(1))
    }

    /// Final row
    pub fn terminal_row(&self) -> &[f64] {
        self.row(self.steps - 1)
    }

    /// Split into the already-filled rows before `step` and the mutable row `step`
    pub(crate) fn split_at_row(&mut self, step: usize) -> (&[f64], &mut [f64]) {
        let (before, after) = self.data.split_at_mut(step * self.trials);
        let prev_start = (step - 1) * self.trials;
        (&before[prev_start..], &mut after[..self.trials])
    }

    /// All entries in row-major order
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
