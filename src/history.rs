//! Per-iteration bookkeeping of a factorization run.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::atom::update_rules::{frobenius_distance, objective};

/// Objective trajectory and parameter deltas, oldest first.
///
/// After `L` iterations `objective` holds `L + 1` values (index 0 is the
/// value before the first update) and both delta sequences hold `L`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    /// 0.5 * ||V - W*H||_F^2 per iteration
    pub objective: Vec<f64>,
    /// ||W_i - W_{i-1}||_F
    pub w_change: Vec<f64>,
    /// ||H_i - H_{i-1}||_F
    pub h_change: Vec<f64>,
}

impl ConvergenceHistory {
    /// Start a history from the initial factors
    pub fn seeded(v: &Array2<f64>, w: &Array2<f64>, h: &Array2<f64>) -> Self {
        Self {
            objective: vec![objective(v, w, h)],
            w_change: Vec::new(),
            h_change: Vec::new(),
        }
    }

    /// Append one iteration. `w_prev`/`h_prev` must be snapshots taken
    /// before the iteration mutated the factors.
    pub fn record(
        &mut self,
        v: &Array2<f64>,
        w: &Array2<f64>,
        h: &Array2<f64>,
        w_prev: &Array2<f64>,
        h_prev: &Array2<f64>,
    ) {
        self.objective.push(objective(v, w, h));
        self.w_change.push(frobenius_distance(w, w_prev));
        self.h_change.push(frobenius_distance(h, h_prev));
    }

    /// Number of completed iterations
    pub fn iterations(&self) -> usize {
        self.w_change.len()
    }

    pub fn initial_objective(&self) -> Option<f64> {
        self.objective.first().copied()
    }

    pub fn final_objective(&self) -> Option<f64> {
        self.objective.last().copied()
    }

    /// Whether the objective never rises by more than `tol` between iterations
    pub fn is_non_increasing(&self, tol: f64) -> bool {
        self.objective.windows(2).all(|pair| pair[1] <= pair[0] + tol)
    }
}
