//! Starting points for the factors.
//!
//! The engine does not depend on any particular initialization; these are
//! the two used by the spectrogram scripts, plus the input perturbation the
//! robustness runs apply to V.

use ndarray::{Array2, Zip};
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;

use crate::atom::normalization::normalize_unit_sum_columns;
use crate::config::DEFAULT_EPS;

/// K x R templates drawn from U[0, 1), each column scaled to unit sum
pub fn random_templates(num_bins: usize, num_comp: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut w = Array2::random_using((num_bins, num_comp), Uniform::new(0.0, 1.0), &mut rng);
    normalize_unit_sum_columns(&mut w, DEFAULT_EPS);
    w
}

/// R x M activations, all ones
pub fn uniform_activations(num_comp: usize, num_frames: usize) -> Array2<f64> {
    Array2::ones((num_comp, num_frames))
}

/// V + level * ||V||_F * |N(0, 1)|, drawn entrywise from a seeded `StdRng`.
///
/// The noise is folded to its magnitude so a non-negative V stays
/// non-negative. `level == 0` returns an unchanged copy.
pub fn add_noise(v: &Array2<f64>, level: f64, seed: u64) -> Array2<f64> {
    let mut noisy = v.to_owned();
    if level == 0.0 {
        return noisy;
    }
    let scale = level * v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Array2::<f64>::random_using(v.dim(), StandardNormal, &mut rng);
    Zip::from(&mut noisy)
        .and(&noise)
        .for_each(|x, &n| *x += scale * n.abs());
    noisy
}
