use ndarray::{Array2, Axis, Zip};

use super::nmf_base::NmfUpdater;
use super::update_rules::multiplicative_update;

/// Generalized Kullback-Leibler divergence (Lee & Seung 2001)
///
/// W ← W * ((V/Λ)*H^T) / (1*H^T + eps)
/// H ← H * (W^T*(V/Λ)) / (W^T*1 + eps)
///
/// `1` is the K×M all-ones matrix. Products with it reduce to row sums of H
/// and column sums of W, so it is never materialized.
pub struct KlDivergenceUpdater {
    pub eps: f64,
}

impl KlDivergenceUpdater {
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }
}

impl NmfUpdater for KlDivergenceUpdater {
    /// V / Λ elementwise
    type Terms = Array2<f64>;

    fn prepare(&self, v: &Array2<f64>, mut lambda: Array2<f64>) -> Array2<f64> {
        Zip::from(&mut lambda).and(v).for_each(|l, &x| *l = x / *l);
        lambda
    }

    fn update_w(
        &self,
        _v: &Array2<f64>,
        ratio: &Array2<f64>,
        w: &mut Array2<f64>,
        h: &Array2<f64>,
    ) {
        let numer = ratio.dot(&h.t()); // K×R
        // (1*H^T)[k, r] = sum_m H[r, m]
        let h_sums = h.sum_axis(Axis(1));
        let denom = Array2::from_shape_fn(w.dim(), |(_, r)| h_sums[r]);
        multiplicative_update(w, &numer, &denom, self.eps);
    }

    fn update_h(
        &self,
        _v: &Array2<f64>,
        ratio: &Array2<f64>,
        w: &Array2<f64>,
        h: &mut Array2<f64>,
    ) {
        let numer = w.t().dot(ratio); // R×M
        // (W^T*1)[r, m] = sum_k W[k, r]
        let w_sums = w.sum_axis(Axis(0));
        let denom = Array2::from_shape_fn(h.dim(), |(r, _)| w_sums[r]);
        multiplicative_update(h, &numer, &denom, self.eps);
    }

    fn name(&self) -> &'static str {
        "KLDiv"
    }
}
