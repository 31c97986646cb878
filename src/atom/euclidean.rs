use ndarray::Array2;

use crate::config::Regularization;

use super::nmf_base::NmfUpdater;
use super::update_rules::multiplicative_update;

/// Euclidean distance (Lee & Seung 2001), optionally regularized.
///
/// W ← W * (V*H^T) / (Λ*H^T + reg_W + eps)
/// H ← H * (W^T*V) / (W^T*Λ + reg_H + eps)
///
/// The penalty lands on exactly one side:
/// FrobW → reg_W = p*W, FrobH → reg_H = p*H, 1W → reg_W = p, 1H → reg_H = p.
pub struct EuclideanUpdater {
    pub regularization: Regularization,
    pub p: f64,
    pub eps: f64,
}

impl EuclideanUpdater {
    pub fn new(regularization: Regularization, p: f64, eps: f64) -> Self {
        Self {
            regularization,
            p,
            eps,
        }
    }
}

impl NmfUpdater for EuclideanUpdater {
    /// Λ itself
    type Terms = Array2<f64>;

    fn prepare(&self, _v: &Array2<f64>, lambda: Array2<f64>) -> Array2<f64> {
        lambda
    }

    fn update_w(
        &self,
        v: &Array2<f64>,
        lambda: &Array2<f64>,
        w: &mut Array2<f64>,
        h: &Array2<f64>,
    ) {
        let ht = h.t();
        let numer = v.dot(&ht); // K×R
        let mut denom = lambda.dot(&ht); // K×R
        match self.regularization {
            Regularization::FrobW => denom.scaled_add(self.p, &*w),
            Regularization::L1W => denom.mapv_inplace(|d| d + self.p),
            Regularization::None | Regularization::FrobH | Regularization::L1H => {}
        }
        multiplicative_update(w, &numer, &denom, self.eps);
    }

    fn update_h(
        &self,
        v: &Array2<f64>,
        lambda: &Array2<f64>,
        w: &Array2<f64>,
        h: &mut Array2<f64>,
    ) {
        let wt = w.t();
        let numer = wt.dot(v); // R×M
        let mut denom = wt.dot(lambda); // R×M
        match self.regularization {
            Regularization::FrobH => denom.scaled_add(self.p, &*h),
            Regularization::L1H => denom.mapv_inplace(|d| d + self.p),
            Regularization::None | Regularization::FrobW | Regularization::L1W => {}
        }
        multiplicative_update(h, &numer, &denom, self.eps);
    }

    fn name(&self) -> &'static str {
        "EucDist"
    }
}
