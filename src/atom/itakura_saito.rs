use ndarray::{Array2, Zip};

use super::nmf_base::NmfUpdater;
use super::update_rules::multiplicative_update;

/// Itakura-Saito divergence
///
/// W ← W * ((Λ^-2 ⊙ V)*H^T) / (Λ^-1*H^T + eps)
/// H ← H * (W^T*(Λ^-2 ⊙ V)) / (W^T*Λ^-1 + eps)
pub struct ItakuraSaitoUpdater {
    pub eps: f64,
}

impl ItakuraSaitoUpdater {
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }
}

/// Λ-derived terms shared by both updates of one iteration
pub struct ItakuraSaitoTerms {
    /// Λ^-2 ⊙ V
    pub weighted: Array2<f64>,
    /// Λ^-1
    pub inverse: Array2<f64>,
}

impl NmfUpdater for ItakuraSaitoUpdater {
    type Terms = ItakuraSaitoTerms;

    fn prepare(&self, v: &Array2<f64>, mut lambda: Array2<f64>) -> ItakuraSaitoTerms {
        lambda.mapv_inplace(|l| 1.0 / l);
        let mut weighted = v.to_owned();
        Zip::from(&mut weighted)
            .and(&lambda)
            .for_each(|x, &i| *x *= i * i);
        ItakuraSaitoTerms {
            weighted,
            inverse: lambda,
        }
    }

    fn update_w(
        &self,
        _v: &Array2<f64>,
        terms: &ItakuraSaitoTerms,
        w: &mut Array2<f64>,
        h: &Array2<f64>,
    ) {
        let ht = h.t();
        let numer = terms.weighted.dot(&ht); // K×R
        let denom = terms.inverse.dot(&ht); // K×R
        multiplicative_update(w, &numer, &denom, self.eps);
    }

    fn update_h(
        &self,
        _v: &Array2<f64>,
        terms: &ItakuraSaitoTerms,
        w: &Array2<f64>,
        h: &mut Array2<f64>,
    ) {
        let wt = w.t();
        let numer = wt.dot(&terms.weighted); // R×M
        let denom = wt.dot(&terms.inverse); // R×M
        multiplicative_update(h, &numer, &denom, self.eps);
    }

    fn name(&self) -> &'static str {
        "ISDiv"
    }
}
