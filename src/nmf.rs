use log::warn;
use ndarray::Array2;

use crate::atom::nmf_base::run_nmf;
use crate::config::{CostFunction, NmfConfig, NmfParams, Regularization};
use crate::error::NmfError;
use crate::history::ConvergenceHistory;
use crate::reconstruct::reconstruct_components;

/// Output of a factorization run
#[derive(Debug, Clone)]
pub struct NmfResult {
    /// K x R templates
    pub w: Array2<f64>,
    /// R x M activations
    pub h: Array2<f64>,
    /// R matrices of size K x M, one per component
    pub components: Vec<Array2<f64>>,
    pub history: ConvergenceHistory,
}

impl NmfResult {
    pub fn rank(&self) -> usize {
        self.w.ncols()
    }

    /// W * H
    pub fn approximation(&self) -> Array2<f64> {
        self.w.dot(&self.h)
    }
}

/// Non-negative matrix factorization V ≈ W * H with multiplicative updates
#[derive(Debug, Clone)]
pub struct Nmf {
    pub config: NmfConfig,
}

impl Nmf {
    pub fn new(config: NmfConfig) -> Self {
        Self { config }
    }

    /// Build from the loosely typed parameter set; unknown tags fail here
    pub fn from_params(params: NmfParams) -> Result<Self, NmfError> {
        Ok(Self::new(NmfConfig::try_from(params)?))
    }

    /// Factorize `v` starting from `init_w` / `init_h` with the update rules
    /// of the configured cost function.
    ///
    /// The inputs are only read; the returned factors are fresh arrays.
    pub fn fit(
        &self,
        v: &Array2<f64>,
        init_w: &Array2<f64>,
        init_h: &Array2<f64>,
    ) -> Result<NmfResult, NmfError> {
        if self.config.regularization != Regularization::None
            && self.config.cost_function != CostFunction::EucDist
        {
            warn!(
                "Regularization {} has no effect with {}",
                self.config.regularization, self.config.cost_function
            );
        }

        let factors = run_nmf(&self.config, v, init_w, init_h)?;
        let components = reconstruct_components(&factors.w, &factors.h)?;

        Ok(NmfResult {
            w: factors.w,
            h: factors.h,
            components,
            history: factors.history,
        })
    }
}
