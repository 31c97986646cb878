/*
 * File: /src/config.rs
 * Created Date: Monday, October 12th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 15th October 2026 10:20:41 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-12		Zihan	Typed NMF configuration replacing the parameter dict
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NmfError;

/// Additive floor used in every denominator and in the model estimate Λ
pub const DEFAULT_EPS: f64 = f64::EPSILON;
pub const DEFAULT_NUM_ITER: usize = 30;

/// Divergence minimized by the multiplicative updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostFunction {
    /// Squared Euclidean (Frobenius) distance
    EucDist,
    /// Generalized Kullback-Leibler divergence
    KLDiv,
    /// Itakura-Saito divergence
    ISDiv,
}

impl Default for CostFunction {
    fn default() -> Self {
        CostFunction::KLDiv
    }
}

impl FromStr for CostFunction {
    type Err = NmfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "EucDdist" is how the toolbox docs spell it
            "EucDist" | "EucDdist" => Ok(CostFunction::EucDist),
            "KLDiv" => Ok(CostFunction::KLDiv),
            "ISDiv" => Ok(CostFunction::ISDiv),
            other => Err(NmfError::UnknownCostFunction(other.to_string())),
        }
    }
}

impl fmt::Display for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            CostFunction::EucDist => "EucDist",
            CostFunction::KLDiv => "KLDiv",
            CostFunction::ISDiv => "ISDiv",
        };
        f.write_str(tag)
    }
}

/// Penalty added to the Euclidean update denominators.
///
/// Only consulted when the cost function is [`CostFunction::EucDist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regularization {
    None,
    /// `p * W` on the template denominator
    FrobW,
    /// `p * H` on the activation denominator
    FrobH,
    /// scalar `p` on the template denominator
    #[serde(rename = "1W")]
    L1W,
    /// scalar `p` on the activation denominator
    #[serde(rename = "1H")]
    L1H,
}

impl Default for Regularization {
    fn default() -> Self {
        Regularization::None
    }
}

impl FromStr for Regularization {
    type Err = NmfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Regularization::None),
            "FrobW" => Ok(Regularization::FrobW),
            "FrobH" => Ok(Regularization::FrobH),
            "1W" => Ok(Regularization::L1W),
            "1H" => Ok(Regularization::L1H),
            other => Err(NmfError::UnknownRegularization(other.to_string())),
        }
    }
}

impl fmt::Display for Regularization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            Regularization::None => "None",
            Regularization::FrobW => "FrobW",
            Regularization::FrobH => "FrobH",
            Regularization::L1W => "1W",
            Regularization::L1H => "1H",
        };
        f.write_str(tag)
    }
}

/// Loosely typed parameter set, keyed the way callers of the toolbox pass it
/// (`costFunc`, `numIter`, `fixW`, `reg`, `p`, `numComp`, `eps`).
///
/// Any serde map deserializes into it; missing keys stay `None` until
/// [`NmfParams::resolve`] fills them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NmfParams {
    pub cost_func: Option<String>,
    pub num_iter: Option<usize>,
    pub fix_w: Option<bool>,
    pub reg: Option<String>,
    pub p: Option<f64>,
    /// Expected rank; checked against the column count of W when present
    pub num_comp: Option<usize>,
    pub eps: Option<f64>,
}

impl NmfParams {
    /// Fill every unset key with its default.
    ///
    /// Never fails: tag values are carried through untouched and only
    /// checked when converting into an [`NmfConfig`].
    pub fn resolve(self) -> NmfParams {
        NmfParams {
            cost_func: Some(self.cost_func.unwrap_or_else(|| CostFunction::default().to_string())),
            num_iter: Some(self.num_iter.unwrap_or(DEFAULT_NUM_ITER)),
            fix_w: Some(self.fix_w.unwrap_or(false)),
            reg: Some(self.reg.unwrap_or_else(|| Regularization::default().to_string())),
            p: Some(self.p.unwrap_or(0.0)),
            num_comp: self.num_comp,
            eps: Some(self.eps.unwrap_or(DEFAULT_EPS)),
        }
    }
}

/// Validated configuration consumed by the update engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NmfConfig {
    pub cost_function: CostFunction,
    /// Fixed iteration budget L; there is no early exit
    pub num_iter: usize,
    /// Keep W at its initial value and only update H
    pub fix_w: bool,
    pub regularization: Regularization,
    /// Regularization strength p >= 0
    pub p: f64,
    pub num_comp: Option<usize>,
    /// Additive floor ε > 0
    pub eps: f64,
}

impl Default for NmfConfig {
    fn default() -> Self {
        Self {
            cost_function: CostFunction::default(),
            num_iter: DEFAULT_NUM_ITER,
            fix_w: false,
            regularization: Regularization::default(),
            p: 0.0,
            num_comp: None,
            eps: DEFAULT_EPS,
        }
    }
}

impl NmfConfig {
    pub fn new(cost_function: CostFunction, num_iter: usize) -> Self {
        Self {
            cost_function,
            num_iter,
            ..Default::default()
        }
    }

    pub fn with_fix_w(mut self, fix_w: bool) -> Self {
        self.fix_w = fix_w;
        self
    }

    pub fn with_regularization(mut self, regularization: Regularization, p: f64) -> Self {
        self.regularization = regularization;
        self.p = p;
        self
    }

    pub fn with_num_comp(mut self, num_comp: usize) -> Self {
        self.num_comp = Some(num_comp);
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Check numeric ranges. Tags are already closed enums here.
    pub fn validate(&self) -> Result<(), NmfError> {
        if !(self.p.is_finite() && self.p >= 0.0) {
            return Err(NmfError::InvalidParameter(format!(
                "regularization strength p must be finite and non-negative, got {}",
                self.p
            )));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(NmfError::InvalidParameter(format!(
                "eps must be finite and positive, got {}",
                self.eps
            )));
        }
        if self.num_comp == Some(0) {
            return Err(NmfError::InvalidParameter(
                "numComp must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<NmfParams> for NmfConfig {
    type Error = NmfError;

    fn try_from(params: NmfParams) -> Result<Self, Self::Error> {
        let defaults = NmfConfig::default();
        let resolved = params.resolve();

        let cost_function = match resolved.cost_func.as_deref() {
            Some(tag) => tag.parse()?,
            None => defaults.cost_function,
        };
        let regularization = match resolved.reg.as_deref() {
            Some(tag) => tag.parse()?,
            None => defaults.regularization,
        };

        let config = NmfConfig {
            cost_function,
            num_iter: resolved.num_iter.unwrap_or(defaults.num_iter),
            fix_w: resolved.fix_w.unwrap_or(defaults.fix_w),
            regularization,
            p: resolved.p.unwrap_or(defaults.p),
            num_comp: resolved.num_comp,
            eps: resolved.eps.unwrap_or(defaults.eps),
        };
        config.validate()?;
        Ok(config)
    }
}
