use log::{debug, info};
use ndarray::Array2;

use crate::config::{CostFunction, NmfConfig};
use crate::error::NmfError;
use crate::history::ConvergenceHistory;

use super::euclidean::EuclideanUpdater;
use super::itakura_saito::ItakuraSaitoUpdater;
use super::kl_divergence::KlDivergenceUpdater;
use super::normalization::{normalize_unit_sum_columns, normalize_unit_total};
use super::update_rules::model_estimate;

/// Factors and bookkeeping after the last iteration: V ≈ W * H
#[derive(Debug, Clone)]
pub struct NmfFactors {
    /// K x R templates
    pub w: Array2<f64>,
    /// R x M activations
    pub h: Array2<f64>,
    pub history: ConvergenceHistory,
}

/// Cost-function specific multiplicative update rules for V ≈ W * H.
///
/// `prepare` runs once per iteration on the model estimate Λ = eps + W*H and
/// its result is handed to both updates; `update_h` sees W after `update_w`
/// ran but the same (stale) Λ-derived terms.
pub trait NmfUpdater: Send + Sync {
    /// Per-iteration terms derived from V and Λ
    type Terms;

    fn prepare(&self, v: &Array2<f64>, lambda: Array2<f64>) -> Self::Terms;
    fn update_w(&self, v: &Array2<f64>, terms: &Self::Terms, w: &mut Array2<f64>, h: &Array2<f64>);
    fn update_h(&self, v: &Array2<f64>, terms: &Self::Terms, w: &Array2<f64>, h: &mut Array2<f64>);
    fn name(&self) -> &'static str;
}

/// Check that V (K x M), W (K x R) and H (R x M) line up
pub fn check_shapes(
    v: &Array2<f64>,
    w: &Array2<f64>,
    h: &Array2<f64>,
    num_comp: Option<usize>,
) -> Result<(), NmfError> {
    let (k, m) = v.dim();
    let r = w.ncols();
    if w.nrows() != k {
        return Err(NmfError::shape("W", (k, r), w.dim()));
    }
    if h.dim() != (r, m) {
        return Err(NmfError::shape("H", (r, m), h.dim()));
    }
    if let Some(expected) = num_comp {
        if expected != r {
            return Err(NmfError::shape("W", (k, expected), w.dim()));
        }
    }
    Ok(())
}

/// Factorize with the update rules selected by `config.cost_function`.
///
/// Inputs with negative or NaN entries are outside the contract; the result
/// is unspecified for them.
pub(crate) fn run_nmf(
    config: &NmfConfig,
    v: &Array2<f64>,
    init_w: &Array2<f64>,
    init_h: &Array2<f64>,
) -> Result<NmfFactors, NmfError> {
    let eps = config.eps;
    match config.cost_function {
        CostFunction::EucDist => {
            let updater = EuclideanUpdater::new(config.regularization, config.p, eps);
            run_updates(config, &updater, v, init_w, init_h)
        }
        CostFunction::KLDiv => {
            run_updates(config, &KlDivergenceUpdater::new(eps), v, init_w, init_h)
        }
        CostFunction::ISDiv => {
            run_updates(config, &ItakuraSaitoUpdater::new(eps), v, init_w, init_h)
        }
    }
}

/// Run the fixed-budget multiplicative update loop.
///
/// V is rescaled to unit sum first. W and H are worked on as private copies,
/// the caller's arrays are never touched. Every iteration:
/// - Λ = eps + W*H, turned into the updater's terms
/// - W update (skipped with `fix_w`), then H update
/// - column normalization of W (skipped with `fix_w`)
/// - objective and delta norms appended to the history
pub(crate) fn run_updates<U: NmfUpdater>(
    config: &NmfConfig,
    updater: &U,
    v: &Array2<f64>,
    init_w: &Array2<f64>,
    init_h: &Array2<f64>,
) -> Result<NmfFactors, NmfError> {
    config.validate()?;
    check_shapes(v, init_w, init_h, config.num_comp)?;

    let eps = config.eps;
    let v = normalize_unit_total(v, eps);
    let mut w = init_w.to_owned();
    let mut h = init_h.to_owned();

    info!(
        "Starting {} NMF: V {}x{}, rank {}, {} iterations, fixW={}",
        updater.name(),
        v.nrows(),
        v.ncols(),
        w.ncols(),
        config.num_iter,
        config.fix_w
    );

    let mut history = ConvergenceHistory::seeded(&v, &w, &h);

    for iter in 0..config.num_iter {
        let w_prev = w.clone();
        let h_prev = h.clone();

        let terms = updater.prepare(&v, model_estimate(&w, &h, eps));

        if !config.fix_w {
            updater.update_w(&v, &terms, &mut w, &h);
        }
        updater.update_h(&v, &terms, &w, &mut h);

        if !config.fix_w {
            normalize_unit_sum_columns(&mut w, eps);
        }

        history.record(&v, &w, &h, &w_prev, &h_prev);
        debug!(
            "iter {}: f = {:.6e}, |dW| = {:.4e}, |dH| = {:.4e}",
            iter + 1,
            history.objective[iter + 1],
            history.w_change[iter],
            history.h_change[iter]
        );
    }

    if let Some(f) = history.final_objective() {
        info!("{} NMF finished, objective {:.6e}", updater.name(), f);
    }

    Ok(NmfFactors { w, h, history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::test_utils::make_two_source_spectrogram;
    use crate::config::Regularization;
    use crate::init::{random_templates, uniform_activations};
    use ndarray::array;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Leaves both factors untouched, counts calls
    #[derive(Default)]
    struct IdentityUpdater {
        prepared: AtomicUsize,
        updates: AtomicUsize,
    }

    impl NmfUpdater for IdentityUpdater {
        type Terms = ();

        fn prepare(&self, _v: &Array2<f64>, _lambda: Array2<f64>) {
            self.prepared.fetch_add(1, Ordering::SeqCst);
        }

        fn update_w(&self, _v: &Array2<f64>, _terms: &(), _w: &mut Array2<f64>, _h: &Array2<f64>) {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }

        fn update_h(&self, _v: &Array2<f64>, _terms: &(), _w: &Array2<f64>, _h: &mut Array2<f64>) {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "identity"
        }
    }

    #[test]
    fn test_check_shapes() {
        let v = Array2::<f64>::zeros((4, 6));
        let w = Array2::<f64>::zeros((4, 2));
        let h = Array2::<f64>::zeros((2, 6));
        assert!(check_shapes(&v, &w, &h, None).is_ok());
        assert!(check_shapes(&v, &w, &h, Some(2)).is_ok());

        let bad_w = Array2::<f64>::zeros((3, 2));
        assert_eq!(
            check_shapes(&v, &bad_w, &h, None),
            Err(NmfError::shape("W", (4, 2), (3, 2)))
        );

        let bad_h = Array2::<f64>::zeros((3, 6));
        assert_eq!(
            check_shapes(&v, &w, &bad_h, None),
            Err(NmfError::shape("H", (2, 6), (3, 6)))
        );

        assert!(check_shapes(&v, &w, &h, Some(3)).is_err());
    }

    #[test]
    fn test_loop_bookkeeping_lengths() {
        let v = array![[1.0, 2.0], [3.0, 4.0]];
        let w = array![[1.0], [1.0]];
        let h = array![[1.0, 1.0]];
        let mut config = NmfConfig::default().with_fix_w(true);
        config.num_iter = 4;

        let factors = run_updates(&config, &IdentityUpdater::default(), &v, &w, &h).unwrap();
        assert_eq!(factors.history.objective.len(), 5);
        assert_eq!(factors.history.w_change, vec![0.0; 4]);
        assert_eq!(factors.history.h_change, vec![0.0; 4]);
        assert_eq!(factors.w, w);
        assert_eq!(factors.h, h);
    }

    #[test]
    fn test_terms_prepared_once_per_iteration() {
        let v = array![[1.0, 2.0], [3.0, 4.0]];
        let w = array![[1.0], [1.0]];
        let h = array![[1.0, 1.0]];
        let updater = IdentityUpdater::default();

        let config = NmfConfig::new(CostFunction::EucDist, 5);
        run_updates(&config, &updater, &v, &w, &h).unwrap();
        assert_eq!(updater.prepared.load(Ordering::SeqCst), 5);
        assert_eq!(updater.updates.load(Ordering::SeqCst), 10);

        // H only
        let updater = IdentityUpdater::default();
        run_updates(&config.with_fix_w(true), &updater, &v, &w, &h).unwrap();
        assert_eq!(updater.prepared.load(Ordering::SeqCst), 5);
        assert_eq!(updater.updates.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_loop_normalizes_templates() {
        let v = array![[1.0, 2.0], [3.0, 4.0]];
        let w = array![[2.0, 1.0], [6.0, 1.0]];
        let h = array![[1.0, 1.0], [1.0, 1.0]];
        let mut config = NmfConfig::default();
        config.num_iter = 1;

        let factors = run_updates(&config, &IdentityUpdater::default(), &v, &w, &h).unwrap();
        assert!((factors.w[[0, 0]] - 0.25).abs() < 1e-12);
        assert!((factors.w[[1, 1]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch_fails_fast() {
        let v = Array2::<f64>::ones((3, 3));
        let w = Array2::<f64>::ones((3, 2));
        let h = Array2::<f64>::ones((1, 3));
        let updater = IdentityUpdater::default();
        let result = run_updates(&NmfConfig::default(), &updater, &v, &w, &h);
        assert!(matches!(result, Err(NmfError::ShapeMismatch { .. })));
        assert_eq!(updater.prepared.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_run_nmf_uses_configured_rules() {
        let v = make_two_source_spectrogram();
        let w0 = random_templates(v.nrows(), 2, 5);
        let h0 = uniform_activations(2, v.ncols());
        let eps = f64::EPSILON;

        let euc = NmfConfig::new(CostFunction::EucDist, 4)
            .with_regularization(Regularization::FrobH, 0.2);
        let expected = run_updates(
            &euc,
            &EuclideanUpdater::new(Regularization::FrobH, 0.2, eps),
            &v,
            &w0,
            &h0,
        )
        .unwrap();
        let factors = run_nmf(&euc, &v, &w0, &h0).unwrap();
        assert_eq!(factors.w, expected.w);
        assert_eq!(factors.h, expected.h);

        let kl = NmfConfig::new(CostFunction::KLDiv, 4);
        let expected = run_updates(&kl, &KlDivergenceUpdater::new(eps), &v, &w0, &h0).unwrap();
        let factors = run_nmf(&kl, &v, &w0, &h0).unwrap();
        assert_eq!(factors.history, expected.history);

        let is = NmfConfig::new(CostFunction::ISDiv, 4);
        let expected = run_updates(&is, &ItakuraSaitoUpdater::new(eps), &v, &w0, &h0).unwrap();
        let factors = run_nmf(&is, &v, &w0, &h0).unwrap();
        assert_eq!(factors.history, expected.history);
        assert_ne!(factors.history, run_nmf(&kl, &v, &w0, &h0).unwrap().history);
    }
}
