//! Per-component reconstruction of a factorization.

use ndarray::{Array2, Axis};

use crate::error::NmfError;

/// Outer product of column `r` of W with row `r` of H, for every `r`.
///
/// The components sum elementwise to W*H.
pub fn reconstruct_components(
    w: &Array2<f64>,
    h: &Array2<f64>,
) -> Result<Vec<Array2<f64>>, NmfError> {
    if w.ncols() != h.nrows() {
        return Err(NmfError::shape("H", (w.ncols(), h.ncols()), h.dim()));
    }

    let components = w
        .axis_iter(Axis(1))
        .zip(h.axis_iter(Axis(0)))
        .map(|(col, row)| {
            let col = col.insert_axis(Axis(1)); // K×1
            let row = row.insert_axis(Axis(0)); // 1×M
            col.dot(&row)
        })
        .collect();

    Ok(components)
}
