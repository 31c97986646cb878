pub mod normalization;
pub mod nmf_base;
pub mod update_rules;

pub mod euclidean;
pub mod itakura_saito;
pub mod kl_divergence;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenience
pub use euclidean::EuclideanUpdater;
pub use itakura_saito::{ItakuraSaitoTerms, ItakuraSaitoUpdater};
pub use kl_divergence::KlDivergenceUpdater;
pub use nmf_base::{NmfFactors, NmfUpdater};
