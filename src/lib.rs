/*
 * File: /src/lib.rs
 * Created Date: Monday, October 12th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 15th October 2026 11:02:17 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-12		Zihan	Multiplicative-update NMF for magnitude spectrograms
 */
pub mod atom;
pub mod config;
pub mod error;
pub mod history;
pub mod init;
pub mod nmf;
pub mod reconstruct;

use chrono::Local;
use log::LevelFilter;

pub use config::{CostFunction, NmfConfig, NmfParams, Regularization};
pub use error::NmfError;
pub use history::ConvergenceHistory;
pub use nmf::{Nmf, NmfResult};
pub use reconstruct::reconstruct_components;

/// Wall-clock stamp used in progress messages
pub fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Install a stdout logger at `level`
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    simple_logger::SimpleLogger::new().with_level(level).init()
}
