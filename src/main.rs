/*
 * File: /main.rs
 * Created Date: Monday, October 12th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 15th October 2026 11:40:05 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use log::{info, LevelFilter};
use ndarray::{Array1, Array2};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};

use fast_nmf::init::{add_noise, random_templates, uniform_activations};
use fast_nmf::{init_logger, timestamp, Nmf, NmfParams};

const SEED: u64 = 42;
const DEFAULT_COST_FUNC: &str = "EucDist";
const DEFAULT_NUM_ITER: usize = 50;

struct RunArgs {
    input: PathBuf,
    out_dir: PathBuf,
    params: NmfParams,
    /// Relative level of |N(0, 1)| noise added to V before fitting
    noise_level: f64,
}

impl RunArgs {
    /// Parse command line arguments
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- data/spectrogram.npy 8 50 EucDist FrobH 0.1 false 0.05 output/
    /// ```
    fn new(mut args: impl Iterator<Item = String>) -> Result<RunArgs, Box<dyn Error>> {
        // args:
        // 0: program name
        // 1: V .npy path
        // 2: numComp
        // 3: numIter (optional, default 50)
        // 4: costFunc (optional, default EucDist)
        // 5: reg (optional)
        // 6: p (optional)
        // 7: fixW (optional, true/false)
        // 8: noise level (optional, default 0)
        // 9: output dir (optional, default "output")
        args.next();
        let input = PathBuf::from(args.next().ok_or("missing input .npy path")?);
        let num_comp = args.next().ok_or("missing numComp")?.parse::<usize>()?;
        let num_iter = args.next().map(|s| s.parse::<usize>()).transpose()?;
        let cost_func = args.next();
        let reg = args.next();
        let p = args.next().map(|s| s.parse::<f64>()).transpose()?;
        let fix_w = args.next().map(|s| s.parse::<bool>()).transpose()?;
        let noise_level = args.next().map(|s| s.parse::<f64>()).transpose()?.unwrap_or(0.0);
        let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "output".to_string()));

        if !(noise_level.is_finite() && noise_level >= 0.0) {
            return Err(format!("noise level must be non-negative, got {}", noise_level).into());
        }

        Ok(RunArgs {
            input,
            out_dir,
            params: NmfParams {
                cost_func: Some(cost_func.unwrap_or_else(|| DEFAULT_COST_FUNC.to_string())),
                num_iter: Some(num_iter.unwrap_or(DEFAULT_NUM_ITER)),
                fix_w,
                reg,
                p,
                num_comp: Some(num_comp),
                ..Default::default()
            },
            noise_level,
        })
    }
}

fn write_matrix(path: PathBuf, matrix: &Array2<f64>) -> Result<(), Box<dyn Error>> {
    matrix.write_npy(File::create(path)?)?;
    Ok(())
}

fn write_series(path: PathBuf, series: &[f64]) -> Result<(), Box<dyn Error>> {
    Array1::from(series.to_vec()).write_npy(File::create(path)?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger(LevelFilter::Info)?;

    let args = RunArgs::new(std::env::args())?;
    let nmf = Nmf::from_params(args.params)?;
    let num_comp = nmf.config.num_comp.unwrap_or(1);

    let load_start = Instant::now();
    let v = Array2::<f64>::read_npy(File::open(&args.input)?)?;
    info!(
        "[{}] Loaded {} ({}x{}) in {}ms",
        timestamp(),
        args.input.display(),
        v.nrows(),
        v.ncols(),
        load_start.elapsed().as_millis()
    );

    let v = if args.noise_level > 0.0 {
        info!("[{}] Adding noise at level {}", timestamp(), args.noise_level);
        add_noise(&v, args.noise_level, SEED)
    } else {
        v
    };

    let init_w = random_templates(v.nrows(), num_comp, SEED);
    let init_h = uniform_activations(num_comp, v.ncols());

    let fit_start = Instant::now();
    let result = nmf.fit(&v, &init_w, &init_h)?;
    info!(
        "[{}] {} NMF with {} components done in {:.2}s",
        timestamp(),
        nmf.config.cost_function,
        result.rank(),
        fit_start.elapsed().as_secs_f32()
    );

    std::fs::create_dir_all(&args.out_dir)?;
    write_matrix(args.out_dir.join("W.npy"), &result.w)?;
    write_matrix(args.out_dir.join("H.npy"), &result.h)?;
    for (r, component) in result.components.iter().enumerate() {
        write_matrix(args.out_dir.join(format!("component_{}.npy", r)), component)?;
    }
    write_series(args.out_dir.join("objective.npy"), &result.history.objective)?;
    write_series(args.out_dir.join("w_change.npy"), &result.history.w_change)?;
    write_series(args.out_dir.join("h_change.npy"), &result.history.h_change)?;

    info!(
        "[{}] Wrote results to {} (final objective {:.6e})",
        timestamp(),
        args.out_dir.display(),
        result.history.final_objective().unwrap_or(f64::NAN)
    );
    Ok(())
}
