//! Results persistence
//!
//! Test-phase metrics are written as a 2-D `f64` NPY array (rows per
//! appliance, columns per [`METRIC_COLUMNS`](crate::train::METRIC_COLUMNS)).
//! The file name encodes the experiment name and, for Monte-Carlo runs, the
//! historical `_uncertainity` marker; both are load-bearing for downstream
//! analysis scripts and must not change.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use ndarray_npy::WriteNpyExt;

use crate::config::ExperimentParams;
use crate::error::Result;
use crate::train::{metrics_matrix, ApplianceMetrics};

/// Path of the results file for a configuration:
/// `<results_path>/<exp_name>results.npy`, with an `_uncertainity` marker
/// between experiment name and suffix when `mc` is set.
pub fn results_file(params: &ExperimentParams) -> PathBuf {
    let stem = if params.mc {
        format!("{}_uncertainity", params.exp_name())
    } else {
        params.exp_name()
    };
    params.results_path.join(format!("{stem}results.npy"))
}

/// Persist the results matrix, returning the path written
pub fn save_results(results: &[ApplianceMetrics], params: &ExperimentParams) -> Result<PathBuf> {
    let matrix = metrics_matrix(results);
    let path = results_file(params);
    let writer = BufWriter::new(File::create(&path)?);
    matrix.write_npy(writer)?;
    Ok(path)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The `_uncertainity` marker appears in the path exactly when the
        /// Monte-Carlo flag is set
        #[test]
        fn uncertainity_marker_iff_mc(
            data in "[a-z]{1,10}",
            model in "[A-Za-z0-9]{1,10}",
            mc in any::<bool>(),
        ) {
            let params = ExperimentParams::new(model, data).with_mc(mc);
            let path = results_file(&params).to_string_lossy().into_owned();
            prop_assert_eq!(path.contains("_uncertainity"), mc);
            prop_assert!(path.ends_with("results.npy"));
        }
    }
}
