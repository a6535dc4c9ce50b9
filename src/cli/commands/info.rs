//! Info command handler

use crate::config::{ExperimentParams, InfoArgs};
use crate::error::Result;
use crate::results::results_file;

pub fn run_info(args: InfoArgs) -> Result<()> {
    let params = ExperimentParams::from_yaml_file(&args.config)?;

    println!("Experiment: {}", params.exp_name());
    println!("  Model:        {}", params.model_name);
    println!("  Dataset:      {}", params.data);
    println!("  Epochs:       {}", params.n_epochs);
    println!("  Batch size:   {}", params.batch_size);
    println!("  Window:       {} samples", params.sequence_length);
    println!("  Quantiles:    {:?}", params.quantiles);
    println!("  Monte-Carlo:  {}", params.mc);
    if params.mc {
        println!("  MC samples:   {}", params.n_model_samples);
    }
    println!("  Seed:         {}", params.seed);
    println!("  Device:       {:?}", params.device);
    println!("  Checkpoints:  {}", params.checkpoint_dir().display());
    println!("  Results file: {}", results_file(&params).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("exp.yaml");
        std::fs::write(&config, "model_name: CNN1D\ndata: redd\nmc: true\n").unwrap();
        assert!(run_info(InfoArgs { config }).is_ok());
    }
}
