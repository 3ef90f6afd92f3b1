//! The optimizer comparison: one independent training run per optimizer
//! configuration, all starting from the same (shuffled) dataset.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;
use rand::Rng;
use serde::Serialize;

use crate::{
    data::iris::Dataset,
    error::Result,
    network::network::Network,
    optim::{optimizer::OptimizerKind, update_rule::UpdateRule},
    plot::chart::{Chart, Series},
    train::{train_config::TrainConfig, trainer::Trainer},
};

/// Outcome of training one fresh network with one optimizer.
///
/// `trace` holds the checkpoint MSEs, each taken before that epoch's update.
/// `final_mse` is measured on the trained network after the last epoch.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub optimizer: OptimizerKind,
    pub label: String,
    pub final_mse: f64,
    pub accuracy: f64,
    pub trace: Vec<f64>,
}

/// All runs of one comparison. `traces()` is the optimizer × checkpoint
/// MSE matrix.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub config: TrainConfig,
    pub checkpoints: Vec<usize>,
    pub runs: Vec<RunReport>,
}

impl Comparison {
    pub fn traces(&self) -> Vec<Vec<f64>> {
        self.runs.iter().map(|run| run.trace.clone()).collect()
    }

    pub fn series(&self) -> Vec<Series<'_>> {
        self.runs.iter()
            .map(|run| Series { label: &run.label, values: &run.trace })
            .collect()
    }

    /// Indices of the `n` runs with the lowest final MSE, best first.
    pub fn best(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.runs.len()).collect();
        order.sort_by(|&a, &b| self.runs[a].final_mse.total_cmp(&self.runs[b].final_mse));
        order.truncate(n);
        order
    }

    /// Draws the two-panel chart; the bottom panel zooms on the two best runs.
    pub fn save_chart<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let last_epoch = self.checkpoints.last().copied().unwrap_or(0);
        Chart::new(self.series(), &self.best(2), last_epoch)?.save(path)?;
        Ok(())
    }

    /// Writes the comparison as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Trains a fresh Iris network on a copy of `dataset` with one optimizer.
pub fn run_optimizer<R: Rng + ?Sized>(
    kind: OptimizerKind,
    dataset: &Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> RunReport {
    info!(
        "training with {} for {} epochs (lr = {})",
        kind.label(), config.epochs, config.learning_rate
    );

    let network = Network::iris(config.init_range, rng);
    let trainer = Trainer::new(network, dataset.clone(), config.learning_rate, config.epochs)
        .log_every(config.log_every);

    let (trace, final_mse, accuracy) = match kind {
        OptimizerKind::None => finish(trainer),
        other => finish(trainer.with_update_rule(other.build())),
    };

    info!(
        "{}: final mse = {final_mse:.6}, accuracy = {:.1}%",
        kind.label(), accuracy * 100.0
    );

    RunReport {
        optimizer: kind,
        label: kind.label().to_string(),
        final_mse,
        accuracy,
        trace,
    }
}

/// Runs every optimizer configuration in turn.
pub fn run_comparison<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> Comparison {
    let runs = OptimizerKind::ALL.iter()
        .map(|&kind| run_optimizer(kind, dataset, config, &mut *rng))
        .collect();

    Comparison {
        config: *config,
        checkpoints: config.checkpoints(),
        runs,
    }
}

fn finish<U: UpdateRule>(mut trainer: Trainer<U>) -> (Vec<f64>, f64, f64) {
    let trace = trainer.train();
    (trace, trainer.mse(), trainer.accuracy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::iris::Species;
    use rand::{rngs::StdRng, SeedableRng};

    fn small_dataset() -> Dataset {
        let inputs = (0..12)
            .map(|i| {
                let s = (i % 3) as f64;
                vec![0.2 + 0.3 * s, 0.8 - 0.3 * s, 0.1 + 0.4 * s, 0.05 * i as f64]
            })
            .collect();
        let labels = (0..12).map(|i| Species::ALL[i % 3].one_hot()).collect();
        Dataset::new(inputs, labels)
    }

    fn config(epochs: usize) -> TrainConfig {
        TrainConfig { epochs, learning_rate: 0.05, log_every: 10, init_range: 1.0 }
    }

    #[test]
    fn comparison_has_five_aligned_runs() {
        let cmp = run_comparison(&small_dataset(), &config(50), &mut StdRng::seed_from_u64(1));
        assert_eq!(cmp.runs.len(), 5);
        assert_eq!(cmp.checkpoints, vec![0, 10, 20, 30, 40]);
        for (run, kind) in cmp.runs.iter().zip(OptimizerKind::ALL) {
            assert_eq!(run.optimizer, kind);
            assert_eq!(run.trace.len(), 5);
            assert!(run.final_mse.is_finite() && run.final_mse > 0.0);
        }
        let traces = cmp.traces();
        assert_eq!(traces.len(), 5);
        assert!(traces.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn best_orders_by_final_mse() {
        let run = |kind: OptimizerKind, mse: f64| RunReport {
            optimizer: kind,
            label: kind.label().into(),
            final_mse: mse,
            accuracy: 0.0,
            trace: vec![mse],
        };
        let cmp = Comparison {
            config: config(1),
            checkpoints: vec![0],
            runs: vec![
                run(OptimizerKind::None, 0.3),
                run(OptimizerKind::Momentum, 0.1),
                run(OptimizerKind::Adagrad, 0.4),
                run(OptimizerKind::RmsProp, 0.05),
                run(OptimizerKind::Adam, 0.2),
            ],
        };
        assert_eq!(cmp.best(2), vec![3, 1]);
        assert_eq!(cmp.best(10).len(), 5);
    }

    #[test]
    fn report_is_written_as_json() {
        let cmp = run_comparison(&small_dataset(), &config(3), &mut StdRng::seed_from_u64(2));
        let path = std::env::temp_dir().join(format!("iris-optim-report-{}.json", std::process::id()));
        cmp.save_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(value["runs"].as_array().unwrap().len(), 5);
        assert_eq!(value["runs"][4]["optimizer"], "adam");
        assert_eq!(value["runs"][3]["label"], "RMSprop");
        assert_eq!(value["config"]["epochs"], 3);
    }

    #[test]
    fn final_mse_is_measured_after_the_last_epoch() {
        let dataset = small_dataset();
        let config = config(25);
        let report = run_optimizer(OptimizerKind::None, &dataset, &config, &mut StdRng::seed_from_u64(5));

        // Same seed, same network: replay the run and evaluate it directly.
        let network = Network::iris(config.init_range, &mut StdRng::seed_from_u64(5));
        let mut trainer = Trainer::new(network, dataset, config.learning_rate, config.epochs)
            .log_every(config.log_every);
        trainer.train();

        assert_eq!(report.trace.len(), 3);
        assert_eq!(report.final_mse, trainer.mse());
        assert_ne!(report.final_mse, *report.trace.last().unwrap());
    }
}
