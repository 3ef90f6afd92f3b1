use clap::Parser;
use log::info;

use iris_optim::{load_iris, run_comparison, TrainConfig};

const DATASET_PATH: &str = "data/iris.csv";
const REPORT_PATH: &str = "mse_traces.json";
const CHART_PATH: &str = "optimizers.png";

/// Trains the Iris classifier once per optimizer and plots the MSE curves.
///
/// Invalid or non-positive arguments are ignored in favour of the defaults.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Epochs per optimizer run [default: 10000]
    #[arg(allow_hyphen_values = true)]
    epochs: Option<String>,

    /// Learning rate [default: 0.01]
    #[arg(allow_hyphen_values = true)]
    learning_rate: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = TrainConfig::from_args(args.epochs.as_deref(), args.learning_rate.as_deref());
    info!("epochs = {}, learning rate = {}", config.epochs, config.learning_rate);

    let mut rng = rand::thread_rng();
    let mut dataset = load_iris(DATASET_PATH)?;
    info!("loaded {} samples from {DATASET_PATH}", dataset.len());
    dataset.shuffle(&mut rng);

    let comparison = run_comparison(&dataset, &config, &mut rng);
    for &i in &comparison.best(2) {
        let run = &comparison.runs[i];
        info!("best: {} (final mse = {:.6})", run.label, run.final_mse);
    }

    comparison.save_json(REPORT_PATH)?;
    info!("wrote {REPORT_PATH}");
    comparison.save_chart(CHART_PATH)?;
    info!("wrote {CHART_PATH}");

    Ok(())
}
