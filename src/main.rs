//! Trains a small network on XOR and prints its predictions.
//!
//! Usage: cargo run -- --epochs 10000 --lr 0.5 --hidden 3 --seed 42

use std::env;

use anyhow::{bail, Context, Result};
use log::info;
use shallow_nn::{Network, NetworkConfig, TrainConfig, DEFAULT_PRECISION};

struct Args {
    config_path: Option<String>,
    epochs: usize,
    learning_rate: f64,
    hidden: usize,
    seed: Option<u64>,
    precision: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(args) = parse_args()? else {
        print_help();
        return Ok(());
    };

    let config = match &args.config_path {
        Some(path) => NetworkConfig::load_json(path)
            .with_context(|| format!("failed to load network config from {path}"))?,
        None => NetworkConfig {
            num_inputs: 2,
            num_hidden_nodes: args.hidden,
            num_outputs: 1,
            seed: args.seed,
        },
    };
    info!("network config: {config:?}");

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
    ];

    let mut network = Network::from_config(&config);
    network
        .set_training_data(&inputs, &targets)
        .context("XOR data does not fit the configured topology")?;

    let loss = network.train_with(&TrainConfig::new(args.epochs, args.learning_rate))?;
    println!("Final loss after {} epochs: {loss:.6}", args.epochs);

    network.print_training_set(args.precision, &mut std::io::stdout().lock())?;
    Ok(())
}

/// Returns `None` when `--help` was requested.
fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        config_path: None,
        epochs: 10000,
        learning_rate: 0.5,
        hidden: 3,
        seed: None,
        precision: DEFAULT_PRECISION,
    };

    let mut iter = env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().with_context(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "--config" | "-c" => args.config_path = Some(value()?),
            "--epochs" | "-e" => args.epochs = value()?.parse().context("invalid --epochs")?,
            "--lr" => args.learning_rate = value()?.parse().context("invalid --lr")?,
            "--hidden" => args.hidden = value()?.parse().context("invalid --hidden")?,
            "--seed" => args.seed = Some(value()?.parse().context("invalid --seed")?),
            "--precision" | "-p" => args.precision = value()?.parse().context("invalid --precision")?,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(Some(args))
}

fn print_help() {
    println!("shallow-nn: train a one-hidden-layer network on XOR");
    println!();
    println!("Options:");
    println!("  -c, --config <path>     JSON network config (num_inputs, num_hidden_nodes, num_outputs, seed)");
    println!("  -e, --epochs <n>        training epochs (default 10000)");
    println!("      --lr <rate>         learning rate (default 0.5)");
    println!("      --hidden <n>        hidden nodes when no config is given (default 3)");
    println!("      --seed <n>          seed for weights and shuffling");
    println!("  -p, --precision <n>     decimals in printed predictions (default 1)");
    println!("  -h, --help              show this help");
}
