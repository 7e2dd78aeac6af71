use shallow_nn::{Network, TrainConfig, EpochStats};
use std::sync::mpsc;

fn main() -> shallow_nn::Result<()> {
    let mut network = Network::new(2, 3, 1);

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];
    network.set_training_data(&inputs, &expected_outputs)?;

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let config = TrainConfig::new(10000, 0.5).with_progress(tx);
    network.train_with(&config)?;
    drop(config);

    for stats in rx.iter().filter(|s| s.epoch % 1000 == 0) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }

    network.print(&inputs, 3, &mut std::io::stdout())?;
    Ok(())
}
