use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};

use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` on its stored training set for `config.epochs` epochs and
/// returns the mean training loss of the last completed epoch (0.0 if none ran).
///
/// # Early termination
/// The loop stops after the current epoch if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `InvalidLearningRate` for a non-finite rate; `ShapeMismatch` if a stored
/// sample no longer fits the network (e.g. after `init` with a new topology).
pub fn train_loop(network: &mut Network, config: &TrainConfig) -> Result<f64> {
    let optimizer = Sgd::new(config.learning_rate)?;

    info!(
        "training {}-{}-{} network on {} samples for {} epochs (learning rate {})",
        network.num_inputs(),
        network.num_hidden_nodes(),
        network.num_outputs(),
        network.num_training_sets(),
        config.epochs,
        config.learning_rate
    );

    let mut last_train_loss = 0.0;
    let mut completed = 0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        let train_loss = network.train_epoch(&optimizer)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        last_train_loss = train_loss;
        completed = epoch;
        debug!("epoch {epoch}/{}: loss = {train_loss:.6}", config.epochs);

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss,
                elapsed_ms,
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    info!("finished {completed} epochs, final loss = {last_train_loss:.6}");
    Ok(last_train_loss)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    fn seeded_network() -> Network {
        let mut network = Network::with_seed(2, 3, 1, 21);
        network.set_training_data(
            &[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            &[vec![0.0], vec![0.0], vec![0.0], vec![1.0]],
        ).unwrap();
        network
    }

    #[test]
    fn reports_every_epoch() {
        let mut network = seeded_network();
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig::new(5, 0.5).with_progress(tx);

        let loss = train_loop(&mut network, &config).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(stats.iter().all(|s| s.total_epochs == 5));
        assert_eq!(stats[4].train_loss, loss);
    }

    #[test]
    fn stops_when_receiver_is_dropped() {
        let mut network = seeded_network();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig::new(50, 0.5).with_progress(tx);

        let before = network.clone();
        train_loop(&mut network, &config).unwrap();

        // The first epoch still runs before the send fails.
        assert_ne!(network.hidden_layer().weights(), before.hidden_layer().weights());
    }

    #[test]
    fn stop_flag_prevents_training() {
        let mut network = seeded_network();
        let flag = Arc::new(AtomicBool::new(true));
        let config = TrainConfig::new(10, 0.5).with_stop_flag(flag);

        let before = network.clone();
        let loss = train_loop(&mut network, &config).unwrap();

        assert_eq!(loss, 0.0);
        assert_eq!(network.hidden_layer().weights(), before.hidden_layer().weights());
    }

    #[test]
    fn loss_decreases_on_a_learnable_set() {
        let mut network = seeded_network();
        let first = train_loop(&mut network, &TrainConfig::new(1, 0.5)).unwrap();
        let later = train_loop(&mut network, &TrainConfig::new(2000, 0.5)).unwrap();
        assert!(later < first, "loss went from {first} to {later}");
    }

    #[test]
    fn zero_epochs_returns_zero() {
        let mut network = seeded_network();
        assert_eq!(train_loop(&mut network, &TrainConfig::new(0, 0.5)).unwrap(), 0.0);
    }
}
