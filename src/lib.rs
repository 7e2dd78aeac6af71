pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use network::network::{Network, DEFAULT_PRECISION};
pub use network::config::NetworkConfig;
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{EpochStats, TrainConfig, train_loop};
