use serde::{Serialize, Deserialize};

use crate::error::Result;

/// Topology of a network plus an optional seed for its random source.
///
/// Only the shape is stored here; learned weights are never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub num_inputs: usize,
    pub num_hidden_nodes: usize,
    pub num_outputs: usize,
    /// Seeds weight initialization and per-epoch shuffling when set.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NnError;

    #[test]
    fn seed_is_optional() {
        let config: NetworkConfig =
            serde_json::from_str(r#"{"num_inputs": 2, "num_hidden_nodes": 3, "num_outputs": 1}"#).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.num_hidden_nodes, 3);
    }

    #[test]
    fn save_then_load_keeps_topology() {
        let path = std::env::temp_dir().join(format!("shallow-nn-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let config = NetworkConfig { num_inputs: 4, num_hidden_nodes: 6, num_outputs: 2, seed: Some(17) };

        config.save_json(path).unwrap();
        let loaded = NetworkConfig::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = NetworkConfig::load_json("/nonexistent/shallow-nn/config.json").unwrap_err();
        assert!(matches!(err, NnError::Io(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let path = std::env::temp_dir().join(format!("shallow-nn-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = NetworkConfig::load_json(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, NnError::Json(_)));
    }
}
