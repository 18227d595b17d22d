//! Declarative model architecture loaded from JSON.
//!
//! A config only describes the stages (dimensions and activation) and an
//! optional seed; parameters are always drawn fresh, never loaded.
use crate::activations::ActivationKind;
use crate::error::NnError;
use crate::layers::DenseLayer;
use crate::network::Model;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub fan_in: usize,
    pub fan_out: usize,
    pub activation: ActivationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Seed for parameter initialization; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub layers: Vec<LayerConfig>,
}

impl ModelConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid model config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Check that the stages are non-empty, have non-zero dimensions and compose.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.layers.is_empty() {
            return Err(NnError::EmptyModel);
        }
        for l in &self.layers {
            if l.fan_in == 0 || l.fan_out == 0 {
                return Err(NnError::ZeroDimension {
                    fan_in: l.fan_in,
                    fan_out: l.fan_out,
                });
            }
        }
        for (index, pair) in self.layers.windows(2).enumerate() {
            if pair[0].fan_out != pair[1].fan_in {
                return Err(NnError::Incompatible {
                    index,
                    fan_out: pair[0].fan_out,
                    next_fan_in: pair[1].fan_in,
                });
            }
        }
        Ok(())
    }

    /// Build a zero-parameter model with the configured stages.
    pub fn build(&self) -> crate::error::Result<Model> {
        self.validate()?;
        let mut model = Model::new();
        for l in &self.layers {
            model.add_layer(DenseLayer::new(l.fan_in, l.fan_out), l.activation.to_arc());
        }
        debug!(%model, "built model from config");
        Ok(model)
    }

    /// Build and initialize from the configured seed.
    pub fn build_initialized(&self) -> crate::error::Result<Model> {
        let mut model = self.build()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        model.init_weights(&mut rng);
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STAGE: &str = r#"{
        "seed": 7,
        "layers": [
            { "fan_in": 3, "fan_out": 4, "activation": "leaky_relu" },
            { "fan_in": 4, "fan_out": 2, "activation": "sigmoid" }
        ]
    }"#;

    #[test]
    fn parses_and_builds() {
        let config = ModelConfig::from_json(TWO_STAGE).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.layers[1].activation, ActivationKind::Sigmoid);
        let model = config.build().unwrap();
        assert_eq!(model.shape(), (3, 2));
        assert!(model.biases().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn seeded_builds_match() {
        let config = ModelConfig::from_json(TWO_STAGE).unwrap();
        let a = config.build_initialized().unwrap();
        let b = config.build_initialized().unwrap();
        assert_eq!(a.layers(), b.layers());
        assert_eq!(a.biases(), b.biases());
    }

    #[test]
    fn seed_is_optional() {
        let config =
            ModelConfig::from_json(r#"{"layers":[{"fan_in":1,"fan_out":1,"activation":"identity"}]}"#)
                .unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.build_initialized().unwrap().shape(), (1, 1));
    }

    #[test]
    fn rejects_stages_that_do_not_compose() {
        let err = ModelConfig::from_json(
            r#"{"layers":[
                {"fan_in":2,"fan_out":3,"activation":"identity"},
                {"fan_in":4,"fan_out":1,"activation":"identity"}
            ]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<NnError>(),
            Some(&NnError::Incompatible {
                index: 0,
                fan_out: 3,
                next_fan_in: 4
            })
        );
    }

    #[test]
    fn rejects_empty_and_zero_sized() {
        let empty = ModelConfig {
            seed: None,
            layers: Vec::new(),
        };
        assert_eq!(empty.validate(), Err(NnError::EmptyModel));

        let zero = ModelConfig {
            seed: None,
            layers: vec![LayerConfig {
                fan_in: 0,
                fan_out: 2,
                activation: ActivationKind::Identity,
            }],
        };
        assert!(matches!(zero.build(), Err(NnError::ZeroDimension { .. })));
    }

    #[test]
    fn unknown_activation_is_a_parse_error() {
        let err = ModelConfig::from_json(
            r#"{"layers":[{"fan_in":1,"fan_out":1,"activation":"tanh"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid model config"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ModelConfig::from_file("/nonexistent/model.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/model.json"));
    }
}
