use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fixed rough.js parameters shared by every shape sketch.
///
/// The defaults reproduce the baseline parameter set (fill weight 2, hachure gap 16, bowing 2,
/// seed 1); with a fixed non-zero seed the sketch output is byte-identical across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    pub fill_weight: f32,
    pub hachure_gap: f32,
    pub bowing: f32,
    pub seed: u64,
    /// Roughness of connector strokes; shapes use the library default.
    pub connection_roughness: f32,
    /// Maximum fractional digits kept in emitted path data.
    pub path_precision: usize,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            fill_weight: 2.0,
            hachure_gap: 16.0,
            bowing: 2.0,
            seed: 1,
            connection_roughness: 1.0,
            path_precision: 6,
        }
    }
}

impl SketchConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SketchConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.seed == 0 {
            return Err(Error::InvalidConfig {
                message: "seed must be non-zero (0 selects an unseeded random source)".to_string(),
            });
        }
        if !(1..=15).contains(&self.path_precision) {
            return Err(Error::InvalidConfig {
                message: format!("pathPrecision must be in 1..=15, got {}", self.path_precision),
            });
        }
        let numbers = [
            ("fillWeight", self.fill_weight),
            ("hachureGap", self.hachure_gap),
            ("bowing", self.bowing),
            ("connectionRoughness", self.connection_roughness),
        ];
        for (name, v) in numbers {
            if !v.is_finite() {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be finite"),
                });
            }
        }
        Ok(())
    }
}
