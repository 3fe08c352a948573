use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub roi: f64,
    pub reliability: f64,
    pub future: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            roi: 0.45,
            reliability: 0.30,
            future: 0.25,
        }
    }
}

impl ScoreWeights {
    /// Builds weights from a settings map, falling back to defaults per key.
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        let defaults = Self::default();
        Self {
            roi: *map.get("roi").unwrap_or(&defaults.roi),
            reliability: *map.get("reliability").unwrap_or(&defaults.reliability),
            future: *map.get("future").unwrap_or(&defaults.future),
        }
    }
}

/// Modeling assumptions, fixed for the lifetime of an `Estimator`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConstants {
    pub usage_hours_per_day: f64,
    pub sun_hours_per_day: f64,
    pub system_loss_factor: f64,
    pub grid_rate: f64, // $/kWh
    pub weights: ScoreWeights,
}

impl Default for EstimatorConstants {
    fn default() -> Self {
        Self {
            usage_hours_per_day: 4.0,
            sun_hours_per_day: 4.5,
            system_loss_factor: 0.85,
            grid_rate: 0.22,
            weights: ScoreWeights::default(),
        }
    }
}

/// Default score weights (sum to 1.0), keyed the way the settings document stores them.
pub fn default_weights() -> HashMap<String, f64> {
    let w = ScoreWeights::default();
    HashMap::from([
        ("roi".to_string(), w.roi),
        ("reliability".to_string(), w.reliability),
        ("future".to_string(), w.future),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_map_matches_score_weights() {
        let map = default_weights();
        assert_eq!(map.len(), 3);
        assert_eq!(ScoreWeights::from_map(&map), ScoreWeights::default());
        assert_eq!(EstimatorConstants::default().weights, ScoreWeights::from_map(&map));
    }

    #[test]
    fn partial_weight_map_falls_back_per_key() {
        let map = HashMap::from([("roi".to_string(), 0.6)]);
        let weights = ScoreWeights::from_map(&map);
        assert_eq!(weights.roi, 0.6);
        assert_eq!(weights.reliability, ScoreWeights::default().reliability);
    }
}
