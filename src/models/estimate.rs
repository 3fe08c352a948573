use crate::models::metrics::MetricsRecord;
use serde::{Deserialize, Serialize};

/// Display strings the page writes straight into its metric elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDisplay {
    pub needs_watts: String,
    pub total_cost: String,
    pub grid_cost: String,
    pub solar_savings: String,
    pub roi: String, // "--" when payback cannot be estimated
    pub backup_hours: String,
    pub future_ready: String,
    pub score: String,
    pub liquid_height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateView {
    pub metrics: MetricsRecord,
    pub display: MetricsDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryFocus {
    pub current_step: usize,
    pub product_id: Option<String>,
}
