use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductTotals {
    pub total_cost: f64,
    pub panel_count: u64,
    pub panel_watts_each: u32,
    pub battery_count: u64,
    pub battery_kwh_each: f64,
    pub inverter_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiBreakdown {
    pub total_cost: f64,
    pub annual_consumption: f64,
    pub annual_solar: f64,
    pub annual_offset: f64,
    pub grid_cost: f64,
    pub solar_savings: f64,
    pub roi_years: Option<f64>, // None when savings are zero
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reliability {
    pub backup_hours: f64,
    pub total_battery_kwh: f64,
    pub critical_watts: u64,
}

/// Result of one full recalculation. Raw numbers only; formatting is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub total_watts_selected: u64,
    pub total_cost: f64,
    pub annual_consumption_kwh: f64,
    pub annual_solar_gen_kwh: f64,
    pub annual_offset_kwh: f64,
    pub grid_cost_per_year: f64,
    pub solar_savings_per_year: f64,
    pub roi_years: Option<f64>,
    pub backup_hours: f64,
    pub critical_watts: u64,
    pub total_battery_kwh: f64,
    pub future_points: i64,
    pub final_score: u8,
}
