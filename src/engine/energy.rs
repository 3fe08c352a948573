use crate::models::constants::EstimatorConstants;

const DAYS_PER_YEAR: f64 = 365.0;

/// Annual consumption (kWh/yr), treating every selected appliance as running
/// the same average hours per day.
pub fn compute_annual_consumption(total_watts_selected: u64, constants: &EstimatorConstants) -> f64 {
    let kwh_per_day = total_watts_selected as f64 * constants.usage_hours_per_day / 1000.0;
    kwh_per_day * DAYS_PER_YEAR
}

/// Annual panel output (kWh/yr) after system losses.
pub fn compute_annual_solar_gen(
    panel_count: u64,
    panel_watts_each: u32,
    constants: &EstimatorConstants,
) -> f64 {
    let system_watts = panel_count as f64 * panel_watts_each as f64;
    let kwh_per_day =
        system_watts * constants.sun_hours_per_day * constants.system_loss_factor / 1000.0;
    kwh_per_day * DAYS_PER_YEAR
}
