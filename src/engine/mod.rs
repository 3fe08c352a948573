pub mod energy;
pub mod needs;
pub mod products;
pub mod reliability;
pub mod roi;
pub mod score;

pub use energy::{compute_annual_consumption, compute_annual_solar_gen};
pub use needs::compute_needs;
pub use products::compute_product_totals;
pub use reliability::compute_reliability;
pub use roi::compute_roi;
pub use score::{compute_penalty_factor, compute_score, compute_weighted_score};

use crate::models::constants::EstimatorConstants;
use crate::models::metrics::MetricsRecord;
use crate::models::snapshot::SelectionSnapshot;

/// Stateless estimator bound to one set of modeling constants.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Estimator {
    constants: EstimatorConstants,
}

impl Estimator {
    pub fn new(constants: EstimatorConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &EstimatorConstants {
        &self.constants
    }

    /// Full recomputation: needs → product totals → ROI → reliability → score.
    pub fn recalculate(&self, snapshot: &SelectionSnapshot) -> MetricsRecord {
        let total_watts_selected = compute_needs(&snapshot.appliances);
        let totals = compute_product_totals(&snapshot.products);
        let roi = roi::roi_from_totals(total_watts_selected, &totals, &self.constants);
        let reliability = compute_reliability(
            total_watts_selected,
            totals.battery_count,
            totals.battery_kwh_each,
        );
        let final_score = compute_weighted_score(
            roi.roi_years,
            reliability.backup_hours,
            snapshot.future_points,
            roi.annual_consumption,
            &self.constants.weights,
        );

        log::debug!(
            "recalculated: {} W selected, cost {:.2}, roi {:?}, backup {:.1}h, score {}",
            total_watts_selected,
            roi.total_cost,
            roi.roi_years,
            reliability.backup_hours,
            final_score
        );

        MetricsRecord {
            total_watts_selected,
            total_cost: roi.total_cost,
            annual_consumption_kwh: roi.annual_consumption,
            annual_solar_gen_kwh: roi.annual_solar,
            annual_offset_kwh: roi.annual_offset,
            grid_cost_per_year: roi.grid_cost,
            solar_savings_per_year: roi.solar_savings,
            roi_years: roi.roi_years,
            backup_hours: reliability.backup_hours,
            critical_watts: reliability.critical_watts,
            total_battery_kwh: reliability.total_battery_kwh,
            future_points: snapshot.future_points,
            final_score,
        }
    }
}

/// Recalculate with the default constants.
pub fn recalculate(snapshot: &SelectionSnapshot) -> MetricsRecord {
    Estimator::default().recalculate(snapshot)
}
