use crate::engine::energy::{compute_annual_consumption, compute_annual_solar_gen};
use crate::engine::needs::compute_needs;
use crate::engine::products::compute_product_totals;
use crate::models::constants::EstimatorConstants;
use crate::models::metrics::{ProductTotals, RoiBreakdown};
use crate::models::snapshot::SelectionSnapshot;

/// Payback estimate for a full snapshot.
pub fn compute_roi(snapshot: &SelectionSnapshot, constants: &EstimatorConstants) -> RoiBreakdown {
    let total_watts = compute_needs(&snapshot.appliances);
    let totals = compute_product_totals(&snapshot.products);
    roi_from_totals(total_watts, &totals, constants)
}

pub(crate) fn roi_from_totals(
    total_watts_selected: u64,
    totals: &ProductTotals,
    constants: &EstimatorConstants,
) -> RoiBreakdown {
    let annual_consumption = compute_annual_consumption(total_watts_selected, constants);
    let annual_solar =
        compute_annual_solar_gen(totals.panel_count, totals.panel_watts_each, constants);

    // Generation beyond what the household uses is not credited.
    let annual_offset = annual_consumption.min(annual_solar);

    let grid_cost = annual_consumption * constants.grid_rate;
    let solar_savings = annual_offset * constants.grid_rate;
    let roi_years = if solar_savings > 0.0 {
        Some(totals.total_cost / solar_savings)
    } else {
        None
    };

    RoiBreakdown {
        total_cost: totals.total_cost,
        annual_consumption,
        annual_solar,
        annual_offset,
        grid_cost,
        solar_savings,
        roi_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::{ApplianceSelection, ProductCategory, ProductSelection};

    fn panel(unit_price: f64, wattage_each: u32, count: u32) -> ProductSelection {
        ProductSelection {
            category: ProductCategory::Panel,
            unit_price,
            count,
            wattage_each,
            kwh_each: 0.0,
        }
    }

    #[test]
    fn single_panel_pays_back_in_about_three_years() {
        let snapshot = SelectionSnapshot {
            appliances: vec![ApplianceSelection { wattage: 100, count: 2 }],
            products: vec![panel(200.0, 300, 1)],
            future_points: 0,
        };

        let roi = compute_roi(&snapshot, &EstimatorConstants::default());
        assert!((roi.annual_consumption - 292.0).abs() < 1e-9);
        assert!((roi.annual_solar - 418.8375).abs() < 1e-6);
        assert_eq!(roi.annual_offset, roi.annual_consumption);
        assert!((roi.grid_cost - 64.24).abs() < 1e-9);
        assert!((roi.solar_savings - 64.24).abs() < 1e-9);

        let years = roi.roi_years.expect("roi should be defined");
        assert!((years - 200.0 / 64.24).abs() < 1e-9);
        assert!((years - 3.11).abs() < 0.01);
    }

    #[test]
    fn offset_is_capped_by_generation() {
        let snapshot = SelectionSnapshot {
            appliances: vec![ApplianceSelection { wattage: 2000, count: 1 }],
            products: vec![panel(250.0, 400, 1)],
            future_points: 0,
        };

        let roi = compute_roi(&snapshot, &EstimatorConstants::default());
        assert!(roi.annual_solar < roi.annual_consumption);
        assert_eq!(roi.annual_offset, roi.annual_solar);
    }

    #[test]
    fn roi_is_absent_without_savings() {
        let snapshot = SelectionSnapshot {
            appliances: vec![ApplianceSelection { wattage: 500, count: 1 }],
            products: vec![ProductSelection {
                category: ProductCategory::Battery,
                unit_price: 6000.0,
                count: 1,
                wattage_each: 0,
                kwh_each: 10.0,
            }],
            future_points: 0,
        };

        let roi = compute_roi(&snapshot, &EstimatorConstants::default());
        assert_eq!(roi.solar_savings, 0.0);
        assert_eq!(roi.roi_years, None);
        assert!(roi.grid_cost > 0.0);
    }

    #[test]
    fn panels_without_load_have_no_payback() {
        let snapshot = SelectionSnapshot {
            appliances: vec![],
            products: vec![panel(200.0, 300, 10)],
            future_points: 0,
        };

        let roi = compute_roi(&snapshot, &EstimatorConstants::default());
        assert_eq!(roi.annual_offset, 0.0);
        assert_eq!(roi.roi_years, None);
    }
}
