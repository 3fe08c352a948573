use crate::models::snapshot::ApplianceSelection;

/// Total selected load in watts: sum of wattage × count.
/// Counts are taken as-is; the snapshot boundary already floors them at zero.
pub fn compute_needs(appliances: &[ApplianceSelection]) -> u64 {
    appliances
        .iter()
        .map(|a| a.wattage as u64 * a.count as u64)
        .sum()
}
