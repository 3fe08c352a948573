use crate::models::metrics::Reliability;

/// Share of the selected load assumed to need backup during an outage.
const CRITICAL_LOAD_FRACTION: f64 = 0.4;
/// Baseline critical load; keeps backup hours finite with nothing selected.
pub const MIN_CRITICAL_WATTS: u64 = 150;

/// Battery backup duration for the critical share of the selected load.
pub fn compute_reliability(
    total_watts_selected: u64,
    battery_count: u64,
    battery_kwh_each: f64,
) -> Reliability {
    let total_battery_kwh = battery_count as f64 * battery_kwh_each;

    let critical_watts =
        ((total_watts_selected as f64 * CRITICAL_LOAD_FRACTION).round() as u64).max(MIN_CRITICAL_WATTS);
    let backup_hours = total_battery_kwh * 1000.0 / critical_watts as f64;

    Reliability {
        backup_hours,
        total_battery_kwh,
        critical_watts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_load_is_floored() {
        let rel = compute_reliability(0, 0, 0.0);
        assert_eq!(rel.critical_watts, 150);
        assert_eq!(rel.backup_hours, 0.0);

        assert_eq!(compute_reliability(374, 0, 0.0).critical_watts, 150);
    }

    #[test]
    fn critical_load_is_forty_percent_of_selection() {
        assert_eq!(compute_reliability(500, 0, 0.0).critical_watts, 200);
        // 0.4 × 1001 = 400.4
        assert_eq!(compute_reliability(1001, 0, 0.0).critical_watts, 400);
        // 0.4 × 1005 = 402
        assert_eq!(compute_reliability(1005, 0, 0.0).critical_watts, 402);
    }

    #[test]
    fn backup_hours_divide_stored_energy_by_critical_load() {
        let rel = compute_reliability(500, 2, 10.0);
        assert_eq!(rel.total_battery_kwh, 20.0);
        assert_eq!(rel.critical_watts, 200);
        assert!((rel.backup_hours - 100.0).abs() < 1e-9);
    }

    #[test]
    fn floor_applies_to_backup_with_no_appliances() {
        let rel = compute_reliability(0, 1, 3.0);
        assert!((rel.backup_hours - 20.0).abs() < 1e-9);
    }
}
