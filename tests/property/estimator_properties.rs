use proptest::prelude::*;
use solar_estimator_lib::engine::{compute_needs, compute_reliability, compute_score, recalculate};
use solar_estimator_lib::models::snapshot::{
    ApplianceSelection, ProductCategory, ProductSelection, SelectionSnapshot,
};

fn appliance() -> impl Strategy<Value = ApplianceSelection> {
    (0u32..5_000, 0u32..20).prop_map(|(wattage, count)| ApplianceSelection { wattage, count })
}

fn category() -> impl Strategy<Value = ProductCategory> {
    prop_oneof![
        Just(ProductCategory::Panel),
        Just(ProductCategory::Battery),
        Just(ProductCategory::Inverter),
        Just(ProductCategory::Other),
    ]
}

fn product() -> impl Strategy<Value = ProductSelection> {
    (category(), 0.0f64..20_000.0, 0u32..30, 0u32..800, 0.0f64..30.0).prop_map(
        |(category, unit_price, count, wattage_each, kwh_each)| ProductSelection {
            category,
            unit_price,
            count,
            wattage_each,
            kwh_each,
        },
    )
}

fn snapshot() -> impl Strategy<Value = SelectionSnapshot> {
    (
        prop::collection::vec(appliance(), 0..8),
        prop::collection::vec(product(), 0..8),
        -50i64..250,
    )
        .prop_map(|(appliances, products, future_points)| SelectionSnapshot {
            appliances,
            products,
            future_points,
        })
}

// ── Needs ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn needs_equal_sum_of_products(appliances in prop::collection::vec(appliance(), 0..16)) {
        let expected: u64 = appliances
            .iter()
            .map(|a| a.wattage as u64 * a.count as u64)
            .sum();
        prop_assert_eq!(compute_needs(&appliances), expected);
    }
}

// ── Metrics invariants ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn offset_never_exceeds_need_or_generation(snapshot in snapshot()) {
        let metrics = recalculate(&snapshot);
        prop_assert!(metrics.annual_offset_kwh <= metrics.annual_consumption_kwh);
        prop_assert!(metrics.annual_offset_kwh <= metrics.annual_solar_gen_kwh);
    }

    #[test]
    fn critical_load_never_drops_below_floor(total_watts in 0u64..1_000_000) {
        prop_assert!(compute_reliability(total_watts, 0, 0.0).critical_watts >= 150);
    }

    #[test]
    fn final_score_is_bounded(snapshot in snapshot()) {
        prop_assert!(recalculate(&snapshot).final_score <= 100);
    }

    #[test]
    fn score_is_bounded_for_any_sub_scores(
        roi in prop::option::of(-100.0f64..100.0),
        backup in 0.0f64..10_000.0,
        future in -1_000i64..1_000,
        consumption in 0.0f64..100_000.0,
    ) {
        prop_assert!(compute_score(roi, backup, future, consumption) <= 100);
    }

    #[test]
    fn roi_present_exactly_when_savings_are_positive(snapshot in snapshot()) {
        let metrics = recalculate(&snapshot);
        if metrics.solar_savings_per_year > 0.0 {
            let years = metrics.roi_years.expect("roi with savings");
            prop_assert!(years.is_finite());
            prop_assert!(years >= 0.0);
            if metrics.total_cost > 0.0 {
                prop_assert!(years > 0.0);
            }
        } else {
            prop_assert_eq!(metrics.roi_years, None);
        }
    }

    #[test]
    fn recalculation_is_idempotent(snapshot in snapshot()) {
        prop_assert_eq!(recalculate(&snapshot), recalculate(&snapshot));
    }
}
