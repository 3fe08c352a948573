use crate::models::constants::ScoreWeights;

/// Payback period that scores zero; instant payback scores 100.
const ROI_HORIZON_YEARS: f64 = 15.0;
/// Backup duration that earns a full reliability score.
const RELIABILITY_TARGET_HOURS: f64 = 24.0;

const PENALTY_THRESHOLD_KWH: f64 = 4000.0;
const PENALTY_SPAN_KWH: f64 = 10000.0;
const MAX_PENALTY: f64 = 0.30;

/// Readiness score (0–100) with the default 45/30/25 weighting.
pub fn compute_score(
    roi_years: Option<f64>,
    backup_hours: f64,
    future_points: i64,
    annual_consumption: f64,
) -> u8 {
    compute_weighted_score(
        roi_years,
        backup_hours,
        future_points,
        annual_consumption,
        &ScoreWeights::default(),
    )
}

/// Readiness score (0–100)
/// - ROI: 0 yrs = 100, 15+ yrs or unknown = 0
/// - Reliability: 24h of backup = 100, capped
/// - Future: enabled option points, capped
/// The weighted blend is then scaled by the consumption penalty.
pub fn compute_weighted_score(
    roi_years: Option<f64>,
    backup_hours: f64,
    future_points: i64,
    annual_consumption: f64,
    weights: &ScoreWeights,
) -> u8 {
    let roi_score = match roi_years {
        Some(years) if years > 0.0 => clamp_score(100.0 * (1.0 - years / ROI_HORIZON_YEARS)),
        _ => 0.0,
    };
    let reliability_score = clamp_score(backup_hours / RELIABILITY_TARGET_HOURS * 100.0);
    let future_score = clamp_score(future_points as f64);

    let composite = roi_score * weights.roi
        + reliability_score * weights.reliability
        + future_score * weights.future;

    let final_score = (composite * compute_penalty_factor(annual_consumption)).round();
    clamp_score(final_score) as u8
}

/// Efficiency penalty: ≤ 4000 kWh/yr = 1.0, ramping linearly to 0.70 at 14000+.
pub fn compute_penalty_factor(annual_consumption: f64) -> f64 {
    if annual_consumption <= PENALTY_THRESHOLD_KWH {
        return 1.0;
    }
    let over = (annual_consumption - PENALTY_THRESHOLD_KWH).min(PENALTY_SPAN_KWH);
    1.0 - MAX_PENALTY * (over / PENALTY_SPAN_KWH)
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_selected_scores_zero() {
        assert_eq!(compute_score(None, 0.0, 0, 0.0), 0);
    }

    #[test]
    fn roi_maps_linearly_over_fifteen_years() {
        // 3 years → roi score 80 → 0.45 × 80
        assert_eq!(compute_score(Some(3.0), 0.0, 0, 0.0), 36);
        assert_eq!(compute_score(Some(15.0), 0.0, 0, 0.0), 0);
        assert_eq!(compute_score(Some(40.0), 0.0, 0, 0.0), 0);
        assert_eq!(compute_score(Some(0.0), 0.0, 0, 0.0), 0);
    }

    #[test]
    fn reliability_is_capped_at_a_full_day() {
        assert_eq!(compute_score(None, 24.0, 0, 0.0), 30);
        assert_eq!(compute_score(None, 100.0, 0, 0.0), 30);
        assert_eq!(compute_score(None, 12.0, 0, 0.0), 15);
    }

    #[test]
    fn future_points_are_clamped() {
        assert_eq!(compute_score(None, 0.0, 150, 0.0), 25);
        assert_eq!(compute_score(None, 0.0, -40, 0.0), 0);
        assert_eq!(compute_score(None, 0.0, 40, 0.0), 10);
    }

    #[test]
    fn penalty_ramps_between_thresholds() {
        assert_eq!(compute_penalty_factor(0.0), 1.0);
        assert_eq!(compute_penalty_factor(4000.0), 1.0);
        assert!((compute_penalty_factor(9000.0) - 0.85).abs() < 1e-9);
        assert!((compute_penalty_factor(14000.0) - 0.70).abs() < 1e-9);
        assert!((compute_penalty_factor(50000.0) - 0.70).abs() < 1e-9);
    }

    #[test]
    fn heavy_consumption_scales_the_composite() {
        // composite 0.25 × 80 = 20 → 20 × 0.70
        assert_eq!(compute_score(None, 0.0, 80, 14600.0), 14);
    }

    #[test]
    fn perfect_inputs_stay_within_bounds() {
        let score = compute_score(Some(0.01), 1000.0, 1000, 0.0);
        assert_eq!(score, 100);
    }

    #[test]
    fn custom_weights_shift_the_blend() {
        let weights = ScoreWeights {
            roi: 0.0,
            reliability: 0.0,
            future: 1.0,
        };
        assert_eq!(compute_weighted_score(None, 24.0, 60, 0.0, &weights), 60);
    }
}
