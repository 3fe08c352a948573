use crate::models::estimate::{EstimateView, MetricsDisplay};
use crate::models::metrics::MetricsRecord;

const MISSING_VALUE: &str = "--";

pub fn format_metrics(metrics: &MetricsRecord) -> MetricsDisplay {
    let percent = format!("{}%", metrics.final_score.min(100));

    MetricsDisplay {
        needs_watts: metrics.total_watts_selected.to_string(),
        total_cost: to_fixed(metrics.total_cost, 0),
        grid_cost: to_fixed(metrics.grid_cost_per_year, 0),
        solar_savings: to_fixed(metrics.solar_savings_per_year, 0),
        roi: match metrics.roi_years {
            Some(years) if years != 0.0 => to_fixed(years, 1),
            _ => MISSING_VALUE.to_string(),
        },
        backup_hours: to_fixed(metrics.backup_hours, 1),
        future_ready: metrics.future_points.to_string(),
        score: percent.clone(),
        liquid_height: percent,
    }
}

pub fn to_view(metrics: MetricsRecord) -> EstimateView {
    let display = format_metrics(&metrics);
    EstimateView { metrics, display }
}

/// Digits needed to write any finite `f64` out exactly (the smallest subnormal is 2^-1074).
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Fixed-decimal rendering of the exact binary value, matching JS `toFixed`:
/// 4.35 is stored as 4.3499… and renders "4.3"; exact halves round up (2.5 → "3").
pub fn to_fixed(value: f64, digits: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let digits = digits as usize;
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().take(digits))
        .collect();
    if fraction.as_bytes().get(digits).is_some_and(|next| *next >= b'5') {
        increment_decimal(&mut kept);
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(&kept[..split]));
    if digits > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(&kept[split..]));
    }
    out
}

/// Adds one unit in the last place of an ASCII digit string, carrying left.
fn increment_decimal(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
