use crate::commands::display::to_view;
use crate::engine::recalculate;
use crate::models::estimate::EstimateView;
use crate::models::snapshot::{ApplianceSelection, ProductCategory, ProductSelection, SelectionSnapshot};
use serde::{Deserialize, Serialize};

// Raw values as the page reads them from data attributes and counter text.
// Anything missing or unparseable counts as zero.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAppliance {
    pub watts: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    pub name: Option<String>,
    pub price: Option<String>,
    pub watts: Option<String>,
    pub kwh: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFutureToggle {
    pub points: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSelection {
    #[serde(default)]
    pub appliances: Vec<RawAppliance>,
    #[serde(default)]
    pub products: Vec<RawProduct>,
    #[serde(default)]
    pub future_toggles: Vec<RawFutureToggle>,
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn build_snapshot(raw: RawSelection) -> Result<SelectionSnapshot, String> {
    Ok(snapshot_from_raw(&raw))
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn estimate_from_raw(raw: RawSelection) -> Result<EstimateView, String> {
    Ok(to_view(recalculate(&snapshot_from_raw(&raw))))
}

pub fn snapshot_from_raw(raw: &RawSelection) -> SelectionSnapshot {
    let appliances = raw
        .appliances
        .iter()
        .map(|a| ApplianceSelection {
            wattage: to_u32(int_or_zero(a.watts.as_deref())),
            count: to_u32(int_or_zero(a.count.as_deref())),
        })
        .collect();

    let products = raw
        .products
        .iter()
        .map(|p| ProductSelection {
            category: ProductCategory::from_name(p.name.as_deref().unwrap_or("")),
            unit_price: num_or_zero(p.price.as_deref()).max(0.0),
            count: to_u32(int_or_zero(p.count.as_deref())),
            wattage_each: to_u32(int_or_zero(p.watts.as_deref())),
            kwh_each: num_or_zero(p.kwh.as_deref()).max(0.0),
        })
        .collect();

    let future_points = raw
        .future_toggles
        .iter()
        .filter(|t| t.checked)
        .map(|t| int_or_zero(t.points.as_deref()))
        .fold(0i64, i64::saturating_add);

    SelectionSnapshot {
        appliances,
        products,
        future_points,
    }
}

fn int_or_zero(raw: Option<&str>) -> i64 {
    raw.and_then(parse_leading_int).unwrap_or(0)
}

fn num_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(parse_leading_number)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn to_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Leading base-10 integer, ignoring trailing text ("12px" → 12).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = split_sign(s);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading decimal literal with optional fraction and exponent ("4.5kWh" → 4.5).
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits |= frac_end > frac_start;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}
