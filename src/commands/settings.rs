use crate::commands::estimator::{apply_constants_internal, SharedSession};
use crate::models::constants::{default_weights, EstimatorConstants, ScoreWeights};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const SETTINGS_SCHEMA_VERSION: i64 = 1;
const SETTINGS_FILE: &str = "settings.json";

/// Allowed range per modeling constant; out-of-range values are clamped.
const NUMERIC_BOUNDS: [(&str, f64, f64); 4] = [
    ("usageHoursPerDay", 0.0, 24.0),
    ("sunHoursPerDay", 0.0, 24.0),
    ("systemLossFactor", 0.0, 1.0),
    ("gridRate", 0.0, 5.0),
];

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn get_settings(config_dir: String) -> Result<Value, String> {
    load_settings_from_disk(&config_dir)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn save_settings(
    config_dir: String,
    settings: Value,
    session: tauri::State<'_, SharedSession>,
) -> Result<Value, String> {
    save_settings_internal(session.inner(), &config_dir, settings)
}

#[cfg(not(feature = "desktop"))]
pub async fn save_settings(config_dir: String, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(&config_dir, settings)
}

/// Persists a partial settings update, then recalculates the open session
/// with the constants it now implies.
pub fn save_settings_internal(
    session: &SharedSession,
    config_dir: &str,
    settings: Value,
) -> Result<Value, String> {
    let saved = save_settings_to_disk(config_dir, settings)?;
    apply_constants_internal(session, constants_from_settings(&saved))?;
    Ok(saved)
}

pub fn load_effective_constants(config_dir: &str) -> Result<EstimatorConstants, String> {
    load_settings_from_disk(config_dir).map(|settings| constants_from_settings(&settings))
}

/// Reads modeling constants out of an already upgraded settings document.
pub fn constants_from_settings(settings: &Value) -> EstimatorConstants {
    let defaults = EstimatorConstants::default();
    let number = |key: &str, default: f64| settings.get(key).and_then(Value::as_f64).unwrap_or(default);

    EstimatorConstants {
        usage_hours_per_day: number("usageHoursPerDay", defaults.usage_hours_per_day),
        sun_hours_per_day: number("sunHoursPerDay", defaults.sun_hours_per_day),
        system_loss_factor: number("systemLossFactor", defaults.system_loss_factor),
        grid_rate: number("gridRate", defaults.grid_rate),
        weights: document_weights(settings.get("weights")),
    }
}

pub fn load_settings_from_disk(config_dir: &str) -> Result<Value, String> {
    let file = SettingsFile::open(config_dir)?;
    let stored = file.read()?;

    let upgraded = upgrade_document(stored.clone().unwrap_or_else(|| json!({})));
    if stored.as_ref() != Some(&upgraded) {
        file.write(&upgraded)?;
    }
    Ok(upgraded)
}

pub fn save_settings_to_disk(config_dir: &str, settings: Value) -> Result<Value, String> {
    let file = SettingsFile::open(config_dir)?;

    let mut document = load_settings_from_disk(config_dir).unwrap_or_else(|_| default_settings());
    overlay(&mut document, &settings, Overlay::Replace);

    let upgraded = upgrade_document(document);
    file.write(&upgraded)?;
    log::info!("settings saved to {}", file.path.display());
    Ok(upgraded)
}

/// `settings.json` inside the app config directory, created on open.
struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    fn open(config_dir: &str) -> Result<Self, String> {
        fs::create_dir_all(config_dir)
            .map_err(|e| format!("Failed to create config directory {config_dir}: {e}"))?;
        Ok(Self {
            path: PathBuf::from(config_dir).join(SETTINGS_FILE),
        })
    }

    /// `None` when nothing has been saved yet. A malformed file reads as an empty document.
    fn read(&self) -> Result<Option<Value>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {SETTINGS_FILE}: {e}"))?;
        Ok(Some(serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed {}: {e}", self.path.display());
            json!({})
        })))
    }

    fn write(&self, settings: &Value) -> Result<(), String> {
        let raw = serde_json::to_string_pretty(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        fs::write(&self.path, raw).map_err(|e| format!("Failed to write {SETTINGS_FILE}: {e}"))
    }
}

/// Brings any stored document to the current schema: percentage-era fields
/// become fractions, missing keys take defaults, numbers are clamped and the
/// weights renormalized.
fn upgrade_document(input: Value) -> Value {
    let mut doc = match input {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let version = doc.get("schema_version").and_then(Value::as_i64).unwrap_or(0);
    if version < SETTINGS_SCHEMA_VERSION {
        upgrade_percentages(&mut doc);
    }

    let mut out = Value::Object(doc);
    let defaults = default_settings();
    overlay(&mut out, &defaults, Overlay::FillMissing);

    if let (Value::Object(doc), Value::Object(defaults)) = (&mut out, &defaults) {
        clamp_numbers(doc, defaults);
        let weights = document_weights(doc.get("weights"));
        doc.insert("weights".to_string(), json!(weights));
        doc.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }
    out
}

fn default_settings() -> Value {
    let constants = EstimatorConstants::default();
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "usageHoursPerDay": constants.usage_hours_per_day,
        "sunHoursPerDay": constants.sun_hours_per_day,
        "systemLossFactor": constants.system_loss_factor,
        "gridRate": constants.grid_rate,
        "weights": default_weights()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    /// Only add keys the target lacks (defaults under a stored document).
    FillMissing,
    /// Incoming leaves win (a partial save over the stored document).
    Replace,
}

/// Recursively lays `incoming` over `target`; nested objects merge key by key.
fn overlay(target: &mut Value, incoming: &Value, mode: Overlay) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                match target_obj.get_mut(key) {
                    Some(existing) => overlay(existing, value, mode),
                    None => {
                        target_obj.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => {
            if mode == Overlay::Replace {
                *slot = value.clone();
            }
        }
    }
}

/// Before schema 1 the loss factor (85) and the weights (45/30/25) were stored as percentages.
fn upgrade_percentages(doc: &mut Map<String, Value>) {
    if let Some(loss) = doc.get_mut("systemLossFactor") {
        if loss.as_f64().is_some_and(|v| v > 1.0) {
            percent_to_fraction(loss);
        }
    }
    if let Some(weights) = doc.get_mut("weights").and_then(Value::as_object_mut) {
        if weights.values().any(|v| v.as_f64().is_some_and(|w| w > 1.0)) {
            weights.values_mut().for_each(percent_to_fraction);
        }
    }
}

fn percent_to_fraction(value: &mut Value) {
    if let Some(v) = value.as_f64() {
        *value = json!(v / 100.0);
    }
}

fn clamp_numbers(doc: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, min, max) in NUMERIC_BOUNDS {
        let fallback = defaults.get(key).and_then(Value::as_f64).unwrap_or(min);
        let value = doc
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(fallback);
        doc.insert(key.to_string(), json!(value.clamp(min, max)));
    }
}

/// A stored `weights` object with missing keys defaulted, then normalized.
fn document_weights(weights: Option<&Value>) -> ScoreWeights {
    let stored: HashMap<String, f64> = weights
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(key, value)| value.as_f64().map(|v| (key.clone(), v)))
                .collect()
        })
        .unwrap_or_default();
    normalized_weights(ScoreWeights::from_map(&stored))
}

/// Weights rescaled to sum to 1; all-zero input falls back to the defaults.
fn normalized_weights(raw: ScoreWeights) -> ScoreWeights {
    let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    let (roi, reliability, future) = (clamp(raw.roi), clamp(raw.reliability), clamp(raw.future));

    let sum = roi + reliability + future;
    if sum <= f64::EPSILON {
        return ScoreWeights::default();
    }
    if (sum - 1.0).abs() < 1e-9 {
        return ScoreWeights { roi, reliability, future };
    }
    ScoreWeights {
        roi: roi / sum,
        reliability: reliability / sum,
        future: future / sum,
    }
}
