use crate::commands::display::to_view;
use crate::engine::Estimator;
use crate::models::catalog::{Catalog, ItemKind, StepDirection, StepState};
use crate::models::constants::EstimatorConstants;
use crate::models::estimate::{BatteryFocus, EstimateView};
use crate::models::metrics::MetricsRecord;
use crate::models::snapshot::{ApplianceSelection, ProductCategory, ProductSelection, SelectionSnapshot};
use std::sync::{Arc, Mutex};

/// Page-side selection state. The engine never sees this directly; every
/// change is turned into a fresh snapshot and recalculated in full.
#[derive(Debug, Default)]
pub struct EstimatorSession {
    pub estimator: Estimator,
    pub catalog: Catalog,
    pub current_step: usize,
}

impl EstimatorSession {
    pub fn new(constants: EstimatorConstants) -> Self {
        Self {
            estimator: Estimator::new(constants),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            appliances: self
                .catalog
                .appliances
                .iter()
                .map(|a| ApplianceSelection {
                    wattage: a.watts,
                    count: a.count,
                })
                .collect(),
            products: self
                .catalog
                .products
                .iter()
                .map(|p| ProductSelection {
                    category: ProductCategory::from_name(&p.name),
                    unit_price: p.price.max(0.0),
                    count: p.count,
                    wattage_each: p.watts,
                    kwh_each: p.kwh.max(0.0),
                })
                .collect(),
            future_points: self.future_points(),
        }
    }

    pub fn future_points(&self) -> i64 {
        self.catalog
            .future_options
            .iter()
            .filter(|o| o.enabled)
            .map(|o| o.points)
            .fold(0i64, i64::saturating_add)
    }

    pub fn recalculate(&self) -> MetricsRecord {
        self.estimator.recalculate(&self.snapshot())
    }

    /// Applies ±1 to a counter. Counters never drop below zero.
    pub fn adjust_count(&mut self, kind: ItemKind, id: &str, delta: i64) -> Result<u32, String> {
        let count = match kind {
            ItemKind::Appliance => self
                .catalog
                .appliances
                .iter_mut()
                .find(|a| a.id == id)
                .map(|a| &mut a.count),
            ItemKind::Product => self
                .catalog
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .map(|p| &mut p.count),
        }
        .ok_or(format!("Unknown {kind:?} id: {id}"))?;

        let next = (*count as i64 + delta).clamp(0, u32::MAX as i64) as u32;
        *count = next;
        Ok(next)
    }

    pub fn set_future_option(&mut self, id: &str, enabled: bool) -> Result<(), String> {
        let option = self
            .catalog
            .future_options
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(format!("Unknown future option: {id}"))?;
        option.enabled = enabled;
        Ok(())
    }

    pub fn navigate(&mut self, direction: StepDirection) -> StepState {
        let step_count = self.catalog.step_count;
        if step_count > 0 {
            match direction {
                StepDirection::Next if self.current_step < step_count - 1 => self.current_step += 1,
                StepDirection::Prev if self.current_step > 0 => self.current_step -= 1,
                _ => {}
            }
        }
        self.step_state()
    }

    pub fn step_state(&self) -> StepState {
        StepState {
            current_step: self.current_step,
            step_count: self.catalog.step_count,
        }
    }

    /// "Add a battery" call to action: go back a step and point at the first battery.
    pub fn focus_battery(&mut self) -> BatteryFocus {
        self.navigate(StepDirection::Prev);
        let product_id = self
            .catalog
            .products
            .iter()
            .find(|p| ProductCategory::from_name(&p.name) == ProductCategory::Battery)
            .map(|p| p.id.clone());
        BatteryFocus {
            current_step: self.current_step,
            product_id,
        }
    }
}

pub type SharedSession = Arc<Mutex<EstimatorSession>>;

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn load_catalog(
    catalog: Catalog,
    session: tauri::State<'_, SharedSession>,
) -> Result<EstimateView, String> {
    load_catalog_internal(session.inner(), catalog)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_estimate(session: tauri::State<'_, SharedSession>) -> Result<EstimateView, String> {
    get_estimate_internal(session.inner())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn increment_count(
    kind: ItemKind,
    id: String,
    session: tauri::State<'_, SharedSession>,
) -> Result<EstimateView, String> {
    adjust_count_internal(session.inner(), kind, &id, 1)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn decrement_count(
    kind: ItemKind,
    id: String,
    session: tauri::State<'_, SharedSession>,
) -> Result<EstimateView, String> {
    adjust_count_internal(session.inner(), kind, &id, -1)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_future_option(
    id: String,
    enabled: bool,
    session: tauri::State<'_, SharedSession>,
) -> Result<EstimateView, String> {
    set_future_option_internal(session.inner(), &id, enabled)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn navigate_step(
    direction: StepDirection,
    session: tauri::State<'_, SharedSession>,
) -> Result<StepState, String> {
    navigate_step_internal(session.inner(), direction)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn focus_battery(session: tauri::State<'_, SharedSession>) -> Result<BatteryFocus, String> {
    focus_battery_internal(session.inner())
}

/// Engine call for pages that keep their own state and send a ready snapshot.
#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn recalculate_snapshot(snapshot: SelectionSnapshot) -> Result<MetricsRecord, String> {
    Ok(crate::engine::recalculate(&snapshot))
}

pub fn load_catalog_internal(session: &SharedSession, catalog: Catalog) -> Result<EstimateView, String> {
    let mut lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    log::info!(
        "catalog loaded: {} appliances, {} products, {} future options, {} steps",
        catalog.appliances.len(),
        catalog.products.len(),
        catalog.future_options.len(),
        catalog.step_count
    );
    lock.catalog = catalog;
    lock.current_step = 0;
    Ok(to_view(lock.recalculate()))
}

pub fn get_estimate_internal(session: &SharedSession) -> Result<EstimateView, String> {
    let lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    Ok(to_view(lock.recalculate()))
}

pub fn adjust_count_internal(
    session: &SharedSession,
    kind: ItemKind,
    id: &str,
    delta: i64,
) -> Result<EstimateView, String> {
    let mut lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    let count = lock.adjust_count(kind, id, delta)?;
    log::debug!("{kind:?} {id} count -> {count}");
    Ok(to_view(lock.recalculate()))
}

pub fn set_future_option_internal(
    session: &SharedSession,
    id: &str,
    enabled: bool,
) -> Result<EstimateView, String> {
    let mut lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    lock.set_future_option(id, enabled)?;
    Ok(to_view(lock.recalculate()))
}

pub fn navigate_step_internal(session: &SharedSession, direction: StepDirection) -> Result<StepState, String> {
    let mut lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    Ok(lock.navigate(direction))
}

pub fn focus_battery_internal(session: &SharedSession) -> Result<BatteryFocus, String> {
    let mut lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    Ok(lock.focus_battery())
}

pub fn apply_constants_internal(session: &SharedSession, constants: EstimatorConstants) -> Result<EstimateView, String> {
    let mut lock = session.lock().map_err(|_| "Session lock error".to_string())?;
    lock.estimator = Estimator::new(constants);
    Ok(to_view(lock.recalculate()))
}
