use crate::models::metrics::ProductTotals;
use crate::models::snapshot::{ProductCategory, ProductSelection};

/// Aggregate cost and equipment counts across the selected products.
///
/// Per-unit panel wattage and battery capacity are last-write-wins: the last
/// non-zero value seen in the list is kept, whatever that entry's count. Mixed
/// SKUs are therefore only approximated.
pub fn compute_product_totals(products: &[ProductSelection]) -> ProductTotals {
    let mut totals = ProductTotals::default();

    for product in products {
        totals.total_cost += product.unit_price * product.count as f64;

        match product.category {
            ProductCategory::Panel => {
                totals.panel_count += product.count as u64;
                if product.wattage_each > 0 {
                    totals.panel_watts_each = product.wattage_each;
                }
            }
            ProductCategory::Battery => {
                totals.battery_count += product.count as u64;
                if product.kwh_each > 0.0 {
                    totals.battery_kwh_each = product.kwh_each;
                }
            }
            // Counted for future sizing checks, not used by any metric yet.
            ProductCategory::Inverter => totals.inverter_count += product.count as u64,
            ProductCategory::Other => {}
        }
    }

    totals
}
