use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Panel,
    Battery,
    Inverter,
    Other,
}

impl ProductCategory {
    /// Category inferred from a product's display name ("Mono Panel 400W" is a panel).
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("panel") {
            Self::Panel
        } else if name.contains("battery") {
            Self::Battery
        } else if name.contains("inverter") {
            Self::Inverter
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplianceSelection {
    #[serde(default)]
    pub wattage: u32,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub category: ProductCategory,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub wattage_each: u32, // Panel only
    #[serde(default)]
    pub kwh_each: f64, // Battery only
}

/// Everything the engine needs to know about the user's current selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    #[serde(default)]
    pub appliances: Vec<ApplianceSelection>,
    #[serde(default)]
    pub products: Vec<ProductSelection>,
    #[serde(default)]
    pub future_points: i64,
}
