use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceItem {
    pub id: String,
    pub name: String,
    pub watts: u32,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItem {
    pub id: String,
    pub name: String, // category is inferred from this
    pub price: f64,
    #[serde(default)]
    pub watts: u32,
    #[serde(default)]
    pub kwh: f64,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureOption {
    pub id: String,
    pub label: String,
    pub points: i64,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub appliances: Vec<ApplianceItem>,
    #[serde(default)]
    pub products: Vec<ProductItem>,
    #[serde(default)]
    pub future_options: Vec<FutureOption>,
    #[serde(default)]
    pub step_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Appliance,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub current_step: usize,
    pub step_count: usize,
}
