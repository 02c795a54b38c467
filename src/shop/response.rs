use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome marker shared by every shop operation
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductList {
    pub status: Status,
    pub shop_id: String,
    pub products: Vec<Value>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StockUpdate {
    pub status: Status,
    pub product_id: String,
    pub new_quantity: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrderProcessed {
    pub status: Status,
    pub order_id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub status: Status,
    pub period: String,
    /// Report body; always empty
    pub report: Map<String, Value>,
}
