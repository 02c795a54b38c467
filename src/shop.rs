//! Ecommerce operations exposed to the IT-office agent.
//!
//! None of these touch a real store: each call succeeds and echoes its input.

mod response;

pub use response::{OrderProcessed, ProductList, SalesReport, Status, StockUpdate};

use serde_json::Map;
use tracing::info;

/// Lists products for a given ecommerce shop.
pub fn list_products(shop_id: &str) -> ProductList {
    info!("Listing products for shop: {}", shop_id);
    ProductList {
        status: Status::Success,
        shop_id: shop_id.to_string(),
        products: Vec::new(),
    }
}

/// Updates the stock level for a product. The quantity is echoed unchecked.
pub fn update_stock(product_id: &str, quantity: i64) -> StockUpdate {
    info!("Updating stock for {} to {}", product_id, quantity);
    StockUpdate {
        status: Status::Success,
        product_id: product_id.to_string(),
        new_quantity: quantity,
    }
}

/// Processes an order by id.
pub fn process_order(order_id: &str) -> OrderProcessed {
    info!("Processing order: {}", order_id);
    OrderProcessed {
        status: Status::Success,
        order_id: order_id.to_string(),
    }
}

/// Generates a sales report for a period.
pub fn get_sales_report(period: &str) -> SalesReport {
    info!("Generating sales report for period: {}", period);
    SalesReport {
        status: Status::Success,
        period: period.to_string(),
        report: Map::new(),
    }
}
