//! Tool declarations offered to the model and dispatch of the calls it makes.

use genai::chat::{Tool, ToolCall, ToolResponse};
use serde_json::{Map, Value, json};
use tracing::{error, info};

use crate::{clock, error::AppError, shop};

/// A parsed tool call from the IT-office agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficeTool {
    ListProducts { shop_id: String },
    UpdateStock { product_id: String, quantity: i64 },
    ProcessOrder { order_id: String },
    GetSalesReport { period: String },
    GetCurrentTime { city: String },
}

impl OfficeTool {
    /// Parses a function name and its JSON arguments into a tool.
    pub fn parse(fn_name: &str, fn_arguments: &Value) -> Result<Self, AppError> {
        let args = fn_arguments
            .as_object()
            .ok_or_else(|| AppError::MissingParameter("arguments".to_string()))?;

        match fn_name {
            "list_products" => Ok(OfficeTool::ListProducts {
                shop_id: required_str(args, "shop_id")?,
            }),
            "update_stock" => Ok(OfficeTool::UpdateStock {
                product_id: required_str(args, "product_id")?,
                quantity: required_i64(args, "quantity")?,
            }),
            "process_order" => Ok(OfficeTool::ProcessOrder {
                order_id: required_str(args, "order_id")?,
            }),
            "get_sales_report" => Ok(OfficeTool::GetSalesReport {
                period: required_str(args, "period")?,
            }),
            "get_current_time" => Ok(OfficeTool::GetCurrentTime {
                city: required_str(args, "city")?,
            }),
            other => Err(AppError::UnsupportedToolCall(other.to_string())),
        }
    }

    /// Runs the tool and returns its JSON payload.
    pub fn execute(&self) -> Result<Value, AppError> {
        let value = match self {
            OfficeTool::ListProducts { shop_id } => {
                serde_json::to_value(shop::list_products(shop_id))?
            }
            OfficeTool::UpdateStock {
                product_id,
                quantity,
            } => serde_json::to_value(shop::update_stock(product_id, *quantity))?,
            OfficeTool::ProcessOrder { order_id } => {
                serde_json::to_value(shop::process_order(order_id))?
            }
            OfficeTool::GetSalesReport { period } => {
                serde_json::to_value(shop::get_sales_report(period))?
            }
            OfficeTool::GetCurrentTime { city } => {
                serde_json::to_value(clock::get_current_time(city))?
            }
        };
        Ok(value)
    }
}

fn required_str(args: &Map<String, Value>, name: &str) -> Result<String, AppError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| AppError::MissingParameter(name.to_string()))
}

fn required_i64(args: &Map<String, Value>, name: &str) -> Result<i64, AppError> {
    args.get(name)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::MissingParameter(name.to_string()))
}

/// Parses and runs a tool by name, turning any failure into an `{"error": ..}` payload.
pub fn dispatch(fn_name: &str, fn_arguments: &Value) -> Value {
    match OfficeTool::parse(fn_name, fn_arguments).and_then(|tool| tool.execute()) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to make tool call: {}", e);
            json!({ "error": e.to_string() })
        }
    }
}

/// Make a tool call requested by the model.
pub async fn make_tool_call(tool_call: ToolCall) -> ToolResponse {
    info!(
        "Tool call: \n\tFunction: {}\n\tArguments: {}",
        tool_call.fn_name, tool_call.fn_arguments
    );

    let payload = dispatch(&tool_call.fn_name, &tool_call.fn_arguments);
    ToolResponse::new(tool_call.call_id.clone(), payload.to_string())
}

/// Declarations of every IT-office tool, in the order they are offered to the model.
pub fn office_tools() -> Vec<Tool> {
    vec![
        Tool::new("list_products")
            .with_description("Lists products for a given ecommerce shop.")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "shop_id": {
                        "type": "string",
                        "description": "Identifier of the shop."
                    }
                },
                "required": ["shop_id"]
            })),
        Tool::new("update_stock")
            .with_description("Updates stock level for a product.")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "product_id": {
                        "type": "string",
                        "description": "Identifier of the product."
                    },
                    "quantity": {
                        "type": "integer",
                        "description": "New stock quantity."
                    }
                },
                "required": ["product_id", "quantity"]
            })),
        Tool::new("process_order")
            .with_description("Processes an order by ID.")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "order_id": {
                        "type": "string",
                        "description": "Identifier of the order."
                    }
                },
                "required": ["order_id"]
            })),
        Tool::new("get_sales_report")
            .with_description("Generates sales report for a period.")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "period": {
                        "type": "string",
                        "description": "Reporting period, e.g. \"2024-Q1\" or \"last week\"."
                    }
                },
                "required": ["period"]
            })),
        Tool::new("get_current_time")
            .with_description("Returns the current time in a specified city.")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City name in English, Latin script (e.g., \"New York\")."
                    }
                },
                "required": ["city"]
            })),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_stock() {
        let tool = OfficeTool::parse(
            "update_stock",
            &json!({"product_id": "p1", "quantity": 5}),
        )
        .unwrap();
        assert_eq!(
            tool,
            OfficeTool::UpdateStock {
                product_id: "p1".to_string(),
                quantity: 5
            }
        );
    }

    #[test]
    fn rejects_unknown_tool() {
        let err = OfficeTool::parse("get_weather", &json!({"city": "Paris"})).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedToolCall(name) if name == "get_weather"));
    }

    #[test]
    fn rejects_missing_or_mistyped_arguments() {
        let err = OfficeTool::parse("process_order", &json!({})).unwrap_err();
        assert!(matches!(err, AppError::MissingParameter(name) if name == "order_id"));

        let err = OfficeTool::parse(
            "update_stock",
            &json!({"product_id": "p1", "quantity": "five"}),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::MissingParameter(name) if name == "quantity"));

        let err = OfficeTool::parse("list_products", &json!("shop-1")).unwrap_err();
        assert!(matches!(err, AppError::MissingParameter(name) if name == "arguments"));
    }

    #[test]
    fn dispatch_returns_tool_payload() {
        assert_eq!(
            dispatch("update_stock", &json!({"product_id": "p1", "quantity": 5})),
            json!({"status": "success", "product_id": "p1", "new_quantity": 5})
        );
        assert_eq!(
            dispatch("get_sales_report", &json!({"period": "march"})),
            json!({"status": "success", "period": "march", "report": {}})
        );
    }

    #[test]
    fn dispatch_reports_unsupported_city_as_tool_error() {
        let payload = dispatch("get_current_time", &json!({"city": "Paris"}));
        assert_eq!(payload["status"], "error");
        assert!(payload["error_message"].as_str().unwrap().contains("Paris"));
    }

    #[test]
    fn dispatch_turns_failures_into_error_payload() {
        let payload = dispatch("delete_shop", &json!({}));
        assert_eq!(
            payload,
            json!({"error": "Tool call function not implemented: delete_shop"})
        );
    }

    #[tokio::test]
    async fn make_tool_call_keeps_call_id() {
        let response = make_tool_call(ToolCall {
            call_id: "call-7".to_string(),
            fn_name: "process_order".to_string(),
            fn_arguments: json!({"order_id": "o-1"}),
        })
        .await;

        assert_eq!(response.call_id, "call-7");
        let payload: Value = serde_json::from_str(&response.content).unwrap();
        assert_eq!(payload, json!({"status": "success", "order_id": "o-1"}));
    }

    #[tokio::test]
    async fn make_tool_call_answers_unknown_tools() {
        let response = make_tool_call(ToolCall {
            call_id: "call-8".to_string(),
            fn_name: "get_weather".to_string(),
            fn_arguments: json!({"city": "Paris"}),
        })
        .await;

        assert_eq!(response.call_id, "call-8");
        assert!(response.content.contains("not implemented: get_weather"));
    }

    #[test]
    fn declares_every_tool() {
        let names: Vec<String> = office_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "list_products",
                "update_stock",
                "process_order",
                "get_sales_report",
                "get_current_time"
            ]
        );
    }
}
