use crate::tools::registry::{parse_args, whole_number, Tool};
use crate::types::{Result, ToolError, ToolOutcome};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

/// Validated shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub item: String,
    pub quantity: u32,
}

pub fn shopping_item(item: &str, quantity: i64) -> ToolOutcome<ShoppingItem> {
    let item = item.trim();
    if item.is_empty() {
        return Err(ToolError::EmptyItem);
    }
    let quantity = u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(ToolError::InvalidQuantity(quantity))?;

    Ok(ShoppingItem {
        item: item.to_string(),
        quantity,
    })
}

/// Confirms the addition. The list itself is not kept between calls.
pub fn add_to_shopping_list(item: &str, quantity: i64) -> String {
    shopping_item(item, quantity).map_or_else(
        |e| e.to_string(),
        |entry| {
            format!(
                "Added {}x {} to your shopping list.\n\
                 (Note: This is a demo. In a real agent, this would persist in session.state)",
                entry.quantity, entry.item
            )
        },
    )
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShoppingListArgs {
    /// The item to add to the shopping list
    pub item: String,
    /// How many to add
    #[serde(default = "default_quantity", deserialize_with = "whole_number")]
    #[schemars(with = "i64")]
    pub quantity: i64,
}

pub struct ShoppingListTool;

#[async_trait]
impl Tool for ShoppingListTool {
    fn name(&self) -> &str {
        "add_to_shopping_list"
    }

    fn description(&self) -> &str {
        "Add an item to the user's shopping list"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(ShoppingListArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: ShoppingListArgs = parse_args(self.name(), args)?;
        Ok(Value::String(add_to_shopping_list(&args.item, args.quantity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation() {
        assert_eq!(
            add_to_shopping_list("apples", 3),
            "Added 3x apples to your shopping list.\n\
             (Note: This is a demo. In a real agent, this would persist in session.state)"
        );
    }

    #[test]
    fn test_item_is_trimmed() {
        assert_eq!(shopping_item("  milk ", 1).unwrap().item, "milk");
    }

    #[test]
    fn test_invalid_quantity() {
        assert_eq!(shopping_item("eggs", 0), Err(ToolError::InvalidQuantity(0)));
        assert!(add_to_shopping_list("eggs", -4).starts_with("Error:"));
    }

    #[test]
    fn test_empty_item() {
        assert_eq!(add_to_shopping_list("   ", 2), "Error: Item name cannot be empty.");
    }

    #[tokio::test]
    async fn test_default_quantity() {
        let value = ShoppingListTool
            .execute(serde_json::json!({"item": "bread"}))
            .await
            .unwrap();
        assert!(value.as_str().unwrap().starts_with("Added 1x bread"));
    }
}
