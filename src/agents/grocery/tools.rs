//! Grocery agent tools

use std::sync::Arc;

use async_trait::async_trait;
use eyre::eyre;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{GroceryDesk, MAX_ADD_QUANTITY, Removal};
use crate::tools::{Tool, ToolContext, ToolResult, parse_input};

fn error(message: &str) -> Value {
    json!({"status": "error", "message": message})
}

pub struct ListCatalogTool {
    desk: Arc<GroceryDesk>,
}

impl ListCatalogTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for ListCatalogTool {
    fn name(&self) -> &'static str {
        "list_catalog"
    }

    fn description(&self) -> &'static str {
        "List catalog items with prices, optionally only one category."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {"type": "string", "description": "Category name, e.g. Dairy"}
            }
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let category = input["category"].as_str().filter(|c| !c.trim().is_empty());
        let items = self.desk.catalog().in_category(category);
        let recipes: Vec<_> = self.desk.catalog().recipes.keys().collect();
        Ok(ToolResult::success(json!({"items": items, "recipes": recipes})))
    }
}

#[derive(Debug, Deserialize)]
struct AddToCartArgs {
    item: String,
    #[serde(default = "one")]
    quantity: i64,
}

fn one() -> i64 {
    1
}

pub struct AddToCartTool {
    desk: Arc<GroceryDesk>,
}

impl AddToCartTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for AddToCartTool {
    fn name(&self) -> &'static str {
        "add_to_cart"
    }

    fn description(&self) -> &'static str {
        "Add a catalog item to the cart."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item": {"type": "string", "description": "Catalog item name"},
                "quantity": {"type": "integer", "minimum": 1, "maximum": MAX_ADD_QUANTITY, "description": "Defaults to 1"}
            },
            "required": ["item"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let args: AddToCartArgs = parse_input(self.name(), input)?;

        let Ok(quantity) = u32::try_from(args.quantity) else {
            return Ok(ToolResult::success(error("invalid_quantity")));
        };
        if quantity == 0 || quantity > MAX_ADD_QUANTITY {
            return Ok(ToolResult::success(error("invalid_quantity")));
        }
        let Some(item) = self.desk.catalog().find(&args.item) else {
            return Ok(ToolResult::success(json!({
                "status": "error",
                "message": "item_not_found",
                "item": args.item,
            })));
        };

        let mut cart = self.desk.cart().await;
        let now = cart.add(item, quantity);
        log::info!("[{}] Cart: {} x{} (now {})", ctx.session_id, item.name, quantity, now);
        Ok(ToolResult::success(json!({"status": "ok", "added": item.name, "quantity": now, "cart": cart.view()})))
    }
}

pub struct AddRecipeTool {
    desk: Arc<GroceryDesk>,
}

impl AddRecipeTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for AddRecipeTool {
    fn name(&self) -> &'static str {
        "add_recipe"
    }

    fn description(&self) -> &'static str {
        "Add one of each ingredient for a known recipe to the cart."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "recipe": {"type": "string", "description": "Recipe or dish name"}
            },
            "required": ["recipe"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let recipe = input["recipe"].as_str().ok_or_else(|| eyre!("recipe is required"))?;
        let catalog = self.desk.catalog();

        let Some(ingredients) = catalog.recipe(recipe) else {
            return Ok(ToolResult::success(json!({
                "status": "error",
                "message": "recipe_not_found",
                "recipe": recipe,
            })));
        };

        let mut cart = self.desk.cart().await;
        let mut added = Vec::new();
        let mut skipped = Vec::new();
        for name in ingredients {
            match catalog.find(name) {
                Some(item) => {
                    cart.add(item, 1);
                    added.push(item.name.clone());
                }
                None => skipped.push(name.clone()),
            }
        }

        log::info!("[{}] Recipe {}: added {:?}, skipped {:?}", ctx.session_id, recipe, added, skipped);
        Ok(ToolResult::success(json!({
            "status": "ok",
            "added": added,
            "skipped": skipped,
            "cart": cart.view(),
        })))
    }
}

#[derive(Debug, Deserialize)]
struct RemoveArgs {
    item: String,
    #[serde(default)]
    quantity: Option<u32>,
}

pub struct RemoveFromCartTool {
    desk: Arc<GroceryDesk>,
}

impl RemoveFromCartTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for RemoveFromCartTool {
    fn name(&self) -> &'static str {
        "remove_from_cart"
    }

    fn description(&self) -> &'static str {
        "Remove an item from the cart, or reduce its quantity."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item": {"type": "string"},
                "quantity": {"type": "integer", "minimum": 1, "description": "Omit to remove the whole line"}
            },
            "required": ["item"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let args: RemoveArgs = parse_input(self.name(), input)?;

        let mut cart = self.desk.cart().await;
        let content = match cart.remove(&args.item, args.quantity) {
            Removal::NotInCart => json!({
                "status": "error",
                "message": "item_not_in_cart",
                "item": args.item,
            }),
            Removal::Removed => json!({"status": "ok", "removed": args.item, "cart": cart.view()}),
            Removal::Reduced(left) => {
                json!({"status": "ok", "reduced": args.item, "quantity": left, "cart": cart.view()})
            }
        };
        Ok(ToolResult::success(content))
    }
}

pub struct ViewCartTool {
    desk: Arc<GroceryDesk>,
}

impl ViewCartTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for ViewCartTool {
    fn name(&self) -> &'static str {
        "view_cart"
    }

    fn description(&self) -> &'static str {
        "Show the cart contents and total."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        Ok(ToolResult::success(self.desk.cart().await.view()))
    }
}

pub struct PlaceOrderTool {
    desk: Arc<GroceryDesk>,
}

impl PlaceOrderTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for PlaceOrderTool {
    fn name(&self) -> &'static str {
        "place_order"
    }

    fn description(&self) -> &'static str {
        "Place the order for everything in the cart. Empties the cart."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "customer_name": {"type": "string"}
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let customer_name = input["customer_name"].as_str().map(str::to_string);

        match self.desk.place_order(customer_name).await? {
            Some((order, path)) => {
                log::info!(
                    "[{}] Placed order {} ({} lines, total {}) -> {}",
                    ctx.session_id,
                    order.order_id,
                    order.items.len(),
                    order.total,
                    path.display()
                );
                Ok(ToolResult::success(json!({
                    "status": "ok",
                    "order_id": order.order_id,
                    "file": path.display().to_string(),
                    "total": order.total,
                })))
            }
            None => Ok(ToolResult::success(error("cart_empty"))),
        }
    }
}

pub struct OrderHistoryTool {
    desk: Arc<GroceryDesk>,
}

impl OrderHistoryTool {
    pub fn new(desk: Arc<GroceryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for OrderHistoryTool {
    fn name(&self) -> &'static str {
        "order_history"
    }

    fn description(&self) -> &'static str {
        "List previously placed orders, newest first."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let orders = self.desk.order_history()?;
        Ok(ToolResult::success(json!({"orders": orders, "count": orders.len()})))
    }
}
