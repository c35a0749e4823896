//! Grocery ordering agent
//!
//! Keeps an in-memory cart built from a catalog file. Placing an order writes
//! a timestamped JSON file into the orders directory and empties the cart.

mod cart;
mod catalog;
mod tools;

pub use cart::{Cart, CartLine, MAX_ADD_QUANTITY, Order, Removal, round_money};
pub use catalog::{Catalog, CatalogItem};
pub use tools::{
    AddRecipeTool, AddToCartTool, ListCatalogTool, OrderHistoryTool, PlaceOrderTool, RemoveFromCartTool, ViewCartTool,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::{Agent, AgentKind};
use crate::config::GlobalConfig;
use crate::error::{Result, VoiceDeskError};
use crate::id::{generate_order_id, order_file_name};
use crate::store;
use crate::tools::ToolExecutor;

pub const INSTRUCTIONS: &str = "You are a friendly grocery ordering assistant. \
Help the customer build a cart from the store catalog: use list_catalog to see what is available, \
add_to_cart and remove_from_cart for individual items, and add_recipe when they ask for \
'ingredients for' a dish. Confirm every change out loud with quantities. \
Use view_cart when they ask what is in the cart. When they are done, read back the cart and total, \
then call place_order. Use order_history if they ask about previous orders. \
Never invent items or prices that are not in the catalog.";

/// Session state shared by the grocery tools
pub struct GroceryDesk {
    catalog: Catalog,
    orders_dir: PathBuf,
    cart: Mutex<Cart>,
}

impl GroceryDesk {
    pub fn new(catalog: Catalog, orders_dir: impl AsRef<Path>) -> Self {
        Self {
            catalog,
            orders_dir: orders_dir.as_ref().to_path_buf(),
            cart: Mutex::new(Cart::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn orders_dir(&self) -> &Path {
        &self.orders_dir
    }

    pub async fn cart(&self) -> tokio::sync::MutexGuard<'_, Cart> {
        self.cart.lock().await
    }

    /// Write the cart out as an order and clear it.
    ///
    /// Returns `None` when the cart is empty.
    pub async fn place_order(&self, customer_name: Option<String>) -> Result<Option<(Order, PathBuf)>> {
        let mut cart = self.cart.lock().await;
        if cart.is_empty() {
            return Ok(None);
        }

        let placed_at = Utc::now();
        let body = serde_json::to_string(&cart.items)?;
        let order_id = generate_order_id(&placed_at, &body);
        let order = Order {
            order_id: order_id.clone(),
            placed_at,
            customer_name: customer_name.filter(|n| !n.trim().is_empty()),
            items: cart.items.clone(),
            total: cart.total(),
            status: "placed".to_string(),
        };

        let path = self.orders_dir.join(order_file_name(&placed_at, &order_id));
        store::save_json(&path, &order)?;
        cart.clear();
        Ok(Some((order, path)))
    }

    /// Every order on file, newest first. Unreadable files are skipped.
    pub fn order_history(&self) -> Result<Vec<Order>> {
        let pattern = self.orders_dir.join("order_*.json");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| VoiceDeskError::Storage(format!("Non UTF-8 orders dir: {}", self.orders_dir.display())))?;

        let paths = glob::glob(pattern).map_err(|e| VoiceDeskError::Storage(e.to_string()))?;
        let mut orders = Vec::new();
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Skipping unreadable order entry: {}", e);
                    continue;
                }
            };
            match store::read_json::<Order>(&path) {
                Ok(order) => orders.push(order),
                Err(e) => log::warn!("Skipping order file {}: {}", path.display(), e),
            }
        }

        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }
}

/// Build the grocery agent from config
pub fn agent(config: &GlobalConfig) -> Result<Agent> {
    let catalog = Catalog::load(&config.paths.catalog_file)?;
    log::info!(
        "Grocery agent loaded {} catalog items and {} recipes from {}",
        catalog.items.len(),
        catalog.recipes.len(),
        config.paths.catalog_file.display()
    );
    let desk = Arc::new(GroceryDesk::new(catalog, &config.paths.orders_dir));

    let executor = ToolExecutor::new()
        .with_tool(ListCatalogTool::new(desk.clone()))
        .with_tool(AddToCartTool::new(desk.clone()))
        .with_tool(AddRecipeTool::new(desk.clone()))
        .with_tool(RemoveFromCartTool::new(desk.clone()))
        .with_tool(ViewCartTool::new(desk.clone()))
        .with_tool(PlaceOrderTool::new(desk.clone()))
        .with_tool(OrderHistoryTool::new(desk));

    Ok(Agent::new(AgentKind::Grocery, INSTRUCTIONS, config.session.clone(), executor))
}
