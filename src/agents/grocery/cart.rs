//! Shopping cart and placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// Most units of one item a single add may request
pub const MAX_ADD_QUANTITY: u32 = 999;

/// Round a money amount to 2 decimal places
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// What happened when removing from the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Line dropped entirely
    Removed,
    /// Quantity reduced, line still present
    Reduced(u32),
    /// No such line in the cart
    NotInCart,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
}

impl Cart {
    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.items.iter().position(|l| l.name.to_lowercase() == wanted)
    }

    /// Add a catalog item, merging with an existing line. Returns the new line quantity.
    pub fn add(&mut self, item: &CatalogItem, quantity: u32) -> u32 {
        match self.position(&item.name) {
            Some(idx) => {
                let line = &mut self.items[idx];
                line.quantity = line.quantity.saturating_add(quantity);
                line.quantity
            }
            None => {
                self.items.push(CartLine {
                    name: item.name.clone(),
                    quantity,
                    price: item.price,
                });
                quantity
            }
        }
    }

    /// Remove `quantity` units of a line, or the whole line when `None`.
    pub fn remove(&mut self, name: &str, quantity: Option<u32>) -> Removal {
        let Some(idx) = self.position(name) else {
            return Removal::NotInCart;
        };

        match quantity {
            Some(q) if q < self.items[idx].quantity => {
                self.items[idx].quantity -= q;
                Removal::Reduced(self.items[idx].quantity)
            }
            _ => {
                self.items.remove(idx);
                Removal::Removed
            }
        }
    }

    pub fn total(&self) -> f64 {
        round_money(self.items.iter().map(CartLine::line_total).sum())
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Cart view returned to the LLM
    pub fn view(&self) -> serde_json::Value {
        serde_json::json!({
            "items": self.items,
            "total": self.total(),
            "item_count": self.item_count(),
        })
    }
}

/// A placed order as written to the orders directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub placed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<CartLine>,
    pub total: f64,
    pub status: String,
}
