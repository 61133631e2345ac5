use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::domain::Offering;

/// One offering in the cart with its quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "offeringId")]
    pub offering_id: String,
    pub title: String,
    #[serde(rename = "unitPrice")]
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// An order-in-progress, owned by whichever flow is building it
///
/// Lines keep insertion order. Adding an offering that is already in the cart
/// accumulates its quantity rather than creating a second line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an offering to the cart
    pub fn add(&mut self, offering: &Offering, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.offering_id == offering.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            offering_id: offering.id.clone(),
            title: offering.title.clone(),
            unit_price: offering.price,
            quantity,
        });
    }

    /// Remove an offering's line entirely
    pub fn remove(&mut self, offering_id: &str) {
        self.lines.retain(|line| line.offering_id != offering_id);
    }

    /// Set an existing line's quantity; zero removes the line
    ///
    /// Unknown offering ids are ignored rather than creating a line.
    pub fn set_quantity(&mut self, offering_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(offering_id);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.offering_id == offering_id)
        {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Exact order total: sum of unit price times quantity per line
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
