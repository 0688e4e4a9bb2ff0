//! Order totals shown on the checkout page: cart subtotal, coupon discount,
//! shipping cost and the grand total.

mod currency;

pub use currency::format_naira;

use crate::fees::ShippingFeeCalculator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub price: f64,
    /// Missing or zero quantities count as a single unit.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl CartLine {
    pub fn new(price: f64, quantity: u32) -> Self {
        Self {
            price,
            quantity: Some(quantity),
        }
    }

    pub fn effective_quantity(&self) -> u32 {
        self.quantity.filter(|&quantity| quantity > 0).unwrap_or(1)
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.effective_quantity())
    }
}

/// Coupon discount as returned by the coupon service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percent of the subtotal, e.g. `10.0` for 10%.
    Percentage(f64),
    Fixed(f64),
}

impl Discount {
    pub fn amount(&self, subtotal: f64) -> f64 {
        match *self {
            Discount::Percentage(percent) => subtotal * (percent / 100.0),
            Discount::Fixed(amount) => amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub shipping_cost: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub discount_amount: String,
    pub shipping_cost: String,
    pub total: String,
}

impl OrderTotals {
    pub fn formatted(&self) -> FormattedTotals {
        FormattedTotals {
            subtotal: format_naira(self.subtotal),
            discount_amount: format_naira(self.discount_amount),
            shipping_cost: format_naira(self.shipping_cost),
            total: format_naira(self.total),
        }
    }
}

/// Shipping is charged on the pre-discount subtotal; an unselected or
/// unknown state ships for free.
pub fn calculate_totals(
    lines: &[CartLine],
    discount: Option<Discount>,
    destination: &str,
    calculator: &ShippingFeeCalculator,
) -> OrderTotals {
    let subtotal: f64 = lines.iter().map(CartLine::line_total).sum();
    let discount_amount = discount.map_or(0.0, |discount| discount.amount(subtotal));
    let shipping_cost = calculator
        .calculate_fee(subtotal, destination, None)
        .total_fee;

    OrderTotals {
        subtotal,
        discount_amount,
        shipping_cost,
        total: subtotal - discount_amount + shipping_cost,
    }
}
