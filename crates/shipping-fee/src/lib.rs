//! Shipping fee calculation and checkout totals for the storefront.

pub mod checkout;
pub mod config;
pub mod error;
pub mod fees;
pub mod telemetry;
