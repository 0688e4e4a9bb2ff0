//! Distance-based shipping fees.
//!
//! A fee is a fixed share of the order subtotal plus a per-kilometre charge
//! for the road distance between the origin and the destination region.

mod calculator;
mod quote;
pub mod regions;
pub mod router;

pub use calculator::{ShippingFeeCalculator, UnknownDestinationPolicy};
pub use quote::{
    fee_breakdown, FeeError, ShippingFeeRequest, ShippingFeeResult, DEFAULT_RATE_PER_KM,
    FIXED_FEE_RATE,
};
pub use regions::{RegionDistance, RegionDistanceTable, RegionTableError};
pub use router::shipping_router;
