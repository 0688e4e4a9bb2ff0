use serde::{Deserialize, Serialize};

/// Cost per kilometre applied when the caller does not supply one.
pub const DEFAULT_RATE_PER_KM: f64 = 20.0;

/// Share of the order subtotal charged regardless of distance.
pub const FIXED_FEE_RATE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeeError {
    #[error("unknown destination '{0}'")]
    UnknownDestination(String),
    #[error("item price must be a finite, non-negative amount (got {0})")]
    InvalidItemPrice(f64),
    #[error("rate per km must be a finite, positive amount (got {0})")]
    InvalidRate(f64),
}

/// Validated input for a strict fee quote.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingFeeRequest {
    item_price: f64,
    destination: String,
    rate_per_km: Option<f64>,
}

impl ShippingFeeRequest {
    pub fn new(
        item_price: f64,
        destination: impl Into<String>,
        rate_per_km: Option<f64>,
    ) -> Result<Self, FeeError> {
        if !item_price.is_finite() || item_price < 0.0 {
            return Err(FeeError::InvalidItemPrice(item_price));
        }
        if let Some(rate) = rate_per_km {
            validate_rate(rate)?;
        }

        Ok(Self {
            item_price,
            destination: destination.into(),
            rate_per_km,
        })
    }

    pub fn item_price(&self) -> f64 {
        self.item_price
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// `None` means the calculator's default rate applies.
    pub fn rate_per_km(&self) -> Option<f64> {
        self.rate_per_km
    }
}

pub(crate) fn validate_rate(rate: f64) -> Result<f64, FeeError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(FeeError::InvalidRate(rate))
    }
}

/// Fee breakdown for one destination.
///
/// Only `total_fee` is populated when an unknown destination was degraded to
/// a zero fee; the remaining fields are omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingFeeResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_fee: Option<f64>,
    pub total_fee: f64,
}

impl ShippingFeeResult {
    pub fn zero() -> Self {
        Self {
            destination: None,
            distance: None,
            fixed_fee: None,
            variable_fee: None,
            total_fee: 0.0,
        }
    }

    pub fn is_priced(&self) -> bool {
        self.destination.is_some()
    }
}

/// Fixed percentage plus distance charge. No rounding is applied.
pub fn fee_breakdown(
    destination: &str,
    distance_km: u32,
    item_price: f64,
    rate_per_km: f64,
) -> ShippingFeeResult {
    let fixed_fee = item_price * FIXED_FEE_RATE;
    let variable_fee = f64::from(distance_km) * rate_per_km;

    ShippingFeeResult {
        destination: Some(destination.to_string()),
        distance: Some(distance_km),
        fixed_fee: Some(fixed_fee),
        variable_fee: Some(variable_fee),
        total_fee: fixed_fee + variable_fee,
    }
}
