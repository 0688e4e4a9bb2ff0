use super::quote::{
    fee_breakdown, validate_rate, FeeError, ShippingFeeRequest, ShippingFeeResult,
    DEFAULT_RATE_PER_KM,
};
use super::regions::{RegionDistanceTable, RegionTableError};
use std::sync::Arc;
use tracing::{debug, warn};

/// What a quote does when the destination is missing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownDestinationPolicy {
    /// Charge nothing for shipping. Matches the storefront checkout.
    #[default]
    ZeroFee,
    Reject,
}

impl UnknownDestinationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zero" | "zero_fee" | "compat" => Some(Self::ZeroFee),
            "reject" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShippingFeeCalculator {
    table: Arc<RegionDistanceTable>,
    default_rate_per_km: f64,
}

impl ShippingFeeCalculator {
    pub fn new(table: Arc<RegionDistanceTable>) -> Self {
        Self {
            table,
            default_rate_per_km: DEFAULT_RATE_PER_KM,
        }
    }

    /// Calculator over the bundled region table with the default rate.
    pub fn reference() -> Result<Self, RegionTableError> {
        Ok(Self::new(RegionDistanceTable::reference()?))
    }

    pub fn with_default_rate(mut self, rate_per_km: f64) -> Result<Self, FeeError> {
        self.default_rate_per_km = validate_rate(rate_per_km)?;
        Ok(self)
    }

    pub fn default_rate_per_km(&self) -> f64 {
        self.default_rate_per_km
    }

    pub fn table(&self) -> &RegionDistanceTable {
        &self.table
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }

    /// Permissive fee calculation used by checkout.
    ///
    /// Inputs are not validated, and an unknown destination yields a result
    /// carrying only a zero `total_fee`.
    pub fn calculate_fee(
        &self,
        item_price: f64,
        destination: &str,
        rate_per_km: Option<f64>,
    ) -> ShippingFeeResult {
        let Some(distance_km) = self.table.distance(destination) else {
            warn!(destination, "unknown destination, shipping fee degraded to zero");
            return ShippingFeeResult::zero();
        };

        let rate_per_km = rate_per_km.unwrap_or(self.default_rate_per_km);
        let result = fee_breakdown(destination, distance_km, item_price, rate_per_km);
        debug!(
            destination,
            distance_km,
            rate_per_km,
            total_fee = result.total_fee,
            "calculated shipping fee"
        );
        result
    }

    pub fn quote(&self, request: &ShippingFeeRequest) -> Result<ShippingFeeResult, FeeError> {
        let destination = request.destination();
        let distance_km = self
            .table
            .distance(destination)
            .ok_or_else(|| FeeError::UnknownDestination(destination.to_string()))?;

        let rate_per_km = request.rate_per_km().unwrap_or(self.default_rate_per_km);
        let result = fee_breakdown(destination, distance_km, request.item_price(), rate_per_km);
        debug!(
            destination,
            distance_km,
            rate_per_km,
            total_fee = result.total_fee,
            "quoted shipping fee"
        );
        Ok(result)
    }

    pub fn quote_with_policy(
        &self,
        request: &ShippingFeeRequest,
        policy: UnknownDestinationPolicy,
    ) -> Result<ShippingFeeResult, FeeError> {
        match (self.quote(request), policy) {
            (Err(FeeError::UnknownDestination(destination)), UnknownDestinationPolicy::ZeroFee) => {
                warn!(%destination, "unknown destination, shipping fee degraded to zero");
                Ok(ShippingFeeResult::zero())
            }
            (outcome, _) => outcome,
        }
    }
}
