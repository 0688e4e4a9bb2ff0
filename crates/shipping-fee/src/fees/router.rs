use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::calculator::{ShippingFeeCalculator, UnknownDestinationPolicy};
use super::quote::{FeeError, ShippingFeeRequest};
use super::regions::RegionDistance;
use crate::checkout::{calculate_totals, CartLine, Discount, FormattedTotals, OrderTotals};

#[derive(Clone)]
pub(crate) struct FeeRouterState {
    calculator: Arc<ShippingFeeCalculator>,
    policy: UnknownDestinationPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuotePayload {
    pub item_price: f64,
    pub destination: String,
    #[serde(default)]
    pub rate_per_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotalsPayload {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotalsView {
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub formatted: FormattedTotals,
}

/// Router builder exposing fee quotes, the region listing and checkout totals.
pub fn shipping_router(
    calculator: Arc<ShippingFeeCalculator>,
    policy: UnknownDestinationPolicy,
) -> Router {
    Router::new()
        .route("/api/v1/shipping/fee", post(fee_handler))
        .route("/api/v1/shipping/regions", get(regions_handler))
        .route("/api/v1/checkout/totals", post(totals_handler))
        .with_state(FeeRouterState { calculator, policy })
}

pub(crate) async fn fee_handler(
    State(state): State<FeeRouterState>,
    payload: Result<Json<FeeQuotePayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };

    let outcome = ShippingFeeRequest::new(
        payload.item_price,
        payload.destination,
        payload.rate_per_km,
    )
    .and_then(|request| state.calculator.quote_with_policy(&request, state.policy));

    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(FeeError::UnknownDestination(destination)) => {
            let payload = json!({
                "error": "unknown destination",
                "destination": destination,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn regions_handler(
    State(state): State<FeeRouterState>,
) -> Json<Vec<RegionDistance>> {
    Json(state.calculator.table().iter().cloned().collect())
}

pub(crate) async fn totals_handler(
    State(state): State<FeeRouterState>,
    payload: Result<Json<CheckoutTotalsPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };

    let totals = calculate_totals(
        &payload.items,
        payload.discount,
        &payload.destination,
        &state.calculator,
    );

    let view = CheckoutTotalsView {
        formatted: totals.formatted(),
        totals,
    };
    (StatusCode::OK, Json(view)).into_response()
}

/// Malformed or mistyped bodies get the same JSON error shape as domain errors.
fn rejected_body(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn state(policy: UnknownDestinationPolicy) -> FeeRouterState {
        FeeRouterState {
            calculator: Arc::new(ShippingFeeCalculator::reference().expect("reference table")),
            policy,
        }
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body readable");
        serde_json::from_slice(&body).expect("json body")
    }

    fn payload(item_price: f64, destination: &str, rate_per_km: Option<f64>) -> FeeQuotePayload {
        FeeQuotePayload {
            item_price,
            destination: destination.to_string(),
            rate_per_km,
        }
    }

    #[tokio::test]
    async fn fee_handler_returns_breakdown() {
        let response = fee_handler(
            State(state(UnknownDestinationPolicy::ZeroFee)),
            Ok(Json(payload(100_000.0, "Lagos", Some(50.0)))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["distance"], 615);
        assert_eq!(body["totalFee"], 35_750.0);
    }

    #[tokio::test]
    async fn fee_handler_degrades_unknown_destination_in_zero_fee_mode() {
        let response = fee_handler(
            State(state(UnknownDestinationPolicy::ZeroFee)),
            Ok(Json(payload(50_000.0, "Unknown State", None))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body, json!({ "totalFee": 0.0 }));
    }

    #[tokio::test]
    async fn fee_handler_rejects_unknown_destination_in_reject_mode() {
        let response = fee_handler(
            State(state(UnknownDestinationPolicy::Reject)),
            Ok(Json(payload(50_000.0, "Unknown State", None))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert_eq!(body["destination"], "Unknown State");
    }

    #[tokio::test]
    async fn fee_handler_rejects_negative_price() {
        let response = fee_handler(
            State(state(UnknownDestinationPolicy::ZeroFee)),
            Ok(Json(payload(-1.0, "Lagos", None))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn regions_handler_lists_table_in_order() {
        let Json(regions) =
            regions_handler(State(state(UnknownDestinationPolicy::ZeroFee))).await;
        assert_eq!(regions.len(), 37);
        assert_eq!(regions[0].region, "Abia");
        assert_eq!(regions[36].region, "Zamfara");
    }
}
