use metrics_exporter_prometheus::PrometheusHandle;
use shipping_fee::config::AppConfig;
use shipping_fee::error::AppError;
use shipping_fee::fees::ShippingFeeCalculator;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_calculator(config: &AppConfig) -> Result<ShippingFeeCalculator, AppError> {
    let calculator = config.shipping.build_calculator()?;
    info!(
        regions = calculator.table().len(),
        default_rate_per_km = calculator.default_rate_per_km(),
        custom_table = config.shipping.regions_path.is_some(),
        "shipping fee calculator ready"
    );
    Ok(calculator)
}
