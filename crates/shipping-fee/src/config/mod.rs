use crate::error::AppError;
use crate::fees::{RegionDistanceTable, ShippingFeeCalculator, UnknownDestinationPolicy};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub shipping: ShippingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            shipping: ShippingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Fee calculation settings.
#[derive(Debug, Clone)]
pub struct ShippingConfig {
    pub default_rate_per_km: f64,
    pub unknown_destination: UnknownDestinationPolicy,
    /// Replaces the bundled region table when set.
    pub regions_path: Option<PathBuf>,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            default_rate_per_km: crate::fees::DEFAULT_RATE_PER_KM,
            unknown_destination: UnknownDestinationPolicy::default(),
            regions_path: None,
        }
    }
}

impl ShippingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("SHIPPING_DEFAULT_RATE_PER_KM") {
            let rate = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidRate { value: raw.clone() })?;
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConfigError::InvalidRate { value: raw });
            }
            config.default_rate_per_km = rate;
        }

        if let Ok(raw) = env::var("SHIPPING_UNKNOWN_DESTINATION") {
            config.unknown_destination = UnknownDestinationPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidPolicy { value: raw })?;
        }

        config.regions_path = env::var_os("SHIPPING_REGIONS_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn build_calculator(&self) -> Result<ShippingFeeCalculator, AppError> {
        let table = match &self.regions_path {
            Some(path) => Arc::new(RegionDistanceTable::from_path(path)?),
            None => RegionDistanceTable::reference()?,
        };

        Ok(ShippingFeeCalculator::new(table).with_default_rate(self.default_rate_per_km)?)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRate { value: String },
    InvalidPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRate { value } => write!(
                f,
                "SHIPPING_DEFAULT_RATE_PER_KM must be a positive number (got '{}')",
                value
            ),
            ConfigError::InvalidPolicy { value } => write!(
                f,
                "SHIPPING_UNKNOWN_DESTINATION must be 'zero' or 'reject' (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRate { .. }
            | ConfigError::InvalidPolicy { .. } => None,
        }
    }
}
