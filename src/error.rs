use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Hardware bridge error: {0}")]
    BridgeError(#[from] reqwest::Error),
    #[error("Sensor error: {0}")]
    SensorError(String),
    #[error("Association failed after {0} attempts")]
    AssociationFailed(u32),
    #[error("No response within {0} ms")]
    DeliveryTimeout(u64),
    #[error("Uplink not associated")]
    NotAssociated,
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
}
