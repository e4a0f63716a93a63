use async_trait::async_trait;
use tracing::debug;

use crate::error::AppError;

/// Capability boundary to the physical board: raw analog reads and digital
/// output control. The core depends only on this trait, never on a transport.
#[async_trait]
pub trait HardwareInterface: Send + Sync {
    async fn read_analog(&self, pin: u8) -> Result<i32, AppError>;
    async fn set_digital(&self, pin: u8, level: bool) -> Result<(), AppError>;
}

/// Talks to the sensor hardware through its local HTTP bridge service.
pub struct BridgeHardware {
    base_url: String,
    client: reqwest::Client,
}

impl BridgeHardware {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl HardwareInterface for BridgeHardware {
    async fn read_analog(&self, pin: u8) -> Result<i32, AppError> {
        let url = format!("{}/analog/{}", self.base_url, pin);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::SensorError(format!("Failed to read analog pin {}: {:?}", pin, response.status())));
        }
        let body = response.text().await?;
        let value = body
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::SensorError(format!("Non-numeric analog value for pin {}: {:?}", pin, body)))?;
        debug!(pin, value, "Analog read.");
        Ok(value)
    }

    async fn set_digital(&self, pin: u8, level: bool) -> Result<(), AppError> {
        let url = format!("{}/digital/{}/{}", self.base_url, pin, u8::from(level));
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::SensorError(format!("Failed to set digital pin {}: {:?}", pin, response.status())));
        }
        debug!(pin, level, "Digital write.");
        Ok(())
    }
}
