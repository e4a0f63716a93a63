use crate::{
    config::Control,
    hardware::HardwareInterface,
    sensors::{bank::SensorReading, RAW_READ_SENTINEL},
};
use std::{fmt::Display, sync::Arc};
use tracing::{error, info, trace};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActuatorState {
    On,
    Off,
}

impl Display for ActuatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActuatorState::On => "on",
            ActuatorState::Off => "off",
        })
    }
}

/// Threshold policy over one watched soil-fork channel, driving the water
/// valve output. Pure function of the latest reading; no hysteresis.
pub struct ActuatorGuard {
    hw: Arc<dyn HardwareInterface>,
    cfg: Control,
}

impl ActuatorGuard {
    pub fn new(hw: Arc<dyn HardwareInterface>, cfg: Control) -> Self {
        Self { hw, cfg }
    }

    /// The watched fork reads low when the substrate is dry: below threshold
    /// opens the valve. Sentinel readings never water.
    pub async fn evaluate(&self, reading: &SensorReading) -> ActuatorState {
        let Some(&value) = reading.soil_fork.get(self.cfg.fork_channel) else {
            error!(channel = self.cfg.fork_channel, "Watched fork channel missing; keeping water off.");
            return self.apply(ActuatorState::Off).await;
        };
        let state = if value != RAW_READ_SENTINEL && value < self.cfg.threshold {
            ActuatorState::On
        } else {
            ActuatorState::Off
        };
        trace!(value, threshold = self.cfg.threshold, %state, "Water control evaluated.");
        self.apply(state).await
    }

    /// Unconditional deassert, used at station shutdown.
    pub async fn shut_off(&self) {
        info!("Water control shut off.");
        _ = self.apply(ActuatorState::Off).await;
    }

    async fn apply(&self, state: ActuatorState) -> ActuatorState {
        if let Err(e) = self.hw.set_digital(self.cfg.valve_pin, state == ActuatorState::On).await {
            error!(valve_pin = self.cfg.valve_pin, error = %e, "Failed to drive water control output.");
        }
        state
    }
}
