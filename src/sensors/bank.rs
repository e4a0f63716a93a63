use super::{MASS_READ_SENTINEL, RAW_READ_SENTINEL};
use crate::{
    config::{Calibration, Sensors},
    error::AppError,
    hardware::HardwareInterface,
    time::TimeProvider,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// One sample cycle's readings. Produced fresh per cycle; array lengths are
/// fixed by the pin configuration and every slot is always populated (failed
/// reads store sentinels, never leave holes).
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub mass: Vec<f32>,
    pub soil_fork: Vec<i32>,
    pub gypsum: Vec<i32>,
}

/// One of the two electrodes sharing a gypsum sensor's excitation line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HygrometerSide {
    Left,
    Right,
}

pub struct SensorBank {
    hw: Arc<dyn HardwareInterface>,
    time_provider: Arc<dyn TimeProvider>,
    pins: Sensors,
    calibration: Calibration,
}

impl SensorBank {
    pub fn new(
        hw: Arc<dyn HardwareInterface>, time_provider: Arc<dyn TimeProvider>, pins: Sensors, calibration: Calibration,
    ) -> Self {
        Self { hw, time_provider, pins, calibration }
    }

    /// The station's single entry point: forks, gypsum blocks, load cells,
    /// in that fixed order within one cycle.
    pub async fn sample(&self) -> SensorReading {
        let soil_fork = self.sample_soil_forks().await;
        let gypsum = self.sample_gypsum().await;
        let mass = self.sample_load_cells().await;
        debug!(?soil_fork, ?gypsum, ?mass, "Acquisition complete.");
        SensorReading { mass, soil_fork, gypsum }
    }

    /// Direct reads, no gating. Out-of-range raw values pass through unmodified.
    pub async fn sample_soil_forks(&self) -> Vec<i32> {
        let mut values = Vec::with_capacity(self.pins.soil_fork_pins.len());
        for (fork, &pin) in self.pins.soil_fork_pins.iter().enumerate() {
            let value = match self.hw.read_analog(pin).await {
                Ok(v) => v,
                Err(e) => {
                    warn!(fork, error = %e, "Soil fork read failed; recording sentinel.");
                    RAW_READ_SENTINEL
                }
            };
            values.push(value);
        }
        values
    }

    /// Excite, settle, read both sides, release. One sensor at a time, so at
    /// most a single excitation line is high and polarization drift stays
    /// within the calibrated bound.
    pub async fn sample_gypsum(&self) -> Vec<i32> {
        let mut values = Vec::with_capacity(self.pins.gypsum_control_pins.len());
        for sensor in 0..self.pins.gypsum_control_pins.len() {
            values.push(self.sample_gypsum_sensor(sensor).await);
        }
        values
    }

    async fn sample_gypsum_sensor(&self, sensor: usize) -> i32 {
        let control = self.pins.gypsum_control_pins[sensor];
        if let Err(e) = self.hw.set_digital(control, true).await {
            warn!(sensor, error = %e, "Gypsum excitation failed; recording sentinel.");
            return RAW_READ_SENTINEL;
        }
        self.time_provider.settle(self.calibration.gypsum_settle_ms).await;
        let left = self.read_side(sensor, HygrometerSide::Left).await;
        let right = self.read_side(sensor, HygrometerSide::Right).await;
        // Release before the next sensor is excited.
        if let Err(e) = self.hw.set_digital(control, false).await {
            warn!(sensor, error = %e, "Gypsum excitation release failed.");
        }
        match (left, right) {
            (Ok(l), Ok(r)) => (l + r) / 2,
            _ => {
                warn!(sensor, "Gypsum side read failed; recording sentinel.");
                RAW_READ_SENTINEL
            }
        }
    }

    async fn read_side(&self, sensor: usize, side: HygrometerSide) -> Result<i32, AppError> {
        let pin = match side {
            HygrometerSide::Left => self.pins.gypsum_left_pins[sensor],
            HygrometerSide::Right => self.pins.gypsum_right_pins[sensor],
        };
        self.hw.read_analog(pin).await
    }

    /// Averaged multi-read per cell, scaled by the calibration factor.
    pub async fn sample_load_cells(&self) -> Vec<f32> {
        let mut values = Vec::with_capacity(self.pins.load_cell_pins.len());
        for (cell, &pin) in self.pins.load_cell_pins.iter().enumerate() {
            values.push(self.sample_load_cell(cell, pin).await);
        }
        values
    }

    async fn sample_load_cell(&self, cell: usize, pin: u8) -> f32 {
        let mut sum = 0i64;
        for _ in 0..self.calibration.load_cell_reads {
            match self.hw.read_analog(pin).await {
                Ok(v) => sum += v as i64,
                Err(e) => {
                    warn!(cell, error = %e, "Load cell read failed; recording sentinel.");
                    return MASS_READ_SENTINEL;
                }
            }
        }
        let avg = sum as f32 / self.calibration.load_cell_reads as f32;
        avg * self.calibration.load_cell_factor
    }
}
