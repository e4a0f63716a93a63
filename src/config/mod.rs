pub mod run_options;

use crate::error::AppError;
use run_options::Args;
use serde::Deserialize;
use std::fs;

pub const CONFIG_FILE: &str = "./solog.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub name: String,
}

impl Default for Device {
    fn default() -> Self {
        Self { name: "soil_calibrator".to_owned() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub ssid: String,
    pub password: String,
    pub server_address: String,
    pub server_port: u16,
    pub request_prefix: String,
    pub request_footer: String,
    pub max_connect_attempts: u32,
    pub response_timeout_ms: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            ssid: "Handy".to_owned(),
            password: "things11".to_owned(),
            server_address: "www.dweet.io".to_owned(),
            server_port: 80,
            request_prefix: "/dweet/for/".to_owned(),
            request_footer: String::new(),
            max_connect_attempts: 3,
            response_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hardware {
    pub bridge_address: String,
}

impl Default for Hardware {
    fn default() -> Self {
        Self { bridge_address: "http://127.0.0.1:9090".to_owned() }
    }
}

/// Pin assignments. Gypsum arrays are indexed per sensor unit: entry `i` of
/// the left/right/control arrays belongs to gypsum sensor `i`.
#[derive(Debug, Clone, Deserialize)]
pub struct Sensors {
    pub soil_fork_pins: Vec<u8>,
    pub gypsum_left_pins: Vec<u8>,
    pub gypsum_right_pins: Vec<u8>,
    pub gypsum_control_pins: Vec<u8>,
    pub load_cell_pins: Vec<u8>,
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            soil_fork_pins: vec![14, 15],
            gypsum_left_pins: vec![16, 20],
            gypsum_right_pins: vec![17, 21],
            gypsum_control_pins: vec![6, 7],
            load_cell_pins: vec![2, 3],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Calibration {
    pub load_cell_factor: f32,
    pub load_cell_reads: u32,
    pub gypsum_settle_ms: u64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self { load_cell_factor: 1.0, load_cell_reads: 10, gypsum_settle_ms: 3000 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Control {
    /// Soil-fork channel index the water-control policy watches.
    pub fork_channel: usize,
    pub threshold: i32,
    pub valve_pin: u8,
}

impl Default for Control {
    fn default() -> Self {
        Self { fork_channel: 0, threshold: 400, valve_pin: 5 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Sampling {
    pub sample_interval_secs: i64,
    pub upload_interval_secs: i64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self { sample_interval_secs: 30, upload_interval_secs: 60 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: Device,
    pub network: Network,
    pub hardware: Hardware,
    pub sensors: Sensors,
    pub calibration: Calibration,
    pub control: Control,
    pub sampling: Sampling,
}

impl Config {
    pub fn load(args: Args) -> Self {
        let config_content = fs::read_to_string(args.cfg_file).expect("Unable to read config file");
        let config: Config = toml::from_str(&config_content).expect("Unable to parse config");
        config
    }

    // test helper
    pub fn load_from_str(config_str: &str) -> Self {
        let config: Config = toml::from_str(config_str).expect("Unable to parse config");
        config
    }

    /// Cross-field checks that cannot be expressed per section.
    pub fn validate(&self) -> Result<(), AppError> {
        let g = self.sensors.gypsum_control_pins.len();
        if self.sensors.gypsum_left_pins.len() != g || self.sensors.gypsum_right_pins.len() != g {
            return Err(AppError::ConfigError(
                "gypsum left/right/control pin arrays must have the same length".to_owned(),
            ));
        }
        if self.sampling.sample_interval_secs <= 0 {
            return Err(AppError::ConfigError("sample_interval_secs must be positive".to_owned()));
        }
        if self.sampling.upload_interval_secs < self.sampling.sample_interval_secs {
            return Err(AppError::ConfigError(
                "upload_interval_secs must not be shorter than sample_interval_secs".to_owned(),
            ));
        }
        if self.calibration.load_cell_reads == 0 {
            return Err(AppError::ConfigError("load_cell_reads must be at least 1".to_owned()));
        }
        Ok(())
    }
}
