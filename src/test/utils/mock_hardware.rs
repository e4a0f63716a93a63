use crate::error::AppError;
use crate::hardware::HardwareInterface;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinEvent {
    AnalogRead { pin: u8 },
    DigitalWrite { pin: u8, level: bool },
}

/// Scripted analog values, injectable failures, and a full pin-event log so
/// tests can replay sequencing (excitation mutual exclusion, settle order).
#[derive(Default)]
pub struct ScriptedHardware {
    analog: Mutex<HashMap<u8, i32>>,
    failing: Mutex<HashSet<u8>>,
    events: Mutex<Vec<PinEvent>>,
    levels: Mutex<HashMap<u8, bool>>,
}

impl ScriptedHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_analog(&self, pin: u8, value: i32) {
        self.analog.lock().unwrap().insert(pin, value);
    }

    pub fn fail_pin(&self, pin: u8) {
        self.failing.lock().unwrap().insert(pin);
    }

    pub fn events(&self) -> Vec<PinEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn digital_level(&self, pin: u8) -> Option<bool> {
        self.levels.lock().unwrap().get(&pin).copied()
    }
}

#[async_trait]
impl HardwareInterface for ScriptedHardware {
    async fn read_analog(&self, pin: u8) -> Result<i32, AppError> {
        self.events.lock().unwrap().push(PinEvent::AnalogRead { pin });
        if self.failing.lock().unwrap().contains(&pin) {
            return Err(AppError::SensorError(format!("Scripted failure on pin {}", pin)));
        }
        Ok(*self.analog.lock().unwrap().get(&pin).unwrap_or(&0))
    }

    async fn set_digital(&self, pin: u8, level: bool) -> Result<(), AppError> {
        self.events.lock().unwrap().push(PinEvent::DigitalWrite { pin, level });
        self.levels.lock().unwrap().insert(pin, level);
        Ok(())
    }
}
