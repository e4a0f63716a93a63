pub mod interface;

pub use interface::{BridgeHardware, HardwareInterface};
