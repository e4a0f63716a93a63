pub mod mock_hardware;
pub mod mock_time;
pub mod mock_transport;

use crate::{
    config::Config,
    control::ActuatorGuard,
    hardware::HardwareInterface,
    packet::PacketAssembler,
    sensors::bank::SensorBank,
    station::LoggerStation,
    uplink::{client::UplinkClient, transport::ModemTransport},
};
use mock_time::MockTimeProvider;
use std::sync::Arc;

pub fn set_bank(start_time: i64, hw: Arc<dyn HardwareInterface>, cfg: &Config) -> (SensorBank, Arc<MockTimeProvider>) {
    let time_provider = Arc::new(MockTimeProvider::new(start_time));
    let bank = SensorBank::new(hw, time_provider.clone(), cfg.sensors.clone(), cfg.calibration);
    (bank, time_provider)
}

pub fn set_station(
    start_time: i64, hw: Arc<dyn HardwareInterface>, transport: Box<dyn ModemTransport>, cfg: &Config,
) -> (LoggerStation, Arc<MockTimeProvider>) {
    let time_provider = Arc::new(MockTimeProvider::new(start_time));
    let bank = SensorBank::new(hw.clone(), time_provider.clone(), cfg.sensors.clone(), cfg.calibration);
    let assembler = PacketAssembler::new(&cfg.device.name, &cfg.network.request_footer);
    let uplink = UplinkClient::new(transport, cfg.network.clone());
    let guard = ActuatorGuard::new(hw, cfg.control);
    let station = LoggerStation::new(bank, assembler, uplink, guard, time_provider.clone(), cfg.sampling);
    (station, time_provider)
}
