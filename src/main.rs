use solog::config::{run_options::get_args, Config};
use solog::control::ActuatorGuard;
use solog::hardware::BridgeHardware;
use solog::packet::PacketAssembler;
use solog::sensors::bank::SensorBank;
use solog::station::{run_station, LoggerStation};
use solog::time::RealTimeProvider;
use solog::uplink::{client::UplinkClient, transport::TcpModemTransport};
use solog::utils::start_log;
use std::{error::Error, sync::Arc};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    start_log::<RealTimeProvider>(None);

    info!("Starting logger station...");

    let cfg = Config::load(get_args());
    cfg.validate()?;

    let time_provider = Arc::new(RealTimeProvider);
    let hw = Arc::new(BridgeHardware::new(&cfg.hardware.bridge_address));

    let bank = SensorBank::new(hw.clone(), time_provider.clone(), cfg.sensors.clone(), cfg.calibration);
    let assembler = PacketAssembler::new(&cfg.device.name, &cfg.network.request_footer);
    let transport = Box::new(TcpModemTransport::new(&cfg.network.server_address, cfg.network.server_port));
    let uplink = UplinkClient::new(transport, cfg.network.clone());
    let guard = ActuatorGuard::new(hw, cfg.control);

    let mut station = LoggerStation::new(bank, assembler, uplink, guard, time_provider, cfg.sampling);

    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        _ = tokio::signal::ctrl_c().await;
        info!("Shutdown requested.");
        _ = stop_tx.send(true);
    });

    info!(device = %cfg.device.name, server = %cfg.network.server_address, "Logger station running.");
    run_station(&mut station, stop_rx, None).await?;
    Ok(())
}
