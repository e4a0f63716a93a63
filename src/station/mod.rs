use crate::{
    config::Sampling,
    control::ActuatorGuard,
    error::AppError,
    packet::PacketAssembler,
    sensors::{
        bank::{SensorBank, SensorReading},
        saturation::to_saturation_percent,
        RAW_READ_SENTINEL,
    },
    time::TimeProvider,
    uplink::{client::UplinkClient, ConnectionState},
    utils::ux_ts_to_string,
};
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::{debug, info, warn};

/// The assembled logger: sensing, packet assembly, uplink and water control
/// behind one single-threaded loop. Sensing cadence is independent of upload
/// cadence so the record stays regular when the network is down.
pub struct LoggerStation {
    pub bank: SensorBank,
    pub assembler: PacketAssembler,
    pub uplink: UplinkClient,
    pub guard: ActuatorGuard,
    pub time_provider: Arc<dyn TimeProvider>,
    pub cfg: Sampling,

    pub last_reading: Option<SensorReading>,
    pub samples_taken: u64,
    pub uploads_delivered: u64,
    pub uploads_skipped: u64,
}

impl LoggerStation {
    pub fn new(
        bank: SensorBank, assembler: PacketAssembler, uplink: UplinkClient, guard: ActuatorGuard,
        time_provider: Arc<dyn TimeProvider>, cfg: Sampling,
    ) -> Self {
        Self {
            bank,
            assembler,
            uplink,
            guard,
            time_provider,
            cfg,
            last_reading: None,
            samples_taken: 0,
            uploads_delivered: 0,
            uploads_skipped: 0,
        }
    }

    async fn run_sample_cycle(&mut self) {
        let reading = self.bank.sample().await;
        let water = self.guard.evaluate(&reading).await;
        for (sensor, &raw) in reading.gypsum.iter().enumerate() {
            if raw != RAW_READ_SENTINEL {
                debug!(sensor, raw, saturation = to_saturation_percent(raw), "Gypsum saturation.");
            }
        }
        self.samples_taken += 1;
        self.last_reading = Some(reading);
        debug!(water = %water, samples = self.samples_taken, "Sample cycle complete.");
    }

    /// Association is re-run from scratch each cycle; a failed connect or a
    /// delivery timeout drops this cycle's data and the next tick starts clean.
    fn run_upload_cycle(&mut self) {
        let Some(reading) = self.last_reading.as_ref() else {
            debug!("No reading sampled yet; skipping upload.");
            return;
        };
        match self.uplink.connect() {
            ConnectionState::Associated => {
                let timestamp = ux_ts_to_string(self.time_provider.now());
                let packet = self.assembler.build(reading, &timestamp);
                match self.uplink.send(packet) {
                    Ok(ack) => {
                        self.uploads_delivered += 1;
                        info!(response_len = ack.response_len, "Packet delivered.");
                    }
                    Err(e) => {
                        self.uploads_skipped += 1;
                        warn!(error = %e, "Delivery failed; this cycle's data is dropped.");
                    }
                }
            }
            state => {
                self.uploads_skipped += 1;
                let error = AppError::AssociationFailed(self.uplink.max_attempts());
                warn!(%state, error = %error, "Skipping upload cycle.");
            }
        }
    }
}

pub async fn run_station(
    station: &mut LoggerStation,
    stop_signal: Receiver<bool>,
    end_time: Option<i64>, // Optional parameter for simulation
) -> Result<(), AppError> {
    let mut now = station.time_provider.now();
    let mut last_sample = now - station.cfg.sample_interval_secs; // sample on the first tick
    let mut last_upload = now;

    while end_time.map_or(true, |end| now < end) && !*stop_signal.borrow() {
        now = station.time_provider.now();

        if now - last_sample >= station.cfg.sample_interval_secs {
            last_sample = now;
            station.run_sample_cycle().await;
        }

        if now - last_upload >= station.cfg.upload_interval_secs {
            last_upload = now;
            station.run_upload_cycle();
        }

        station.time_provider.advance_time(1).await;
    }
    station.guard.shut_off().await;
    info!("Ending logger station.");
    Ok(())
}
