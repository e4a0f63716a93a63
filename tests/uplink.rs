use solog::{
    config::Config,
    error::AppError,
    packet::PacketAssembler,
    sensors::bank::SensorReading,
    test::utils::mock_transport::{accepting_modem, refusing_modem, MockModem},
    uplink::{client::UplinkClient, ConnectionState},
};
use std::sync::{Arc, Mutex};

fn reading() -> SensorReading {
    SensorReading { mass: vec![12.5], soil_fork: vec![300, 310], gypsum: vec![550, 560] }
}

#[test]
fn connect_exhausts_attempts_and_terminates_failed() {
    let attempts = Arc::new(Mutex::new(0u32));
    let counted = attempts.clone();
    let mut modem = MockModem::new();
    modem.expect_associate().times(3).returning(move |_, _| {
        *counted.lock().unwrap() += 1;
        Err(AppError::TransportError("Association refused".to_owned()))
    });
    modem.expect_send_bytes().times(0);
    modem.expect_recv_response().times(0);

    let cfg = Config::default();
    let mut client = UplinkClient::new(Box::new(modem), cfg.network.clone());

    assert_eq!(client.connect(), ConnectionState::Failed);
    assert_eq!(*attempts.lock().unwrap(), cfg.network.max_connect_attempts);
}

#[test]
fn send_is_rejected_when_not_associated() {
    let cfg = Config::default();
    let mut client = UplinkClient::new(Box::new(refusing_modem()), cfg.network.clone());
    let mut assembler = PacketAssembler::new(&cfg.device.name, "");

    assert_eq!(client.connect(), ConnectionState::Failed);
    let result = client.send(assembler.build(&reading(), "2024-01-01T00:00:00Z"));
    assert!(matches!(result, Err(AppError::NotAssociated)));
    // the refusing modem asserts on drop that no payload bytes ever moved
}

#[test]
fn connect_recovers_within_the_attempt_limit() {
    let mut modem = MockModem::new();
    modem
        .expect_associate()
        .times(2)
        .returning(|_, _| Err(AppError::TransportError("Association refused".to_owned())));
    modem.expect_associate().times(1).returning(|_, _| Ok(()));

    let cfg = Config::default();
    let mut client = UplinkClient::new(Box::new(modem), cfg.network.clone());
    assert_eq!(client.connect(), ConnectionState::Associated);
}

#[test]
fn send_writes_the_get_request_line_and_observes_any_response() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let cfg = Config::default();
    let mut client = UplinkClient::new(Box::new(accepting_modem(sent.clone())), cfg.network.clone());
    let mut assembler = PacketAssembler::new(&cfg.device.name, "");

    assert_eq!(client.connect(), ConnectionState::Associated);
    let ack = client.send(assembler.build(&reading(), "2024-01-01T00:00:00Z")).unwrap();
    assert!(ack.response_len > 0);

    let lines = sent.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("GET /dweet/for/soil_calibrator?time=2024-01-01T00:00:00Z&mass0=12.50"));
    assert!(lines[0].contains(" HTTP/1.1\r\nHost: www.dweet.io\r\n"));
    assert!(lines[0].ends_with("\r\n\r\n"));
}

#[test]
fn response_timeout_is_reported_and_cycle_skippable() {
    let mut modem = MockModem::new();
    modem.expect_associate().times(1).returning(|_, _| Ok(()));
    modem.expect_send_bytes().times(1).returning(|buf| Ok(buf.len()));
    modem.expect_recv_response().times(1).returning(|timeout_ms| Err(AppError::DeliveryTimeout(timeout_ms)));

    let cfg = Config::default();
    let mut client = UplinkClient::new(Box::new(modem), cfg.network.clone());
    let mut assembler = PacketAssembler::new(&cfg.device.name, "");

    assert_eq!(client.connect(), ConnectionState::Associated);
    let result = client.send(assembler.build(&reading(), "2024-01-01T00:00:00Z"));
    assert!(matches!(result, Err(AppError::DeliveryTimeout(_))));
}

#[test]
fn empty_response_counts_as_timeout() {
    let mut modem = MockModem::new();
    modem.expect_associate().times(1).returning(|_, _| Ok(()));
    modem.expect_send_bytes().times(1).returning(|buf| Ok(buf.len()));
    modem.expect_recv_response().times(1).returning(|_| Ok(Vec::new()));

    let cfg = Config::default();
    let mut client = UplinkClient::new(Box::new(modem), cfg.network.clone());
    let mut assembler = PacketAssembler::new(&cfg.device.name, "");

    assert_eq!(client.connect(), ConnectionState::Associated);
    let result = client.send(assembler.build(&reading(), "2024-01-01T00:00:00Z"));
    assert!(matches!(result, Err(AppError::DeliveryTimeout(_))));
}
