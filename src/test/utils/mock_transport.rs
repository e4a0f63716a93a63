use crate::error::AppError;
use crate::uplink::transport::ModemTransport;
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    pub Modem {}

    impl ModemTransport for Modem {
        fn associate(&mut self, ssid: &str, password: &str) -> Result<(), AppError>;
        fn send_bytes(&mut self, buf: &[u8]) -> Result<usize, AppError>;
        fn recv_response(&mut self, timeout_ms: u64) -> Result<Vec<u8>, AppError>;
    }
}

/// Transport that always refuses association; payload methods must never run.
pub fn refusing_modem() -> MockModem {
    let mut modem = MockModem::new();
    modem
        .expect_associate()
        .times(0..)
        .returning(|_, _| Err(AppError::TransportError("Association refused".to_owned())));
    modem.expect_send_bytes().times(0);
    modem.expect_recv_response().times(0);
    modem
}

/// Transport that associates and answers every request, recording each
/// request line it was handed.
pub fn accepting_modem(sent: Arc<Mutex<Vec<String>>>) -> MockModem {
    let mut modem = MockModem::new();
    modem.expect_associate().times(0..).returning(|_, _| Ok(()));
    modem.expect_send_bytes().times(0..).returning(move |buf| {
        sent.lock().unwrap().push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    });
    modem.expect_recv_response().times(0..).returning(|_| Ok(b"HTTP/1.1 200 OK\r\n\r\n".to_vec()));
    modem
}
