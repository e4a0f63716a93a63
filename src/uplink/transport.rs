use crate::error::AppError;
use std::{
    io::{ErrorKind, Read, Write},
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};
use tracing::debug;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const RESPONSE_CHUNK: usize = 512;

/// Byte channel to the serial-attached WiFi modem. One bounded association
/// attempt per `associate` call; retry policy lives in the client.
pub trait ModemTransport: Send {
    fn associate(&mut self, ssid: &str, password: &str) -> Result<(), AppError>;
    fn send_bytes(&mut self, buf: &[u8]) -> Result<usize, AppError>;
    /// Wait up to `timeout_ms` for any response bytes.
    fn recv_response(&mut self, timeout_ms: u64) -> Result<Vec<u8>, AppError>;
}

/// Bench/deployment stand-in for the modem: a reachable server counts as a
/// joined network and the socket is the byte channel.
pub struct TcpModemTransport {
    server_address: String,
    server_port: u16,
    stream: Option<TcpStream>,
}

impl TcpModemTransport {
    pub fn new(server_address: &str, server_port: u16) -> Self {
        Self { server_address: server_address.to_owned(), server_port, stream: None }
    }
}

impl ModemTransport for TcpModemTransport {
    fn associate(&mut self, _ssid: &str, _password: &str) -> Result<(), AppError> {
        self.stream = None;
        let addr = format!("{}:{}", self.server_address, self.server_port);
        let mut resolved = addr
            .to_socket_addrs()
            .map_err(|e| AppError::TransportError(format!("Cannot resolve {}: {}", addr, e)))?;
        let Some(socket_addr) = resolved.next() else {
            return Err(AppError::TransportError(format!("No address for {}", addr)));
        };
        let stream = TcpStream::connect_timeout(&socket_addr, Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .map_err(|e| AppError::TransportError(format!("Connect to {} failed: {}", addr, e)))?;
        debug!(%addr, "Modem channel open.");
        self.stream = Some(stream);
        Ok(())
    }

    fn send_bytes(&mut self, buf: &[u8]) -> Result<usize, AppError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(AppError::TransportError("Channel not open".to_owned()));
        };
        stream.write_all(buf).map_err(|e| AppError::TransportError(format!("Write failed: {}", e)))?;
        Ok(buf.len())
    }

    fn recv_response(&mut self, timeout_ms: u64) -> Result<Vec<u8>, AppError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(AppError::TransportError("Channel not open".to_owned()));
        };
        stream
            .set_read_timeout(Some(Duration::from_millis(timeout_ms.max(1))))
            .map_err(|e| AppError::TransportError(format!("Cannot arm read timeout: {}", e)))?;
        let mut chunk = vec![0u8; RESPONSE_CHUNK];
        match stream.read(&mut chunk) {
            Ok(0) => Err(AppError::TransportError("Channel closed before response".to_owned())),
            Ok(n) => {
                chunk.truncate(n);
                Ok(chunk)
            }
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                Err(AppError::DeliveryTimeout(timeout_ms))
            }
            Err(e) => Err(AppError::TransportError(format!("Read failed: {}", e))),
        }
    }
}
