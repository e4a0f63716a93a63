use super::{transport::ModemTransport, Ack, ConnectionState};
use crate::{config::Network, error::AppError, packet::PacketBuffer};
use tracing::{debug, info, warn};

/// Drives `DISCONNECTED -> CONNECTING -> {ASSOCIATED | FAILED}` and delivers
/// one packet per upload cycle. No session survives between cycles: the
/// modem may drop association silently over long idle windows, so every
/// cycle re-associates from scratch.
pub struct UplinkClient {
    transport: Box<dyn ModemTransport>,
    cfg: Network,
    pub state: ConnectionState,
}

impl UplinkClient {
    pub fn new(transport: Box<dyn ModemTransport>, cfg: Network) -> Self {
        Self { transport, cfg, state: ConnectionState::Disconnected }
    }

    pub fn max_attempts(&self) -> u32 {
        self.cfg.max_connect_attempts
    }

    /// At most `max_connect_attempts` association attempts, retried
    /// immediately with no backoff; each attempt is bounded by the
    /// transport's own timeout.
    pub fn connect(&mut self) -> ConnectionState {
        self.state = ConnectionState::Disconnected;
        for attempt in 1..=self.cfg.max_connect_attempts {
            self.state = ConnectionState::Connecting;
            match self.transport.associate(&self.cfg.ssid, &self.cfg.password) {
                Ok(()) => {
                    info!(attempt, "Associated with network.");
                    self.state = ConnectionState::Associated;
                    return self.state;
                }
                Err(e) => warn!(attempt, error = %e, "Association attempt failed."),
            }
        }
        warn!(attempts = self.cfg.max_connect_attempts, "Association exhausted; skipping this upload cycle.");
        self.state = ConnectionState::Failed;
        self.state
    }

    /// Only valid from ASSOCIATED. Fire and observe: any response within the
    /// bound acknowledges delivery; content is not parsed.
    pub fn send(&mut self, packet: &PacketBuffer) -> Result<Ack, AppError> {
        if self.state != ConnectionState::Associated {
            return Err(AppError::NotAssociated);
        }
        let request = format!(
            "GET {}{} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            self.cfg.request_prefix,
            packet.as_text(),
            self.cfg.server_address
        );
        let sent = self.transport.send_bytes(request.as_bytes())?;
        debug!(sent, "Request line written.");
        let response = self.transport.recv_response(self.cfg.response_timeout_ms)?;
        if response.is_empty() {
            return Err(AppError::DeliveryTimeout(self.cfg.response_timeout_ms));
        }
        debug!(response_len = response.len(), "Server answered.");
        Ok(Ack { response_len: response.len() })
    }
}
