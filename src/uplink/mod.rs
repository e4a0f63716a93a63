pub mod client;
pub mod transport;

use std::fmt::Display;

/// WiFi client lifecycle. Re-entered fresh each upload cycle; association is
/// never kept warm between cycles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Associated,
    Failed,
}

impl Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Associated => "associated",
            ConnectionState::Failed => "failed",
        };
        f.write_str(state)
    }
}

/// Evidence that the server answered. Content is not validated beyond
/// presence; delivery is fire-and-observe.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub response_len: usize,
}
