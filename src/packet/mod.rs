use crate::sensors::bank::SensorReading;
use std::fmt::Write as _;

/// Capacity of the serialized request line, matching the wire consumer's
/// expectations. Assembly never writes past it.
pub const PACKET_BUFFER_SIZE: usize = 400;

/// Fixed-capacity scratch buffer for one serialized packet. Appends beyond
/// capacity fill the remaining space and silently drop the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl PacketBuffer {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity), capacity }
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Append as much of `text` as fits; returns how many bytes landed.
    pub fn push_str(&mut self, text: &str) -> usize {
        let room = self.capacity - self.data.len();
        let n = room.min(text.len());
        self.data.extend_from_slice(&text.as_bytes()[..n]);
        n
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// Serializes a reading into the request-ready `name=value` line. Owns the
/// scratch buffer; only one assembly is ever in flight.
pub struct PacketAssembler {
    device_name: String,
    footer: String,
    buffer: PacketBuffer,
}

impl PacketAssembler {
    pub fn new(device_name: &str, footer: &str) -> Self {
        Self {
            device_name: device_name.to_owned(),
            footer: footer.to_owned(),
            buffer: PacketBuffer::new(PACKET_BUFFER_SIZE),
        }
    }

    // capacity override for variant deployments and truncation tests
    pub fn with_capacity(device_name: &str, footer: &str, capacity: usize) -> Self {
        Self { device_name: device_name.to_owned(), footer: footer.to_owned(), buffer: PacketBuffer::new(capacity) }
    }

    /// Fixed field order: device, time, masses, forks, gypsum, footer.
    /// Deterministic for identical inputs; truncates rather than overflowing.
    pub fn build(&mut self, reading: &SensorReading, timestamp: &str) -> &PacketBuffer {
        self.buffer.reset();
        self.buffer.push_str(&self.device_name);
        self.buffer.push_str("?time=");
        self.buffer.push_str(timestamp);

        let mut field = String::with_capacity(32);
        for (i, mass) in reading.mass.iter().enumerate() {
            field.clear();
            _ = write!(field, "&mass{}={:.2}", i, mass);
            self.buffer.push_str(&field);
        }
        for (i, fork) in reading.soil_fork.iter().enumerate() {
            field.clear();
            _ = write!(field, "&fork{}={}", i, fork);
            self.buffer.push_str(&field);
        }
        for (i, gypsum) in reading.gypsum.iter().enumerate() {
            field.clear();
            _ = write!(field, "&gypsum{}={}", i, gypsum);
            self.buffer.push_str(&field);
        }
        self.buffer.push_str(&self.footer);
        &self.buffer
    }
}
