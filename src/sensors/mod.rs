pub mod bank;
pub mod saturation;

/// Stored when a raw analog read fails; the record stays structurally
/// complete and downstream consumers can tell the slot carried no data.
pub const RAW_READ_SENTINEL: i32 = -1;
pub const MASS_READ_SENTINEL: f32 = -1.0;
