use serde::{Deserialize, Serialize};

/// One inbound hub event, decoded from a single JSON text frame.
///
/// This is the canonical representation of a message throughout the
/// pipeline: created on receipt, consumed by the forwarder, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Source tag, e.g. "dev" for device-originated events.
    #[serde(rename = "type")]
    pub source_type: String,

    /// Numeric identifier of the originating device.
    #[serde(rename = "id")]
    pub device_id: u64,

    /// Severity name as reported by the hub (error/warn/info/debug/trace).
    pub level: String,

    /// Embedded timestamp, "yyyy-MM-dd HH:mm:ss.SSS" in hub-local time.
    pub time: String,

    /// Human-readable source label, e.g. a device name.
    pub name: String,

    /// Message payload.
    pub msg: String,
}
