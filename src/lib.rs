//! CayenneLPP (Low Power Payload) - compact channel-tagged sensor telemetry
//!
//! This library encodes and decodes the CayenneLPP binary format used to pack
//! typed sensor readings into small payloads for constrained radio links.
//!
//! # Quick Start
//!
//! ```rust
//! use cayenne_lpp::{Encoder, SensorType, Value, decode_uplink};
//!
//! // Build an uplink payload
//! let mut encoder = Encoder::new();
//! encoder.add_temperature(7, -15.6).add_gps(1, 42.3519, -87.9094, 10.0);
//!
//! // Decode it back
//! let message = decode_uplink(encoder.bytes())?;
//! assert_eq!(message.get(SensorType::Temperature, 7), Some(&Value::Float(-15.6)));
//! assert_eq!(message.location().map(|key| key.to_string()).as_deref(), Some("gps_1"));
//! # Ok::<(), cayenne_lpp::Error>(())
//! ```
//!
//! # Wire Format
//!
//! - **Uplink** - repeated `[channel][type][payload]` records, payload width fixed per type
//! - **Downlink** - repeated `[channel][value: i16 / 100]` records, optionally
//!   terminated by a single `0xFF`
//!
//! All multi-byte integers are big-endian.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    DOWNLINK_TERMINATOR, Decoder, DownlinkMessage, Encoder, Error, GPS_ALTITUDE_SCALE, HEADER_SIZE,
    MAX_PAYLOAD_LEN, Result, SensorKey, SensorType, TypeDescriptor, UplinkMessage, Value,
    decode_downlink, decode_uplink,
};

/// CayenneLPP format revision implemented by this crate
pub const LPP_VERSION: &str = "1.0";
