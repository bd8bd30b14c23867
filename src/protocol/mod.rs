//! CayenneLPP protocol core implementation
//!
//! This module provides the type registry, value model, and the uplink/downlink codec.

mod decoder;
mod encoder;
mod error;
mod message;
mod types;
mod value;

pub use decoder::{Decoder, decode_downlink, decode_uplink};
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use message::{DownlinkMessage, SensorKey, UplinkMessage};
pub use types::{GPS_ALTITUDE_SCALE, SensorType, TypeDescriptor};
pub use value::Value;

/// Uplink record header size in bytes: `[channel][type]`
pub const HEADER_SIZE: usize = 2;

/// Largest payload of any registered type (GPS)
pub const MAX_PAYLOAD_LEN: usize = 9;

/// Channel byte that ends a downlink stream
pub const DOWNLINK_TERMINATOR: u8 = 0xFF;

/// Fixed-point scale of downlink port values
pub const DOWNLINK_VALUE_SCALE: f32 = 100.0;

/// Downlink value size in bytes (`i16`, big-endian)
pub const DOWNLINK_VALUE_SIZE: usize = 2;
