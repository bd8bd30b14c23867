//! CayenneLPP type registry

use std::fmt;
use std::str::FromStr;

use super::{Error, Value};

/// CayenneLPP sensor/IO kinds
///
/// Discriminants are the wire type codes and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum SensorType {
    /// Digital input (1 byte, unsigned)
    DigitalInput = 0x00,
    /// Digital output (1 byte, unsigned)
    DigitalOutput = 0x01,
    /// Analog input (2 bytes, signed, 0.01)
    AnalogInput = 0x02,
    /// Analog output (2 bytes, signed, 0.01)
    AnalogOutput = 0x03,
    /// Illuminance sensor in lux (2 bytes, unsigned)
    Luminosity = 0x65,
    /// Presence sensor (1 byte, unsigned)
    Presence = 0x66,
    /// Temperature in °C (2 bytes, signed, 0.1)
    Temperature = 0x67,
    /// Relative humidity in % (1 byte, unsigned, 0.5)
    RelativeHumidity = 0x68,
    /// Accelerometer in G (3 × 2 bytes, signed, 0.001)
    Accelerometer = 0x71,
    /// Barometric pressure in hPa (2 bytes, signed, 0.1)
    BarometricPressure = 0x73,
    /// Gyrometer in °/s (3 × 2 bytes, signed, 0.01)
    Gyrometer = 0x86,
    /// GPS location (3 × 3 bytes, signed; lat/lon 0.0001°, alt 0.01 m)
    Gps = 0x88,
}

/// Static description of how one type is laid out on the wire
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Name used in uplink keys
    pub name: &'static str,
    /// Payload bytes following the header
    pub payload_len: usize,
    /// Fixed-point divisor applied on decode (multiplier on encode).
    /// For GPS this is the latitude/longitude scale; altitude uses [`GPS_ALTITUDE_SCALE`].
    pub scale: f32,
    /// Turns exactly `payload_len` bytes into a value
    pub decode: fn(&[u8]) -> Value,
}

/// Altitude scale of the GPS record
pub const GPS_ALTITUDE_SCALE: f32 = 100.0;

static DIGITAL_INPUT: TypeDescriptor = TypeDescriptor {
    name: "digital_input",
    payload_len: 1,
    scale: 1.0,
    decode: decode_u8,
};

static DIGITAL_OUTPUT: TypeDescriptor = TypeDescriptor {
    name: "digital_output",
    payload_len: 1,
    scale: 1.0,
    decode: decode_u8,
};

static ANALOG_INPUT: TypeDescriptor = TypeDescriptor {
    name: "analog_input",
    payload_len: 2,
    scale: 100.0,
    decode: |b| Value::Float(f32::from(read_i16(b)) / 100.0),
};

static ANALOG_OUTPUT: TypeDescriptor = TypeDescriptor {
    name: "analog_output",
    payload_len: 2,
    scale: 100.0,
    decode: |b| Value::Float(f32::from(read_i16(b)) / 100.0),
};

static LUMINOSITY: TypeDescriptor = TypeDescriptor {
    name: "luminosity",
    payload_len: 2,
    scale: 1.0,
    decode: |b| Value::Unsigned(u16::from_be_bytes([b[0], b[1]])),
};

static PRESENCE: TypeDescriptor = TypeDescriptor {
    name: "presence",
    payload_len: 1,
    scale: 1.0,
    decode: decode_u8,
};

static TEMPERATURE: TypeDescriptor = TypeDescriptor {
    name: "temperature",
    payload_len: 2,
    scale: 10.0,
    decode: |b| Value::Float(f32::from(read_i16(b)) / 10.0),
};

static RELATIVE_HUMIDITY: TypeDescriptor = TypeDescriptor {
    name: "relative_humidity",
    payload_len: 1,
    scale: 2.0,
    decode: |b| Value::Float(f32::from(b[0]) / 2.0),
};

static ACCELEROMETER: TypeDescriptor = TypeDescriptor {
    name: "accelerometer",
    payload_len: 6,
    scale: 1000.0,
    decode: |b| Value::Triple(read_axes(b, 1000.0)),
};

static BAROMETRIC_PRESSURE: TypeDescriptor = TypeDescriptor {
    name: "barometric_pressure",
    payload_len: 2,
    scale: 10.0,
    decode: |b| Value::Float(f32::from(read_i16(b)) / 10.0),
};

static GYROMETER: TypeDescriptor = TypeDescriptor {
    name: "gyrometer",
    payload_len: 6,
    scale: 100.0,
    decode: |b| Value::Triple(read_axes(b, 100.0)),
};

static GPS: TypeDescriptor = TypeDescriptor {
    name: "gps",
    payload_len: 9,
    scale: 10_000.0,
    decode: decode_gps,
};

fn decode_u8(bytes: &[u8]) -> Value {
    Value::from(bytes[0])
}

fn read_i16(bytes: &[u8]) -> i16 {
    i16::from_be_bytes([bytes[0], bytes[1]])
}

fn read_axes(bytes: &[u8], scale: f32) -> [f32; 3] {
    [
        f32::from(read_i16(&bytes[0..2])) / scale,
        f32::from(read_i16(&bytes[2..4])) / scale,
        f32::from(read_i16(&bytes[4..6])) / scale,
    ]
}

/// Sign-extend a 24-bit big-endian integer.
///
/// The three bytes go in the top of an `i32`; the arithmetic shift drags the sign bit down.
pub(crate) fn read_i24(bytes: &[u8]) -> i32 {
    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0]) >> 8
}

#[allow(clippy::cast_precision_loss)]
fn decode_gps(bytes: &[u8]) -> Value {
    Value::Triple([
        read_i24(&bytes[0..3]) as f32 / GPS.scale,
        read_i24(&bytes[3..6]) as f32 / GPS.scale,
        read_i24(&bytes[6..9]) as f32 / GPS_ALTITUDE_SCALE,
    ])
}

impl SensorType {
    /// Every registered kind, in type-code order
    pub const ALL: [Self; 12] = [
        Self::DigitalInput,
        Self::DigitalOutput,
        Self::AnalogInput,
        Self::AnalogOutput,
        Self::Luminosity,
        Self::Presence,
        Self::Temperature,
        Self::RelativeHumidity,
        Self::Accelerometer,
        Self::BarometricPressure,
        Self::Gyrometer,
        Self::Gps,
    ];

    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::DigitalInput),
            0x01 => Some(Self::DigitalOutput),
            0x02 => Some(Self::AnalogInput),
            0x03 => Some(Self::AnalogOutput),
            0x65 => Some(Self::Luminosity),
            0x66 => Some(Self::Presence),
            0x67 => Some(Self::Temperature),
            0x68 => Some(Self::RelativeHumidity),
            0x71 => Some(Self::Accelerometer),
            0x73 => Some(Self::BarometricPressure),
            0x86 => Some(Self::Gyrometer),
            0x88 => Some(Self::Gps),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Registry entry for this kind
    #[must_use]
    pub fn descriptor(self) -> &'static TypeDescriptor {
        match self {
            Self::DigitalInput => &DIGITAL_INPUT,
            Self::DigitalOutput => &DIGITAL_OUTPUT,
            Self::AnalogInput => &ANALOG_INPUT,
            Self::AnalogOutput => &ANALOG_OUTPUT,
            Self::Luminosity => &LUMINOSITY,
            Self::Presence => &PRESENCE,
            Self::Temperature => &TEMPERATURE,
            Self::RelativeHumidity => &RELATIVE_HUMIDITY,
            Self::Accelerometer => &ACCELEROMETER,
            Self::BarometricPressure => &BAROMETRIC_PRESSURE,
            Self::Gyrometer => &GYROMETER,
            Self::Gps => &GPS,
        }
    }

    /// Key prefix, e.g. `"relative_humidity"`
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up a kind by its key prefix
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Payload width in bytes
    #[must_use]
    pub fn payload_len(self) -> usize {
        self.descriptor().payload_len
    }

    /// Fixed-point scale factor
    #[must_use]
    pub fn scale(self) -> f32 {
        self.descriptor().scale
    }

    /// Decode a payload of exactly [`payload_len`](Self::payload_len) bytes
    ///
    /// # Panics
    ///
    /// Panics if `payload` is shorter than the type's width.
    #[must_use]
    pub fn decode_payload(self, payload: &[u8]) -> Value {
        (self.descriptor().decode)(payload)
    }

    /// Check if this kind carries a location
    #[must_use]
    pub const fn is_location(self) -> bool {
        matches!(self, Self::Gps)
    }
}

impl FromStr for SensorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::InvalidKey(s.to_owned()))
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_type_roundtrip() {
        for sensor_type in SensorType::ALL {
            let byte = sensor_type.as_u8();
            let decoded = SensorType::from_u8(byte).unwrap();
            assert_eq!(sensor_type, decoded);
            assert_eq!(SensorType::from_name(sensor_type.name()), Some(sensor_type));
        }
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(SensorType::DigitalInput.as_u8(), 0);
        assert_eq!(SensorType::DigitalOutput.as_u8(), 1);
        assert_eq!(SensorType::AnalogInput.as_u8(), 2);
        assert_eq!(SensorType::AnalogOutput.as_u8(), 3);
        assert_eq!(SensorType::Luminosity.as_u8(), 101);
        assert_eq!(SensorType::Presence.as_u8(), 102);
        assert_eq!(SensorType::Temperature.as_u8(), 103);
        assert_eq!(SensorType::RelativeHumidity.as_u8(), 104);
        assert_eq!(SensorType::Accelerometer.as_u8(), 113);
        assert_eq!(SensorType::BarometricPressure.as_u8(), 115);
        assert_eq!(SensorType::Gyrometer.as_u8(), 134);
        assert_eq!(SensorType::Gps.as_u8(), 136);
    }

    #[test]
    fn test_payload_widths() {
        let widths: Vec<usize> = SensorType::ALL.iter().map(|t| t.payload_len()).collect();
        assert_eq!(widths, [1, 1, 2, 2, 2, 1, 2, 1, 6, 2, 6, 9]);
        assert!(widths.iter().all(|w| *w <= crate::MAX_PAYLOAD_LEN));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(SensorType::from_u8(0xFF), None);
        assert_eq!(SensorType::from_u8(0x04), None);
        assert!("humidity".parse::<SensorType>().is_err());
    }

    #[test]
    fn test_sign_extension() {
        assert_eq!(read_i24(&[0x00, 0x00, 0x01]), 1);
        assert_eq!(read_i24(&[0xFF, 0xFF, 0xFF]), -1);
        assert_eq!(read_i24(&[0x80, 0x00, 0x00]), -8_388_608);
        assert_eq!(read_i24(&[0x7F, 0xFF, 0xFF]), 8_388_607);
        assert_eq!(read_i24(&[0xF2, 0x96, 0x0A]), -879_094);
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(
            SensorType::Temperature.decode_payload(&[0xFF, 0x64]),
            Value::Float(-15.6)
        );
        assert_eq!(
            SensorType::RelativeHumidity.decode_payload(&[160]),
            Value::Float(80.0)
        );
        assert_eq!(
            SensorType::Luminosity.decode_payload(&[0x01, 0xF4]),
            Value::Unsigned(500)
        );
    }
}
