//! CayenneLPP payload encoder
//!
//! Every `add_*` call appends one record. Values are scaled to fixed point,
//! rounded to the nearest step and wrapped (two's complement) to the wire
//! width, so out-of-range inputs never fail but do not survive a round trip.

use std::io::{self, Write};

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use super::types::GPS_ALTITUDE_SCALE;
use super::{DOWNLINK_VALUE_SCALE, SensorType};

/// Append-only CayenneLPP payload builder
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: BytesMut,
}

/// Scale to the nearest fixed-point step. Non-finite input maps to 0 or saturates.
#[allow(clippy::cast_possible_truncation)]
fn to_fixed(value: f32, scale: f32) -> i64 {
    (f64::from(value) * f64::from(scale)).round() as i64
}

#[allow(clippy::cast_possible_truncation)]
fn fixed_i16(value: f32, scale: f32) -> i16 {
    to_fixed(value, scale) as i16
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fixed_u8(value: f32, scale: f32) -> u8 {
    to_fixed(value, scale) as u8
}

/// Low 24 bits of the scaled value, big-endian.
#[allow(clippy::cast_possible_truncation)]
fn fixed_i24(value: f32, scale: f32) -> [u8; 3] {
    let [_, high, mid, low] = (to_fixed(value, scale) as i32).to_be_bytes();
    [high, mid, low]
}

impl Encoder {
    /// Create an empty encoder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with room for `capacity` bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Reserve room for at least `additional` more bytes
    pub fn grow(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    /// Bytes written so far
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check whether nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard all written bytes, keeping the allocation
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Take the written bytes, leaving the encoder empty
    #[must_use]
    pub fn freeze(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    /// Write every buffered byte to `sink` and drain the buffer
    ///
    /// Returns the number of bytes written. On error the buffer is left intact.
    pub fn write_to<W: Write>(&mut self, sink: &mut W) -> io::Result<usize> {
        sink.write_all(&self.buf)?;
        let written = self.buf.len();
        self.buf.clear();
        trace!(bytes = written, "encoder drained to sink");
        Ok(written)
    }

    fn header(&mut self, channel: u8, sensor_type: SensorType) -> &mut Self {
        self.buf.reserve(super::HEADER_SIZE + sensor_type.payload_len());
        self.buf.put_u8(channel);
        self.buf.put_u8(sensor_type.as_u8());
        self
    }

    /// Append an untyped downlink slot: `[channel][value × 100 as i16]`
    pub fn add_port(&mut self, channel: u8, value: f32) -> &mut Self {
        self.buf.put_u8(channel);
        self.buf.put_i16(fixed_i16(value, DOWNLINK_VALUE_SCALE));
        self
    }

    /// Append a digital input reading
    pub fn add_digital_input(&mut self, channel: u8, value: u8) -> &mut Self {
        self.header(channel, SensorType::DigitalInput).buf.put_u8(value);
        self
    }

    /// Append a digital output reading
    pub fn add_digital_output(&mut self, channel: u8, value: u8) -> &mut Self {
        self.header(channel, SensorType::DigitalOutput).buf.put_u8(value);
        self
    }

    /// Append an analog input reading (0.01 steps)
    pub fn add_analog_input(&mut self, channel: u8, value: f32) -> &mut Self {
        let scale = SensorType::AnalogInput.scale();
        self.header(channel, SensorType::AnalogInput)
            .buf
            .put_i16(fixed_i16(value, scale));
        self
    }

    /// Append an analog output reading (0.01 steps)
    pub fn add_analog_output(&mut self, channel: u8, value: f32) -> &mut Self {
        let scale = SensorType::AnalogOutput.scale();
        self.header(channel, SensorType::AnalogOutput)
            .buf
            .put_i16(fixed_i16(value, scale));
        self
    }

    /// Append an illuminance reading in lux
    pub fn add_luminosity(&mut self, channel: u8, lux: u16) -> &mut Self {
        self.header(channel, SensorType::Luminosity).buf.put_u16(lux);
        self
    }

    /// Append a presence reading
    pub fn add_presence(&mut self, channel: u8, value: u8) -> &mut Self {
        self.header(channel, SensorType::Presence).buf.put_u8(value);
        self
    }

    /// Append a temperature in °C (0.1 steps)
    pub fn add_temperature(&mut self, channel: u8, celsius: f32) -> &mut Self {
        let scale = SensorType::Temperature.scale();
        self.header(channel, SensorType::Temperature)
            .buf
            .put_i16(fixed_i16(celsius, scale));
        self
    }

    /// Append a relative humidity in % (0.5 steps)
    pub fn add_relative_humidity(&mut self, channel: u8, percent: f32) -> &mut Self {
        let scale = SensorType::RelativeHumidity.scale();
        self.header(channel, SensorType::RelativeHumidity)
            .buf
            .put_u8(fixed_u8(percent, scale));
        self
    }

    /// Append an acceleration in G per axis (0.001 steps)
    pub fn add_accelerometer(&mut self, channel: u8, x: f32, y: f32, z: f32) -> &mut Self {
        self.axes(channel, SensorType::Accelerometer, [x, y, z])
    }

    /// Append a barometric pressure in hPa (0.1 steps)
    pub fn add_barometric_pressure(&mut self, channel: u8, hpa: f32) -> &mut Self {
        let scale = SensorType::BarometricPressure.scale();
        self.header(channel, SensorType::BarometricPressure)
            .buf
            .put_i16(fixed_i16(hpa, scale));
        self
    }

    /// Append an angular rate in °/s per axis (0.01 steps)
    pub fn add_gyrometer(&mut self, channel: u8, x: f32, y: f32, z: f32) -> &mut Self {
        self.axes(channel, SensorType::Gyrometer, [x, y, z])
    }

    /// Append a location: degrees latitude/longitude (0.0001 steps), altitude in meters (0.01 steps)
    ///
    /// Each coordinate is packed as a 24-bit two's-complement big-endian integer.
    pub fn add_gps(&mut self, channel: u8, latitude: f32, longitude: f32, meters: f32) -> &mut Self {
        let scale = SensorType::Gps.scale();
        self.header(channel, SensorType::Gps);
        self.buf.put_slice(&fixed_i24(latitude, scale));
        self.buf.put_slice(&fixed_i24(longitude, scale));
        self.buf.put_slice(&fixed_i24(meters, GPS_ALTITUDE_SCALE));
        self
    }

    fn axes(&mut self, channel: u8, sensor_type: SensorType, axes: [f32; 3]) -> &mut Self {
        let scale = sensor_type.scale();
        self.header(channel, sensor_type);
        for axis in axes {
            self.buf.put_i16(fixed_i16(axis, scale));
        }
        self
    }
}

impl AsRef<[u8]> for Encoder {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}
