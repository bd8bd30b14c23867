//! CayenneLPP stream decoder
//!
//! Uplink and downlink payloads use different grammars over the same byte
//! stream, so one [`Decoder`] offers both entry points.

use std::io::{self, Read};

use tracing::{debug, trace};

use super::{
    DOWNLINK_TERMINATOR, DOWNLINK_VALUE_SCALE, DOWNLINK_VALUE_SIZE, DownlinkMessage, Error,
    HEADER_SIZE, MAX_PAYLOAD_LEN, Result, SensorKey, SensorType, UplinkMessage,
};

/// Decode an uplink payload held in memory
pub fn decode_uplink(bytes: &[u8]) -> Result<UplinkMessage> {
    Decoder::new(bytes).decode_uplink()
}

/// Decode a downlink payload held in memory
pub fn decode_downlink(bytes: &[u8]) -> Result<DownlinkMessage> {
    Decoder::new(bytes).decode_downlink()
}

/// Reads CayenneLPP records from a byte stream
///
/// Reads block whenever the underlying reader blocks. A decode call either
/// consumes the stream to a clean record boundary or fails as a whole; no
/// partial message is ever returned.
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder over `reader`
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Decode typed, channel-addressed records until the stream ends
    ///
    /// # Format
    ///
    /// ```text
    /// [CHANNEL (1)] [TYPE (1)] [PAYLOAD (width of TYPE)] ...
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A type byte has no registry entry ([`Error::UnknownType`])
    /// - The stream ends inside a header or payload ([`Error::UnexpectedEof`])
    /// - The reader fails ([`Error::Io`])
    pub fn decode_uplink(&mut self) -> Result<UplinkMessage> {
        self.uplink_records()
            .inspect(|message| debug!(records = message.len(), "decoded uplink message"))
            .inspect_err(|err| debug!(%err, "uplink decode failed"))
    }

    /// Decode untyped channel/value records until the stream ends or hits `0xFF`
    ///
    /// # Format
    ///
    /// ```text
    /// [CHANNEL (1)] [VALUE (2, i16 / 100)] ... [0xFF]?
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEof`] if a value is cut short, or
    /// [`Error::Io`] if the reader fails.
    pub fn decode_downlink(&mut self) -> Result<DownlinkMessage> {
        self.downlink_records()
            .inspect(|message| debug!(channels = message.len(), "decoded downlink message"))
            .inspect_err(|err| debug!(%err, "downlink decode failed"))
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Unwrap the decoder, returning the reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn uplink_records(&mut self) -> Result<UplinkMessage> {
        let mut message = UplinkMessage::new();
        let mut header = [0u8; HEADER_SIZE];
        let mut payload = [0u8; MAX_PAYLOAD_LEN];

        while self.read_record_start(&mut header)? {
            let [channel, type_byte] = header;
            let sensor_type =
                SensorType::from_u8(type_byte).ok_or(Error::UnknownType { type_byte, channel })?;

            let descriptor = sensor_type.descriptor();
            let payload = &mut payload[..descriptor.payload_len];
            self.read_exact(payload)?;

            let key = SensorKey::new(sensor_type, channel);
            let value = (descriptor.decode)(payload);
            trace!(%key, %value, "uplink record");

            if let Some(previous) = message.insert(key, value) {
                trace!(%key, %previous, "uplink record replaced earlier reading");
            }
        }

        Ok(message)
    }

    fn downlink_records(&mut self) -> Result<DownlinkMessage> {
        let mut message = DownlinkMessage::new();
        let mut channel_buf = [0u8; 1];
        let mut value_buf = [0u8; DOWNLINK_VALUE_SIZE];

        while self.read_record_start(&mut channel_buf)? {
            let [channel] = channel_buf;
            if channel == DOWNLINK_TERMINATOR {
                trace!("downlink terminator");
                break;
            }

            self.read_exact(&mut value_buf)?;
            let value = f32::from(i16::from_be_bytes(value_buf)) / DOWNLINK_VALUE_SCALE;
            trace!(channel, value, "downlink record");
            message.insert(channel, value);
        }

        Ok(message)
    }

    /// Fill `buf` at a record boundary.
    ///
    /// `Ok(false)` means the stream ended cleanly before the first byte.
    fn read_record_start(&mut self, buf: &mut [u8]) -> Result<bool> {
        match self.fill(buf)? {
            0 => Ok(false),
            got if got == buf.len() => Ok(true),
            got => Err(Error::UnexpectedEof {
                needed: buf.len(),
                got,
            }),
        }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let got = self.fill(buf)?;
        if got < buf.len() {
            return Err(Error::UnexpectedEof {
                needed: buf.len(),
                got,
            });
        }
        Ok(())
    }

    /// Read until `buf` is full or the stream is exhausted; returns bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof && filled == 0 => break,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(Error::UnexpectedEof {
                        needed: buf.len(),
                        got: filled,
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(filled)
    }
}
