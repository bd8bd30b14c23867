//! Decoded uplink and downlink messages

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::str::FromStr;

use super::{Error, SensorType, Value};

/// Identity of one uplink reading: sensor kind plus channel
///
/// Renders as `{type_name}_{channel}`, e.g. `temperature_7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorKey {
    /// Sensor kind
    pub sensor_type: SensorType,
    /// Channel the reading was tagged with
    pub channel: u8,
}

impl SensorKey {
    /// Create a new key
    #[must_use]
    pub const fn new(sensor_type: SensorType, channel: u8) -> Self {
        Self {
            sensor_type,
            channel,
        }
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.sensor_type.name(), self.channel)
    }
}

impl FromStr for SensorKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Type names contain underscores, so split on the last one.
        let invalid = || Error::InvalidKey(s.to_owned());
        let (name, channel) = s.rsplit_once('_').ok_or_else(invalid)?;
        let sensor_type = SensorType::from_name(name).ok_or_else(invalid)?;
        let parsed = channel.parse::<u8>().map_err(|_| invalid())?;
        // Only the canonical rendering is a key: no sign, no leading zeros.
        if parsed.to_string() != channel {
            return Err(invalid());
        }
        Ok(Self::new(sensor_type, parsed))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SensorKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SensorKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Readings decoded from an uplink payload
///
/// A later record with the same type and channel replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UplinkMessage {
    values: HashMap<SensorKey, Value>,
}

impl UplinkMessage {
    /// Create an empty message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: SensorKey, value: Value) -> Option<Value> {
        self.values.insert(key, value)
    }

    /// Get the reading for a sensor kind on a channel
    #[must_use]
    pub fn get(&self, sensor_type: SensorType, channel: u8) -> Option<&Value> {
        self.values.get(&SensorKey::new(sensor_type, channel))
    }

    /// Get a reading by its rendered key, e.g. `"analog_input_3"`
    #[must_use]
    pub fn get_by_name(&self, key: &str) -> Option<&Value> {
        let key = key.parse::<SensorKey>().ok()?;
        self.values.get(&key)
    }

    /// Key of the GPS reading, if the message reported a location
    ///
    /// When several GPS channels are present the lowest channel wins.
    #[must_use]
    pub fn location(&self) -> Option<SensorKey> {
        self.values
            .keys()
            .filter(|key| key.sensor_type.is_location())
            .min()
            .copied()
    }

    /// All readings
    #[must_use]
    pub fn values(&self) -> &HashMap<SensorKey, Value> {
        &self.values
    }

    /// Take ownership of the readings
    #[must_use]
    pub fn into_values(self) -> HashMap<SensorKey, Value> {
        self.values
    }

    /// Iterate over readings in no particular order
    pub fn iter(&self) -> hash_map::Iter<'_, SensorKey, Value> {
        self.values.iter()
    }

    /// Number of distinct readings
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the message holds no readings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a UplinkMessage {
    type Item = (&'a SensorKey, &'a Value);
    type IntoIter = hash_map::Iter<'a, SensorKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Port values decoded from a downlink payload, keyed by channel
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DownlinkMessage {
    values: HashMap<u8, f32>,
}

impl DownlinkMessage {
    /// Create an empty message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, channel: u8, value: f32) -> Option<f32> {
        self.values.insert(channel, value)
    }

    /// Get the value set for a channel
    #[must_use]
    pub fn get(&self, channel: u8) -> Option<f32> {
        self.values.get(&channel).copied()
    }

    /// All channel values
    #[must_use]
    pub fn values(&self) -> &HashMap<u8, f32> {
        &self.values
    }

    /// Iterate over `(channel, value)` pairs in no particular order
    pub fn iter(&self) -> hash_map::Iter<'_, u8, f32> {
        self.values.iter()
    }

    /// Number of channels set
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no channel was set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a DownlinkMessage {
    type Item = (&'a u8, &'a f32);
    type IntoIter = hash_map::Iter<'a, u8, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = SensorKey::new(SensorType::RelativeHumidity, 8);
        assert_eq!(key.to_string(), "relative_humidity_8");
        assert_eq!(SensorKey::new(SensorType::Gps, 255).to_string(), "gps_255");
    }

    #[test]
    fn test_key_parse() {
        let key: SensorKey = "barometric_pressure_10".parse().unwrap();
        assert_eq!(key, SensorKey::new(SensorType::BarometricPressure, 10));

        for bad in ["", "gps", "gps_", "gps_256", "pressure_1", "gps_-1", "gps_+1", "gps_01"] {
            assert!(
                matches!(bad.parse::<SensorKey>(), Err(Error::InvalidKey(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut msg = UplinkMessage::new();
        let key = SensorKey::new(SensorType::Temperature, 1);
        assert_eq!(msg.insert(key, Value::Float(20.0)), None);
        assert_eq!(msg.insert(key, Value::Float(21.5)), Some(Value::Float(20.0)));
        assert_eq!(msg.len(), 1);
        assert_eq!(msg.get_by_name("temperature_1"), Some(&Value::Float(21.5)));
        assert_eq!(msg.get_by_name("temperature_001"), None);
    }

    #[test]
    fn test_location() {
        let mut msg = UplinkMessage::new();
        assert_eq!(msg.location(), None);

        msg.insert(SensorKey::new(SensorType::Temperature, 0), Value::Float(1.0));
        assert_eq!(msg.location(), None);

        msg.insert(SensorKey::new(SensorType::Gps, 9), Value::Triple([0.0; 3]));
        msg.insert(SensorKey::new(SensorType::Gps, 4), Value::Triple([0.0; 3]));
        assert_eq!(msg.location(), Some(SensorKey::new(SensorType::Gps, 4)));
    }

    #[test]
    fn test_downlink_accessors() {
        let mut msg = DownlinkMessage::new();
        assert!(msg.is_empty());
        msg.insert(3, 1.5);
        assert_eq!(msg.get(3), Some(1.5));
        assert_eq!(msg.get(4), None);
        assert_eq!(msg.iter().count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_uplink_serde_uses_rendered_keys() {
        let mut msg = UplinkMessage::new();
        msg.insert(SensorKey::new(SensorType::Luminosity, 5), Value::Unsigned(500));
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"luminosity_5":500}"#);

        let back: UplinkMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
