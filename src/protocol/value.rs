//! Decoded sensor values

use std::fmt;

/// A decoded reading
///
/// Integer kinds (digital I/O, presence, luminosity) stay integral; scaled kinds
/// become floats; accelerometer, gyrometer and GPS yield three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Unscaled unsigned integer
    Unsigned(u16),
    /// Fixed-point value after scaling
    Float(f32),
    /// Three scaled axes (`[x, y, z]` or `[lat, lon, alt]`)
    Triple([f32; 3]),
}

impl Value {
    /// Get the integer reading, if this is an unscaled kind
    #[must_use]
    pub const fn as_unsigned(&self) -> Option<u16> {
        match self {
            Self::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the scalar reading as a float
    ///
    /// Integer readings are widened; triples return `None`.
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Unsigned(v) => Some(f32::from(*v)),
            Self::Float(v) => Some(*v),
            Self::Triple(_) => None,
        }
    }

    /// Get the three axes of a vector reading
    #[must_use]
    pub const fn as_triple(&self) -> Option<[f32; 3]> {
        match self {
            Self::Triple(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Unsigned(u16::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<[f32; 3]> for Value {
    fn from(value: [f32; 3]) -> Self {
        Self::Triple(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Triple([a, b, c]) => write!(f, "[{a}, {b}, {c}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Unsigned(500).as_unsigned(), Some(500));
        assert_eq!(Value::Unsigned(500).as_float(), Some(500.0));
        assert_eq!(Value::Float(54.5).as_unsigned(), None);
        assert_eq!(Value::Float(54.5).as_float(), Some(54.5));
        assert_eq!(Value::Triple([1.0, 2.0, 3.0]).as_float(), None);
        assert_eq!(
            Value::Triple([1.0, 2.0, 3.0]).as_triple(),
            Some([1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Unsigned(7).to_string(), "7");
        assert_eq!(Value::Float(-15.6).to_string(), "-15.6");
        assert_eq!(Value::Triple([3.55, 5.61, -4.1]).to_string(), "[3.55, 5.61, -4.1]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_untagged() {
        let json = serde_json::to_string(&Value::Triple([1.5, 2.0, -3.25])).unwrap();
        assert_eq!(json, "[1.5,2.0,-3.25]");
        assert_eq!(serde_json::to_string(&Value::Unsigned(255)).unwrap(), "255");
    }
}
