//! Port value that the provider encodes as either an integer or a string.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Raised when a value is neither an integer nor a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot unmarshal {raw} into CustomPort: {reason}")]
pub struct PortDecodeError {
    /// The offending raw JSON, verbatim.
    pub raw: String,
    /// Underlying decoder message.
    pub reason: String,
}

/// A TCP/UDP port as used by failover checks.
///
/// Default ports come back as JSON integers, custom ports as numeric strings.
/// Decoding accepts both; encoding always emits an integer. `0` means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomPort(pub u16);

impl CustomPort {
    /// Whether the port is unset (zero); unset ports are left out of requests.
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Decode from raw JSON bytes: integer first, then numeric string.
    pub fn from_json(raw: &[u8]) -> Result<Self, PortDecodeError> {
        serde_json::from_slice(raw).map_err(|e: serde_json::Error| PortDecodeError {
            raw: String::from_utf8_lossy(raw).into_owned(),
            reason: e.to_string(),
        })
    }
}

impl From<u16> for CustomPort {
    fn from(port: u16) -> Self {
        Self(port)
    }
}

impl From<CustomPort> for u16 {
    fn from(port: CustomPort) -> Self {
        port.0
    }
}

impl fmt::Display for CustomPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CustomPort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

struct CustomPortVisitor;

impl CustomPortVisitor {
    fn narrow<E: de::Error>(value: u64, raw: &dyn fmt::Display) -> Result<CustomPort, E> {
        u16::try_from(value)
            .map(CustomPort)
            .map_err(|_| E::custom(format!("cannot decode {raw} into CustomPort")))
    }
}

impl Visitor<'_> for CustomPortVisitor {
    type Value = CustomPort;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a port as an integer or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CustomPort, E> {
        Self::narrow(v, &v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CustomPort, E> {
        let unsigned =
            u64::try_from(v).map_err(|_| E::custom(format!("cannot decode {v} into CustomPort")))?;
        Self::narrow(unsigned, &v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CustomPort, E> {
        let parsed: u64 = v
            .parse()
            .map_err(|_| E::custom(format!("cannot decode \"{v}\" into CustomPort")))?;
        Self::narrow(parsed, &format!("\"{v}\""))
    }
}

impl<'de> Deserialize<'de> for CustomPort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CustomPortVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_decode_identically() {
        let from_int = CustomPort::from_json(b"443").unwrap();
        let from_str = CustomPort::from_json(br#""443""#).unwrap();
        assert_eq!(from_int, CustomPort(443));
        assert_eq!(from_int, from_str);
    }

    #[test]
    fn non_numeric_string_fails() {
        let err = CustomPort::from_json(br#""abc""#).unwrap_err();
        assert!(err.to_string().contains("\"abc\""), "{err}");
    }

    #[test]
    fn array_fails() {
        let err = CustomPort::from_json(b"[443]").unwrap_err();
        assert_eq!(err.raw, "[443]");
    }

    #[test]
    fn out_of_range_fails() {
        assert!(CustomPort::from_json(b"70000").is_err());
        assert!(CustomPort::from_json(b"-1").is_err());
        assert!(CustomPort::from_json(br#""70000""#).is_err());
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&CustomPort(8080)).unwrap(), "8080");
    }

    #[test]
    fn decodes_inside_struct() {
        #[derive(Deserialize)]
        struct Settings {
            port: CustomPort,
        }

        let s: Settings = serde_json::from_str(r#"{"port":"8443"}"#).unwrap();
        assert_eq!(u16::from(s.port), 8443);
    }
}
