//! # Account Identity
//!
//! An [`Address`] is the opaque key every balance, exemption flag and
//! allowance hangs off. The ledger never looks inside it beyond equality,
//! ordering and hashing.
//!
//! One address is special: [`Address::ZERO`], the null identity. Moving
//! funds *from* it mints, moving funds *to* it burns, and the fee engine
//! never taxes either direction. Administrative setters refuse to install it
//! as the collector.
//!
//! On the wire and in logs an address is `0x` followed by 40 lowercase hex
//! characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Errors produced when parsing an address from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    /// The input was not valid hex.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded input had the wrong number of bytes.
    #[error("invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required byte length.
        expected: usize,
        /// Byte length actually decoded.
        actual: usize,
    },
}

/// A 20-byte account identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The null identity: mint source, burn sink, never a valid collector.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Wraps raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose trailing eight bytes hold `n` big-endian.
    ///
    /// Handy for fixtures and scripted scenarios: `from_low_u64(1)` renders
    /// as `0x0000…0001`.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Returns `true` for [`Address::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Accepts the hex form with or without the `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let decoded =
            hex::decode(stripped).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ADDRESS_LENGTH] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| AddressParseError::InvalidLength {
                    expected: ADDRESS_LENGTH,
                    actual: decoded.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
