//! IPv4 network address.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AddressUsage;
use crate::error::AddressError;

/// An IPv4 address with a prefix length and a role tag.
///
/// Same identity rule as [`Network6Address`](super::Network6Address): the
/// address word and the prefix length, never the role tag.
#[derive(Debug, Clone, Copy)]
pub struct Network4Address {
    word: u32,
    prefix_length: u8,
    usage: AddressUsage,
}

impl Network4Address {
    /// Parse a dotted-quad literal, optionally suffixed `/<prefixLength>`.
    ///
    /// A missing prefix length defaults to 0, matching the IPv6 variant.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let (literal, length) = match text.split_once('/') {
            Some((literal, length)) => {
                let length: u32 =
                    length
                        .parse()
                        .map_err(|_| AddressError::InvalidFormat {
                            text: text.to_string(),
                        })?;
                (literal, length)
            }
            None => (text, 0),
        };
        if length > 32 {
            return Err(AddressError::InvalidPrefixLength {
                length,
                family: "IPv4",
            });
        }
        let address: Ipv4Addr =
            literal
                .parse()
                .map_err(|_| AddressError::InvalidFormat {
                    text: text.to_string(),
                })?;
        Ok(Self::with_prefix(address, length as u8))
    }

    /// Build from a native address and a prefix length.
    pub fn with_prefix(address: Ipv4Addr, prefix_length: u8) -> Self {
        Self::from_word(u32::from(address), prefix_length)
    }

    /// Build from the raw address word and a prefix length.
    pub const fn from_word(word: u32, prefix_length: u8) -> Self {
        Self {
            word,
            prefix_length,
            usage: AddressUsage::Primary,
        }
    }

    /// The raw address word.
    pub const fn word(&self) -> u32 {
        self.word
    }

    pub const fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// Copy of this address carrying a different prefix length.
    pub const fn with_prefix_length(&self, prefix_length: u8) -> Self {
        Self {
            word: self.word,
            prefix_length,
            usage: self.usage,
        }
    }

    pub const fn usage(&self) -> AddressUsage {
        self.usage
    }

    /// Reassign the role tag. Identity is unaffected.
    pub fn set_usage(&mut self, usage: AddressUsage) {
        self.usage = usage;
    }

    /// The native in-memory representation.
    pub const fn to_ipv4_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from_bits(self.word)
    }

    /// Textual form of the bare address, without prefix length.
    pub fn ip(&self) -> String {
        self.to_ipv4_addr().to_string()
    }

    /// `"<address>/<prefixLength>"`.
    pub fn to_prefix_string(&self) -> String {
        format!("{}/{}", self.ip(), self.prefix_length)
    }

    /// Whether `other` falls inside this address's prefix.
    ///
    /// The shift amount `32 - prefixLength` is taken modulo 32, so a prefix
    /// of 0 compares the full word, same arithmetic as the IPv6 variant.
    pub fn contains(&self, other: &Network4Address) -> bool {
        let shift = 32u32.wrapping_sub(self.prefix_length as u32);
        self.word.wrapping_shr(shift) == other.word.wrapping_shr(shift)
    }

    /// True iff the top nibble is 0xE (224.0.0.0/4).
    pub const fn is_multicast(&self) -> bool {
        (self.word >> 28) & 0xF == 0xE
    }
}

impl From<Ipv4Addr> for Network4Address {
    fn from(address: Ipv4Addr) -> Self {
        Self::with_prefix(address, 0)
    }
}

impl FromStr for Network4Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Network4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_prefix_string())
    }
}

impl PartialEq for Network4Address {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && self.prefix_length == other.prefix_length
    }
}

impl Eq for Network4Address {}

impl Hash for Network4Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
        self.prefix_length.hash(state);
    }
}

impl Serialize for Network4Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefix_string())
    }
}

impl<'de> Deserialize<'de> for Network4Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}
