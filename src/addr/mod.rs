//! Network address model.
//!
//! Addresses identify and classify device interfaces. Both families share
//! one capability surface (textual forms, prefix containment, role tags)
//! behind the [`NetworkAddress`] tagged variant, with per-family storage.

mod v4;
mod v6;

pub use v4::Network4Address;
pub use v6::Network6Address;

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// Role of an address on a device interface.
///
/// Classification only; it never participates in address identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AddressUsage {
    #[default]
    Primary,
    Secondary,
    Vip,
    Hsrp,
    Vrrp,
    Glbp,
    Anycast,
}

/// An IPv4 or IPv6 interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkAddress {
    V4(Network4Address),
    V6(Network6Address),
}

impl NetworkAddress {
    /// Parse either family, optionally suffixed `/<prefixLength>`.
    ///
    /// Colon-hex literals parse as IPv6, dotted quads as IPv4. A missing
    /// prefix length defaults to 0 in both families.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let literal = text.split_once('/').map_or(text, |(literal, _)| literal);
        if literal.contains(':') {
            Network6Address::parse(text).map(NetworkAddress::V6)
        } else {
            Network4Address::parse(text).map(NetworkAddress::V4)
        }
    }

    /// Textual form of the bare address, without prefix length.
    pub fn ip(&self) -> String {
        match self {
            NetworkAddress::V4(address) => address.ip(),
            NetworkAddress::V6(address) => address.ip(),
        }
    }

    pub fn prefix_length(&self) -> u8 {
        match self {
            NetworkAddress::V4(address) => address.prefix_length(),
            NetworkAddress::V6(address) => address.prefix_length(),
        }
    }

    /// `"<address>/<prefixLength>"`.
    pub fn to_prefix_string(&self) -> String {
        match self {
            NetworkAddress::V4(address) => address.to_prefix_string(),
            NetworkAddress::V6(address) => address.to_prefix_string(),
        }
    }

    pub fn usage(&self) -> AddressUsage {
        match self {
            NetworkAddress::V4(address) => address.usage(),
            NetworkAddress::V6(address) => address.usage(),
        }
    }

    /// Reassign the role tag. Identity is unaffected.
    pub fn set_usage(&mut self, usage: AddressUsage) {
        match self {
            NetworkAddress::V4(address) => address.set_usage(usage),
            NetworkAddress::V6(address) => address.set_usage(usage),
        }
    }

    /// The native in-memory representation.
    pub fn to_ip_addr(&self) -> IpAddr {
        match self {
            NetworkAddress::V4(address) => IpAddr::V4(address.to_ipv4_addr()),
            NetworkAddress::V6(address) => IpAddr::V6(address.to_ipv6_addr()),
        }
    }

    /// Whether `other` falls inside this address's prefix.
    ///
    /// Always false across families.
    pub fn contains(&self, other: &NetworkAddress) -> bool {
        match (self, other) {
            (NetworkAddress::V4(a), NetworkAddress::V4(b)) => a.contains(b),
            (NetworkAddress::V6(a), NetworkAddress::V6(b)) => a.contains(b),
            _ => false,
        }
    }

    pub fn is_multicast(&self) -> bool {
        match self {
            NetworkAddress::V4(address) => address.is_multicast(),
            NetworkAddress::V6(address) => address.is_multicast(),
        }
    }
}

impl From<IpAddr> for NetworkAddress {
    fn from(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(address) => NetworkAddress::V4(address.into()),
            IpAddr::V6(address) => NetworkAddress::V6(address.into()),
        }
    }
}

impl FromStr for NetworkAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_prefix_string())
    }
}

impl Serialize for NetworkAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefix_string())
    }
}

impl<'de> Deserialize<'de> for NetworkAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dispatches_by_family() {
        assert!(matches!(
            NetworkAddress::parse("192.168.1.1/24"),
            Ok(NetworkAddress::V4(_))
        ));
        assert!(matches!(
            NetworkAddress::parse("2001:db8::1/64"),
            Ok(NetworkAddress::V6(_))
        ));
        assert!(NetworkAddress::parse("garbage").is_err());
    }

    #[test]
    fn test_cross_family_containment_is_false() {
        let v4 = NetworkAddress::parse("0.0.0.0/0").unwrap();
        let v6 = NetworkAddress::parse("::/0").unwrap();
        assert!(!v4.contains(&v6));
        assert!(!v6.contains(&v4));
    }

    #[test]
    fn test_usage_reassignment_keeps_identity() {
        let mut a = NetworkAddress::parse("2001:db8::1/64").unwrap();
        let b = NetworkAddress::parse("2001:db8::1/64").unwrap();
        a.set_usage(AddressUsage::Vip);
        assert_eq!(a.usage(), AddressUsage::Vip);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_matches_prefix_string() {
        let address = NetworkAddress::parse("10.1.2.3/8").unwrap();
        assert_eq!(address.to_string(), "10.1.2.3/8");
    }
}
