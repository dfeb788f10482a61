//! Hardware address parsing and bit classification.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::oui::types::{MacLookupError, MacLookupResult};

fn oui_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})")
            .expect("static OUI pattern compiles")
    })
}

/// The vendor-relevant part of a hardware address: its first three octets.
///
/// Anything after the sixth hex digit is ignored, so partial addresses such
/// as `3c:d9:2b` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress {
    octets: [u8; 3],
}

impl MacAddress {
    /// Parse the leading three octets of `input`.
    ///
    /// Octets may be written contiguously or separated by `:` or `-`.
    pub fn parse(input: &str) -> MacLookupResult<Self> {
        let caps = oui_pattern()
            .captures(input.trim())
            .ok_or(MacLookupError::InvalidInput)?;

        let mut octets = [0u8; 3];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = u8::from_str_radix(&caps[i + 1], 16)
                .map_err(|_| MacLookupError::InvalidInput)?;
        }
        Ok(Self { octets })
    }

    pub fn first_octet(&self) -> u8 {
        self.octets[0]
    }

    /// Bit 1 of the first octet (U/L bit).
    pub fn is_locally_administered(&self) -> bool {
        self.first_octet() & 0b10 != 0
    }

    /// Bit 0 of the first octet (I/G bit).
    pub fn is_multicast(&self) -> bool {
        self.first_octet() & 0b01 != 0
    }

    /// Normalized prefix: three uppercase hex octets joined by `-`.
    pub fn oui(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.octets;
        write!(f, "{a:02X}-{b:02X}-{c:02X}")
    }
}

/// Normalize the prefix of `input`, or `None` if it does not start with an OUI.
pub fn normalize(input: &str) -> Option<String> {
    MacAddress::parse(input).ok().map(|mac| mac.oui())
}
