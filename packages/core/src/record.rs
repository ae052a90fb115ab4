//! DNS record type families.
//!
//! The remote API exposes one call per record family (`dns_a_add`,
//! `dns_mx_update`, ...) instead of a single polymorphic record call.
//! Modeling the family set as an enum turns an unrecognized `type`
//! parameter into a local fault instead of a remote "unknown method"
//! fault; the supported set mirrors the record tables the control
//! plane ships.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A DNS record family supported by the remote record calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    A,
    Aaaa,
    Alias,
    Cname,
    Dkim,
    Ds,
    Hinfo,
    Loc,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Rp,
    Srv,
    Tlsa,
    Txt,
}

/// Rejection of a `type` parameter that names no known record family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown DNS record type: {0}")]
pub struct RecordTypeError(pub String);

impl RecordType {
    /// Every supported record family, in wire-suffix order.
    pub const ALL: &'static [RecordType] = &[
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Alias,
        RecordType::Cname,
        RecordType::Dkim,
        RecordType::Ds,
        RecordType::Hinfo,
        RecordType::Loc,
        RecordType::Mx,
        RecordType::Naptr,
        RecordType::Ns,
        RecordType::Ptr,
        RecordType::Rp,
        RecordType::Srv,
        RecordType::Tlsa,
        RecordType::Txt,
    ];

    /// The lowercase suffix interpolated into remote call names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "a",
            RecordType::Aaaa => "aaaa",
            RecordType::Alias => "alias",
            RecordType::Cname => "cname",
            RecordType::Dkim => "dkim",
            RecordType::Ds => "ds",
            RecordType::Hinfo => "hinfo",
            RecordType::Loc => "loc",
            RecordType::Mx => "mx",
            RecordType::Naptr => "naptr",
            RecordType::Ns => "ns",
            RecordType::Ptr => "ptr",
            RecordType::Rp => "rp",
            RecordType::Srv => "srv",
            RecordType::Tlsa => "tlsa",
            RecordType::Txt => "txt",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = RecordTypeError;

    /// Parses a record type name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == lowered)
            .ok_or_else(|| RecordTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_parses_back_for_every_family() {
        for ty in RecordType::ALL {
            assert_eq!(ty.as_str().parse::<RecordType>().unwrap(), *ty);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("MX".parse::<RecordType>().unwrap(), RecordType::Mx);
        assert_eq!("Txt".parse::<RecordType>().unwrap(), RecordType::Txt);
    }

    #[test]
    fn unknown_type_is_rejected_with_input_spelling() {
        let err = "bogus".parse::<RecordType>().unwrap_err();
        assert_eq!(err, RecordTypeError("bogus".to_string()));
        assert_eq!(err.to_string(), "unknown DNS record type: bogus");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&RecordType::Aaaa).unwrap();
        assert_eq!(json, "\"aaaa\"");
        let ty: RecordType = serde_json::from_str("\"srv\"").unwrap();
        assert_eq!(ty, RecordType::Srv);
    }
}
