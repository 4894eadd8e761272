use crate::error::MulticallError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which aggregator contract a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Version {
    /// The original multicall contract, `aggregate` plus block getters.
    V1,
    /// Per-call gas and result size limits, with a status per call.
    QuickCall,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V1 => write!(f, "v1"),
            Version::QuickCall => write!(f, "quickcall"),
        }
    }
}

impl FromStr for Version {
    type Err = MulticallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "multicall" | "0" => Ok(Version::V1),
            "quickcall" | "quick_call" | "1" => Ok(Version::QuickCall),
            _ => Err(MulticallError::UnknownVersion(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = MulticallError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Version::V1),
            1 => Ok(Version::QuickCall),
            _ => Err(MulticallError::UnknownVersion(tag.to_string())),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = MulticallError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_tags() {
        assert_eq!("v1".parse::<Version>().unwrap(), Version::V1);
        assert_eq!("QuickCall".parse::<Version>().unwrap(), Version::QuickCall);
        assert_eq!(Version::try_from(0u8).unwrap(), Version::V1);
        assert_eq!(Version::try_from(1u8).unwrap(), Version::QuickCall);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        assert!(matches!(
            "v3".parse::<Version>(),
            Err(MulticallError::UnknownVersion(tag)) if tag == "v3"
        ));
        assert!(matches!(
            Version::try_from(7u8),
            Err(MulticallError::UnknownVersion(_))
        ));
    }

    #[test]
    fn test_version_serde_uses_tags() {
        let json = serde_json::to_string(&Version::QuickCall).unwrap();
        assert_eq!(json, "\"quickcall\"");
        let parsed: Version = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(parsed, Version::V1);
        assert!(serde_json::from_str::<Version>("\"v9\"").is_err());
    }
}
