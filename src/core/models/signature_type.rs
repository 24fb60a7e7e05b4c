//! Signature types
//!
//! Distinguishes individual, corporate and employee agreements.

use serde::{Deserialize, Serialize};

/// The kind of agreement a signature records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignatureType {
    /// Individual contributor agreement (ICLA)
    #[default]
    #[serde(rename = "cla")]
    Individual,
    /// Corporate agreement signed on behalf of a company (CCLA)
    #[serde(rename = "ccla")]
    Corporate,
    /// Employee acknowledgement under a corporate agreement (ECLA)
    #[serde(rename = "ecla")]
    Employee,
}

impl std::fmt::Display for SignatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual => write!(f, "cla"),
            Self::Corporate => write!(f, "ccla"),
            Self::Employee => write!(f, "ecla"),
        }
    }
}

impl std::str::FromStr for SignatureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cla" | "icla" | "individual" => Ok(Self::Individual),
            "ccla" | "corporate" => Ok(Self::Corporate),
            "ecla" | "employee" => Ok(Self::Employee),
            _ => Err(format!("Invalid signature type: {s}. Use: icla, ccla, ecla")),
        }
    }
}
