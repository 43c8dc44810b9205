use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::AppError;

/// Payment method recorded on order payments and manual ledger entries.
///
/// `cash` and `qris` are the methods the back-office forms offer. Stores do not
/// validate the column, so any other value is kept as its own bucket instead of
/// being folded into one of the known methods.
///
/// Equality, ordering and hashing all go through the wire name, so
/// `Other("cash")` is the same key as `Cash`.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    /// Physical cash at the register
    Cash,
    /// QRIS (Quick Response Code Indonesian Standard) e-payment
    Qris,
    /// Unrecognized value, lowercased and trimmed
    Other(String),
}

impl PaymentMethod {
    /// Method assumed when a record carries no method at all
    pub const DEFAULT: PaymentMethod = PaymentMethod::Cash;

    /// Parse a raw store value. Never fails: null or blank means cash,
    /// unknown values become `Other`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let value = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Self::DEFAULT;
        }

        match value.to_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "qris" => PaymentMethod::Qris,
            other => PaymentMethod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Qris => "qris",
            PaymentMethod::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self.as_str(), "cash" | "qris")
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PartialEq for PaymentMethod {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for PaymentMethod {}

impl Hash for PaymentMethod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

// Rows are sorted by method name, so ordering is lexical on the wire value.
impl Ord for PaymentMethod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for PaymentMethod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AppError::validation("Payment method cannot be empty"));
        }
        Ok(PaymentMethod::from_raw(Some(s)))
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
