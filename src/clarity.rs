//! Contract value encoding
//!
//! Values passed to and returned from contract functions. The JSON shape
//! follows the node API: every value is an object tagged by `type`.

use crate::principal::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("string-ascii value is empty")]
    EmptyString,

    #[error("string-ascii value has {len} characters, maximum is {max}")]
    StringTooLong { len: usize, max: usize },

    #[error("string-ascii value contains non-printable or non-ASCII characters")]
    NonAscii,

    #[error(transparent)]
    Principal(#[from] crate::principal::InvalidPrincipal),
}

/// A typed contract value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClarityValue {
    #[serde(rename = "uint")]
    UInt { value: u64 },
    #[serde(rename = "string-ascii")]
    StringAscii { value: String },
    #[serde(rename = "principal")]
    Principal { address: Principal },
    #[serde(rename = "bool")]
    Bool { value: bool },
    #[serde(rename = "none")]
    OptionalNone,
    #[serde(rename = "some")]
    OptionalSome { value: Box<ClarityValue> },
    #[serde(rename = "tuple")]
    Tuple { data: BTreeMap<String, ClarityValue> },
}

impl ClarityValue {
    pub fn uint(value: u64) -> Self {
        ClarityValue::UInt { value }
    }

    /// Build a `string-ascii` value, enforcing the declared maximum length
    pub fn string_ascii(value: impl Into<String>, max_len: usize) -> Result<Self, ValueError> {
        let value = value.into();
        check_ascii(&value, max_len)?;
        Ok(ClarityValue::StringAscii { value })
    }

    pub fn principal(address: &str) -> Result<Self, ValueError> {
        Ok(ClarityValue::Principal {
            address: Principal::parse(address)?,
        })
    }

    pub fn some(value: ClarityValue) -> Self {
        ClarityValue::OptionalSome {
            value: Box::new(value),
        }
    }

    pub fn none() -> Self {
        ClarityValue::OptionalNone
    }

    pub fn tuple<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ClarityValue)>,
        K: Into<String>,
    {
        ClarityValue::Tuple {
            data: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Name of the value's type as shown in the contract interface
    pub fn type_name(&self) -> &'static str {
        match self {
            ClarityValue::UInt { .. } => "uint",
            ClarityValue::StringAscii { .. } => "string-ascii",
            ClarityValue::Principal { .. } => "principal",
            ClarityValue::Bool { .. } => "bool",
            ClarityValue::OptionalNone | ClarityValue::OptionalSome { .. } => "optional",
            ClarityValue::Tuple { .. } => "tuple",
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            ClarityValue::UInt { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClarityValue::StringAscii { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_principal(&self) -> Option<&Principal> {
        match self {
            ClarityValue::Principal { address } => Some(address),
            _ => None,
        }
    }

    /// Unwrap an optional; `None` for `none`, the inner value for `some`
    pub fn into_option(self) -> Option<ClarityValue> {
        match self {
            ClarityValue::OptionalSome { value } => Some(*value),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&ClarityValue> {
        match self {
            ClarityValue::Tuple { data } => data.get(field),
            _ => None,
        }
    }
}

impl From<bool> for ClarityValue {
    fn from(value: bool) -> Self {
        ClarityValue::Bool { value }
    }
}

impl From<Principal> for ClarityValue {
    fn from(address: Principal) -> Self {
        ClarityValue::Principal { address }
    }
}

/// Printable ASCII, non-empty, bounded
pub fn check_ascii(value: &str, max_len: usize) -> Result<(), ValueError> {
    if value.is_empty() {
        return Err(ValueError::EmptyString);
    }
    if !value.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return Err(ValueError::NonAscii);
    }
    if value.len() > max_len {
        return Err(ValueError::StringTooLong {
            len: value.len(),
            max: max_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_shape_matches_node_api() {
        let value = ClarityValue::uint(1);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!({ "type": "uint", "value": 1 })
        );

        let value = ClarityValue::string_ascii("newword", 50).unwrap();
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!({ "type": "string-ascii", "value": "newword" })
        );

        let value = ClarityValue::principal(SENDER).unwrap();
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!({ "type": "principal", "address": SENDER })
        );
    }

    #[test]
    fn test_nested_values_deserialize() {
        let json = serde_json::json!({
            "type": "some",
            "value": {
                "type": "tuple",
                "data": {
                    "votes": { "type": "uint", "value": 3 },
                    "approved": { "type": "bool", "value": true }
                }
            }
        });
        let value: ClarityValue = serde_json::from_value(json).unwrap();
        let inner = value.into_option().unwrap();
        assert_eq!(inner.get("votes").and_then(ClarityValue::as_uint), Some(3));
        assert_eq!(inner.get("approved"), Some(&ClarityValue::from(true)));
    }

    #[test]
    fn test_string_ascii_bounds() {
        assert_eq!(ClarityValue::string_ascii("", 10), Err(ValueError::EmptyString));
        assert_eq!(
            ClarityValue::string_ascii("abcdef", 5),
            Err(ValueError::StringTooLong { len: 6, max: 5 })
        );
        assert_eq!(ClarityValue::string_ascii("mot\u{e9}", 10), Err(ValueError::NonAscii));
        assert_eq!(ClarityValue::string_ascii("tab\there", 10), Err(ValueError::NonAscii));
        assert!(ClarityValue::string_ascii("exactly-10", 10).is_ok());
    }

    #[test]
    fn test_invalid_principal_is_rejected() {
        assert!(matches!(
            ClarityValue::principal("alice"),
            Err(ValueError::Principal(_))
        ));
    }

    #[test]
    fn test_principal_in_json_is_validated() {
        let json = serde_json::json!({ "type": "principal", "address": "bogus" });
        assert!(serde_json::from_value::<ClarityValue>(json).is_err());
    }
}
