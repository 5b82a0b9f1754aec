// src/asset.rs
use serde::{Deserialize, Serialize};

use crate::ContractError;
use crate::schema::{ObjectSchema, PropertySchema};

/// The single record this contract manages. Its key lives outside the
/// payload, in the state store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoshanAsset {
    pub value: String,
}

impl RoshanAsset {
    pub const SCHEMA: ObjectSchema = ObjectSchema {
        name: "RoshanAsset",
        properties: &[PropertySchema {
            name: "value",
            type_name: "string",
            required: true,
        }],
    };

    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Compact UTF-8 JSON, `{"value":"..."}`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ContractError> {
        serde_json::to_vec(self).map_err(|e| ContractError::Serialize(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContractError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let asset = RoshanAsset::new("roshan asset 1003 value");
        assert_eq!(
            asset.to_bytes().unwrap(),
            br#"{"value":"roshan asset 1003 value"}"#.to_vec()
        );
    }

    #[test]
    fn test_round_trip_preserves_escapes() {
        let asset = RoshanAsset::new("quote \" backslash \\ unicode ✓ newline \n");
        let decoded = RoshanAsset::from_bytes(&asset.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, asset);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let asset = RoshanAsset::from_bytes(br#"{"value":"a","owner":"b"}"#).unwrap();
        assert_eq!(asset.value, "a");
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        for bytes in [
            b"not json".as_slice(),
            b"{}".as_slice(),
            br#"{"value":42}"#.as_slice(),
            b"[\"value\"]".as_slice(),
            b"\xff\xfe".as_slice(),
        ] {
            let err = RoshanAsset::from_bytes(bytes).unwrap_err();
            assert!(matches!(err, ContractError::Deserialize(_)), "{:?}", bytes);
        }
    }

    #[test]
    fn test_schema_describes_value() {
        let prop = RoshanAsset::SCHEMA.property("value").unwrap();
        assert_eq!(prop.type_name, "string");
        assert!(prop.required);
        assert_eq!(RoshanAsset::SCHEMA.properties.len(), 1);
    }
}
