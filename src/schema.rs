//! Static schema tables for objects and transactions.
//!
//! A contract describes what it stores and what it exposes through plain
//! `const` tables instead of annotations. The router validates calls against
//! [`TransactionSchema`] and renders everything into a [`ContractMetadata`]
//! document for hosts that ask for it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Transaction name under which the router serves the metadata document.
pub const METADATA_TRANSACTION: &str = "org.hyperledger.fabric:GetMetadata";

const METADATA_SCHEMA_URL: &str =
    "https://hyperledger.github.io/fabric-chaincode-node/main/api/contract-schema.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySchema {
    pub name: &'static str,
    pub type_name: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub properties: &'static [PropertySchema],
}

impl ObjectSchema {
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.iter().find(|p| p.name == name)
    }

    fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.to_string(), type_ref(p.type_name)))
            .collect();
        let required: Vec<&str> = self
            .properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "$id": self.name,
            "type": "object",
            "additionalProperties": false,
            "properties": properties,
            "required": required,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSchema {
    pub name: &'static str,
    pub type_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSchema {
    pub name: &'static str,
    /// Evaluate-only transactions never write to the state store.
    pub read_only: bool,
    pub parameters: &'static [ParameterSchema],
    pub returns: Option<&'static str>,
}

impl TransactionSchema {
    pub fn tag(&self) -> &'static str {
        if self.read_only { "evaluateTx" } else { "submitTx" }
    }

    fn to_json(&self) -> Value {
        let parameters: Vec<Value> = self
            .parameters
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "description": "",
                    "schema": type_ref(p.type_name),
                })
            })
            .collect();

        let mut tx = json!({
            "name": self.name,
            "tag": [self.tag()],
            "parameters": parameters,
        });
        if let (Some(returns), Some(obj)) = (self.returns, tx.as_object_mut()) {
            obj.insert("returns".to_string(), type_ref(returns));
        }
        tx
    }
}

/// Descriptive information a contract registers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl Default for ContractInfo {
    fn default() -> Self {
        Self {
            title: "RoshanAssetContract".to_string(),
            description: "My Smart Contract".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One registered contract as seen by the metadata builder.
pub struct ContractDescriptor<'a> {
    pub name: &'a str,
    pub info: &'a ContractInfo,
    pub transactions: &'a [TransactionSchema],
    pub objects: &'a [ObjectSchema],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMetadata(pub Value);

impl ContractMetadata {
    /// Build the metadata document. The top-level `info` is taken from the
    /// first (default) contract.
    pub fn build(contracts: &[ContractDescriptor<'_>]) -> Self {
        let mut rendered = Map::new();
        let mut schemas = Map::new();

        for contract in contracts {
            let transactions: Vec<Value> =
                contract.transactions.iter().map(|t| t.to_json()).collect();
            rendered.insert(
                contract.name.to_string(),
                json!({
                    "name": contract.name,
                    "contractInstance": { "name": contract.name },
                    "info": contract.info,
                    "transactions": transactions,
                }),
            );
            for object in contract.objects {
                schemas.insert(object.name.to_string(), object.to_json());
            }
        }

        let info = contracts
            .first()
            .map(|c| json!(c.info))
            .unwrap_or_else(|| json!(ContractInfo::default()));

        Self(json!({
            "$schema": METADATA_SCHEMA_URL,
            "info": info,
            "contracts": rendered,
            "components": { "schemas": schemas },
        }))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::ContractError> {
        serde_json::to_vec(&self.0).map_err(|e| crate::ContractError::Serialize(e.to_string()))
    }
}

fn type_ref(type_name: &str) -> Value {
    match type_name {
        "string" | "boolean" | "number" | "integer" => json!({ "type": type_name }),
        object => json!({ "$ref": format!("#/components/schemas/{}", object) }),
    }
}
