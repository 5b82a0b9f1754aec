// src/contract.rs
use async_trait::async_trait;
use metrics::histogram;
use std::time::Instant;

use crate::schema::{ContractInfo, ObjectSchema, ParameterSchema, TransactionSchema};
use crate::{Context, Contract, ContractError, RoshanAsset};

const OBJECTS: &[ObjectSchema] = &[RoshanAsset::SCHEMA];

const ASSET_ID: ParameterSchema = ParameterSchema {
    name: "roshanAssetId",
    type_name: "string",
};

/// Create/read/update/delete over [`RoshanAsset`] records.
///
/// Each operation checks existence first and only then touches the key
/// again, both times through the caller's [`Context`]. Nothing is rolled
/// back here; a failed precondition simply returns before any write.
pub struct RoshanAssetContract {
    info: ContractInfo,
}

impl RoshanAssetContract {
    pub const NAME: &'static str = "RoshanAssetContract";

    pub const TRANSACTIONS: &'static [TransactionSchema] = &[
        TransactionSchema {
            name: "roshanAssetExists",
            read_only: true,
            parameters: &[ASSET_ID],
            returns: Some("boolean"),
        },
        TransactionSchema {
            name: "createRoshanAsset",
            read_only: false,
            parameters: &[
                ASSET_ID,
                ParameterSchema {
                    name: "value",
                    type_name: "string",
                },
            ],
            returns: None,
        },
        TransactionSchema {
            name: "readRoshanAsset",
            read_only: true,
            parameters: &[ASSET_ID],
            returns: Some("RoshanAsset"),
        },
        TransactionSchema {
            name: "updateRoshanAsset",
            read_only: false,
            parameters: &[
                ASSET_ID,
                ParameterSchema {
                    name: "newValue",
                    type_name: "string",
                },
            ],
            returns: None,
        },
        TransactionSchema {
            name: "deleteRoshanAsset",
            read_only: false,
            parameters: &[ASSET_ID],
            returns: None,
        },
    ];

    pub fn new() -> Self {
        Self::with_info(ContractInfo::default())
    }

    pub fn with_info(info: ContractInfo) -> Self {
        Self { info }
    }

    pub async fn exists(&self, ctx: &Context, asset_id: &str) -> Result<bool, ContractError> {
        let start = Instant::now();
        let result = self.try_exists(ctx, asset_id).await;
        observe("roshanAssetExists", ctx, asset_id, start, &result);
        result
    }

    pub async fn create(
        &self,
        ctx: &Context,
        asset_id: &str,
        value: &str,
    ) -> Result<(), ContractError> {
        let start = Instant::now();
        let result = self.try_create(ctx, asset_id, value).await;
        observe("createRoshanAsset", ctx, asset_id, start, &result);
        result
    }

    pub async fn read(&self, ctx: &Context, asset_id: &str) -> Result<RoshanAsset, ContractError> {
        let start = Instant::now();
        let result = self.try_read(ctx, asset_id).await;
        observe("readRoshanAsset", ctx, asset_id, start, &result);
        result
    }

    pub async fn update(
        &self,
        ctx: &Context,
        asset_id: &str,
        new_value: &str,
    ) -> Result<(), ContractError> {
        let start = Instant::now();
        let result = self.try_update(ctx, asset_id, new_value).await;
        observe("updateRoshanAsset", ctx, asset_id, start, &result);
        result
    }

    pub async fn delete(&self, ctx: &Context, asset_id: &str) -> Result<(), ContractError> {
        let start = Instant::now();
        let result = self.try_delete(ctx, asset_id).await;
        observe("deleteRoshanAsset", ctx, asset_id, start, &result);
        result
    }

    async fn try_exists(&self, ctx: &Context, asset_id: &str) -> Result<bool, ContractError> {
        let data = ctx.stub().get_state(asset_id).await?;
        Ok(data.is_some_and(|bytes| !bytes.is_empty()))
    }

    async fn try_create(
        &self,
        ctx: &Context,
        asset_id: &str,
        value: &str,
    ) -> Result<(), ContractError> {
        if self.try_exists(ctx, asset_id).await? {
            return Err(ContractError::AlreadyExists(asset_id.to_string()));
        }
        let buffer = RoshanAsset::new(value).to_bytes()?;
        ctx.stub().put_state(asset_id, buffer).await
    }

    async fn try_read(&self, ctx: &Context, asset_id: &str) -> Result<RoshanAsset, ContractError> {
        if !self.try_exists(ctx, asset_id).await? {
            return Err(ContractError::NotFound(asset_id.to_string()));
        }
        // Gone between the two reads: treat it as absent.
        let data = ctx
            .stub()
            .get_state(asset_id)
            .await?
            .ok_or_else(|| ContractError::NotFound(asset_id.to_string()))?;
        RoshanAsset::from_bytes(&data)
    }

    async fn try_update(
        &self,
        ctx: &Context,
        asset_id: &str,
        new_value: &str,
    ) -> Result<(), ContractError> {
        if !self.try_exists(ctx, asset_id).await? {
            return Err(ContractError::NotFound(asset_id.to_string()));
        }
        // Full replace; nothing from the previous record is carried over.
        let buffer = RoshanAsset::new(new_value).to_bytes()?;
        ctx.stub().put_state(asset_id, buffer).await
    }

    async fn try_delete(&self, ctx: &Context, asset_id: &str) -> Result<(), ContractError> {
        if !self.try_exists(ctx, asset_id).await? {
            return Err(ContractError::NotFound(asset_id.to_string()));
        }
        ctx.stub().delete_state(asset_id).await
    }
}

impl Default for RoshanAssetContract {
    fn default() -> Self {
        Self::new()
    }
}

fn observe<T>(
    transaction: &'static str,
    ctx: &Context,
    asset_id: &str,
    start: Instant,
    result: &Result<T, ContractError>,
) {
    let outcome = match result {
        Ok(_) => {
            tracing::debug!(tx_id = ctx.tx_id(), asset_id, transaction, "transaction completed");
            "ok"
        }
        Err(err) => {
            tracing::warn!(
                tx_id = ctx.tx_id(),
                asset_id,
                transaction,
                error = %err,
                "transaction rejected"
            );
            err.kind()
        }
    };
    histogram!("roshan_asset.tx.duration_ms",
        "transaction" => transaction,
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

fn arg<'a>(args: &'a [String], index: usize, expected: usize) -> Result<&'a str, ContractError> {
    match args.get(index) {
        Some(value) if args.len() == expected => Ok(value),
        _ => Err(ContractError::InvalidArguments {
            expected,
            supplied: args.len(),
        }),
    }
}

fn encode_bool(value: bool) -> Vec<u8> {
    value.to_string().into_bytes()
}

#[async_trait]
impl Contract for RoshanAssetContract {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn info(&self) -> &ContractInfo {
        &self.info
    }

    fn transactions(&self) -> &[TransactionSchema] {
        Self::TRANSACTIONS
    }

    fn objects(&self) -> &[ObjectSchema] {
        OBJECTS
    }

    async fn invoke(
        &self,
        ctx: &Context,
        transaction: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        match transaction {
            "roshanAssetExists" => {
                let exists = self.exists(ctx, arg(args, 0, 1)?).await?;
                Ok(encode_bool(exists))
            }
            "createRoshanAsset" => {
                self.create(ctx, arg(args, 0, 2)?, arg(args, 1, 2)?).await?;
                Ok(Vec::new())
            }
            "readRoshanAsset" => self.read(ctx, arg(args, 0, 1)?).await?.to_bytes(),
            "updateRoshanAsset" => {
                self.update(ctx, arg(args, 0, 2)?, arg(args, 1, 2)?).await?;
                Ok(Vec::new())
            }
            "deleteRoshanAsset" => {
                self.delete(ctx, arg(args, 0, 1)?).await?;
                Ok(Vec::new())
            }
            other => Err(ContractError::UnknownTransaction(other.to_string())),
        }
    }
}
