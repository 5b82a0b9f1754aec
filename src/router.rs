use async_trait::async_trait;
use std::sync::Arc;

use crate::schema::{
    ContractDescriptor, ContractInfo, ContractMetadata, METADATA_TRANSACTION, ObjectSchema,
    TransactionSchema,
};
use crate::{Context, ContractError};

/// A contract the hosting runtime can invoke by transaction name.
#[async_trait]
pub trait Contract: Send + Sync {
    fn name(&self) -> &str;

    fn info(&self) -> &ContractInfo;

    fn transactions(&self) -> &[TransactionSchema];

    fn objects(&self) -> &[ObjectSchema];

    /// Run `transaction` with string arguments and encode the result:
    /// booleans as `true`/`false`, objects as JSON, unit as no bytes.
    async fn invoke(
        &self,
        ctx: &Context,
        transaction: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError>;
}

/// Table of registered contracts, built once at process start.
///
/// Functions are addressed as `"tx"` on the default (first registered)
/// contract, or `"ContractName:tx"` on any of them.
#[derive(Clone, Default)]
pub struct Router {
    contracts: Vec<Arc<dyn Contract>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: Contract + 'static>(mut self, contract: C) -> Result<Self, ContractError> {
        if self.contracts.iter().any(|c| c.name() == contract.name()) {
            return Err(ContractError::DuplicateContract(contract.name().to_string()));
        }
        tracing::info!(
            contract = contract.name(),
            transactions = contract.transactions().len(),
            "contract registered"
        );
        self.contracts.push(Arc::new(contract));
        Ok(self)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &dyn Contract> {
        self.contracts.iter().map(|c| c.as_ref())
    }

    pub fn metadata(&self) -> ContractMetadata {
        let descriptors: Vec<ContractDescriptor<'_>> = self
            .contracts
            .iter()
            .map(|c| ContractDescriptor {
                name: c.name(),
                info: c.info(),
                transactions: c.transactions(),
                objects: c.objects(),
            })
            .collect();
        ContractMetadata::build(&descriptors)
    }

    /// Whether `function` only reads state. `None` if nothing by that name
    /// is registered.
    pub fn is_read_only(&self, function: &str) -> Option<bool> {
        if function == METADATA_TRANSACTION {
            return Some(true);
        }
        self.resolve(function).map(|(_, tx)| tx.read_only)
    }

    pub async fn invoke(
        &self,
        ctx: &Context,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        if function == METADATA_TRANSACTION {
            return self.metadata().to_bytes();
        }

        let (contract, tx) = self
            .resolve(function)
            .ok_or_else(|| ContractError::UnknownTransaction(function.to_string()))?;

        if tx.parameters.len() != args.len() {
            return Err(ContractError::InvalidArguments {
                expected: tx.parameters.len(),
                supplied: args.len(),
            });
        }

        tracing::debug!(
            tx_id = ctx.tx_id(),
            channel = ctx.channel_id(),
            msp_id = %ctx.client_identity().msp_id,
            contract = contract.name(),
            transaction = tx.name,
            "invoking transaction"
        );
        contract.invoke(ctx, tx.name, args).await
    }

    fn resolve(&self, function: &str) -> Option<(&dyn Contract, &TransactionSchema)> {
        let (contract, tx_name) = match function.split_once(':') {
            Some((name, tx_name)) => (
                self.contracts.iter().find(|c| c.name() == name)?,
                tx_name,
            ),
            None => (self.contracts.first()?, function),
        };
        let tx = contract
            .transactions()
            .iter()
            .find(|t| t.name == tx_name)?;
        Some((contract.as_ref(), tx))
    }
}
