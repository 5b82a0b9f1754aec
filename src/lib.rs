//! # Roshan Asset
//!
//! A chaincode that keeps one kind of record, [`RoshanAsset`], under
//! caller-chosen keys in the world state of a permissioned ledger.
//!
//! The ledger runtime owns everything hard: ordering, endorsement,
//! commitment, persistence and rollback. This crate only consumes its state
//! store through the [`StateStore`] trait and guards four mutations with an
//! existence check.
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryStateStore::new());
//! let router = Router::new().register(RoshanAssetContract::new())?;
//!
//! let ctx = Context::new(store);
//! router
//!     .invoke(&ctx, "createRoshanAsset", &["1001".into(), "hello".into()])
//!     .await?;
//! let bytes = router.invoke(&ctx, "readRoshanAsset", &["1001".into()]).await?;
//! assert_eq!(bytes, br#"{"value":"hello"}"#);
//! ```
//!
//! ## Feature flags
//!
//! | Flag     | Default | Description                                  |
//! |----------|---------|----------------------------------------------|
//! | `sqlite` | ✓       | SQLite-backed [`StateStore`] via sqlx         |

pub mod adapters;
pub mod asset;
pub mod context;
pub mod contract;
pub mod error;
pub mod router;
pub mod schema;

pub use asset::RoshanAsset;
pub use context::{ClientIdentity, Context};
pub use contract::RoshanAssetContract;
pub use error::ContractError;
pub use router::{Contract, Router};
pub use schema::{ContractInfo, ContractMetadata};

use async_trait::async_trait;

/// Key-value world state, scoped to the transaction being served.
///
/// Implementors hand back `None` for keys that were never written or have
/// been deleted. Writes replace any prior value wholesale.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContractError>;
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), ContractError>;
    async fn delete_state(&self, key: &str) -> Result<(), ContractError>;
}
