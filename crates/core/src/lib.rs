//! Batches contract reads through an on-chain aggregator (multicall v1 or
//! quickcall) and decodes each result back against its method's outputs.
//!
//! ```ignore
//! let provider = ProviderBuilder::new().on_builtin(&rpc_url).await?;
//! let client = Multicall::new(contracts::ETHEREUM_MAINNET, provider);
//! let result = client.aggregate(&CallOpts::default(), &methods).await?;
//! ```

pub mod bindings;
pub mod call_static;
pub mod chain;
pub mod error;
pub mod multicall;
pub mod types;

pub use chain::{CallOpts, ChainClient};
pub use error::MulticallError;
pub use multicall::contracts;
pub use multicall::{
    AggregateResult, CallData, Client, MethodCall, Multicall, QuickCall, QuickCallResult,
    QuickCallResults, Version,
};
