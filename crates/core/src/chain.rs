use alloy::primitives::{Address, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::{BlockId, BlockNumberOrTag, TransactionRequest};
use alloy::transports::TransportError;
use std::future::Future;

/// The one I/O boundary of the crate: a read-only `eth_call` against some block.
///
/// Every alloy [`Provider`] is a `ChainClient`. Tests plug in recording stubs.
pub trait ChainClient: Send + Sync {
    fn eth_call(
        &self,
        tx: TransactionRequest,
        block: BlockId,
    ) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

impl<P> ChainClient for P
where
    P: Provider + Send + Sync,
{
    fn eth_call(
        &self,
        tx: TransactionRequest,
        block: BlockId,
    ) -> impl Future<Output = Result<Bytes, TransportError>> + Send {
        async move { self.call(&tx).block(block).await }
    }
}

/// Options forwarded as-is with every aggregator call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOpts {
    pub from: Option<Address>,
    /// Block to run the call against, latest when unset.
    pub block: Option<BlockId>,
}

impl CallOpts {
    pub fn at_block(number: u64) -> Self {
        Self {
            from: None,
            block: Some(BlockId::Number(BlockNumberOrTag::Number(number))),
        }
    }

    pub(crate) fn block_id(&self) -> BlockId {
        self.block
            .unwrap_or(BlockId::Number(BlockNumberOrTag::Latest))
    }
}
