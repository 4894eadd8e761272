//! One-off static calls: simulated against current state, never mined.

use crate::chain::ChainClient;
use crate::error::{MulticallError, Result};
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::{AccessList, BlockId, BlockNumberOrTag, TransactionRequest};
use log::debug;

/// Message fields for a static call.
///
/// `gas == 0` leaves the gas field unset so the node simulates with its own
/// (effectively unlimited) allowance.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    pub from: Address,
    pub to: Address,
    pub gas: u64,
    pub gas_price: Option<u128>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub value: Option<U256>,
    pub access_list: AccessList,
    pub block: Option<BlockId>,
}

impl Opts {
    pub fn to(to: Address) -> Self {
        Self {
            to,
            ..Default::default()
        }
    }

    fn into_request(self, input: Bytes) -> (TransactionRequest, BlockId) {
        let mut tx = TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.to)
            .with_input(input)
            .with_access_list(self.access_list);
        if self.gas != 0 {
            tx = tx.with_gas_limit(self.gas);
        }
        if let Some(gas_price) = self.gas_price {
            tx = tx.with_gas_price(gas_price);
        }
        if let Some(max_fee) = self.max_fee_per_gas {
            tx = tx.with_max_fee_per_gas(max_fee);
        }
        if let Some(tip) = self.max_priority_fee_per_gas {
            tx = tx.with_max_priority_fee_per_gas(tip);
        }
        if let Some(value) = self.value {
            tx = tx.with_value(value);
        }

        let block = self
            .block
            .unwrap_or(BlockId::Number(BlockNumberOrTag::Latest));
        (tx, block)
    }
}

/// Looks `name` up in `abi` and calls it statically.
///
/// Overloads are resolved by argument count, falling back to the first
/// declaration.
pub async fn call_static_with_name<C: ChainClient>(
    client: &C,
    abi: &JsonAbi,
    opts: Opts,
    name: &str,
    args: &[DynSolValue],
) -> Result<Vec<DynSolValue>> {
    let overloads = abi
        .function(name)
        .filter(|overloads| !overloads.is_empty())
        .ok_or_else(|| MulticallError::MethodNotFound(name.to_string()))?;
    let method = overloads
        .iter()
        .find(|f| f.inputs.len() == args.len())
        .unwrap_or(&overloads[0]);

    call_static_with_method(client, opts, method, args).await
}

/// Calls an already resolved function statically.
pub async fn call_static_with_method<C: ChainClient>(
    client: &C,
    opts: Opts,
    method: &Function,
    args: &[DynSolValue],
) -> Result<Vec<DynSolValue>> {
    let input = method
        .abi_encode_input(args)
        .map_err(|source| MulticallError::Encoding {
            method: method.signature(),
            source,
        })?;
    debug!("Static call {} on {}", method.signature(), opts.to);

    let (tx, block) = opts.into_request(Bytes::from(input));
    let raw = client.eth_call(tx, block).await?;

    method
        .abi_decode_output(&raw, true)
        .map_err(|e| MulticallError::decoding(method.signature(), e))
}
