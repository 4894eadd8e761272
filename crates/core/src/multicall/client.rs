use super::call_data::{method_calls_to_call_data, split_targets};
use super::contracts;
use super::method_call::MethodCall;
use super::results::{
    AggregateResult, QuickCallResult, QuickCallResults, check_result_count, decode_result,
    unpack_results,
};
use super::version::Version;
use crate::bindings::multicall::Multicall as MulticallContract;
use crate::bindings::quickcall::QuickCall as QuickCallContract;
use crate::chain::{CallOpts, ChainClient};
use crate::error::{MulticallError, Result};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use log::{debug, info};

/// Gas each quickcall sub-call may burn when the caller does not say otherwise.
pub const DEFAULT_GAS_LIMIT_PER_CALL: U256 = U256::from_limbs([60_000, 0, 0, 0]);
/// Bytes of return data kept per quickcall sub-call by default.
pub const DEFAULT_RESULT_SIZE_LIMIT: U256 = U256::from_limbs([1024, 0, 0, 0]);

/// Sends `call` to `address` and decodes the reply as its return type.
async fn call_contract<Chain, C>(
    chain: &Chain,
    address: Address,
    opts: &CallOpts,
    call: C,
) -> Result<C::Return>
where
    Chain: ChainClient,
    C: SolCall,
{
    let mut tx = TransactionRequest::default()
        .with_to(address)
        .with_input(Bytes::from(call.abi_encode()));
    if let Some(from) = opts.from {
        tx = tx.with_from(from);
    }

    let raw = chain.eth_call(tx, opts.block_id()).await?;
    C::abi_decode_returns(&raw, true).map_err(|e| MulticallError::decoding(C::SIGNATURE, e))
}

/// Client for the original multicall contract.
#[derive(Debug, Clone)]
pub struct Multicall<C> {
    chain: C,
    address: Address,
}

impl<C: ChainClient> Multicall<C> {
    pub fn new(address: Address, chain: C) -> Self {
        info!("Binding multicall v1 at {}", address);
        Self { chain, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Makes multiple calls to the target contracts in one `eth_call` and
    /// decodes every result against its method's outputs.
    pub async fn aggregate(
        &self,
        opts: &CallOpts,
        methods: &[MethodCall],
    ) -> Result<AggregateResult> {
        let calls = method_calls_to_call_data(methods)?;
        debug!(
            "Aggregating {} call(s) through {}",
            calls.len(),
            self.address
        );

        let out = call_contract(
            &self.chain,
            self.address,
            opts,
            MulticallContract::aggregateCall {
                calls: calls.into_iter().map(Into::into).collect(),
            },
        )
        .await?;

        Ok(AggregateResult {
            block_number: out.blockNumber,
            results: unpack_results(&out.returnData, methods)?,
        })
    }

    pub async fn get_eth_balance(&self, opts: &CallOpts, address: Address) -> Result<U256> {
        let call = MulticallContract::getEthBalanceCall { addr: address };
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .balance)
    }

    pub async fn get_block_hash(&self, opts: &CallOpts, block_number: U256) -> Result<B256> {
        let call = MulticallContract::getBlockHashCall {
            blockNumber: block_number,
        };
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .blockHash)
    }

    pub async fn get_last_block_hash(&self, opts: &CallOpts) -> Result<B256> {
        let call = MulticallContract::getLastBlockHashCall {};
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .blockHash)
    }

    pub async fn get_current_block_timestamp(&self, opts: &CallOpts) -> Result<U256> {
        let call = MulticallContract::getCurrentBlockTimestampCall {};
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .timestamp)
    }

    pub async fn get_current_block_difficulty(&self, opts: &CallOpts) -> Result<U256> {
        let call = MulticallContract::getCurrentBlockDifficultyCall {};
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .difficulty)
    }

    pub async fn get_current_block_gas_limit(&self, opts: &CallOpts) -> Result<U256> {
        let call = MulticallContract::getCurrentBlockGasLimitCall {};
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .gaslimit)
    }

    pub async fn get_current_block_coinbase(&self, opts: &CallOpts) -> Result<Address> {
        let call = MulticallContract::getCurrentBlockCoinbaseCall {};
        Ok(call_contract(&self.chain, self.address, opts, call)
            .await?
            .coinbase)
    }
}

/// Client for the quickcall contract.
#[derive(Debug, Clone)]
pub struct QuickCall<C> {
    chain: C,
    address: Address,
}

impl<C: ChainClient> QuickCall<C> {
    pub fn new(address: Address, chain: C) -> Self {
        info!("Binding quickcall at {}", address);
        Self { chain, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Makes multiple calls, each capped by `gas_limit_per_call` and with its
    /// return data truncated to `result_size_limit` bytes. A sub-call that
    /// reverts does not fail the batch, it gets a zero status instead.
    pub async fn execute(
        &self,
        opts: &CallOpts,
        gas_limit_per_call: Option<U256>,
        result_size_limit: Option<U256>,
        methods: &[MethodCall],
    ) -> Result<QuickCallResults> {
        let gas_limit_per_call = gas_limit_per_call.unwrap_or(DEFAULT_GAS_LIMIT_PER_CALL);
        let result_size_limit = result_size_limit.unwrap_or(DEFAULT_RESULT_SIZE_LIMIT);

        let (targets, data) = split_targets(method_calls_to_call_data(methods)?);
        debug!(
            "Executing {} call(s) through {} (gas per call {}, size limit {})",
            targets.len(),
            self.address,
            gas_limit_per_call,
            result_size_limit
        );

        let out = call_contract(
            &self.chain,
            self.address,
            opts,
            QuickCallContract::executeCall {
                gasLimitPerCall: gas_limit_per_call,
                resultSizeLimit: result_size_limit,
                targets,
                data,
            },
        )
        .await?;

        check_result_count(methods.len(), out.statuses.len())?;
        check_result_count(methods.len(), out.results.len())?;

        // A failed sub-call leaves revert data or nothing, so it is not decoded.
        let mut results = Vec::with_capacity(methods.len());
        for ((status, return_data), method) in
            out.statuses.into_iter().zip(out.results).zip(methods)
        {
            let result = if status == 0 {
                None
            } else {
                decode_result(&return_data, method)?
            };
            results.push(QuickCallResult {
                status,
                result,
                return_data,
            });
        }

        let failed = results.iter().filter(|r| r.is_status_zero()).count();
        if failed > 0 {
            info!("{} of {} quickcall sub-call(s) failed", failed, results.len());
        }

        Ok(QuickCallResults {
            block_number: out.blockNumber,
            results,
        })
    }
}

/// A client whose version is only known at runtime, e.g. from configuration.
///
/// Calls that need the other contract fail with [`MulticallError::MulticallRequired`]
/// or [`MulticallError::QuickCallRequired`] before anything is sent.
#[derive(Debug, Clone)]
pub enum Client<C> {
    Multicall(Multicall<C>),
    QuickCall(QuickCall<C>),
}

impl<C: ChainClient> Client<C> {
    pub fn new(address: Address, version: Version, chain: C) -> Self {
        match version {
            Version::V1 => Client::Multicall(Multicall::new(address, chain)),
            Version::QuickCall => Client::QuickCall(QuickCall::new(address, chain)),
        }
    }

    /// Binds the registry deployment for `network`.
    pub fn for_network(network: &str, version: Version, chain: C) -> Result<Self> {
        let address = contracts::lookup(network)
            .ok_or_else(|| MulticallError::UnknownNetwork(network.to_string()))?;
        Ok(Self::new(address, version, chain))
    }

    pub fn version(&self) -> Version {
        match self {
            Client::Multicall(_) => Version::V1,
            Client::QuickCall(_) => Version::QuickCall,
        }
    }

    pub fn address(&self) -> Address {
        match self {
            Client::Multicall(client) => client.address(),
            Client::QuickCall(client) => client.address(),
        }
    }

    fn multicall(&self) -> Result<&Multicall<C>> {
        match self {
            Client::Multicall(client) => Ok(client),
            Client::QuickCall(_) => Err(MulticallError::MulticallRequired),
        }
    }

    fn quickcall(&self) -> Result<&QuickCall<C>> {
        match self {
            Client::QuickCall(client) => Ok(client),
            Client::Multicall(_) => Err(MulticallError::QuickCallRequired),
        }
    }

    pub async fn aggregate(
        &self,
        opts: &CallOpts,
        methods: &[MethodCall],
    ) -> Result<AggregateResult> {
        self.multicall()?.aggregate(opts, methods).await
    }

    pub async fn execute(
        &self,
        opts: &CallOpts,
        gas_limit_per_call: Option<U256>,
        result_size_limit: Option<U256>,
        methods: &[MethodCall],
    ) -> Result<QuickCallResults> {
        self.quickcall()?
            .execute(opts, gas_limit_per_call, result_size_limit, methods)
            .await
    }

    // Block getters are only deployed on multicall v1.

    pub async fn get_eth_balance(&self, opts: &CallOpts, address: Address) -> Result<U256> {
        self.multicall()?.get_eth_balance(opts, address).await
    }

    pub async fn get_block_hash(&self, opts: &CallOpts, block_number: U256) -> Result<B256> {
        self.multicall()?.get_block_hash(opts, block_number).await
    }

    pub async fn get_last_block_hash(&self, opts: &CallOpts) -> Result<B256> {
        self.multicall()?.get_last_block_hash(opts).await
    }

    pub async fn get_current_block_timestamp(&self, opts: &CallOpts) -> Result<U256> {
        self.multicall()?.get_current_block_timestamp(opts).await
    }

    pub async fn get_current_block_difficulty(&self, opts: &CallOpts) -> Result<U256> {
        self.multicall()?.get_current_block_difficulty(opts).await
    }

    pub async fn get_current_block_gas_limit(&self, opts: &CallOpts) -> Result<U256> {
        self.multicall()?.get_current_block_gas_limit(opts).await
    }

    pub async fn get_current_block_coinbase(&self, opts: &CallOpts) -> Result<Address> {
        self.multicall()?.get_current_block_coinbase(opts).await
    }
}
