mod call_spec;
mod output;

use alloy::primitives::{Address, U256};
use alloy::providers::ProviderBuilder;
use alloy::rpc::types::{BlockId, BlockNumberOrTag};
use call_spec::{coerce_args, parse_call, parse_function};
use clap::{Args, Parser, Subcommand};
use eyre::{Result, eyre};
use log::debug;
use multicall::call_static::{self, call_static_with_method};
use multicall::types::config_wrapper::ConfigWrapper;
use multicall::{CallOpts, ChainClient, Client, Version, contracts};
use output::{aggregate_to_json, quickcall_to_json, value_to_json};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Endpoint {
    /// Network name, used for the RPC endpoint and the aggregator address
    #[arg(long = "network", short = 'n', default_value = "ethereum_mainnet")]
    network: String,

    /// Path to the config file (defaults to config.toml)
    #[arg(long = "config", short = 'c')]
    config: Option<String>,

    /// RPC URL, overrides the config file
    #[arg(long = "rpc-url", short = 'r')]
    rpc_url: Option<String>,

    /// Block number to call against, latest when omitted
    #[arg(long = "block", short = 'b')]
    block: Option<u64>,
}

#[derive(Args)]
struct Aggregator {
    #[command(flatten)]
    endpoint: Endpoint,

    /// Aggregator address, overrides the config file and the known deployments
    #[arg(long = "address", short = 'a')]
    address: Option<Address>,
}

#[derive(Subcommand)]
enum Commands {
    /// Batch calls through multicall v1
    Aggregate {
        #[command(flatten)]
        aggregator: Aggregator,

        /// ADDRESS:SIGNATURE[:ARG]..., repeat for every call; quote args containing ":"
        #[arg(long = "call", required = true)]
        calls: Vec<String>,
    },
    /// Batch calls through quickcall, tolerating individual reverts
    Execute {
        #[command(flatten)]
        aggregator: Aggregator,

        /// Gas limit for each call (default 60000)
        #[arg(long = "gas-limit")]
        gas_limit: Option<U256>,

        /// Maximum bytes of return data per call (default 1024)
        #[arg(long = "size-limit")]
        size_limit: Option<U256>,

        /// ADDRESS:SIGNATURE[:ARG]..., repeat for every call; quote args containing ":"
        #[arg(long = "call", required = true)]
        calls: Vec<String>,
    },
    /// Read block values exposed by multicall v1
    BlockInfo {
        #[command(flatten)]
        aggregator: Aggregator,
    },
    /// Call a single function statically
    CallStatic {
        #[command(flatten)]
        endpoint: Endpoint,

        /// Contract to call
        #[arg(long = "to")]
        to: Address,

        /// Sender of the simulated call
        #[arg(long = "from")]
        from: Option<Address>,

        /// Gas for the call, 0 lets the node decide
        #[arg(long = "gas", default_value_t = 0)]
        gas: u64,

        /// Value in wei
        #[arg(long = "value")]
        value: Option<U256>,

        /// e.g. "balanceOf(address) returns (uint256)"
        signature: String,

        args: Vec<String>,
    },
    /// List the known aggregator deployments
    Networks,
}

struct Resolved {
    rpc_url: String,
    config: Option<ConfigWrapper>,
    opts: CallOpts,
}

fn resolve_endpoint(endpoint: &Endpoint) -> Result<Resolved> {
    let config = match ConfigWrapper::from_file(endpoint.config.as_deref()) {
        Ok(config) => Some(config),
        Err(e) if endpoint.config.is_none() => {
            debug!("No config file loaded: {}", e);
            None
        }
        Err(e) => return Err(e),
    };

    let rpc_url = match (&endpoint.rpc_url, &config) {
        (Some(url), _) => url.clone(),
        (None, Some(config)) => config.get_rpc_url(&endpoint.network)?,
        (None, None) => return Err(eyre!("Pass --rpc-url or configure rpc_endpoints")),
    };

    let opts = match endpoint.block {
        Some(number) => CallOpts::at_block(number),
        None => CallOpts::default(),
    };

    Ok(Resolved {
        rpc_url,
        config,
        opts,
    })
}

async fn connect_client(
    aggregator: &Aggregator,
    version: Option<Version>,
) -> Result<(Client<impl ChainClient>, Resolved)> {
    let resolved = resolve_endpoint(&aggregator.endpoint)?;
    let network = aggregator.endpoint.network.as_str();

    let address = match (aggregator.address, &resolved.config) {
        (Some(address), _) => address,
        (None, Some(config)) => config.get_multicall_address(network)?,
        (None, None) => contracts::lookup(network)
            .ok_or_else(|| eyre!("Multicall address not found for network: {}", network))?,
    };
    let version = match (version, &resolved.config) {
        (Some(version), _) => version,
        (None, Some(config)) => config.get_multicall_version(network)?,
        (None, None) => Version::V1,
    };

    let provider = ProviderBuilder::new().on_builtin(&resolved.rpc_url).await?;
    Ok((Client::new(address, version, provider), resolved))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Aggregate { aggregator, calls } => {
            let methods = calls
                .iter()
                .map(|c| parse_call(c))
                .collect::<Result<Vec<_>>>()?;
            let (client, resolved) = connect_client(aggregator, Some(Version::V1)).await?;

            let result = client.aggregate(&resolved.opts, &methods).await?;
            println!("{}", serde_json::to_string_pretty(&aggregate_to_json(&result))?);
        }
        Commands::Execute {
            aggregator,
            gas_limit,
            size_limit,
            calls,
        } => {
            let methods = calls
                .iter()
                .map(|c| parse_call(c))
                .collect::<Result<Vec<_>>>()?;
            let (client, resolved) =
                connect_client(aggregator, Some(Version::QuickCall)).await?;

            let (configured_gas, configured_size) = match &resolved.config {
                Some(config) => config.get_quickcall_limits()?,
                None => (None, None),
            };
            let result = client
                .execute(
                    &resolved.opts,
                    gas_limit.or(configured_gas),
                    size_limit.or(configured_size),
                    &methods,
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&quickcall_to_json(&result))?);
        }
        Commands::BlockInfo { aggregator } => {
            let (client, resolved) = connect_client(aggregator, None).await?;
            let opts = &resolved.opts;

            let info = json!({
                "last_block_hash": client.get_last_block_hash(opts).await?.to_string(),
                "timestamp": client.get_current_block_timestamp(opts).await?.to_string(),
                "difficulty": client.get_current_block_difficulty(opts).await?.to_string(),
                "gas_limit": client.get_current_block_gas_limit(opts).await?.to_string(),
                "coinbase": client.get_current_block_coinbase(opts).await?.to_checksum(None),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::CallStatic {
            endpoint,
            to,
            from,
            gas,
            value,
            signature,
            args,
        } => {
            let method = parse_function(signature)?;
            let args = coerce_args(&method, args.iter().map(String::as_str).collect())?;
            let resolved = resolve_endpoint(endpoint)?;
            let provider = ProviderBuilder::new().on_builtin(&resolved.rpc_url).await?;

            let opts = call_static::Opts {
                from: from.unwrap_or(Address::ZERO),
                gas: *gas,
                value: *value,
                block: endpoint
                    .block
                    .map(|number| BlockId::Number(BlockNumberOrTag::Number(number))),
                ..call_static::Opts::to(*to)
            };
            let out = call_static_with_method(&provider, opts, &method, &args).await?;
            let out: Vec<_> = out.iter().map(value_to_json).collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Networks => {
            for (name, address) in contracts::NETWORKS {
                println!("{:<20} {}", name, address.to_checksum(None));
            }
        }
    }

    Ok(())
}
