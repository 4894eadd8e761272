//! Known aggregator deployments. No liveness check is done on any of these.

use alloy::primitives::{Address, address};

pub const ETHEREUM_MAINNET: Address = address!("0x5ba1e12693dc8f9c48aad8770482f4739beed696");
pub const KOVAN: Address = address!("0x5ba1e12693dc8f9c48aad8770482f4739beed696");
pub const RINKEBY: Address = address!("0x5ba1e12693dc8f9c48aad8770482f4739beed696");
pub const GORLI: Address = address!("0x5ba1e12693dc8f9c48aad8770482f4739beed696");
pub const ROPSTEN: Address = address!("0x5ba1e12693dc8f9c48aad8770482f4739beed696");
pub const BSC_MAINNET: Address = address!("0x41263cba59eb80dc200f3e2544eda4ed6a90e76c");
pub const BSC_TESTNET: Address = address!("0xae11C5B5f29A6a25e955F0CB8ddCc416f522AF5C");
pub const CRONOS_MAINNET: Address = address!("0xF33d2E47001ddbD7b71301363f68F57e318Bd4c8");
pub const CRONOS_TESTNET: Address = address!("0x2F953EA963E0243528186b3C92ea86355af532eb");

/// Quickcall, not multicall v1.
pub const CRONOS_QUICK_CALL: Address = address!("0x0F278822981A28b1Ecd4E790c414FAC0d52b6B44");

pub const NETWORKS: &[(&str, Address)] = &[
    ("ethereum_mainnet", ETHEREUM_MAINNET),
    ("kovan", KOVAN),
    ("rinkeby", RINKEBY),
    ("gorli", GORLI),
    ("ropsten", ROPSTEN),
    ("bsc_mainnet", BSC_MAINNET),
    ("bsc_testnet", BSC_TESTNET),
    ("cronos_mainnet", CRONOS_MAINNET),
    ("cronos_testnet", CRONOS_TESTNET),
    ("cronos_quick_call", CRONOS_QUICK_CALL),
];

/// Case-insensitive; `-` and `_` are interchangeable.
pub fn lookup(network: &str) -> Option<Address> {
    let wanted = network.trim().to_ascii_lowercase().replace('-', "_");
    NETWORKS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, address)| *address)
}
