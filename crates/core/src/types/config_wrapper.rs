use crate::multicall::contracts;
use crate::multicall::version::Version;
use alloy::primitives::{Address, U256};
use dotenv::dotenv;
use eyre::{Result, eyre};
use std::{env, fs};
use toml::Value;

/// Reads `config.toml`:
///
/// ```toml
/// [rpc_endpoints]
/// ethereum_mainnet = "env:MAINNET_RPC_URL"
///
/// [multicall_address]
/// default = "0x5ba1e12693dc8f9c48aad8770482f4739beed696"
///
/// [multicall.cronos_mainnet]
/// version = "quickcall"
///
/// [quickcall]
/// gas_limit_per_call = 100000
/// result_size_limit = 2048
/// ```
pub struct ConfigWrapper {
    raw_config: Value,
}

impl ConfigWrapper {
    pub fn new(raw_config: Value) -> Self {
        Self { raw_config }
    }

    /// Loads `.env` first so `env:` endpoints can resolve.
    pub fn from_file(path: Option<&str>) -> Result<Self> {
        dotenv().ok();

        let config_content = if let Some(p) = path {
            fs::read_to_string(p)?
        } else {
            fs::read_to_string("config.toml")?
        };
        let raw_config: toml::Value = config_content.parse::<Value>()?;

        Ok(Self { raw_config })
    }

    /// Network specific value of `section.<network>`, falling back to `section.default`.
    fn get_network_value(&self, section: &str, network: &str) -> Option<&Value> {
        let section = self.raw_config.get(section)?;
        section.get(network).or_else(|| section.get("default"))
    }

    pub fn get_rpc_url(&self, network: &str) -> Result<String> {
        let url_str = self
            .raw_config
            .get("rpc_endpoints")
            .and_then(|r| r.get(network))
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("URL not found for network: {}", network))?;

        if let Some(env_var) = url_str.strip_prefix("env:") {
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        } else {
            Ok(url_str.to_string())
        }
    }

    /// Configured aggregator address, else the known deployment for `network`.
    pub fn get_multicall_address(&self, network: &str) -> Result<Address> {
        match self
            .get_network_value("multicall_address", network)
            .and_then(|v| v.as_str())
        {
            Some(address) => Ok(address.parse()?),
            None => contracts::lookup(network).ok_or_else(|| {
                eyre!("Multicall address not found for network: {}", network)
            }),
        }
    }

    pub fn get_multicall_version(&self, network: &str) -> Result<Version> {
        match self
            .get_network_value("multicall", network)
            .and_then(|m| m.get("version"))
        {
            Some(Value::String(tag)) => Ok(tag.parse()?),
            Some(Value::Integer(tag)) => {
                let tag = u8::try_from(*tag).map_err(|_| eyre!("Invalid version tag {}", tag))?;
                Ok(Version::try_from(tag)?)
            }
            Some(other) => Err(eyre!("Invalid multicall version: {}", other)),
            None => Ok(Version::V1),
        }
    }

    /// `(gas_limit_per_call, result_size_limit)`, `None` when not configured.
    pub fn get_quickcall_limits(&self) -> Result<(Option<U256>, Option<U256>)> {
        let quickcall = self.raw_config.get("quickcall");
        let read = |key: &str| -> Result<Option<U256>> {
            match quickcall.and_then(|q| q.get(key)) {
                None => Ok(None),
                Some(Value::Integer(v)) if *v >= 0 => Ok(Some(U256::from(*v as u64))),
                Some(Value::String(v)) => Ok(Some(v.parse::<U256>()?)),
                Some(other) => Err(eyre!("Invalid quickcall {}: {}", key, other)),
            }
        };

        Ok((read("gas_limit_per_call")?, read("result_size_limit")?))
    }
}
