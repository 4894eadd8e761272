use alloy::dyn_abi::{DynSolValue, Specifier};
use alloy::json_abi::Function;
use alloy::primitives::Address;
use eyre::{Result, eyre};
use multicall::MethodCall;

/// Parses `ADDRESS:SIGNATURE[:ARG]...`, e.g.
/// `0xA0b8...eB48:balanceOf(address) returns (uint256):0x5F2F...A02d`.
///
/// An argument containing `:` must be wrapped in double quotes.
pub fn parse_call(spec: &str) -> Result<MethodCall> {
    let (address, rest) = spec
        .split_once(':')
        .ok_or_else(|| eyre!("Expected ADDRESS:SIGNATURE[:ARG]..., got {}", spec))?;
    let address: Address = address
        .trim()
        .parse()
        .map_err(|e| eyre!("Invalid address {}: {}", address, e))?;

    let mut parts = split_fields(rest)?.into_iter();
    let signature = parts.next().unwrap_or_default();
    let method = parse_function(&signature)?;
    let args: Vec<String> = parts.collect();
    let args = coerce_args(&method, args.iter().map(String::as_str).collect())?;

    Ok(MethodCall::new(address, method, args))
}

/// Splits on `:` outside of double quotes, dropping the quotes.
fn split_fields(raw: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in raw.chars() {
        match c {
            '"' => quoted = !quoted,
            ':' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if quoted {
        return Err(eyre!("Unterminated quote in {}", raw));
    }
    fields.push(current);
    Ok(fields)
}

pub fn parse_function(signature: &str) -> Result<Function> {
    Function::parse(signature.trim())
        .map_err(|e| eyre!("Invalid function signature {}: {}", signature, e))
}

/// Coerces command line strings into the function's declared input types.
pub fn coerce_args(method: &Function, raw: Vec<&str>) -> Result<Vec<DynSolValue>> {
    if raw.len() != method.inputs.len() {
        return Err(eyre!(
            "{} takes {} argument(s), got {}",
            method.signature(),
            method.inputs.len(),
            raw.len()
        ));
    }

    method
        .inputs
        .iter()
        .zip(raw)
        .map(|(param, value)| {
            let ty = param.resolve()?;
            Ok(ty.coerce_str(value.trim())?)
        })
        .collect()
}
