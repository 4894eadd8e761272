use alloy::dyn_abi::DynSolValue;
use alloy::hex;
use multicall::{AggregateResult, QuickCallResults};
use serde_json::{Value, json};

/// JSON rendering of a decoded value. Integers are decimal strings so wide
/// values survive.
pub fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => json!(b),
        DynSolValue::Int(i, _) => json!(i.to_string()),
        DynSolValue::Uint(u, _) => json!(u.to_string()),
        DynSolValue::FixedBytes(word, size) => json!(hex::encode_prefixed(&word[..*size])),
        DynSolValue::Address(address) => json!(address.to_checksum(None)),
        DynSolValue::Function(function) => json!(hex::encode_prefixed(function.as_slice())),
        DynSolValue::Bytes(bytes) => json!(hex::encode_prefixed(bytes)),
        DynSolValue::String(s) => json!(s),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => Value::Array(values.iter().map(value_to_json).collect()),
        #[allow(unreachable_patterns)]
        other => json!(format!("{:?}", other)),
    }
}

fn optional_to_json(value: &Option<DynSolValue>) -> Value {
    value.as_ref().map(value_to_json).unwrap_or(Value::Null)
}

pub fn aggregate_to_json(result: &AggregateResult) -> Value {
    json!({
        "block_number": result.block_number.to_string(),
        "results": result.results.iter().map(optional_to_json).collect::<Vec<_>>(),
    })
}

pub fn quickcall_to_json(result: &QuickCallResults) -> Value {
    json!({
        "block_number": result.block_number.to_string(),
        "results": result
            .results
            .iter()
            .map(|r| json!({
                "status": r.status,
                "result": optional_to_json(&r.result),
                "return_data": hex::encode_prefixed(&r.return_data),
            }))
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U256, address};
    use multicall::QuickCallResult;

    #[test]
    fn test_values_render() {
        let value = DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(10u64).pow(U256::from(30u64)), 256),
            DynSolValue::Address(address!("0x5f2f11ad8656439d5c14d9b351f8b09cdac2a02d")),
            DynSolValue::Bytes(vec![0xde, 0xad]),
            DynSolValue::Bool(true),
        ]);
        assert_eq!(
            value_to_json(&value),
            json!([
                "1000000000000000000000000000000",
                "0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d",
                "0xdead",
                true
            ])
        );
    }

    #[test]
    fn test_quickcall_render() {
        let results = QuickCallResults {
            block_number: U256::from(50u64),
            results: vec![QuickCallResult {
                status: 0,
                result: None,
                return_data: Bytes::new(),
            }],
        };
        assert_eq!(
            quickcall_to_json(&results),
            json!({
                "block_number": "50",
                "results": [{ "status": 0, "result": null, "return_data": "0x" }],
            })
        );
    }
}
