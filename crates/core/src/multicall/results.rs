use super::method_call::MethodCall;
use crate::error::{MulticallError, Result};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Bytes, U256};

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub block_number: U256,
    /// One entry per submitted method, in submission order. `None` when the
    /// call returned no data. Methods declaring several outputs come back as
    /// a single [`DynSolValue::Tuple`].
    pub results: Vec<Option<DynSolValue>>,
}

impl AggregateResult {
    /// Expands multi-output tuples in place, so a method with `n` declared
    /// outputs contributes `n` consecutive entries.
    pub fn flattened(&self, methods: &[MethodCall]) -> Vec<Option<DynSolValue>> {
        let mut flat = Vec::with_capacity(self.results.len());
        for (result, method) in self.results.iter().zip(methods) {
            match result {
                Some(DynSolValue::Tuple(values)) if method.method.outputs.len() != 1 => {
                    flat.extend(values.iter().cloned().map(Some))
                }
                other => flat.push(other.clone()),
            }
        }
        flat
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickCallResult {
    pub status: u64,
    pub result: Option<DynSolValue>,
    /// What the aggregator returned for this call, before decoding.
    pub return_data: Bytes,
}

impl QuickCallResult {
    /// Typically, a status of zero means the call has reverted or failed.
    pub fn is_status_zero(&self) -> bool {
        self.status == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickCallResults {
    pub block_number: U256,
    pub results: Vec<QuickCallResult>,
}

impl QuickCallResults {
    pub fn failed(&self) -> impl Iterator<Item = (usize, &QuickCallResult)> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, result)| result.is_status_zero())
    }
}

pub(crate) fn check_result_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(MulticallError::ResultCountMismatch { expected, actual });
    }
    Ok(())
}

/// Decodes the aggregator's raw return array, matching entries to methods by
/// position only.
pub fn unpack_results(raw: &[Bytes], methods: &[MethodCall]) -> Result<Vec<Option<DynSolValue>>> {
    check_result_count(methods.len(), raw.len())?;

    let mut results = vec![None; methods.len()];
    for (i, (data, method)) in raw.iter().zip(methods).enumerate() {
        results[i] = decode_result(data, method)?;
    }
    Ok(results)
}

/// Decodes one raw result against its method's outputs. No data decodes to `None`.
pub fn decode_result(data: &Bytes, method: &MethodCall) -> Result<Option<DynSolValue>> {
    if data.is_empty() {
        return Ok(None);
    }

    let mut values = method.decode_output(data)?;
    Ok(Some(if values.len() == 1 {
        values.remove(0)
    } else {
        DynSolValue::Tuple(values)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::json_abi::Function;
    use alloy::primitives::Address;

    fn method(signature: &str) -> MethodCall {
        MethodCall::new(Address::ZERO, Function::parse(signature).unwrap(), vec![])
    }

    fn uint(value: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(value), 256)
    }

    #[test]
    fn test_empty_raw_result_is_none() {
        let methods = [
            method("totalSupply() returns (uint256)"),
            method("decimals() returns (uint8)"),
        ];
        let raw = vec![Bytes::new(), Bytes::from(uint(7).abi_encode())];

        let results = unpack_results(&raw, &methods).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], None);
        assert_eq!(results[1], Some(DynSolValue::Uint(U256::from(7u64), 8)));
    }

    #[test]
    fn test_count_mismatch() {
        let methods = [
            method("a() returns (uint256)"),
            method("b() returns (uint256)"),
            method("c() returns (uint256)"),
        ];
        let raw = vec![
            Bytes::from(uint(1).abi_encode()),
            Bytes::from(uint(2).abi_encode()),
        ];

        let err = unpack_results(&raw, &methods).unwrap_err();
        assert!(matches!(
            err,
            MulticallError::ResultCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_multiple_outputs_are_grouped_then_flattened() {
        let methods = [
            method("getReserves() returns (uint256, uint256)"),
            method("totalSupply() returns (uint256)"),
        ];
        let raw = vec![
            Bytes::from(DynSolValue::Tuple(vec![uint(10), uint(20)]).abi_encode_params()),
            Bytes::from(uint(30).abi_encode()),
        ];

        let results = unpack_results(&raw, &methods).unwrap();
        assert_eq!(
            results,
            vec![
                Some(DynSolValue::Tuple(vec![uint(10), uint(20)])),
                Some(uint(30))
            ]
        );

        let aggregate = AggregateResult {
            block_number: U256::from(1u64),
            results,
        };
        assert_eq!(
            aggregate.flattened(&methods),
            vec![Some(uint(10)), Some(uint(20)), Some(uint(30))]
        );
    }

    #[test]
    fn test_single_tuple_output_is_not_flattened() {
        let methods = [method("pair() returns ((uint256,uint256))")];
        let value = DynSolValue::Tuple(vec![uint(1), uint(2)]);
        let raw = vec![Bytes::from(
            DynSolValue::Tuple(vec![value.clone()]).abi_encode_params(),
        )];

        let aggregate = AggregateResult {
            block_number: U256::ZERO,
            results: unpack_results(&raw, &methods).unwrap(),
        };
        assert_eq!(aggregate.results, vec![Some(value.clone())]);
        assert_eq!(aggregate.flattened(&methods), vec![Some(value)]);
    }

    #[test]
    fn test_undecodable_result_fails() {
        let methods = [method("name() returns (string)")];
        let raw = vec![Bytes::from(vec![0xff; 7])];
        assert!(matches!(
            unpack_results(&raw, &methods),
            Err(MulticallError::Decoding { .. })
        ));
    }

    #[test]
    fn test_status_zero() {
        let failed = QuickCallResult {
            status: 0,
            result: None,
            return_data: Bytes::new(),
        };
        let ok = QuickCallResult {
            status: 1,
            result: Some(uint(1)),
            return_data: Bytes::from(uint(1).abi_encode()),
        };
        assert!(failed.is_status_zero());
        assert!(!ok.is_status_zero());

        let results = QuickCallResults {
            block_number: U256::ZERO,
            results: vec![ok, failed.clone()],
        };
        let failures: Vec<_> = results.failed().collect();
        assert_eq!(failures, vec![(1, &failed)]);
    }
}
