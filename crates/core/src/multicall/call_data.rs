use super::method_call::MethodCall;
use crate::bindings::multicall::Multicall;
use crate::error::Result;
use alloy::primitives::{Address, Bytes};

/// The `(target, callData)` pair the aggregator contracts consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    pub target: Address,
    pub call_data: Bytes,
}

impl CallData {
    pub fn new(method: &MethodCall) -> Result<Self> {
        Ok(Self {
            target: method.address,
            call_data: method.call_data()?,
        })
    }
}

impl From<CallData> for Multicall::Call {
    fn from(call: CallData) -> Self {
        Multicall::Call {
            target: call.target,
            callData: call.call_data,
        }
    }
}

/// Encodes every method, in order. The first failure aborts the whole batch.
pub fn method_calls_to_call_data(methods: &[MethodCall]) -> Result<Vec<CallData>> {
    methods.iter().map(CallData::new).collect()
}

/// Splits a batch into the parallel `targets` and `data` arrays quickcall expects.
pub fn split_targets(calls: Vec<CallData>) -> (Vec<Address>, Vec<Bytes>) {
    calls
        .into_iter()
        .map(|call| (call.target, call.call_data))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MulticallError;
    use alloy::dyn_abi::DynSolValue;
    use alloy::json_abi::Function;

    fn total_supply(token: Address) -> MethodCall {
        MethodCall::new(
            token,
            Function::parse("totalSupply() returns (uint256)").unwrap(),
            vec![],
        )
    }

    #[test]
    fn test_batch_keeps_order() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let calls = method_calls_to_call_data(&[total_supply(a), total_supply(b)]).unwrap();

        let (targets, data) = split_targets(calls);
        assert_eq!(targets, vec![a, b]);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0], data[1]);
    }

    #[test]
    fn test_one_bad_method_fails_the_batch() {
        let bad = MethodCall::new(
            Address::ZERO,
            Function::parse("balanceOf(address) returns (uint256)").unwrap(),
            vec![DynSolValue::Bool(true)],
        );
        let err = method_calls_to_call_data(&[total_supply(Address::ZERO), bad]).unwrap_err();
        assert!(matches!(err, MulticallError::Encoding { .. }));
    }

    #[test]
    fn test_into_aggregator_struct() {
        let call = CallData::new(&total_supply(Address::repeat_byte(0x01))).unwrap();
        let wire: Multicall::Call = call.clone().into();
        assert_eq!(wire.target, call.target);
        assert_eq!(wire.callData, call.call_data);
    }
}
