use crate::error::{MulticallError, Result};
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes};

/// A single contract read: which contract, which function, which arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub address: Address,
    pub method: Function,
    pub args: Vec<DynSolValue>,
}

impl MethodCall {
    pub fn new(address: Address, method: Function, args: Vec<DynSolValue>) -> Self {
        Self {
            address,
            method,
            args,
        }
    }

    /// Builds a call from a human readable signature such as
    /// `balanceOf(address) returns (uint256)`.
    pub fn parse(address: Address, signature: &str, args: Vec<DynSolValue>) -> Result<Self> {
        let method = Function::parse(signature)
            .map_err(|_| MulticallError::InvalidSignature(signature.to_string()))?;
        Ok(Self::new(address, method, args))
    }

    /// Selector followed by the ABI encoded arguments.
    pub fn call_data(&self) -> Result<Bytes> {
        self.method
            .abi_encode_input(&self.args)
            .map(Bytes::from)
            .map_err(|source| MulticallError::Encoding {
                method: self.method.signature(),
                source,
            })
    }

    /// Decodes raw return data against the declared outputs.
    pub fn decode_output(&self, raw: &[u8]) -> Result<Vec<DynSolValue>> {
        self.method
            .abi_decode_output(raw, true)
            .map_err(|e| MulticallError::decoding(self.method.signature(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::dyn_abi::DynSolType;
    use alloy::primitives::{U256, address, hex};

    fn balance_of() -> Function {
        Function::parse("balanceOf(address account) returns (uint256)").unwrap()
    }

    #[test]
    fn test_call_data_is_selector_then_arguments() {
        let holder = address!("0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d");
        let call = MethodCall::new(
            address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            balance_of(),
            vec![DynSolValue::Address(holder)],
        );

        let data = call.call_data().unwrap();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &hex!("70a08231"));
        assert_eq!(&data[16..], holder.as_slice());
    }

    #[test]
    fn test_call_data_is_deterministic() {
        let call = MethodCall::new(
            Address::ZERO,
            balance_of(),
            vec![DynSolValue::Address(Address::repeat_byte(0x11))],
        );
        assert_eq!(call.call_data().unwrap(), call.call_data().unwrap());
    }

    #[test]
    fn test_wrong_argument_count_is_an_encoding_error() {
        let call = MethodCall::new(Address::ZERO, balance_of(), vec![]);
        let err = call.call_data().unwrap_err();
        assert!(matches!(err, MulticallError::Encoding { .. }));
    }

    #[test]
    fn test_wrong_argument_type_is_an_encoding_error() {
        let call = MethodCall::new(
            Address::ZERO,
            balance_of(),
            vec![DynSolValue::String("not an address".to_string())],
        );
        assert!(matches!(
            call.call_data(),
            Err(MulticallError::Encoding { .. })
        ));
    }

    #[test]
    fn test_decode_output_matches_declared_types() {
        let call = MethodCall::parse(
            Address::ZERO,
            "getReserves() returns (uint112, uint112, uint32)",
            vec![],
        )
        .unwrap();
        assert_eq!(call.call_data().unwrap().len(), 4);

        let raw = DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(1_000u64), 112),
            DynSolValue::Uint(U256::from(2_000u64), 112),
            DynSolValue::Uint(U256::from(42u64), 32),
        ])
        .abi_encode_params();

        let decoded = call.decode_output(&raw).unwrap();
        let types: Vec<DynSolType> = decoded.iter().filter_map(|v| v.as_type()).collect();
        assert_eq!(
            types,
            vec![
                DynSolType::Uint(112),
                DynSolType::Uint(112),
                DynSolType::Uint(32)
            ]
        );
        assert_eq!(decoded[2], DynSolValue::Uint(U256::from(42u64), 32));
    }

    #[test]
    fn test_parse_rejects_garbage_signature() {
        let err = MethodCall::parse(Address::ZERO, "balanceOf(address", vec![]).unwrap_err();
        assert!(matches!(err, MulticallError::InvalidSignature(_)));
    }

    #[test]
    fn test_decode_output_rejects_short_data() {
        let call = MethodCall::new(Address::ZERO, balance_of(), vec![]);
        assert!(matches!(
            call.decode_output(&[0u8; 5]),
            Err(MulticallError::Decoding { .. })
        ));
    }
}
