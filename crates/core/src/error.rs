use alloy::dyn_abi;
use alloy::transports::TransportError;
use thiserror::Error;

/// Everything that can abort a batch, a getter or a static call.
///
/// Sub-calls that revert inside a successful quickcall batch are not errors,
/// they come back as results with a zero status.
#[derive(Debug, Error)]
pub enum MulticallError {
    #[error("failed to encode call data for {method}: {source}")]
    Encoding {
        method: String,
        #[source]
        source: dyn_abi::Error,
    },

    #[error("unknown multicall version {0}")]
    UnknownVersion(String),

    #[error("no known multicall deployment for network {0}")]
    UnknownNetwork(String),

    #[error("multicall is required for this function")]
    MulticallRequired,

    #[error("quickcall is required for this function")]
    QuickCallRequired,

    #[error("unexpected number of results, expected {expected} but got {actual}")]
    ResultCountMismatch { expected: usize, actual: usize },

    #[error("failed to decode return data of {method}: {source}")]
    Decoding {
        method: String,
        #[source]
        source: dyn_abi::Error,
    },

    #[error("invalid function signature {0}")]
    InvalidSignature(String),

    #[error("method {0} not found")]
    MethodNotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl MulticallError {
    pub(crate) fn decoding(method: impl Into<String>, source: impl Into<dyn_abi::Error>) -> Self {
        Self::Decoding {
            method: method.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = MulticallError> = std::result::Result<T, E>;
