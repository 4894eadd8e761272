pub mod call_data;
pub mod client;
pub mod contracts;
pub mod method_call;
pub mod results;
pub mod version;

pub use call_data::CallData;
pub use client::{Client, DEFAULT_GAS_LIMIT_PER_CALL, DEFAULT_RESULT_SIZE_LIMIT, Multicall, QuickCall};
pub use method_call::MethodCall;
pub use results::{AggregateResult, QuickCallResult, QuickCallResults};
pub use version::Version;
