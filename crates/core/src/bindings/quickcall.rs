use alloy::sol;

sol! {
    #[sol(rpc)]
    contract QuickCall {
        function execute(
            uint256 gasLimitPerCall,
            uint256 resultSizeLimit,
            address[] calldata targets,
            bytes[] calldata data
        ) external view returns (uint256 blockNumber, uint64[] memory statuses, bytes[] memory results);
    }
}
