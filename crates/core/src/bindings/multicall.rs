use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Multicall {
        struct Call {
            address target;
            bytes callData;
        }

        function aggregate(Call[] memory calls) public returns (uint256 blockNumber, bytes[] memory returnData);
        function getEthBalance(address addr) public view returns (uint256 balance);
        function getBlockHash(uint256 blockNumber) public view returns (bytes32 blockHash);
        function getLastBlockHash() public view returns (bytes32 blockHash);
        function getCurrentBlockTimestamp() public view returns (uint256 timestamp);
        function getCurrentBlockDifficulty() public view returns (uint256 difficulty);
        function getCurrentBlockGasLimit() public view returns (uint256 gaslimit);
        function getCurrentBlockCoinbase() public view returns (address coinbase);
    }
}
