pub mod multicall;
pub mod quickcall;
