pub mod client;
pub mod etherscan;
pub mod hashes;
pub mod rewards;
