pub mod deploy;
pub mod funding;
pub mod interact;
pub mod network;
pub mod verify;
pub mod web3;
