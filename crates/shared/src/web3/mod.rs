pub mod contracts;
pub mod wallet;

pub use wallet::{Wallet, WalletProvider};
