//! Operator-facing guidance. Operators copy these lines verbatim, keep the formats stable.

use alloy::primitives::Address;

pub const INSUFFICIENT_LINK_MESSAGE: &str = "Account doesn't have enough LINK to fund contracts, or you're deploying to a network where auto funding isnt' done by default";

pub fn faucet_url(network_name: &str) -> String {
    format!("https://{network_name}.chain.link/")
}

pub fn faucet_message(network_name: &str) -> String {
    format!(
        "Please obtain LINK via the faucet at {}, then run the following command to fund contract with LINK:",
        faucet_url(network_name)
    )
}

pub fn fund_link_command(
    contract: Address,
    network_name: &str,
    additional_message: &str,
) -> String {
    format!(
        "npx hardhat fund-link --contract {contract} --network {network_name}{additional_message}"
    )
}

pub fn enter_command(network_name: &str) -> String {
    format!("yarn hardhat run scripts/enter.js --network {network_name}")
}

/// The three lines logged when a contract cannot be auto-funded.
pub fn guidance_lines(
    contract: Address,
    network_name: &str,
    additional_message: &str,
) -> [String; 3] {
    [
        INSUFFICIENT_LINK_MESSAGE.to_string(),
        faucet_message(network_name),
        fund_link_command(contract, network_name, additional_message),
    ]
}
