use alloy::primitives::{Address, U256};
use clap::Args;
use eyre::Result;
use log::info;
use shared::funding::{auto_fund_check, FundCheck, FundingToken, TokenBalance};
use shared::network::NetworkProfile;
use shared::web3::contracts::implementations::link_token_contract::LinkToken;
use shared::web3::wallet::WalletProvider;
use std::str::FromStr;

use super::common::Context;

#[derive(Args, Debug)]
pub(crate) struct FundLinkArgs {
    /// Contract to fund (defaults to the recorded Betting deployment)
    #[arg(short = 'c', long)]
    contract: Option<String>,

    /// LINK token address (defaults to the network profile's)
    #[arg(long)]
    link_address: Option<String>,

    /// Amount in LINK base units (defaults to the network's fund amount)
    #[arg(short = 'm', long)]
    fund_amount: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct FundCheckArgs {
    /// Contract to check (defaults to the recorded Betting deployment)
    #[arg(short = 'c', long)]
    contract: Option<String>,

    /// Appended to the printed fund-link command
    #[arg(long, default_value = "")]
    additional_message: String,
}

fn link_token(
    profile: &NetworkProfile,
    link_address: Option<&str>,
    provider: WalletProvider,
) -> Result<LinkToken<WalletProvider>> {
    let address = match link_address {
        Some(address) => Address::from_str(address)?,
        None => profile.link_token.ok_or_else(|| {
            eyre::eyre!(
                "No LINK token configured for {}. Pass --link-address",
                profile.name
            )
        })?,
    };
    Ok(LinkToken::new(address, provider)?)
}

pub(crate) async fn fund_link(args: FundLinkArgs, ctx: &Context) -> Result<()> {
    let contract = ctx.contract_address(args.contract.as_deref())?;
    let session = ctx.connect().await?;
    let profile = session.table.profile_for(session.network.chain_id)?;

    let amount = match args.fund_amount.as_deref() {
        Some(amount) => U256::from_str(amount)?,
        None => profile.fund_amount,
    };
    if amount.is_zero() {
        eyre::bail!("Nothing to fund: the fund amount for {} is zero", profile.name);
    }

    let token = link_token(profile, args.link_address.as_deref(), session.wallet.provider())?
        .with_confirmations(session.network.confirmations());

    info!(
        "Funding contract {contract} on network {} with LINK token {}",
        session.network.name,
        token.address()
    );
    let tx = token.transfer(contract, amount).await?;
    info!("Contract {contract} funded with {amount} LINK base units. Transaction Hash: {tx}");

    let balance = token.balance_of(contract).await?;
    println!("LINK balance of {contract}: {balance}");
    Ok(())
}

pub(crate) async fn fund_check(args: FundCheckArgs, ctx: &Context) -> Result<()> {
    let contract = ctx.contract_address(args.contract.as_deref())?;
    let session = ctx.connect().await?;
    let profile = session.table.profile_for(session.network.chain_id)?;
    let token = link_token(profile, None, session.wallet.provider())?;

    let check = FundCheck {
        contract,
        chain_id: session.network.chain_id,
        network_name: session.network.external_name(),
        signer: session.wallet.address(),
        additional_message: &args.additional_message,
    };
    let eligible = auto_fund_check(&session.table, &token, &check).await?;
    println!("Auto-funding eligible: {eligible}");
    Ok(())
}
