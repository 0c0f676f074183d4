use alloy::primitives::utils::format_ether;
use alloy::providers::Provider;
use eyre::Result;
use shared::funding::TokenBalance;
use shared::interact::BettingOps;
use shared::web3::contracts::implementations::betting_contract::BettingContract;
use shared::web3::contracts::implementations::link_token_contract::LinkToken;

use super::common::Context;

pub(crate) async fn handle_command(ctx: &Context) -> Result<()> {
    let deployment = ctx.deployed_betting()?;
    let session = ctx.connect().await?;
    let profile = session.table.profile_for(session.network.chain_id)?;
    let address = deployment.record.address;

    let betting = BettingContract::new(address, session.wallet.provider())?;
    let entrance_fee = betting.entrance_fee().await?;
    let balance = session.wallet.provider().get_balance(address).await?;

    println!("{} at {}", deployment.record.contract_name, betting.address());
    println!("  network:      {}", session.network.name);
    println!("  game:         {}", deployment.record.args.game_description);
    println!(
        "  options:      1 = {}, 2 = {}",
        deployment.record.args.option1_name, deployment.record.args.option2_name
    );
    println!("  entrance fee: {} ETH", format_ether(entrance_fee));
    println!("  balance:      {} ETH", format_ether(balance));

    let signer_balance = session
        .wallet
        .get_balance()
        .await
        .map_err(|e| eyre::eyre!("Failed to get balance: {}", e))?;
    println!(
        "  signer:       {} ({} ETH)",
        session.wallet.address(),
        format_ether(signer_balance)
    );

    if let Some(link) = profile.link_token {
        let token = LinkToken::new(link, session.wallet.provider())?;
        let link_balance = token.balance_of(address).await?;
        println!("  LINK balance: {link_balance}");
    }
    Ok(())
}
