use alloy::primitives::U256;
use clap::Args;
use eyre::Result;
use shared::interact::{enter_betting, DEFAULT_BET_OPTION};
use shared::web3::contracts::implementations::betting_contract::BettingContract;

use super::common::Context;

#[derive(Args, Debug)]
pub(crate) struct EnterArgs {
    /// Option to bet on
    #[arg(short = 'o', long, default_value_t = DEFAULT_BET_OPTION)]
    option: u64,
}

pub(crate) async fn handle_command(args: EnterArgs, ctx: &Context) -> Result<()> {
    let deployment = ctx.deployed_betting()?;
    let session = ctx.connect().await?;

    let betting = BettingContract::new(deployment.record.address, session.wallet.provider())?;
    let tx = enter_betting(&betting, U256::from(args.option)).await?;
    println!("Transaction: {tx}");
    Ok(())
}
