use eyre::Result;
use log::info;
use shared::deploy::front_end::update_front_end;

use super::common::Context;

pub(crate) fn handle_command(ctx: &Context) -> Result<()> {
    let deployment = ctx.deployed_betting()?;
    let paths = &ctx.config.paths;

    info!("Updating front end...");
    let addresses = update_front_end(
        &deployment.record,
        &deployment.abi,
        &paths.front_end_contracts,
        &paths.front_end_abi,
    )?;
    info!("Front end written!");

    let known = addresses
        .get(&deployment.record.chain_id.to_string())
        .map(Vec::len)
        .unwrap_or_default();
    println!(
        "Wrote {} ({known} address(es) for chain id {}) and {}",
        paths.front_end_contracts.display(),
        deployment.record.chain_id,
        paths.front_end_abi.display()
    );
    Ok(())
}
