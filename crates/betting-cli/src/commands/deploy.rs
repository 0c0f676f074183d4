use clap::Args;
use eyre::Result;
use log::{info, warn};
use shared::deploy::front_end::update_front_end;
use shared::deploy::orchestrator::{FundingOutcome, VerificationOutcome};
use shared::deploy::{
    BuildInfo, ContractArtifact, DeployOrchestrator, DeploySettings, RpcDeployer,
};
use shared::funding::FundingToken;
use shared::network::NetworkProfile;
use shared::verify::{EtherscanVerifier, SourceVerifier, VerificationSource};
use shared::web3::contracts::implementations::link_token_contract::LinkToken;
use shared::web3::wallet::WalletProvider;
use std::path::PathBuf;

use super::common::Context;

#[derive(Args, Debug)]
pub(crate) struct DeployArgs {
    /// Compiled contract artifact (overrides config)
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Build-info file used for explorer verification (overrides config)
    #[arg(long)]
    build_info: Option<PathBuf>,

    /// Transfer the network's fund amount of LINK to the new contract when possible
    #[arg(long)]
    auto_fund: bool,

    /// Do not submit the source to the block explorer
    #[arg(long)]
    skip_verify: bool,

    /// Also write the front-end address and ABI files
    #[arg(long)]
    update_front_end: bool,

    /// Appended to the printed fund-link command
    #[arg(long, default_value = "")]
    additional_message: String,
}

fn explorer_verifier(
    profile: &NetworkProfile,
    artifact: &ContractArtifact,
    build_info: Option<&PathBuf>,
) -> Result<Option<EtherscanVerifier>> {
    let Some(api_url) = &profile.explorer_api_url else {
        return Ok(None);
    };
    let Some(path) = build_info else {
        warn!("No build-info file configured, the contract cannot be verified");
        return Ok(None);
    };
    let build_info = BuildInfo::load(path)?;
    let source = VerificationSource::new(artifact, &build_info);
    Ok(Some(EtherscanVerifier::new(api_url.clone(), source)))
}

pub(crate) async fn handle_command(args: DeployArgs, ctx: &Context) -> Result<()> {
    let session = ctx.connect().await?;
    let network = &session.network;
    let profile = session.table.profile_for(network.chain_id)?;

    let artifact_path = args
        .artifact
        .unwrap_or_else(|| ctx.config.paths.artifact.clone());
    let artifact = ContractArtifact::load(&artifact_path)?;

    let deployer = RpcDeployer::new(session.wallet.provider(), session.wallet.address());

    let verifier = if args.skip_verify || network.is_development() {
        None
    } else {
        let build_info = args.build_info.or_else(|| ctx.config.paths.build_info.clone());
        explorer_verifier(profile, &artifact, build_info.as_ref())?
    };

    let link_token: Option<LinkToken<WalletProvider>> = match profile.link_token {
        Some(address) if args.auto_fund => Some(
            LinkToken::new(address, session.wallet.provider())?
                .with_confirmations(network.confirmations()),
        ),
        _ => None,
    };

    let mut orchestrator = DeployOrchestrator::new(&session.table, &deployer);
    if let Some(verifier) = &verifier {
        orchestrator = orchestrator.with_verifier(verifier as &dyn SourceVerifier);
    }
    if let Some(token) = &link_token {
        orchestrator =
            orchestrator.with_funding(token as &dyn FundingToken, session.wallet.address());
    }

    let settings = DeploySettings {
        etherscan_api_key: if args.skip_verify {
            None
        } else {
            ctx.config.etherscan_api_key.clone()
        },
        auto_fund: args.auto_fund,
        additional_message: args.additional_message,
    };

    let outcome = orchestrator
        .deploy(
            network,
            &artifact.contract_name,
            artifact.bytecode.clone(),
            &settings,
        )
        .await?;

    let path = ctx.store().save(&outcome.record, &artifact.abi)?;
    info!("Deployment saved to {}", path.display());

    if let VerificationOutcome::Failed(reason) = &outcome.verification {
        println!("Verification failed: {reason}");
    }

    if args.update_front_end {
        info!("Updating front end...");
        update_front_end(
            &outcome.record,
            &artifact.abi,
            &ctx.config.paths.front_end_contracts,
            &ctx.config.paths.front_end_abi,
        )?;
        info!("Front end written!");
    }

    println!(
        "{} deployed at {} on {}",
        outcome.record.contract_name, outcome.record.address, network.name
    );

    match outcome.funding {
        FundingOutcome::Funded(tx) => println!("Funded with LINK in transaction {tx}"),
        FundingOutcome::Ineligible(_) => println!("Contract was not auto-funded"),
        FundingOutcome::NotRequested
        | FundingOutcome::NoToken
        | FundingOutcome::NoFundingAccount => {}
        // The record is already saved.
        FundingOutcome::Failed(reason) => eyre::bail!("Auto-funding failed: {reason}"),
    }
    Ok(())
}
