use alloy::primitives::{Address, Bytes, TxHash};
use log::{info, warn};

use super::error::DeployError;
use super::{ContractDeployer, DeployRequest, DeploymentRecord};
use crate::funding::guidance::enter_command;
use crate::funding::{assess_auto_fund, FundCheck, FundingToken};
use crate::network::{ActiveNetwork, NetworkProfile, NetworkTable};
use crate::verify::{SourceVerifier, VerificationStatus};

const SEPARATOR: &str = "----------------------------------------------------";

#[derive(Debug, Clone, Default)]
pub struct DeploySettings {
    /// Explorer API key. Verification is skipped without one.
    pub etherscan_api_key: Option<String>,
    /// Push the profile's fund amount of LINK to the contract when eligible.
    pub auto_fund: bool,
    /// Appended to the fund-link command printed when auto-funding is not possible.
    pub additional_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    SkippedDevelopment,
    SkippedNoApiKey,
    SkippedNoVerifier,
    Done(VerificationStatus),
    /// The contract stays deployed; only publishing its source failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingOutcome {
    NotRequested,
    /// The network has no LINK token.
    NoToken,
    /// The network has a LINK token but no funding account was attached.
    NoFundingAccount,
    /// Carries the guidance lines for funding the contract by hand.
    Ineligible(Vec<String>),
    Funded(TxHash),
    /// The contract is deployed; reading balances or transferring LINK failed.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub record: DeploymentRecord,
    pub funding: FundingOutcome,
    pub verification: VerificationOutcome,
    /// Command the operator runs next to enter the contract.
    pub enter_command: String,
}

/// Sequences deploy, optional auto-funding, optional verification and the
/// follow-up instructions for one contract on one network.
pub struct DeployOrchestrator<'a> {
    table: &'a NetworkTable,
    deployer: &'a dyn ContractDeployer,
    verifier: Option<&'a dyn SourceVerifier>,
    funding: Option<(&'a dyn FundingToken, Address)>,
}

impl<'a> DeployOrchestrator<'a> {
    pub fn new(table: &'a NetworkTable, deployer: &'a dyn ContractDeployer) -> Self {
        Self {
            table,
            deployer,
            verifier: None,
            funding: None,
        }
    }

    pub fn with_verifier(mut self, verifier: &'a dyn SourceVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// LINK token bound to `signer`, used when auto-funding is requested.
    pub fn with_funding(mut self, token: &'a dyn FundingToken, signer: Address) -> Self {
        self.funding = Some((token, signer));
        self
    }

    pub async fn deploy(
        &self,
        network: &ActiveNetwork,
        contract_name: &str,
        bytecode: Bytes,
        settings: &DeploySettings,
    ) -> Result<DeploymentOutcome, DeployError> {
        // Resolve everything before sending anything.
        let profile = self.table.profile_for(network.chain_id)?;
        let args = profile.betting_args()?;
        let constructor_args: Bytes = args.abi_encode().into();
        let confirmations = network.confirmations();

        info!("{SEPARATOR}");
        let deployed = self
            .deployer
            .deploy(&DeployRequest {
                contract_name: contract_name.to_string(),
                bytecode,
                constructor_args: constructor_args.clone(),
                confirmations,
            })
            .await
            .map_err(DeployError::Deployment)?;

        let record = DeploymentRecord {
            contract_name: contract_name.to_string(),
            address: deployed.address,
            args,
            constructor_args,
            transaction_hash: deployed.transaction_hash,
            block_number: deployed.block_number,
            chain_id: network.chain_id,
            network: network.name.clone(),
        };

        let funding = self.fund(network, profile, &record, settings).await;
        let verification = self.verify(network, &record, settings).await;

        let enter_command = enter_command(network.external_name());
        info!("Enter Betting with command:");
        info!("{enter_command}");
        info!("{SEPARATOR}");

        Ok(DeploymentOutcome {
            record,
            funding,
            verification,
            enter_command,
        })
    }

    /// Failures here are reported in the outcome so the deployment is never lost.
    async fn fund(
        &self,
        network: &ActiveNetwork,
        profile: &NetworkProfile,
        record: &DeploymentRecord,
        settings: &DeploySettings,
    ) -> FundingOutcome {
        if !settings.auto_fund {
            return FundingOutcome::NotRequested;
        }
        if profile.link_token.is_none() {
            info!(
                "No LINK token configured for {}, skipping auto-funding",
                network.name
            );
            return FundingOutcome::NoToken;
        }
        let Some((token, signer)) = self.funding else {
            warn!(
                "No funding account attached for {}, skipping auto-funding",
                network.name
            );
            return FundingOutcome::NoFundingAccount;
        };

        let check = FundCheck {
            contract: record.address,
            chain_id: network.chain_id,
            network_name: network.external_name(),
            signer,
            additional_message: &settings.additional_message,
        };
        let decision = match assess_auto_fund(self.table, token, &check).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!("Auto-funding of {} failed: {e}", record.address);
                return FundingOutcome::Failed(DeployError::from(e).to_string());
            }
        };
        if !decision.eligible {
            return FundingOutcome::Ineligible(decision.guidance);
        }

        info!(
            "Funding contract {} with {} LINK base units",
            record.address, profile.fund_amount
        );
        match token.transfer(record.address, profile.fund_amount).await {
            Ok(tx) => {
                info!("Contract funded with LINK (tx: {tx})");
                FundingOutcome::Funded(tx)
            }
            Err(e) => {
                let err = DeployError::FundingTransfer(e);
                warn!("{err}");
                FundingOutcome::Failed(err.to_string())
            }
        }
    }

    async fn verify(
        &self,
        network: &ActiveNetwork,
        record: &DeploymentRecord,
        settings: &DeploySettings,
    ) -> VerificationOutcome {
        if network.is_development() {
            return VerificationOutcome::SkippedDevelopment;
        }
        let Some(api_key) = settings.etherscan_api_key.as_deref() else {
            return VerificationOutcome::SkippedNoApiKey;
        };
        let Some(verifier) = self.verifier else {
            warn!(
                "ETHERSCAN_API_KEY is set but no explorer is configured for {}",
                network.name
            );
            return VerificationOutcome::SkippedNoVerifier;
        };

        info!("Verifying...");
        match verifier.verify(api_key, record).await {
            Ok(status) => VerificationOutcome::Done(status),
            Err(e) => {
                warn!("Verification of {} failed: {e}", record.address);
                VerificationOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::DeployedContract;
    use crate::funding::tests::MockToken;
    use crate::network::table::{GOERLI_CHAIN_ID, HARDHAT_CHAIN_ID};
    use crate::network::ConfigurationError;
    use crate::verify::VerificationError;
    use crate::web3::contracts::core::error::ContractError;
    use alloy::primitives::{B256, U256};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const DEPLOYED: Address = Address::new([0xbe; 20]);
    const SIGNER: Address = Address::new([0x01; 20]);

    #[derive(Default)]
    struct MockDeployer {
        requests: Mutex<Vec<DeployRequest>>,
    }

    #[async_trait]
    impl ContractDeployer for MockDeployer {
        async fn deploy(&self, request: &DeployRequest) -> Result<DeployedContract, ContractError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(DeployedContract {
                address: DEPLOYED,
                transaction_hash: B256::repeat_byte(0x77),
                block_number: Some(1),
            })
        }
    }

    struct MockVerifier {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockVerifier {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SourceVerifier for MockVerifier {
        async fn verify(
            &self,
            _api_key: &str,
            _record: &DeploymentRecord,
        ) -> Result<VerificationStatus, VerificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(VerificationError::Rejected("Invalid API Key".to_string()));
            }
            Ok(VerificationStatus::Verified)
        }
    }

    /// Builtin table with a fully configured goerli game.
    fn table() -> NetworkTable {
        let builtin = NetworkTable::builtin();
        let mut goerli = builtin.profile_for(GOERLI_CHAIN_ID).unwrap().clone();
        goerli.game = builtin.profile_for(HARDHAT_CHAIN_ID).unwrap().game.clone();
        builtin.with_overrides([goerli]).unwrap()
    }

    fn with_key() -> DeploySettings {
        DeploySettings {
            etherscan_api_key: Some("KEY".to_string()),
            ..DeploySettings::default()
        }
    }

    fn bytecode() -> Bytes {
        Bytes::from_static(&[0x60, 0x80])
    }

    #[tokio::test]
    async fn development_network_never_verifies() {
        let table = table();
        let deployer = MockDeployer::default();
        let verifier = MockVerifier::new(false);
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_verifier(&verifier);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("hardhat", HARDHAT_CHAIN_ID),
                "Betting",
                bytecode(),
                &with_key(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.verification, VerificationOutcome::SkippedDevelopment);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(deployer.requests.lock().unwrap()[0].confirmations, 1);
    }

    #[tokio::test]
    async fn public_network_without_key_skips_verification() {
        let table = table();
        let deployer = MockDeployer::default();
        let verifier = MockVerifier::new(false);
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_verifier(&verifier);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &DeploySettings::default(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.verification, VerificationOutcome::SkippedNoApiKey);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.record.address, DEPLOYED);
    }

    #[tokio::test]
    async fn public_network_verifies_after_six_confirmations() {
        let table = table();
        let deployer = MockDeployer::default();
        let verifier = MockVerifier::new(false);
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_verifier(&verifier);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &with_key(),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome.verification,
            VerificationOutcome::Done(VerificationStatus::Verified)
        );
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        let requests = deployer.requests.lock().unwrap();
        assert_eq!(requests[0].confirmations, 6);
        assert_eq!(
            requests[0].constructor_args,
            Bytes::from(outcome.record.args.abi_encode())
        );
    }

    #[tokio::test]
    async fn verification_failure_does_not_fail_the_deployment() {
        let table = table();
        let deployer = MockDeployer::default();
        let verifier = MockVerifier::new(true);
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_verifier(&verifier);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &with_key(),
            )
            .await
            .unwrap();

        assert!(matches!(outcome.verification, VerificationOutcome::Failed(_)));
        assert_eq!(outcome.record.address, DEPLOYED);
    }

    #[tokio::test]
    async fn missing_constructor_argument_aborts_before_deploying() {
        let table = NetworkTable::builtin();
        let deployer = MockDeployer::default();
        let orchestrator = DeployOrchestrator::new(&table, &deployer);

        let err = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &DeploySettings::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::Configuration(ConfigurationError::MissingField { .. })
        ));
        assert!(deployer.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_chain_aborts_before_deploying() {
        let table = table();
        let deployer = MockDeployer::default();
        let orchestrator = DeployOrchestrator::new(&table, &deployer);

        let err = orchestrator
            .deploy(
                &ActiveNetwork::new("private", 9999),
                "Betting",
                bytecode(),
                &DeploySettings::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::Configuration(ConfigurationError::UnknownChain(9999))
        ));
        assert!(deployer.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn auto_fund_transfers_when_eligible() {
        let table = table();
        let deployer = MockDeployer::default();
        let fund_amount = table.profile_for(GOERLI_CHAIN_ID).unwrap().fund_amount;
        let token = MockToken::default();
        token
            .balances
            .lock()
            .unwrap()
            .insert(SIGNER, fund_amount * U256::from(2));
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_funding(&token, SIGNER);

        let settings = DeploySettings {
            auto_fund: true,
            ..DeploySettings::default()
        };
        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &settings,
            )
            .await
            .unwrap();

        assert!(matches!(outcome.funding, FundingOutcome::Funded(_)));
        assert_eq!(
            token.transfers.lock().unwrap().as_slice(),
            &[(DEPLOYED, fund_amount)]
        );
    }

    #[tokio::test]
    async fn auto_fund_skips_transfer_when_ineligible() {
        let table = table();
        let deployer = MockDeployer::default();
        let token = MockToken::default();
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_funding(&token, SIGNER);

        let settings = DeploySettings {
            auto_fund: true,
            ..DeploySettings::default()
        };
        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &settings,
            )
            .await
            .unwrap();

        let FundingOutcome::Ineligible(guidance) = &outcome.funding else {
            panic!("expected an ineligible outcome, got {:?}", outcome.funding);
        };
        assert!(guidance[2].contains(&format!("--contract {DEPLOYED} --network goerli")));
        assert!(token.transfers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn auto_fund_without_token_is_skipped() {
        let table = table();
        let deployer = MockDeployer::default();
        let token = MockToken::default();
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_funding(&token, SIGNER);

        let settings = DeploySettings {
            auto_fund: true,
            ..DeploySettings::default()
        };
        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("localhost", HARDHAT_CHAIN_ID),
                "Betting",
                bytecode(),
                &settings,
            )
            .await
            .unwrap();

        assert_eq!(outcome.funding, FundingOutcome::NoToken);
    }

    fn auto_fund() -> DeploySettings {
        DeploySettings {
            auto_fund: true,
            ..DeploySettings::default()
        }
    }

    #[tokio::test]
    async fn balance_failure_keeps_the_deployment() {
        let table = table();
        let deployer = MockDeployer::default();
        let token = MockToken {
            fail_balance: true,
            ..MockToken::default()
        };
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_funding(&token, SIGNER);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &auto_fund(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.record.address, DEPLOYED);
        assert_eq!(deployer.requests.lock().unwrap().len(), 1);
        let FundingOutcome::Failed(reason) = &outcome.funding else {
            panic!("expected a failed funding outcome, got {:?}", outcome.funding);
        };
        assert!(reason.contains("Failed to read LINK balance"));
        assert!(token.transfers.lock().unwrap().is_empty());
        assert_eq!(
            outcome.enter_command,
            "yarn hardhat run scripts/enter.js --network goerli"
        );
    }

    #[tokio::test]
    async fn transfer_failure_keeps_the_deployment() {
        let table = table();
        let deployer = MockDeployer::default();
        let fund_amount = table.profile_for(GOERLI_CHAIN_ID).unwrap().fund_amount;
        let token = MockToken {
            fail_transfer: true,
            ..MockToken::default()
        };
        token
            .balances
            .lock()
            .unwrap()
            .insert(SIGNER, fund_amount * U256::from(2));
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_funding(&token, SIGNER);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &auto_fund(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.record.address, DEPLOYED);
        assert!(matches!(outcome.funding, FundingOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn token_without_funding_account_is_reported() {
        let table = table();
        let deployer = MockDeployer::default();
        let orchestrator = DeployOrchestrator::new(&table, &deployer);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("goerli", GOERLI_CHAIN_ID),
                "Betting",
                bytecode(),
                &auto_fund(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.funding, FundingOutcome::NoFundingAccount);
    }

    #[tokio::test]
    async fn hardhat_instructions_name_localhost() {
        let builtin = table();
        let mut hardhat = builtin.profile_for(HARDHAT_CHAIN_ID).unwrap().clone();
        hardhat.link_token = Some(Address::new([0x07; 20]));
        let table = builtin.with_overrides([hardhat]).unwrap();
        let deployer = MockDeployer::default();
        let token = MockToken::default();
        let orchestrator = DeployOrchestrator::new(&table, &deployer).with_funding(&token, SIGNER);

        let outcome = orchestrator
            .deploy(
                &ActiveNetwork::new("hardhat", HARDHAT_CHAIN_ID),
                "Betting",
                bytecode(),
                &auto_fund(),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome.enter_command,
            "yarn hardhat run scripts/enter.js --network localhost"
        );
        let FundingOutcome::Ineligible(guidance) = &outcome.funding else {
            panic!("expected an ineligible outcome, got {:?}", outcome.funding);
        };
        assert!(guidance[2].ends_with("--network localhost"));
    }
}
