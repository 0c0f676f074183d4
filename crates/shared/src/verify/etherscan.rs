use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{SourceVerifier, VerificationError, VerificationStatus};
use crate::deploy::artifact::{BuildInfo, ContractArtifact};
use crate::deploy::DeploymentRecord;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
const DEFAULT_STATUS_CHECKS: u32 = 10;

/// Everything the explorer needs besides the deployment itself.
#[derive(Debug, Clone)]
pub struct VerificationSource {
    /// `<source path>:<contract name>`
    pub contract_name: String,
    /// `v<solc long version>`, e.g. `v0.8.7+commit.e28d00a7`
    pub compiler_version: String,
    /// Standard JSON compiler input.
    pub source_code: String,
}

impl VerificationSource {
    pub fn new(artifact: &ContractArtifact, build_info: &BuildInfo) -> Self {
        Self {
            contract_name: artifact.fully_qualified_name(),
            compiler_version: format!("v{}", build_info.solc_long_version),
            source_code: build_info.input.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

impl EtherscanResponse {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

/// Verification client for Etherscan-compatible explorer APIs.
pub struct EtherscanVerifier {
    client: Client,
    api_url: String,
    source: VerificationSource,
    poll_interval: Duration,
    max_status_checks: u32,
}

impl EtherscanVerifier {
    pub fn new(api_url: impl Into<String>, source: VerificationSource) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            source,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_status_checks: DEFAULT_STATUS_CHECKS,
        }
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_status_checks: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_status_checks = max_status_checks.max(1);
        self
    }

    async fn submit(
        &self,
        api_key: &str,
        record: &DeploymentRecord,
    ) -> Result<EtherscanResponse, VerificationError> {
        let address = record.address.to_string();
        let constructor_args = hex::encode(&record.constructor_args);
        let form = [
            ("apikey", api_key),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", address.as_str()),
            ("sourceCode", self.source.source_code.as_str()),
            ("codeformat", "solidity-standard-json-input"),
            ("contractname", self.source.contract_name.as_str()),
            ("compilerversion", self.source.compiler_version.as_str()),
            // sic, the explorer API spells it this way
            ("constructorArguements", constructor_args.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json::<EtherscanResponse>()
            .await?;
        Ok(response)
    }

    async fn check_status(
        &self,
        api_key: &str,
        guid: &str,
    ) -> Result<EtherscanResponse, VerificationError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("apikey", api_key),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<EtherscanResponse>()
            .await?;
        Ok(response)
    }
}

fn is_already_verified(result: &str) -> bool {
    result.to_lowercase().contains("already verified")
}

#[async_trait]
impl SourceVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        api_key: &str,
        record: &DeploymentRecord,
    ) -> Result<VerificationStatus, VerificationError> {
        info!(
            "Submitting {} at {} for verification",
            self.source.contract_name, record.address
        );
        let submitted = self.submit(api_key, record).await?;
        if !submitted.is_ok() {
            if is_already_verified(&submitted.result) {
                info!("Contract is already verified");
                return Ok(VerificationStatus::AlreadyVerified);
            }
            return Err(VerificationError::Rejected(submitted.result));
        }

        let guid = submitted.result;
        debug!("Verification submitted with guid {guid}");

        for attempt in 1..=self.max_status_checks {
            tokio::time::sleep(self.poll_interval).await;
            let status = self.check_status(api_key, &guid).await?;
            debug!(
                "Verification status check {attempt}: {} ({})",
                status.result, status.message
            );

            if status.is_ok() {
                info!("Successfully verified contract {}", self.source.contract_name);
                return Ok(VerificationStatus::Verified);
            }
            if is_already_verified(&status.result) {
                return Ok(VerificationStatus::AlreadyVerified);
            }
            if !status.result.to_lowercase().contains("pending") {
                return Err(VerificationError::Failed(status.result));
            }
        }

        Err(VerificationError::Timeout {
            attempts: self.max_status_checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::tests::sample_record;
    use mockito::{Matcher, Server};

    fn source() -> VerificationSource {
        VerificationSource {
            contract_name: "contracts/Betting.sol:Betting".to_string(),
            compiler_version: "v0.8.7+commit.e28d00a7".to_string(),
            source_code: "{\"language\":\"Solidity\"}".to_string(),
        }
    }

    fn verifier(server: &Server) -> EtherscanVerifier {
        EtherscanVerifier::new(format!("{}/api", server.url()), source())
            .with_polling(Duration::ZERO, 2)
    }

    #[tokio::test]
    async fn submits_and_confirms_verification() {
        let mut server = Server::new_async().await;
        let record = sample_record();

        let submit = server
            .mock("POST", "/api")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "verifysourcecode".into()),
                Matcher::UrlEncoded("apikey".into(), "KEY".into()),
                Matcher::UrlEncoded("contractaddress".into(), record.address.to_string()),
                Matcher::UrlEncoded(
                    "contractname".into(),
                    "contracts/Betting.sol:Betting".into(),
                ),
                Matcher::UrlEncoded(
                    "constructorArguements".into(),
                    hex::encode(&record.constructor_args),
                ),
            ]))
            .with_status(200)
            .with_body(r#"{"status":"1","message":"OK","result":"guid-123"}"#)
            .create_async()
            .await;
        let status = server
            .mock("GET", "/api")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "checkverifystatus".into()),
                Matcher::UrlEncoded("guid".into(), "guid-123".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"status":"1","message":"OK","result":"Pass - Verified"}"#)
            .create_async()
            .await;

        let result = verifier(&server).verify("KEY", &record).await.unwrap();
        assert_eq!(result, VerificationStatus::Verified);
        submit.assert_async().await;
        status.assert_async().await;
    }

    #[tokio::test]
    async fn already_verified_is_success() {
        let mut server = Server::new_async().await;
        let _submit = server
            .mock("POST", "/api")
            .with_status(200)
            .with_body(
                r#"{"status":"0","message":"NOTOK","result":"Contract source code already verified"}"#,
            )
            .create_async()
            .await;

        let result = verifier(&server)
            .verify("KEY", &sample_record())
            .await
            .unwrap();
        assert_eq!(result, VerificationStatus::AlreadyVerified);
    }

    #[tokio::test]
    async fn rejection_is_an_error() {
        let mut server = Server::new_async().await;
        let _submit = server
            .mock("POST", "/api")
            .with_status(200)
            .with_body(r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#)
            .create_async()
            .await;

        let err = verifier(&server)
            .verify("BAD", &sample_record())
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Rejected(ref msg) if msg == "Invalid API Key"));
    }

    #[tokio::test]
    async fn failed_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _submit = server
            .mock("POST", "/api")
            .with_status(200)
            .with_body(r#"{"status":"1","message":"OK","result":"guid-9"}"#)
            .create_async()
            .await;
        let _status = server
            .mock("GET", "/api")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"0","message":"NOTOK","result":"Fail - Unable to verify"}"#)
            .create_async()
            .await;

        let err = verifier(&server)
            .verify("KEY", &sample_record())
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Failed(_)));
    }

    #[tokio::test]
    async fn pending_forever_times_out() {
        let mut server = Server::new_async().await;
        let _submit = server
            .mock("POST", "/api")
            .with_status(200)
            .with_body(r#"{"status":"1","message":"OK","result":"guid-7"}"#)
            .create_async()
            .await;
        let status = server
            .mock("GET", "/api")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"0","message":"NOTOK","result":"Pending in queue"}"#)
            .expect(2)
            .create_async()
            .await;

        let err = verifier(&server)
            .verify("KEY", &sample_record())
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Timeout { attempts: 2 }));
        status.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_is_surfaced() {
        let mut server = Server::new_async().await;
        let _submit = server
            .mock("POST", "/api")
            .with_status(500)
            .create_async()
            .await;

        let err = verifier(&server)
            .verify("KEY", &sample_record())
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Http(_)));
    }
}
