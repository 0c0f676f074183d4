use alloy::primitives::Address;
use alloy::{
    network::EthereumWallet,
    primitives::U256,
    providers::fillers::{
        BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
    },
    providers::{Identity, Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
};
use url::Url;

pub type WalletProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider,
>;

#[derive(Clone)]
pub struct Wallet {
    pub wallet: EthereumWallet,
    pub signer: PrivateKeySigner,
    pub provider: WalletProvider,
}

impl Wallet {
    pub fn new(
        private_key: &str,
        provider_url: Url,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let signer: PrivateKeySigner = private_key.trim().parse()?;
        let wallet = EthereumWallet::from(signer.clone());

        let provider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_http(provider_url);

        Ok(Self {
            wallet,
            signer,
            provider,
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn provider(&self) -> WalletProvider {
        self.provider.clone()
    }

    pub async fn get_balance(&self) -> Result<U256, Box<dyn std::error::Error + Send + Sync>> {
        let balance = self.provider.get_balance(self.address()).await?;
        Ok(balance)
    }

    pub async fn chain_id(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let chain_id = self.provider.get_chain_id().await?;
        Ok(chain_id)
    }
}
