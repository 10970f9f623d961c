// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::deployment::ChainConfig;
use anyhow::{ensure, Context, Result};
use ethers::{
    prelude::{MnemonicBuilder, Signer, SignerMiddleware},
    providers::{Http, Middleware as _, Provider},
    signers::{coins_bip39::English, LocalWallet},
};

pub type Middleware = SignerMiddleware<Provider<Http>, LocalWallet>;

pub fn verify_chain_id(expected: u64, actual: u64) -> Result<()> {
    ensure!(
        expected == actual,
        "chain ID mismatch: expected {expected}, actual {actual}"
    );
    Ok(())
}

/// Connect to the JSON-RPC of `chain` and check that it serves the configured chain.
pub async fn connect_http(chain: &ChainConfig) -> Result<Provider<Http>> {
    let mut provider = Provider::new(Http::new(chain.rpc.clone()));
    provider.set_interval(chain.poll_interval());

    let chain_id = provider
        .get_chainid()
        .await
        .with_context(|| format!("failed to get chain ID from {}", chain.rpc))?
        .as_u64();
    verify_chain_id(chain.chain_id, chain_id)?;

    tracing::debug!("Connected to {} (chain ID {chain_id})", chain.name);
    Ok(provider)
}

/// Sign transactions for `provider` with account `index` of `mnemonic`.
pub fn connect_signer(
    provider: Provider<Http>,
    mnemonic: &str,
    index: u32,
    chain_id: u64,
) -> Result<Middleware> {
    let wallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .index(index)?
        .build()
        .context("error opening wallet")?
        .with_chain_id(chain_id);
    tracing::info!("Using account {:?}", wallet.address());
    Ok(SignerMiddleware::new(provider, wallet))
}

#[cfg(test)]
mod test {
    use super::*;
    use ethers::types::Address;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_verify_chain_id() {
        verify_chain_id(8453, 8453).unwrap();
        let err = verify_chain_id(8453, 1).unwrap_err();
        assert_eq!(err.to_string(), "chain ID mismatch: expected 8453, actual 1");
    }

    #[test]
    fn test_connect_signer_derives_account() {
        let provider = Provider::new(Http::new(url::Url::parse("http://localhost:8545").unwrap()));
        let client = connect_signer(provider, TEST_MNEMONIC, 0, 31337).unwrap();
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse()
            .unwrap();
        assert_eq!(client.address(), expected);
        assert_eq!(client.signer().chain_id(), 31337);
    }

    #[test]
    fn test_connect_signer_rejects_bad_mnemonic() {
        let provider = Provider::new(Http::new(url::Url::parse("http://localhost:8545").unwrap()));
        assert!(connect_signer(provider, "not a mnemonic", 0, 1).is_err());
    }
}
