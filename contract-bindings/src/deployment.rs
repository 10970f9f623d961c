// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Address book of the deployed contracts.
//!
//! Deployments are described in a TOML file with one table per chain:
//!
//! ```toml
//! [chains.base]
//! chain_id = 8453
//! rpc = "https://mainnet.base.org"
//!
//! [chains.base.contracts]
//! super_ledger_configuration = "0x2e2D71289CBA19f831856f85DEC7f194B0165e69"
//! ledger_configuration_deployment_block = 27000000
//! ```

use anyhow::{bail, Context, Result};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, path::Path, time::Duration};
use url::Url;

/// The contracts with a binding in this crate that are deployed at a fixed address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Contract {
    SuperLedgerConfiguration,
    SuperLedger,
    SuperRbac,
    SuperRegistry,
    SuperOracle,
    EcdsaPpsOracle,
    SuperVaultFactory,
    SuperAssetFactory,
    SuperMerkleValidator,
    SuperDestinationValidator,
    SuperExecutor,
    SuperDestinationExecutor,
    SuperGasTank,
    SuperBank,
    SuperNativePaymaster,
    AcrossV3Adapter,
    DebridgeAdapter,
    SuperVaultAggregator,
    SuperOracleL2,
    SuperValidator,
    SuperSenderCreator,
    SuperDeployer,
    HooksRegistry,
    PeripheryRegistry,
    SuperPositionSentinel,
    SuperCollectiveVault,
    AcrossTargetExecutor,
    AcrossReceiveFundsAndExecuteGateway,
}

impl Contract {
    pub const ALL: [Contract; 28] = [
        Contract::SuperLedgerConfiguration,
        Contract::SuperLedger,
        Contract::SuperRbac,
        Contract::SuperRegistry,
        Contract::SuperOracle,
        Contract::EcdsaPpsOracle,
        Contract::SuperVaultFactory,
        Contract::SuperAssetFactory,
        Contract::SuperMerkleValidator,
        Contract::SuperDestinationValidator,
        Contract::SuperExecutor,
        Contract::SuperDestinationExecutor,
        Contract::SuperGasTank,
        Contract::SuperBank,
        Contract::SuperNativePaymaster,
        Contract::AcrossV3Adapter,
        Contract::DebridgeAdapter,
        Contract::SuperVaultAggregator,
        Contract::SuperOracleL2,
        Contract::SuperValidator,
        Contract::SuperSenderCreator,
        Contract::SuperDeployer,
        Contract::HooksRegistry,
        Contract::PeripheryRegistry,
        Contract::SuperPositionSentinel,
        Contract::SuperCollectiveVault,
        Contract::AcrossTargetExecutor,
        Contract::AcrossReceiveFundsAndExecuteGateway,
    ];

    /// The key of this contract in a deployment file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SuperLedgerConfiguration => "super_ledger_configuration",
            Self::SuperLedger => "super_ledger",
            Self::SuperRbac => "super_rbac",
            Self::SuperRegistry => "super_registry",
            Self::SuperOracle => "super_oracle",
            Self::EcdsaPpsOracle => "ecdsa_pps_oracle",
            Self::SuperVaultFactory => "super_vault_factory",
            Self::SuperAssetFactory => "super_asset_factory",
            Self::SuperMerkleValidator => "super_merkle_validator",
            Self::SuperDestinationValidator => "super_destination_validator",
            Self::SuperExecutor => "super_executor",
            Self::SuperDestinationExecutor => "super_destination_executor",
            Self::SuperGasTank => "super_gas_tank",
            Self::SuperBank => "super_bank",
            Self::SuperNativePaymaster => "super_native_paymaster",
            Self::AcrossV3Adapter => "across_v3_adapter",
            Self::DebridgeAdapter => "debridge_adapter",
            Self::SuperVaultAggregator => "super_vault_aggregator",
            Self::SuperOracleL2 => "super_oracle_l2",
            Self::SuperValidator => "super_validator",
            Self::SuperSenderCreator => "super_sender_creator",
            Self::SuperDeployer => "super_deployer",
            Self::HooksRegistry => "hooks_registry",
            Self::PeripheryRegistry => "periphery_registry",
            Self::SuperPositionSentinel => "super_position_sentinel",
            Self::SuperCollectiveVault => "super_collective_vault",
            Self::AcrossTargetExecutor => "across_target_executor",
            Self::AcrossReceiveFundsAndExecuteGateway => "across_receive_funds_and_execute_gateway",
        }
    }

    /// The environment variable the address of this contract is exported as.
    pub fn env_var(&self) -> String {
        format!("SUPERFORM_{}_ADDRESS", self.key().to_uppercase())
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractAddresses {
    pub super_ledger_configuration: Option<Address>,
    pub super_ledger: Option<Address>,
    pub super_rbac: Option<Address>,
    pub super_registry: Option<Address>,
    pub super_oracle: Option<Address>,
    pub ecdsa_pps_oracle: Option<Address>,
    pub super_vault_factory: Option<Address>,
    pub super_asset_factory: Option<Address>,
    pub super_merkle_validator: Option<Address>,
    pub super_destination_validator: Option<Address>,
    pub super_executor: Option<Address>,
    pub super_destination_executor: Option<Address>,
    pub super_gas_tank: Option<Address>,
    pub super_bank: Option<Address>,
    pub super_native_paymaster: Option<Address>,
    pub across_v3_adapter: Option<Address>,
    pub debridge_adapter: Option<Address>,
    pub super_vault_aggregator: Option<Address>,
    pub super_oracle_l2: Option<Address>,
    pub super_validator: Option<Address>,
    pub super_sender_creator: Option<Address>,
    pub super_deployer: Option<Address>,
    pub hooks_registry: Option<Address>,
    pub periphery_registry: Option<Address>,
    pub super_position_sentinel: Option<Address>,
    pub super_collective_vault: Option<Address>,
    pub across_target_executor: Option<Address>,
    pub across_receive_funds_and_execute_gateway: Option<Address>,

    /// The block in which the ledger configuration was deployed.
    ///
    /// Event queries against the ledger configuration start here by default.
    #[serde(default)]
    pub ledger_configuration_deployment_block: u64,
}

impl ContractAddresses {
    pub fn get(&self, contract: Contract) -> Option<Address> {
        match contract {
            Contract::SuperLedgerConfiguration => self.super_ledger_configuration,
            Contract::SuperLedger => self.super_ledger,
            Contract::SuperRbac => self.super_rbac,
            Contract::SuperRegistry => self.super_registry,
            Contract::SuperOracle => self.super_oracle,
            Contract::EcdsaPpsOracle => self.ecdsa_pps_oracle,
            Contract::SuperVaultFactory => self.super_vault_factory,
            Contract::SuperAssetFactory => self.super_asset_factory,
            Contract::SuperMerkleValidator => self.super_merkle_validator,
            Contract::SuperDestinationValidator => self.super_destination_validator,
            Contract::SuperExecutor => self.super_executor,
            Contract::SuperDestinationExecutor => self.super_destination_executor,
            Contract::SuperGasTank => self.super_gas_tank,
            Contract::SuperBank => self.super_bank,
            Contract::SuperNativePaymaster => self.super_native_paymaster,
            Contract::AcrossV3Adapter => self.across_v3_adapter,
            Contract::DebridgeAdapter => self.debridge_adapter,
            Contract::SuperVaultAggregator => self.super_vault_aggregator,
            Contract::SuperOracleL2 => self.super_oracle_l2,
            Contract::SuperValidator => self.super_validator,
            Contract::SuperSenderCreator => self.super_sender_creator,
            Contract::SuperDeployer => self.super_deployer,
            Contract::HooksRegistry => self.hooks_registry,
            Contract::PeripheryRegistry => self.periphery_registry,
            Contract::SuperPositionSentinel => self.super_position_sentinel,
            Contract::SuperCollectiveVault => self.super_collective_vault,
            Contract::AcrossTargetExecutor => self.across_target_executor,
            Contract::AcrossReceiveFundsAndExecuteGateway => {
                self.across_receive_funds_and_execute_gateway
            }
        }
    }

    /// Iterate over the contracts that have an address.
    pub fn deployed(&self) -> impl Iterator<Item = (Contract, Address)> + '_ {
        Contract::ALL
            .into_iter()
            .filter_map(|contract| Some((contract, self.get(contract)?)))
    }
}

fn default_poll_interval_ms() -> u64 {
    7000
}

/// The configuration of a single chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// The name of the chain, filled in from the table key when loading a deployment file.
    #[serde(default, skip_serializing)]
    pub name: String,
    pub chain_id: u64,
    pub rpc: Url,
    /// How often event filters are polled.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub contracts: ContractAddresses,
}

impl ChainConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The address of `contract` on this chain, or an error naming the missing contract.
    pub fn require(&self, contract: Contract) -> Result<Address> {
        match self.contracts.get(contract) {
            Some(address) => Ok(address),
            None => bail!("{contract} is not deployed on {}", self.name),
        }
    }

    pub fn to_dotenv(&self) -> String {
        let mut dotenv = format!("# Superform v2 deployment on {}\n", self.name);
        dotenv = format!("{dotenv}SUPERFORM_CHAIN_ID={}\n", self.chain_id);
        dotenv = format!("{dotenv}SUPERFORM_RPC_URL={}\n", self.rpc);
        for (contract, address) in self.contracts.deployed() {
            dotenv = format!("{dotenv}{}={address:?}\n", contract.env_var());
        }
        dotenv = format!(
            "{dotenv}SUPERFORM_LEDGER_CONFIGURATION_DEPLOYMENT_BLOCK={}\n",
            self.contracts.ledger_configuration_deployment_block
        );
        dotenv
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    #[serde(default)]
    pub chains: BTreeMap<String, ChainConfig>,
}

impl Deployments {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read deployment file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse deployment file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut deployments: Self = toml::from_str(contents)?;
        for (name, chain) in deployments.chains.iter_mut() {
            chain.name = name.clone();
        }
        Ok(deployments)
    }

    pub fn chain(&self, name: &str) -> Result<&ChainConfig> {
        self.chains
            .get(name)
            .with_context(|| format!("unknown chain {name}"))
    }

    pub fn by_chain_id(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains
            .values()
            .find(|chain| chain.chain_id == chain_id)
    }
}
