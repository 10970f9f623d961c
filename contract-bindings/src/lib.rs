// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Typed bindings for the Superform v2 contracts.
//!
//! Each binding is generated at compile time from the ABI files in `abi/`. Every contract gets a
//! module named after it (e.g. [`super_ledger_configuration`]) containing the contract type, one
//! struct per Solidity tuple, one `*Filter` struct per event, one struct per custom error and the
//! `*Calls`, `*Events` and `*Errors` enums. The contract types are re-exported at the crate root.
//!
//! The ABI files are refreshed from the Foundry build output with `cargo run -p gen-bindings`.
#![allow(ambiguous_glob_reexports)]

use ethers::contract::abigen;

pub mod deployment;
pub mod ids;
pub mod revert;
pub mod rpc;

pub use deployment::{ChainConfig, Contract, ContractAddresses, Deployments};

// Ledger.
abigen!(
    SuperLedgerConfiguration,
    "abi/SuperLedgerConfiguration.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperLedger,
    "abi/SuperLedger.json",
    derives(serde::Deserialize, serde::Serialize)
);

// Access control and registries.
abigen!(
    SuperRbac,
    "abi/SuperRbac.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperRegistry,
    "abi/SuperRegistry.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    HooksRegistry,
    "abi/HooksRegistry.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    PeripheryRegistry,
    "abi/PeripheryRegistry.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    RegistryAdapter,
    "abi/RegistryAdapter.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ERC7484RegistryAdapter,
    "abi/ERC7484RegistryAdapter.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperDeployer,
    "abi/SuperDeployer.json",
    derives(serde::Deserialize, serde::Serialize)
);

// Oracles.
abigen!(
    SuperOracle,
    "abi/SuperOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ECDSAPPSOracle,
    "abi/ECDSAPPSOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ERC4626YieldSourceOracle,
    "abi/ERC4626YieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ERC5115YieldSourceOracle,
    "abi/ERC5115YieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ERC7540YieldSourceOracle,
    "abi/ERC7540YieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    PendlePTYieldSourceOracle,
    "abi/PendlePTYieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    StakingYieldSourceOracle,
    "abi/StakingYieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperYieldSourceOracle,
    "abi/SuperYieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SpectraPTYieldSourceOracle,
    "abi/SpectraPTYieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperOracleL2,
    "abi/SuperOracleL2.json",
    derives(serde::Deserialize, serde::Serialize)
);

// Vaults and assets.
abigen!(
    SuperVaultFactory,
    "abi/SuperVaultFactory.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperAssetFactory,
    "abi/SuperAssetFactory.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperVaultAggregator,
    "abi/SuperVaultAggregator.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperVault,
    "abi/SuperVault.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperVaultStrategy,
    "abi/SuperVaultStrategy.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperVaultEscrow,
    "abi/SuperVaultEscrow.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperCollectiveVault,
    "abi/SuperCollectiveVault.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperAsset,
    "abi/SuperAsset.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperAssetPriceLib,
    "abi/SuperAssetPriceLib.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperPositionSentinel,
    "abi/SuperPositionSentinel.json",
    derives(serde::Deserialize, serde::Serialize)
);

// ERC-7579 validator and executor modules.
abigen!(
    SuperMerkleValidator,
    "abi/SuperMerkleValidator.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperDestinationValidator,
    "abi/SuperDestinationValidator.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperValidator,
    "abi/SuperValidator.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperExecutor,
    "abi/SuperExecutor.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperDestinationExecutor,
    "abi/SuperDestinationExecutor.json",
    derives(serde::Deserialize, serde::Serialize)
);

// Treasury and gas.
abigen!(
    SuperGasTank,
    "abi/SuperGasTank.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperBank,
    "abi/SuperBank.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperNativePaymaster,
    "abi/SuperNativePaymaster.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    SuperSenderCreator,
    "abi/SuperSenderCreator.json",
    derives(serde::Deserialize, serde::Serialize)
);

// Bridge adapters.
abigen!(
    AcrossV3Adapter,
    "abi/AcrossV3Adapter.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    DebridgeAdapter,
    "abi/DebridgeAdapter.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    AcrossTargetExecutor,
    "abi/AcrossTargetExecutor.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    AcrossReceiveFundsAndExecuteGateway,
    "abi/AcrossReceiveFundsAndExecuteGateway.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    AcrossSendFundsAndExecuteOnDstHook,
    "abi/AcrossSendFundsAndExecuteOnDstHook.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    IAcrossV3Receiver,
    "abi/IAcrossV3Receiver.json",
    derives(serde::Deserialize, serde::Serialize)
);

// Interfaces, for contracts deployed per integration (yield source oracles, price feeds).
abigen!(
    IYieldSourceOracle,
    "abi/IYieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ISuperYieldSourceOracle,
    "abi/ISuperYieldSourceOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ISuperOracle,
    "abi/ISuperOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    IOracle,
    "abi/IOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    IECDSAPPSOracle,
    "abi/IECDSAPPSOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    ISuperVaultPPSOracle,
    "abi/ISuperVaultPPSOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
abigen!(
    IPPYLpOracle,
    "abi/IPPYLpOracle.json",
    derives(serde::Deserialize, serde::Serialize)
);
