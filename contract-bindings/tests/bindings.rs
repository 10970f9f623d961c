// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use ethers::{
    abi::{AbiDecode, AbiEncode},
    contract::{builders::ContractCall, parse_log, EthCall, EthEvent},
    providers::{MockProvider, Provider},
    types::{Address, Bytes, Log, H256, U256},
    utils::{id, keccak256},
};
use std::sync::Arc;
use superform_contract_bindings::{
    across_send_funds_and_execute_on_dst_hook, ids::role_id, super_asset, super_asset_factory,
    super_bank, super_destination_executor, super_destination_validator,
    super_ledger_configuration::{
        ManagerRoleTransferStartedFilter, SuperLedgerConfigurationEvents,
        TransferManagerRoleCall, YieldSourceOracleConfig, YieldSourceOracleConfigArgs,
        YieldSourceOracleConfigSetFilter,
    },
    super_merkle_validator::{PackedUserOperation, ValidateUserOpCall},
    super_native_paymaster, super_validator, super_vault_aggregator, super_vault_factory,
    super_vault_strategy, AcrossSendFundsAndExecuteOnDstHook, SuperAsset, SuperAssetFactory,
    SuperBank, SuperDestinationExecutor, SuperDestinationValidator, SuperLedger,
    SuperLedgerConfiguration, SuperMerkleValidator, SuperNativePaymaster, SuperRbac,
    SuperValidator, SuperVaultAggregator, SuperVaultFactory, SuperVaultStrategy,
};

type Mocked = Provider<MockProvider>;

const ORACLE_ID: [u8; 4] = [0x12, 0x34, 0x56, 0x78];

fn mocked() -> (Arc<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    (Arc::new(provider), mock)
}

fn config(fee_percent: u64) -> YieldSourceOracleConfig {
    YieldSourceOracleConfig {
        yield_source_oracle: Address::repeat_byte(1),
        fee_percent: fee_percent.into(),
        fee_recipient: Address::repeat_byte(2),
        manager: Address::repeat_byte(3),
        ledger: Address::repeat_byte(4),
    }
}

fn bytes4_topic(id: [u8; 4]) -> H256 {
    let mut topic = [0u8; 32];
    topic[..4].copy_from_slice(&id);
    H256(topic)
}

#[async_std::test]
async fn test_call_decodes_tuple_return() -> Result<()> {
    let (provider, mock) = mocked();
    let ledger = SuperLedgerConfiguration::new(Address::random(), provider);

    mock.push::<Bytes, _>(Bytes::from(config(100).encode()))?;
    let fetched = ledger.get_yield_source_oracle_config(ORACLE_ID).call().await?;
    assert_eq!(fetched, config(100));

    Ok(())
}

#[async_std::test]
async fn test_call_decodes_vault_strategy_struct() -> Result<()> {
    let (provider, mock) = mocked();
    let strategy = SuperVaultStrategy::new(Address::random(), provider);

    let fees = super_vault_strategy::FeeConfig {
        performance_fee_bps: 1_000.into(),
        recipient: Address::repeat_byte(8),
    };
    mock.push::<Bytes, _>(Bytes::from(fees.clone().encode()))?;
    assert_eq!(strategy.get_config_info().call().await?, fees);

    Ok(())
}

#[async_std::test]
async fn test_call_decodes_array_of_tuples() -> Result<()> {
    let (provider, mock) = mocked();
    let ledger = SuperLedgerConfiguration::new(Address::random(), provider);

    let expected = vec![config(100), config(2500)];
    mock.push::<Bytes, _>(Bytes::from(expected.clone().encode()))?;
    let fetched = ledger
        .get_yield_source_oracle_configs(vec![ORACLE_ID, [0xff; 4]])
        .call()
        .await?;
    assert_eq!(fetched, expected);

    Ok(())
}

#[async_std::test]
async fn test_call_decodes_multiple_outputs() -> Result<()> {
    let (provider, mock) = mocked();
    let ledger = SuperLedger::new(Address::random(), provider);

    mock.push::<Bytes, _>(Bytes::from((U256::from(1_000), U256::from(42)).encode()))?;
    let (cost_basis, shares) = ledger
        .calculate_cost_basis_view(Address::random(), Address::random(), 42.into())
        .call()
        .await?;
    assert_eq!(cost_basis, 1_000.into());
    assert_eq!(shares, 42.into());

    Ok(())
}

#[async_std::test]
async fn test_role_check() -> Result<()> {
    let (provider, mock) = mocked();
    let rbac = SuperRbac::new(Address::random(), provider);

    mock.push::<Bytes, _>(Bytes::from(true.encode()))?;
    assert!(
        rbac.has_role(role_id("EMERGENCY_ADMIN"), Address::random())
            .call()
            .await?
    );

    mock.push::<Bytes, _>(Bytes::from(false.encode()))?;
    assert!(
        !rbac
            .has_role(role_id("EMERGENCY_ADMIN"), Address::random())
            .call()
            .await?
    );

    Ok(())
}

#[test]
fn test_calldata_uses_function_selector() {
    let (provider, _) = mocked();
    let ledger = SuperLedgerConfiguration::new(Address::random(), provider);
    let new_manager = Address::repeat_byte(9);

    let calldata = ledger
        .transfer_manager_role(ORACLE_ID, new_manager)
        .calldata()
        .unwrap();
    assert_eq!(
        TransferManagerRoleCall::selector(),
        id("transferManagerRole(bytes4,address)")
    );
    assert_eq!(calldata[..4], TransferManagerRoleCall::selector());

    let decoded = TransferManagerRoleCall::decode(&calldata).unwrap();
    assert_eq!(decoded.yield_source_oracle_id, ORACLE_ID);
    assert_eq!(decoded.new_manager, new_manager);
}

#[test]
fn test_calldata_with_nested_dynamic_struct() {
    let (provider, _) = mocked();
    let validator = SuperMerkleValidator::new(Address::random(), provider);

    let user_op = PackedUserOperation {
        sender: Address::repeat_byte(7),
        nonce: 3.into(),
        call_data: vec![0xde, 0xad].into(),
        signature: vec![1; 65].into(),
        ..Default::default()
    };
    let calldata = validator
        .validate_user_op(user_op.clone(), [5; 32])
        .calldata()
        .unwrap();

    assert_eq!(calldata[..4], ValidateUserOpCall::selector());
    let (decoded, hash) =
        <(PackedUserOperation, [u8; 32])>::decode(&calldata[4..]).unwrap();
    assert_eq!(decoded, user_op);
    assert_eq!(hash, [5; 32]);
}

#[test]
fn test_parse_config_set_log() {
    assert_eq!(
        YieldSourceOracleConfigSetFilter::signature(),
        H256(keccak256(
            "YieldSourceOracleConfigSet(bytes4,address,uint256,address,address,address)"
        ))
    );

    let log = Log {
        topics: vec![
            YieldSourceOracleConfigSetFilter::signature(),
            bytes4_topic(ORACLE_ID),
            H256::from(Address::repeat_byte(1)),
        ],
        data: (
            U256::from(100),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            Address::repeat_byte(4),
        )
            .encode()
            .into(),
        ..Default::default()
    };

    match parse_log::<SuperLedgerConfigurationEvents>(log).unwrap() {
        SuperLedgerConfigurationEvents::YieldSourceOracleConfigSetFilter(event) => {
            assert_eq!(event.yield_source_oracle_id, ORACLE_ID);
            assert_eq!(event.yield_source_oracle, Address::repeat_byte(1));
            assert_eq!(event.fee_percent, 100.into());
            assert_eq!(event.fee_recipient, Address::repeat_byte(2));
            assert_eq!(event.manager, Address::repeat_byte(3));
            assert_eq!(event.ledger, Address::repeat_byte(4));
        }
        event => panic!("unexpected event {event:?}"),
    }
}

#[test]
fn test_parse_log_with_unknown_topic_fails() {
    let log = Log {
        topics: vec![H256(keccak256("Unknown()"))],
        ..Default::default()
    };
    assert!(parse_log::<SuperLedgerConfigurationEvents>(log).is_err());
}

#[async_std::test]
async fn test_query_events() -> Result<()> {
    let (provider, mock) = mocked();
    let address = Address::random();
    let ledger = SuperLedgerConfiguration::new(address, provider);

    let log = Log {
        address,
        topics: vec![
            ManagerRoleTransferStartedFilter::signature(),
            bytes4_topic(ORACLE_ID),
            H256::from(Address::repeat_byte(3)),
            H256::from(Address::repeat_byte(5)),
        ],
        ..Default::default()
    };
    mock.push::<Vec<Log>, _>(vec![log])?;

    let events = ledger
        .manager_role_transfer_started_filter()
        .from_block(0u64)
        .query()
        .await?;
    assert_eq!(
        events,
        vec![ManagerRoleTransferStartedFilter {
            yield_source_oracle_id: ORACLE_ID,
            current_manager: Address::repeat_byte(3),
            new_manager: Address::repeat_byte(5),
        }]
    );

    Ok(())
}

#[test]
fn test_events_serialize() {
    let event = SuperLedgerConfigurationEvents::ManagerRoleTransferStartedFilter(
        ManagerRoleTransferStartedFilter {
            yield_source_oracle_id: ORACLE_ID,
            current_manager: Address::repeat_byte(3),
            new_manager: Address::repeat_byte(5),
        },
    );
    let json = serde_json::to_value(&event).unwrap();
    let roundtrip: SuperLedgerConfigurationEvents = serde_json::from_value(json).unwrap();
    assert_eq!(roundtrip, event);
}

#[test]
fn test_tuple_getters_return_named_structs() {
    let (provider, _) = mocked();
    let address = Address::random();

    let ledger = SuperLedgerConfiguration::new(address, provider.clone());
    let _: ContractCall<Mocked, YieldSourceOracleConfig> =
        ledger.get_yield_source_oracle_config(ORACLE_ID);
    let _: ContractCall<Mocked, Vec<YieldSourceOracleConfig>> =
        ledger.get_yield_source_oracle_configs(vec![ORACLE_ID]);

    let strategy = SuperVaultStrategy::new(address, provider.clone());
    let _: ContractCall<Mocked, super_vault_strategy::FeeConfig> = strategy.get_config_info();
    let _: ContractCall<Mocked, super_vault_strategy::YieldSource> =
        strategy.get_yield_source(Address::zero());
    let _: ContractCall<Mocked, Vec<super_vault_strategy::YieldSourceInfo>> =
        strategy.get_yield_sources_list();

    let asset = SuperAsset::new(address, provider.clone());
    let _: ContractCall<Mocked, super_asset::TokenData> = asset.get_token_data(Address::zero());
    let _: ContractCall<Mocked, super_asset::AllocationOperationReturnVars> = asset
        .get_allocations_pre_post_operation_deposit(Address::zero(), 1.into(), 1.into(), false);
    let _: ContractCall<Mocked, super_asset::PreviewDepositReturnVars> =
        asset.preview_deposit(super_asset::PreviewDepositArgs::default());
    let _: ContractCall<Mocked, super_asset::PreviewRedeemReturnVars> =
        asset.preview_redeem(super_asset::PreviewRedeemArgs::default());
    let _: ContractCall<Mocked, super_asset::PreviewSwapReturnVars> =
        asset.preview_swap(super_asset::PreviewSwapArgs::default());

    let executor = SuperDestinationExecutor::new(address, provider.clone());
    let _: ContractCall<Mocked, Vec<super_destination_executor::Execution>> = executor
        .validate_hook_compliance(address, address, address, Bytes::default());

    let hook = AcrossSendFundsAndExecuteOnDstHook::new(address, provider);
    let _: ContractCall<Mocked, Vec<across_send_funds_and_execute_on_dst_hook::Execution>> =
        hook.build(address, address, Bytes::default());
}

#[test]
fn test_tuple_arguments_are_named_structs() {
    let (provider, _) = mocked();
    let address = Address::random();

    let ledger = SuperLedgerConfiguration::new(address, provider.clone());
    assert!(ledger
        .propose_yield_source_oracle_config(vec![YieldSourceOracleConfigArgs::default()])
        .calldata()
        .is_some());

    let factory = SuperVaultFactory::new(address, provider.clone());
    assert!(factory
        .create_vault(super_vault_factory::VaultCreationParams::default())
        .calldata()
        .is_some());
    let aggregator = SuperVaultAggregator::new(address, provider.clone());
    assert!(aggregator
        .create_vault(super_vault_aggregator::VaultCreationParams::default())
        .calldata()
        .is_some());
    let asset_factory = SuperAssetFactory::new(address, provider.clone());
    assert!(asset_factory
        .create_super_asset(super_asset_factory::AssetCreationParams::default())
        .calldata()
        .is_some());
    let strategy = SuperVaultStrategy::new(address, provider.clone());
    assert!(strategy
        .execute_hooks(super_vault_strategy::ExecuteArgs::default())
        .calldata()
        .is_some());
    let bank = SuperBank::new(address, provider.clone());
    assert!(bank
        .execute_hooks(super_bank::HookExecutionData::default())
        .calldata()
        .is_some());
    let asset = SuperAsset::new(address, provider.clone());
    assert!(asset
        .deposit(super_asset::DepositArgs::default())
        .calldata()
        .is_some());

    let user_op = PackedUserOperation::default();
    let validator = SuperValidator::new(address, provider.clone());
    assert!(validator
        .validate_user_op(super_validator::PackedUserOperation::default(), [0; 32])
        .calldata()
        .is_some());
    let destination = SuperDestinationValidator::new(address, provider.clone());
    assert!(destination
        .validate_user_op(
            super_destination_validator::PackedUserOperation::default(),
            [0; 32]
        )
        .calldata()
        .is_some());
    let paymaster = SuperNativePaymaster::new(address, provider.clone());
    assert!(paymaster
        .handle_ops(vec![super_native_paymaster::PackedUserOperation::default()])
        .calldata()
        .is_some());
    let merkle = SuperMerkleValidator::new(address, provider);
    assert!(merkle.validate_user_op(user_op, [0; 32]).calldata().is_some());
}

#[test]
fn test_structs_serialize_with_field_names() {
    let json = serde_json::to_value(config(100)).unwrap();
    assert_eq!(json["fee_percent"], serde_json::to_value(U256::from(100)).unwrap());
    assert_eq!(
        json["manager"],
        serde_json::to_value(Address::repeat_byte(3)).unwrap()
    );
}
