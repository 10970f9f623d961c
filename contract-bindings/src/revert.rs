// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Decoding of contract reverts into the custom errors of the bound contracts.

use crate::{
    super_ledger::SuperLedgerErrors, super_ledger_configuration::SuperLedgerConfigurationErrors,
    super_oracle::SuperOracleErrors, super_rbac::SuperRbacErrors,
    super_registry::SuperRegistryErrors,
};
use ethers::{abi::AbiDecode, contract::ContractError, providers::Middleware};

/// Decode revert data as one of the errors of `E`, `None` if no error matches.
pub fn decode_revert<E: AbiDecode>(data: impl AsRef<[u8]>) -> Option<E> {
    E::decode(data).ok()
}

/// Name the error in `data`, trying the errors of every contract the tools interact with.
///
/// Many Superform contracts share error names, so the first match wins.
pub fn revert_name(data: &[u8]) -> Option<String> {
    if let Some(err) = decode_revert::<SuperLedgerConfigurationErrors>(data) {
        return Some(format!("{err:?}"));
    }
    if let Some(err) = decode_revert::<SuperLedgerErrors>(data) {
        return Some(format!("{err:?}"));
    }
    if let Some(err) = decode_revert::<SuperRbacErrors>(data) {
        return Some(format!("{err:?}"));
    }
    if let Some(err) = decode_revert::<SuperOracleErrors>(data) {
        return Some(format!("{err:?}"));
    }
    if let Some(err) = decode_revert::<SuperRegistryErrors>(data) {
        return Some(format!("{err:?}"));
    }
    None
}

pub fn describe_contract_error<M: Middleware>(err: &ContractError<M>) -> String {
    match err.as_revert() {
        Some(data) => match revert_name(data) {
            Some(name) => format!("contract reverted: {name}"),
            None => format!("contract reverted with unknown data {data}"),
        },
        None => err.to_string(),
    }
}
