// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Identifiers used as keys by the Superform contracts.

use anyhow::{ensure, Context, Result};
use ethers::{types::Address, utils::keccak256};
use hex::FromHex;

/// Right-pad a UTF-8 salt to 32 bytes, like a Solidity `bytes32` string literal.
pub fn salt_to_bytes32(salt: &str) -> Result<[u8; 32]> {
    let bytes = salt.as_bytes();
    ensure!(bytes.len() <= 32, "salt {salt:?} is longer than 32 bytes");
    let mut padded = [0u8; 32];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(padded)
}

/// `keccak256(abi.encodePacked(salt, sender))`
pub fn derive_with_sender(salt: &str, sender: Address) -> Result<[u8; 32]> {
    let mut packed = Vec::with_capacity(52);
    packed.extend_from_slice(&salt_to_bytes32(salt)?);
    packed.extend_from_slice(sender.as_bytes());
    Ok(keccak256(packed))
}

/// The `bytes4` id under which the ledger configuration stores the oracle deployed with `salt` by
/// `sender`.
pub fn yield_source_oracle_id(salt: &str, sender: Address) -> Result<[u8; 4]> {
    let derived = derive_with_sender(salt, sender)?;
    let mut id = [0u8; 4];
    id.copy_from_slice(&derived[..4]);
    Ok(id)
}

/// The id of a named role or registry entry, `keccak256(name)`.
pub fn role_id(name: &str) -> [u8; 32] {
    keccak256(name.as_bytes())
}

pub fn parse_bytes4(input: &str) -> Result<[u8; 4]> {
    <[u8; 4]>::from_hex(input.trim_start_matches("0x"))
        .with_context(|| format!("invalid bytes4 {input:?}"))
}

pub fn parse_bytes32(input: &str) -> Result<[u8; 32]> {
    <[u8; 32]>::from_hex(input.trim_start_matches("0x"))
        .with_context(|| format!("invalid bytes32 {input:?}"))
}

/// Interpret `input` either as a raw `bytes32` in hex or as a name to be hashed.
pub fn parse_id_or_name(input: &str) -> [u8; 32] {
    if input.starts_with("0x") {
        if let Ok(id) = parse_bytes32(input) {
            return id;
        }
    }
    role_id(input)
}
