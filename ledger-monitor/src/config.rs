// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Configuration of the ledger monitor.
//!
//! ```toml
//! sender = "0x..."
//!
//! [oracles.ERC4626YieldSourceOracle]
//! salts = ["ERC4626YieldSourceOracle"]
//!
//! [webhooks.sev3Protocol]
//! url = "https://api.incident.io/v2/alert_events/http/..."
//! secret = "Bearer ..."
//! ```

use crate::incident::Severity;
use anyhow::{Context, Result};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};
use superform_contract_bindings::ids::yield_source_oracle_id;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OracleConfig {
    pub salts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    pub url: Url,
    /// Sent verbatim as the `Authorization` header.
    pub secret: String,
}

/// Names of the networks the monitor may run on, keyed by decimal chain ID.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Networks(pub BTreeMap<String, String>);

impl Default for Networks {
    fn default() -> Self {
        Self(
            [
                (1, "Ethereum"),
                (8453, "Base"),
                (56, "BNB Chain"),
                (42161, "Arbitrum"),
                (10, "Optimism"),
                (137, "Polygon"),
                (130, "Unichain"),
                (43114, "Avalanche"),
                (80094, "Berachain"),
                (146, "Sonic"),
                (100, "Gnosis"),
                (480, "Worldchain"),
            ]
            .into_iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect(),
        )
    }
}

impl Networks {
    pub fn name(&self, chain_id: u64) -> String {
        self.0
            .get(&chain_id.to_string())
            .cloned()
            .unwrap_or_else(|| format!("Network {chain_id}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// The account the monitored oracles were registered by.
    pub sender: Address,
    #[serde(default)]
    pub oracles: BTreeMap<String, OracleConfig>,
    #[serde(default)]
    pub networks: Networks,
    /// Incident webhooks keyed by severity.
    #[serde(default)]
    pub webhooks: BTreeMap<Severity, WebhookConfig>,
}

impl MonitorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read monitor config {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse monitor config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Yield source oracle ids under watch and the names they were configured with.
#[derive(Clone, Debug, Default)]
pub struct MonitoredOracles {
    names: HashMap<[u8; 4], String>,
}

impl MonitoredOracles {
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        let mut names = HashMap::new();
        for (name, oracle) in &config.oracles {
            for salt in &oracle.salts {
                let id = yield_source_oracle_id(salt, config.sender)?;
                tracing::debug!("Monitoring {name} (salt {salt:?}) as 0x{}", hex::encode(id));
                names.insert(id, name.clone());
            }
        }
        Ok(Self { names })
    }

    pub fn name_of(&self, id: &[u8; 4]) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
