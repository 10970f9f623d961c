// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::config::{MonitoredOracles, Networks};
use ethers::{
    contract::LogMeta,
    types::{Address, H256, U256},
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter, Write};
use superform_contract_bindings::super_ledger_configuration::SuperLedgerConfigurationEvents;

/// Incident severities, named after the incident.io routes they are sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Sev1,
    Sev2,
    Sev3Protocol,
    Sev3Backend,
    Sev4Protocol,
    Sev4Backend,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sev1 => "sev1",
            Self::Sev2 => "sev2",
            Self::Sev3Protocol => "sev3Protocol",
            Self::Sev3Backend => "sev3Backend",
            Self::Sev4Protocol => "sev4Protocol",
            Self::Sev4Backend => "sev4Backend",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub dedup_key: String,
}

/// Where an event was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventContext {
    pub chain_id: u64,
    pub block_number: u64,
    pub transaction_hash: H256,
}

impl EventContext {
    pub fn new(chain_id: u64, meta: &LogMeta) -> Self {
        Self {
            chain_id,
            block_number: meta.block_number.as_u64(),
            transaction_hash: meta.transaction_hash,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    ConfigSet,
    ProposalSet,
    ConfigAccepted,
    ProposalCancelled,
    ManagerTransferStarted,
    ManagerTransferAccepted,
}

impl Kind {
    fn key(&self) -> &'static str {
        match self {
            Self::ConfigSet => "oracle-config-set",
            Self::ProposalSet => "oracle-config-proposal-set",
            Self::ConfigAccepted => "oracle-config-accepted",
            Self::ProposalCancelled => "oracle-config-proposal-cancelled",
            Self::ManagerTransferStarted => "manager-role-transfer-started",
            Self::ManagerTransferAccepted => "manager-role-transfer-accepted",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::ConfigSet => "Oracle Configuration Set",
            Self::ProposalSet => "Oracle Configuration Proposal Set",
            Self::ConfigAccepted => "Oracle Configuration Accepted",
            Self::ProposalCancelled => "Oracle Configuration Proposal Cancelled",
            Self::ManagerTransferStarted => "Manager Role Transfer Started",
            Self::ManagerTransferAccepted => "Manager Role Transfer Accepted",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Self::ConfigSet => "A yield source oracle configuration has been set in the SuperLedgerConfiguration contract.",
            Self::ProposalSet => "A new yield source oracle configuration proposal has been created in the SuperLedgerConfiguration contract. It can be accepted after the waiting period.",
            Self::ConfigAccepted => "A yield source oracle configuration proposal has been accepted and is now active in the SuperLedgerConfiguration contract.",
            Self::ProposalCancelled => "A yield source oracle configuration proposal has been cancelled in the SuperLedgerConfiguration contract.",
            Self::ManagerTransferStarted => "A manager role transfer has been initiated for a yield source oracle. The new manager must accept the role for the transfer to complete.",
            Self::ManagerTransferAccepted => "A manager role transfer has been completed for a yield source oracle. The new manager is now active.",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::ProposalCancelled => Severity::Sev4Protocol,
            _ => Severity::Sev3Protocol,
        }
    }
}

fn config_fields(
    yield_source_oracle: Address,
    fee_percent: U256,
    fee_recipient: Address,
    manager: Address,
    ledger: Address,
) -> Vec<(&'static str, String)> {
    vec![
        ("Oracle Address", format!("{yield_source_oracle:?}")),
        ("Fee Percent", fee_percent.to_string()),
        ("Fee Recipient", format!("{fee_recipient:?}")),
        ("Manager", format!("{manager:?}")),
        ("Ledger", format!("{ledger:?}")),
    ]
}

/// Turn a ledger configuration event into an incident, if it concerns a monitored oracle.
pub fn classify(
    event: &SuperLedgerConfigurationEvents,
    ctx: &EventContext,
    oracles: &MonitoredOracles,
    networks: &Networks,
) -> Option<Incident> {
    use SuperLedgerConfigurationEvents::*;

    let (kind, id, fields) = match event {
        YieldSourceOracleConfigSetFilter(e) => (
            Kind::ConfigSet,
            e.yield_source_oracle_id,
            config_fields(
                e.yield_source_oracle,
                e.fee_percent,
                e.fee_recipient,
                e.manager,
                e.ledger,
            ),
        ),
        YieldSourceOracleConfigProposalSetFilter(e) => (
            Kind::ProposalSet,
            e.yield_source_oracle_id,
            config_fields(
                e.yield_source_oracle,
                e.fee_percent,
                e.fee_recipient,
                e.manager,
                e.ledger,
            ),
        ),
        YieldSourceOracleConfigAcceptedFilter(e) => (
            Kind::ConfigAccepted,
            e.yield_source_oracle_id,
            config_fields(
                e.yield_source_oracle,
                e.fee_percent,
                e.fee_recipient,
                e.manager,
                e.ledger,
            ),
        ),
        YieldSourceOracleConfigProposalCancelledFilter(e) => (
            Kind::ProposalCancelled,
            e.yield_source_oracle_id,
            config_fields(
                e.yield_source_oracle,
                e.fee_percent,
                e.fee_recipient,
                e.manager,
                e.ledger,
            ),
        ),
        ManagerRoleTransferStartedFilter(e) => (
            Kind::ManagerTransferStarted,
            e.yield_source_oracle_id,
            vec![
                ("Current Manager", format!("{:?}", e.current_manager)),
                ("New Manager", format!("{:?}", e.new_manager)),
            ],
        ),
        ManagerRoleTransferAcceptedFilter(e) => (
            Kind::ManagerTransferAccepted,
            e.yield_source_oracle_id,
            vec![("New Manager", format!("{:?}", e.new_manager))],
        ),
    };

    let oracle_id = format!("0x{}", hex::encode(id));
    let Some(oracle) = oracles.name_of(&id) else {
        tracing::debug!("Skipping {} for unmonitored oracle {oracle_id}", kind.key());
        return None;
    };
    let network = networks.name(ctx.chain_id);

    let mut description = format!(
        "**{}**\n\n**Network:** {network}\n**Oracle:** {oracle}\n**Oracle ID:** {oracle_id}\n",
        kind.title()
    );
    for (label, value) in fields {
        // Writing to a String cannot fail.
        let _ = writeln!(description, "**{label}:** {value}");
    }
    let _ = write!(
        description,
        "**Transaction:** {:?}\n**Block:** {}\n\n{}",
        ctx.transaction_hash,
        ctx.block_number,
        kind.summary()
    );

    Some(Incident {
        severity: kind.severity(),
        title: format!("{}: {oracle} on {network}", kind.title()),
        description,
        dedup_key: format!("{}-{oracle_id}-{:?}", kind.key(), ctx.transaction_hash),
    })
}
