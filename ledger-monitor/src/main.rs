// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use async_compatibility_layer::logging::{setup_backtrace, setup_logging};
use clap::Parser;
use ledger_monitor::{Monitor, MonitorConfig, Options};
use std::sync::Arc;
use superform_contract_bindings::{
    rpc::connect_http, Contract, Deployments, SuperLedgerConfiguration,
};

#[async_std::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();
    setup_backtrace();

    let opts = Options::parse();
    let deployments = Deployments::load(&opts.deployments)?;
    let chain = deployments.chain(&opts.chain)?;
    let config = MonitorConfig::load(&opts.config)?;

    let provider = Arc::new(connect_http(chain).await?);
    let ledger = SuperLedgerConfiguration::new(
        chain.require(Contract::SuperLedgerConfiguration)?,
        provider,
    );
    let monitor = Monitor::from_config(ledger, chain.chain_id, &config, opts.dry_run)?
        .with_poll_interval(chain.poll_interval())
        .with_max_block_range(opts.max_block_range)?;

    let from_block = opts
        .from_block
        .unwrap_or(chain.contracts.ledger_configuration_deployment_block);
    tracing::info!(
        "Monitoring the ledger configuration on {} from block {from_block}",
        chain.name
    );
    monitor.run(from_block).await
}
