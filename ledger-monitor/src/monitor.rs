// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::{
    config::{MonitorConfig, MonitoredOracles, Networks},
    incident::{classify, EventContext, Incident},
    notify::{LogNotifier, Notifier, WebhookNotifier},
};
use anyhow::{ensure, Context, Result};
use async_std::task::sleep;
use clap::Parser;
use ethers::{contract::LogMeta, providers::Middleware};
use std::{path::PathBuf, time::Duration};
use superform_contract_bindings::super_ledger_configuration::{
    SuperLedgerConfiguration, SuperLedgerConfigurationEvents,
};

/// Largest block range requested in a single `eth_getLogs` call by default.
pub const DEFAULT_MAX_BLOCK_RANGE: u64 = 50_000;

#[derive(Parser, Debug, Clone)]
pub struct Options {
    /// Path of the deployment file with the RPC and contract addresses of each chain.
    #[arg(
        long,
        env = "SUPERFORM_DEPLOYMENTS",
        default_value = "deployments.toml"
    )]
    pub deployments: PathBuf,

    /// Name of the chain to monitor.
    #[arg(short, long, env = "SUPERFORM_CHAIN")]
    pub chain: String,

    /// Path of the monitor configuration with the oracles to watch and the incident webhooks.
    #[arg(long, env = "SUPERFORM_MONITOR_CONFIG", default_value = "monitor.toml")]
    pub config: PathBuf,

    /// Block to start scanning from.
    ///
    /// Defaults to the deployment block of the ledger configuration.
    #[arg(long, env = "SUPERFORM_MONITOR_FROM_BLOCK")]
    pub from_block: Option<u64>,

    /// Largest block range to request events for at once.
    #[arg(
        long,
        env = "SUPERFORM_MONITOR_MAX_BLOCK_RANGE",
        default_value_t = DEFAULT_MAX_BLOCK_RANGE
    )]
    pub max_block_range: u64,

    /// Only log incidents, even if webhooks are configured.
    #[arg(long, env = "SUPERFORM_MONITOR_DRY_RUN")]
    pub dry_run: bool,
}

/// Watches the ledger configuration of one chain and raises incidents for changes to monitored
/// oracles.
pub struct Monitor<M> {
    ledger: SuperLedgerConfiguration<M>,
    chain_id: u64,
    oracles: MonitoredOracles,
    networks: Networks,
    notifiers: Vec<Box<dyn Notifier>>,
    poll_interval: Duration,
    max_block_range: u64,
}

impl<M: Middleware + 'static> Monitor<M> {
    pub fn new(
        ledger: SuperLedgerConfiguration<M>,
        chain_id: u64,
        oracles: MonitoredOracles,
        networks: Networks,
    ) -> Self {
        Self {
            ledger,
            chain_id,
            oracles,
            networks,
            notifiers: vec![Box::new(LogNotifier)],
            poll_interval: Duration::from_secs(7),
            max_block_range: DEFAULT_MAX_BLOCK_RANGE,
        }
    }

    pub fn from_config(
        ledger: SuperLedgerConfiguration<M>,
        chain_id: u64,
        config: &MonitorConfig,
        dry_run: bool,
    ) -> Result<Self> {
        let oracles = MonitoredOracles::from_config(config)?;
        if oracles.is_empty() {
            tracing::warn!("No oracles configured, no incidents will be raised");
        }
        let mut monitor = Self::new(ledger, chain_id, oracles, config.networks.clone());
        if dry_run {
            tracing::info!("Dry run, incidents are only logged");
        } else if !config.webhooks.is_empty() {
            monitor = monitor.with_notifier(WebhookNotifier::new(config.webhooks.clone()));
        }
        Ok(monitor)
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Box::new(notifier));
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_block_range(mut self, max_block_range: u64) -> Result<Self> {
        ensure!(max_block_range > 0, "the block range must not be empty");
        self.max_block_range = max_block_range;
        Ok(self)
    }

    /// Classify one event and dispatch the resulting incident to every notifier.
    pub async fn handle(
        &self,
        event: &SuperLedgerConfigurationEvents,
        meta: &LogMeta,
    ) -> Option<Incident> {
        let ctx = EventContext::new(self.chain_id, meta);
        let incident = classify(event, &ctx, &self.oracles, &self.networks)?;
        for notifier in &self.notifiers {
            if let Err(err) = notifier.notify(&incident).await {
                tracing::error!("Failed to send incident {}: {err:#}", incident.dedup_key);
            }
        }
        Some(incident)
    }

    /// Process the events in `from..=to`.
    async fn scan(&self, from: u64, to: u64) -> Result<()> {
        let events = self
            .ledger
            .events()
            .from_block(from)
            .to_block(to)
            .query_with_meta()
            .await
            .with_context(|| format!("failed to query events in blocks {from}..={to}"))?;
        tracing::debug!(
            "Found {} ledger configuration events in blocks {from}..={to}",
            events.len()
        );
        for (event, meta) in &events {
            self.handle(event, meta).await;
        }
        Ok(())
    }

    /// Process the events emitted from block `*next` up to the head of the chain.
    ///
    /// `*next` is advanced past every range that was processed, so on error it is the first block
    /// still to be scanned.
    pub async fn poll(&self, next: &mut u64) -> Result<()> {
        let head = self
            .ledger
            .client()
            .get_block_number()
            .await
            .context("failed to get the block number")?
            .as_u64();
        while *next <= head {
            let end = head.min(*next + (self.max_block_range - 1));
            self.scan(*next, end).await?;
            *next = end + 1;
        }
        Ok(())
    }

    /// Process the events already emitted since `from_block`.
    ///
    /// Returns the first block not covered.
    pub async fn catch_up(&self, from_block: u64) -> Result<u64> {
        let mut next = from_block;
        self.poll(&mut next).await?;
        tracing::info!("Processed ledger configuration events in blocks {from_block}..{next}");
        Ok(next)
    }

    /// Poll for new events forever.
    ///
    /// Failed polls are logged and retried from the first block not yet processed.
    pub async fn run(&self, from_block: u64) -> Result<()> {
        let mut next = from_block;
        tracing::info!("Watching ledger configuration events from block {next}");
        loop {
            if let Err(err) = self.poll(&mut next).await {
                tracing::error!(
                    "Failed to poll ledger configuration events at block {next}: {err:#}"
                );
            }
            sleep(self.poll_interval).await;
        }
    }
}
