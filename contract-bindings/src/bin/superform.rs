// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::{anyhow, bail, Context, Result};
use async_compatibility_layer::logging::{setup_backtrace, setup_logging};
use clap::{Parser, Subcommand};
use ethers::{
    contract::ContractError,
    providers::{Http, Middleware, Provider},
    types::{Address, TransactionReceipt, U256},
};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use superform_contract_bindings::{
    ids::{parse_bytes4, parse_id_or_name},
    revert::describe_contract_error,
    rpc::{connect_http, connect_signer},
    ChainConfig, Contract, Deployments, ERC4626YieldSourceOracle, SuperLedgerConfiguration,
    SuperOracle, SuperRbac, SuperRegistry,
};

/// Inspect and administer the Superform v2 contracts of one chain.
#[derive(Parser, Debug, Clone)]
pub struct Options {
    /// Path of the deployment file with the RPC and contract addresses of each chain.
    #[arg(
        long,
        env = "SUPERFORM_DEPLOYMENTS",
        default_value = "deployments.toml"
    )]
    pub deployments: PathBuf,

    /// Name of the chain in the deployment file.
    #[arg(short, long, env = "SUPERFORM_CHAIN")]
    pub chain: String,

    /// The mnemonic of the wallet used to sign transactions.
    ///
    /// Only needed for the commands that send transactions.
    #[arg(long, env = "SUPERFORM_MNEMONIC")]
    pub mnemonic: Option<String>,

    /// The account index of the signing wallet.
    #[arg(long, env = "SUPERFORM_ACCOUNT_INDEX", default_value = "0")]
    pub account_index: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the configuration of yield source oracles in the ledger configuration.
    LedgerConfig {
        #[arg(required = true, value_parser = |arg: &str| parse_bytes4(arg))]
        ids: Vec<[u8; 4]>,
    },
    /// Check whether an account holds a role in the RBAC registry.
    HasRole {
        /// Role name or 0x-prefixed role id.
        #[arg(long)]
        role: String,
        #[arg(long)]
        account: Address,
    },
    /// List the members of a role in the RBAC registry.
    RoleMembers {
        /// Role name or 0x-prefixed role id.
        #[arg(long)]
        role: String,
    },
    /// Look up an address in the registry.
    RegistryAddress {
        /// Entry name or 0x-prefixed entry id.
        id: String,
    },
    /// Quote `amount` of `base` in `quote` with the oracle.
    Quote {
        #[arg(long)]
        base: Address,
        #[arg(long)]
        quote: Address,
        #[arg(
            long,
            value_parser = |arg: &str| U256::from_dec_str(arg)
        )]
        amount: U256,
    },
    /// Print the price per share of a yield source as reported by a yield source oracle.
    PricePerShare {
        #[arg(long)]
        oracle: Address,
        #[arg(long)]
        yield_source: Address,
    },
    /// Print the events of the ledger configuration, one JSON object per line.
    LedgerEvents {
        /// Defaults to the deployment block of the ledger configuration.
        #[arg(long)]
        from_block: Option<u64>,
    },
    /// Print the deployment of the chain as a dotenv file.
    Dotenv,
    /// Grant or revoke a role in the RBAC registry.
    SetRole {
        #[arg(long)]
        account: Address,
        /// Role name or 0x-prefixed role id.
        #[arg(long)]
        role: String,
        #[arg(long)]
        revoke: bool,
    },
    /// Accept the pending configuration proposals of yield source oracles.
    AcceptConfigProposal {
        #[arg(required = true, value_parser = |arg: &str| parse_bytes4(arg))]
        ids: Vec<[u8; 4]>,
    },
}

fn contract_err<M: Middleware>(err: ContractError<M>) -> anyhow::Error {
    anyhow!(describe_contract_error(&err))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn log_receipt(receipt: Option<TransactionReceipt>) -> Result<()> {
    let receipt = receipt.context("transaction dropped from the mempool")?;
    if receipt.status == Some(0.into()) {
        bail!("transaction {:?} reverted", receipt.transaction_hash);
    }
    tracing::info!(
        "Transaction {:?} included in block {:?}",
        receipt.transaction_hash,
        receipt.block_number
    );
    Ok(())
}

async fn query(chain: &ChainConfig, provider: Arc<Provider<Http>>, command: Command) -> Result<()> {
    match command {
        Command::LedgerConfig { ids } => {
            let ledger = SuperLedgerConfiguration::new(
                chain.require(Contract::SuperLedgerConfiguration)?,
                provider,
            );
            let configs = ledger
                .get_yield_source_oracle_configs(ids.clone())
                .call()
                .await
                .map_err(contract_err)?;
            let configs: Vec<_> = ids
                .iter()
                .zip(configs)
                .map(|(id, config)| {
                    serde_json::json!({
                        "yieldSourceOracleId": format!("0x{}", hex::encode(id)),
                        "config": config,
                    })
                })
                .collect();
            print_json(&configs)
        }
        Command::HasRole { role, account } => {
            let rbac = SuperRbac::new(chain.require(Contract::SuperRbac)?, provider);
            let has_role = rbac
                .has_role(parse_id_or_name(&role), account)
                .call()
                .await
                .map_err(contract_err)?;
            println!("{has_role}");
            Ok(())
        }
        Command::RoleMembers { role } => {
            let rbac = SuperRbac::new(chain.require(Contract::SuperRbac)?, provider);
            let members = rbac
                .get_role_members(parse_id_or_name(&role))
                .call()
                .await
                .map_err(contract_err)?;
            print_json(&members)
        }
        Command::RegistryAddress { id } => {
            let registry = SuperRegistry::new(chain.require(Contract::SuperRegistry)?, provider);
            let address = registry
                .get_address(parse_id_or_name(&id))
                .call()
                .await
                .map_err(contract_err)?;
            println!("{address:?}");
            Ok(())
        }
        Command::Quote {
            base,
            quote,
            amount,
        } => {
            let oracle = SuperOracle::new(chain.require(Contract::SuperOracle)?, provider);
            let quote_amount = oracle
                .get_quote(amount, base, quote)
                .call()
                .await
                .map_err(contract_err)?;
            println!("{quote_amount}");
            Ok(())
        }
        Command::PricePerShare {
            oracle,
            yield_source,
        } => {
            let oracle = ERC4626YieldSourceOracle::new(oracle, provider);
            let pps = oracle
                .get_price_per_share(yield_source)
                .call()
                .await
                .map_err(contract_err)?;
            println!("{pps}");
            Ok(())
        }
        Command::LedgerEvents { from_block } => {
            let ledger = SuperLedgerConfiguration::new(
                chain.require(Contract::SuperLedgerConfiguration)?,
                provider,
            );
            let from_block = from_block
                .unwrap_or(chain.contracts.ledger_configuration_deployment_block);
            let events = ledger
                .events()
                .from_block(from_block)
                .query_with_meta()
                .await
                .map_err(contract_err)?;
            tracing::info!("Found {} events since block {from_block}", events.len());
            for (event, meta) in events {
                println!(
                    "{}",
                    serde_json::json!({
                        "blockNumber": meta.block_number.as_u64(),
                        "transactionHash": format!("{:?}", meta.transaction_hash),
                        "event": event,
                    })
                );
            }
            Ok(())
        }
        Command::Dotenv | Command::SetRole { .. } | Command::AcceptConfigProposal { .. } => {
            unreachable!("handled by `run`")
        }
    }
}

async fn transact(
    chain: &ChainConfig,
    provider: Arc<Provider<Http>>,
    mnemonic: &str,
    account_index: u32,
    command: Command,
) -> Result<()> {
    let signer = Arc::new(connect_signer(
        (*provider).clone(),
        mnemonic,
        account_index,
        chain.chain_id,
    )?);
    match command {
        Command::SetRole {
            account,
            role,
            revoke,
        } => {
            let rbac = SuperRbac::new(chain.require(Contract::SuperRbac)?, signer);
            tracing::info!(
                "{} role {role} for {account:?}",
                if revoke { "Revoking" } else { "Granting" }
            );
            let receipt = rbac
                .set_role(account, parse_id_or_name(&role), !revoke)
                .send()
                .await
                .map_err(contract_err)?
                .await?;
            log_receipt(receipt)
        }
        Command::AcceptConfigProposal { ids } => {
            let ledger = SuperLedgerConfiguration::new(
                chain.require(Contract::SuperLedgerConfiguration)?,
                signer,
            );
            tracing::info!("Accepting configuration proposals for {} oracles", ids.len());
            let receipt = ledger
                .accept_yield_source_oracle_config_proposal(ids)
                .send()
                .await
                .map_err(contract_err)?
                .await?;
            log_receipt(receipt)
        }
        _ => unreachable!("handled by `run`"),
    }
}

impl Command {
    fn sends_transaction(&self) -> bool {
        matches!(
            self,
            Command::SetRole { .. } | Command::AcceptConfigProposal { .. }
        )
    }
}

async fn run(opts: Options) -> Result<()> {
    let deployments = Deployments::load(&opts.deployments)?;
    let chain = deployments.chain(&opts.chain)?;

    if matches!(opts.command, Command::Dotenv) {
        // Does not need a connection.
        print!("{}", chain.to_dotenv());
        return Ok(());
    }

    let provider = Arc::new(connect_http(chain).await?);
    if opts.command.sends_transaction() {
        let mnemonic = opts
            .mnemonic
            .as_deref()
            .context("a mnemonic is required to send transactions")?;
        transact(chain, provider, mnemonic, opts.account_index, opts.command).await
    } else {
        query(chain, provider, opts.command).await
    }
}

#[async_std::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();
    setup_backtrace();

    let opts = Options::parse();
    run(opts).await
}
