// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Refresh the ABIs in `contract-bindings/abi` from Foundry build artifacts.
//!
//! The bindings themselves are expanded by `abigen!` when `contract-bindings` is compiled, so this
//! only extracts the ABIs and checks that bindings can be generated for them.

use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;
use ethers::prelude::Abigen;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Clone)]
struct Options {
    /// Directory with the Foundry build artifacts (`<Name>.sol/<Name>.json`).
    #[arg(long, env = "SUPERFORM_ARTIFACTS", default_value = "../out")]
    artifacts: PathBuf,

    /// Directory the ABIs are written to.
    ///
    /// Defaults to the `abi` directory of the `contract-bindings` crate.
    #[arg(long)]
    abi_dir: Option<PathBuf>,

    /// Contract to extract. May be repeated.
    ///
    /// Defaults to every contract which already has an ABI in the ABI directory.
    #[arg(long = "contract")]
    contracts: Vec<String>,
}

#[derive(Debug, Default)]
struct Report {
    written: Vec<String>,
    missing: Vec<String>,
    failed: Vec<(String, String)>,
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    glob::glob(pattern)
        .with_context(|| format!("invalid pattern {pattern}"))?
        .map(|entry| Ok(entry?))
        .collect()
}

/// Names of the contracts with an ABI in `abi_dir`.
fn tracked_contracts(abi_dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<_> = glob_paths(&format!("{}/*.json", abi_dir.display()))?
        .iter()
        .filter_map(|path| path.file_stem()?.to_str().map(String::from))
        .collect();
    names.sort();
    Ok(names)
}

fn find_artifact(artifacts: &Path, name: &str) -> Result<Option<PathBuf>> {
    Ok(glob_paths(&format!(
        "{}/**/{name}.sol/{name}.json",
        artifacts.display()
    ))?
    .into_iter()
    .next())
}

fn extract_abi(artifact: &Path) -> Result<Value> {
    let contents = fs::read_to_string(artifact)
        .with_context(|| format!("failed to read {}", artifact.display()))?;
    let mut json: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", artifact.display()))?;
    let abi = json
        .get_mut("abi")
        .map(Value::take)
        .with_context(|| format!("{} has no ABI", artifact.display()))?;
    ensure!(abi.is_array(), "ABI in {} is not an array", artifact.display());
    Ok(abi)
}

/// Check that every user-defined `internalType` in `abi` reads `<kind> <Name>`.
///
/// `abigen` only emits named structs for tuples typed `struct <Name>` and silently falls back to
/// anonymous tuples otherwise.
fn check_internal_types(abi: &Value) -> Result<()> {
    match abi {
        Value::Array(values) => values.iter().try_for_each(check_internal_types),
        Value::Object(fields) => {
            if let Some(Value::String(ty)) = fields.get("internalType") {
                for kind in ["struct", "enum", "contract"] {
                    if let Some(rest) = ty.strip_prefix(kind) {
                        ensure!(
                            rest.starts_with(' '),
                            "malformed internalType {ty:?}, expected \"{kind} <Name>\""
                        );
                    }
                }
                let tuple = fields
                    .get("type")
                    .and_then(Value::as_str)
                    .map_or(false, |ty| ty.starts_with("tuple"));
                if tuple {
                    ensure!(
                        ty.starts_with("struct "),
                        "tuple with internalType {ty:?} has no struct name"
                    );
                }
            }
            fields.values().try_for_each(check_internal_types)
        }
        _ => Ok(()),
    }
}

/// Check that bindings can be generated for `abi`, then write it to `<abi_dir>/<name>.json`.
fn update_abi(abi_dir: &Path, name: &str, abi: &Value) -> Result<PathBuf> {
    check_internal_types(abi).with_context(|| format!("invalid ABI for {name}"))?;
    let json = serde_json::to_string_pretty(abi)?;
    Abigen::new(name, &json)
        .and_then(|abigen| abigen.generate())
        .map_err(|err| anyhow!("failed to generate bindings for {name}: {err}"))?;

    let path = abi_dir.join(format!("{name}.json"));
    fs::write(&path, json + "\n").with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn update_abis(artifacts: &Path, abi_dir: &Path, names: &[String]) -> Result<Report> {
    fs::create_dir_all(abi_dir)?;
    let mut report = Report::default();
    for name in names {
        let Some(artifact) = find_artifact(artifacts, name)? else {
            report.missing.push(name.clone());
            continue;
        };
        match extract_abi(&artifact).and_then(|abi| update_abi(abi_dir, name, &abi)) {
            Ok(path) => {
                println!("{name}: {}", path.display());
                report.written.push(name.clone());
            }
            Err(err) => report.failed.push((name.clone(), format!("{err:#}"))),
        }
    }
    Ok(report)
}

fn main() -> Result<()> {
    let opts = Options::parse();
    let abi_dir = opts
        .abi_dir
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../contract-bindings/abi"));
    let names = if opts.contracts.is_empty() {
        tracked_contracts(&abi_dir)?
    } else {
        opts.contracts
    };

    let report = update_abis(&opts.artifacts, &abi_dir, &names)?;
    for name in &report.missing {
        println!("No artifact for {name} in {}", opts.artifacts.display());
    }
    for (name, err) in &report.failed {
        println!("{name}: {err}");
    }
    println!("{} ABIs written to {abi_dir:?}", report.written.len());

    ensure!(
        report.failed.is_empty(),
        "failed to update {} ABIs",
        report.failed.len()
    );
    Ok(())
}
