//! Deployments JSON: one file per network, one entry per contract key.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{deploy::DeployOutcome, Cli};

/// Raw deploy output kept per entry is capped at this many bytes.
const MAX_RAW_OUTPUT: usize = 16_000;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeploymentsFile {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub deployments: BTreeMap<String, Deployment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub address: String,
    pub rpc_url: String,
    pub deployed_at: String,
    pub authority: String,
    pub premium: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tx_hashes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_stylus_output: Option<String>,
}

pub fn record(cli: &Cli, authority: &str, outcome: &DeployOutcome) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let mut file = load(&cli.deployments_path)?;
    file.network = cli.network.clone();
    file.updated_at = now.clone();
    file.deployments.insert(
        cli.contract_key.clone(),
        Deployment {
            address: outcome.address.clone(),
            rpc_url: cli.rpc_url.clone(),
            deployed_at: now,
            authority: authority.to_string(),
            premium: cli.premium.to_string(),
            tx_hashes: outcome.tx_hashes.clone(),
            cargo_stylus_output: truncate(&outcome.raw_output),
        },
    );
    write_json_atomic(&cli.deployments_path, &file)
}

pub fn load(path: &Path) -> Result<DeploymentsFile> {
    if !path.exists() {
        return Ok(DeploymentsFile::default());
    }
    let existing = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    if existing.trim().is_empty() {
        return Ok(DeploymentsFile::default());
    }
    serde_json::from_str(&existing)
        .with_context(|| format!("failed parsing JSON in {}", path.display()))
}

fn truncate(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut end = trimmed.len().min(MAX_RAW_OUTPUT);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    Some(trimmed[..end].to_string())
}

fn write_json_atomic(path: &Path, file: &DeploymentsFile) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised =
        serde_json::to_string_pretty(file).context("failed serialising deployments JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
