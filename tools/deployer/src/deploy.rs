use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;

use crate::Cli;

pub struct DeployOutcome {
    pub address: String,
    pub tx_hashes: Vec<String>,
    pub raw_output: String,
}

/// Validate a `0x`-prefixed, non-zero 20-byte hex address.
pub fn parse_authority(input: &str) -> Result<String> {
    let re = Regex::new(r"^0x[a-fA-F0-9]{40}$")?;
    let trimmed = input.trim();
    if !re.is_match(trimmed) {
        bail!("invalid authority address `{input}`");
    }
    if trimmed[2..].bytes().all(|b| b == b'0') {
        bail!("authority must not be the zero address");
    }
    Ok(trimmed.to_string())
}

pub fn run_cargo_stylus_deploy(cli: &Cli, authority: &str) -> Result<DeployOutcome> {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&cli.contract_dir);
    cmd.arg("stylus").arg("deploy");
    cmd.arg("-e").arg(&cli.rpc_url);

    if let Some(ref pk_path) = cli.private_key_path {
        cmd.arg("--private-key-path").arg(pk_path);
    } else if let Some(ref pk) = cli.private_key {
        cmd.arg("--private-key").arg(pk);
    } else {
        return Err(anyhow!(
            "missing deployer key: provide --private-key-path or --private-key \
             (or set PRIV_KEY_PATH/PKEY)"
        ));
    }

    cmd.arg("--constructor-args")
        .arg(authority)
        .arg(cli.premium.to_string());
    cmd.args(&cli.passthrough);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let combined = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if !output.status.success() {
        bail!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        );
    }
    parse_deploy_output(combined)
}

/// Pull the contract address and confirmed tx hashes out of `cargo stylus deploy` output.
pub fn parse_deploy_output(raw_output: String) -> Result<DeployOutcome> {
    let re_address = Regex::new(
        r"(?:Deploying program to address|deployed code at address:?) (0x[a-fA-F0-9]{40})",
    )?;
    let re_tx = Regex::new(r"Confirmed tx (0x[a-fA-F0-9]{64})")?;

    let address = re_address
        .captures(&raw_output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            anyhow!("could not parse deployed address from `cargo stylus deploy` output")
        })?;
    let tx_hashes = re_tx
        .captures_iter(&raw_output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(DeployOutcome {
        address,
        tx_hashes,
        raw_output,
    })
}
