use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod deploy;
mod deployments;

/// Deploy the anyCall relay with `cargo stylus deploy` and record it in a deployments JSON.
///
/// The relay constructor takes the initial execution authority and the per-gas premium; both
/// are forwarded as `--constructor-args`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory of the Stylus contract crate.
    #[arg(long, default_value = "src/anycall-relay")]
    contract_dir: PathBuf,

    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// File holding the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Initial execution authority (the MPC relayer address).
    #[arg(long, env = "ANYCALL_AUTHORITY")]
    authority: String,

    /// Premium added to the gas price when charging executions, in wei per gas.
    #[arg(long, env = "ANYCALL_PREMIUM", default_value_t = 0)]
    premium: u128,

    #[arg(long, default_value = "deployments.devnet.json")]
    deployments_path: PathBuf,

    /// Key under `deployments` for this contract.
    #[arg(long, default_value = "anycall")]
    contract_key: String,

    /// Network label (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    network: String,

    /// Extra args for `cargo stylus deploy` (after `--`), eg `-- --estimate-gas`.
    #[arg(last = true)]
    passthrough: Vec<String>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let authority = deploy::parse_authority(&cli.authority)?;
    let outcome = deploy::run_cargo_stylus_deploy(&cli, &authority)?;
    deployments::record(&cli, &authority, &outcome)?;

    println!(
        "Deployed `{}` to {} (authority {}, premium {})",
        cli.contract_key, outcome.address, authority, cli.premium
    );
    Ok(())
}
