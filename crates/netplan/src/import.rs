//! Import command for converting NetworkManager profiles to netplan

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use netplan_nm::{import_keyfile, render_netdef, render_to_string, Keyfile, NETPLAN_CONF_DIR};
use std::fs;
use std::path::PathBuf;

/// Arguments for the `import` command
#[derive(Args, Debug)]
#[command(about = "Import connection profiles from external formats")]
pub struct ImportArgs {
    #[command(subcommand)]
    pub command: ImportCommands,
}

#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Import a NetworkManager keyfile (.nmconnection)
    Keyfile(KeyfileArgs),
}

/// Arguments for the `import keyfile` subcommand
#[derive(Args, Debug)]
pub struct KeyfileArgs {
    /// Path to the NetworkManager keyfile
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Netplan id to keep (defaults to NM-<uuid>)
    #[arg(long, value_name = "ID")]
    pub netdef_id: Option<String>,

    /// Root directory holding etc/netplan
    #[arg(long, value_name = "DIR", default_value = "/", value_hint = clap::ValueHint::DirPath)]
    pub root_dir: PathBuf,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,
}

/// Execute the `import` command
pub fn execute(args: ImportArgs) -> Result<()> {
    match args.command {
        ImportCommands::Keyfile(args) => execute_keyfile(args),
    }
}

/// Execute the `import keyfile` subcommand
fn execute_keyfile(args: KeyfileArgs) -> Result<()> {
    if !args.path.is_file() {
        anyhow::bail!("Keyfile does not exist: {}", args.path.display());
    }

    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read keyfile: {}", args.path.display()))?;
    let keyfile = Keyfile::parse_str(&content)
        .with_context(|| format!("Failed to parse keyfile: {}", args.path.display()))?;
    let nd = import_keyfile(keyfile, args.netdef_id.as_deref())
        .with_context(|| format!("Failed to import keyfile: {}", args.path.display()))?;
    log::info!("Imported {} as '{}' ({})", args.path.display(), nd.id, nd.def_type.keyword());

    if args.stdout {
        let (yaml, warnings) = render_to_string(&nd).context("Failed to render netplan YAML")?;
        for warning in warnings {
            eprintln!("Warning: {warning}");
        }
        print!("{yaml}");
        return Ok(());
    }

    let conf_dir = args.root_dir.join(NETPLAN_CONF_DIR);
    fs::create_dir_all(&conf_dir)
        .with_context(|| format!("Failed to create directory: {}", conf_dir.display()))?;

    let report = render_netdef(&nd, Some(&args.root_dir))?;
    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    eprintln!("Wrote {}", report.path.display());

    Ok(())
}
