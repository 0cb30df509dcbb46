//! Re-render one definition of a netplan file on its own

use anyhow::{Context, Result};
use clap::Args;
use netplan_nm::{render_netdef_from_file, render_to_string, Parser, NETPLAN_CONF_DIR};
use std::fs;
use std::path::PathBuf;

/// Arguments for the `serialize` command
#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// Netplan YAML file to read
    #[arg(value_name = "YAML", value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Id of the definition to write
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Root directory holding etc/netplan
    #[arg(long, value_name = "DIR", default_value = "/", value_hint = clap::ValueHint::DirPath)]
    pub root_dir: PathBuf,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,
}

/// Execute the `serialize` command
pub fn execute(args: SerializeArgs) -> Result<()> {
    if args.stdout {
        let mut parser = Parser::new();
        parser.parse_file(&args.path)?;
        let nd = parser.finish().get(&args.id).with_context(|| {
            format!("No definition '{}' in {}", args.id, args.path.display())
        })?;

        let (yaml, warnings) = render_to_string(nd).context("Failed to render netplan YAML")?;
        for warning in warnings {
            eprintln!("Warning: {warning}");
        }
        print!("{yaml}");
        return Ok(());
    }

    let conf_dir = args.root_dir.join(NETPLAN_CONF_DIR);
    fs::create_dir_all(&conf_dir)
        .with_context(|| format!("Failed to create directory: {}", conf_dir.display()))?;

    let report = render_netdef_from_file(&args.id, &args.path, Some(&args.root_dir))?;
    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    eprintln!("Wrote {}", report.path.display());

    Ok(())
}
