//! Netplan id lookup for generated NetworkManager profiles

use anyhow::Result;
use clap::Args;
use netplan_nm::netplan_id_from_nm_filename;

/// Arguments for the `nm-id` command
#[derive(Args, Debug)]
pub struct NmIdArgs {
    /// Full path of the NetworkManager profile
    #[arg(value_name = "FILENAME")]
    pub filename: String,

    /// SSID of the access point, for wifi profiles
    #[arg(long)]
    pub ssid: Option<String>,
}

/// Execute the `nm-id` command
pub fn execute(args: NmIdArgs) -> Result<()> {
    match netplan_id_from_nm_filename(&args.filename, args.ssid.as_deref()) {
        Some(id) => {
            println!("{id}");
            Ok(())
        }
        None => anyhow::bail!("Not a netplan generated profile: {}", args.filename),
    }
}
