use anyhow::Result;
use clap::{Parser, Subcommand};

mod import;
mod nm_id;
mod serialize;

#[derive(Parser)]
#[command(name = "netplan")]
#[command(about = "Netplan YAML tooling for NetworkManager", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import NetworkManager connection profiles into netplan
    Import(import::ImportArgs),

    /// Re-render a single definition of a netplan file
    Serialize(serialize::SerializeArgs),

    /// Recover the netplan id from a generated NetworkManager profile path
    NmId(nm_id::NmIdArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Import(args) => import::execute(args),
        Commands::Serialize(args) => serialize::execute(args),
        Commands::NmId(args) => nm_id::execute(args),
    }
}
