//! Parsers for NetworkManager keyfiles and netplan YAML

mod keyfile;
mod netplan;

pub use keyfile::Keyfile;
pub use netplan::Parser;
