//! Netplan YAML renderer for NetworkManager
//!
//! Turns NetworkManager connection profiles into netplan definitions and
//! writes them back as netplan YAML, keeping every setting netplan does not
//! model in a `passthrough` block so that nothing is lost on the way.

pub mod emit;
pub mod error;
pub mod import;
pub mod mapping;
pub mod netdef;
pub mod parser;

use std::path::Path;

pub use emit::{render_netdef, render_to_string, RenderReport, NETPLAN_CONF_DIR};
pub use error::{Error, KeyfileError, Result, Warning};
pub use import::{import_keyfile, render_keyfile};
pub use mapping::netplan_id_from_nm_filename;
pub use netdef::{AccessPoint, Backend, DefType, NetDefinition, WifiMode};
pub use parser::{Keyfile, Parser};

/// Parse a netplan file and write the definition `netdef_id` from it
///
/// The definition is rendered on its own, in a file named after its
/// NetworkManager UUID if it has one.
pub fn render_netdef_from_file(
    netdef_id: &str,
    read_path: &Path,
    root_dir: Option<&Path>,
) -> Result<RenderReport> {
    let mut parser = Parser::new();
    parser.parse_file(read_path)?;

    let nd = parser
        .finish()
        .get(netdef_id)
        .ok_or_else(|| Error::UnknownNetdef(netdef_id.to_string()))?;
    let report = render_netdef(nd, root_dir)?;

    parser.clear();
    Ok(report)
}
