//! Netplan YAML rendering of network definitions

mod emitter;
mod writer;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{EmitError, Error, Result, Warning};
use crate::netdef::NetDefinition;

pub use emitter::{write_backend_settings, write_netdef, write_passthrough};
pub use writer::YamlWriter;

/// Directory holding netplan configuration, relative to the root
pub const NETPLAN_CONF_DIR: &str = "etc/netplan";

/// Outcome of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// File that was written
    pub path: PathBuf,
    /// Values that were replaced by a fallback
    pub warnings: Vec<Warning>,
}

/// File name for a definition
///
/// Profiles coming from NetworkManager sort after the default netplan
/// files, so they take precedence.
pub fn netdef_file_name(nd: &NetDefinition) -> String {
    match &nd.backend_settings.nm.uuid {
        Some(uuid) => format!("90-NM-{uuid}.yaml"),
        None => format!("10-netplan-{}.yaml", nd.id),
    }
}

/// Full output path for a definition below `root_dir` (default `/`)
pub fn netdef_output_path(nd: &NetDefinition, root_dir: Option<&Path>) -> PathBuf {
    root_dir
        .unwrap_or_else(|| Path::new("/"))
        .join(NETPLAN_CONF_DIR)
        .join(netdef_file_name(nd))
}

/// Write a single definition as a netplan YAML file
///
/// Existing content at the target path is replaced. The configuration
/// directory must already exist.
pub fn render_netdef(nd: &NetDefinition, root_dir: Option<&Path>) -> Result<RenderReport> {
    let path = netdef_output_path(nd, root_dir);
    log::debug!("rendering '{}' to {}", nd.id, path.display());

    let file = File::create(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;

    // The file handle is owned by the writer and closed when it drops,
    // including on the error path
    let warnings = render_to_writer(nd, BufWriter::new(file))
        .map_err(|err| Error::from_emit(&path, err))?;

    Ok(RenderReport { path, warnings })
}

/// Render a definition into any sink
pub fn render_to_writer<W: Write>(nd: &NetDefinition, out: W) -> Result<Vec<Warning>, EmitError> {
    let mut w = YamlWriter::new(out);
    let warnings = write_netdef(&mut w, nd)?;
    w.finish()?;
    Ok(warnings)
}

/// Render a definition into a string
pub fn render_to_string(nd: &NetDefinition) -> Result<(String, Vec<Warning>), EmitError> {
    let mut buf = Vec::new();
    let warnings = render_to_writer(nd, &mut buf)?;
    let yaml = String::from_utf8(buf).map_err(|e| EmitError::Encoding(e.to_string()))?;
    Ok((yaml, warnings))
}
