//! Netplan document emitter for a single network definition

use std::io::Write;

use crate::error::{EmitError, Warning};
use crate::netdef::{AccessPoint, BackendSettings, DefType, NetDefinition, Passthrough};

use super::writer::YamlWriter;

/// Netplan config format version
const NETPLAN_VERSION: &str = "2";

/// Mode written when an access point's mode is not supported by netplan
const FALLBACK_WIFI_MODE: &str = "infrastructure";

/// Emit the full netplan document for `nd`
///
/// Returns the non-fatal warnings raised while emitting.
pub fn write_netdef<W: Write>(
    w: &mut YamlWriter<W>,
    nd: &NetDefinition,
) -> Result<Vec<Warning>, EmitError> {
    let mut warnings = Vec::new();

    w.open_mapping()?;
    w.plain("network")?;
    w.open_mapping()?;
    // TODO: write the global renderer once definitions can carry it
    w.plain_pair("version", NETPLAN_VERSION)?;
    w.plain(nd.def_type.keyword())?;
    w.open_mapping()?;
    w.plain(&nd.id)?;
    w.open_mapping()?;
    w.plain_pair("renderer", nd.backend.name())?;

    // Unknown connection types carry their settings as passthrough only
    if nd.def_type != DefType::Other {
        write_definition_fields(w, nd, &mut warnings)?;
    }
    write_backend_settings(w, &nd.backend_settings)?;

    w.close_mapping()?;
    w.close_mapping()?;
    w.close_mapping()?;
    w.close_mapping()?;

    Ok(warnings)
}

fn write_definition_fields<W: Write>(
    w: &mut YamlWriter<W>,
    nd: &NetDefinition,
    warnings: &mut Vec<Warning>,
) -> Result<(), EmitError> {
    if nd.match_spec.is_some() {
        write_match(w, nd)?;
    }

    if nd.wake_on_lan {
        w.plain_pair("wakeonlan", "true")?;
    }

    // Modem settings used to auto-detect GSM vs CDMA
    let modem = &nd.modem_params;
    if modem.auto_config {
        w.plain_pair("auto-config", "true")?;
    }
    for (key, value) in [
        ("apn", &modem.apn),
        ("device-id", &modem.device_id),
        ("network-id", &modem.network_id),
        ("pin", &modem.pin),
        ("sim-id", &modem.sim_id),
        ("sim-operator-id", &modem.sim_operator_id),
    ] {
        if let Some(value) = value {
            w.quoted_pair(key, value)?;
        }
    }

    if nd.def_type == DefType::Wifi {
        write_access_points(w, nd, warnings)?;
    }
    Ok(())
}

fn write_match<W: Write>(w: &mut YamlWriter<W>, nd: &NetDefinition) -> Result<(), EmitError> {
    w.plain("match")?;
    w.open_mapping()?;
    if let Some(name) = nd.match_spec.as_ref().and_then(|m| m.original_name.as_deref()) {
        w.quoted_pair("name", name)?;
    }
    w.close_mapping()
}

/// Emit the `networkmanager:` block, or nothing if `settings` is empty
pub fn write_backend_settings<W: Write>(
    w: &mut YamlWriter<W>,
    settings: &BackendSettings,
) -> Result<(), EmitError> {
    if settings.is_empty() {
        return Ok(());
    }
    let nm = &settings.nm;

    w.plain("networkmanager")?;
    w.open_mapping()?;
    if let Some(uuid) = &nm.uuid {
        w.plain_pair("uuid", uuid)?;
    }
    if let Some(name) = &nm.name {
        w.quoted_pair("name", name)?;
    }
    if !nm.passthrough.is_empty() {
        w.plain("passthrough")?;
        w.open_mapping()?;
        write_passthrough(w, &nm.passthrough)?;
        w.close_mapping()?;
    }
    w.close_mapping()
}

/// Emit every passthrough pair, key plain and value quoted
pub fn write_passthrough<W: Write>(
    w: &mut YamlWriter<W>,
    passthrough: &Passthrough,
) -> Result<(), EmitError> {
    for (key, value) in passthrough.iter() {
        w.plain(key)?;
        w.quoted(value)?;
    }
    Ok(())
}

fn write_access_points<W: Write>(
    w: &mut YamlWriter<W>,
    nd: &NetDefinition,
    warnings: &mut Vec<Warning>,
) -> Result<(), EmitError> {
    w.plain("access-points")?;
    w.open_mapping()?;
    for ap in nd.access_points.values() {
        write_access_point(w, &nd.id, ap, warnings)?;
    }
    w.close_mapping()
}

fn write_access_point<W: Write>(
    w: &mut YamlWriter<W>,
    netdef_id: &str,
    ap: &AccessPoint,
    warnings: &mut Vec<Warning>,
) -> Result<(), EmitError> {
    w.quoted(&ap.ssid)?;
    w.open_mapping()?;
    if ap.hidden {
        w.plain_pair("hidden", "true")?;
    }

    let mode = match ap.mode.as_str() {
        Some(mode) => mode,
        None => {
            let warning = Warning::UnsupportedWifiMode {
                netdef_id: netdef_id.to_string(),
                ssid: ap.ssid.clone(),
            };
            log::warn!("netplan: serialize: {warning}");
            warnings.push(warning);
            FALLBACK_WIFI_MODE
        }
    };
    w.plain_pair("mode", mode)?;

    write_backend_settings(w, &ap.backend_settings)?;
    w.close_mapping()
}
