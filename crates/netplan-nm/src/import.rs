//! NetworkManager keyfile → netplan definition import

use std::path::Path;

use crate::emit::{render_netdef, RenderReport};
use crate::error::{KeyfileError, Result};
use crate::mapping::{consumes_connection_type, def_type_from_nm, wifi_mode_from_nm};
use crate::netdef::{AccessPoint, Backend, DefType, MatchSpec, NetDefinition, Passthrough};
use crate::parser::Keyfile;

/// Key name standing in for a group without keys, so the group survives
/// the trip through netplan
pub const NM_EMPTY_GROUP: &str = "_";

/// Build a netplan definition from a NetworkManager keyfile
///
/// Every setting netplan understands is moved into the definition; the
/// rest ends up in the NetworkManager passthrough. `netdef_id` keeps an
/// existing netplan id, otherwise `NM-<uuid>` is used.
pub fn import_keyfile(
    mut kf: Keyfile,
    netdef_id: Option<&str>,
) -> Result<NetDefinition, KeyfileError> {
    let uuid = kf
        .get_string("connection", "uuid")
        .ok_or(KeyfileError::MissingKey {
            group: "connection",
            key: "uuid",
        })?;
    let type_str = kf
        .get_string("connection", "type")
        .ok_or(KeyfileError::MissingKey {
            group: "connection",
            key: "type",
        })?;
    let def_type = def_type_from_nm(&type_str);

    let id = match netdef_id {
        Some(id) => id.to_string(),
        None => format!("NM-{uuid}"),
    };
    let mut nd = NetDefinition::new(id, def_type, Backend::NetworkManager);

    nd.backend_settings.nm.uuid = Some(uuid);
    kf.clear_key("connection", "uuid");
    nd.backend_settings.nm.name = kf.get_string("connection", "id");
    if nd.backend_settings.nm.name.is_some() {
        kf.clear_key("connection", "id");
    }

    // Connection types unknown to netplan are passed through untouched
    if def_type == DefType::Other {
        nd.backend_settings.nm.passthrough = read_passthrough(&kf);
        return Ok(nd);
    }

    if consumes_connection_type(def_type) {
        kf.clear_key("connection", "type");
    }

    // NM profiles usually apply to any interface of their type, so the
    // selector is set even without an interface name
    if def_type.is_physical() {
        let original_name = take_string(&mut kf, "connection", "interface-name");
        nd.match_spec = Some(MatchSpec { original_name });
    }

    import_modem_params(&mut kf, &mut nd);

    // The NM setting is a bit field, netplan only knows on/off; keep the
    // original value in the passthrough
    if kf.has_group("ethernet") {
        nd.wake_on_lan = if kf.has_key("ethernet", "wake-on-lan") {
            kf.get_u64("ethernet", "wake-on-lan").unwrap_or(0) > 0
        } else {
            // NM default
            true
        };
    }

    if def_type == DefType::Wifi {
        let ssid = take_string(&mut kf, "wifi", "ssid").ok_or(KeyfileError::MissingSsid)?;
        let mut ap = AccessPoint::new(ssid);

        if let Some(mode) = kf.get_string("wifi", "mode") {
            ap.mode = wifi_mode_from_nm(&mode);
            if ap.mode.as_str().is_some() {
                kf.clear_key("wifi", "mode");
            }
        }

        ap.hidden = kf.get_bool("wifi", "hidden").unwrap_or(false);
        kf.clear_key("wifi", "hidden");

        // Single access point per profile: it shares the connection identity
        ap.backend_settings.nm.uuid = nd.backend_settings.nm.uuid.clone();
        ap.backend_settings.nm.name = nd.backend_settings.nm.name.clone();
        ap.backend_settings.nm.passthrough = read_passthrough(&kf);
        nd.add_access_point(ap);
    } else {
        nd.backend_settings.nm.passthrough = read_passthrough(&kf);
    }

    Ok(nd)
}

/// Import a keyfile and write it as a netplan file below `root_dir`
pub fn render_keyfile(
    kf: Keyfile,
    netdef_id: Option<&str>,
    root_dir: Option<&Path>,
) -> Result<RenderReport> {
    let nd = import_keyfile(kf, netdef_id).inspect_err(|err| log::warn!("netplan: Keyfile: {err}"))?;
    render_netdef(&nd, root_dir)
}

fn import_modem_params(kf: &mut Keyfile, nd: &mut NetDefinition) {
    let modem = &mut nd.modem_params;
    modem.auto_config = kf.get_bool("gsm", "auto-config").unwrap_or(false);
    kf.clear_key("gsm", "auto-config");

    modem.apn = take_string(kf, "gsm", "apn");
    modem.device_id = take_string(kf, "gsm", "device-id");
    modem.network_id = take_string(kf, "gsm", "network-id");
    modem.pin = take_string(kf, "gsm", "pin");
    modem.sim_id = take_string(kf, "gsm", "sim-id");
    modem.sim_operator_id = take_string(kf, "gsm", "sim-operator-id");
}

/// Read a string and clear it from the keyfile if it was present
fn take_string(kf: &mut Keyfile, group: &str, key: &str) -> Option<String> {
    let value = kf.get_string(group, key)?;
    kf.clear_key(group, key);
    Some(value)
}

/// Collect all remaining settings as `group.key` passthrough entries
fn read_passthrough(kf: &Keyfile) -> Passthrough {
    let mut passthrough = Passthrough::new();

    for group in kf.groups() {
        let mut empty = true;
        for key in kf.keys(group) {
            empty = false;
            match kf.get_string(group, key) {
                Some(value) => passthrough.insert(format!("{group}.{key}"), value),
                None => log::warn!("netplan: Keyfile: cannot read value of {group}.{key}"),
            }
        }
        if empty {
            passthrough.insert(format!("{group}.{NM_EMPTY_GROUP}"), "");
        }
    }

    passthrough
}
