//! NetworkManager type names → netplan types

use crate::netdef::{DefType, WifiMode};

/// Map a `connection.type` value to a netplan definition type
///
/// NetworkManager writes the aliases `802-3-ethernet` and `802-11-wireless`
/// by default, so both spellings are accepted. Types netplan does not model
/// map to [`DefType::Other`] and are carried through as passthrough.
pub fn def_type_from_nm(type_str: &str) -> DefType {
    match type_str {
        "ethernet" | "802-3-ethernet" => DefType::Ethernet,
        "wifi" | "802-11-wireless" => DefType::Wifi,
        "gsm" | "cdma" => DefType::Modem,
        "bridge" => DefType::Bridge,
        "bond" => DefType::Bond,
        "vlan" => DefType::Vlan,
        "ip-tunnel" | "wireguard" => DefType::Tunnel,
        _ => DefType::Other,
    }
}

/// Whether `connection.type` is fully expressed by the netplan type
///
/// Tunnels need the NetworkManager type to tell ip-tunnel and wireguard
/// apart, so it stays in the passthrough for them.
pub fn consumes_connection_type(def_type: DefType) -> bool {
    match def_type {
        DefType::Ethernet
        | DefType::Wifi
        | DefType::Modem
        | DefType::Bridge
        | DefType::Bond
        | DefType::Vlan => true,
        DefType::Tunnel | DefType::Other => false,
    }
}

/// Map a `wifi.mode` value to a netplan access point mode
///
/// Netplan uses the same mode names, so the YAML reader shares this table.
pub fn wifi_mode_from_nm(mode: &str) -> WifiMode {
    match mode {
        "infrastructure" => WifiMode::Infrastructure,
        "ap" => WifiMode::Ap,
        "adhoc" => WifiMode::Adhoc,
        // e.g. "mesh"
        _ => WifiMode::Other,
    }
}
