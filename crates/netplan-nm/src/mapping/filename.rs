//! NetworkManager profile file name → netplan id

/// Location and prefix of profiles generated from netplan
const NM_NETPLAN_PREFIX: &str = "/run/NetworkManager/system-connections/netplan-";

const NM_SUFFIX: &str = ".nmconnection";

/// Extract the netplan id from the path of a profile netplan generated
///
/// Wifi profiles carry the URI-escaped SSID between id and suffix, so the
/// SSID has to be given for them.
///
/// Examples:
/// - `/run/NetworkManager/system-connections/netplan-eth0.nmconnection` → `eth0`
/// - `.../netplan-wl0-HOME.nmconnection` with SSID `HOME` → `wl0`
pub fn netplan_id_from_nm_filename(filename: &str, ssid: Option<&str>) -> Option<String> {
    let rest = filename.strip_prefix(NM_NETPLAN_PREFIX)?;

    let suffix = match ssid {
        Some(ssid) => format!("-{}{NM_SUFFIX}", escape_ssid(ssid)),
        None => NM_SUFFIX.to_string(),
    };

    let end = rest.rfind(&suffix)?;
    Some(rest[..end].to_string())
}

/// URI-escape the ASCII characters of an SSID outside `A-Za-z0-9-._~`
///
/// Non-ASCII characters are kept as UTF-8.
fn escape_ssid(ssid: &str) -> String {
    let mut out = String::with_capacity(ssid.len());
    let mut buf = [0u8; 4];
    for ch in ssid.chars() {
        if ch.is_ascii() {
            out.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        } else {
            out.push(ch);
        }
    }
    out
}
