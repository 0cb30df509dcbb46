use std::fs;
use std::path::{Path, PathBuf};

use netplan_nm::{render_keyfile, Error, Keyfile, Warning, NETPLAN_CONF_DIR};
use tempfile::TempDir;

const UUID: &str = "87749f1d-334f-40b2-98d4-55db58965f5f";

fn root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(NETPLAN_CONF_DIR)).unwrap();
    dir
}

fn output_path(root: &Path, uuid: &str) -> PathBuf {
    root.join(NETPLAN_CONF_DIR).join(format!("90-NM-{uuid}.yaml"))
}

/// Import `keyfile` below a fresh root and return the written YAML
fn render(keyfile: &str, netdef_id: Option<&str>) -> (String, Vec<Warning>) {
    let root = root();
    let kf = Keyfile::parse_str(keyfile).unwrap();
    let report = render_keyfile(kf, netdef_id, Some(root.path())).unwrap();
    let uuid = Keyfile::parse_str(keyfile)
        .unwrap()
        .get_string("connection", "uuid")
        .unwrap();
    assert_eq!(report.path, output_path(root.path(), &uuid));
    (fs::read_to_string(&report.path).unwrap(), report.warnings)
}

fn render_fails(keyfile: &str) -> Error {
    let root = root();
    let kf = Keyfile::parse_str(keyfile).unwrap();
    let err = render_keyfile(kf, None, Some(root.path())).unwrap_err();
    let written = fs::read_dir(root.path().join(NETPLAN_CONF_DIR)).unwrap().count();
    assert_eq!(written, 0, "no file may be written on failure");
    err
}

const GSM_SETTINGS: &str = "\
[gsm]
apn=internet2.voicestream.com
device-id=da812de91eec16620b06cd0ca5cbc7ea25245222
home-only=true
network-id=254098
password=parliament2
pin=123456
sim-id=89148000000060671234
sim-operator-id=310260
username=george.clinton.again

[ipv4]
dns-search=
method=auto

[ipv6]
addr-gen-mode=stable-privacy
dns-search=
method=auto
";

#[test]
fn test_gsm() {
    let uuid = "a08c5805-7cf5-43f7-afb9-12cb30f6eca3";
    let keyfile = format!(
        "[connection]\nid=T-Mobile Funkadelic 2\nuuid={uuid}\ntype=gsm\n\n{GSM_SETTINGS}"
    );
    let (yaml, warnings) = render(&keyfile, None);
    assert!(warnings.is_empty());
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  modems:
    NM-{uuid}:
      renderer: NetworkManager
      match: {{}}
      apn: "internet2.voicestream.com"
      device-id: "da812de91eec16620b06cd0ca5cbc7ea25245222"
      network-id: "254098"
      pin: "123456"
      sim-id: "89148000000060671234"
      sim-operator-id: "310260"
      networkmanager:
        uuid: {uuid}
        name: "T-Mobile Funkadelic 2"
        passthrough:
          gsm.home-only: "true"
          gsm.password: "parliament2"
          gsm.username: "george.clinton.again"
          ipv4.dns-search: ""
          ipv4.method: "auto"
          ipv6.addr-gen-mode: "stable-privacy"
          ipv6.dns-search: ""
          ipv6.method: "auto"
"#
        )
    );
}

#[test]
fn test_gsm_via_bluetooth() {
    let uuid = "a08c5805-7cf5-43f7-afb9-12cb30f6eca3";
    let keyfile = format!(
        "[connection]\nid=T-Mobile Funkadelic 2\nuuid={uuid}\ntype=bluetooth\n\n{GSM_SETTINGS}\n[proxy]\n"
    );
    let (yaml, _) = render(&keyfile, None);
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  others:
    NM-{uuid}:
      renderer: NetworkManager
      networkmanager:
        uuid: {uuid}
        name: "T-Mobile Funkadelic 2"
        passthrough:
          connection.type: "bluetooth"
          gsm.apn: "internet2.voicestream.com"
          gsm.device-id: "da812de91eec16620b06cd0ca5cbc7ea25245222"
          gsm.home-only: "true"
          gsm.network-id: "254098"
          gsm.password: "parliament2"
          gsm.pin: "123456"
          gsm.sim-id: "89148000000060671234"
          gsm.sim-operator-id: "310260"
          gsm.username: "george.clinton.again"
          ipv4.dns-search: ""
          ipv4.method: "auto"
          ipv6.addr-gen-mode: "stable-privacy"
          ipv6.dns-search: ""
          ipv6.method: "auto"
          proxy._: ""
"#
        )
    );
}

fn check_type(section: &str, nm_type: &str, supported: bool) {
    let (yaml, _) = render(&format!("[connection]\ntype={nm_type}\nuuid={UUID}"), None);

    let is_physical = matches!(section, "ethernets" | "modems" | "wifis");
    let selector = if is_physical { "\n      match: {}" } else { "" };
    let passthrough = if supported {
        String::new()
    } else {
        format!("\n        passthrough:\n          connection.type: \"{nm_type}\"")
    };
    assert_eq!(
        yaml,
        format!(
            "network:\n  version: 2\n  {section}:\n    NM-{UUID}:\n      renderer: NetworkManager{selector}\n      networkmanager:\n        uuid: {UUID}{passthrough}\n"
        ),
        "{nm_type}"
    );
}

#[test]
fn test_connection_types() {
    check_type("ethernets", "ethernet", true);
    check_type("modems", "gsm", true);
    check_type("modems", "cdma", true);
    check_type("bridges", "bridge", true);
    check_type("bonds", "bond", true);
    check_type("vlans", "vlan", true);
    check_type("tunnels", "ip-tunnel", false);
    check_type("tunnels", "wireguard", false);
    check_type("others", "dummy", false);
}

#[test]
fn test_missing_uuid() {
    let err = render_fails("[connection]\ntype=ethernets");
    assert!(matches!(err, Error::Keyfile(_)));
}

#[test]
fn test_missing_type() {
    let err = render_fails(&format!("[connection]\nuuid={UUID}"));
    assert!(matches!(err, Error::Keyfile(_)));
}

#[test]
fn test_wifi() {
    let keyfile = format!(
        "[connection]
type=wifi
uuid={UUID}
permissions=
id=myid with spaces
interface-name=eth0

[wifi]
ssid=SOME-SSID
mode=infrastructure
hidden=true

[ipv4]
method=auto
dns-search="
    );
    let (yaml, warnings) = render(&keyfile, None);
    assert!(warnings.is_empty());
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  wifis:
    NM-{UUID}:
      renderer: NetworkManager
      match:
        name: "eth0"
      access-points:
        "SOME-SSID":
          hidden: true
          mode: infrastructure
          networkmanager:
            uuid: {UUID}
            name: "myid with spaces"
            passthrough:
              connection.permissions: ""
              ipv4.method: "auto"
              ipv4.dns-search: ""
      networkmanager:
        uuid: {UUID}
        name: "myid with spaces"
"#
        )
    );
}

fn check_wifi_mode(netplan_mode: &str, nm_mode: &str) -> Vec<Warning> {
    let keyfile = format!(
        "[connection]\ntype=wifi\nuuid={UUID}\nid=myid with spaces\n\n[ipv4]\nmethod=auto\n\n[wifi]\nssid=SOME-SSID\nmode={nm_mode}"
    );
    let (yaml, warnings) = render(&keyfile, None);

    let kept_mode = if netplan_mode == nm_mode {
        String::new()
    } else {
        format!("\n              wifi.mode: \"{nm_mode}\"")
    };
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  wifis:
    NM-{UUID}:
      renderer: NetworkManager
      match: {{}}
      access-points:
        "SOME-SSID":
          mode: {netplan_mode}
          networkmanager:
            uuid: {UUID}
            name: "myid with spaces"
            passthrough:
              ipv4.method: "auto"{kept_mode}
      networkmanager:
        uuid: {UUID}
        name: "myid with spaces"
"#
        )
    );
    warnings
}

#[test]
fn test_wifi_ap() {
    assert!(check_wifi_mode("ap", "ap").is_empty());
}

#[test]
fn test_wifi_adhoc() {
    assert!(check_wifi_mode("adhoc", "adhoc").is_empty());
}

#[test]
fn test_wifi_unknown_mode_falls_back() {
    let warnings = check_wifi_mode("infrastructure", "mesh");
    assert_eq!(
        warnings,
        vec![Warning::UnsupportedWifiMode {
            netdef_id: format!("NM-{UUID}"),
            ssid: "SOME-SSID".to_string(),
        }]
    );
}

#[test]
fn test_wifi_missing_ssid() {
    let err = render_fails(&format!(
        "[connection]\ntype=wifi\nuuid={UUID}\nid=myid with spaces"
    ));
    assert!(matches!(err, Error::Keyfile(_)));
}

#[test]
fn test_wake_on_lan() {
    let keyfile = format!(
        "[connection]\ntype=ethernet\nuuid={UUID}\nid=myid with spaces\n\n[ethernet]\nwake-on-lan=2\n\n[ipv4]\nmethod=auto"
    );
    let (yaml, _) = render(&keyfile, None);
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  ethernets:
    NM-{UUID}:
      renderer: NetworkManager
      match: {{}}
      wakeonlan: true
      networkmanager:
        uuid: {UUID}
        name: "myid with spaces"
        passthrough:
          ethernet.wake-on-lan: "2"
          ipv4.method: "auto"
"#
        )
    );
}

#[test]
fn test_wake_on_lan_nm_default() {
    let keyfile = format!(
        "[connection]\ntype=ethernet\nuuid={UUID}\nid=myid with spaces\n\n[ethernet]\n\n[ipv4]\nmethod=auto"
    );
    let (yaml, _) = render(&keyfile, None);
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  ethernets:
    NM-{UUID}:
      renderer: NetworkManager
      match: {{}}
      wakeonlan: true
      networkmanager:
        uuid: {UUID}
        name: "myid with spaces"
        passthrough:
          ethernet._: ""
          ipv4.method: "auto"
"#
        )
    );
}

#[test]
fn test_modem_auto_config() {
    let keyfile = format!(
        "[connection]\ntype=gsm\nuuid={UUID}\nid=myid with spaces\n\n[ipv4]\nmethod=auto\n\n[gsm]\nauto-config=true"
    );
    let (yaml, _) = render(&keyfile, None);
    assert_eq!(
        yaml,
        format!(
            r#"network:
  version: 2
  modems:
    NM-{UUID}:
      renderer: NetworkManager
      match: {{}}
      auto-config: true
      networkmanager:
        uuid: {UUID}
        name: "myid with spaces"
        passthrough:
          ipv4.method: "auto"
"#
        )
    );
}

#[test]
fn test_existing_netdef_id() {
    let keyfile = format!(
        "[connection]\ntype=bridge\nuuid={UUID}\nid=renamed netplan bridge\n\n[ipv4]\nmethod=auto"
    );
    let (yaml, _) = render(&keyfile, Some("mybr"));
    insta::assert_snapshot!(yaml, @r###"
    network:
      version: 2
      bridges:
        mybr:
          renderer: NetworkManager
          networkmanager:
            uuid: 87749f1d-334f-40b2-98d4-55db58965f5f
            name: "renamed netplan bridge"
            passthrough:
              ipv4.method: "auto"
    "###);
}
