use assert_cmd::Command;
use std::fs;

const UUID: &str = "87749f1d-334f-40b2-98d4-55db58965f5f";

fn netplan() -> Command {
    Command::cargo_bin("netplan").unwrap()
}

#[test]
fn test_import_keyfile_creates_conf_dir() {
    let root = tempfile::tempdir().unwrap();
    let keyfile = root.path().join("eth.nmconnection");
    fs::write(&keyfile, format!("[connection]\ntype=ethernet\nuuid={UUID}\n")).unwrap();

    netplan()
        .args(["import", "keyfile"])
        .arg(&keyfile)
        .arg("--root-dir")
        .arg(root.path())
        .assert()
        .success();

    let written = fs::read_to_string(
        root.path()
            .join("etc/netplan")
            .join(format!("90-NM-{UUID}.yaml")),
    )
    .unwrap();
    assert_eq!(
        written,
        format!(
            "network:\n  version: 2\n  ethernets:\n    NM-{UUID}:\n      renderer: NetworkManager\n      match: {{}}\n      networkmanager:\n        uuid: {UUID}\n"
        )
    );
}

#[test]
fn test_import_keyfile_stdout() {
    let root = tempfile::tempdir().unwrap();
    let keyfile = root.path().join("br.nmconnection");
    fs::write(&keyfile, format!("[connection]\ntype=bridge\nuuid={UUID}\n")).unwrap();

    let output = netplan()
        .args(["import", "keyfile", "--stdout", "--netdef-id", "br0"])
        .arg(&keyfile)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!(
            "network:\n  version: 2\n  bridges:\n    br0:\n      renderer: NetworkManager\n      networkmanager:\n        uuid: {UUID}\n"
        )
    );
    assert!(!root.path().join("etc").exists());
}

#[test]
fn test_import_keyfile_missing_uuid_fails() {
    let root = tempfile::tempdir().unwrap();
    let keyfile = root.path().join("bad.nmconnection");
    fs::write(&keyfile, "[connection]\ntype=ethernet\n").unwrap();

    netplan()
        .args(["import", "keyfile"])
        .arg(&keyfile)
        .arg("--root-dir")
        .arg(root.path())
        .assert()
        .failure();
}

#[test]
fn test_serialize_stdout() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in.yaml");
    let yaml = "network:\n  version: 2\n  ethernets:\n    eth0:\n      renderer: networkd\n      match:\n        name: \"eth0\"\n";
    fs::write(&input, yaml).unwrap();

    let output = netplan()
        .args(["serialize", "--stdout", "--id", "eth0"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), yaml);
}

#[test]
fn test_serialize_unknown_id_fails() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in.yaml");
    fs::write(&input, "network:\n  ethernets:\n    eth0: {}\n").unwrap();

    netplan()
        .args(["serialize", "--id", "eth1", "--root-dir"])
        .arg(root.path())
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn test_nm_id() {
    let output = netplan()
        .args([
            "nm-id",
            "/run/NetworkManager/system-connections/netplan-wl0-HOME.nmconnection",
            "--ssid",
            "HOME",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "wl0\n");

    netplan()
        .args(["nm-id", "INVALID/netplan-some-id.nmconnection"])
        .assert()
        .failure();
}
