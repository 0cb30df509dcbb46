//! Reader for netplan YAML files
//!
//! Covers the settings the NetworkManager renderer writes back: match,
//! wake-on-lan, modem parameters, access points and the `networkmanager`
//! blocks. Other netplan settings are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::mapping::wifi_mode_from_nm;
use crate::netdef::{
    AccessPoint, Backend, BackendSettings, DefType, MatchSpec, ModemParams, NetDefinition,
    NmSettings, Passthrough, WifiMode,
};

/// Definition registry filled from one or more netplan files
#[derive(Debug, Default)]
pub struct Parser {
    netdefs: IndexMap<String, NetDefinition>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a netplan YAML file into the registry
    pub fn parse_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_str(&content).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse netplan YAML from string content
    ///
    /// A definition with an id already in the registry replaces the
    /// earlier one.
    pub fn parse_str(&mut self, content: &str) -> Result<(), serde_yaml::Error> {
        let doc: NetplanYaml = serde_yaml::from_str(content)?;
        let Some(network) = doc.network else {
            return Ok(());
        };

        let global_backend = network.renderer.as_deref().and_then(parse_backend);

        for (section, value) in network.sections {
            let Some(def_type) = DefType::from_keyword(&section) else {
                log::debug!("ignoring netplan section '{section}'");
                continue;
            };
            let defs: Option<IndexMap<String, Option<DefinitionYaml>>> =
                serde_yaml::from_value(value)?;

            for (id, def) in defs.unwrap_or_default() {
                let nd = def.unwrap_or_default().into_netdef(id, def_type, global_backend);
                self.netdefs.insert(nd.id.clone(), nd);
            }
        }

        Ok(())
    }

    /// Definitions parsed so far, keyed by id
    pub fn finish(&self) -> &IndexMap<String, NetDefinition> {
        &self.netdefs
    }

    /// Drop all parsed definitions
    pub fn clear(&mut self) {
        self.netdefs.clear();
    }
}

fn parse_backend(name: &str) -> Option<Backend> {
    let backend = Backend::from_name(name);
    if backend.is_none() {
        log::warn!("unknown renderer '{name}', using the default");
    }
    backend
}

// Internal YAML structures for deserialization

#[derive(Debug, Deserialize)]
struct NetplanYaml {
    network: Option<NetworkYaml>,
}

#[derive(Debug, Deserialize)]
struct NetworkYaml {
    #[serde(default, rename = "version")]
    _version: Option<Value>,
    renderer: Option<String>,
    #[serde(flatten)]
    sections: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefinitionYaml {
    renderer: Option<String>,
    #[serde(rename = "match")]
    match_spec: Option<MatchYaml>,
    wakeonlan: Option<bool>,
    auto_config: Option<bool>,
    #[serde(default, deserialize_with = "scalar_string")]
    apn: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    device_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    network_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pin: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    sim_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    sim_operator_id: Option<String>,
    access_points: Option<IndexMap<String, AccessPointYaml>>,
    networkmanager: Option<NetworkManagerYaml>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchYaml {
    #[serde(default, deserialize_with = "scalar_string")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AccessPointYaml {
    hidden: Option<bool>,
    mode: Option<String>,
    networkmanager: Option<NetworkManagerYaml>,
}

#[derive(Debug, Default, Deserialize)]
struct NetworkManagerYaml {
    #[serde(default, deserialize_with = "scalar_string")]
    uuid: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    name: Option<String>,
    passthrough: Option<IndexMap<String, Value>>,
}

impl DefinitionYaml {
    fn into_netdef(self, id: String, def_type: DefType, global: Option<Backend>) -> NetDefinition {
        let backend = self
            .renderer
            .as_deref()
            .and_then(parse_backend)
            .or(global)
            .unwrap_or_default();

        let mut nd = NetDefinition::new(id, def_type, backend);
        nd.match_spec = self.match_spec.map(|m| MatchSpec {
            original_name: m.name,
        });
        nd.wake_on_lan = self.wakeonlan.unwrap_or(false);
        nd.modem_params = ModemParams {
            auto_config: self.auto_config.unwrap_or(false),
            apn: self.apn,
            device_id: self.device_id,
            network_id: self.network_id,
            pin: self.pin,
            sim_id: self.sim_id,
            sim_operator_id: self.sim_operator_id,
        };
        nd.backend_settings = backend_settings(self.networkmanager);

        for (ssid, ap) in self.access_points.unwrap_or_default() {
            let mode = ap.mode.as_deref().map_or(WifiMode::default(), wifi_mode_from_nm);
            if mode == WifiMode::Other {
                log::debug!("{}: unsupported AP mode for SSID {ssid}", nd.id);
            }
            nd.add_access_point(AccessPoint {
                ssid,
                hidden: ap.hidden.unwrap_or(false),
                mode,
                backend_settings: backend_settings(ap.networkmanager),
            });
        }

        nd
    }
}

fn backend_settings(nm: Option<NetworkManagerYaml>) -> BackendSettings {
    let Some(nm) = nm else {
        return BackendSettings::default();
    };

    let passthrough: Passthrough = nm
        .passthrough
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| {
            let value = scalar_to_string(&value);
            if value.is_none() {
                log::warn!("passthrough value of '{key}' is not a scalar, skipping");
            }
            value.map(|v| (key, v))
        })
        .collect();

    BackendSettings {
        nm: NmSettings {
            uuid: nm.uuid,
            name: nm.name,
            passthrough,
        },
    }
}

/// Accept any scalar for a string setting (`pin: 1234` reads as "1234")
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
