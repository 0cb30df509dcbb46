//! Backend-agnostic network definition model

use indexmap::IndexMap;

/// Definition type, selecting the top-level netplan section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefType {
    Ethernet,
    Wifi,
    Modem,
    Bridge,
    Bond,
    Vlan,
    Tunnel,
    /// Connection type netplan does not model; only passthrough is kept
    Other,
}

impl DefType {
    /// All definition types, in netplan section order
    pub const ALL: [DefType; 8] = [
        DefType::Ethernet,
        DefType::Wifi,
        DefType::Modem,
        DefType::Bridge,
        DefType::Bond,
        DefType::Vlan,
        DefType::Tunnel,
        DefType::Other,
    ];

    /// Section keyword used under `network:` (e.g. `ethernets`)
    pub fn keyword(self) -> &'static str {
        match self {
            DefType::Ethernet => "ethernets",
            DefType::Wifi => "wifis",
            DefType::Modem => "modems",
            DefType::Bridge => "bridges",
            DefType::Bond => "bonds",
            DefType::Vlan => "vlans",
            DefType::Tunnel => "tunnels",
            DefType::Other => "others",
        }
    }

    /// Inverse of [`DefType::keyword`]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.keyword() == keyword)
    }

    /// Physical devices (as opposed to virtual ones like bridges or VLANs)
    pub fn is_physical(self) -> bool {
        matches!(self, DefType::Ethernet | DefType::Wifi | DefType::Modem)
    }
}

/// Network management backend that consumes the definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    #[default]
    Networkd,
    NetworkManager,
    OpenVSwitch,
}

impl Backend {
    /// Renderer name as written in `renderer:`
    pub fn name(self) -> &'static str {
        match self {
            Backend::Networkd => "networkd",
            Backend::NetworkManager => "NetworkManager",
            Backend::OpenVSwitch => "OpenVSwitch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "networkd" => Some(Backend::Networkd),
            "NetworkManager" => Some(Backend::NetworkManager),
            "OpenVSwitch" => Some(Backend::OpenVSwitch),
            _ => None,
        }
    }
}

/// Device selector
///
/// A selector without a name is still meaningful: it stops the
/// NetworkManager renderer from binding the profile to the definition id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSpec {
    /// Original interface name (e.g. "eth0")
    pub original_name: Option<String>,
}

/// Modem parameters used to tell GSM and CDMA connections apart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModemParams {
    pub auto_config: bool,
    pub apn: Option<String>,
    pub device_id: Option<String>,
    pub network_id: Option<String>,
    pub pin: Option<String>,
    pub sim_id: Option<String>,
    pub sim_operator_id: Option<String>,
}

/// NetworkManager settings carried verbatim through netplan
///
/// Keys are `group.key` strings from the NetworkManager keyfile. Iteration
/// follows insertion order, but consumers must not rely on any particular
/// order: the only guarantee is that every pair is visited exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passthrough(IndexMap<String, String>);

impl Passthrough {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a setting, replacing any previous value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Passthrough {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// NetworkManager-specific connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NmSettings {
    /// Connection UUID (`connection.uuid`)
    pub uuid: Option<String>,
    /// Human readable connection name (`connection.id`)
    pub name: Option<String>,
    pub passthrough: Passthrough,
}

/// Per-backend settings of a definition or access point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSettings {
    pub nm: NmSettings,
}

impl BackendSettings {
    /// True if there is nothing to write for this record
    pub fn is_empty(&self) -> bool {
        self.nm.uuid.is_none() && self.nm.name.is_none() && self.nm.passthrough.is_empty()
    }
}

/// Wireless operation mode of an access point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WifiMode {
    #[default]
    Infrastructure,
    Ap,
    Adhoc,
    /// Mode netplan cannot express (e.g. "mesh")
    Other,
}

impl WifiMode {
    /// Netplan name of the mode, `None` for [`WifiMode::Other`]
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            WifiMode::Infrastructure => Some("infrastructure"),
            WifiMode::Ap => Some("ap"),
            WifiMode::Adhoc => Some("adhoc"),
            WifiMode::Other => None,
        }
    }
}

/// A wireless network the device may associate with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String,
    pub hidden: bool,
    pub mode: WifiMode,
    pub backend_settings: BackendSettings,
}

impl AccessPoint {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            ..Self::default()
        }
    }
}

/// A single netplan network definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetDefinition {
    /// Netplan id, unique across the configuration
    pub id: String,
    pub def_type: DefType,
    pub backend: Backend,
    pub match_spec: Option<MatchSpec>,
    pub wake_on_lan: bool,
    pub modem_params: ModemParams,
    pub backend_settings: BackendSettings,
    /// Access points keyed by SSID, only used by wifi definitions
    pub access_points: IndexMap<String, AccessPoint>,
}

impl NetDefinition {
    pub fn new(id: impl Into<String>, def_type: DefType, backend: Backend) -> Self {
        Self {
            id: id.into(),
            def_type,
            backend,
            match_spec: None,
            wake_on_lan: false,
            modem_params: ModemParams::default(),
            backend_settings: BackendSettings::default(),
            access_points: IndexMap::new(),
        }
    }

    /// Add an access point, replacing one with the same SSID
    pub fn add_access_point(&mut self, ap: AccessPoint) {
        self.access_points.insert(ap.ssid.clone(), ap);
    }
}
