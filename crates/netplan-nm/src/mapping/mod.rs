//! Mapping utilities for NetworkManager → netplan translation

mod filename;
mod nm_types;

pub use filename::netplan_id_from_nm_filename;
pub use nm_types::{consumes_connection_type, def_type_from_nm, wifi_mode_from_nm};
