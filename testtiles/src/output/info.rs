//! Per-vessel information documents.

use serde::{Deserialize, Serialize};

/// Name of the info file inside a series tileset.
pub const INFO_FILE_NAME: &str = "info";

/// Vessel names handed out by series group, wrapping around.
pub const VESSEL_NAMES: [&str; 7] = ["Oden", "Tor", "Frej", "Loke", "Balder", "Freja", "Mimer"];

/// Sample identity of the vessel behind one series group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselInfo {
    pub mmsi: String,
    pub callsign: String,
    pub vesselname: String,
}

impl VesselInfo {
    pub fn for_series_group(group: u64) -> Self {
        let name = VESSEL_NAMES[(group % VESSEL_NAMES.len() as u64) as usize];
        Self {
            mmsi: group.to_string(),
            callsign: format!("SE{}", group),
            vesselname: name.to_string(),
        }
    }
}
