//! Fleet store: the authoritative in-memory list of drone records.

pub mod series;
pub mod simulator;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Operational status of a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DroneStatus {
    Active,
    Returning,
    Offline,
}

impl DroneStatus {
    pub fn title(&self) -> &'static str {
        match self {
            DroneStatus::Active => "Active",
            DroneStatus::Returning => "Returning",
            DroneStatus::Offline => "Offline",
        }
    }

    /// Signal quality is derived from status, not measured. Intentional
    /// placeholder until real link telemetry exists.
    pub fn signal_label(&self) -> &'static str {
        match self {
            DroneStatus::Active => "Excellent",
            _ => "Offline",
        }
    }
}

/// Geographic position of a drone.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// One fleet entity: identity plus live telemetry fields.
///
/// Records are created once at load and mutated in place by the
/// telemetry simulator; they are never added or removed at runtime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Drone {
    pub id: String,
    pub location: Location,
    pub status: DroneStatus,
    pub battery: f64,
    pub altitude: f64,
    pub speed: f64,
    pub payload: f64,
    pub wind: String,
}

impl Drone {
    /// Numeric suffix of the id, used to label the map marker.
    /// `DR-7` renders as `7`.
    pub fn marker_label(&self) -> &str {
        self.id.rsplit('-').next().unwrap_or(&self.id)
    }
}

/// Status filter narrowing which drones are shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Returning,
    Offline,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Returning,
        StatusFilter::Offline,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Returning => "Returning",
            StatusFilter::Offline => "Offline",
        }
    }

    pub fn matches(&self, status: DroneStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == DroneStatus::Active,
            StatusFilter::Returning => status == DroneStatus::Returning,
            StatusFilter::Offline => status == DroneStatus::Offline,
        }
    }
}

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("failed to read fleet file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid fleet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate drone id {0}")]
    DuplicateId(String),

    #[error("drone {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

/// The full in-memory collection of drone records, list order preserved.
#[derive(Debug, Clone)]
pub struct Fleet {
    drones: Vec<Drone>,
}

impl Fleet {
    pub fn new(drones: Vec<Drone>) -> Result<Self, FleetError> {
        let mut seen = BTreeSet::new();
        for drone in &drones {
            if !seen.insert(drone.id.clone()) {
                return Err(FleetError::DuplicateId(drone.id.clone()));
            }
            validate(drone)?;
        }
        Ok(Self { drones })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, FleetError> {
        let content = fs::read_to_string(path).map_err(|source| FleetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let drones: Vec<Drone> = serde_json::from_str(&content)?;
        Self::new(drones)
    }

    /// Embedded default fleet, used when no fleet file is given.
    pub fn builtin() -> Self {
        let drones = vec![
            drone("DR-1", 25.2148, 55.2908, DroneStatus::Active, 82.0, 120.0, 34.0, 2.4, "14 km/h NE"),
            drone("DR-2", 25.2042, 55.2710, DroneStatus::Active, 64.0, 95.0, 28.0, 1.1, "9 km/h E"),
            drone("DR-3", 25.2271, 55.3120, DroneStatus::Returning, 37.0, 80.0, 41.0, 0.0, "18 km/h N"),
            drone("DR-4", 25.1980, 55.3055, DroneStatus::Offline, 12.0, 0.0, 0.0, 3.2, "11 km/h SE"),
            drone("DR-5", 25.2190, 55.2811, DroneStatus::Active, 91.0, 140.0, 22.0, 1.8, "7 km/h NW"),
            drone("DR-6", 25.2066, 55.2964, DroneStatus::Offline, 4.0, 0.0, 0.0, 0.0, "12 km/h S"),
        ];
        Self { drones }
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn drones_mut(&mut self) -> &mut [Drone] {
        &mut self.drones
    }

    pub fn get(&self, id: &str) -> Option<&Drone> {
        self.drones.iter().find(|drone| drone.id == id)
    }

    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    /// Drones matching `filter`, in fleet list order.
    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Drone> {
        self.drones
            .iter()
            .filter(|drone| filter.matches(drone.status))
            .collect()
    }

    pub fn count_with(&self, status: DroneStatus) -> usize {
        self.drones
            .iter()
            .filter(|drone| drone.status == status)
            .count()
    }
}

fn validate(drone: &Drone) -> Result<(), FleetError> {
    let invalid = |reason: &str| FleetError::InvalidRecord {
        id: drone.id.clone(),
        reason: reason.to_string(),
    };
    let suffix_ok = drone
        .id
        .rsplit_once('-')
        .map(|(prefix, suffix)| !prefix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) && !suffix.is_empty())
        .unwrap_or(false);
    if !suffix_ok {
        return Err(invalid("id must have the form <prefix>-<numeric suffix>"));
    }
    if !(0.0..=100.0).contains(&drone.battery) {
        return Err(invalid("battery must be within [0,100]"));
    }
    if drone.altitude < 0.0 {
        return Err(invalid("altitude must be non-negative"));
    }
    if drone.speed < 0.0 {
        return Err(invalid("speed must be non-negative"));
    }
    if drone.payload < 0.0 {
        return Err(invalid("payload must be non-negative"));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn drone(
    id: &str,
    lat: f64,
    lng: f64,
    status: DroneStatus,
    battery: f64,
    altitude: f64,
    speed: f64,
    payload: f64,
    wind: &str,
) -> Drone {
    Drone {
        id: id.to_string(),
        location: Location { lat, lng },
        status,
        battery,
        altitude,
        speed,
        payload,
        wind: wind.to_string(),
    }
}
