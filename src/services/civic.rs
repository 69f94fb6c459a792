//! Civic sample data behind the citizen pages.
//!
//! DESIGN
//! ======
//! Every dataset here is static and in-memory. Functions return owned views
//! so route handlers can serialize them directly; nothing is ever written
//! back.

use serde::{Deserialize, Serialize};

use crate::map::{Coordinates, DEFAULT_CENTER};

const fn at(lat: f64, lng: f64) -> Coordinates {
    Coordinates { lat, lng }
}

// =============================================================================
// COMPLAINTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplaintUpdate {
    pub date: &'static str,
    pub message: &'static str,
    pub status: ComplaintStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub status: ComplaintStatus,
    pub date: &'static str,
    pub location: &'static str,
    pub coordinates: Coordinates,
    pub assigned_to: &'static str,
    pub updates: Vec<ComplaintUpdate>,
}

/// Status tab on the complaint tracker. `All` disables status filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTab {
    #[default]
    All,
    Pending,
    InProgress,
    Resolved,
}

impl StatusTab {
    fn admits(self, status: ComplaintStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == ComplaintStatus::Pending,
            Self::InProgress => status == ComplaintStatus::InProgress,
            Self::Resolved => status == ComplaintStatus::Resolved,
        }
    }
}

fn update(date: &'static str, message: &'static str, status: ComplaintStatus) -> ComplaintUpdate {
    ComplaintUpdate { date, message, status }
}

#[must_use]
pub fn complaints() -> Vec<Complaint> {
    use ComplaintStatus::{InProgress, Pending, Resolved};

    vec![
        Complaint {
            id: "C-2023-001",
            title: "Pothole on Main Street",
            description: "Large pothole causing traffic hazard",
            category: "Roads",
            status: Resolved,
            date: "2023-05-01",
            location: "Main Street, near City Park",
            coordinates: at(19.078, 72.88),
            assigned_to: "Officer Johnson",
            updates: vec![
                update("2023-05-01", "Complaint registered", Pending),
                update("2023-05-02", "Assigned to Officer Johnson", InProgress),
                update("2023-05-05", "Road repair team dispatched", InProgress),
                update("2023-05-08", "Pothole fixed and road resurfaced", Resolved),
            ],
        },
        Complaint {
            id: "C-2023-002",
            title: "Streetlight not working",
            description: "Streetlight at the corner of Park Avenue has been out for 3 days",
            category: "Electricity",
            status: InProgress,
            date: "2023-05-03",
            location: "Park Avenue, corner of 5th Street",
            coordinates: at(19.075, 72.877),
            assigned_to: "Officer Wilson",
            updates: vec![
                update("2023-05-03", "Complaint registered", Pending),
                update("2023-05-04", "Assigned to Officer Wilson", InProgress),
                update("2023-05-06", "Electrical team scheduled for inspection", InProgress),
            ],
        },
        Complaint {
            id: "C-2023-003",
            title: "Garbage not collected",
            description: "Garbage has not been collected for the past week",
            category: "Waste",
            status: Pending,
            date: "2023-05-08",
            location: "Garden Road, Residential Block C",
            coordinates: at(19.082, 72.875),
            assigned_to: "Unassigned",
            updates: vec![update("2023-05-08", "Complaint registered", Pending)],
        },
        Complaint {
            id: "C-2023-004",
            title: "Water leakage from pipeline",
            description: "Water leaking from main pipeline causing wastage",
            category: "Water",
            status: Resolved,
            date: "2023-04-25",
            location: "Commerce Street, near the bank",
            coordinates: at(19.074, 72.882),
            assigned_to: "Officer Martinez",
            updates: vec![
                update("2023-04-25", "Complaint registered", Pending),
                update("2023-04-26", "Assigned to Officer Martinez", InProgress),
                update("2023-04-28", "Water department notified", InProgress),
                update("2023-05-02", "Pipeline repaired", Resolved),
            ],
        },
        Complaint {
            id: "C-2023-005",
            title: "Public park maintenance needed",
            description: "Overgrown grass and broken benches in the community park",
            category: "Public Spaces",
            status: InProgress,
            date: "2023-05-05",
            location: "City Center Park",
            coordinates: at(19.077, 72.879),
            assigned_to: "Officer Thompson",
            updates: vec![
                update("2023-05-05", "Complaint registered", Pending),
                update("2023-05-06", "Assigned to Officer Thompson", InProgress),
                update("2023-05-09", "Parks department scheduled maintenance", InProgress),
            ],
        },
    ]
}

/// Complaints whose id, title or location contains `search` (case-insensitive)
/// and whose status passes `tab`.
#[must_use]
pub fn filter_complaints(search: &str, tab: StatusTab) -> Vec<Complaint> {
    let needle = search.to_lowercase();
    complaints()
        .into_iter()
        .filter(|c| {
            let matches_search = c.id.to_lowercase().contains(&needle)
                || c.title.to_lowercase().contains(&needle)
                || c.location.to_lowercase().contains(&needle);
            matches_search && tab.admits(c.status)
        })
        .collect()
}

#[must_use]
pub fn find_complaint(id: &str) -> Option<Complaint> {
    complaints().into_iter().find(|c| c.id == id)
}

// =============================================================================
// EMERGENCY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyKind {
    Medical,
    Police,
    Fire,
}

impl EmergencyKind {
    #[must_use]
    pub fn hotline(self) -> &'static str {
        match self {
            Self::Medical => "108",
            Self::Police => "100",
            Self::Fire => "101",
        }
    }

    fn responder(self) -> ServiceKind {
        match self {
            Self::Medical => ServiceKind::Hospital,
            Self::Police => ServiceKind::Police,
            Self::Fire => ServiceKind::Fire,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Hospital,
    Police,
    Fire,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyService {
    pub id: u32,
    pub name: &'static str,
    pub kind: ServiceKind,
    pub distance: &'static str,
    pub eta: &'static str,
    pub coordinates: Coordinates,
    /// Set on the services that respond to the active emergency.
    pub highlighted: bool,
}

#[must_use]
pub fn nearby_services() -> Vec<NearbyService> {
    vec![
        NearbyService {
            id: 1,
            name: "City Hospital",
            kind: ServiceKind::Hospital,
            distance: "1.2 km",
            eta: "4 mins",
            coordinates: at(19.079, 72.881),
            highlighted: false,
        },
        NearbyService {
            id: 2,
            name: "Central Police Station",
            kind: ServiceKind::Police,
            distance: "0.8 km",
            eta: "3 mins",
            coordinates: at(19.074, 72.875),
            highlighted: false,
        },
        NearbyService {
            id: 3,
            name: "Fire Station 3",
            kind: ServiceKind::Fire,
            distance: "2.1 km",
            eta: "7 mins",
            coordinates: at(19.082, 72.873),
            highlighted: false,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyAlert {
    pub kind: EmergencyKind,
    pub hotline: &'static str,
    pub location: Coordinates,
    pub status: &'static str,
    pub services: Vec<NearbyService>,
}

/// Raise an SOS at `location` (defaults to the map centre).
#[must_use]
pub fn trigger_emergency(kind: EmergencyKind, location: Option<Coordinates>) -> EmergencyAlert {
    let responder = kind.responder();
    let services = nearby_services()
        .into_iter()
        .map(|mut s| {
            s.highlighted = s.kind == responder;
            s
        })
        .collect();
    EmergencyAlert {
        kind,
        hotline: kind.hotline(),
        location: location.unwrap_or(DEFAULT_CENTER),
        status: "Help is on the way",
        services,
    }
}

// =============================================================================
// WASTE PICKUP
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBin {
    pub id: u32,
    pub location: &'static str,
    pub fill_level: u8,
    pub status: &'static str,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickupSlot {
    pub day: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WastePickup {
    pub truck_id: &'static str,
    pub truck_location: Coordinates,
    pub eta_minutes: u32,
    pub progress_percent: u8,
    pub bins: Vec<SmartBin>,
    pub schedule: Vec<PickupSlot>,
}

/// Bins at or above this fill level are flagged for collection.
pub const BIN_FULL_THRESHOLD: u8 = 80;

impl WastePickup {
    #[must_use]
    pub fn bins_needing_pickup(&self) -> Vec<&SmartBin> {
        self.bins
            .iter()
            .filter(|b| b.fill_level >= BIN_FULL_THRESHOLD)
            .collect()
    }
}

#[must_use]
pub fn waste_pickup() -> WastePickup {
    let bin = |id, location, fill_level, status, coordinates| SmartBin { id, location, fill_level, status, coordinates };
    let slot = |day, status| PickupSlot { day, time: "5:30 PM", status };
    WastePickup {
        truck_id: "A-123",
        truck_location: at(19.079, 72.873),
        eta_minutes: 35,
        progress_percent: 65,
        bins: vec![
            bin(1, "Main Street", 85, "Almost Full", at(19.078, 72.88)),
            bin(2, "Park Avenue", 45, "Half Full", at(19.074, 72.876)),
            bin(3, "Market Square", 92, "Full", at(19.072, 72.882)),
            bin(4, "Garden Road", 30, "Low", at(19.08, 72.878)),
        ],
        schedule: vec![
            slot("Today", "Scheduled"),
            slot("Tomorrow", "Scheduled"),
            slot("Monday", "Completed"),
            slot("Wednesday", "Scheduled"),
            slot("Friday", "Scheduled"),
        ],
    }
}

// =============================================================================
// GUARDIAN TRACKING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusRoute {
    pub route_number: &'static str,
    pub driver_name: &'static str,
    pub driver_phone: &'static str,
    pub next_stop: &'static str,
    pub eta: &'static str,
    pub total_stops: u32,
    pub current_stop: u32,
    pub status: &'static str,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildStatus {
    pub name: &'static str,
    pub school: &'static str,
    pub grade: &'static str,
    pub last_updated: &'static str,
    pub status: &'static str,
    pub battery_level: u8,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuardianTracking {
    pub bus: BusRoute,
    pub child: ChildStatus,
}

#[must_use]
pub fn guardian_tracking() -> GuardianTracking {
    GuardianTracking {
        bus: BusRoute {
            route_number: "SB-42",
            driver_name: "Rajesh Kumar",
            driver_phone: "+91 98765 43210",
            next_stop: "Central Park",
            eta: "8 mins",
            total_stops: 12,
            current_stop: 5,
            status: "On Time",
            location: at(19.079, 72.873),
        },
        child: ChildStatus {
            name: "Aanya Sharma",
            school: "Delhi Public School",
            grade: "8th Grade",
            last_updated: "2 mins ago",
            status: "At School",
            battery_level: 68,
            location: at(19.074, 72.876),
        },
    }
}

// =============================================================================
// HEATMAP
// =============================================================================

pub const HEATMAP_MIN_DAYS: u16 = 1;
pub const HEATMAP_MAX_DAYS: u16 = 90;
pub const HEATMAP_DEFAULT_DAYS: u16 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapLayer {
    pub key: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DensityBand {
    pub label: &'static str,
    pub issues: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    pub time_range_days: u16,
    pub layers: Vec<HeatmapLayer>,
    pub density: Vec<DensityBand>,
    pub total_issues: u32,
}

const LAYERS: [(&str, &str, bool); 6] = [
    ("roads", "Roads & Potholes", true),
    ("water", "Water Issues", true),
    ("electricity", "Electricity", true),
    ("waste", "Waste Management", true),
    ("parking", "Parking Issues", false),
    ("trees", "Tree Maintenance", false),
];

/// Heatmap controls. `days` is clamped to the slider range; `toggled` flips
/// the default state of each named layer, unknown names are ignored.
#[must_use]
pub fn heatmap(days: Option<u16>, toggled: &[&str]) -> Heatmap {
    let layers = LAYERS
        .iter()
        .map(|&(key, label, default)| HeatmapLayer { key, label, enabled: default ^ toggled.contains(&key) })
        .collect();
    let density = vec![
        DensityBand { label: "High Density", issues: 47 },
        DensityBand { label: "Medium Density", issues: 124 },
        DensityBand { label: "Low Density", issues: 219 },
    ];
    let total_issues = density.iter().map(|d| d.issues).sum();
    Heatmap {
        time_range_days: days
            .unwrap_or(HEATMAP_DEFAULT_DAYS)
            .clamp(HEATMAP_MIN_DAYS, HEATMAP_MAX_DAYS),
        layers,
        density,
        total_issues,
    }
}

// =============================================================================
// GRIEVANCE
// =============================================================================

/// Category choices offered by the grievance form as (value, label).
pub const GRIEVANCE_CATEGORIES: [(&str, &str); 6] = [
    ("roads", "Roads & Potholes"),
    ("water", "Water Supply"),
    ("electricity", "Electricity"),
    ("waste", "Waste Management"),
    ("public", "Public Spaces"),
    ("other", "Other"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct GrievanceForm {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrievanceReceipt {
    pub reference: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GrievanceError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("recording is empty")]
    EmptyRecording,
}

/// Validate a grievance against a resolved position. An empty location
/// label is derived from the coordinates.
///
/// # Errors
///
/// Returns `MissingField` when title, description or category is blank.
pub fn accept_grievance(form: GrievanceForm, position: Coordinates) -> Result<GrievanceReceipt, GrievanceError> {
    for (name, value) in [("title", &form.title), ("description", &form.description), ("category", &form.category)] {
        if value.trim().is_empty() {
            return Err(GrievanceError::MissingField(name));
        }
    }
    let location = if form.location.trim().is_empty() { position.label() } else { form.location };
    Ok(GrievanceReceipt {
        reference: format!("G-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]).to_uppercase(),
        title: form.title,
        category: form.category,
        location,
        coordinates: position,
    })
}

// =============================================================================
// VOICE COMPLAINT
// =============================================================================

/// Text returned by the simulated speech-to-text step.
pub const DEMO_TRANSCRIPTION: &str = "There's a large pothole on Main Street near the central park entrance. \
It's been there for over a week and is causing traffic problems. Several cars have been damaged. \
Please fix it as soon as possible.";

/// Voice complaint form state: the transcription plus the grievance fields
/// it fills in. `Default` is the blank form at the default centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceDraft {
    pub transcription: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub coordinates: Coordinates,
}

impl Default for VoiceDraft {
    fn default() -> Self {
        Self {
            transcription: String::new(),
            title: String::new(),
            description: String::new(),
            category: String::new(),
            location: String::new(),
            coordinates: DEFAULT_CENTER,
        }
    }
}

impl VoiceDraft {
    /// Set the complaint position from a map click.
    pub fn pick_location(&mut self, position: Coordinates) {
        self.coordinates = position;
        self.location = position.label();
    }

    #[must_use]
    pub fn into_form(self) -> GrievanceForm {
        GrievanceForm {
            title: self.title,
            description: self.description,
            category: self.category,
            location: self.location,
            coordinates: Some(self.coordinates),
        }
    }
}

/// Turn a finished recording into a filled draft. The picked position is
/// kept; the text fields come from the transcription.
///
/// # Errors
///
/// Returns `EmptyRecording` when nothing was recorded.
pub fn transcribe(draft: VoiceDraft, recorded_secs: u32) -> Result<VoiceDraft, GrievanceError> {
    if recorded_secs == 0 {
        return Err(GrievanceError::EmptyRecording);
    }
    Ok(VoiceDraft {
        transcription: DEMO_TRANSCRIPTION.to_owned(),
        title: "Pothole on Main Street".to_owned(),
        description: DEMO_TRANSCRIPTION.to_owned(),
        category: "roads".to_owned(),
        location: "Main Street, near Central Park entrance".to_owned(),
        coordinates: draft.coordinates,
    })
}

/// Recording timer display, `MM:SS`.
#[must_use]
pub fn format_recording_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
#[path = "civic_test.rs"]
mod tests;
