//! Map widget contract and the placeholder HERE provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hand a `MapViewport` (center, zoom, optional marker) to the client
//! map widget and receive clicks back as coordinates. A real map provider
//! must keep this contract; only the projection and the provider calls
//! change.
//!
//! TRADE-OFFS
//! ==========
//! `PlaceholderMap` never touches the network. It logs the request it would
//! issue and returns fixed sample results centred on Mumbai.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Mumbai, the default centre of every map page.
pub const DEFAULT_CENTER: Coordinates = Coordinates { lat: 19.076, lng: 72.8777 };
pub const DEFAULT_ZOOM: u8 = 14;

/// Pixels per degree used by the placeholder click projection.
const PLACEHOLDER_PIXELS_PER_DEGREE: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Human label used by forms that take a picked location.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Lat: {:.6}, Lng: {:.6}", self.lat, self.lng)
    }

    fn query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

// =============================================================================
// VIEWPORT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_position: Option<Coordinates>,
    /// Whether the page wants click callbacks.
    #[serde(default)]
    pub clickable: bool,
}

impl MapViewport {
    #[must_use]
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self { center, zoom, marker_position: None, clickable: false }
    }

    #[must_use]
    pub fn with_marker(mut self, position: Coordinates) -> Self {
        self.marker_position = Some(position);
        self
    }

    #[must_use]
    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    /// Placeholder projection of a click at pixel `(x, y)` inside a widget of
    /// `width` x `height` pixels. Not geospatially accurate.
    #[must_use]
    pub fn project_click(&self, x: f64, y: f64, width: f64, height: f64) -> Coordinates {
        Coordinates {
            lat: self.center.lat + (y - height / 2.0) / PLACEHOLDER_PIXELS_PER_DEGREE,
            lng: self.center.lng + (x - width / 2.0) / PLACEHOLDER_PIXELS_PER_DEGREE,
        }
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub position: Coordinates,
    pub label: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub duration_secs: u32,
    pub length_meters: u32,
    pub polyline: String,
}

/// Travel times between every origin and destination, row-major by origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatrix {
    pub num_origins: usize,
    pub num_destinations: usize,
    pub travel_times_secs: Vec<u32>,
}

/// Area reachable from an origin within `range_secs` of driving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Isoline {
    pub range_secs: u32,
    pub polygons: Vec<String>,
}

#[async_trait::async_trait]
pub trait MapProvider: Send + Sync {
    async fn geocode(&self, address: &str) -> Option<GeocodeResult>;
    async fn calculate_route(&self, origin: Coordinates, destination: Coordinates) -> Option<RouteSummary>;
    /// Multi-point travel-time matrix for route optimization.
    async fn optimize_routes(&self, origins: &[Coordinates], destinations: &[Coordinates]) -> Option<RouteMatrix>;
    async fn isoline(&self, origin: Coordinates, range_secs: u32) -> Option<Isoline>;
}

const GEOCODE_URL: &str = "https://geocode.search.hereapi.com/v1/geocode";
const ROUTER_URL: &str = "https://router.hereapi.com/v8/routes";
const MATRIX_URL: &str = "https://matrix.router.hereapi.com/v8/matrix";
const ISOLINE_URL: &str = "https://isoline.router.hereapi.com/v8/isolines";

/// Travel times returned by the placeholder matrix, cycled over the cells.
const MOCK_TRAVEL_TIMES: [u32; 4] = [300, 600, 900, 1200];

/// Logs the HERE API call it would make and answers with sample data.
#[derive(Debug, Clone)]
pub struct PlaceholderMap {
    api_key: String,
}

impl PlaceholderMap {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into() }
    }

    /// `base` with `params` and the API key appended as an encoded query.
    fn endpoint(&self, base: &str, params: &[(&str, &str)]) -> Option<Url> {
        let mut url = Url::parse_with_params(base, params)
            .inspect_err(|e| tracing::error!(%base, error = %e, "invalid HERE endpoint"))
            .ok()?;
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Some(url)
    }

    #[must_use]
    pub fn geocode_url(&self, address: &str) -> Option<Url> {
        self.endpoint(GEOCODE_URL, &[("q", address)])
    }

    #[must_use]
    pub fn route_url(&self, origin: Coordinates, destination: Coordinates) -> Option<Url> {
        self.endpoint(
            ROUTER_URL,
            &[
                ("transportMode", "car"),
                ("origin", origin.query_param().as_str()),
                ("destination", destination.query_param().as_str()),
                ("return", "polyline"),
            ],
        )
    }

    #[must_use]
    pub fn matrix_url(&self) -> Option<Url> {
        self.endpoint(MATRIX_URL, &[])
    }

    #[must_use]
    pub fn isoline_url(&self, origin: Coordinates, range_secs: u32) -> Option<Url> {
        self.endpoint(
            ISOLINE_URL,
            &[
                ("transportMode", "car"),
                ("origin", origin.query_param().as_str()),
                ("range[type]", "time"),
                ("range[values]", range_secs.to_string().as_str()),
            ],
        )
    }
}

#[async_trait::async_trait]
impl MapProvider for PlaceholderMap {
    async fn geocode(&self, address: &str) -> Option<GeocodeResult> {
        let url = self.geocode_url(address)?;
        tracing::info!(%address, %url, "placeholder geocode");
        Some(GeocodeResult {
            position: DEFAULT_CENTER,
            label: "Mumbai, Maharashtra, India".into(),
            city: "Mumbai".into(),
            country: "India".into(),
        })
    }

    async fn calculate_route(&self, origin: Coordinates, destination: Coordinates) -> Option<RouteSummary> {
        let url = self.route_url(origin, destination)?;
        tracing::info!(%url, "placeholder route");
        Some(RouteSummary { duration_secs: 2700, length_meters: 15_000, polyline: "mock-polyline-data".into() })
    }

    async fn optimize_routes(&self, origins: &[Coordinates], destinations: &[Coordinates]) -> Option<RouteMatrix> {
        let url = self.matrix_url()?;
        tracing::info!(%url, origins = origins.len(), destinations = destinations.len(), "placeholder matrix");
        let cells = origins.len() * destinations.len();
        Some(RouteMatrix {
            num_origins: origins.len(),
            num_destinations: destinations.len(),
            travel_times_secs: MOCK_TRAVEL_TIMES.iter().copied().cycle().take(cells).collect(),
        })
    }

    async fn isoline(&self, origin: Coordinates, range_secs: u32) -> Option<Isoline> {
        let url = self.isoline_url(origin, range_secs)?;
        tracing::info!(%url, range_secs, "placeholder isoline");
        Some(Isoline { range_secs, polygons: vec!["mock-polygon-data".into()] })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
