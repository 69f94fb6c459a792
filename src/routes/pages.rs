//! Page views and civic API handlers.
//!
//! Every page route sits behind the route guard and answers with a JSON view
//! model. Dashboard pages share one shell (user plus role sidebar) and put
//! the page's own data under `content`.

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use super::auth::{AuthSession, AuthUser, auth_error_response};
use crate::map::{Coordinates, DEFAULT_CENTER, DEFAULT_ZOOM, MapViewport};
use crate::services::backend::CREDENTIALS;
use crate::services::civic::{self, EmergencyKind, GrievanceError, GrievanceForm, StatusTab, VoiceDraft};
use crate::services::dashboard;
use crate::services::guard::{FORGOT_PASSWORD_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::services::session::{Role, User};
use crate::state::AppState;

type PageResult = Result<Json<Value>, Response>;

fn require_user(session: AuthSession) -> Result<User, Response> {
    session.require_user().map_err(|e| auth_error_response(&e))
}

fn dashboard_page(user: &User, uri: &Uri, content: Value) -> Json<Value> {
    Json(json!({
        "user": user,
        "sidebar": dashboard::sidebar(user.role, uri.path()),
        "content": content,
    }))
}

// =============================================================================
// PUBLIC PAGES
// =============================================================================

/// `GET /`: landing page.
pub async fn landing(session: AuthSession) -> Json<Value> {
    Json(json!({
        "page": "landing",
        "title": "CivicSphere",
        "tagline": "Empowering citizens, digitizing governance, optimizing public infrastructure.",
        "user": session.user,
        "roles": Role::ALL,
        "links": { "login": LOGIN_PATH, "register": REGISTER_PATH },
    }))
}

/// `GET /login`
pub async fn login_page() -> Json<Value> {
    let demo_accounts: Vec<String> = CREDENTIALS
        .iter()
        .map(|c| format!("{} / {}", c.email, c.password))
        .collect();
    Json(json!({
        "page": "login",
        "demo_accounts": demo_accounts,
        "links": { "register": REGISTER_PATH, "forgot_password": FORGOT_PASSWORD_PATH },
    }))
}

/// `GET /register`
pub async fn register_page() -> Json<Value> {
    Json(json!({ "page": "register", "user_types": Role::ALL, "links": { "login": LOGIN_PATH } }))
}

/// `GET /forgot-password`
pub async fn forgot_password_page() -> Json<Value> {
    Json(json!({ "page": "forgot-password", "links": { "login": LOGIN_PATH } }))
}

/// Fallback for paths no route matches. Runs after the guard.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "no such page");
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

// =============================================================================
// DASHBOARD PAGES
// =============================================================================

/// `GET /dashboard`: role overview.
pub async fn overview(session: AuthSession, uri: Uri) -> PageResult {
    let user = require_user(session)?;
    let content = json!(dashboard::overview(&user));
    Ok(dashboard_page(&user, &uri, content))
}

#[derive(Debug, Default, Deserialize)]
pub struct ComplaintQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub tab: StatusTab,
    pub selected: Option<String>,
}

/// `GET /dashboard/complaint-status`
pub async fn complaint_status(session: AuthSession, uri: Uri, Query(q): Query<ComplaintQuery>) -> PageResult {
    let user = require_user(session)?;
    let complaints = civic::filter_complaints(&q.search, q.tab);
    let selected = q.selected.as_deref().and_then(civic::find_complaint);
    let map = match &selected {
        Some(c) => MapViewport::new(c.coordinates, DEFAULT_ZOOM).with_marker(c.coordinates),
        None => MapViewport::default(),
    };
    let content = json!({ "complaints": complaints, "selected": selected, "map": map });
    Ok(dashboard_page(&user, &uri, content))
}

/// Drive time covered by the emergency page's response-area overlay.
const RESPONSE_AREA_SECS: u32 = 300;

/// `GET /dashboard/emergency`: services, hotlines and the area reachable
/// within five minutes of the default centre.
pub async fn emergency(State(state): State<AppState>, session: AuthSession, uri: Uri) -> PageResult {
    let user = require_user(session)?;
    let response_area = state.map.isoline(DEFAULT_CENTER, RESPONSE_AREA_SECS).await;
    let hotlines: Vec<Value> = [EmergencyKind::Medical, EmergencyKind::Police, EmergencyKind::Fire]
        .into_iter()
        .map(|kind| json!({ "kind": kind, "number": kind.hotline() }))
        .collect();
    let content = json!({
        "services": civic::nearby_services(),
        "hotlines": hotlines,
        "response_area": response_area,
        "map": MapViewport::default().with_marker(DEFAULT_CENTER),
    });
    Ok(dashboard_page(&user, &uri, content))
}

/// `GET /dashboard/waste-pickup`: truck status, the truck's route to the
/// default centre, and travel times from the truck to each full bin.
pub async fn waste_pickup(State(state): State<AppState>, session: AuthSession, uri: Uri) -> PageResult {
    let user = require_user(session)?;
    let pickup = civic::waste_pickup();
    let route = state.map.calculate_route(pickup.truck_location, DEFAULT_CENTER).await;
    let full_bins = pickup.bins_needing_pickup();
    let stops: Vec<Coordinates> = full_bins.iter().map(|bin| bin.coordinates).collect();
    let pickup_times = state.map.optimize_routes(&[pickup.truck_location], &stops).await;
    let content = json!({
        "pickup": pickup,
        "bins_needing_pickup": full_bins,
        "route": route,
        "pickup_times": pickup_times,
        "map": MapViewport::default().with_marker(pickup.truck_location),
    });
    Ok(dashboard_page(&user, &uri, content))
}

/// `GET /dashboard/guardian-tracking`
pub async fn guardian_tracking(session: AuthSession, uri: Uri) -> PageResult {
    let user = require_user(session)?;
    let tracking = civic::guardian_tracking();
    let map = MapViewport::new(tracking.bus.location, DEFAULT_ZOOM).with_marker(tracking.bus.location);
    let content = json!({ "tracking": tracking, "map": map });
    Ok(dashboard_page(&user, &uri, content))
}

#[derive(Debug, Default, Deserialize)]
pub struct HeatmapQuery {
    pub days: Option<u16>,
    /// Comma-separated layer keys whose default state is flipped.
    pub toggle: Option<String>,
}

/// `GET /dashboard/heatmap`
pub async fn heatmap(session: AuthSession, uri: Uri, Query(q): Query<HeatmapQuery>) -> PageResult {
    let user = require_user(session)?;
    let toggled: Vec<&str> = q
        .toggle
        .as_deref()
        .map(|t| t.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    let content = json!({ "heatmap": civic::heatmap(q.days, &toggled), "map": MapViewport::default() });
    Ok(dashboard_page(&user, &uri, content))
}

fn categories() -> Vec<Value> {
    civic::GRIEVANCE_CATEGORIES
        .iter()
        .map(|(value, label)| json!({ "value": value, "label": label }))
        .collect()
}

/// A click on a form map, in widget pixels.
#[derive(Debug, Default, Deserialize)]
pub struct MapClickQuery {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl MapClickQuery {
    /// Map position of the click, when all four values are present.
    fn position(&self, map: &MapViewport) -> Option<Coordinates> {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Some(map.project_click(x, y, w, h)),
            _ => None,
        }
    }
}

/// `GET /dashboard/grievance`: form options and, after a map click, the
/// picked position.
pub async fn grievance(session: AuthSession, uri: Uri, Query(click): Query<MapClickQuery>) -> PageResult {
    let user = require_user(session)?;
    let mut map = MapViewport::default().clickable();
    let picked = click.position(&map);
    if let Some(position) = picked {
        map = map.with_marker(position);
    }
    let content = json!({
        "categories": categories(),
        "picked_location": picked.map(|p| p.label()),
        "map": map,
    });
    Ok(dashboard_page(&user, &uri, content))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordingQuery {
    /// Seconds recorded so far, for the timer display.
    pub elapsed: Option<u32>,
}

/// `GET /dashboard/voice-complaint`: recording timer, the blank draft (or
/// one positioned by a map click) and the categories to pick from.
pub async fn voice_complaint(
    session: AuthSession,
    uri: Uri,
    Query(recording): Query<RecordingQuery>,
    Query(click): Query<MapClickQuery>,
) -> PageResult {
    let user = require_user(session)?;
    let mut map = MapViewport::default().clickable();
    let mut draft = VoiceDraft::default();
    if let Some(position) = click.position(&map) {
        map = map.with_marker(position);
        draft.pick_location(position);
    }
    let content = json!({
        "recording_time": civic::format_recording_time(recording.elapsed.unwrap_or(0)),
        "draft": draft,
        "categories": categories(),
        "map": map,
    });
    Ok(dashboard_page(&user, &uri, content))
}

// =============================================================================
// CIVIC API
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SosRequest {
    pub kind: EmergencyKind,
    pub location: Option<Coordinates>,
}

/// `POST /api/emergency/sos`
pub async fn sos(auth: AuthUser, Json(body): Json<SosRequest>) -> Json<civic::EmergencyAlert> {
    let alert = civic::trigger_emergency(body.kind, body.location);
    tracing::warn!(
        email = %auth.user.email,
        kind = ?body.kind,
        lat = alert.location.lat,
        lng = alert.location.lng,
        "sos raised"
    );
    Json(alert)
}

fn grievance_error_to_status(err: &GrievanceError) -> StatusCode {
    match err {
        GrievanceError::MissingField(_) | GrievanceError::EmptyRecording => StatusCode::BAD_REQUEST,
    }
}

fn grievance_error_response(err: &GrievanceError) -> Response {
    (grievance_error_to_status(err), Json(json!({ "error": err.to_string() }))).into_response()
}

/// Validate and log a grievance for `email`, answering with the receipt.
fn file_grievance(email: &str, form: GrievanceForm, position: Coordinates) -> Result<civic::GrievanceReceipt, Response> {
    let receipt = civic::accept_grievance(form, position).map_err(|e| grievance_error_response(&e))?;
    tracing::info!(
        %email,
        reference = %receipt.reference,
        category = %receipt.category,
        "grievance submitted"
    );
    Ok(receipt)
}

/// `POST /api/grievances`: accept a grievance. Without coordinates the typed
/// location is geocoded, falling back to the default centre.
pub async fn submit_grievance(State(state): State<AppState>, auth: AuthUser, Json(form): Json<GrievanceForm>) -> Response {
    let position = match form.coordinates {
        Some(position) => position,
        None if !form.location.trim().is_empty() => state
            .map
            .geocode(&form.location)
            .await
            .map_or(DEFAULT_CENTER, |hit| hit.position),
        None => DEFAULT_CENTER,
    };

    match file_grievance(&auth.user.email, form, position) {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Length of the finished recording.
    pub duration_secs: u32,
    #[serde(default)]
    pub draft: VoiceDraft,
}

/// `POST /api/voice-complaints/transcribe`: run the simulated speech-to-text
/// step and answer with the filled draft.
pub async fn transcribe_voice(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<TranscribeRequest>,
) -> Response {
    if body.duration_secs > 0 {
        tokio::time::sleep(state.transcription_delay).await;
    }
    match civic::transcribe(body.draft, body.duration_secs) {
        Ok(draft) => {
            tracing::info!(email = %auth.user.email, duration_secs = body.duration_secs, "voice complaint transcribed");
            Json(draft).into_response()
        }
        Err(e) => grievance_error_response(&e),
    }
}

/// `POST /api/voice-complaints`: submit the draft at its picked position and
/// hand back a blank one.
pub async fn submit_voice_complaint(auth: AuthUser, Json(draft): Json<VoiceDraft>) -> Response {
    let position = draft.coordinates;
    match file_grievance(&auth.user.email, draft.into_form(), position) {
        Ok(receipt) => {
            let body = json!({ "receipt": receipt, "draft": VoiceDraft::default() });
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(resp) => resp,
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
