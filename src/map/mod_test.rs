use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn click_at_centre_returns_centre() {
    let viewport = MapViewport::default();
    let c = viewport.project_click(200.0, 150.0, 400.0, 300.0);
    assert!(approx(c.lat, DEFAULT_CENTER.lat));
    assert!(approx(c.lng, DEFAULT_CENTER.lng));
}

#[test]
fn click_offsets_scale_by_ten_thousand() {
    let viewport = MapViewport::new(Coordinates { lat: 10.0, lng: 20.0 }, 12);
    let c = viewport.project_click(300.0, 100.0, 400.0, 400.0);
    assert!(approx(c.lat, 10.0 - 0.01));
    assert!(approx(c.lng, 20.0 + 0.01));
}

#[test]
fn viewport_serializes_camel_case_marker() {
    let viewport = MapViewport::default().with_marker(Coordinates { lat: 19.079, lng: 72.873 });
    let json = serde_json::to_value(viewport).unwrap();
    assert_eq!(json["zoom"], 14);
    assert_eq!(json["markerPosition"]["lat"], 19.079);
    assert_eq!(json["clickable"], false);
}

#[test]
fn viewport_without_marker_omits_field() {
    let json = serde_json::to_value(MapViewport::default().clickable()).unwrap();
    assert!(json.get("markerPosition").is_none());
    assert_eq!(json["clickable"], true);
}

#[test]
fn coordinates_label_uses_six_decimals() {
    let c = Coordinates { lat: 19.0761234567, lng: 72.8 };
    assert_eq!(c.label(), "Lat: 19.076123, Lng: 72.800000");
}

fn query(url: &Url) -> Vec<(String, String)> {
    url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
}

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_owned(), v.to_owned())
}

#[test]
fn geocode_url_carries_key_and_query() {
    let url = PlaceholderMap::new("KEY").geocode_url("Park Avenue").unwrap();
    assert_eq!(url.as_str(), "https://geocode.search.hereapi.com/v1/geocode?q=Park+Avenue&apiKey=KEY");
}

#[test]
fn geocode_url_escapes_reserved_characters() {
    let url = PlaceholderMap::new("KEY").geocode_url("Main St, Mumbai & Co").unwrap();
    assert_eq!(url.query(), Some("q=Main+St%2C+Mumbai+%26+Co&apiKey=KEY"));
    assert_eq!(query(&url), vec![pair("q", "Main St, Mumbai & Co"), pair("apiKey", "KEY")]);
}

#[test]
fn api_key_is_escaped_too() {
    let url = PlaceholderMap::new("a&b=c").geocode_url("x").unwrap();
    assert_eq!(query(&url), vec![pair("q", "x"), pair("apiKey", "a&b=c")]);
}

#[test]
fn route_url_joins_coordinates() {
    let map = PlaceholderMap::new("KEY");
    let url = map.route_url(Coordinates { lat: 1.5, lng: 2.0 }, Coordinates { lat: 3.0, lng: 4.25 }).unwrap();
    assert_eq!(url.host_str(), Some("router.hereapi.com"));
    assert!(url.as_str().contains("origin=1.5%2C2&destination=3%2C4.25"));
    assert_eq!(query(&url).last(), Some(&pair("apiKey", "KEY")));
}

#[test]
fn matrix_url_targets_matrix_endpoint() {
    let url = PlaceholderMap::new("KEY").matrix_url().unwrap();
    assert_eq!(url.as_str(), "https://matrix.router.hereapi.com/v8/matrix?apiKey=KEY");
}

#[test]
fn isoline_url_requests_time_range() {
    let url = PlaceholderMap::new("KEY").isoline_url(Coordinates { lat: 1.5, lng: 2.0 }, 600).unwrap();
    assert_eq!(url.path(), "/v8/isolines");
    assert_eq!(
        query(&url),
        vec![
            pair("transportMode", "car"),
            pair("origin", "1.5,2"),
            pair("range[type]", "time"),
            pair("range[values]", "600"),
            pair("apiKey", "KEY"),
        ]
    );
}

#[tokio::test]
async fn placeholder_geocode_returns_mumbai() {
    let result = PlaceholderMap::new("KEY")
        .geocode("anything")
        .await
        .unwrap();
    assert_eq!(result.city, "Mumbai");
    assert_eq!(result.position, DEFAULT_CENTER);
}

#[tokio::test]
async fn placeholder_route_returns_fixed_summary() {
    let route = PlaceholderMap::new("KEY")
        .calculate_route(DEFAULT_CENTER, Coordinates { lat: 19.1, lng: 72.9 })
        .await
        .unwrap();
    assert_eq!(route.duration_secs, 2700);
    assert_eq!(route.length_meters, 15_000);
}

#[tokio::test]
async fn placeholder_matrix_covers_every_pair() {
    let origins = [DEFAULT_CENTER];
    let destinations = [Coordinates { lat: 19.1, lng: 72.9 }, Coordinates { lat: 19.2, lng: 72.8 }];
    let matrix = PlaceholderMap::new("KEY")
        .optimize_routes(&origins, &destinations)
        .await
        .unwrap();
    assert_eq!(matrix.num_origins, 1);
    assert_eq!(matrix.num_destinations, 2);
    assert_eq!(matrix.travel_times_secs, vec![300, 600]);
}

#[tokio::test]
async fn placeholder_matrix_cycles_sample_times() {
    let points = [DEFAULT_CENTER; 3];
    let matrix = PlaceholderMap::new("KEY")
        .optimize_routes(&points, &points)
        .await
        .unwrap();
    assert_eq!(matrix.travel_times_secs, vec![300, 600, 900, 1200, 300, 600, 900, 1200, 300]);
}

#[tokio::test]
async fn placeholder_matrix_serializes_camel_case() {
    let matrix = PlaceholderMap::new("KEY")
        .optimize_routes(&[DEFAULT_CENTER], &[])
        .await
        .unwrap();
    let json = serde_json::to_value(matrix).unwrap();
    assert_eq!(json["numOrigins"], 1);
    assert_eq!(json["numDestinations"], 0);
    assert_eq!(json["travelTimesSecs"], serde_json::json!([]));
}

#[tokio::test]
async fn placeholder_isoline_echoes_range() {
    let isoline = PlaceholderMap::new("KEY").isoline(DEFAULT_CENTER, 300).await.unwrap();
    assert_eq!(isoline.range_secs, 300);
    assert_eq!(isoline.polygons, vec!["mock-polygon-data".to_owned()]);
}
