use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::{Arc, Mutex};
use base64::Engine as _;
use tower::ServiceExt;
use wayfare_api::{app, itinerary::DATA_URL_PREFIX, AppState};
use wayfare_core::{
    BackendError, FlightInfo, FlightRequest, HotelInfo, HotelRequest, SearchResult, TravelBackend,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Complete(FlightRequest, HotelRequest),
    Flights(FlightRequest),
    Hotels(HotelRequest),
}

#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    failure: Option<String>,
}

impl RecordingBackend {
    fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Default::default() }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: Call) -> Result<SearchResult, BackendError> {
        self.calls.lock().unwrap().push(call);
        if let Some(msg) = &self.failure {
            return Err(BackendError::Transport(msg.clone()));
        }
        Ok(SearchResult {
            flights: vec![FlightInfo {
                airline: "Delta".to_string(),
                price: "289".to_string(),
                duration: "5h 10m".to_string(),
                stops: "Nonstop".to_string(),
                departure: "ATL 08:00".to_string(),
                arrival: "LAX 10:10".to_string(),
            }],
            hotels: vec![HotelInfo {
                name: "The Line LA".to_string(),
                price: "$189".to_string(),
                rating: "4.4".to_string(),
                location: "Koreatown".to_string(),
                link: "https://example.com/line".to_string(),
            }],
            ai_flight_recommendation: "Take the Delta nonstop.".to_string(),
            ai_hotel_recommendation: "Stay in Koreatown.".to_string(),
            itinerary: Some("# Day 1\nArrive and check in.".to_string()),
        })
    }
}

#[async_trait]
impl TravelBackend for RecordingBackend {
    async fn complete_travel_search(&self, f: &FlightRequest, h: &HotelRequest) -> Result<SearchResult, BackendError> {
        self.answer(Call::Complete(f.clone(), h.clone()))
    }

    async fn search_flights(&self, f: &FlightRequest) -> Result<SearchResult, BackendError> {
        self.answer(Call::Flights(f.clone()))
    }

    async fn search_hotels(&self, h: &HotelRequest) -> Result<SearchResult, BackendError> {
        self.answer(Call::Hotels(h.clone()))
    }
}

fn router(backend: Arc<RecordingBackend>) -> Router {
    app(AppState::new(backend))
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const BASE_FORM: &str = "origin=ATL&destination=LAX&outbound_date=2025-06-01&return_date=2025-06-08\
&check_in_date=2025-06-01&check_out_date=2025-06-08";

#[tokio::test]
async fn test_index_renders_default_form() {
    let backend = Arc::new(RecordingBackend::default());
    let response = router(backend.clone())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="origin" value="ATL""#));
    assert!(html.contains(r#"name="destination" value="LAX""#));
    assert!(html.contains("Using flight destination (LAX) for hotel search"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_complete_search_uses_flight_destination_for_hotel() {
    let backend = Arc::new(RecordingBackend::default());
    let body = format!(
        "mode=Complete+%28Flights+%2B+Hotels+%2B+Itinerary%29&use_flight_destination=on&hotel_location=Ignored&{}",
        BASE_FORM
    );
    let response = router(backend.clone()).oneshot(form_request("/search", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("📅 Itinerary"));
    assert!(html.contains("Flight Options (1)"));
    assert!(html.contains("Hotel Options (1)"));
    assert!(html.contains("📥 Download Itinerary"));

    match backend.calls().as_slice() {
        [Call::Complete(flight, hotel)] => {
            assert_eq!(flight.origin, "ATL");
            assert_eq!(hotel.location, "LAX");
            assert_eq!(hotel.check_out_date, "2025-06-08");
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[tokio::test]
async fn test_hotels_only_with_free_text_location() {
    let backend = Arc::new(RecordingBackend::default());
    let body = format!("mode=Hotels+Only&hotel_location=Santa+Monica&{}", BASE_FORM);
    let response = router(backend.clone()).oneshot(form_request("/search", &body)).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Hotel Options (1)"));
    assert!(!html.contains("Flight Options"));
    assert!(!html.contains("📅 Itinerary"));

    assert_eq!(
        backend.calls(),
        vec![Call::Hotels(HotelRequest {
            location: "Santa Monica".to_string(),
            check_in_date: "2025-06-01".to_string(),
            check_out_date: "2025-06-08".to_string(),
        })]
    );
}

#[tokio::test]
async fn test_flights_only_calls_flight_endpoint() {
    let backend = Arc::new(RecordingBackend::default());
    let body = format!("mode=Flights+Only&use_flight_destination=on&{}", BASE_FORM);
    let response = router(backend.clone()).oneshot(form_request("/search", &body)).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("🏆 AI Recommendation"));
    assert!(html.contains("Take the Delta nonstop."));
    assert!(!html.contains("Stay in Koreatown."));
    assert!(matches!(backend.calls().as_slice(), [Call::Flights(_)]));
}

#[tokio::test]
async fn test_missing_destination_skips_dispatch() {
    let backend = Arc::new(RecordingBackend::default());
    let body = "mode=Flights+Only&origin=ATL&destination=&outbound_date=2025-06-01";
    let response = router(backend.clone()).oneshot(form_request("/search", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please provide origin and destination."));
    assert!(!html.contains(r#"class="tabs""#));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_backend_failure_shows_error_and_keeps_serving() {
    let backend = Arc::new(RecordingBackend::failing("agent crew crashed"));
    let app = router(backend.clone());

    let response = app
        .clone()
        .oneshot(form_request("/search", BASE_FORM))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Search failed: request to travel backend failed: agent crew crashed"));
    assert!(!html.contains(r#"class="tabs""#));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn test_itinerary_download_carries_exact_text() {
    let backend = Arc::new(RecordingBackend::default());
    let body = format!("mode=Complete+%28Flights+%2B+Hotels+%2B+Itinerary%29&{}", BASE_FORM);
    let response = router(backend).oneshot(form_request("/search", &body)).await.unwrap();
    let html = body_text(response).await;

    assert!(html.contains(r#"download="itinerary.md""#));
    let start = html.find(DATA_URL_PREFIX).expect("download link") + DATA_URL_PREFIX.len();
    let end = start + html[start..].find('"').unwrap();
    let bytes = base64::engine::general_purpose::STANDARD.decode(&html[start..end]).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "# Day 1\nArrive and check in.");
}

#[tokio::test]
async fn test_json_search_maps_backend_failure_to_bad_gateway() {
    let backend = Arc::new(RecordingBackend::failing("timeout"));
    let payload = serde_json::json!({
        "mode": "Flights Only",
        "flight_request": {
            "origin": "ATL", "destination": "LAX",
            "outbound_date": "2025-06-01", "return_date": "2025-06-08"
        },
        "hotel_request": { "location": "LAX", "check_in_date": "2025-06-01", "check_out_date": "2025-06-08" }
    });
    let request = json_request(payload.to_string());

    let response = router(backend.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Search failed: request to travel backend failed: timeout");
    assert!(matches!(backend.calls().as_slice(), [Call::Flights(_)]));
}

#[tokio::test]
async fn test_json_search_rejects_empty_origin() {
    let backend = Arc::new(RecordingBackend::default());
    let payload = serde_json::json!({
        "flight_request": { "origin": "", "destination": "LAX", "outbound_date": "", "return_date": "" },
        "hotel_request": { "location": "LAX", "check_in_date": "", "check_out_date": "" }
    });
    let request = json_request(payload.to_string());

    let response = router(backend.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_json_hotel_search_still_requires_route() {
    let backend = Arc::new(RecordingBackend::default());
    let payload = serde_json::json!({
        "mode": "Hotels Only",
        "flight_request": { "origin": "", "destination": "LAX", "outbound_date": "", "return_date": "" },
        "hotel_request": { "location": "Santa Monica", "check_in_date": "2025-06-01", "check_out_date": "2025-06-08" }
    });

    let response = router(backend.clone()).oneshot(json_request(payload.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Please provide origin and destination.");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_json_malformed_body_gets_json_error() {
    let backend = Arc::new(RecordingBackend::default());
    let app = router(backend.clone());

    let unknown_mode = serde_json::json!({
        "mode": "Trains Only",
        "flight_request": { "origin": "ATL", "destination": "LAX", "outbound_date": "", "return_date": "" },
        "hotel_request": { "location": "LAX", "check_in_date": "", "check_out_date": "" }
    });
    let response = app.clone().oneshot(json_request(unknown_mode.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("Trains Only"));

    let response = app.oneshot(json_request("{not json".to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].is_string());
    assert!(backend.calls().is_empty());
}
