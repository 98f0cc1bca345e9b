//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::BookingService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, EmptyData};

use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::reservations::{self, ReservationAppState};
use super::modules::resources::{self, ResourceAppState};

/// Unified state for all routes.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking: Arc<BookingService>,
    pub metrics: MetricsState,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for ResourceAppState {
    fn from_ref(s: &ApiState) -> Self {
        ResourceAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            repos: Arc::clone(&s.repos),
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        s.metrics.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Resources
        resources::list_resources,
        resources::get_resource,
        resources::create_resource,
        resources::update_resource_status,
        resources::delete_resource,
        resources::list_resource_reservations,
        // Reservations
        reservations::create_reservation,
        reservations::check_availability,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::approve_reservation,
        reservations::decline_reservation,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Health
            health::HealthResponse,
            // Resources
            resources::ResourceDto,
            resources::CreateResourceRequest,
            resources::UpdateResourceStatusRequest,
            // Reservations
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            reservations::CheckAvailabilityRequest,
            reservations::CreateReservationResponse,
            reservations::AvailabilityResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Resources", description = "Bookable resource management"),
        (name = "Reservations", description = "Reservation requests, availability checks and decisions"),
    ),
    info(
        title = "Rentora Booking API",
        version = "1.0.0",
        description = "REST API for reserving resources in conflict-free time slots",
        license(name = "MIT"),
        contact(name = "Rentora", email = "support@rentora.dev")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    booking: Arc<BookingService>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let state = ApiState {
        repos,
        booking,
        metrics: MetricsState {
            handle: metrics_handle,
        },
        started_at: Arc::new(Instant::now()),
    };

    metrics::register_metrics();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let resource_routes = Router::new()
        .route(
            "/",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route(
            "/{resource_id}",
            get(resources::get_resource).delete(resources::delete_resource),
        )
        .route("/{resource_id}/status", put(resources::update_resource_status))
        .route(
            "/{resource_id}/reservations",
            get(resources::list_resource_reservations),
        );

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/check", post(reservations::check_availability))
        .route("/{reservation_id}", get(reservations::get_reservation))
        .route(
            "/{reservation_id}/approve",
            post(reservations::approve_reservation),
        )
        .route(
            "/{reservation_id}/decline",
            post(reservations::decline_reservation),
        );

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        // API modules
        .nest("/api/v1/resources", resource_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .with_state(state)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::Service;

    fn test_app() -> axum::routing::RouterIntoService<Body> {
        let store = Arc::new(InMemoryStore::new());
        store.seed_demo_data();
        let repos: Arc<dyn RepositoryProvider> = store;
        let booking = Arc::new(BookingService::new(Arc::clone(&repos)));
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(repos, booking, handle).into_service()
    }

    async fn send(
        app: &mut axum::routing::RouterIntoService<Body>,
        req: Request<Body>,
    ) -> (StatusCode, Value) {
        let resp = app.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn put_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn booking_body(start_time: &str, end_time: &str) -> Value {
        json!({
            "resource_id": "court-1",
            "date": "2099-06-01",
            "start_time": start_time,
            "end_time": end_time,
            "occupancy": 2,
            "requester": "alice"
        })
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let mut app = test_app();
        let (status, body) = send(&mut app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["resources"].as_u64().unwrap() >= 2);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders() {
        let mut app = test_app();
        let req = get_req("/metrics");
        let resp = app.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn booking_then_overlap_conflicts_with_409() {
        let mut app = test_app();

        let (status, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["decision"], "accepted");
        assert_eq!(body["data"]["reservation"]["status"], "pending");

        let (status, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("11:00", "13:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["data"]["decision"], "rejected");
        assert_eq!(body["data"]["reason"], "slot_conflict");
    }

    #[tokio::test]
    async fn back_to_back_bookings_are_both_created() {
        let mut app = test_app();

        let (status, _) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("12:00", "14:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["decision"], "accepted");
    }

    #[tokio::test]
    async fn check_endpoint_is_advisory_and_claims_nothing() {
        let mut app = test_app();

        send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;

        let check = json!({
            "resource_id": "court-1",
            "date": "2099-06-01",
            "start_time": "11:00",
            "end_time": "13:00",
            "occupancy": 2
        });
        let (status, body) = send(&mut app, post_json("/api/v1/reservations/check", &check)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["available"], false);
        assert_eq!(body["data"]["reason"], "slot_conflict");
        assert_eq!(body["data"]["conflicts"].as_array().unwrap().len(), 1);

        // The check held nothing: an adjacent booking still goes through
        let (status, _) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("12:00", "14:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn occupancy_above_capacity_is_rejected() {
        let mut app = test_app();

        // court-1 seeds with capacity 4
        let mut body = booking_body("10:00", "12:00");
        body["occupancy"] = json!(5);
        let (status, body) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["data"]["reason"], "capacity_exceeded");
    }

    #[tokio::test]
    async fn zero_occupancy_fails_body_validation() {
        let mut app = test_app();
        let mut body = booking_body("10:00", "12:00");
        body["occupancy"] = json!(0);
        let (status, _) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn out_of_range_utc_offset_fails_body_validation() {
        let mut app = test_app();
        let mut body = booking_body("10:00", "12:00");
        body["utc_offset_minutes"] = json!(900);
        let (status, _) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Integer extremes are caught at the same gate
        body["utc_offset_minutes"] = json!(i32::MIN);
        let (status, _) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_date_returns_400() {
        let mut app = test_app();
        let mut body = booking_body("10:00", "12:00");
        body["date"] = json!("01.06.2099");
        let (status, _) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_resource_returns_404() {
        let mut app = test_app();
        let mut body = booking_body("10:00", "12:00");
        body["resource_id"] = json!("no-such-court");
        let (status, _) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn utc_offset_is_normalized_to_utc() {
        let mut app = test_app();
        let mut body = booking_body("09:00", "11:00");
        body["utc_offset_minutes"] = json!(120);
        let (status, body) = send(&mut app, post_json("/api/v1/reservations", &body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["data"]["reservation"]["start"],
            "2099-06-01T07:00:00+00:00"
        );
        assert_eq!(
            body["data"]["reservation"]["end"],
            "2099-06-01T09:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn approve_then_second_decision_conflicts() {
        let mut app = test_app();

        let (_, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;
        let id = body["data"]["reservation"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/reservations/{}/approve", id);
        let (status, body) = send(&mut app, post_json(&uri, &json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "approved");

        let uri = format!("/api/v1/reservations/{}/decline", id);
        let (status, _) = send(&mut app, post_json(&uri, &json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn declined_reservation_frees_the_slot() {
        let mut app = test_app();

        let (_, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;
        let id = body["data"]["reservation"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/reservations/{}/decline", id);
        let (status, _) = send(&mut app, post_json(&uri, &json!({}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["decision"], "accepted");
    }

    #[tokio::test]
    async fn resource_crud_roundtrip() {
        let mut app = test_app();

        let create = json!({
            "id": "sauna-1",
            "name": "Sauna 1",
            "description": "Electric, seats six",
            "capacity": 6
        });
        let (status, body) = send(&mut app, post_json("/api/v1/resources", &create)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "available");

        // Duplicate ID is refused
        let (status, _) = send(&mut app, post_json("/api/v1/resources", &create)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &mut app,
            put_json(
                "/api/v1/resources/sauna-1/status",
                &json!({"status": "unavailable"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "unavailable");

        // Bookings against an unavailable resource are rejected
        let mut booking = booking_body("10:00", "12:00");
        booking["resource_id"] = json!("sauna-1");
        let (status, body) = send(&mut app, post_json("/api/v1/reservations", &booking)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["data"]["reason"], "resource_unavailable");

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/v1/resources/sauna-1")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&mut app, req).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&mut app, get_req("/api/v1/resources/sauna-1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reservation_listing_filters_by_status() {
        let mut app = test_app();

        let (_, body) = send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("10:00", "12:00")),
        )
        .await;
        let id = body["data"]["reservation"]["id"].as_str().unwrap().to_string();
        send(
            &mut app,
            post_json("/api/v1/reservations", &booking_body("12:00", "14:00")),
        )
        .await;

        let uri = format!("/api/v1/reservations/{}/approve", id);
        send(&mut app, post_json(&uri, &json!({}))).await;

        let (status, body) = send(
            &mut app,
            get_req("/api/v1/resources/court-1/reservations?status=approved"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], id.as_str());

        let (status, _) = send(
            &mut app,
            get_req("/api/v1/reservations?status=bogus"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
