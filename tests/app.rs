use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use maitred::{
	AppState,
	Config,
	PROFILE_ID_HEADER,
	PROFILE_STAFF_HEADER,
	routes,
};
use rules::BookingPolicy;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Get a test app backed by a pool that is never connected
///
/// The pool is lazy, so every route that stops before touching the
/// database can be exercised without one.
fn get_test_app() -> Router {
	let config = Config {
		database_url:   "postgres://localhost:1/unused".to_string(),
		booking_policy: BookingPolicy { min_guests: 1, max_guests: 8 },
	};
	let database_pool = config.create_database_pool();

	routes::get_app_router(AppState { config, database_pool })
}

fn guest_request(method: Method, uri: &str) -> Request<Body> {
	Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

fn diner_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header(PROFILE_ID_HEADER, "7")
		.header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
		.body(Body::from(serde_json::to_string(body).unwrap()))
		.unwrap()
}

fn staff_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header(PROFILE_ID_HEADER, "7")
		.header(PROFILE_STAFF_HEADER, "true")
		.header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
		.body(Body::from(serde_json::to_string(body).unwrap()))
		.unwrap()
}

async fn error_body(response: axum::response::Response) -> Value {
	let body = response.into_body().collect().await.unwrap().to_bytes();

	serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
	let app = get_test_app();

	let response = app
		.oneshot(guest_request(Method::GET, "/restaurants/1/menu"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_methods_are_rejected() {
	let app = get_test_app();

	let response = app
		.oneshot(guest_request(Method::PUT, "/restaurants"))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn booking_routes_require_identity_headers() {
	let app = get_test_app();

	let response =
		app.oneshot(guest_request(Method::GET, "/bookings")).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	let body = error_body(response).await;

	assert_eq!(body["message"], "missing profile identity headers");
}

#[tokio::test]
async fn garbled_profile_ids_are_rejected() {
	let app = get_test_app();

	let request = Request::builder()
		.method(Method::GET)
		.uri("/bookings")
		.header(PROFILE_ID_HEADER, "bob")
		.body(Body::empty())
		.unwrap();

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	let body = error_body(response).await;

	assert_eq!(body["message"], "invalid profile identity headers");
}

#[tokio::test]
async fn garbled_staff_flags_are_rejected() {
	let app = get_test_app();

	let request = Request::builder()
		.method(Method::GET)
		.uri("/bookings")
		.header(PROFILE_ID_HEADER, "7")
		.header(PROFILE_STAFF_HEADER, "yes")
		.body(Body::empty())
		.unwrap();

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_routes_reject_regular_profiles() {
	let app = get_test_app();

	let request = Request::builder()
		.method(Method::POST)
		.uri("/restaurants")
		.header(PROFILE_ID_HEADER, "7")
		.body(Body::empty())
		.unwrap();

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let body = error_body(response).await;

	assert_eq!(body["message"], "forbidden");
}

#[tokio::test]
async fn confirming_a_booking_is_staff_only() {
	let app = get_test_app();

	let request = Request::builder()
		.method(Method::POST)
		.uri("/bookings/1/confirm")
		.header(PROFILE_ID_HEADER, "7")
		.body(Body::empty())
		.unwrap();

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn restaurant_payloads_are_validated() {
	let app = get_test_app();

	let request = staff_request(
		Method::POST,
		"/restaurants",
		&json!({
			"name": "",
			"address": "Main Street 1",
			"contactNumber": "+32 470 12 34 56",
			"email": "not-an-email",
			"openingTime": "09:00:00",
			"closingTime": "22:00:00",
			"capacity": 40,
		}),
	);

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let body = error_body(response).await;
	let message = body["message"].as_str().unwrap();

	assert!(message.contains("name must be between"));
	assert!(message.contains("invalid email"));
}

#[tokio::test]
async fn operating_hours_must_be_ordered() {
	let app = get_test_app();

	let request = staff_request(
		Method::POST,
		"/restaurants",
		&json!({
			"name": "De Orde",
			"address": "Main Street 1",
			"contactNumber": "+32 470 12 34 56",
			"email": "orde@example.com",
			"openingTime": "22:00:00",
			"closingTime": "09:00:00",
			"capacity": 40,
		}),
	);

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let body = error_body(response).await;

	assert_eq!(body["message"], "opening time must fall before closing time");
}

#[tokio::test]
async fn time_slot_windows_must_be_ordered() {
	let app = get_test_app();

	let request = staff_request(
		Method::POST,
		"/restaurants/1/time-slots",
		&json!({ "startTime": "14:00:00", "endTime": "13:00:00" }),
	);

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let body = error_body(response).await;

	assert_eq!(body["message"], "start time must fall before end time");
}

#[tokio::test]
async fn booking_payloads_are_validated() {
	let app = get_test_app();

	let request = diner_request(
		Method::POST,
		"/restaurants/1/bookings",
		&json!({
			"date": "2030-06-15",
			"time": "19:00:00",
			"numberOfGuests": 0,
		}),
	);

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let body = error_body(response).await;

	assert_eq!(body["message"], "a booking must seat at least 1 guest");
}

#[tokio::test]
async fn dining_table_payloads_are_validated() {
	let app = get_test_app();

	let request = staff_request(
		Method::POST,
		"/restaurants/1/tables",
		&json!({ "tableNumber": 0, "capacity": 4 }),
	);

	let response = app.oneshot(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let body = error_body(response).await;

	assert_eq!(body["message"], "table number must be at least 1");
}

#[tokio::test]
async fn error_bodies_carry_a_code() {
	let app = get_test_app();

	let response =
		app.oneshot(guest_request(Method::GET, "/bookings")).await.unwrap();

	let body = error_body(response).await;

	assert!(body["code"].is_number());
	assert!(body["message"].is_string());
}
