use std::time::Duration;

use axum::Router;
use axum::routing::{get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::booking::{
	cancel_booking,
	confirm_booking,
	create_booking,
	delete_booking,
	get_booking,
	get_profile_bookings,
	get_restaurant_bookings,
	update_booking,
};
use crate::controllers::dining_table::{
	create_dining_table,
	delete_dining_table,
	get_dining_tables,
	update_dining_table,
};
use crate::controllers::healthcheck;
use crate::controllers::restaurant::{
	create_restaurant,
	delete_restaurant,
	get_restaurant,
	get_restaurants,
	update_restaurant,
};
use crate::controllers::time_slot::{
	create_time_slot,
	delete_time_slot,
	get_time_slots,
	update_time_slot,
};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/restaurants", restaurant_routes())
		.nest("/bookings", booking_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Restaurant routes and the routes of their tables, time slots, and
/// bookings
fn restaurant_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_restaurants).post(create_restaurant))
		.route(
			"/{id}",
			get(get_restaurant)
				.patch(update_restaurant)
				.delete(delete_restaurant),
		)
		.route(
			"/{id}/tables",
			get(get_dining_tables).post(create_dining_table),
		)
		.route(
			"/{id}/tables/{table_id}",
			patch(update_dining_table).delete(delete_dining_table),
		)
		.route(
			"/{id}/time-slots",
			get(get_time_slots).post(create_time_slot),
		)
		.route(
			"/{id}/time-slots/{slot_id}",
			patch(update_time_slot).delete(delete_time_slot),
		)
		.route(
			"/{id}/bookings",
			get(get_restaurant_bookings).post(create_booking),
		)
}

/// Booking routes
fn booking_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_profile_bookings))
		.route(
			"/{id}",
			get(get_booking).patch(update_booking).delete(delete_booking),
		)
		.route("/{id}/cancel", post(cancel_booking))
		.route("/{id}/confirm", post(confirm_booking))
}
