use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{Booking, BookingFilter};
use validator::Validate;

use crate::schemas::booking::{
	BookingDetailResponse,
	BookingResponse,
	CreateBookingRequest,
	UpdateBookingRequest,
};
use crate::{Config, Identity, StaffIdentity};

#[instrument(skip(pool))]
pub async fn get_profile_bookings(
	State(pool): State<DbPool>,
	identity: Identity,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let bookings = Booking::for_profile(identity.profile_id, &conn).await?;
	let response: Vec<BookingDetailResponse> =
		bookings.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_restaurant_bookings(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path(id): Path<i32>,
	Query(filter): Query<BookingFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let bookings = Booking::for_restaurant(id, filter, &conn).await?;
	let response: Vec<BookingDetailResponse> =
		bookings.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_booking(
	State(pool): State<DbPool>,
	identity: Identity,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_for_actor(id, identity.actor(), &conn).await?;
	let response = BookingDetailResponse::from(booking);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_booking(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	identity: Identity,
	Path(id): Path<i32>,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let new_booking = request.to_insertable(id, identity.profile_id);
	let booking = new_booking.insert(config.booking_policy, &conn).await?;
	let response = BookingResponse::from(booking);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_booking(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	identity: Identity,
	Path(id): Path<i32>,
	Json(request): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let booking = request
		.to_insertable()
		.apply_to(id, identity.actor(), config.booking_policy, &conn)
		.await?;
	let response = BookingResponse::from(booking);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn cancel_booking(
	State(pool): State<DbPool>,
	identity: Identity,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::cancel(id, identity.actor(), &conn).await?;
	let response = BookingResponse::from(booking);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn confirm_booking(
	State(pool): State<DbPool>,
	identity: StaffIdentity,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::confirm(id, identity.actor(), &conn).await?;
	let response = BookingResponse::from(booking);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_booking(
	State(pool): State<DbPool>,
	identity: Identity,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Booking::delete(id, identity.actor(), &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
