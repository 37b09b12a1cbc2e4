use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::Restaurant;
use validator::Validate;

use crate::StaffIdentity;
use crate::schemas::restaurant::{
	CreateRestaurantRequest,
	RestaurantResponse,
	UpdateRestaurantRequest,
};

#[instrument(skip(pool))]
pub async fn get_restaurants(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let restaurants = Restaurant::get_all(&conn).await?;
	let response: Vec<RestaurantResponse> =
		restaurants.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_restaurant(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let restaurant = Restaurant::get_by_id(id, &conn).await?;
	let response = RestaurantResponse::from(restaurant);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_restaurant(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Json(request): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;
	rules::check_operating_hours(request.opening_time, request.closing_time)?;

	let conn = pool.get().await?;

	let restaurant = request.to_insertable().insert(&conn).await?;
	let response = RestaurantResponse::from(restaurant);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_restaurant(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path(id): Path<i32>,
	Json(request): Json<UpdateRestaurantRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let restaurant = request.to_insertable().apply_to(id, &conn).await?;
	let response = RestaurantResponse::from(restaurant);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_restaurant(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Restaurant::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
