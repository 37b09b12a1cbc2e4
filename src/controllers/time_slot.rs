use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::TimeSlot;

use crate::StaffIdentity;
use crate::schemas::time_slot::{
	CreateTimeSlotRequest,
	TimeSlotResponse,
	UpdateTimeSlotRequest,
};

#[instrument(skip(pool))]
pub async fn get_time_slots(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let slots = TimeSlot::for_restaurant(id, &conn).await?;
	let response: Vec<TimeSlotResponse> =
		slots.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_time_slot(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path(id): Path<i32>,
	Json(request): Json<CreateTimeSlotRequest>,
) -> Result<impl IntoResponse, Error> {
	rules::check_time_window(request.start_time, request.end_time)?;

	let conn = pool.get().await?;

	let slot = request.to_insertable(id).insert(&conn).await?;
	let response = TimeSlotResponse::from(slot);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_time_slot(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path((id, slot_id)): Path<(i32, i32)>,
	Json(request): Json<UpdateTimeSlotRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let slot = request.to_insertable().apply_to(id, slot_id, &conn).await?;
	let response = TimeSlotResponse::from(slot);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_time_slot(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path((id, slot_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	TimeSlot::delete_by_id(id, slot_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
