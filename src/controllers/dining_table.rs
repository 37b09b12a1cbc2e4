use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::DiningTable;
use validator::Validate;

use crate::StaffIdentity;
use crate::schemas::dining_table::{
	CreateDiningTableRequest,
	DiningTableResponse,
	UpdateDiningTableRequest,
};

#[instrument(skip(pool))]
pub async fn get_dining_tables(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let tables = DiningTable::for_restaurant(id, &conn).await?;
	let response: Vec<DiningTableResponse> =
		tables.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_dining_table(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path(id): Path<i32>,
	Json(request): Json<CreateDiningTableRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let table = request.to_insertable(id).insert(&conn).await?;
	let response = DiningTableResponse::from(table);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_dining_table(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path((id, table_id)): Path<(i32, i32)>,
	Json(request): Json<UpdateDiningTableRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let table = request.to_insertable().apply_to(id, table_id, &conn).await?;
	let response = DiningTableResponse::from(table);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_dining_table(
	State(pool): State<DbPool>,
	_identity: StaffIdentity,
	Path((id, table_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	DiningTable::delete_by_id(id, table_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
