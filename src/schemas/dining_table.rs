use chrono::NaiveDateTime;
use models::{DiningTable, DiningTableUpdate, NewDiningTable};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiningTableRequest {
	#[validate(range(
		min = 1,
		message = "table number must be at least 1",
		code = "table-number-range"
	))]
	pub table_number: i32,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "capacity-range"
	))]
	pub capacity:     i32,
	#[serde(default = "super::default_true")]
	pub is_active:    bool,
}

impl CreateDiningTableRequest {
	#[must_use]
	pub fn to_insertable(self, restaurant_id: i32) -> NewDiningTable {
		NewDiningTable {
			restaurant_id,
			table_number: self.table_number,
			capacity:     self.capacity,
			is_active:    self.is_active,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiningTableRequest {
	#[validate(range(
		min = 1,
		message = "table number must be at least 1",
		code = "table-number-range"
	))]
	pub table_number: Option<i32>,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "capacity-range"
	))]
	pub capacity:     Option<i32>,
	pub is_active:    Option<bool>,
}

impl UpdateDiningTableRequest {
	#[must_use]
	pub fn to_insertable(self) -> DiningTableUpdate {
		DiningTableUpdate {
			table_number: self.table_number,
			capacity:     self.capacity,
			is_active:    self.is_active,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableResponse {
	pub id:            i32,
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub capacity:      i32,
	pub is_active:     bool,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl From<DiningTable> for DiningTableResponse {
	fn from(value: DiningTable) -> Self {
		Self {
			id:            value.id,
			restaurant_id: value.restaurant_id,
			table_number:  value.table_number,
			capacity:      value.capacity,
			is_active:     value.is_active,
			created_at:    value.created_at,
			updated_at:    value.updated_at,
		}
	}
}
