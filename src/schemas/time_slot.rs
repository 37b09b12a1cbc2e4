use chrono::{NaiveDateTime, NaiveTime};
use models::{NewTimeSlot, TimeSlot, TimeSlotUpdate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
	pub start_time:   NaiveTime,
	pub end_time:     NaiveTime,
	#[serde(default = "super::default_true")]
	pub is_available: bool,
}

impl CreateTimeSlotRequest {
	#[must_use]
	pub fn to_insertable(self, restaurant_id: i32) -> NewTimeSlot {
		NewTimeSlot {
			restaurant_id,
			start_time:   self.start_time,
			end_time:     self.end_time,
			is_available: self.is_available,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeSlotRequest {
	pub start_time:   Option<NaiveTime>,
	pub end_time:     Option<NaiveTime>,
	pub is_available: Option<bool>,
}

impl UpdateTimeSlotRequest {
	#[must_use]
	pub fn to_insertable(self) -> TimeSlotUpdate {
		TimeSlotUpdate {
			start_time:   self.start_time,
			end_time:     self.end_time,
			is_available: self.is_available,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
	pub id:            i32,
	pub restaurant_id: i32,
	pub start_time:    NaiveTime,
	pub end_time:      NaiveTime,
	pub is_available:  bool,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl From<TimeSlot> for TimeSlotResponse {
	fn from(value: TimeSlot) -> Self {
		Self {
			id:            value.id,
			restaurant_id: value.restaurant_id,
			start_time:    value.start_time,
			end_time:      value.end_time,
			is_available:  value.is_available,
			created_at:    value.created_at,
			updated_at:    value.updated_at,
		}
	}
}
