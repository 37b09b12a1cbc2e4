use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use db::BookingStatus;
use models::{Booking, BookingDetail, BookingUpdate, NewBooking};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::schemas::dining_table::DiningTableResponse;
use crate::schemas::restaurant::RestaurantResponse;
use crate::schemas::time_slot::TimeSlotResponse;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub table_id:         Option<i32>,
	pub time_slot_id:     Option<i32>,
	pub date:             NaiveDate,
	pub time:             NaiveTime,
	#[validate(range(
		min = 1,
		message = "a booking must seat at least 1 guest",
		code = "number-of-guests-range"
	))]
	pub number_of_guests: i32,
	#[validate(length(
		max = 500,
		message = "special requests are limited to 500 characters",
		code = "special-requests-length"
	))]
	pub special_requests: Option<String>,
}

impl CreateBookingRequest {
	#[must_use]
	pub fn to_insertable(
		self,
		restaurant_id: i32,
		profile_id: i32,
	) -> NewBooking {
		NewBooking {
			profile_id,
			restaurant_id,
			table_id:         self.table_id,
			time_slot_id:     self.time_slot_id,
			date:             self.date,
			time:             self.time,
			number_of_guests: self.number_of_guests,
			special_requests: self.special_requests,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
	pub table_id:         Option<i32>,
	pub time_slot_id:     Option<i32>,
	pub date:             Option<NaiveDate>,
	pub time:             Option<NaiveTime>,
	#[validate(range(
		min = 1,
		message = "a booking must seat at least 1 guest",
		code = "number-of-guests-range"
	))]
	pub number_of_guests: Option<i32>,
	#[validate(length(
		max = 500,
		message = "special requests are limited to 500 characters",
		code = "special-requests-length"
	))]
	pub special_requests: Option<String>,
}

impl UpdateBookingRequest {
	#[must_use]
	pub fn to_insertable(self) -> BookingUpdate {
		BookingUpdate {
			table_id:         self.table_id,
			time_slot_id:     self.time_slot_id,
			date:             self.date,
			time:             self.time,
			number_of_guests: self.number_of_guests,
			special_requests: self.special_requests,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
	pub id:               i32,
	pub profile_id:       i32,
	pub restaurant_id:    i32,
	pub table_id:         Option<i32>,
	pub time_slot_id:     Option<i32>,
	pub date:             NaiveDate,
	pub time:             NaiveTime,
	pub number_of_guests: i32,
	pub special_requests: Option<String>,
	pub status:           BookingStatus,
	pub confirmed_at:     Option<NaiveDateTime>,
	pub confirmed_by:     Option<i32>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl From<Booking> for BookingResponse {
	fn from(value: Booking) -> Self {
		Self {
			id:               value.id,
			profile_id:       value.profile_id,
			restaurant_id:    value.restaurant_id,
			table_id:         value.table_id,
			time_slot_id:     value.time_slot_id,
			date:             value.date,
			time:             value.time,
			number_of_guests: value.number_of_guests,
			special_requests: value.special_requests,
			status:           value.status,
			confirmed_at:     value.confirmed_at,
			confirmed_by:     value.confirmed_by,
			created_at:       value.created_at,
			updated_at:       value.updated_at,
		}
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailResponse {
	pub id:               i32,
	pub profile_id:       i32,
	pub date:             NaiveDate,
	pub time:             NaiveTime,
	pub number_of_guests: i32,
	pub special_requests: Option<String>,
	pub status:           BookingStatus,
	pub confirmed_at:     Option<NaiveDateTime>,
	pub confirmed_by:     Option<i32>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
	pub restaurant:       RestaurantResponse,
	pub table:            Option<DiningTableResponse>,
	pub time_slot:        Option<TimeSlotResponse>,
}

impl From<BookingDetail> for BookingDetailResponse {
	fn from(value: BookingDetail) -> Self {
		let booking = value.booking;

		Self {
			id:               booking.id,
			profile_id:       booking.profile_id,
			date:             booking.date,
			time:             booking.time,
			number_of_guests: booking.number_of_guests,
			special_requests: booking.special_requests,
			status:           booking.status,
			confirmed_at:     booking.confirmed_at,
			confirmed_by:     booking.confirmed_by,
			created_at:       booking.created_at,
			updated_at:       booking.updated_at,
			restaurant:       value.restaurant.into(),
			table:            value.table.map(Into::into),
			time_slot:        value.time_slot.map(Into::into),
		}
	}
}
