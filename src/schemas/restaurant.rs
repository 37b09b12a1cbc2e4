use std::sync::LazyLock;

use chrono::{NaiveDateTime, NaiveTime};
use models::{NewRestaurant, Restaurant, RestaurantUpdate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

static CONTACT_NUMBER_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ]{2,18}[0-9]$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
	#[validate(length(
		min = 1,
		max = 255,
		message = "name must be between 1 and 255 characters long",
		code = "name-length"
	))]
	pub name:               String,
	#[validate(length(
		min = 1,
		message = "address must not be empty",
		code = "address-length"
	))]
	pub address:            String,
	#[validate(regex(
		path = *CONTACT_NUMBER_REGEX,
		message = "contact number must be a phone number",
		code = "contact-number-regex"
	))]
	pub contact_number:     String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:              String,
	pub opening_time:       NaiveTime,
	pub closing_time:       NaiveTime,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "capacity-range"
	))]
	pub capacity:           i32,
	#[validate(range(
		min = -720,
		max = 840,
		message = "utc offset must be a whole timezone offset in minutes",
		code = "utc-offset-range"
	))]
	#[serde(default)]
	pub utc_offset_minutes: i32,
}

impl CreateRestaurantRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewRestaurant {
		NewRestaurant {
			name:               self.name,
			address:            self.address,
			contact_number:     self.contact_number,
			email:              self.email,
			opening_time:       self.opening_time,
			closing_time:       self.closing_time,
			capacity:           self.capacity,
			utc_offset_minutes: self.utc_offset_minutes,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
	#[validate(length(
		min = 1,
		max = 255,
		message = "name must be between 1 and 255 characters long",
		code = "name-length"
	))]
	pub name:               Option<String>,
	#[validate(length(
		min = 1,
		message = "address must not be empty",
		code = "address-length"
	))]
	pub address:            Option<String>,
	#[validate(regex(
		path = *CONTACT_NUMBER_REGEX,
		message = "contact number must be a phone number",
		code = "contact-number-regex"
	))]
	pub contact_number:     Option<String>,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:              Option<String>,
	pub opening_time:       Option<NaiveTime>,
	pub closing_time:       Option<NaiveTime>,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "capacity-range"
	))]
	pub capacity:           Option<i32>,
	#[validate(range(
		min = -720,
		max = 840,
		message = "utc offset must be a whole timezone offset in minutes",
		code = "utc-offset-range"
	))]
	pub utc_offset_minutes: Option<i32>,
}

impl UpdateRestaurantRequest {
	#[must_use]
	pub fn to_insertable(self) -> RestaurantUpdate {
		RestaurantUpdate {
			name:               self.name,
			address:            self.address,
			contact_number:     self.contact_number,
			email:              self.email,
			opening_time:       self.opening_time,
			closing_time:       self.closing_time,
			capacity:           self.capacity,
			utc_offset_minutes: self.utc_offset_minutes,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
	pub id:                 i32,
	pub name:               String,
	pub address:            String,
	pub contact_number:     String,
	pub email:              String,
	pub opening_time:       NaiveTime,
	pub closing_time:       NaiveTime,
	pub capacity:           i32,
	pub utc_offset_minutes: i32,
	pub created_at:         NaiveDateTime,
	pub updated_at:         NaiveDateTime,
}

impl From<Restaurant> for RestaurantResponse {
	fn from(value: Restaurant) -> Self {
		Self {
			id:                 value.id,
			name:               value.name,
			address:            value.address,
			contact_number:     value.contact_number,
			email:              value.email,
			opening_time:       value.opening_time,
			closing_time:       value.closing_time,
			capacity:           value.capacity,
			utc_offset_minutes: value.utc_offset_minutes,
			created_at:         value.created_at,
			updated_at:         value.updated_at,
		}
	}
}
