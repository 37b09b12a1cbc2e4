use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::BookingStatus"]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
	#[default]
	Pending,
	Confirmed,
	Cancelled,
}
